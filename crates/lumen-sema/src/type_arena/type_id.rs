// type_arena/type_id.rs
//
// TypeId: interned type handle with reserved constants for scalars.

use lumen_identity::ScalarType;
use smallvec::SmallVec;

/// Type identity in the TypeArena.
///
/// Every type the declaration graph mentions (scalars, records, template
/// parameters, specializations, references, arrays, member-function types)
/// is interned once; equal `TypeId`s mean structurally identical types.
/// Use `TypeArena::canonical` before comparing for semantic sameness.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    // ========================================================================
    // Reserved TypeIds for scalars and special types
    // These are guaranteed to be interned at these indices by TypeArena::new()
    // ========================================================================

    // Invalid type (must be 0 for is_invalid() check)
    pub const INVALID: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);

    // Scalars, in ScalarType order (index = discriminant + 1)
    pub const BOOL: TypeId = TypeId(2);
    pub const INT: TypeId = TypeId(3);
    pub const UINT: TypeId = TypeId(4);
    pub const DWORD: TypeId = TypeId(5);
    pub const HALF: TypeId = TypeId(6);
    pub const FLOAT: TypeId = TypeId(7);
    pub const DOUBLE: TypeId = TypeId(8);
    pub const MIN10FLOAT: TypeId = TypeId(9);
    pub const MIN16FLOAT: TypeId = TypeId(10);
    pub const MIN12INT: TypeId = TypeId(11);
    pub const MIN16INT: TypeId = TypeId(12);
    pub const MIN16UINT: TypeId = TypeId(13);
    pub const LITERAL_INT: TypeId = TypeId(14);
    pub const LITERAL_FLOAT: TypeId = TypeId(15);
    pub const INT64: TypeId = TypeId(16);
    pub const UINT64: TypeId = TypeId(17);

    /// First non-reserved TypeId index (for dynamic types)
    pub const FIRST_DYNAMIC: u32 = 18;

    /// Opaque object handle stored in built-in records.
    pub const OBJECT_HANDLE: TypeId = Self::INT;

    /// Unsigned index type of subscript operators.
    pub const INDEX: TypeId = Self::UINT;

    /// Type of the `count` parameter of generic handle templates.
    pub const SIZE: TypeId = Self::UINT;

    /// Reserved id of a scalar type. `Unknown` maps to `INVALID`.
    pub const fn scalar(scalar: ScalarType) -> TypeId {
        match scalar {
            ScalarType::Unknown => Self::INVALID,
            other => TypeId(other as u32 + 1),
        }
    }

    /// Scalar type this reserved id stands for, if any (no arena needed)
    pub fn as_scalar(self) -> Option<ScalarType> {
        if self.is_scalar() {
            ScalarType::from_index(self.0 as usize - 1)
        } else {
            None
        }
    }

    /// Get the raw index (for debugging)
    pub fn index(self) -> u32 {
        self.0
    }

    /// Create a TypeId from a raw index (for internal use by TypeArena)
    pub(crate) fn from_raw(index: u32) -> Self {
        TypeId(index)
    }

    /// Check if this is the invalid type (no arena needed)
    #[inline]
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    /// Check if this is void (no arena needed)
    #[inline]
    pub fn is_void(self) -> bool {
        self == Self::VOID
    }

    /// Check if this is a scalar type (no arena needed)
    #[inline]
    pub fn is_scalar(self) -> bool {
        self.0 >= Self::BOOL.0 && self.0 <= Self::UINT64.0
    }
}

/// SmallVec for type children - inline up to 4 (covers every built-in parameter list)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;
