// type_arena/sema_type.rs
//
// SemaType: the interned type representation and template arguments.

use lumen_identity::{AliasId, ExprId, RecordId, ScalarType, TemplateId, TemplateParamId};
use smallvec::SmallVec;

use super::type_id::{TypeId, TypeIdVec};

/// A template argument as written (sugared) or canonicalized.
///
/// Sugared arguments use `Type` and `Expr`. Canonicalization rewrites
/// literal expressions to `Integral` and references to non-type template
/// parameters to `NonTypeParam`, so two spellings of the same argument
/// intern to the same specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateArg {
    Type(TypeId),
    Expr(ExprId),
    Integral(u64),
    NonTypeParam { depth: u32, index: u32 },
}

impl TemplateArg {
    pub fn as_type(self) -> Option<TypeId> {
        match self {
            TemplateArg::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_integral(self) -> Option<u64> {
        match self {
            TemplateArg::Integral(value) => Some(value),
            _ => None,
        }
    }
}

/// SmallVec for template arguments - every built-in template takes at most 3
pub type TemplateArgVec = SmallVec<[TemplateArg; 3]>;

/// The interned type representation.
///
/// Stored in the TypeArena; pass `TypeId` handles around and look the
/// structure up with `arena.get(id)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum SemaType {
    /// Error recovery type; builders fed `Invalid` return it unchanged.
    Invalid,
    Void,
    Scalar(ScalarType),

    /// A non-template record (or an explicit specialization record).
    Record(RecordId),

    /// Reference to a template type parameter.
    /// `decl` is sugar and is dropped by canonicalization.
    TemplateTypeParam {
        depth: u32,
        index: u32,
        decl: Option<TemplateParamId>,
    },

    /// `template<args...>`, dependent or concrete.
    Specialization {
        template: TemplateId,
        args: TemplateArgVec,
    },

    /// The type a templated record denotes inside its own definition.
    InjectedClassName {
        record: RecordId,
        specialization: TypeId,
    },

    LValueReference(TypeId),
    Const(TypeId),

    ConstantArray {
        element: TypeId,
        size: u64,
    },

    /// Array whose length is a value-dependent expression (`element[count]`).
    DependentSizedArray {
        element: TypeId,
        size: ExprId,
    },

    /// Intrinsic vector with a known length.
    ConstantVector {
        element: TypeId,
        size: u64,
    },

    /// Intrinsic vector whose length is a value-dependent expression.
    DependentSizedVector {
        element: TypeId,
        size: ExprId,
    },

    /// Member function type. `is_const` is the implicit object qualifier.
    Function {
        params: TypeIdVec,
        ret: TypeId,
        is_const: bool,
    },

    /// Typedef sugar; canonicalization strips it.
    Alias {
        alias: AliasId,
        target: TypeId,
    },
}

impl SemaType {
    pub fn is_invalid(&self) -> bool {
        matches!(self, SemaType::Invalid)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, SemaType::LValueReference(_))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, SemaType::Const(_))
    }
}
