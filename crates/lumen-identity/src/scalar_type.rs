// scalar_type.rs
//
// Scalar type enumeration and its spelling table.

/// Scalar element types of the shading language.
///
/// Discriminants index [`SCALAR_TYPE_NAMES`]; `Unknown` is never a valid
/// element type and only exists so index 0 has a spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ScalarType {
    Unknown,
    Bool,
    Int,
    Uint,
    Dword,
    Half,
    Float,
    Double,
    Min10Float,
    Min16Float,
    Min12Int,
    Min16Int,
    Min16Uint,
    LiteralInt,
    LiteralFloat,
    Int64,
    Uint64,
}

/// Spellings of [`ScalarType`] values, in discriminant order.
///
/// Order matters to shorthand parsing: entries are tried front to back.
pub const SCALAR_TYPE_NAMES: [&str; ScalarType::COUNT] = [
    "<unknown>",
    "bool",
    "int",
    "uint",
    "dword",
    "half",
    "float",
    "double",
    "min10float",
    "min16float",
    "min12int",
    "min16int",
    "min16uint",
    "literal int",
    "literal float",
    "int64_t",
    "uint64_t",
];

const _: () = assert!(
    SCALAR_TYPE_NAMES.len() == ScalarType::ALL.len(),
    "scalar spellings are not aligned with ScalarType"
);

impl ScalarType {
    /// Number of enumeration values, `Unknown` included.
    pub const COUNT: usize = ScalarType::Uint64 as usize + 1;

    /// Every value in discriminant order.
    pub const ALL: [ScalarType; ScalarType::COUNT] = [
        ScalarType::Unknown,
        ScalarType::Bool,
        ScalarType::Int,
        ScalarType::Uint,
        ScalarType::Dword,
        ScalarType::Half,
        ScalarType::Float,
        ScalarType::Double,
        ScalarType::Min10Float,
        ScalarType::Min16Float,
        ScalarType::Min12Int,
        ScalarType::Min16Int,
        ScalarType::Min16Uint,
        ScalarType::LiteralInt,
        ScalarType::LiteralFloat,
        ScalarType::Int64,
        ScalarType::Uint64,
    ];

    /// First value usable as an element type.
    pub const MIN_VALID: ScalarType = ScalarType::Bool;

    /// Last value usable as an element type.
    pub const MAX: ScalarType = ScalarType::Uint64;

    /// Source spelling of this scalar type.
    pub fn as_str(self) -> &'static str {
        SCALAR_TYPE_NAMES[self as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Values usable as element types, in table order.
    pub fn valid() -> impl Iterator<Item = ScalarType> {
        Self::ALL[Self::MIN_VALID as usize..=Self::MAX as usize]
            .iter()
            .copied()
    }

    pub fn is_valid(self) -> bool {
        self != ScalarType::Unknown
    }

    pub fn is_floating(self) -> bool {
        matches!(
            self,
            ScalarType::Half
                | ScalarType::Float
                | ScalarType::Double
                | ScalarType::Min10Float
                | ScalarType::Min16Float
                | ScalarType::LiteralFloat
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            ScalarType::Int
                | ScalarType::Uint
                | ScalarType::Dword
                | ScalarType::Min12Int
                | ScalarType::Min16Int
                | ScalarType::Min16Uint
                | ScalarType::LiteralInt
                | ScalarType::Int64
                | ScalarType::Uint64
        )
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
