// intrinsics.rs
//
// Intrinsic operation annotations on member functions.
//
// Opcodes are consumed as opaque (group, opcode) pairs; only the subscript
// opcodes built-in declarations attach are enumerated.

use lumen_identity::MethodId;

use crate::decl_registry::DeclRegistry;

/// High-level opcode groups with their stable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeGroup {
    NotHighLevel,
    Extension,
    Call,
    Cast,
    Init,
    BinaryOp,
    UnaryOp,
    Subscript,
    MatrixLoadStore,
    Select,
    CreateHandle,
}

impl OpcodeGroup {
    pub const ALL: [OpcodeGroup; 11] = [
        OpcodeGroup::NotHighLevel,
        OpcodeGroup::Extension,
        OpcodeGroup::Call,
        OpcodeGroup::Cast,
        OpcodeGroup::Init,
        OpcodeGroup::BinaryOp,
        OpcodeGroup::UnaryOp,
        OpcodeGroup::Subscript,
        OpcodeGroup::MatrixLoadStore,
        OpcodeGroup::Select,
        OpcodeGroup::CreateHandle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OpcodeGroup::NotHighLevel => "notHLDXIL",
            OpcodeGroup::Extension => "<ext>",
            OpcodeGroup::Call => "op",
            OpcodeGroup::Cast => "cast",
            OpcodeGroup::Init => "init",
            OpcodeGroup::BinaryOp => "binop",
            OpcodeGroup::UnaryOp => "unop",
            OpcodeGroup::Subscript => "subscript",
            OpcodeGroup::MatrixLoadStore => "matldst",
            OpcodeGroup::Select => "select",
            OpcodeGroup::CreateHandle => "createhandle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.name() == name)
    }
}

impl std::fmt::Display for OpcodeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opcodes of the `subscript` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SubscriptOpcode {
    DefaultSubscript = 0,
    ColMatSubscript,
    RowMatSubscript,
    ColMatElement,
    RowMatElement,
    DoubleSubscript,
    CBufferSubscript,
    VectorSubscript,
}

impl SubscriptOpcode {
    pub fn opcode(self) -> u32 {
        self as u32
    }
}

/// `(group, opcode, lowering)` annotation marking a function as backed by
/// an intrinsic operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrinsicAttr {
    pub group: OpcodeGroup,
    pub opcode: u32,
    pub lowering: String,
    pub is_implicit: bool,
}

impl IntrinsicAttr {
    /// Implicit attribute with an empty lowering string
    pub fn implicit(group: OpcodeGroup, opcode: u32) -> Self {
        Self {
            group,
            opcode,
            lowering: String::new(),
            is_implicit: true,
        }
    }

    pub fn vector_subscript() -> Self {
        Self::implicit(
            OpcodeGroup::Subscript,
            SubscriptOpcode::VectorSubscript.opcode(),
        )
    }
}

/// Is this member function backed by an intrinsic operation?
pub fn is_builtin_operation(decls: &DeclRegistry, method: MethodId) -> bool {
    decls.method(method).intrinsic().is_some()
}

/// `(opcode, group name)` of an intrinsic-backed member function.
pub fn builtin_operation(decls: &DeclRegistry, method: MethodId) -> Option<(u32, &'static str)> {
    decls
        .method(method)
        .intrinsic()
        .map(|attr| (attr.opcode, attr.group.name()))
}

/// Lowering strategy string of an intrinsic-backed member function.
pub fn intrinsic_lowering(decls: &DeclRegistry, method: MethodId) -> Option<&str> {
    decls
        .method(method)
        .intrinsic()
        .map(|attr| attr.lowering.as_str())
}
