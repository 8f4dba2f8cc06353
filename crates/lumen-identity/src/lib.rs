// lib.rs
//
// Shared identity primitives for the lumen front end.
// Defines Symbol, Interner, the reserved identifier table, typed
// declaration ids and the scalar type enumeration.

mod entities;
mod intern;
mod reserved;
mod scalar_type;
mod symbol;

pub use entities::{
    AliasId, ExprId, FieldId, FunctionTemplateId, MethodId, NamespaceId, ParamId, RecordId,
    StaticVarId, TemplateId, TemplateParamId,
};
pub use intern::Interner;
pub use reserved::ReservedIdents;
pub use scalar_type::{SCALAR_TYPE_NAMES, ScalarType};
pub use symbol::Symbol;
