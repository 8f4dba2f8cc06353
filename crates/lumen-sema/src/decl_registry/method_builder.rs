//! Builder for member-function creation to reduce argument boilerplate.

use lumen_identity::{MethodId, RecordId};

use crate::decl_defs::{AccessSpecifier, DeclContext, DeclName, MethodDef};
use crate::type_arena::{TypeArena, TypeId};

use super::DeclRegistry;

/// Builder for member functions.
///
/// Defaults:
/// - `access`: public
/// - `lexical_context`: the owning record
///
/// `register` creates the method with one empty prototype slot per
/// parameter of `signature`; it does not attach the method to its record.
///
/// # Example
/// ```ignore
/// let method = MethodDefBuilder::new(record, DeclName::Operator(OverloadedOperator::Subscript), sig)
///     .access(AccessSpecifier::Public)
///     .register(&mut decls, &types);
/// ```
pub struct MethodDefBuilder {
    record: RecordId,
    name: DeclName,
    signature: TypeId,
    access: AccessSpecifier,
    lexical_context: Option<DeclContext>,
}

impl MethodDefBuilder {
    pub fn new(record: RecordId, name: DeclName, signature: TypeId) -> Self {
        Self {
            record,
            name,
            signature,
            access: AccessSpecifier::Public,
            lexical_context: None,
        }
    }

    pub fn access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn lexical_context(mut self, context: DeclContext) -> Self {
        self.lexical_context = Some(context);
        self
    }

    /// Create the method. Panics if `signature` is not a function type.
    pub fn register(self, registry: &mut DeclRegistry, types: &TypeArena) -> MethodId {
        let (params, _, _) = types
            .function_parts(self.signature)
            .expect("member function signature must be a function type");
        let id = MethodId::new(registry.method_defs.len() as u32);
        registry.method_defs.push(MethodDef {
            id,
            name: self.name,
            record: self.record,
            lexical_context: self
                .lexical_context
                .unwrap_or(DeclContext::Record(self.record)),
            signature: self.signature,
            access: self.access,
            params: Vec::new(),
            prototype: vec![None; params.len()],
            attrs: Vec::new(),
            described_template: None,
        });
        registry.record_mut(self.record).methods.push(id);
        id
    }
}
