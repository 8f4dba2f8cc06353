//! Central registry for all declaration-graph nodes.
//!
//! DeclRegistry stores every declaration in append-only vectors addressed by
//! typed ids, and keeps per-context member lists with by-name lookup.
//!
//! This module is split into submodules by functionality:
//! - `records` - record creation and definition lifecycle
//! - `templates` - class templates, template parameters, specializations
//! - `members` - fields, static members, parameters, function templates, aliases
//! - `method_builder` - fluent member-function creation

mod members;
mod method_builder;
mod records;
mod templates;

pub use members::FieldDefBuilder;
pub use method_builder::MethodDefBuilder;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::decl_defs::{
    AliasDef, DeclContext, DeclName, DeclRef, FieldDef, FunctionTemplateDef, MethodDef,
    NamespaceDef, ParamDef, RecordDef, StaticVarDef, TemplateDef, TemplateParamDef,
};
use lumen_identity::{
    AliasId, FieldId, FunctionTemplateId, MethodId, NamespaceId, ParamId, RecordId, StaticVarId,
    Symbol, TemplateId, TemplateParamId,
};

/// Ordered members of one declaration context plus its name index.
#[derive(Debug, Clone, Default)]
pub struct ContextMembers {
    members: Vec<DeclRef>,
    by_name: FxHashMap<DeclName, SmallVec<[DeclRef; 2]>>,
}

impl ContextMembers {
    pub fn members(&self) -> &[DeclRef] {
        &self.members
    }
}

/// Central registry for all declarations
#[derive(Debug, Clone, Default)]
pub struct DeclRegistry {
    // Storage - IDs are indices into these vectors
    pub(crate) namespace_defs: Vec<NamespaceDef>,
    pub(crate) record_defs: Vec<RecordDef>,
    pub(crate) template_defs: Vec<TemplateDef>,
    pub(crate) template_param_defs: Vec<TemplateParamDef>,
    pub(crate) field_defs: Vec<FieldDef>,
    pub(crate) method_defs: Vec<MethodDef>,
    pub(crate) param_defs: Vec<ParamDef>,
    pub(crate) static_var_defs: Vec<StaticVarDef>,
    pub(crate) function_template_defs: Vec<FunctionTemplateDef>,
    pub(crate) alias_defs: Vec<AliasDef>,

    // Scoped membership: context -> ordered members and name index
    pub(crate) contexts: FxHashMap<DeclContext, ContextMembers>,
}

impl DeclRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Accessors =====

    pub fn namespace(&self, id: NamespaceId) -> &NamespaceDef {
        &self.namespace_defs[id.index() as usize]
    }

    pub fn record(&self, id: RecordId) -> &RecordDef {
        &self.record_defs[id.index() as usize]
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> &mut RecordDef {
        &mut self.record_defs[id.index() as usize]
    }

    pub fn template(&self, id: TemplateId) -> &TemplateDef {
        &self.template_defs[id.index() as usize]
    }

    pub(crate) fn template_mut(&mut self, id: TemplateId) -> &mut TemplateDef {
        &mut self.template_defs[id.index() as usize]
    }

    pub fn template_param(&self, id: TemplateParamId) -> &TemplateParamDef {
        &self.template_param_defs[id.index() as usize]
    }

    pub fn field(&self, id: FieldId) -> &FieldDef {
        &self.field_defs[id.index() as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodDef {
        &self.method_defs[id.index() as usize]
    }

    pub(crate) fn method_mut(&mut self, id: MethodId) -> &mut MethodDef {
        &mut self.method_defs[id.index() as usize]
    }

    pub fn param(&self, id: ParamId) -> &ParamDef {
        &self.param_defs[id.index() as usize]
    }

    pub fn static_var(&self, id: StaticVarId) -> &StaticVarDef {
        &self.static_var_defs[id.index() as usize]
    }

    pub fn function_template(&self, id: FunctionTemplateId) -> &FunctionTemplateDef {
        &self.function_template_defs[id.index() as usize]
    }

    pub fn alias(&self, id: AliasId) -> &AliasDef {
        &self.alias_defs[id.index() as usize]
    }

    pub fn record_count(&self) -> usize {
        self.record_defs.len()
    }

    pub fn alias_count(&self) -> usize {
        self.alias_defs.len()
    }

    // ===== Namespaces =====

    /// Create a namespace; it becomes visible once added to `parent`.
    pub fn create_namespace(&mut self, name: Symbol, parent: DeclContext) -> NamespaceId {
        let id = NamespaceId::new(self.namespace_defs.len() as u32);
        self.namespace_defs.push(NamespaceDef {
            id,
            name,
            parent,
            is_implicit: false,
        });
        id
    }

    pub fn set_namespace_implicit(&mut self, id: NamespaceId, implicit: bool) {
        self.namespace_defs[id.index() as usize].is_implicit = implicit;
    }

    // ===== Context membership =====

    /// Name under which a declaration is found by lookup.
    /// Records described by a template and specialization records are
    /// reached through their template, not by name.
    pub fn decl_name(&self, decl: DeclRef) -> Option<DeclName> {
        match decl {
            DeclRef::Namespace(id) => Some(self.namespace(id).name.into()),
            DeclRef::Record(id) => {
                let record = self.record(id);
                if record.described_template.is_some() || record.specialization_of.is_some() {
                    None
                } else {
                    Some(record.name.into())
                }
            }
            DeclRef::Template(id) => Some(self.template(id).name.into()),
            DeclRef::Field(id) => Some(self.field(id).name.into()),
            DeclRef::Method(id) => Some(self.method(id).name),
            DeclRef::StaticVar(id) => Some(self.static_var(id).name.into()),
            DeclRef::FunctionTemplate(id) => Some(self.function_template(id).name),
            DeclRef::Alias(id) => Some(self.alias(id).name.into()),
        }
    }

    /// Attach a declaration to a context.
    ///
    /// Panics when attaching to a record that is not being defined, or when
    /// the declaration is already a member of the context.
    pub fn add_decl(&mut self, context: DeclContext, decl: DeclRef) {
        if let DeclContext::Record(record) = context {
            assert!(
                self.record(record).is_being_defined(),
                "members can only be added to a record while it is being defined"
            );
        }
        let name = self.decl_name(decl);
        let entry = self.contexts.entry(context).or_default();
        assert!(
            !entry.members.contains(&decl),
            "declaration added to the same context twice"
        );
        entry.members.push(decl);
        if let Some(name) = name {
            entry.by_name.entry(name).or_default().push(decl);
        }
        tracing::trace!(?context, ?decl, "add_decl");
    }

    /// Ordered members of a context
    pub fn members(&self, context: DeclContext) -> &[DeclRef] {
        self.contexts
            .get(&context)
            .map(ContextMembers::members)
            .unwrap_or_default()
    }

    /// Declarations named `name` directly inside `context`, in insertion order
    pub fn lookup(&self, context: DeclContext, name: impl Into<DeclName>) -> &[DeclRef] {
        let name = name.into();
        self.contexts
            .get(&context)
            .and_then(|members| members.by_name.get(&name))
            .map(|decls| decls.as_slice())
            .unwrap_or_default()
    }

    /// Lookup that keeps only templates
    pub fn lookup_template(&self, context: DeclContext, name: Symbol) -> Option<TemplateId> {
        self.lookup(context, name).iter().find_map(|decl| match decl {
            DeclRef::Template(id) => Some(*id),
            _ => None,
        })
    }

    /// Lookup that keeps only records
    pub fn lookup_record(&self, context: DeclContext, name: Symbol) -> Option<RecordId> {
        self.lookup(context, name).iter().find_map(|decl| match decl {
            DeclRef::Record(id) => Some(*id),
            _ => None,
        })
    }

    /// Lookup that keeps only aliases
    pub fn lookup_alias(&self, context: DeclContext, name: Symbol) -> Option<AliasId> {
        self.lookup(context, name).iter().find_map(|decl| match decl {
            DeclRef::Alias(id) => Some(*id),
            _ => None,
        })
    }

    /// Lookup that keeps only namespaces
    pub fn lookup_namespace(&self, context: DeclContext, name: Symbol) -> Option<NamespaceId> {
        self.lookup(context, name).iter().find_map(|decl| match decl {
            DeclRef::Namespace(id) => Some(*id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
