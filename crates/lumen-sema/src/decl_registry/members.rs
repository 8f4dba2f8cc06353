//! Fields, static data members, parameters, function templates and aliases.

use lumen_identity::{
    AliasId, ExprId, FieldId, FunctionTemplateId, MethodId, ParamId, RecordId, StaticVarId,
    Symbol, TemplateParamId,
};

use crate::decl_defs::{
    AccessSpecifier, AliasDef, DeclContext, FieldDef, FunctionTemplateDef, ParamDef, StaticVarDef,
};
use crate::intrinsics::IntrinsicAttr;
use crate::type_arena::{TypeArena, TypeId};

use super::DeclRegistry;

/// Builder for field declarations.
///
/// Defaults: access from the record's tag, explicit, non-mutable, no
/// initializer. `register` creates the field; attach it with `add_decl`.
pub struct FieldDefBuilder {
    record: RecordId,
    name: Symbol,
    ty: TypeId,
    access: Option<AccessSpecifier>,
    is_implicit: bool,
    is_mutable: bool,
    init: Option<ExprId>,
}

impl FieldDefBuilder {
    pub fn new(record: RecordId, name: Symbol, ty: TypeId) -> Self {
        Self {
            record,
            name,
            ty,
            access: None,
            is_implicit: false,
            is_mutable: false,
            init: None,
        }
    }

    pub fn access(mut self, access: AccessSpecifier) -> Self {
        self.access = Some(access);
        self
    }

    pub fn implicit(mut self, implicit: bool) -> Self {
        self.is_implicit = implicit;
        self
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.is_mutable = mutable;
        self
    }

    pub fn init(mut self, init: ExprId) -> Self {
        self.init = Some(init);
        self
    }

    pub fn register(self, registry: &mut DeclRegistry) -> FieldId {
        let id = FieldId::new(registry.field_defs.len() as u32);
        let access = self
            .access
            .unwrap_or_else(|| registry.record(self.record).tag.default_access());
        registry.field_defs.push(FieldDef {
            id,
            name: self.name,
            record: self.record,
            ty: self.ty,
            access,
            is_implicit: self.is_implicit,
            is_mutable: self.is_mutable,
            init: self.init,
        });
        registry.record_mut(self.record).fields.push(id);
        id
    }
}

impl DeclRegistry {
    /// Create a static data member of `record`.
    pub fn create_static_var(
        &mut self,
        record: RecordId,
        name: Symbol,
        ty: TypeId,
        init: Option<ExprId>,
        is_constexpr: bool,
        access: AccessSpecifier,
    ) -> StaticVarId {
        let id = StaticVarId::new(self.static_var_defs.len() as u32);
        self.static_var_defs.push(StaticVarDef {
            id,
            name,
            record,
            ty,
            init,
            is_constexpr,
            access,
        });
        self.record_mut(record).static_vars.push(id);
        id
    }

    /// Create a parameter variable of `method` at (scope depth, index).
    pub fn create_param(
        &mut self,
        method: MethodId,
        name: Symbol,
        ty: TypeId,
        scope_depth: u32,
        scope_index: u32,
    ) -> ParamId {
        let id = ParamId::new(self.param_defs.len() as u32);
        self.param_defs.push(ParamDef {
            id,
            name,
            ty,
            method,
            scope_depth,
            scope_index,
        });
        id
    }

    /// Set the parameter list of a method
    pub fn set_params(&mut self, method: MethodId, params: Vec<ParamId>) {
        self.method_mut(method).params = params;
    }

    /// Bind parameter declarations to the method's prototype slots.
    ///
    /// Panics unless there is one parameter per slot and every slot is empty.
    pub fn associate_prototype_params(&mut self, method: MethodId, params: &[ParamId]) {
        let def = self.method_mut(method);
        assert_eq!(
            def.prototype.len(),
            params.len(),
            "parameter count must match the function prototype"
        );
        for (slot, &param) in def.prototype.iter_mut().zip(params) {
            assert!(slot.is_none(), "prototype parameter slot already filled");
            *slot = Some(param);
        }
    }

    pub fn add_method_attr(&mut self, method: MethodId, attr: IntrinsicAttr) {
        self.method_mut(method).attrs.push(attr);
    }

    /// Wrap a member function of `record` in a function template.
    ///
    /// The template is public, lexically inside the record, and the method
    /// records it as its described template. Attach it with `add_decl`.
    pub fn create_function_template(
        &mut self,
        record: RecordId,
        method: MethodId,
        params: Vec<TemplateParamId>,
    ) -> FunctionTemplateId {
        assert!(
            !params.is_empty(),
            "a function template needs at least one template parameter"
        );
        assert_eq!(
            self.method(method).record,
            record,
            "method does not belong to this record"
        );
        let id = FunctionTemplateId::new(self.function_template_defs.len() as u32);
        let name = self.method(method).name;
        self.function_template_defs.push(FunctionTemplateDef {
            id,
            name,
            record,
            lexical_context: DeclContext::Record(record),
            params,
            method,
            access: AccessSpecifier::Public,
        });
        self.method_mut(method).described_template = Some(id);
        self.record_mut(record).function_templates.push(id);
        id
    }

    /// Create an alias declaration naming `target`. Attach it with `add_decl`.
    pub fn create_alias(
        &mut self,
        name: Symbol,
        context: DeclContext,
        target: TypeId,
        types: &mut TypeArena,
    ) -> AliasId {
        let id = AliasId::new(self.alias_defs.len() as u32);
        let type_id = types.alias(id, target);
        self.alias_defs.push(AliasDef {
            id,
            name,
            context,
            target,
            type_id,
            is_implicit: false,
        });
        id
    }

    pub fn set_alias_implicit(&mut self, id: AliasId, implicit: bool) {
        self.alias_defs[id.index() as usize].is_implicit = implicit;
    }
}
