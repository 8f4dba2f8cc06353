//! Class templates, template parameters and explicit specializations.

use lumen_identity::{ExprId, RecordId, Symbol, TemplateId, TemplateParamId};
use smallvec::SmallVec;

use crate::decl_defs::{
    DeclContext, SpecializationInfo, SpecializationKind, TagKind, TemplateDef, TemplateParamDef,
    TemplateParamKind,
};
use crate::expr::ExprArena;
use crate::type_arena::{TemplateArg, TemplateArgVec, TypeArena, TypeId};

use super::DeclRegistry;

impl DeclRegistry {
    /// Create a template parameter at (depth, index).
    pub fn create_template_param(
        &mut self,
        name: Symbol,
        depth: u32,
        index: u32,
        kind: TemplateParamKind,
        context: DeclContext,
    ) -> TemplateParamId {
        let id = TemplateParamId::new(self.template_param_defs.len() as u32);
        self.template_param_defs.push(TemplateParamDef {
            id,
            name,
            depth,
            index,
            kind,
            context,
        });
        id
    }

    /// Create a class template over `record` and bind the record to it.
    pub fn create_class_template(
        &mut self,
        name: Symbol,
        context: DeclContext,
        params: Vec<TemplateParamId>,
        record: RecordId,
    ) -> TemplateId {
        assert!(
            !params.is_empty(),
            "a class template needs at least one template parameter"
        );
        assert!(
            self.record(record).described_template.is_none(),
            "record already describes a class template"
        );
        let id = TemplateId::new(self.template_defs.len() as u32);
        self.template_defs.push(TemplateDef {
            id,
            name,
            context,
            lexical_context: None,
            params,
            record,
            injected_specialization: None,
            specializations: Vec::new(),
            is_implicit: false,
        });
        self.record_mut(record).described_template = Some(id);
        id
    }

    pub fn set_template_lexical_context(&mut self, id: TemplateId, context: DeclContext) {
        self.template_mut(id).lexical_context = Some(context);
    }

    pub fn set_template_implicit(&mut self, id: TemplateId, implicit: bool) {
        self.template_mut(id).is_implicit = implicit;
    }

    /// Type naming a template type parameter inside its template
    pub fn template_param_type(&self, param: TemplateParamId, types: &mut TypeArena) -> TypeId {
        let def = self.template_param(param);
        assert!(def.is_type(), "template parameter is not a type parameter");
        types.template_type_param(def.depth, def.index, Some(param))
    }

    /// Expression referring to a non-type template parameter
    pub fn template_param_ref(&self, param: TemplateParamId, exprs: &mut ExprArena) -> ExprId {
        let def = self.template_param(param);
        match def.kind {
            TemplateParamKind::NonType { ty, .. } => {
                exprs.template_param_ref(param, def.depth, def.index, ty)
            }
            TemplateParamKind::Type { .. } => {
                panic!("template parameter is not a non-type parameter")
            }
        }
    }

    /// Fault in `name<params...>` and the record's injected class name type.
    ///
    /// Idempotent; returns the injected class name type.
    pub fn materialize_injected_specialization(
        &mut self,
        id: TemplateId,
        types: &mut TypeArena,
        exprs: &mut ExprArena,
    ) -> TypeId {
        let record = self.template(id).record;
        if self.template(id).injected_specialization.is_some()
            && let Some(injected) = self.record(record).type_id
        {
            return injected;
        }

        let params = self.template(id).params.clone();
        let args: TemplateArgVec = params
            .iter()
            .map(|&param| match self.template_param(param).kind {
                TemplateParamKind::Type { .. } => {
                    TemplateArg::Type(self.template_param_type(param, types))
                }
                TemplateParamKind::NonType { .. } => {
                    TemplateArg::Expr(self.template_param_ref(param, exprs))
                }
            })
            .collect();
        let specialization = types.specialization(id, args);
        let injected = types.injected_class_name(record, specialization);
        debug_assert!(
            types.is_dependent(injected, exprs),
            "class template type is not dependent"
        );

        self.template_mut(id).injected_specialization = Some(specialization);
        self.record_mut(record).type_id = Some(injected);
        injected
    }

    /// Create a record for a specialization of `template` with the
    /// canonical argument pattern `args`, written over `params`.
    pub fn create_specialization_record(
        &mut self,
        template: TemplateId,
        params: Vec<TemplateParamId>,
        args: TemplateArgVec,
        context: DeclContext,
        types: &mut TypeArena,
    ) -> RecordId {
        let expected = self.template(template).params.len();
        assert_eq!(
            args.len(),
            expected,
            "specialization argument count must match the template parameter count"
        );
        let name = self.template(template).name;
        let record = self.create_record(name, TagKind::Struct, context, true, types);
        self.record_mut(record).specialization_of = Some(SpecializationInfo {
            template,
            kind: SpecializationKind::Explicit,
            params,
            args,
        });
        record
    }

    /// Register a specialization record on its primary template
    pub fn add_explicit_specialization(&mut self, template: TemplateId, record: RecordId) {
        let specialized = self
            .record(record)
            .specialization_of
            .as_ref()
            .map(|info| info.template);
        assert_eq!(
            specialized,
            Some(template),
            "record is not a specialization of this template"
        );
        self.template_mut(template).specializations.push(record);
    }

    /// Parameters of a template with their definitions
    pub fn template_params(&self, id: TemplateId) -> SmallVec<[&TemplateParamDef; 3]> {
        self.template(id)
            .params
            .iter()
            .map(|&param| self.template_param(param))
            .collect()
    }
}
