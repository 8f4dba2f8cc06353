//! Record creation and the definition lifecycle.

use lumen_identity::{RecordId, Symbol};

use crate::decl_defs::{BaseSpecifier, DeclContext, DefinitionState, RecordDef, TagKind};
use crate::type_arena::{TypeArena, TypeId};

use super::DeclRegistry;

impl DeclRegistry {
    /// Create a record shell in `Declared` state.
    ///
    /// With `delay_type_creation` the record's type is left unset until
    /// something faults it in (`record_type`, or template materialization
    /// for templated records).
    pub fn create_record(
        &mut self,
        name: Symbol,
        tag: TagKind,
        context: DeclContext,
        delay_type_creation: bool,
        types: &mut TypeArena,
    ) -> RecordId {
        let id = RecordId::new(self.record_defs.len() as u32);
        let type_id = (!delay_type_creation).then(|| types.record(id));
        self.record_defs.push(RecordDef {
            id,
            name,
            tag,
            semantic_context: context,
            lexical_context: None,
            type_id,
            described_template: None,
            specialization_of: None,
            state: DefinitionState::Declared,
            is_implicit: false,
            is_free_standing: false,
            bases: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            static_vars: Vec::new(),
            function_templates: Vec::new(),
        });
        id
    }

    pub fn set_record_lexical_context(&mut self, id: RecordId, context: DeclContext) {
        self.record_mut(id).lexical_context = Some(context);
    }

    pub fn set_record_implicit(&mut self, id: RecordId, implicit: bool) {
        self.record_mut(id).is_implicit = implicit;
    }

    pub fn set_free_standing(&mut self, id: RecordId) {
        self.record_mut(id).is_free_standing = true;
    }

    /// `Declared -> BeingDefined`
    pub fn start_definition(&mut self, id: RecordId) {
        let record = self.record_mut(id);
        assert_eq!(
            record.state,
            DefinitionState::Declared,
            "start_definition on a record that was already started"
        );
        record.state = DefinitionState::BeingDefined;
    }

    /// `BeingDefined -> Complete`
    pub fn complete_definition(&mut self, id: RecordId) {
        let record = self.record_mut(id);
        assert_eq!(
            record.state,
            DefinitionState::BeingDefined,
            "complete_definition on a record whose definition was not started"
        );
        record.state = DefinitionState::Complete;
        tracing::trace!(record = id.index(), "complete_definition");
    }

    /// Replace the base list of a record being defined
    pub fn set_bases(&mut self, id: RecordId, bases: Vec<BaseSpecifier>) {
        let record = self.record_mut(id);
        assert!(
            record.is_being_defined(),
            "bases can only be set while a record is being defined"
        );
        record.bases = bases;
    }

    /// Type of a record, faulting it in if creation was delayed.
    ///
    /// Panics for a templated record whose injected specialization has not
    /// been materialized yet.
    pub fn record_type(&mut self, id: RecordId, types: &mut TypeArena) -> TypeId {
        let record = self.record(id);
        if let Some(ty) = record.type_id {
            return ty;
        }
        assert!(
            record.described_template.is_none(),
            "injected specialization must be materialized before the record type is used"
        );
        let ty = match &record.specialization_of {
            Some(info) => types.specialization(info.template, info.args.clone()),
            None => types.record(id),
        };
        self.record_mut(id).type_id = Some(ty);
        ty
    }
}
