// builtins/record_builder.rs
//
// Typestate builder for generic container records.
//
// A class template and its record must be built in a fixed order:
// parameters, shell, injected specialization, definition, members,
// completion. Each step consumes the builder and returns it in the next
// state, so only valid orderings compile.

use lumen_identity::{ExprId, FieldId, MethodId, RecordId, Symbol, TemplateId, TemplateParamId};

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{DeclContext, DeclName, DeclRef, TagKind, TemplateParamKind};
use crate::intrinsics::IntrinsicAttr;
use crate::type_arena::TypeId;

use super::handle_field::add_handle_field;
use super::member_operator::add_member_operator;

/// Depth of every template parameter list built here
pub const FIRST_TEMPLATE_DEPTH: u32 = 0;

/// A completed generic container: class template plus templated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericContainerDecl {
    pub template: TemplateId,
    pub record: RecordId,
}

pub struct ParamsDeclared;

pub struct ShellCreated {
    template: TemplateId,
    record: RecordId,
}

pub struct Materialized {
    template: TemplateId,
    record: RecordId,
}

pub struct Defining {
    template: TemplateId,
    record: RecordId,
}

pub struct TemplateRecordBuilder<'db, State> {
    db: &'db mut CompilationDb,
    scope: DeclContext,
    name: Symbol,
    tag: TagKind,
    params: Vec<TemplateParamId>,
    state: State,
}

impl<'db, S> TemplateRecordBuilder<'db, S> {
    fn transition<T>(self, state: T) -> TemplateRecordBuilder<'db, T> {
        TemplateRecordBuilder {
            db: self.db,
            scope: self.scope,
            name: self.name,
            tag: self.tag,
            params: self.params,
            state,
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }
}

impl<'db> TemplateRecordBuilder<'db, ParamsDeclared> {
    pub fn new(db: &'db mut CompilationDb, scope: DeclContext, name: Symbol, tag: TagKind) -> Self {
        Self {
            db,
            scope,
            name,
            tag,
            params: Vec::new(),
            state: ParamsDeclared,
        }
    }

    /// Declare the next parameter as a type parameter
    pub fn type_param(mut self, name: Symbol, default: Option<TypeId>) -> Self {
        let index = self.params.len() as u32;
        let param = self.db.decls.create_template_param(
            name,
            FIRST_TEMPLATE_DEPTH,
            index,
            TemplateParamKind::Type { default },
            self.scope,
        );
        self.params.push(param);
        self
    }

    /// Declare the next parameter as a constant of type `ty`, with an
    /// optional literal default
    pub fn non_type_param(mut self, name: Symbol, ty: TypeId, default: Option<u64>) -> Self {
        let index = self.params.len() as u32;
        let default = default.map(|value| self.db.exprs.integer_literal(value, ty));
        let param = self.db.decls.create_template_param(
            name,
            FIRST_TEMPLATE_DEPTH,
            index,
            TemplateParamKind::NonType { ty, default },
            self.scope,
        );
        self.params.push(param);
        self
    }

    /// Create the record shell (type creation delayed) and the class
    /// template over it
    pub fn create_shell(self) -> TemplateRecordBuilder<'db, ShellCreated> {
        let db = &mut *self.db;
        let record = db
            .decls
            .create_record(self.name, self.tag, self.scope, true, &mut db.types);
        let template =
            db.decls
                .create_class_template(self.name, self.scope, self.params.clone(), record);
        self.transition(ShellCreated { template, record })
    }
}

impl<'db> TemplateRecordBuilder<'db, ShellCreated> {
    /// Fault in the self specialization so members can name the template
    /// parameters
    pub fn materialize(self) -> TemplateRecordBuilder<'db, Materialized> {
        let ShellCreated { template, record } = self.state;
        let db = &mut *self.db;
        db.decls
            .materialize_injected_specialization(template, &mut db.types, &mut db.exprs);
        db.decls.set_template_lexical_context(template, self.scope);
        db.decls.set_record_lexical_context(record, self.scope);
        self.transition(Materialized { template, record })
    }
}

impl<'db> TemplateRecordBuilder<'db, Materialized> {
    pub fn start_definition(self) -> TemplateRecordBuilder<'db, Defining> {
        let Materialized { template, record } = self.state;
        self.db.decls.start_definition(record);
        self.transition(Defining { template, record })
    }
}

impl<'db> TemplateRecordBuilder<'db, Defining> {
    pub fn db(&mut self) -> &mut CompilationDb {
        self.db
    }

    pub fn record(&self) -> RecordId {
        self.state.record
    }

    pub fn template(&self) -> TemplateId {
        self.state.template
    }

    pub fn param(&self, index: usize) -> TemplateParamId {
        self.params[index]
    }

    /// Type naming the type parameter at `index`
    pub fn param_type(&mut self, index: usize) -> TypeId {
        let param = self.params[index];
        self.db.decls.template_param_type(param, &mut self.db.types)
    }

    /// Expression referring to the non-type parameter at `index`
    pub fn param_ref(&mut self, index: usize) -> ExprId {
        let param = self.params[index];
        self.db.decls.template_param_ref(param, &mut self.db.exprs)
    }

    pub fn add_handle_field(&mut self, ty: TypeId) -> FieldId {
        add_handle_field(self.db, self.state.record, ty)
    }

    pub fn add_member_operator(
        &mut self,
        result: TypeId,
        param_types: &[TypeId],
        param_names: &[Symbol],
        name: DeclName,
        is_const: bool,
    ) -> MethodId {
        add_member_operator(
            self.db,
            self.state.record,
            result,
            param_types,
            param_names,
            name,
            is_const,
        )
    }

    pub fn add_intrinsic(&mut self, method: MethodId, attr: IntrinsicAttr) {
        self.db.decls.add_method_attr(method, attr);
    }

    /// Complete the definition, mark template and record implicit, and
    /// attach both to the scope
    pub fn complete(self) -> GenericContainerDecl {
        let Defining { template, record } = self.state;
        let decls = &mut self.db.decls;
        decls.complete_definition(record);
        decls.set_template_implicit(template, true);
        decls.set_record_implicit(record, true);
        decls.add_decl(self.scope, DeclRef::Template(template));
        decls.add_decl(self.scope, DeclRef::Record(record));
        GenericContainerDecl { template, record }
    }
}
