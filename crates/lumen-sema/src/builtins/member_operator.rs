// builtins/member_operator.rs
//
// Member-function synthesis: operators on built-in records and function
// templates over them.

use lumen_identity::{FunctionTemplateId, MethodId, ParamId, RecordId, Symbol, TemplateParamId};

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{AccessSpecifier, DeclContext, DeclName, DeclRef};
use crate::decl_registry::MethodDefBuilder;
use crate::type_arena::{TypeId, TypeIdVec};

/// Prototype scope depth of member-function parameters
const PARAM_SCOPE_DEPTH: u32 = 0;

/// Build a public member function of `record` and attach it.
///
/// The function type is formed from `param_types`, `result` and the const
/// qualifier. One parameter declaration is created per (type, name) pair,
/// positioned by list index, and bound to its prototype slot. Returns the
/// method so callers can annotate it further.
pub fn add_member_operator(
    db: &mut CompilationDb,
    record: RecordId,
    result: TypeId,
    param_types: &[TypeId],
    param_names: &[Symbol],
    name: DeclName,
    is_const: bool,
) -> MethodId {
    assert_eq!(
        param_types.len(),
        param_names.len(),
        "parameter types and names must pair up"
    );
    assert!(!result.is_invalid(), "result type must be valid");

    let params: TypeIdVec = param_types.iter().copied().collect();
    let signature = db.types.function(params, result, is_const);
    let method = MethodDefBuilder::new(record, name, signature)
        .access(AccessSpecifier::Public)
        .lexical_context(DeclContext::Record(record))
        .register(&mut db.decls, &db.types);

    if !param_types.is_empty() {
        let params: Vec<ParamId> = param_types
            .iter()
            .zip(param_names)
            .enumerate()
            .map(|(index, (&ty, &param_name))| {
                db.decls
                    .create_param(method, param_name, ty, PARAM_SCOPE_DEPTH, index as u32)
            })
            .collect();
        db.decls.set_params(method, params.clone());
        db.decls.associate_prototype_params(method, &params);
    }

    db.decls
        .add_decl(DeclContext::Record(record), DeclRef::Method(method));
    tracing::trace!(record = record.index(), is_const, "added member operator");
    method
}

/// Wrap a member function of `record` in a function template and attach it
/// to the record.
pub fn build_function_template_from_method(
    db: &mut CompilationDb,
    record: RecordId,
    method: MethodId,
    params: Vec<TemplateParamId>,
) -> FunctionTemplateId {
    let template = db.decls.create_function_template(record, method, params);
    db.decls.add_decl(
        DeclContext::Record(record),
        DeclRef::FunctionTemplate(template),
    );
    template
}
