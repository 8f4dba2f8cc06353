// builtins/type_traits.rs
//
// `std::true_type`, `std::false_type` and `std::is_same<T, V>`.
//
// Each specialization carries its own parameter list and a canonical
// argument pattern. It is registered on the primary template as an
// explicit specialization; selection matches patterns structurally
// (see `specialization::select_specialization`).

use lumen_identity::{NamespaceId, RecordId, Symbol, TemplateId, TemplateParamId};
use smallvec::smallvec;

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{
    AccessSpecifier, BaseSpecifier, DeclContext, DeclRef, TagKind, TemplateParamKind,
};
use crate::specialization::select_specialization;
use crate::type_arena::{SemaType, TemplateArg, TemplateArgVec, TypeArena, TypeId};

use super::record_builder::FIRST_TEMPLATE_DEPTH;

/// Declarations created by [`build_type_equality_support`].
#[derive(Debug, Clone)]
pub struct TypeTraitDecls {
    pub std_namespace: NamespaceId,
    pub true_type: RecordId,
    pub false_type: RecordId,
    pub is_same: TemplateId,
    /// Explicit specializations of `is_same` in registration order
    pub specializations: Vec<RecordId>,
}

impl TypeTraitDecls {
    /// The primary `is_same` record
    pub fn primary(&self, db: &CompilationDb) -> RecordId {
        db.decls.template(self.is_same).record
    }
}

/// Build the `std` namespace with the marker types and `is_same`.
///
/// With `extensions`, `is_same<T, const T>` and `is_same<T, T&>` are also
/// specialized to derive from `true_type`.
pub fn build_type_equality_support(db: &mut CompilationDb, extensions: bool) -> TypeTraitDecls {
    let reserved = db.reserved.clone();
    let std_namespace = db
        .decls
        .create_namespace(reserved.std, DeclContext::TranslationUnit);
    let std_ctx = DeclContext::Namespace(std_namespace);

    let true_type = build_static_bool_record(db, std_ctx, reserved.true_type, true);
    let false_type = build_static_bool_record(db, std_ctx, reserved.false_type, false);
    let true_ty = db.record_type(true_type);
    let false_ty = db.record_type(false_type);

    let t = declare_type_param(db, std_ctx, reserved.param_t, 0);
    let v = declare_type_param(db, std_ctx, reserved.param_v, 1);
    let primary = db.decls.create_record(
        reserved.is_same,
        TagKind::Struct,
        std_ctx,
        true,
        &mut db.types,
    );
    let is_same =
        db.decls
            .create_class_template(reserved.is_same, std_ctx, vec![t, v], primary);
    db.decls
        .materialize_injected_specialization(is_same, &mut db.types, &mut db.exprs);
    db.decls.set_template_lexical_context(is_same, std_ctx);
    db.decls.set_record_lexical_context(primary, std_ctx);
    define_with_base(db, primary, false_ty);
    db.decls.add_decl(std_ctx, DeclRef::Record(primary));

    let mut specializations = vec![add_is_same_specialization(
        db,
        is_same,
        std_ctx,
        true_ty,
        |_, t| t,
    )];
    if extensions {
        specializations.push(add_is_same_specialization(
            db,
            is_same,
            std_ctx,
            true_ty,
            |types, t| types.const_qualified(t),
        ));
        specializations.push(add_is_same_specialization(
            db,
            is_same,
            std_ctx,
            true_ty,
            |types, t| types.lvalue_reference(t),
        ));
    }

    db.decls.set_template_implicit(is_same, true);
    db.decls.add_decl(std_ctx, DeclRef::Template(is_same));
    db.decls.set_namespace_implicit(std_namespace, true);
    db.decls
        .add_decl(DeclContext::TranslationUnit, DeclRef::Namespace(std_namespace));

    tracing::debug!(
        specializations = specializations.len(),
        "built type equality support"
    );
    TypeTraitDecls {
        std_namespace,
        true_type,
        false_type,
        is_same,
        specializations,
    }
}

/// Does `is_same<a, b>` derive from `true_type`?
pub fn is_same(db: &mut CompilationDb, traits: &TypeTraitDecls, a: TypeId, b: TypeId) -> bool {
    let record = select_specialization(
        db,
        traits.is_same,
        &[TemplateArg::Type(a), TemplateArg::Type(b)],
    );
    trait_value(db, record).unwrap_or(false)
}

/// `value` of the marker type a trait record derives from.
///
/// None if the record has no base, or the base carries no literal `value`.
pub fn trait_value(db: &CompilationDb, record: RecordId) -> Option<bool> {
    let base = db.decls.record(record).bases.first()?;
    let SemaType::Record(marker) = db.types.get(db.types.desugar(base.ty)) else {
        return None;
    };
    db.decls
        .record(*marker)
        .static_vars
        .iter()
        .map(|&var| db.decls.static_var(var))
        .find(|var| var.name == db.reserved.value)
        .and_then(|var| var.init)
        .and_then(|init| db.exprs.literal_value(init))
        .map(|value| value != 0)
}

/// `struct name { static constexpr const bool value = <value>; }` in `std`
fn build_static_bool_record(
    db: &mut CompilationDb,
    std_ctx: DeclContext,
    name: Symbol,
    value: bool,
) -> RecordId {
    let record = db
        .decls
        .create_record(name, TagKind::Struct, std_ctx, true, &mut db.types);
    db.record_type(record);
    db.decls.set_record_lexical_context(record, std_ctx);
    db.decls.start_definition(record);

    let ty = db.types.const_qualified(TypeId::BOOL);
    let literal = db.exprs.integer_literal(u64::from(value), TypeId::INT);
    let init = db.exprs.integral_to_boolean(literal);
    let var = db.decls.create_static_var(
        record,
        db.reserved.value,
        ty,
        Some(init),
        true,
        AccessSpecifier::Public,
    );
    db.decls
        .add_decl(DeclContext::Record(record), DeclRef::StaticVar(var));

    db.decls.complete_definition(record);
    db.decls.set_record_implicit(record, true);
    db.decls.add_decl(std_ctx, DeclRef::Record(record));
    record
}

fn declare_type_param(
    db: &mut CompilationDb,
    context: DeclContext,
    name: Symbol,
    index: u32,
) -> TemplateParamId {
    db.decls.create_template_param(
        name,
        FIRST_TEMPLATE_DEPTH,
        index,
        TemplateParamKind::Type { default: None },
        context,
    )
}

/// Define `record` with a single public base and mark it implicit
fn define_with_base(db: &mut CompilationDb, record: RecordId, base: TypeId) {
    db.decls.start_definition(record);
    db.decls.set_bases(
        record,
        vec![BaseSpecifier {
            ty: base,
            access: AccessSpecifier::Public,
            is_virtual: false,
        }],
    );
    db.decls.complete_definition(record);
    db.decls.set_record_implicit(record, true);
}

/// `template<typename T> struct is_same<T, second(T)> : true_type {}`
fn add_is_same_specialization(
    db: &mut CompilationDb,
    is_same: TemplateId,
    std_ctx: DeclContext,
    true_ty: TypeId,
    second: impl FnOnce(&mut TypeArena, TypeId) -> TypeId,
) -> RecordId {
    let param_t = db.reserved.param_t;
    let t = declare_type_param(db, std_ctx, param_t, 0);
    let t_ty = db.decls.template_param_type(t, &mut db.types);
    let second_ty = second(&mut db.types, t_ty);
    let args: TemplateArgVec = smallvec![
        db.types.canonical_arg(TemplateArg::Type(t_ty), &db.exprs),
        db.types.canonical_arg(TemplateArg::Type(second_ty), &db.exprs),
    ];

    let record = db
        .decls
        .create_specialization_record(is_same, vec![t], args, std_ctx, &mut db.types);
    db.record_type(record);
    db.decls.set_record_lexical_context(record, std_ctx);
    define_with_base(db, record, true_ty);
    db.decls.add_explicit_specialization(is_same, record);
    db.decls.add_decl(std_ctx, DeclRef::Record(record));
    tracing::trace!(record = record.index(), "added is_same specialization");
    record
}
