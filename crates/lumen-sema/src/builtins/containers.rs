// builtins/containers.rs
//
// Generic container synthesizers: vector, matrix, generic handle templates
// and non-generic handle records.

use lumen_identity::RecordId;
use smallvec::smallvec;

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{DeclContext, DeclName, DeclRef, OverloadedOperator, TagKind};
use crate::intrinsics::IntrinsicAttr;
use crate::type_arena::{TemplateArg, TypeId};

use super::handle_field::add_handle_field;
use super::record_builder::{GenericContainerDecl, TemplateRecordBuilder};

/// Default value of the `element_count`, `row_count` and `col_count` parameters
pub const DEFAULT_DIMENSION: u64 = 4;

/// Default of the `count` parameter; zero means sized at runtime
pub const DEFAULT_COUNT: u64 = 0;

/// Name prefixes whose `count` parameter does not wrap the handle in an
/// array. Multisample textures accept a zero count, which would otherwise
/// form a zero-length array.
pub const ARRAY_EXEMPT_PREFIXES: &[&str] = &["Texture"];

/// Is the handle of a two-parameter generic type named `name` left unwrapped?
pub fn is_array_exempt(name: &str) -> bool {
    ARRAY_EXEMPT_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

const SUBSCRIPT: DeclName = DeclName::Operator(OverloadedOperator::Subscript);

/// `template<typename element = float, int element_count = 4> class vector`
///
/// The handle is an opaque integer: vectors lower to a single intrinsic
/// value. Both `operator[]` variants carry the vector-subscript intrinsic.
pub fn build_vector_template(db: &mut CompilationDb) -> GenericContainerDecl {
    let reserved = db.reserved.clone();
    let mut builder = TemplateRecordBuilder::new(
        db,
        DeclContext::TranslationUnit,
        reserved.vector,
        TagKind::Class,
    )
    .type_param(reserved.element, Some(TypeId::FLOAT))
    .non_type_param(reserved.element_count, TypeId::INT, Some(DEFAULT_DIMENSION))
    .create_shell()
    .materialize()
    .start_definition();

    builder.add_handle_field(TypeId::OBJECT_HANDLE);

    let element = builder.param_type(0);
    let types = &mut builder.db().types;
    let const_element = types.const_qualified(element);
    let const_ref = types.lvalue_reference(const_element);
    let element_ref = types.lvalue_reference(element);

    for (result, is_const) in [(const_ref, true), (element_ref, false)] {
        let method = builder.add_member_operator(
            result,
            &[TypeId::INDEX],
            &[reserved.index],
            SUBSCRIPT,
            is_const,
        );
        builder.add_intrinsic(method, IntrinsicAttr::vector_subscript());
    }

    let decl = builder.complete();
    tracing::debug!(template = decl.template.index(), "built vector template");
    decl
}

/// `template<typename element = float, int row_count = 4, int col_count = 4> class matrix`
///
/// The handle is `row_count` rows of `col_count`-wide vectors. `operator[]`
/// returns a reference to the row type `vector<element, col_count>`.
pub fn build_matrix_template(
    db: &mut CompilationDb,
    vector: &GenericContainerDecl,
) -> GenericContainerDecl {
    assert!(
        db.decls.record(vector.record).is_complete(),
        "vector template must be built before the matrix template"
    );
    let reserved = db.reserved.clone();
    let mut builder = TemplateRecordBuilder::new(
        db,
        DeclContext::TranslationUnit,
        reserved.matrix,
        TagKind::Class,
    )
    .type_param(reserved.element, Some(TypeId::FLOAT))
    .non_type_param(reserved.row_count, TypeId::INT, Some(DEFAULT_DIMENSION))
    .non_type_param(reserved.col_count, TypeId::INT, Some(DEFAULT_DIMENSION))
    .create_shell()
    .materialize()
    .start_definition();

    let element = builder.param_type(0);
    let rows = builder.param_ref(1);
    let cols = builder.param_ref(2);
    let types = &mut builder.db().types;
    let row_storage = types.dependent_sized_vector(element, cols);
    let handle = types.dependent_sized_array(row_storage, rows);
    builder.add_handle_field(handle);

    let types = &mut builder.db().types;
    let row = types.specialization(
        vector.template,
        smallvec![TemplateArg::Type(element), TemplateArg::Expr(cols)],
    );
    let row_ref = types.lvalue_reference(row);
    let const_row = types.const_qualified(row);
    let const_row_ref = types.lvalue_reference(const_row);

    for (result, is_const) in [(row_ref, false), (const_row_ref, true)] {
        builder.add_member_operator(
            result,
            &[TypeId::INDEX],
            &[reserved.index],
            SUBSCRIPT,
            is_const,
        );
    }

    let decl = builder.complete();
    tracing::debug!(template = decl.template.index(), "built matrix template");
    decl
}

/// Generic resource type with a handle field.
///
/// `param_count = 1`: `template<typename element> class name`.
/// `param_count = 2`: adds `uint count = 0`, and the handle becomes
/// `element[count]` unless `name` is array-exempt.
pub fn build_generic_handle_type(
    db: &mut CompilationDb,
    name: &str,
    param_count: u8,
    default_element: Option<TypeId>,
) -> GenericContainerDecl {
    assert!(
        param_count != 0,
        "a generic handle type needs template parameters; use build_handle_record"
    );
    assert!(
        param_count <= 2,
        "generic handle types take one or two template parameters"
    );

    let reserved = db.reserved.clone();
    let type_name = db.ident(name);
    let mut builder = TemplateRecordBuilder::new(
        db,
        DeclContext::TranslationUnit,
        type_name,
        TagKind::Class,
    )
    .type_param(reserved.element, default_element);
    if param_count > 1 {
        builder = builder.non_type_param(reserved.count, TypeId::SIZE, Some(DEFAULT_COUNT));
    }
    let mut builder = builder.create_shell().materialize().start_definition();

    let mut handle = builder.param_type(0);
    if param_count > 1 && !is_array_exempt(name) {
        let count = builder.param_ref(1);
        handle = builder.db().types.dependent_sized_array(handle, count);
    }
    builder.add_handle_field(handle);

    let decl = builder.complete();
    tracing::debug!(name, param_count, "built generic handle type");
    decl
}

/// Non-generic free-standing struct holding an opaque handle.
pub fn build_handle_record(db: &mut CompilationDb, name: &str) -> RecordId {
    let type_name = db.ident(name);
    let scope = DeclContext::TranslationUnit;
    let record = db
        .decls
        .create_record(type_name, TagKind::Struct, scope, false, &mut db.types);
    db.decls.set_record_lexical_context(record, scope);
    db.decls.set_free_standing(record);
    db.decls.start_definition(record);
    add_handle_field(db, record, TypeId::OBJECT_HANDLE);
    db.decls.add_decl(scope, DeclRef::Record(record));
    db.decls.complete_definition(record);
    tracing::debug!(name, "built handle record");
    record
}
