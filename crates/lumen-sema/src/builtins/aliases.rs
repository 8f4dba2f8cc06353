// builtins/aliases.rs
//
// Shorthand alias declarations (`typedef vector<float, 3> float3`).
// Callers are responsible for creating each spelling only once.

use lumen_identity::{AliasId, ScalarType};

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{DeclContext, DeclRef};
use crate::type_arena::TypeId;

use super::shorthand::MAX_DIMENSION;

pub fn vector_shorthand_name(scalar: ScalarType, count: u32) -> String {
    format!("{}{}", scalar.as_str(), count)
}

pub fn matrix_shorthand_name(scalar: ScalarType, rows: u32, cols: u32) -> String {
    format!("{}{}x{}", scalar.as_str(), rows, cols)
}

/// Create the implicit global alias `<scalar><count>` for `concrete`.
pub fn build_vector_shorthand_alias(
    db: &mut CompilationDb,
    scalar: ScalarType,
    count: u32,
    concrete: TypeId,
) -> AliasId {
    assert!(count <= MAX_DIMENSION, "caller must validate the element count");
    let name = vector_shorthand_name(scalar, count);
    let alias = build_global_alias(db, &name, scalar, concrete);
    tracing::debug!(name, "built vector shorthand alias");
    alias
}

/// Create the implicit global alias `<scalar><rows>x<cols>` for `concrete`.
pub fn build_matrix_shorthand_alias(
    db: &mut CompilationDb,
    scalar: ScalarType,
    rows: u32,
    cols: u32,
    concrete: TypeId,
) -> AliasId {
    assert!(rows <= MAX_DIMENSION, "caller must validate the row count");
    assert!(cols <= MAX_DIMENSION, "caller must validate the column count");
    let name = matrix_shorthand_name(scalar, rows, cols);
    let alias = build_global_alias(db, &name, scalar, concrete);
    tracing::debug!(name, "built matrix shorthand alias");
    alias
}

fn build_global_alias(
    db: &mut CompilationDb,
    name: &str,
    scalar: ScalarType,
    concrete: TypeId,
) -> AliasId {
    assert!(scalar.is_valid(), "shorthand scalar type must be valid");
    assert!(!concrete.is_invalid(), "shorthand target type must be valid");
    let scope = DeclContext::TranslationUnit;
    let name = db.ident(name);
    let alias = db.decls.create_alias(name, scope, concrete, &mut db.types);
    db.decls.set_alias_implicit(alias, true);
    db.decls.add_decl(scope, DeclRef::Alias(alias));
    alias
}
