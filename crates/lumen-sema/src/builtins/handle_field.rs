// builtins/handle_field.rs
//
// The single internal storage member of every built-in record.

use lumen_identity::{FieldId, RecordId};

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{AccessSpecifier, DeclContext, DeclRef};
use crate::decl_registry::FieldDefBuilder;
use crate::type_arena::TypeId;

/// Attach the handle field `h` to a record being defined: private,
/// implicit, non-mutable, no initializer.
pub fn add_handle_field(db: &mut CompilationDb, record: RecordId, ty: TypeId) -> FieldId {
    assert!(!ty.is_invalid(), "handle field type must be valid");
    let field = FieldDefBuilder::new(record, db.reserved.handle, ty)
        .access(AccessSpecifier::Private)
        .implicit(true)
        .mutable(false)
        .register(&mut db.decls);
    db.decls
        .add_decl(DeclContext::Record(record), DeclRef::Field(field));
    tracing::trace!(record = record.index(), "added handle field");
    field
}

/// The handle field of a record, found through member lookup
pub fn lookup_handle_field(db: &CompilationDb, record: RecordId) -> Option<FieldId> {
    db.decls
        .lookup(DeclContext::Record(record), db.reserved.handle)
        .iter()
        .find_map(|decl| match decl {
            DeclRef::Field(field) => Some(*field),
            _ => None,
        })
}

/// Assert that the handle field of a completed record is reachable by lookup
pub fn verify_handle_lookup(db: &CompilationDb, record: RecordId) {
    let name = db.name(db.decls.record(record).name);
    assert!(
        lookup_handle_field(db, record).is_some(),
        "handle of {name} cannot be looked up"
    );
}
