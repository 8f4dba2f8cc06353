// decl_registry/tests.rs
//
// Unit tests for declaration creation, lifecycle checks and lookup.

use smallvec::smallvec;

use crate::compilation_db::CompilationDb;
use crate::decl_defs::*;
use crate::decl_registry::{FieldDefBuilder, MethodDefBuilder};
use crate::type_arena::{SemaType, TypeId};

fn struct_being_defined(db: &mut CompilationDb, name: &str) -> lumen_identity::RecordId {
    let name = db.ident(name);
    let record = db.decls.create_record(
        name,
        TagKind::Struct,
        DeclContext::TranslationUnit,
        false,
        &mut db.types,
    );
    db.decls.start_definition(record);
    record
}

#[test]
fn immediate_record_type() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "SamplerState");

    let ty = db.decls.record(record).type_id.unwrap();
    assert_eq!(db.types.get(ty), &SemaType::Record(record));
    assert_eq!(db.record_type(record), ty);
}

#[test]
fn delayed_record_type_faults_in() {
    let mut db = CompilationDb::new();
    let name = db.ident("true_type");
    let record = db.decls.create_record(
        name,
        TagKind::Struct,
        DeclContext::TranslationUnit,
        true,
        &mut db.types,
    );
    assert!(db.decls.record(record).type_id.is_none());

    let ty = db.record_type(record);
    assert_eq!(db.decls.record(record).type_id, Some(ty));
}

#[test]
fn lifecycle_transitions() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "R");
    assert_eq!(db.decls.record(record).state, DefinitionState::BeingDefined);
    db.decls.complete_definition(record);
    assert!(db.decls.record(record).is_complete());
}

#[test]
#[should_panic(expected = "already started")]
fn start_definition_twice_panics() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "R");
    db.decls.start_definition(record);
}

#[test]
#[should_panic(expected = "was not started")]
fn complete_without_start_panics() {
    let mut db = CompilationDb::new();
    let name = db.ident("R");
    let record = db.decls.create_record(
        name,
        TagKind::Struct,
        DeclContext::TranslationUnit,
        false,
        &mut db.types,
    );
    db.decls.complete_definition(record);
}

#[test]
#[should_panic(expected = "while it is being defined")]
fn add_member_to_complete_record_panics() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "R");
    db.decls.complete_definition(record);

    let h = db.reserved.handle;
    let field = FieldDefBuilder::new(record, h, TypeId::INT).register(&mut db.decls);
    db.decls
        .add_decl(DeclContext::Record(record), DeclRef::Field(field));
}

#[test]
fn field_defaults_follow_tag() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let h = db.reserved.handle;
    let field = FieldDefBuilder::new(record, h, TypeId::INT).register(&mut db.decls);

    let def = db.decls.field(field);
    assert_eq!(def.access, AccessSpecifier::Public);
    assert!(!def.is_implicit);
    assert!(!def.is_mutable);
    assert!(def.init.is_none());
}

#[test]
fn lookup_finds_members_by_name() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let h = db.reserved.handle;
    let field = FieldDefBuilder::new(record, h, TypeId::INT)
        .access(AccessSpecifier::Private)
        .implicit(true)
        .register(&mut db.decls);
    db.decls
        .add_decl(DeclContext::Record(record), DeclRef::Field(field));

    assert_eq!(
        db.decls.lookup(DeclContext::Record(record), h),
        &[DeclRef::Field(field)]
    );
    let index = db.reserved.index;
    assert!(db.decls.lookup(DeclContext::Record(record), index).is_empty());
    assert_eq!(db.decls.members(DeclContext::Record(record)).len(), 1);
}

#[test]
fn operator_overloads_share_a_name() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let sig_a = db.types.function(smallvec![TypeId::UINT], TypeId::FLOAT, true);
    let sig_b = db.types.function(smallvec![TypeId::UINT], TypeId::FLOAT, false);
    let name = DeclName::Operator(OverloadedOperator::Subscript);

    let a = MethodDefBuilder::new(record, name, sig_a).register(&mut db.decls, &db.types);
    let b = MethodDefBuilder::new(record, name, sig_b).register(&mut db.decls, &db.types);
    db.decls.add_decl(DeclContext::Record(record), DeclRef::Method(a));
    db.decls.add_decl(DeclContext::Record(record), DeclRef::Method(b));

    assert_eq!(
        db.decls.lookup(DeclContext::Record(record), name),
        &[DeclRef::Method(a), DeclRef::Method(b)]
    );
}

#[test]
#[should_panic(expected = "twice")]
fn duplicate_add_decl_panics() {
    let mut db = CompilationDb::new();
    let name = db.ident("float3");
    let alias = db
        .decls
        .create_alias(name, DeclContext::TranslationUnit, TypeId::FLOAT, &mut db.types);
    db.decls
        .add_decl(DeclContext::TranslationUnit, DeclRef::Alias(alias));
    db.decls
        .add_decl(DeclContext::TranslationUnit, DeclRef::Alias(alias));
}

#[test]
fn prototype_slots_fill_once() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let sig = db.types.function(smallvec![TypeId::UINT], TypeId::FLOAT, false);
    let method = MethodDefBuilder::new(record, DeclName::Operator(OverloadedOperator::Subscript), sig)
        .register(&mut db.decls, &db.types);
    assert_eq!(db.decls.method(method).prototype, vec![None]);

    let index = db.reserved.index;
    let param = db.decls.create_param(method, index, TypeId::UINT, 0, 0);
    db.decls.associate_prototype_params(method, &[param]);
    assert_eq!(db.decls.method(method).prototype, vec![Some(param)]);
}

#[test]
#[should_panic(expected = "already filled")]
fn prototype_slot_refill_panics() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let sig = db.types.function(smallvec![TypeId::UINT], TypeId::FLOAT, false);
    let method = MethodDefBuilder::new(record, DeclName::Operator(OverloadedOperator::Subscript), sig)
        .register(&mut db.decls, &db.types);
    let index = db.reserved.index;
    let param = db.decls.create_param(method, index, TypeId::UINT, 0, 0);
    db.decls.associate_prototype_params(method, &[param]);
    db.decls.associate_prototype_params(method, &[param]);
}

#[test]
#[should_panic(expected = "must match the function prototype")]
fn prototype_count_mismatch_panics() {
    let mut db = CompilationDb::new();
    let record = struct_being_defined(&mut db, "S");
    let sig = db.types.function(smallvec![TypeId::UINT], TypeId::FLOAT, false);
    let method = MethodDefBuilder::new(record, DeclName::Operator(OverloadedOperator::Subscript), sig)
        .register(&mut db.decls, &db.types);
    db.decls.associate_prototype_params(method, &[]);
}

#[test]
fn templated_record_hidden_from_name_lookup() {
    let mut db = CompilationDb::new();
    let name = db.ident("Widget");
    let element = db.reserved.element;
    let param = db.decls.create_template_param(
        element,
        0,
        0,
        TemplateParamKind::Type { default: None },
        DeclContext::TranslationUnit,
    );
    let record = db.decls.create_record(
        name,
        TagKind::Class,
        DeclContext::TranslationUnit,
        true,
        &mut db.types,
    );
    let template =
        db.decls
            .create_class_template(name, DeclContext::TranslationUnit, vec![param], record);
    db.decls
        .add_decl(DeclContext::TranslationUnit, DeclRef::Template(template));
    db.decls
        .add_decl(DeclContext::TranslationUnit, DeclRef::Record(record));

    assert_eq!(
        db.decls.lookup(DeclContext::TranslationUnit, name),
        &[DeclRef::Template(template)]
    );
    assert_eq!(db.decls.members(DeclContext::TranslationUnit).len(), 2);
    assert_eq!(db.decls.record(record).described_template, Some(template));
}

#[test]
#[should_panic(expected = "must be materialized")]
fn templated_record_type_needs_materialization() {
    let mut db = CompilationDb::new();
    let name = db.ident("Widget");
    let element = db.reserved.element;
    let param = db.decls.create_template_param(
        element,
        0,
        0,
        TemplateParamKind::Type { default: None },
        DeclContext::TranslationUnit,
    );
    let record = db.decls.create_record(
        name,
        TagKind::Class,
        DeclContext::TranslationUnit,
        true,
        &mut db.types,
    );
    db.decls
        .create_class_template(name, DeclContext::TranslationUnit, vec![param], record);
    db.record_type(record);
}

#[test]
fn materialization_is_idempotent() {
    let mut db = CompilationDb::new();
    let name = db.ident("Widget");
    let element = db.reserved.element;
    let param = db.decls.create_template_param(
        element,
        0,
        0,
        TemplateParamKind::Type { default: None },
        DeclContext::TranslationUnit,
    );
    let record = db.decls.create_record(
        name,
        TagKind::Class,
        DeclContext::TranslationUnit,
        true,
        &mut db.types,
    );
    let template =
        db.decls
            .create_class_template(name, DeclContext::TranslationUnit, vec![param], record);

    let first =
        db.decls
            .materialize_injected_specialization(template, &mut db.types, &mut db.exprs);
    let exprs_after = db.exprs.len();
    let second =
        db.decls
            .materialize_injected_specialization(template, &mut db.types, &mut db.exprs);

    assert_eq!(first, second);
    assert_eq!(db.exprs.len(), exprs_after);
    assert_eq!(db.record_type(record), first);
    assert!(matches!(
        db.types.get(first),
        SemaType::InjectedClassName { record: r, .. } if *r == record
    ));
}
