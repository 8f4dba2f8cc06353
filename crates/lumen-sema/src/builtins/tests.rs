// builtins/tests.rs
//
// Structure of the synthesized declarations and trait evaluation.

use lumen_identity::{ScalarType, TemplateParamId};

use crate::builtins::*;
use crate::compilation_db::CompilationDb;
use crate::decl_defs::*;
use crate::intrinsics::{builtin_operation, intrinsic_lowering, is_builtin_operation};
use crate::type_arena::{SemaType, TemplateArg, TypeId};

fn installed() -> (CompilationDb, BuiltinDecls) {
    let mut db = CompilationDb::new();
    let builtins = install_builtins(&mut db, &BuiltinOptions::default().with_verify_lookups(true));
    (db, builtins)
}

fn handle_type(db: &CompilationDb, record: lumen_identity::RecordId) -> TypeId {
    let field = lookup_handle_field(db, record).expect("handle field");
    db.decls.field(field).ty
}

fn param_kind(db: &CompilationDb, param: TemplateParamId) -> TemplateParamKind {
    db.decls.template_param(param).kind
}

#[test]
fn vector_template_shape() {
    let (db, builtins) = installed();
    let template = db.decls.template(builtins.vector.template);
    assert_eq!(db.name(template.name), "vector");
    assert_eq!(template.params.len(), 2);
    assert_eq!(
        param_kind(&db, template.params[0]),
        TemplateParamKind::Type {
            default: Some(TypeId::FLOAT)
        }
    );
    let TemplateParamKind::NonType { ty, default } = param_kind(&db, template.params[1]) else {
        panic!("element_count must be a non-type parameter");
    };
    assert_eq!(ty, TypeId::INT);
    assert_eq!(default.and_then(|d| db.exprs.literal_value(d)), Some(4));

    let record = db.decls.record(builtins.vector.record);
    assert!(record.is_complete());
    assert!(record.is_implicit);
    assert_eq!(record.tag, TagKind::Class);
    assert_eq!(record.fields.len(), 1);
    assert_eq!(record.methods.len(), 2);

    let field = db.decls.field(record.fields[0]);
    assert_eq!(db.name(field.name), "h");
    assert_eq!(field.ty, TypeId::OBJECT_HANDLE);
    assert_eq!(field.access, AccessSpecifier::Private);
    assert!(field.is_implicit);
}

#[test]
fn vector_subscripts_const_then_mutable() {
    let (db, builtins) = installed();
    let record = db.decls.record(builtins.vector.record);

    let constness: Vec<bool> = record
        .methods
        .iter()
        .map(|&m| db.types.function_parts(db.decls.method(m).signature).unwrap().2)
        .collect();
    assert_eq!(constness, vec![true, false]);

    for &method in &record.methods {
        let def = db.decls.method(method);
        assert_eq!(def.name, DeclName::Operator(OverloadedOperator::Subscript));
        assert_eq!(def.access, AccessSpecifier::Public);
        assert_eq!(def.params.len(), 1);
        assert_eq!(def.prototype, vec![Some(def.params[0])]);
        let param = db.decls.param(def.params[0]);
        assert_eq!(db.name(param.name), "index");
        assert_eq!(param.ty, TypeId::UINT);

        assert!(is_builtin_operation(&db.decls, method));
        assert_eq!(builtin_operation(&db.decls, method), Some((7, "subscript")));
        assert_eq!(intrinsic_lowering(&db.decls, method), Some(""));
    }

    let (_, const_result, _) = db
        .types
        .function_parts(db.decls.method(record.methods[0]).signature)
        .unwrap();
    let SemaType::LValueReference(inner) = db.types.get(const_result) else {
        panic!("const subscript must return a reference");
    };
    let SemaType::Const(element) = db.types.get(*inner) else {
        panic!("const subscript must return a const reference");
    };
    assert!(matches!(
        db.types.get(*element),
        SemaType::TemplateTypeParam { depth: 0, index: 0, .. }
    ));
}

#[test]
fn matrix_template_shape() {
    let (db, builtins) = installed();
    let template = db.decls.template(builtins.matrix.template);
    assert_eq!(template.params.len(), 3);
    assert!(db.decls.template_param(template.params[0]).is_type());
    for &param in &template.params[1..] {
        assert!(matches!(
            param_kind(&db, param),
            TemplateParamKind::NonType { ty: TypeId::INT, .. }
        ));
    }

    let handle = handle_type(&db, builtins.matrix.record);
    let SemaType::DependentSizedArray { element, size } = db.types.get(handle) else {
        panic!("matrix handle must be an array of rows");
    };
    assert_eq!(db.exprs.param_position(*size), Some((0, 1)));
    let SemaType::DependentSizedVector { size: cols, .. } = db.types.get(*element) else {
        panic!("matrix row must be a vector");
    };
    assert_eq!(db.exprs.param_position(*cols), Some((0, 2)));

    let record = db.decls.record(builtins.matrix.record);
    assert_eq!(record.methods.len(), 2);
    for &method in &record.methods {
        assert!(!is_builtin_operation(&db.decls, method));
        let (_, result, _) = db
            .types
            .function_parts(db.decls.method(method).signature)
            .unwrap();
        let row = db.types.strip_const(db.types.strip_reference(result));
        let (row_template, args) = db.types.specialization_parts(row).unwrap();
        assert_eq!(row_template, builtins.vector.template);
        assert_eq!(args.len(), 2);
    }
}

#[test]
fn generic_handle_wrapping() {
    let (mut db, builtins) = installed();

    let buffer = db.ident("Buffer");
    let buffer = builtins.generic_handle(buffer).unwrap();
    assert!(matches!(
        db.types.get(handle_type(&db, buffer.record)),
        SemaType::TemplateTypeParam { .. }
    ));

    let patch = db.ident("InputPatch");
    let patch = builtins.generic_handle(patch).unwrap();
    assert_eq!(db.decls.template(patch.template).params.len(), 2);
    assert!(matches!(
        db.types.get(handle_type(&db, patch.record)),
        SemaType::DependentSizedArray { .. }
    ));

    let ms = db.ident("Texture2DMS");
    let ms = builtins.generic_handle(ms).unwrap();
    assert_eq!(db.decls.template(ms.template).params.len(), 2);
    assert!(matches!(
        db.types.get(handle_type(&db, ms.record)),
        SemaType::TemplateTypeParam { .. }
    ));
}

#[test]
fn generic_handle_defaults() {
    let (mut db, builtins) = installed();
    let float4 = builtins.vector_type(&mut db, ScalarType::Float, 4);

    let texture = db.ident("Texture2D");
    let texture = builtins.generic_handle(texture).unwrap();
    let element = db.decls.template(texture.template).params[0];
    assert_eq!(
        param_kind(&db, element),
        TemplateParamKind::Type {
            default: Some(float4)
        }
    );

    let structured = db.ident("StructuredBuffer");
    let structured = builtins.generic_handle(structured).unwrap();
    let element = db.decls.template(structured.template).params[0];
    assert!(!db.decls.template_param(element).has_default());

    let patch = db.ident("OutputPatch");
    let patch = builtins.generic_handle(patch).unwrap();
    let count = db.decls.template(patch.template).params[1];
    let TemplateParamKind::NonType { ty, default } = param_kind(&db, count) else {
        panic!("count must be a non-type parameter");
    };
    assert_eq!(ty, TypeId::UINT);
    assert_eq!(default.and_then(|d| db.exprs.literal_value(d)), Some(0));
}

#[test]
fn array_exemption_is_by_name() {
    let mut db = CompilationDb::new();
    let exempt = build_generic_handle_type(&mut db, "TextureFoo", 2, None);
    let wrapped = build_generic_handle_type(&mut db, "FooPatch", 2, None);
    let single = build_generic_handle_type(&mut db, "FooBuffer", 1, None);

    assert!(matches!(
        db.types.get(handle_type(&db, exempt.record)),
        SemaType::TemplateTypeParam { .. }
    ));
    assert!(matches!(
        db.types.get(handle_type(&db, wrapped.record)),
        SemaType::DependentSizedArray { .. }
    ));
    assert!(matches!(
        db.types.get(handle_type(&db, single.record)),
        SemaType::TemplateTypeParam { .. }
    ));

    for spec in GENERIC_HANDLE_TYPES {
        assert_eq!(
            is_array_exempt(spec.name),
            spec.name.starts_with("Texture"),
            "{}",
            spec.name
        );
    }
    assert!(!is_array_exempt("RWTexture2D"));
}

#[test]
#[should_panic(expected = "one or two template parameters")]
fn generic_handle_rejects_three_params() {
    let mut db = CompilationDb::new();
    build_generic_handle_type(&mut db, "Wide", 3, None);
}

#[test]
fn handle_records_are_free_standing() {
    let (mut db, builtins) = installed();
    assert_eq!(builtins.handle_records.len(), HANDLE_RECORDS.len());

    let sampler = db.ident("SamplerState");
    let record = db
        .decls
        .lookup_record(DeclContext::TranslationUnit, sampler)
        .unwrap();
    assert_eq!(record, builtins.handle_records[0]);
    let def = db.decls.record(record);
    assert!(def.is_free_standing);
    assert!(def.is_complete());
    assert_eq!(def.tag, TagKind::Struct);
    assert_eq!(handle_type(&db, record), TypeId::OBJECT_HANDLE);
}

#[test]
fn containers_found_by_template_name() {
    let (mut db, builtins) = installed();
    let vector = db.ident("vector");
    assert_eq!(
        db.decls.lookup(DeclContext::TranslationUnit, vector),
        &[DeclRef::Template(builtins.vector.template)]
    );
    let texture = db.ident("Texture2DMSArray");
    assert!(
        db.decls
            .lookup_template(DeclContext::TranslationUnit, texture)
            .is_some()
    );
    assert_eq!(
        builtins.generic_handles().count(),
        GENERIC_HANDLE_TYPES.len()
    );
    for (_, decl) in builtins.generic_handles() {
        verify_handle_lookup(&db, decl.record);
        let template = db.decls.template(decl.template);
        assert!(template.is_implicit);
        assert_eq!(template.lexical_context, Some(DeclContext::TranslationUnit));
    }
}

#[test]
fn is_same_exact_and_distinct() {
    let (mut db, builtins) = installed();
    let traits = builtins.traits.clone();
    assert!(is_same(&mut db, &traits, TypeId::FLOAT, TypeId::FLOAT));
    assert!(!is_same(&mut db, &traits, TypeId::FLOAT, TypeId::INT));

    let float3 = builtins.vector_type(&mut db, ScalarType::Float, 3);
    let float4 = builtins.vector_type(&mut db, ScalarType::Float, 4);
    assert!(is_same(&mut db, &traits, float3, float3));
    assert!(!is_same(&mut db, &traits, float3, float4));
}

#[test]
fn is_same_relaxes_const_and_reference() {
    let (mut db, builtins) = installed();
    let traits = builtins.traits.clone();
    let const_float = db.types.const_qualified(TypeId::FLOAT);
    let float_ref = db.types.lvalue_reference(TypeId::FLOAT);

    assert!(is_same(&mut db, &traits, TypeId::FLOAT, const_float));
    assert!(is_same(&mut db, &traits, TypeId::FLOAT, float_ref));
    assert!(!is_same(&mut db, &traits, TypeId::INT, const_float));
    assert_eq!(traits.specializations.len(), 3);
}

#[test]
fn is_same_relaxations_are_right_hand_only() {
    let (mut db, builtins) = installed();
    let traits = builtins.traits.clone();
    let const_float = db.types.const_qualified(TypeId::FLOAT);
    let float_ref = db.types.lvalue_reference(TypeId::FLOAT);
    let const_float_ref = db.types.lvalue_reference(const_float);

    assert!(!is_same(&mut db, &traits, const_float, TypeId::FLOAT));
    assert!(!is_same(&mut db, &traits, float_ref, TypeId::FLOAT));
    assert!(!is_same(&mut db, &traits, TypeId::FLOAT, const_float_ref));

    let float3 = builtins.vector_type(&mut db, ScalarType::Float, 3);
    let const_float3 = db.types.const_qualified(float3);
    assert!(is_same(&mut db, &traits, float3, const_float3));
    assert!(!is_same(&mut db, &traits, const_float3, float3));
}

#[test]
fn is_same_without_extensions() {
    let mut db = CompilationDb::new();
    let options = BuiltinOptions::default().with_is_same_extensions(false);
    let builtins = install_builtins(&mut db, &options);
    let traits = builtins.traits.clone();
    let const_float = db.types.const_qualified(TypeId::FLOAT);

    assert_eq!(traits.specializations.len(), 1);
    assert!(is_same(&mut db, &traits, TypeId::FLOAT, TypeId::FLOAT));
    assert!(!is_same(&mut db, &traits, TypeId::FLOAT, const_float));
}

#[test]
fn is_same_sees_through_aliases() {
    let (mut db, mut builtins) = installed();
    let alias = builtins.resolve_shorthand(&mut db, "float3").unwrap();
    let alias_ty = db.decls.alias(alias).type_id;
    let float3 = builtins.vector_type(&mut db, ScalarType::Float, 3);
    let traits = builtins.traits.clone();
    assert!(is_same(&mut db, &traits, alias_ty, float3));
}

#[test]
fn marker_types_live_in_std() {
    let (mut db, builtins) = installed();
    let traits = &builtins.traits;
    let std = db.ident("std");
    assert_eq!(
        db.decls.lookup_namespace(DeclContext::TranslationUnit, std),
        Some(traits.std_namespace)
    );
    assert!(db.decls.namespace(traits.std_namespace).is_implicit);

    let std_ctx = DeclContext::Namespace(traits.std_namespace);
    let is_same_name = db.ident("is_same");
    assert_eq!(
        db.decls.lookup_template(std_ctx, is_same_name),
        Some(traits.is_same)
    );
    let true_name = db.ident("true_type");
    assert_eq!(
        db.decls.lookup_record(std_ctx, true_name),
        Some(traits.true_type)
    );

    let value = db.decls.record(traits.true_type).static_vars[0];
    let value = db.decls.static_var(value);
    assert!(value.is_constexpr);
    assert!(db.types.get(value.ty).is_const());

    let primary = traits.primary(&db);
    assert_eq!(trait_value(&db, primary), Some(false));
    for &specialization in &traits.specializations {
        assert_eq!(trait_value(&db, specialization), Some(true));
    }
    assert_eq!(trait_value(&db, traits.true_type), None);
}

#[test]
fn shorthand_aliases_are_cached() {
    let (mut db, mut builtins) = installed();
    let aliases_before = db.decls.alias_count();

    let first = builtins.resolve_shorthand(&mut db, "float3").unwrap();
    let second = builtins.resolve_shorthand(&mut db, "float3").unwrap();
    assert_eq!(first, second);
    assert_eq!(db.decls.alias_count(), aliases_before + 1);
    assert_eq!(builtins.shorthand_count(), 1);

    let def = db.decls.alias(first);
    assert_eq!(db.name(def.name), "float3");
    assert!(def.is_implicit);
    assert_eq!(def.context, DeclContext::TranslationUnit);
    let target = def.target;
    let float3 = builtins.vector_type(&mut db, ScalarType::Float, 3);
    assert_eq!(target, float3);

    let name = db.ident("float3");
    assert_eq!(
        db.decls.lookup_alias(DeclContext::TranslationUnit, name),
        Some(first)
    );
}

#[test]
fn matrix_shorthand_resolves() {
    let (mut db, mut builtins) = installed();
    let alias = builtins.resolve_shorthand(&mut db, "int64_t2x4").unwrap();
    let target = db.decls.alias(alias).target;
    let (template, args) = db.types.specialization_parts(target).unwrap();
    assert_eq!(template, builtins.matrix.template);
    assert_eq!(
        args.as_slice(),
        &[
            TemplateArg::Type(TypeId::INT64),
            TemplateArg::Integral(2),
            TemplateArg::Integral(4),
        ]
    );
}

#[test]
fn non_shorthand_names_are_left_alone() {
    let (mut db, mut builtins) = installed();
    let aliases_before = db.decls.alias_count();
    for name in ["float5", "float3x5", "vector", "Texture2D", "x", ""] {
        assert_eq!(builtins.resolve_shorthand(&mut db, name), None, "{name}");
    }
    assert_eq!(db.decls.alias_count(), aliases_before);
}

#[test]
fn explicit_shorthand_alias_names() {
    let mut db = CompilationDb::new();
    let vector = build_vector_template(&mut db);
    let concrete = db.types.specialization(
        vector.template,
        smallvec::smallvec![TemplateArg::Type(TypeId::FLOAT), TemplateArg::Integral(3)],
    );
    let alias = build_vector_shorthand_alias(&mut db, ScalarType::Float, 3, concrete);
    assert_eq!(db.name(db.decls.alias(alias).name), "float3");
    assert!(db.same_type(db.decls.alias(alias).type_id, concrete));

    assert_eq!(matrix_shorthand_name(ScalarType::Min16Uint, 2, 3), "min16uint2x3");
    assert_eq!(vector_shorthand_name(ScalarType::Bool, 1), "bool1");
}

#[test]
fn function_template_over_member_operator() {
    let mut db = CompilationDb::new();
    let name = db.ident("Sampled");
    let reserved = db.reserved.clone();
    let mut builder = TemplateRecordBuilder::new(
        &mut db,
        DeclContext::TranslationUnit,
        name,
        TagKind::Class,
    )
    .type_param(reserved.element, None)
    .create_shell()
    .materialize()
    .start_definition();

    let element = builder.param_type(0);
    let method = builder.add_member_operator(
        element,
        &[TypeId::INDEX],
        &[reserved.index],
        DeclName::Operator(OverloadedOperator::Subscript),
        true,
    );
    let record = builder.record();
    let param = builder.param(0);
    let template = build_function_template_from_method(builder.db(), record, method, vec![param]);
    let decl = builder.complete();

    let def = db.decls.function_template(template);
    assert_eq!(def.name, DeclName::Operator(OverloadedOperator::Subscript));
    assert_eq!(def.lexical_context, DeclContext::Record(decl.record));
    assert_eq!(def.access, AccessSpecifier::Public);
    assert_eq!(db.decls.method(method).described_template, Some(template));
    assert_eq!(
        db.decls.record(decl.record).function_templates,
        vec![template]
    );
}

#[test]
#[should_panic(expected = "at least one template parameter")]
fn function_template_needs_params() {
    let mut db = CompilationDb::new();
    let name = db.ident("Sampled");
    let reserved = db.reserved.clone();
    let mut builder = TemplateRecordBuilder::new(
        &mut db,
        DeclContext::TranslationUnit,
        name,
        TagKind::Class,
    )
    .type_param(reserved.element, None)
    .create_shell()
    .materialize()
    .start_definition();
    let element = builder.param_type(0);
    let method = builder.add_member_operator(
        element,
        &[TypeId::INDEX],
        &[reserved.index],
        DeclName::Operator(OverloadedOperator::Subscript),
        false,
    );
    let record = builder.record();
    build_function_template_from_method(builder.db(), record, method, Vec::new());
}

#[test]
#[should_panic(expected = "must pair up")]
fn member_operator_rejects_unpaired_names() {
    let mut db = CompilationDb::new();
    let name = db.ident("Sampled");
    let reserved = db.reserved.clone();
    let mut builder = TemplateRecordBuilder::new(
        &mut db,
        DeclContext::TranslationUnit,
        name,
        TagKind::Class,
    )
    .type_param(reserved.element, None)
    .create_shell()
    .materialize()
    .start_definition();
    builder.add_member_operator(
        TypeId::FLOAT,
        &[TypeId::INDEX, TypeId::INDEX],
        &[reserved.index],
        DeclName::Operator(OverloadedOperator::Subscript),
        false,
    );
}
