// type_display.rs
//
// Source spellings for types, template arguments and constant expressions.

use lumen_identity::ExprId;

use crate::compilation_db::CompilationDb;
use crate::expr::{CastKind, Expr};
use crate::type_arena::{SemaType, TemplateArg, TypeId};

/// Render a type the way it would be written in source,
/// e.g. `vector<float, 3>`, `const element&`, `element[count]`.
pub fn display_type(db: &CompilationDb, ty: TypeId) -> String {
    match db.types.get(ty) {
        SemaType::Invalid => "<invalid>".to_string(),
        SemaType::Void => "void".to_string(),
        SemaType::Scalar(scalar) => scalar.as_str().to_string(),
        SemaType::Record(record) => db.name(db.decls.record(*record).name).to_string(),
        SemaType::TemplateTypeParam { decl: Some(param), .. } => {
            db.name(db.decls.template_param(*param).name).to_string()
        }
        SemaType::TemplateTypeParam {
            depth,
            index,
            decl: None,
        } => format!("type-parameter-{depth}-{index}"),
        SemaType::Specialization { template, args } => {
            let name = db.name(db.decls.template(*template).name);
            let args = args
                .iter()
                .map(|arg| display_template_arg(db, *arg))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{name}<{args}>")
        }
        SemaType::InjectedClassName { specialization, .. } => display_type(db, *specialization),
        SemaType::LValueReference(inner) => format!("{}&", display_type(db, *inner)),
        SemaType::Const(inner) => format!("const {}", display_type(db, *inner)),
        SemaType::ConstantArray { element, size } => {
            format!("{}[{size}]", display_type(db, *element))
        }
        SemaType::DependentSizedArray { element, size } => {
            format!("{}[{}]", display_type(db, *element), display_expr(db, *size))
        }
        SemaType::ConstantVector { element, size } => {
            format!("vector<{}, {size}>", display_type(db, *element))
        }
        SemaType::DependentSizedVector { element, size } => format!(
            "vector<{}, {}>",
            display_type(db, *element),
            display_expr(db, *size)
        ),
        SemaType::Function {
            params,
            ret,
            is_const,
        } => {
            let params = params
                .iter()
                .map(|param| display_type(db, *param))
                .collect::<Vec<_>>()
                .join(", ");
            let qualifier = if *is_const { " const" } else { "" };
            format!("{} ({params}){qualifier}", display_type(db, *ret))
        }
        SemaType::Alias { alias, .. } => db.name(db.decls.alias(*alias).name).to_string(),
    }
}

pub fn display_template_arg(db: &CompilationDb, arg: TemplateArg) -> String {
    match arg {
        TemplateArg::Type(ty) => display_type(db, ty),
        TemplateArg::Expr(expr) => display_expr(db, expr),
        TemplateArg::Integral(value) => value.to_string(),
        TemplateArg::NonTypeParam { depth, index } => format!("value-parameter-{depth}-{index}"),
    }
}

/// Render a constant expression; boolean casts of literals print as
/// `true`/`false`.
pub fn display_expr(db: &CompilationDb, expr: ExprId) -> String {
    match db.exprs.get(expr) {
        Expr::IntegerLiteral { value, .. } => value.to_string(),
        Expr::TemplateParamRef { param, .. } => {
            db.name(db.decls.template_param(*param).name).to_string()
        }
        Expr::ImplicitCast {
            kind: CastKind::IntegralToBoolean,
            operand,
            ..
        } => match db.exprs.literal_value(*operand) {
            Some(0) => "false".to_string(),
            Some(_) => "true".to_string(),
            None => format!("bool({})", display_expr(db, *operand)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{BuiltinOptions, install_builtins};
    use lumen_identity::ScalarType;

    #[test]
    fn scalars_and_qualifiers() {
        let mut db = CompilationDb::new();
        let const_float = db.types.const_qualified(TypeId::FLOAT);
        let const_ref = db.types.lvalue_reference(const_float);
        let array = db.types.constant_array(TypeId::UINT, 8);

        assert_eq!(display_type(&db, TypeId::MIN16FLOAT), "min16float");
        assert_eq!(display_type(&db, const_ref), "const float&");
        assert_eq!(display_type(&db, array), "uint[8]");
        assert_eq!(display_type(&db, TypeId::INVALID), "<invalid>");
    }

    #[test]
    fn builtin_members() {
        let mut db = CompilationDb::new();
        let builtins = install_builtins(&mut db, &BuiltinOptions::default());

        let float3 = builtins.vector_type(&mut db, ScalarType::Float, 3);
        assert_eq!(display_type(&db, float3), "vector<float, 3>");

        let matrix = db.decls.record(builtins.matrix.record);
        let handle = db.decls.field(matrix.fields[0]).ty;
        assert_eq!(
            display_type(&db, handle),
            "vector<element, col_count>[row_count]"
        );
        let signature = db.decls.method(matrix.methods[1]).signature;
        assert_eq!(
            display_type(&db, signature),
            "const vector<element, col_count>& (uint) const"
        );

        let vector_ty = db.decls.record(builtins.vector.record).type_id.unwrap();
        assert_eq!(display_type(&db, vector_ty), "vector<element, element_count>");
    }

    #[test]
    fn canonical_params_lose_names() {
        let mut db = CompilationDb::new();
        let builtins = install_builtins(&mut db, &BuiltinOptions::default());
        let vector_ty = db.decls.record(builtins.vector.record).type_id.unwrap();
        let canonical = db.canonical(vector_ty);
        assert_eq!(
            display_type(&db, canonical),
            "vector<type-parameter-0-0, value-parameter-0-1>"
        );
    }

    #[test]
    fn boolean_casts() {
        let mut db = CompilationDb::new();
        let one = db.exprs.integer_literal(1, TypeId::INT);
        let truthy = db.exprs.integral_to_boolean(one);
        assert_eq!(display_expr(&db, truthy), "true");
        assert_eq!(display_expr(&db, one), "1");
    }
}
