//! Declaration graph to pretty::Doc conversion.
//!
//! Renders a declaration context as pseudo-source. Implicit declarations
//! are marked with a trailing `// implicit`, intrinsic-backed operators
//! with their opcode group and opcode.

use lumen_identity::{RecordId, TemplateParamId};
use pretty::{Arena, DocAllocator, DocBuilder};

use crate::compilation_db::CompilationDb;
use crate::decl_defs::{DeclContext, DeclName, DeclRef, TemplateParamKind};
use crate::type_display::{display_expr, display_template_arg, display_type};

/// Indent width for record and namespace bodies
const INDENT: isize = 4;

/// Line width passed to the renderer
const WIDTH: usize = 100;

type Doc<'a> = DocBuilder<'a, Arena<'a>>;

/// Render every declaration of `context`, separated by blank lines.
pub fn print_decls(db: &CompilationDb, context: DeclContext) -> String {
    let arena = Arena::new();
    let doc = print_members(&arena, db, db.decls.members(context), true);
    render(doc)
}

/// Render a single declaration.
pub fn print_decl(db: &CompilationDb, decl: DeclRef) -> String {
    let arena = Arena::new();
    let doc = print_decl_doc(&arena, db, decl).unwrap_or_else(|| arena.nil());
    render(doc)
}

fn render(doc: Doc<'_>) -> String {
    let mut output = String::new();
    doc.render_fmt(WIDTH, &mut output)
        .expect("render to string cannot fail");
    output
}

fn print_members<'a>(
    arena: &'a Arena<'a>,
    db: &CompilationDb,
    members: &[DeclRef],
    blank_lines: bool,
) -> Doc<'a> {
    let docs: Vec<_> = members
        .iter()
        .filter_map(|decl| print_decl_doc(arena, db, *decl))
        .collect();
    let separator = if blank_lines {
        arena.hardline().append(arena.hardline())
    } else {
        arena.hardline()
    };
    arena.intersperse(docs, separator)
}

/// `{ members }` nested one level, or `{}` when empty
fn print_body<'a>(arena: &'a Arena<'a>, db: &CompilationDb, context: DeclContext) -> Doc<'a> {
    let members = db.decls.members(context);
    if members.is_empty() {
        return arena.text("{}");
    }
    let blank_lines = !matches!(context, DeclContext::Record(_));
    arena
        .text("{")
        .append(
            arena
                .hardline()
                .append(print_members(arena, db, members, blank_lines))
                .nest(INDENT),
        )
        .append(arena.hardline())
        .append(arena.text("}"))
}

fn implicit_marker(is_implicit: bool) -> &'static str {
    if is_implicit { " // implicit" } else { "" }
}

/// Print one declaration. Templated records are printed with their
/// template and yield None on their own.
fn print_decl_doc<'a>(arena: &'a Arena<'a>, db: &CompilationDb, decl: DeclRef) -> Option<Doc<'a>> {
    let decls = &db.decls;
    let doc = match decl {
        DeclRef::Namespace(id) => {
            let def = decls.namespace(id);
            arena
                .text(format!("namespace {} ", db.name(def.name)))
                .append(print_body(arena, db, DeclContext::Namespace(id)))
                .append(arena.text(implicit_marker(def.is_implicit)))
        }
        DeclRef::Record(id) => {
            let def = decls.record(id);
            if def.described_template.is_some() {
                return None;
            }
            match &def.specialization_of {
                Some(info) => print_template_header(arena, db, &info.params)
                    .append(arena.hardline())
                    .append(print_record(arena, db, id)),
                None => print_record(arena, db, id),
            }
        }
        DeclRef::Template(id) => {
            let def = decls.template(id);
            print_template_header(arena, db, &def.params)
                .append(arena.hardline())
                .append(print_record(arena, db, def.record))
        }
        DeclRef::Field(id) => {
            let def = decls.field(id);
            let mutable = if def.is_mutable { "mutable " } else { "" };
            arena.text(format!(
                "{}: {mutable}{} {};{}",
                def.access.keyword(),
                display_type(db, def.ty),
                db.name(def.name),
                implicit_marker(def.is_implicit)
            ))
        }
        DeclRef::Method(id) => {
            let def = decls.method(id);
            let (_, ret, is_const) = db.types.function_parts(def.signature)?;
            let params = def
                .params
                .iter()
                .map(|&param| {
                    let param = decls.param(param);
                    format!("{} {}", display_type(db, param.ty), db.name(param.name))
                })
                .collect::<Vec<_>>()
                .join(", ");
            let qualifier = if is_const { " const" } else { "" };
            let intrinsic = def
                .intrinsic()
                .map(|attr| format!(" // intrinsic {} {}", attr.group, attr.opcode))
                .unwrap_or_default();
            arena.text(format!(
                "{}: {} {}({params}){qualifier};{intrinsic}",
                def.access.keyword(),
                display_type(db, ret),
                decl_name(db, def.name),
            ))
        }
        DeclRef::StaticVar(id) => {
            let def = decls.static_var(id);
            let constexpr = if def.is_constexpr { "constexpr " } else { "" };
            let init = def
                .init
                .map(|init| format!(" = {}", display_expr(db, init)))
                .unwrap_or_default();
            arena.text(format!(
                "{}: static {constexpr}{} {}{init};",
                def.access.keyword(),
                display_type(db, def.ty),
                db.name(def.name),
            ))
        }
        DeclRef::FunctionTemplate(id) => {
            let def = decls.function_template(id);
            arena
                .text(format!("{}: ", def.access.keyword()))
                .append(print_template_header(arena, db, &def.params))
                .append(arena.text(format!(" {};", decl_name(db, def.name))))
        }
        DeclRef::Alias(id) => {
            let def = decls.alias(id);
            arena.text(format!(
                "typedef {} {};{}",
                display_type(db, def.target),
                db.name(def.name),
                implicit_marker(def.is_implicit)
            ))
        }
    };
    Some(doc)
}

fn decl_name(db: &CompilationDb, name: DeclName) -> String {
    match name {
        DeclName::Ident(sym) => db.name(sym).to_string(),
        DeclName::Operator(op) => op.spelling().to_string(),
    }
}

/// `template <typename element = float, int element_count = 4>`
fn print_template_header<'a>(
    arena: &'a Arena<'a>,
    db: &CompilationDb,
    params: &[TemplateParamId],
) -> Doc<'a> {
    let params = params
        .iter()
        .map(|&param| {
            let def = db.decls.template_param(param);
            let name = db.name(def.name);
            match def.kind {
                TemplateParamKind::Type { default: Some(ty) } => {
                    format!("typename {name} = {}", display_type(db, ty))
                }
                TemplateParamKind::Type { default: None } => format!("typename {name}"),
                TemplateParamKind::NonType {
                    ty,
                    default: Some(expr),
                } => format!("{} {name} = {}", display_type(db, ty), display_expr(db, expr)),
                TemplateParamKind::NonType { ty, default: None } => {
                    format!("{} {name}", display_type(db, ty))
                }
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    arena.text(format!("template <{params}>"))
}

/// `class name<args> : public base { ... };`
fn print_record<'a>(arena: &'a Arena<'a>, db: &CompilationDb, id: RecordId) -> Doc<'a> {
    let def = db.decls.record(id);
    let args = def
        .specialization_of
        .as_ref()
        .map(|info| {
            let args = info
                .args
                .iter()
                .map(|arg| display_template_arg(db, *arg))
                .collect::<Vec<_>>()
                .join(", ");
            format!("<{args}>")
        })
        .unwrap_or_default();
    let bases = if def.bases.is_empty() {
        String::new()
    } else {
        let bases = def
            .bases
            .iter()
            .map(|base| format!("{} {}", base.access.keyword(), display_type(db, base.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" : {bases}")
    };
    arena
        .text(format!(
            "{} {}{args}{bases} ",
            def.tag.keyword(),
            db.name(def.name)
        ))
        .append(print_body(arena, db, DeclContext::Record(id)))
        .append(arena.text(";"))
        .append(arena.text(implicit_marker(def.is_implicit)))
}
