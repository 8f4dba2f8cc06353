// specialization.rs
//
// Selection of explicit class template specializations.
//
// Specialization patterns are stored canonically over their own template
// parameters, e.g. `<T, const T>` with `T` at (0, 0). Selection matches the
// canonical arguments against each pattern in registration order and falls
// back to the primary template's record.

use lumen_identity::{RecordId, TemplateId};
use rustc_hash::FxHashMap;

use crate::compilation_db::CompilationDb;
use crate::type_arena::{SemaType, TemplateArg, TypeArena, TypeId};

/// Parameter position (depth, index) to the argument it was deduced as
type Bindings = FxHashMap<(u32, u32), TemplateArg>;

/// Record that describes `template<args...>`.
///
/// Returns the first explicit specialization whose pattern matches, or the
/// primary template's record.
pub fn select_specialization(
    db: &mut CompilationDb,
    template: TemplateId,
    args: &[TemplateArg],
) -> RecordId {
    let args: Vec<TemplateArg> = args
        .iter()
        .map(|arg| db.types.canonical_arg(*arg, &db.exprs))
        .collect();

    let def = db.decls.template(template);
    for &candidate in &def.specializations {
        let Some(info) = &db.decls.record(candidate).specialization_of else {
            continue;
        };
        if info.args.len() != args.len() {
            continue;
        }
        let mut bindings = Bindings::default();
        let matched = info
            .args
            .iter()
            .zip(&args)
            .all(|(pattern, arg)| match_arg(&db.types, *pattern, *arg, &mut bindings));
        if matched {
            tracing::trace!(
                template = template.index(),
                record = candidate.index(),
                "selected explicit specialization"
            );
            return candidate;
        }
    }
    def.record
}

fn match_arg(
    types: &TypeArena,
    pattern: TemplateArg,
    arg: TemplateArg,
    bindings: &mut Bindings,
) -> bool {
    match (pattern, arg) {
        (TemplateArg::Type(pattern), TemplateArg::Type(arg)) => {
            match_type(types, pattern, arg, bindings)
        }
        (TemplateArg::NonTypeParam { depth, index }, arg) => bind(bindings, depth, index, arg),
        (pattern, arg) => pattern == arg,
    }
}

fn match_type(types: &TypeArena, pattern: TypeId, arg: TypeId, bindings: &mut Bindings) -> bool {
    match (types.get(pattern), types.get(arg)) {
        (SemaType::TemplateTypeParam { depth, index, .. }, _) => {
            bind(bindings, *depth, *index, TemplateArg::Type(arg))
        }
        (SemaType::Const(p), SemaType::Const(a))
        | (SemaType::LValueReference(p), SemaType::LValueReference(a)) => {
            match_type(types, *p, *a, bindings)
        }
        (
            SemaType::ConstantArray {
                element: p,
                size: p_size,
            },
            SemaType::ConstantArray {
                element: a,
                size: a_size,
            },
        ) => p_size == a_size && match_type(types, *p, *a, bindings),
        (
            SemaType::ConstantVector {
                element: p,
                size: p_size,
            },
            SemaType::ConstantVector {
                element: a,
                size: a_size,
            },
        ) => p_size == a_size && match_type(types, *p, *a, bindings),
        (
            SemaType::Specialization {
                template: p_template,
                args: p_args,
            },
            SemaType::Specialization {
                template: a_template,
                args: a_args,
            },
        ) => {
            p_template == a_template
                && p_args.len() == a_args.len()
                && p_args
                    .iter()
                    .zip(a_args.iter())
                    .all(|(p, a)| match_arg(types, *p, *a, bindings))
        }
        _ => pattern == arg,
    }
}

/// Bind a parameter, or check a repeated occurrence against its binding
fn bind(bindings: &mut Bindings, depth: u32, index: u32, arg: TemplateArg) -> bool {
    match bindings.get(&(depth, index)) {
        Some(bound) => *bound == arg,
        None => {
            bindings.insert((depth, index), arg);
            true
        }
    }
}
