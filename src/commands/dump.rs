// src/commands/dump.rs
//! `lumen dump`: print built-in declarations as pseudo-source.

use std::process::ExitCode;

use lumen_sema::{DeclContext, DeclRef, print_decl, print_decls};

use super::common::{Session, SessionOptions};
use crate::errors::{CliError, render_to_stderr};

pub fn dump_decls(names: &[String], options: SessionOptions) -> ExitCode {
    let mut session = Session::new(options);
    if names.is_empty() {
        println!("{}", print_decls(&session.db, DeclContext::TranslationUnit));
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for name in names {
        match find_decls(&mut session, name) {
            Some(decls) => {
                for decl in decls {
                    println!("{}", print_decl(&session.db, decl));
                }
            }
            None => {
                let err = CliError::UnknownDecl { name: name.clone() };
                render_to_stderr(&err, session.color);
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Declarations named `name` in the translation unit or `std`. Shorthand
/// spellings create their alias on the way.
fn find_decls(session: &mut Session, name: &str) -> Option<Vec<DeclRef>> {
    if let Some(alias) = session.builtins.resolve_shorthand(&mut session.db, name) {
        return Some(vec![DeclRef::Alias(alias)]);
    }
    let db = &session.db;
    let (scope, member) = match name.split_once("::") {
        Some((namespace, member)) => {
            let namespace = db.idents.lookup(namespace)?;
            let namespace = db
                .decls
                .lookup_namespace(DeclContext::TranslationUnit, namespace)?;
            (DeclContext::Namespace(namespace), member)
        }
        None => (DeclContext::TranslationUnit, name),
    };
    let member = db.idents.lookup(member)?;
    let decls = db.decls.lookup(scope, member);
    (!decls.is_empty()).then(|| decls.to_vec())
}
