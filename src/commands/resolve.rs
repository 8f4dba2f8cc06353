// src/commands/resolve.rs
//! `lumen resolve`: resolve type spellings to their canonical form.

use std::process::ExitCode;

use lumen_sema::{display_type, resolve_type_spelling};

use super::common::{Session, SessionOptions};

pub fn resolve_types(types: &[String], options: SessionOptions) -> ExitCode {
    let mut session = Session::new(options);
    let mut failed = false;
    for text in types {
        match resolve_type_spelling(&mut session.db, &mut session.builtins, text) {
            Ok(ty) => {
                let canonical = session.db.canonical(ty);
                println!(
                    "{} = {}",
                    display_type(&session.db, ty),
                    display_type(&session.db, canonical)
                );
            }
            Err(err) => {
                session.report_spelling_error(err, text);
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
