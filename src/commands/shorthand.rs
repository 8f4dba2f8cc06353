// src/commands/shorthand.rs
//! `lumen shorthand`: parse vector and matrix shorthand spellings.

use std::process::ExitCode;

use lumen_sema::builtins::{parse_matrix_shorthand, parse_vector_shorthand};
use lumen_sema::display_type;

use super::common::{Session, SessionOptions};
use crate::errors::{CliError, render_to_stderr};

pub fn parse_shorthands(names: &[String], options: SessionOptions) -> ExitCode {
    let mut session = Session::new(options);
    let mut failed = false;
    for name in names {
        let concrete = if let Some((scalar, count)) = parse_vector_shorthand(name) {
            session.builtins.vector_type(&mut session.db, scalar, count)
        } else if let Some((scalar, rows, cols)) = parse_matrix_shorthand(name) {
            session
                .builtins
                .matrix_type(&mut session.db, scalar, rows, cols)
        } else {
            let err = CliError::NotAShorthand { name: name.clone() };
            render_to_stderr(&err, session.color);
            failed = true;
            continue;
        };
        println!("{name} = {}", display_type(&session.db, concrete));
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
