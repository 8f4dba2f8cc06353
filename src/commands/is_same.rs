// src/commands/is_same.rs
//! `lumen is-same`: evaluate `std::is_same<A, B>`.

use std::process::ExitCode;

use lumen_sema::builtins::is_same;
use lumen_sema::resolve_type_spelling;

use super::common::{Session, SessionOptions};

pub fn check_is_same(a: &str, b: &str, options: SessionOptions) -> ExitCode {
    let mut session = Session::new(options);
    let mut types = Vec::with_capacity(2);
    for text in [a, b] {
        match resolve_type_spelling(&mut session.db, &mut session.builtins, text) {
            Ok(ty) => types.push(ty),
            Err(err) => {
                session.report_spelling_error(err, text);
                return ExitCode::FAILURE;
            }
        }
    }

    let traits = session.builtins.traits.clone();
    let same = is_same(&mut session.db, &traits, types[0], types[1]);
    println!("{same}");
    ExitCode::SUCCESS
}
