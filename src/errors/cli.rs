// src/errors/cli.rs
//! Driver errors (E9xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    #[error("no built-in declaration named '{name}'")]
    #[diagnostic(
        code(E9001),
        help("run 'lumen dump' to list every built-in declaration")
    )]
    UnknownDecl { name: String },

    #[error("'{name}' is not a vector or matrix shorthand")]
    #[diagnostic(
        code(E9002),
        help("shorthands are <scalar><count> or <scalar><rows>x<cols> with dimensions 1 to 4")
    )]
    NotAShorthand { name: String },
}
