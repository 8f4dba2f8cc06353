// errors.rs
//! Type-spelling resolution errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("unknown type '{name}'")]
    #[diagnostic(code(E3001))]
    UnknownType {
        name: String,
        #[label("not a built-in type, shorthand or alias")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(E3002))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected here")]
        span: SourceSpan,
    },

    #[error("unexpected character '{ch}'")]
    #[diagnostic(code(E3003))]
    UnexpectedCharacter {
        ch: char,
        #[label("unexpected character")]
        span: SourceSpan,
    },

    #[error("invalid integer literal")]
    #[diagnostic(code(E3004))]
    InvalidInteger {
        #[label("does not fit in 64 bits")]
        span: SourceSpan,
    },

    #[error("'{name}' is not a template")]
    #[diagnostic(code(E3005), help("remove the template argument list"))]
    NotATemplate {
        name: String,
        #[label("template arguments given here")]
        span: SourceSpan,
    },

    #[error("too many template arguments for '{name}': expected at most {expected}, found {found}")]
    #[diagnostic(code(E3006))]
    TooManyTemplateArgs {
        name: String,
        expected: usize,
        found: usize,
        #[label("extra argument")]
        span: SourceSpan,
    },

    #[error("missing template argument '{param}' for '{name}'")]
    #[diagnostic(code(E3007), help("'{param}' has no default value"))]
    MissingTemplateArg {
        name: String,
        param: String,
        #[label("argument list ends here")]
        span: SourceSpan,
    },

    #[error("template parameter '{param}' expects a type")]
    #[diagnostic(code(E3008))]
    ExpectedTypeArg {
        param: String,
        #[label("found a value")]
        span: SourceSpan,
    },

    #[error("template parameter '{param}' expects a value")]
    #[diagnostic(code(E3009))]
    ExpectedValueArg {
        param: String,
        #[label("found a type")]
        span: SourceSpan,
    },

    #[error("type spelling nests deeper than {limit} levels")]
    #[diagnostic(code(E3010))]
    NestingTooDeep {
        limit: usize,
        #[label("nesting limit reached here")]
        span: SourceSpan,
    },
}
