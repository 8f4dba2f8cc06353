// src/commands/common.rs
//! Shared utilities for CLI commands.

use lumen_sema::{BuiltinDecls, BuiltinOptions, CompilationDb, SemanticError, install_builtins};
use miette::NamedSource;

use crate::cli::ColorMode;
use crate::errors::render_to_stderr;

/// Options every command passes through to builtin installation.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub color: ColorMode,
    pub is_same_extensions: bool,
}

impl SessionOptions {
    fn builtin_options(self) -> BuiltinOptions {
        BuiltinOptions::default().with_is_same_extensions(self.is_same_extensions)
    }
}

/// A compilation database with every built-in installed.
pub struct Session {
    pub db: CompilationDb,
    pub builtins: BuiltinDecls,
    pub color: ColorMode,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        let mut db = CompilationDb::new();
        let builtins = install_builtins(&mut db, &options.builtin_options());
        Self {
            db,
            builtins,
            color: options.color,
        }
    }

    /// Render a type-spelling error against the text it came from.
    pub fn report_spelling_error(&self, err: SemanticError, text: &str) {
        let report =
            miette::Report::new(err).with_source_code(NamedSource::new("<type>", text.to_string()));
        render_to_stderr(report.as_ref(), self.color);
    }
}
