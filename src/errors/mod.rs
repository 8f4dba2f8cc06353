// src/errors/mod.rs
//! Structured error reporting for the lumen driver.
//!
//! This module provides error types using miette for fancy diagnostics.

pub mod cli;
pub mod report;

pub use cli::CliError;
pub use report::{render_to_stderr, render_to_string};

// Re-export sema errors
pub use lumen_sema::errors::SemanticError;
