// src/cli/args.rs

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};

use crate::commands::version::version_string;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Inspect the built-in declarations of the lumen shading-language front end
#[derive(Parser)]
#[command(name = "lumen")]
#[command(version = version_string())]
#[command(about = "Built-in type synthesis inspector", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Only exact matches satisfy std::is_same (no const or reference relaxation)
    #[arg(long, global = true)]
    pub no_is_same_extensions: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print built-in declarations as pseudo-source
    #[command(visible_alias = "d")]
    Dump {
        /// Declarations to print (all of the translation unit if omitted)
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },
    /// Parse shorthand spellings such as float3 or int2x4
    #[command(visible_alias = "s")]
    Shorthand {
        /// Shorthand spellings to parse
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Evaluate std::is_same for two type spellings
    IsSame {
        /// First type
        #[arg(value_name = "A")]
        a: String,
        /// Second type
        #[arg(value_name = "B")]
        b: String,
    },
    /// Resolve type spellings and print their canonical form
    #[command(visible_alias = "r")]
    Resolve {
        /// Type spellings, e.g. "const float3&" or "matrix<int, 2>"
        #[arg(value_name = "TYPE", required = true)]
        types: Vec<String>,
    },
    /// Show version information
    Version,
}
