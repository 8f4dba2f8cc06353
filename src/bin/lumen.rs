// src/bin/lumen.rs

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ColorChoice, CommandFactory, FromArgMatches};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use lumen::cli::{Cli, ColorMode, Commands};
use lumen::commands::common::SessionOptions;
use lumen::commands::dump::dump_decls;
use lumen::commands::is_same::check_is_same;
use lumen::commands::resolve::resolve_types;
use lumen::commands::shorthand::parse_shorthands;
use lumen::commands::version::print_version;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    // Initialize tracing if LUMEN_LOG is set
    // LUMEN_LOG_STYLE: "compact" (default) or "full" (verbose with timestamps)
    if let Ok(filter) = EnvFilter::try_from_env("LUMEN_LOG") {
        let style = std::env::var("LUMEN_LOG_STYLE").unwrap_or_default();
        if style == "full" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        } else {
            // Compact output: no timestamp prefix, keep target/level and timing
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_timer(NoTimestamp)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        }
        tracing::debug!("tracing initialized");
    }

    // Pre-scan args to determine color choice for clap's help output
    let color_choice = get_color_choice_from_args();

    let styles = Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default());

    let matches = Cli::command()
        .styles(styles)
        .color(color_choice)
        .get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let options = SessionOptions {
        color: cli.color,
        is_same_extensions: !cli.no_is_same_extensions,
    };

    match cli.command {
        Commands::Dump { names } => dump_decls(&names, options),
        Commands::Shorthand { names } => parse_shorthands(&names, options),
        Commands::IsSame { a, b } => check_is_same(&a, &b, options),
        Commands::Resolve { types } => resolve_types(&types, options),
        Commands::Version => print_version(),
    }
}

/// Pre-scan command line args to determine color choice before full parsing.
/// This allows clap's help output to respect the --color flag.
fn get_color_choice_from_args() -> ColorChoice {
    let args: Vec<String> = std::env::args().collect();

    for (i, arg) in args.iter().enumerate() {
        // Handle --color=value
        if let Some(value) = arg.strip_prefix("--color=") {
            return parse_color_choice(value);
        }
        // Handle --color value
        if arg == "--color"
            && let Some(value) = args.get(i + 1)
        {
            return parse_color_choice(value);
        }
    }

    ColorChoice::Auto
}

fn parse_color_choice(value: &str) -> ColorChoice {
    match value.to_lowercase().as_str() {
        "always" => ColorChoice::from(ColorMode::Always),
        "never" => ColorChoice::from(ColorMode::Never),
        _ => ColorChoice::Auto,
    }
}
