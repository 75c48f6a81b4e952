//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, value_parser};

/// Environment file to check (positional).
pub fn env_path_arg() -> Arg {
    Arg::new("env_path")
        .value_name("ENV_FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Environment file (.dme) to load")
}

/// Single source file to inspect (positional).
pub fn file_path_arg() -> Arg {
    Arg::new("file_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Source file to inspect")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Report format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Report format")
}

/// Columns a tab advances (--tab-width).
pub fn tab_width_arg() -> Arg {
    Arg::new("tab_width")
        .long("tab-width")
        .value_name("N")
        .default_value("4")
        .value_parser(value_parser!(u32).range(1..))
        .help("Columns a tab character advances")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}

/// Print the token stream (--tokens).
pub fn tokens_arg() -> Arg {
    Arg::new("tokens")
        .long("tokens")
        .action(ArgAction::SetTrue)
        .help("Print tokens with their trivia")
}

/// Print the declaration outline (--declarations).
pub fn declarations_arg() -> Arg {
    Arg::new("declarations")
        .long("declarations")
        .action(ArgAction::SetTrue)
        .help("Print declarations (default)")
}

/// Print the preprocessor context (--context).
pub fn context_arg() -> Arg {
    Arg::new("context")
        .long("context")
        .action(ArgAction::SetTrue)
        .help("Print defines, includes and open conditionals")
}

/// At most one dump view.
pub fn view_group() -> ArgGroup {
    ArgGroup::new("view")
        .args(["tokens", "declarations", "context"])
        .multiple(false)
}
