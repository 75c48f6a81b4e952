//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::{ColorChoice, DumpView, OutputFormat};
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;

pub struct CheckParams {
    pub env_path: PathBuf,
    pub strict: bool,
    pub format: OutputFormat,
    pub tab_width: u32,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            env_path: parse_path(m, "env_path"),
            strict: m.get_flag("strict"),
            format: parse_format(m),
            tab_width: parse_tab_width(m),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            env_path: p.env_path,
            strict: p.strict,
            format: p.format,
            tab_width: p.tab_width,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub file_path: PathBuf,
    pub view: DumpView,
    pub tab_width: u32,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file_path: parse_path(m, "file_path"),
            view: parse_view(m),
            tab_width: parse_tab_width(m),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            file_path: p.file_path,
            view: p.view,
            tab_width: p.tab_width,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

fn parse_tab_width(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("tab_width").copied().unwrap_or(4)
}

fn parse_view(m: &ArgMatches) -> DumpView {
    if m.get_flag("tokens") {
        DumpView::Tokens
    } else if m.get_flag("context") {
        DumpView::Context
    } else {
        DumpView::Declarations
    }
}
