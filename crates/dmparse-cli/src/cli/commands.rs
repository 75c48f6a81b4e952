//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dmparse")
        .about("Lexer, preprocessor and declaration parser for DM projects")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Load an environment and report its issues.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Parse a project and report its issues")
        .override_usage("  dmparse check <ENV_FILE> [--strict] [--format text|json]")
        .after_help(
            r#"EXAMPLES:
  dmparse check tgstation.dme               # annotated report on stderr
  dmparse check tgstation.dme --strict      # fail on warnings too
  dmparse check tgstation.dme --format json # one JSON issue per line"#,
        )
        .arg(env_path_arg())
        .arg(strict_arg())
        .arg(format_arg())
        .arg(tab_width_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Inspect one file in isolation.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show tokens, declarations or preprocessor state of one file")
        .override_usage("  dmparse dump <FILE> [--tokens|--declarations|--context]")
        .after_help(
            r#"EXAMPLES:
  dmparse dump code/mob.dm               # declaration outline
  dmparse dump code/mob.dm --tokens      # tokens with trivia
  dmparse dump code/defines.dm --context # defines and includes"#,
        )
        .arg(file_path_arg())
        .arg(tokens_arg())
        .arg(declarations_arg())
        .arg(context_arg())
        .group(view_group())
        .arg(tab_width_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
