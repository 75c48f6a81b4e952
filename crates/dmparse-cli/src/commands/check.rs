use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dmparse::environment::EnvironmentFile;
use dmparse::{CodeIssue, Environment, FileProvider, FsFileProvider, Severity};
use serde::Serialize;

use crate::cli::OutputFormat;

pub struct CheckArgs {
    pub env_path: PathBuf,
    pub strict: bool,
    pub format: OutputFormat,
    pub tab_width: u32,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Parse(#[from] dmparse::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Issue counts over the whole project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn passed(&self, strict: bool) -> bool {
        self.errors == 0 && (!strict || self.warnings == 0)
    }
}

#[derive(Serialize)]
struct IssueRecord<'a> {
    file: String,
    id: &'static str,
    severity: Severity,
    line: u32,
    column: u32,
    message: &'a str,
}

impl<'a> IssueRecord<'a> {
    fn new(path: &Path, issue: &'a CodeIssue) -> Self {
        Self {
            file: path.display().to_string(),
            id: issue.id(),
            severity: issue.severity(),
            line: issue.position().line,
            column: issue.position().column,
            message: issue.message(),
        }
    }
}

pub fn run(args: CheckArgs) {
    let result = match args.format {
        OutputFormat::Text => execute(&args, FsFileProvider, &mut io::stderr().lock()),
        OutputFormat::Json => execute(&args, FsFileProvider, &mut io::stdout().lock()),
    };

    match result {
        Ok(summary) if summary.passed(args.strict) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Loads the project and writes the report to `out`.
pub fn execute<P: FileProvider>(
    args: &CheckArgs,
    provider: P,
    out: &mut impl Write,
) -> Result<Summary, CheckError> {
    let mut env = Environment::new(provider).with_tab_width(args.tab_width);
    env.load(&args.env_path)?;

    let mut summary = Summary {
        files: env.files().len(),
        ..Summary::default()
    };
    for file in env.files() {
        summary.errors += file.diagnostics().error_count();
        summary.warnings += file.diagnostics().warning_count();
        match args.format {
            OutputFormat::Text => write_text(file, args.color, out)?,
            OutputFormat::Json => write_json(file, out)?,
        }
    }

    tracing::debug!(
        files = summary.files,
        errors = summary.errors,
        warnings = summary.warnings,
        "check finished"
    );
    if args.format == OutputFormat::Text {
        writeln!(
            out,
            "checked {} files: {} errors, {} warnings",
            summary.files, summary.errors, summary.warnings
        )?;
    }
    Ok(summary)
}

fn write_text(file: &EnvironmentFile, color: bool, out: &mut impl Write) -> io::Result<()> {
    if file.diagnostics().is_empty() {
        return Ok(());
    }
    let path = file.path().display().to_string();
    let rendered = file
        .diagnostics()
        .printer(file.file().source())
        .path(&path)
        .colored(color)
        .render();
    writeln!(out, "{rendered}")
}

fn write_json(file: &EnvironmentFile, out: &mut impl Write) -> io::Result<()> {
    for issue in file.diagnostics() {
        let record = IssueRecord::new(file.path(), issue);
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}
