//! dmparse: lexer, preprocessor and declaration parser for DM source files.
//!
//! # Example
//!
//! ```
//! use dmparse::{Options, SourceFile};
//!
//! let source = "#define DEBUG\n/datum/thing\n\tvar/health = 100\n";
//!
//! let file = SourceFile::parse(source, None, &Options::default()).expect("out of fuel");
//! assert!(file.preprocessed().context.defines.contains_key("DEBUG"));
//! assert_eq!(file.unit().declarations().len(), 2);
//! eprintln!("{}", file.diagnostics().printer(source).render());
//! ```

pub mod cursor;
pub mod diagnostics;
pub mod environment;
pub mod lexer;
pub mod parser;
pub mod preprocessor;
pub mod syntax;

mod source_file;

#[cfg(test)]
mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use cursor::Cursor;
pub use diagnostics::{CodeIssue, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use environment::{CachedFileProvider, Environment, FileProvider, FsFileProvider};
pub use lexer::Lexer;
pub use parser::{CompilationUnit, Declaration, DeclarationKind, Parser};
pub use preprocessor::{Preprocessed, Preprocessor, PreprocessorContext};
pub use source_file::{Options, SourceFile};
pub use syntax::{FilePosition, SyntaxKind, SyntaxToken, TokenStream};

/// Fatal conditions. Malformed input never produces these; it produces diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Internal bug: the parser reached a state its own grammar rules out.
    #[error("broken parser invariant: {0}")]
    BrokenInvariant(&'static str),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
