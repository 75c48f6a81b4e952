//! Single-file pipeline: lexer, preprocessor, parser.

use crate::diagnostics::Diagnostics;
use crate::lexer::{DEFAULT_TAB_WIDTH, Lexer};
use crate::parser::{CompilationUnit, Parser};
use crate::preprocessor::{Preprocessed, Preprocessor, PreprocessorContext};
use crate::syntax::TokenStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub tab_width: u32,
    /// Parser step limit; `None` (the default) disables it. A stuck parser
    /// is caught by its progress invariant either way.
    pub exec_fuel: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            exec_fuel: None,
        }
    }
}

/// One parsed file: its tokens, preprocessor outcome and declarations.
#[derive(Debug, Clone)]
pub struct SourceFile {
    tokens: TokenStream,
    preprocessed: Preprocessed,
    unit: CompilationUnit,
    diagnostics: Diagnostics,
}

impl SourceFile {
    /// Runs the whole pipeline over `text`, seeding the preprocessor with
    /// `incoming` (a fork of it; `incoming` is left untouched).
    ///
    /// Malformed input produces diagnostics, never an error. Errors are fatal
    /// parser conditions only.
    pub fn parse(
        text: &str,
        incoming: Option<&PreprocessorContext>,
        options: &Options,
    ) -> crate::Result<Self> {
        let (tokens, lexer_diagnostics) = Lexer::new().with_tab_width(options.tab_width).lex(text);
        let preprocessed = Preprocessor::new().preprocess(&tokens, incoming);
        let result = Parser::new(&tokens)
            .with_inactive(&preprocessed.inactive)
            .with_exec_fuel(options.exec_fuel)
            .parse()?;

        let mut diagnostics = lexer_diagnostics;
        diagnostics.extend(preprocessed.diagnostics.clone());
        diagnostics.extend(result.diagnostics);

        Ok(Self {
            tokens,
            preprocessed,
            unit: result.unit,
            diagnostics,
        })
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn source(&self) -> &str {
        self.tokens.source()
    }

    pub fn preprocessed(&self) -> &Preprocessed {
        &self.preprocessed
    }

    /// Context after this file, to seed the next one.
    pub fn context(&self) -> &PreprocessorContext {
        &self.preprocessed.context
    }

    pub fn unit(&self) -> &CompilationUnit {
        &self.unit
    }

    /// Lexer, preprocessor and parser issues, in that order.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
