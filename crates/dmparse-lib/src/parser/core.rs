//! Parser configuration and run state.

use std::ops::Range;

use super::ast::{CompilationUnit, Declaration, DeclarationKind};
use crate::Error;
use crate::cursor::Cursor;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{SyntaxKind, SyntaxToken, TokenStream};

#[derive(Debug)]
pub struct ParseResult {
    pub unit: CompilationUnit,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

/// Declaration parser over a preprocessed token stream.
///
/// Tokens inside inactive ranges and on directive lines never reach the
/// grammar. The stream itself is not modified.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    stream: &'t TokenStream,
    inactive: &'t [Range<usize>],
    exec_fuel: Option<u32>,
}

impl<'t> Parser<'t> {
    pub fn new(stream: &'t TokenStream) -> Self {
        Self {
            stream,
            inactive: &[],
            exec_fuel: None,
        }
    }

    /// Token index ranges to ignore, sorted by start, as reported by the
    /// preprocessor.
    pub fn with_inactive(mut self, inactive: &'t [Range<usize>]) -> Self {
        self.inactive = inactive;
        self
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn parse(self) -> Result<ParseResult, Error> {
        let visible = self.visible_tokens();
        let mut run = ParseRun::new(self.stream, &visible, self.exec_fuel);
        run.parse_body();
        run.finish()
    }

    fn visible_tokens(&self) -> Vec<SyntaxToken> {
        let tokens = self.stream.tokens();
        let mut visible = Vec::with_capacity(tokens.len());
        let mut ranges = self.inactive.iter().peekable();
        let mut index = 0;

        while let Some(&token) = tokens.get(index) {
            while ranges.next_if(|r| r.end <= index).is_some() {}
            if let Some(range) = ranges.peek().filter(|r| r.start <= index) {
                index = range.end;
                continue;
            }
            if token.line_start && self.is_directive(&token) {
                index = self.stream.line_end(index);
                continue;
            }
            visible.push(token);
            index += 1;
        }

        visible
    }

    /// Known directives, and unknown `#word`s that lexed as identifiers.
    fn is_directive(&self, token: &SyntaxToken) -> bool {
        token.kind.is_directive()
            || (token.kind == SyntaxKind::Identifier && self.stream.text(token).starts_with('#'))
    }
}

/// A path segment and the column of the line that contributed it.
#[derive(Debug, Clone, Copy)]
pub(super) struct PathEntry {
    pub token: SyntaxToken,
    pub column: u32,
}

pub(super) struct ParseRun<'p> {
    pub(super) stream: &'p TokenStream,
    pub(super) cursor: Cursor<'p, SyntaxToken>,
    /// Cumulative path, outermost first.
    pub(super) path: Vec<PathEntry>,
    pub(super) kind: DeclarationKind,
    pub(super) head: Option<SyntaxToken>,
    /// Last `var`/`proc`/`verb` keyword that has not been given a name yet.
    pub(super) unnamed: Option<PathEntry>,
    pub(super) declarations: Vec<Declaration>,
    pub(super) diagnostics: Diagnostics,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    pub(super) fatal_error: Option<Error>,
}

impl<'p> ParseRun<'p> {
    fn new(stream: &'p TokenStream, tokens: &'p [SyntaxToken], exec_fuel: Option<u32>) -> Self {
        Self {
            stream,
            cursor: Cursor::new(tokens),
            path: Vec::new(),
            kind: DeclarationKind::Type,
            head: None,
            unnamed: None,
            declarations: Vec::new(),
            diagnostics: Diagnostics::new(),
            exec_fuel_initial: exec_fuel,
            exec_fuel_remaining: exec_fuel,
            fatal_error: None,
        }
    }

    fn finish(self) -> Result<ParseResult, Error> {
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        Ok(ParseResult {
            unit: CompilationUnit::new(self.declarations),
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        })
    }

    /// Current token, `None` at `EndOfFile`.
    pub(super) fn current(&self) -> Option<SyntaxToken> {
        self.cursor
            .peek()
            .filter(|t| t.kind != SyntaxKind::EndOfFile)
    }

    pub(super) fn should_stop(&self) -> bool {
        self.current().is_none() || self.fatal_error.is_some()
    }

    pub(super) fn bump(&mut self) {
        self.consume_exec_fuel();
        self.cursor.advance();
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind, token: &SyntaxToken) {
        let text = self.stream.text(token).to_owned();
        self.diagnostics.report(kind, token).argument(text).emit();
    }
}
