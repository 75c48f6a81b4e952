//! Lexer for DM source.
//!
//! Two passes over the input:
//!
//! 1. Logos produces a flat list of raw tokens, trivia included. The driver
//!    post-processes it: consecutive unmatched characters coalesce into one
//!    `Unknown` token, unknown `#word` directives become identifiers, raw
//!    `@X…X` literals and the free-text tail of `#warning`/`#error` are
//!    scanned here because they do not fit a fixed token shape.
//! 2. Trivia attachment walks the raw list and folds trivia into the
//!    neighbouring significant tokens (see [`attach`]).
//!
//! ## Error handling
//!
//! Lexing never fails. Unterminated literals run to the end of input and
//! report `lexer/missing-closing-sign`; unmatched characters report
//! `lexer/unexpected-token`. The stream always ends with one `EndOfFile`.

mod attach;
pub(crate) mod scan;

#[cfg(test)]
mod lexer_tests;

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use crate::cursor::Cursor;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{FilePosition, SyntaxKind, SyntaxToken, TokenStream};

pub const DEFAULT_TAB_WIDTH: u32 = 4;

/// Reusable lexer configuration. Each [`lex`](Lexer::lex) call is independent.
#[derive(Debug, Clone, Copy)]
pub struct Lexer {
    tab_width: u32,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn lex(&self, source: &str) -> (TokenStream, Diagnostics) {
        let mut run = LexRun {
            source,
            raw: Vec::new(),
            diagnostics: Diagnostics::new(),
            tracker: PositionTracker::new(self.tab_width),
        };
        run.scan();

        let (tokens, trivia) = attach::attach_trivia(&run.raw, run.tracker.end(source));
        (
            TokenStream::new(source.to_string(), tokens, trivia),
            run.diagnostics,
        )
    }
}

struct LexRun<'src> {
    source: &'src str,
    raw: Vec<SyntaxToken>,
    diagnostics: Diagnostics,
    tracker: PositionTracker,
}

impl LexRun<'_> {
    fn scan(&mut self) {
        let mut lexer = SyntaxKind::lexer(self.source);
        let mut error_start: Option<usize> = None;

        loop {
            match lexer.next() {
                Some(Ok(kind)) => {
                    let span = lexer.span();
                    if let Some(start) = error_start.take() {
                        self.push_unknown(start..span.start);
                    }

                    match kind {
                        SyntaxKind::At if !lexer.remainder().is_empty() => {
                            let (len, closed) = scan::raw_text_len(lexer.remainder());
                            lexer.bump(len);
                            let span = lexer.span();
                            let token = self.push(SyntaxKind::TextLiteral, span);
                            if !closed {
                                self.missing_closing_sign(&token, "@");
                            }
                        }
                        SyntaxKind::Directive => {
                            self.push(SyntaxKind::Identifier, span);
                        }
                        SyntaxKind::WarningDirective | SyntaxKind::ErrorDirective => {
                            self.push(kind, span.clone());
                            let consumed = self.directive_tail(span.end, lexer.remainder());
                            lexer.bump(consumed);
                        }
                        _ => {
                            let token = self.push(kind, span);
                            if let Some(sign) = lexer.extras.unterminated.take() {
                                self.missing_closing_sign(&token, sign);
                            }
                        }
                    }
                }
                Some(Err(())) => {
                    if error_start.is_none() {
                        error_start = Some(lexer.span().start);
                    }
                }
                None => {
                    if let Some(start) = error_start.take() {
                        self.push_unknown(start..self.source.len());
                    }
                    break;
                }
            }
        }
    }

    /// Free text after `#warning`/`#error`, up to the end of the line, as one
    /// `TextLiteral` (preceded by its separating whitespace). Returns bytes consumed.
    fn directive_tail(&mut self, offset: usize, rest: &str) -> usize {
        let mut cursor = Cursor::new(rest.as_bytes());
        let gap = cursor.bump_while(|b| b == b' ' || b == b'\t');
        cursor.start();
        cursor.bump_while(|b| b != b'\n' && b != b'\r');
        if cursor.lexeme().is_empty() {
            return 0;
        }

        if gap > 0 {
            self.push(SyntaxKind::Whitespace, offset..offset + gap);
        }
        self.push(SyntaxKind::TextLiteral, offset + gap..offset + cursor.offset());
        cursor.offset()
    }

    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) -> SyntaxToken {
        let position = self.tracker.advance(&self.source[span.clone()]);
        let token = SyntaxToken::new(kind, range_to_text_range(span), position);
        self.raw.push(token);
        token
    }

    fn push_unknown(&mut self, span: Range<usize>) {
        let token = self.push(SyntaxKind::Unknown, span.clone());
        self.diagnostics
            .report(DiagnosticKind::UnexpectedCharacter, &token)
            .argument(&self.source[span])
            .emit();
    }

    fn missing_closing_sign(&mut self, token: &SyntaxToken, sign: &str) {
        self.diagnostics
            .report(DiagnosticKind::MissingClosingSign, token)
            .argument(sign)
            .emit();
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Running line/column over consecutive token texts.
#[derive(Debug, Clone, Copy)]
struct PositionTracker {
    tab_width: u32,
    current: FilePosition,
    /// Previous text ended with `\r`; a leading `\n` completes that line break.
    pending_cr: bool,
}

impl PositionTracker {
    fn new(tab_width: u32) -> Self {
        Self {
            tab_width,
            current: FilePosition::START,
            pending_cr: false,
        }
    }

    /// Returns the position of `text`'s first character and moves past it.
    fn advance(&mut self, text: &str) -> FilePosition {
        let start = self.current;
        for c in text.chars() {
            let after_cr = std::mem::take(&mut self.pending_cr);
            match c {
                '\n' if after_cr => {}
                '\n' => self.new_line(),
                '\r' => {
                    self.new_line();
                    self.pending_cr = true;
                }
                '\t' => self.current.column += self.tab_width,
                _ => self.current.column += 1,
            }
        }
        start
    }

    fn new_line(&mut self) {
        self.current.line += 1;
        self.current.column = 1;
    }

    /// Position and offset just past the last character.
    fn end(&self, source: &str) -> (FilePosition, TextRange) {
        let len = (source.len() as u32).into();
        (self.current, TextRange::empty(len))
    }
}
