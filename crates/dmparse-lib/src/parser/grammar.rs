//! Declaration grammar.
//!
//! Works line by line. The first token of each line decides, by its column,
//! how much of the cumulative path survives: entries contributed by lines at
//! the same or deeper indentation are dropped, shallower ones stay as the
//! parent path. Within a line:
//!
//! - `/` separates segments (`//` is reported, parsing goes on)
//! - an identifier becomes the tentative head
//! - `global` is a path modifier, never a head
//! - `var`/`proc`/`verb` finalizes a pending head, then switches the kind
//! - `=`, `[` and `as` finalize and skip the initializer
//! - `(` finalizes, skips the argument list and the indented body
//! - anything else is reported and the rest of the line is skipped

use super::ast::{Declaration, DeclarationKind};
use super::core::{ParseRun, PathEntry};
use crate::diagnostics::DiagnosticKind;
use crate::syntax::{SyntaxKind, SyntaxToken, token_sets};

impl ParseRun<'_> {
    pub(super) fn parse_body(&mut self) {
        while !self.should_stop() {
            let Some(first) = self.current() else {
                break;
            };
            let before = self.cursor.offset();
            self.parse_line(first.position.column);
            self.ensure_progress(before);
        }

        self.finalize();
        self.expect_name(0);
    }

    fn parse_line(&mut self, column: u32) {
        self.start_line(column);
        let line_begin = self.cursor.offset();
        let mut after_slash = false;

        while let Some(token) = self.current() {
            if token.line_start && self.cursor.offset() != line_begin {
                return;
            }

            match token.kind {
                SyntaxKind::Slash => {
                    if after_slash {
                        self.error(DiagnosticKind::UnexpectedToken, &token);
                    } else {
                        self.push_path(token, column);
                    }
                    self.bump();
                    after_slash = true;
                    continue;
                }
                SyntaxKind::Identifier => {
                    self.push_path(token, column);
                    self.head = Some(token);
                    self.unnamed = None;
                    self.bump();
                }
                SyntaxKind::GlobalKeyword => {
                    self.push_path(token, column);
                    self.bump();
                }
                kind if kind.is_declaration_keyword() => {
                    self.finalize();
                    if let Some(kind) = DeclarationKind::from_keyword(kind) {
                        self.kind = kind;
                    }
                    let entry = PathEntry { token, column };
                    self.path.push(entry);
                    self.unnamed = Some(entry);
                    self.bump();
                }
                SyntaxKind::Equal | SyntaxKind::OpenBracket | SyntaxKind::AsKeyword => {
                    self.finalize_or_expect_name();
                    self.skip_value();
                    return;
                }
                SyntaxKind::OpenParenthesis => {
                    self.finalize_or_expect_name();
                    self.skip_signature(column);
                    return;
                }
                _ => {
                    self.error(DiagnosticKind::UnexpectedToken, &token);
                    self.head = None;
                    self.skip_line();
                    return;
                }
            }
            after_slash = false;
        }
    }

    /// A new line at `column` closes everything opened at that depth or deeper.
    fn start_line(&mut self, column: u32) {
        self.finalize();
        self.expect_name(column);

        let keep = self
            .path
            .iter()
            .position(|e| e.column >= column)
            .unwrap_or(self.path.len());
        self.path.truncate(keep);

        self.kind = self
            .path
            .iter()
            .rev()
            .find_map(|e| DeclarationKind::from_keyword(e.token.kind))
            .unwrap_or(DeclarationKind::Type);
    }

    fn push_path(&mut self, token: SyntaxToken, column: u32) {
        self.path.push(PathEntry { token, column });
    }

    /// Emits the pending declaration, if a head was seen.
    fn finalize(&mut self) {
        let Some(head) = self.head.take() else {
            return;
        };
        self.assert_head(&head);

        let mut full_path: Vec<_> = self.path.iter().map(|e| e.token).collect();
        if full_path.last().is_some_and(|t| t.kind == SyntaxKind::Slash) {
            full_path.pop();
        }
        let name = self.stream.text(&head).to_owned();
        tracing::trace!(kind = ?self.kind, %name, "declaration");
        self.declarations
            .push(Declaration::new(self.kind, head, full_path, name));
    }

    fn finalize_or_expect_name(&mut self) {
        if self.head.is_some() {
            self.finalize();
        } else {
            self.expect_name(0);
        }
    }

    /// Reports a keyword left without a name, unless a line deeper than
    /// `column` can still provide one.
    fn expect_name(&mut self, column: u32) {
        let Some(keyword) = self.unnamed.filter(|k| k.column >= column) else {
            return;
        };
        self.unnamed = None;
        self.error(DiagnosticKind::ExpectedName, &keyword.token);
    }

    /// Skips to the next line start outside any brackets.
    fn skip_value(&mut self) {
        let start = self.cursor.offset();
        let mut depth = 0u32;

        while let Some(token) = self.current() {
            if token.line_start && depth == 0 && self.cursor.offset() != start {
                break;
            }
            if token_sets::OPENING_BRACKETS.contains(token.kind) {
                depth += 1;
            } else if token_sets::CLOSING_BRACKETS.contains(token.kind) {
                depth = depth.saturating_sub(1);
            }
            self.bump();
        }
    }

    /// Skips an argument list, the rest of its line, and every following line
    /// indented deeper than `column`.
    fn skip_signature(&mut self, column: u32) {
        self.skip_value();
        while self
            .current()
            .is_some_and(|t| t.position.column > column)
        {
            self.skip_value();
        }
    }

    fn skip_line(&mut self) {
        let start = self.cursor.offset();
        while let Some(token) = self.current() {
            if token.line_start && self.cursor.offset() != start {
                break;
            }
            self.bump();
        }
    }
}
