//! `#if`/`#elif` conditions.
//!
//! Recognized forms, optionally negated with a leading `!`:
//!
//! - `defined(NAME)` (parentheses optional): membership in the defines.
//! - `LHS OP RHS` with `OP` one of `== != > >= < <=`.
//! - `OPERAND` alone: true when its value is non-zero.
//!
//! Operands are numeric literals or macro names resolved through the defines.
//! Values compare as `f64`. Any issue makes the whole condition false.

use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{SyntaxKind, SyntaxToken, TokenStream, token_sets};

pub(super) struct Condition<'a> {
    pub stream: &'a TokenStream,
    pub directive: &'a SyntaxToken,
    pub defines: &'a IndexMap<String, String>,
    pub diagnostics: &'a mut Diagnostics,
}

impl Condition<'_> {
    /// Evaluates the tokens following the directive on its line.
    pub fn evaluate(&mut self, tokens: &[SyntaxToken]) -> bool {
        let mut cursor = Cursor::new(tokens);
        let negate = cursor.peek().map(|t| t.kind) == Some(SyntaxKind::Exclamation);
        if negate {
            cursor.advance();
        }

        let value = match cursor.peek() {
            Some(t) if self.is_defined_call(&t) => self.defined(&mut cursor),
            _ => self.comparison(&mut cursor),
        };

        value.is_some_and(|v| v != negate)
    }

    fn is_defined_call(&self, token: &SyntaxToken) -> bool {
        token.kind == SyntaxKind::Identifier && self.stream.text(token) == "defined"
    }

    fn defined(&mut self, cursor: &mut Cursor<'_, SyntaxToken>) -> Option<bool> {
        let call = cursor.read()?;
        let parenthesized = cursor.peek().map(|t| t.kind) == Some(SyntaxKind::OpenParenthesis);
        if parenthesized {
            cursor.advance();
        }

        let Some(name) = cursor.peek().filter(|t| t.kind == SyntaxKind::Identifier) else {
            let anchor = cursor.peek().unwrap_or(call);
            self.report(DiagnosticKind::ExpectedValue, &anchor, None);
            return None;
        };
        cursor.advance();

        if parenthesized && cursor.peek().map(|t| t.kind) == Some(SyntaxKind::CloseParenthesis) {
            cursor.advance();
        }
        self.reject_trailing(cursor)?;

        Some(self.defines.contains_key(self.stream.text(&name)))
    }

    fn comparison(&mut self, cursor: &mut Cursor<'_, SyntaxToken>) -> Option<bool> {
        let Some(lhs) = cursor.peek().filter(is_operand) else {
            let anchor = cursor.peek().unwrap_or(*self.directive);
            self.report(DiagnosticKind::ExpectedProc, &anchor, None);
            return None;
        };
        cursor.advance();

        let Some(op) = cursor.read() else {
            return Some(self.value(&lhs)? != 0.0);
        };
        if !token_sets::COMPARISONS.contains(op.kind) {
            let text = self.stream.text(&op).to_owned();
            self.report(DiagnosticKind::InvalidOperator, &op, Some(text));
            return None;
        }

        let Some(rhs) = cursor.peek().filter(is_operand) else {
            let anchor = cursor.peek().unwrap_or(op);
            self.report(DiagnosticKind::ExpectedValue, &anchor, None);
            return None;
        };
        cursor.advance();
        self.reject_trailing(cursor)?;

        let lhs = self.value(&lhs)?;
        let rhs = self.value(&rhs)?;
        Some(match op.kind {
            SyntaxKind::DoubleEqual => lhs == rhs,
            SyntaxKind::ExclamationEqual => lhs != rhs,
            SyntaxKind::Greater => lhs > rhs,
            SyntaxKind::GreaterEqual => lhs >= rhs,
            SyntaxKind::Lesser => lhs < rhs,
            _ => lhs <= rhs,
        })
    }

    /// Anything after a complete condition is an operator we don't understand.
    fn reject_trailing(&mut self, cursor: &mut Cursor<'_, SyntaxToken>) -> Option<()> {
        match cursor.peek() {
            None => Some(()),
            Some(extra) => {
                let text = self.stream.text(&extra).to_string();
                self.report(DiagnosticKind::InvalidOperator, &extra, Some(text));
                None
            }
        }
    }

    fn value(&mut self, operand: &SyntaxToken) -> Option<f64> {
        let (stream, defines) = (self.stream, self.defines);
        let text = stream.text(operand);
        let raw = if operand.kind == SyntaxKind::Identifier {
            let Some(value) = defines.get(text) else {
                self.report(DiagnosticKind::UnknownVariable, operand, Some(text.to_string()));
                return None;
            };
            value.as_str()
        } else {
            text
        };

        match raw.trim().parse::<f64>() {
            Ok(value) if !value.is_nan() => Some(value),
            _ => {
                let shown = if raw.trim().is_empty() { text } else { raw };
                self.report(
                    DiagnosticKind::CantCompareNanValues,
                    operand,
                    Some(shown.to_string()),
                );
                None
            }
        }
    }

    fn report(&mut self, kind: DiagnosticKind, token: &SyntaxToken, argument: Option<String>) {
        let builder = self.diagnostics.report(kind, token);
        match argument {
            Some(arg) => builder.argument(arg).emit(),
            None => builder.emit(),
        }
    }
}

fn is_operand(token: &SyntaxToken) -> bool {
    matches!(
        token.kind,
        SyntaxKind::Identifier | SyntaxKind::NumericalLiteral
    )
}
