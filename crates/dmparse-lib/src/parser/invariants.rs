//! Invariant checks excluded from coverage reports.
//!
//! A failed check is a parser bug, not bad input: it becomes a fatal
//! [`Error::BrokenInvariant`] instead of a diagnostic.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::ParseRun;
use crate::Error;
use crate::syntax::{SyntaxKind, SyntaxToken};

impl ParseRun<'_> {
    /// Every line consumes at least one token.
    #[inline]
    pub(super) fn ensure_progress(&mut self, before: usize) {
        if self.cursor.offset() == before && self.current().is_some() {
            self.broken_invariant("parser is stuck: a line consumed no tokens");
        }
    }

    #[inline]
    pub(super) fn assert_head(&mut self, head: &SyntaxToken) {
        if head.kind != SyntaxKind::Identifier {
            self.broken_invariant("declaration head is not an identifier");
        }
    }

    fn broken_invariant(&mut self, what: &'static str) {
        if self.fatal_error.is_none() {
            self.fatal_error = Some(Error::BrokenInvariant(what));
        }
    }
}
