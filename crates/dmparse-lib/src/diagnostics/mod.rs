//! Collected, non-fatal diagnostics.
//!
//! Every stage reports into its own [`Diagnostics`] pool; callers merge the
//! pools per file with [`Diagnostics::extend`].

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{CodeIssue, DiagnosticKind, Severity};
pub use printer::DiagnosticsPrinter;

use crate::syntax::{FilePosition, SyntaxToken};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    issues: Vec<CodeIssue>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    issue: CodeIssue,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Create a diagnostic anchored at `token`.
    ///
    /// Uses the kind's fallback message until arguments are added.
    pub fn report(&mut self, kind: DiagnosticKind, token: &SyntaxToken) -> DiagnosticBuilder<'_> {
        self.report_range(kind, token.range, token.position)
    }

    /// Create a diagnostic for an arbitrary span starting at `position`.
    pub fn report_range(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        position: FilePosition,
    ) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            issue: CodeIssue::new(kind, range, position),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeIssue> {
        self.issues.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|d| d.is_warning()).count()
    }

    /// Number of issues of `kind`.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.issues.iter().filter(|d| d.kind == kind).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a CodeIssue;
    type IntoIter = std::slice::Iter<'a, CodeIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Add a message argument; the message is re-rendered from the kind's template.
    pub fn argument(mut self, arg: impl Into<String>) -> Self {
        self.issue.arguments.push(arg.into());
        self.issue.message = self.issue.kind.message(&self.issue.arguments);
        self
    }

    pub fn emit(self) {
        self.diagnostics.issues.push(self.issue);
    }
}
