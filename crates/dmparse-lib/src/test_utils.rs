//! Test utilities and snapshot macros.

use crate::{Options, SourceFile};

impl SourceFile {
    #[track_caller]
    pub(crate) fn expect_parsed(source: &str) -> Self {
        Self::parse(source, None, &Options::default()).expect("parse should not hit a fatal error")
    }

    /// Declaration outline of a file that must be clean.
    #[track_caller]
    pub(crate) fn expect_outline(source: &str) -> String {
        let file = Self::expect_parsed(source);
        if !file.diagnostics().is_empty() {
            panic!(
                "expected no issues, got:\n{}",
                file.diagnostics().printer(source).render()
            );
        }
        file.unit().dump(file.tokens())
    }

    /// Rendered issues of a file that must have some.
    #[track_caller]
    pub(crate) fn expect_issues(source: &str) -> String {
        let file = Self::expect_parsed(source);
        if file.diagnostics().is_empty() {
            panic!("expected issues, got none");
        }
        file.diagnostics()
            .iter()
            .map(|issue| format!("{issue}\n"))
            .collect()
    }
}

/// Snapshot test for the declaration outline.
#[macro_export]
macro_rules! shot_outline {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::SourceFile::expect_outline(source);
        insta::assert_snapshot!(format!("{source}\n---\n{output}"), @$snapshot);
    }};
}

/// Snapshot test for issues of every stage, in reporting order.
#[macro_export]
macro_rules! shot_issues {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::SourceFile::expect_issues(source);
        insta::assert_snapshot!(format!("{source}\n---\n{output}"), @$snapshot);
    }};
}
