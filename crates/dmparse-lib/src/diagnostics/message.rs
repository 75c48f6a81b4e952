use rowan::TextRange;
use serde::Serialize;

use crate::syntax::FilePosition;

/// Every issue the pipeline can report, grouped by the stage that raises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexer
    MissingClosingSign,
    /// Characters no token rule matches. Reported as `lexer/unexpected-token`.
    UnexpectedCharacter,

    // Preprocessor: directives
    ErrorDirective,
    WarningDirective,
    EndIfNotFound,
    ExtraEndIf,
    UnexpectedElse,
    MissingArgument,
    VariableAlreadyDefined,

    // Preprocessor: `#if` expressions
    ExpectedProc,
    ExpectedValue,
    UnknownVariable,
    InvalidOperator,
    CantCompareNanValues,

    // Parser
    UnexpectedToken,
    ExpectedName,

    // Environment
    FileNotFound,
    IncludeCycle,
}

impl DiagnosticKind {
    /// Stable namespaced identifier, safe to persist or match on.
    pub fn id(&self) -> &'static str {
        match self {
            Self::MissingClosingSign => "lexer/missing-closing-sign",
            Self::UnexpectedCharacter => "lexer/unexpected-token",

            Self::ErrorDirective => "preprocessor/error-directive",
            Self::WarningDirective => "preprocessor/warning-directive",
            Self::EndIfNotFound => "preprocessor/endif-not-found",
            Self::ExtraEndIf => "preprocessor/extra-endif",
            Self::UnexpectedElse => "preprocessor/unexpected-else",
            Self::MissingArgument => "preprocessor/missing-argument",
            Self::VariableAlreadyDefined => "preprocessor/variable-already-defined",

            Self::ExpectedProc => "preprocessor/expected-proc",
            Self::ExpectedValue => "preprocessor/expected-value",
            Self::UnknownVariable => "preprocessor/unknown-variable",
            Self::InvalidOperator => "preprocessor/invalid-operator",
            Self::CantCompareNanValues => "preprocessor/cant-compare-nan-values",

            Self::UnexpectedToken => "parser/unexpected-token",
            Self::ExpectedName => "parser/expected-name",

            Self::FileNotFound => "environment/file-not-found",
            Self::IncludeCycle => "environment/include-cycle",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Self::WarningDirective | Self::IncludeCycle => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message, used when the issue carries no arguments.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::MissingClosingSign => "missing closing sign",
            Self::UnexpectedCharacter => "unexpected token",

            Self::ErrorDirective => "`#error` directive",
            Self::WarningDirective => "`#warning` directive",
            Self::EndIfNotFound => "`#endif` not found",
            Self::ExtraEndIf => "extra `#endif`",
            Self::UnexpectedElse => "`#else` without an open conditional",
            Self::MissingArgument => "directive expects an argument on the same line",
            Self::VariableAlreadyDefined => "variable already defined",

            Self::ExpectedProc => "expected a left operand",
            Self::ExpectedValue => "expected a value",
            Self::UnknownVariable => "unknown preprocessor variable",
            Self::InvalidOperator => "unknown operator",
            Self::CantCompareNanValues => "can't compare non-numeric values",

            Self::UnexpectedToken => "unexpected token",
            Self::ExpectedName => "declaration is missing a name",

            Self::FileNotFound => "included file not found",
            Self::IncludeCycle => "file is already included",
        }
    }

    /// Template for messages with arguments. Each `{}` takes the next argument.
    pub fn custom_message(&self) -> &'static str {
        match self {
            Self::MissingClosingSign => "missing closing sign `{}`",
            Self::UnexpectedCharacter | Self::UnexpectedToken => "unexpected token `{}`",

            Self::ErrorDirective | Self::WarningDirective => "{}",
            Self::EndIfNotFound => "`#endif` for `{}` not found",
            Self::UnexpectedElse => "`{}` without an open conditional",
            Self::MissingArgument => "`{}` expects an argument on the same line",
            Self::VariableAlreadyDefined => "variable `{}` already defined",

            Self::UnknownVariable => "unknown preprocessor variable `{}`",
            Self::InvalidOperator => "unknown operator `{}`",
            Self::CantCompareNanValues => "`{}` is not a number",

            Self::ExpectedName => "`{}` declaration is missing a name",

            Self::FileNotFound => "included file `{}` not found",
            Self::IncludeCycle => "`{}` is already included",

            Self::ExtraEndIf | Self::ExpectedProc | Self::ExpectedValue => {
                self.fallback_message()
            }
        }
    }

    /// Render the final message.
    ///
    /// - no arguments → `fallback_message()`
    /// - otherwise → `custom_message()` with each `{}` replaced in order
    pub fn message(&self, arguments: &[String]) -> String {
        if arguments.is_empty() {
            return self.fallback_message().to_string();
        }

        let mut out = String::new();
        let mut args = arguments.iter();
        let mut rest = self.custom_message();
        while let Some(at) = rest.find("{}") {
            out.push_str(&rest[..at]);
            out.push_str(args.next().map_or("", String::as_str));
            rest = &rest[at + 2..];
        }
        out.push_str(rest);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic anchored at a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeIssue {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) position: FilePosition,
    pub(crate) message: String,
    pub(crate) arguments: Vec<String>,
}

impl CodeIssue {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, position: FilePosition) -> Self {
        Self {
            kind,
            range,
            position,
            message: kind.fallback_message().to_string(),
            arguments: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn position(&self) -> FilePosition {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for CodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}: {} [{}]",
            self.severity(),
            self.position,
            self.message,
            self.id()
        )
    }
}
