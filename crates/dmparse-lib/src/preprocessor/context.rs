use std::fmt::Write;
use std::ops::Range;

use indexmap::IndexMap;
use rowan::TextRange;

use crate::syntax::{FilePosition, SyntaxKind, SyntaxToken, TokenStream};

/// State carried from one file to the next.
///
/// Entries own their text, so a context outlives the token stream that built
/// it. Cloning is how a context is forked: preprocessing never mutates the
/// context it was seeded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessorContext {
    /// Path literals following `#include`, quotes included.
    pub includes: Vec<IncludePath>,
    /// Macro name to raw value text (empty when value-less).
    pub defines: IndexMap<String, String>,
    /// Openers of the conditional blocks that are still open, innermost last.
    pub ifs: Vec<OpenConditional>,
}

impl PreprocessorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    /// Defines, then includes, then open conditionals; one per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.defines {
            if value.is_empty() {
                writeln!(out, "#define {name}")
            } else {
                writeln!(out, "#define {name} {value}")
            }
            .expect("String write never fails");
        }
        for include in &self.includes {
            writeln!(out, "#include {} @{}", include.text, include.position)
                .expect("String write never fails");
        }
        for open in &self.ifs {
            writeln!(out, "open {} @{}", open.text, open.position)
                .expect("String write never fails");
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludePath {
    pub text: String,
    pub range: TextRange,
    pub position: FilePosition,
}

impl IncludePath {
    /// Builds the entry from the argument tokens `args` of an `#include` line.
    ///
    /// A quoted path is its first token; a `<lib>` path spans the whole line.
    pub(crate) fn from_arguments(stream: &TokenStream, args: Range<usize>) -> Self {
        let tokens = &stream.tokens()[args.clone()];
        let first = tokens[0];
        let last = match first.kind {
            SyntaxKind::Lesser => tokens[tokens.len() - 1],
            _ => first,
        };
        let end = match first.kind {
            SyntaxKind::Lesser => args.end,
            _ => args.start + 1,
        };
        Self {
            text: stream.span_text(args.start..end).to_string(),
            range: first.range.cover(last.range),
            position: first.position,
        }
    }

    /// Text between the delimiters: `'code/a.dm'` becomes `code/a.dm`.
    pub fn unquoted(&self) -> &str {
        let mut chars = self.text.chars();
        chars.next();
        chars.next_back();
        chars.as_str()
    }

    /// `<lib>` includes name a library, not a file next to the includer.
    pub fn is_library(&self) -> bool {
        self.text.starts_with('<')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenConditional {
    /// `IfDirective`, `IfDefDirective` or `IfNDefDirective`.
    pub kind: SyntaxKind,
    pub text: String,
    pub range: TextRange,
    pub position: FilePosition,
    /// Some branch of the chain was live; later `#else`/`#elif` are dead.
    pub taken: bool,
    /// False when input ended inside one of this chain's dead branches. The
    /// next file then resumes skipping.
    pub live: bool,
}

impl OpenConditional {
    pub(crate) fn from_token(stream: &TokenStream, token: &SyntaxToken) -> Self {
        Self {
            kind: token.kind,
            text: stream.text(token).to_string(),
            range: token.range,
            position: token.position,
            taken: false,
            live: true,
        }
    }
}
