//! Tokens with attached trivia.
//!
//! A [`TokenStream`] owns the source text, the significant tokens and an arena
//! of trivia tokens. Each significant token addresses its leading and trailing
//! trivia as index ranges into that arena, so trivia is owned by exactly one
//! token and "next" traversal is plain indexing.

use std::fmt::Write;
use std::ops::Range;

use rowan::{TextRange, TextSize};
use serde::Serialize;

use super::SyntaxKind;

/// 1-based line and column. Tabs advance the column by the configured tab width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FilePosition {
    pub line: u32,
    pub column: u32,
}

impl FilePosition {
    pub const START: FilePosition = FilePosition { line: 1, column: 1 };
}

impl Default for FilePosition {
    fn default() -> Self {
        Self::START
    }
}

impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Index range into the trivia arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriviaRange {
    start: u32,
    end: u32,
}

impl TriviaRange {
    pub(crate) fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start as u32,
            end: range.end as u32,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    fn as_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Zero-copy token: kind, span and trivia indices. Text is sliced from the
/// owning [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub position: FilePosition,
    /// First significant token on its line.
    pub line_start: bool,
    pub(crate) leads: TriviaRange,
    pub(crate) trails: TriviaRange,
}

impl SyntaxToken {
    pub(crate) fn new(kind: SyntaxKind, range: TextRange, position: FilePosition) -> Self {
        Self {
            kind,
            range,
            position,
            line_start: false,
            leads: TriviaRange::default(),
            trails: TriviaRange::default(),
        }
    }

    /// Absolute byte offset of the token text.
    #[inline]
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn leads_range(&self) -> TriviaRange {
        self.leads
    }

    pub fn trails_range(&self) -> TriviaRange {
        self.trails
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    source: String,
    tokens: Vec<SyntaxToken>,
    trivia: Vec<SyntaxToken>,
}

impl TokenStream {
    pub(crate) fn new(source: String, tokens: Vec<SyntaxToken>, trivia: Vec<SyntaxToken>) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(SyntaxKind::EndOfFile),
            "token stream must end with EndOfFile"
        );
        Self {
            source,
            tokens,
            trivia,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Significant tokens, ending with exactly one `EndOfFile`.
    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SyntaxToken> {
        self.tokens.get(index)
    }

    pub fn eof(&self) -> &SyntaxToken {
        &self.tokens[self.tokens.len() - 1]
    }

    #[inline]
    pub fn text(&self, token: &SyntaxToken) -> &str {
        &self.source[Range::<usize>::from(token.range)]
    }

    pub fn leads(&self, token: &SyntaxToken) -> &[SyntaxToken] {
        &self.trivia[token.leads.as_range()]
    }

    pub fn trails(&self, token: &SyntaxToken) -> &[SyntaxToken] {
        &self.trivia[token.trails.as_range()]
    }

    /// Span of leads, token and trails together.
    pub fn full_range(&self, token: &SyntaxToken) -> TextRange {
        let start = self
            .leads(token)
            .first()
            .map_or(token.range.start(), |t| t.range.start());
        let end = self
            .trails(token)
            .last()
            .map_or(token.range.end(), |t| t.range.end());
        TextRange::new(start, end)
    }

    /// Lead texts, token text and trail texts. Concatenated over the whole
    /// stream this reproduces the source exactly.
    pub fn full_text(&self, token: &SyntaxToken) -> &str {
        &self.source[Range::<usize>::from(self.full_range(token))]
    }

    /// True when an end-of-line appears in the token's leads.
    pub fn follows_line_break(&self, token: &SyntaxToken) -> bool {
        self.leads(token)
            .iter()
            .any(|t| t.kind == SyntaxKind::EndOfLine)
    }

    /// Index one past the last token of the logical line starting at `from`.
    ///
    /// A `\` at the very end of a line continues it onto the next one.
    pub fn line_end(&self, from: usize) -> usize {
        let mut end = from + 1;
        while let Some(token) = self.tokens.get(end) {
            if token.kind == SyntaxKind::EndOfFile {
                break;
            }
            if self.follows_line_break(token) && self.tokens[end - 1].kind != SyntaxKind::Backslash
            {
                break;
            }
            end += 1;
        }
        end.min(self.tokens.len())
    }

    /// Source text covered by tokens `range`, without outer trivia.
    pub fn span_text(&self, range: Range<usize>) -> &str {
        if range.is_empty() {
            return "";
        }
        let start = self.tokens[range.start].range.start();
        let end = self.tokens[range.end - 1].range.end();
        &self.source[Range::<usize>::from(TextRange::new(start, end))]
    }

    /// One line per token, trivia indented beneath it.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            for lead in self.leads(token) {
                self.dump_token(&mut out, "  lead ", lead);
            }
            self.dump_token(&mut out, "", token);
            for trail in self.trails(token) {
                self.dump_token(&mut out, "  trail ", trail);
            }
        }
        out
    }

    fn dump_token(&self, out: &mut String, prefix: &str, token: &SyntaxToken) {
        let start = u32::from(token.range.start());
        let end = u32::from(token.range.end());
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{prefix}{:?}@{start}..{end} {:?} {}",
            token.kind,
            self.text(token),
            token.position
        );
    }
}
