//! Token kinds for DM source.
//!
//! Logos derives the scanner. Fixed-width tokens (operators, keywords,
//! directives) are plain `#[token]` tables; literal sub-grammars that need
//! escape and nesting bookkeeping are callbacks in [`crate::lexer::scan`].
//! Keywords and directives are declared before the identifier patterns, so
//! the exact word wins over the generic match.

use logos::Logos;
use serde::Serialize;

use crate::lexer::scan::{self, ScanExtras};

/// All token kinds. `#[repr(u8)]` keeps discriminants small for [`TokenSet`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[logos(extras = ScanExtras)]
#[repr(u8)]
pub enum SyntaxKind {
    #[token("/")]
    Slash = 0,

    #[token("/=")]
    SlashEqual,

    #[token("\\")]
    Backslash,

    #[token("\\=")]
    BackslashEqual,

    #[token("(")]
    OpenParenthesis,

    #[token(")")]
    CloseParenthesis,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("?")]
    Question,

    #[token("=")]
    Equal,

    #[token("==")]
    DoubleEqual,

    #[token("!")]
    Exclamation,

    #[token("!=")]
    ExclamationEqual,

    #[token("~")]
    Tilde,

    #[token("~=")]
    TildeEqual,

    #[token("~!")]
    TildeExclamation,

    #[token("+")]
    Plus,

    #[token("++")]
    DoublePlus,

    #[token("+=")]
    PlusEqual,

    #[token("-")]
    Minus,

    #[token("--")]
    DoubleMinus,

    #[token("-=")]
    MinusEqual,

    #[token("*")]
    Asterisk,

    #[token("**")]
    DoubleAsterisk,

    #[token("*=")]
    AsteriskEqual,

    #[token("%")]
    Percent,

    #[token("%=")]
    PercentEqual,

    #[token("&")]
    Ampersand,

    #[token("&&")]
    DoubleAmpersand,

    #[token("&=")]
    AmpersandEqual,

    #[token("|")]
    Bar,

    #[token("||")]
    DoubleBar,

    #[token("|=")]
    BarEqual,

    #[token("^")]
    Caret,

    #[token("^=")]
    CaretEqual,

    #[token("<")]
    Lesser,

    #[token("<<")]
    DoubleLesser,

    #[token("<<=")]
    DoubleLesserEqual,

    #[token("<=")]
    LesserEqual,

    #[token(">")]
    Greater,

    #[token(">>")]
    DoubleGreater,

    #[token(">>=")]
    DoubleGreaterEqual,

    #[token(">=")]
    GreaterEqual,

    /// Lone `@`. Followed by anything it opens a raw text literal, which the
    /// lexer driver scans itself.
    #[token("@")]
    At,

    // --- Literals ---
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// Digits with embedded dots; integer and float are not told apart here.
    #[regex(r"[0-9][0-9.]*")]
    NumericalLiteral,

    /// `"…"`, `{"…"}`, `@X…X`, and the free text after `#warning`/`#error`.
    #[token("\"", scan::quoted_text)]
    #[token("{\"", scan::document_text)]
    TextLiteral,

    #[token("'", scan::path_text)]
    PathLiteral,

    // --- Keywords ---
    #[token("for")]
    ForKeyword,

    #[token("new")]
    NewKeyword,

    #[token("global")]
    GlobalKeyword,

    #[token("throw")]
    ThrowKeyword,

    #[token("catch")]
    CatchKeyword,

    #[token("try")]
    TryKeyword,

    #[token("var")]
    VarKeyword,

    #[token("verb")]
    VerbKeyword,

    #[token("proc")]
    ProcKeyword,

    #[token("in")]
    InKeyword,

    #[token("if")]
    IfKeyword,

    #[token("else")]
    ElseKeyword,

    #[token("set")]
    SetKeyword,

    #[token("as")]
    AsKeyword,

    #[token("while")]
    WhileKeyword,

    #[token("return")]
    ReturnKeyword,

    // --- Preprocessor directives ---
    #[token("#define")]
    DefineDirective,

    #[token("#include")]
    IncludeDirective,

    #[token("#ifdef")]
    IfDefDirective,

    #[token("#ifndef")]
    IfNDefDirective,

    #[token("#endif")]
    EndIfDirective,

    #[token("#undef")]
    UndefDirective,

    #[token("#else")]
    ElseDirective,

    #[token("#if")]
    IfDirective,

    #[token("#elif")]
    ElifDirective,

    #[token("#warning")]
    WarningDirective,

    #[token("#error")]
    ErrorDirective,

    #[token("##")]
    ConcatDirective,

    /// Any other `#word`. Lexer-internal: the driver re-tags it as `Identifier`.
    #[regex(r"#[A-Za-z_][A-Za-z0-9_]*")]
    #[doc(hidden)]
    Directive,

    // --- Trivia ---
    #[regex(r"[ \t\x0B\x0C\x1A\x{A0}\x{FEFF}][ \t]*")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    EndOfLine,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    SingleLineComment,

    #[token("/*", scan::block_comment)]
    MultiLineComment,

    /// `.` is a continuation marker and travels as trivia.
    #[token(".")]
    Dot,

    // --- Sentinels ---
    EndOfFile,

    /// Coalesced run of characters no rule matched.
    Unknown,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | EndOfLine | SingleLineComment | MultiLineComment | Dot
        )
    }

    /// Trivia that may trail a token on its own line.
    #[inline]
    pub fn is_trailing_trivia(self) -> bool {
        matches!(self, Whitespace | Dot)
    }

    #[inline]
    pub fn is_directive(self) -> bool {
        token_sets::DIRECTIVES.contains(self)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        token_sets::KEYWORDS.contains(self)
    }

    /// `var`, `proc` and `verb`: the keywords that switch a declaration's kind.
    #[inline]
    pub fn is_declaration_keyword(self) -> bool {
        matches!(self, VarKeyword | ProcKeyword | VerbKeyword)
    }
}

/// 128-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u8;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u8;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(token_sets::ALL.iter().filter(|k| self.contains(**k)))
            .finish()
    }
}

/// Pre-defined token sets.
pub mod token_sets {
    use super::*;

    pub const KEYWORDS: TokenSet = TokenSet::new(&[
        ForKeyword,
        NewKeyword,
        GlobalKeyword,
        ThrowKeyword,
        CatchKeyword,
        TryKeyword,
        VarKeyword,
        VerbKeyword,
        ProcKeyword,
        InKeyword,
        IfKeyword,
        ElseKeyword,
        SetKeyword,
        AsKeyword,
        WhileKeyword,
        ReturnKeyword,
    ]);

    pub const DIRECTIVES: TokenSet = TokenSet::new(&[
        DefineDirective,
        IncludeDirective,
        IfDefDirective,
        IfNDefDirective,
        EndIfDirective,
        UndefDirective,
        ElseDirective,
        IfDirective,
        ElifDirective,
        WarningDirective,
        ErrorDirective,
        ConcatDirective,
        Directive,
    ]);

    /// Directives that open a conditional chain.
    pub const CONDITIONAL_OPENERS: TokenSet =
        TokenSet::new(&[IfDirective, IfDefDirective, IfNDefDirective]);

    /// Comparison operators understood by `#if`.
    pub const COMPARISONS: TokenSet = TokenSet::new(&[
        DoubleEqual,
        ExclamationEqual,
        Greater,
        GreaterEqual,
        Lesser,
        LesserEqual,
    ]);

    pub const OPENING_BRACKETS: TokenSet =
        TokenSet::new(&[OpenParenthesis, OpenBracket, OpenBrace]);

    pub const CLOSING_BRACKETS: TokenSet =
        TokenSet::new(&[CloseParenthesis, CloseBracket, CloseBrace]);

    /// Every kind, in discriminant order. Used for `Debug` of [`TokenSet`].
    pub(super) const ALL: &[SyntaxKind] = &[
        Slash,
        SlashEqual,
        Backslash,
        BackslashEqual,
        OpenParenthesis,
        CloseParenthesis,
        OpenBracket,
        CloseBracket,
        OpenBrace,
        CloseBrace,
        Comma,
        Colon,
        Semicolon,
        Question,
        Equal,
        DoubleEqual,
        Exclamation,
        ExclamationEqual,
        Tilde,
        TildeEqual,
        TildeExclamation,
        Plus,
        DoublePlus,
        PlusEqual,
        Minus,
        DoubleMinus,
        MinusEqual,
        Asterisk,
        DoubleAsterisk,
        AsteriskEqual,
        Percent,
        PercentEqual,
        Ampersand,
        DoubleAmpersand,
        AmpersandEqual,
        Bar,
        DoubleBar,
        BarEqual,
        Caret,
        CaretEqual,
        Lesser,
        DoubleLesser,
        DoubleLesserEqual,
        LesserEqual,
        Greater,
        DoubleGreater,
        DoubleGreaterEqual,
        GreaterEqual,
        At,
        Identifier,
        NumericalLiteral,
        TextLiteral,
        PathLiteral,
        ForKeyword,
        NewKeyword,
        GlobalKeyword,
        ThrowKeyword,
        CatchKeyword,
        TryKeyword,
        VarKeyword,
        VerbKeyword,
        ProcKeyword,
        InKeyword,
        IfKeyword,
        ElseKeyword,
        SetKeyword,
        AsKeyword,
        WhileKeyword,
        ReturnKeyword,
        DefineDirective,
        IncludeDirective,
        IfDefDirective,
        IfNDefDirective,
        EndIfDirective,
        UndefDirective,
        ElseDirective,
        IfDirective,
        ElifDirective,
        WarningDirective,
        ErrorDirective,
        ConcatDirective,
        Directive,
        Whitespace,
        EndOfLine,
        SingleLineComment,
        MultiLineComment,
        Dot,
        EndOfFile,
        Unknown,
    ];
}
