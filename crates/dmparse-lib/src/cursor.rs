//! Lookahead buffer shared by every stage.
//!
//! The lexer's literal scanners run a `Cursor<u8>` over the unlexed remainder,
//! trivia attachment walks a `Cursor<SyntaxToken>` over raw tokens, and the
//! preprocessor and parser walk significant tokens the same way.
//!
//! Reading past the end never panics: `peek` returns `None`, so callers can
//! `match` on lookahead without bounds checks.

#[derive(Debug, Clone)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    offset: usize,
    start: usize,
}

impl<'a, T: Copy> Cursor<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            offset: 0,
            start: 0,
        }
    }

    /// Starts at `offset` instead of the beginning.
    pub fn at(items: &'a [T], offset: usize) -> Self {
        let offset = offset.min(items.len());
        Self {
            items,
            offset,
            start: offset,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<T> {
        self.peek_nth(0)
    }

    /// Element `n` positions past the current one (`peek_nth(0) == peek()`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<T> {
        self.items.get(self.offset + n).copied()
    }

    /// Element just before the current one, if any.
    pub fn previous(&self) -> Option<T> {
        self.offset
            .checked_sub(1)
            .and_then(|i| self.items.get(i).copied())
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    pub fn advance_by(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.items.len());
    }

    pub fn read(&mut self) -> Option<T> {
        let item = self.peek()?;
        self.advance();
        Some(item)
    }

    /// Advances while `pred` holds, returning how many elements were consumed.
    pub fn bump_while(&mut self, mut pred: impl FnMut(T) -> bool) -> usize {
        let from = self.offset;
        while let Some(item) = self.peek() {
            if !pred(item) {
                break;
            }
            self.advance();
        }
        self.offset - from
    }

    /// Marks the current position as the beginning of the next lexeme.
    #[inline]
    pub fn start(&mut self) {
        self.start = self.offset;
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.offset >= self.items.len()
    }

    /// Elements consumed since the last [`start`](Self::start).
    pub fn lexeme(&self) -> &'a [T] {
        &self.items[self.start..self.offset]
    }

    /// Start offset of the current lexeme.
    #[inline]
    pub fn position(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> &'a [T] {
        &self.items[self.offset..]
    }
}

impl<T: Copy + PartialEq> Cursor<'_, T> {
    /// True when the remaining input begins with `prefix`.
    pub fn at_seq(&self, prefix: &[T]) -> bool {
        self.remaining().starts_with(prefix)
    }
}
