//! Literal sub-grammars.
//!
//! Logos hands these callbacks control right after the opening sign. Each one
//! walks the remainder with a byte [`Cursor`], bumps the lexer past whatever it
//! consumed, and records a missing closing sign in [`ScanExtras`] instead of
//! failing: an unterminated literal simply runs to the end of input.
//!
//! Escape parity: a backslash always swallows the next byte, so a run of `k`
//! backslashes escapes the following character exactly when `k` is odd.

use logos::Lexer;

use crate::cursor::Cursor;
use crate::syntax::SyntaxKind;

/// Lexer state shared with callbacks.
#[derive(Debug, Default)]
pub struct ScanExtras {
    /// Opening sign of the literal just scanned, when its closing sign is missing.
    pub unterminated: Option<&'static str>,
}

pub(crate) fn quoted_text(lex: &mut Lexer<'_, SyntaxKind>) {
    let mut cursor = Cursor::new(lex.remainder().as_bytes());
    let mut interpolation = 0u32;

    let closed = loop {
        let Some(b) = cursor.read() else {
            break false;
        };
        match b {
            b'\\' => cursor.advance(),
            b'[' => interpolation += 1,
            b']' => interpolation = interpolation.saturating_sub(1),
            b'"' if interpolation == 0 => break true,
            _ => {}
        }
    };

    finish(lex, &cursor, closed, "\"");
}

/// `{"…"}`: braces nest (outside interpolation), starting from the opening one.
pub(crate) fn document_text(lex: &mut Lexer<'_, SyntaxKind>) {
    let mut cursor = Cursor::new(lex.remainder().as_bytes());
    let mut interpolation = 0u32;
    let mut braces = 1u32;

    let closed = loop {
        let Some(b) = cursor.read() else {
            break false;
        };
        match b {
            b'\\' => cursor.advance(),
            b'[' => interpolation += 1,
            b']' => interpolation = interpolation.saturating_sub(1),
            b'{' if interpolation == 0 => braces += 1,
            b'}' if interpolation == 0 => {
                braces -= 1;
                if braces == 0 {
                    break true;
                }
            }
            _ => {}
        }
    };

    finish(lex, &cursor, closed, "{\"");
}

pub(crate) fn path_text(lex: &mut Lexer<'_, SyntaxKind>) {
    let mut cursor = Cursor::new(lex.remainder().as_bytes());

    let closed = loop {
        match cursor.read() {
            None => break false,
            Some(b'\\') => cursor.advance(),
            Some(b'\'') => break true,
            Some(_) => {}
        }
    };

    finish(lex, &cursor, closed, "'");
}

pub(crate) fn block_comment(lex: &mut Lexer<'_, SyntaxKind>) {
    let mut cursor = Cursor::new(lex.remainder().as_bytes());

    let closed = loop {
        if cursor.at_seq(b"*/") {
            cursor.advance_by(2);
            break true;
        }
        if cursor.read().is_none() {
            break false;
        }
    };

    finish(lex, &cursor, closed, "/*");
}

/// Length in bytes of a raw literal body `X…X` (the text after `@`), and
/// whether the closing delimiter was found.
///
/// The delimiter is whatever character follows `@`; bracket-like openers
/// close with their pair.
pub(crate) fn raw_text_len(rest: &str) -> (usize, bool) {
    let Some(open) = rest.chars().next() else {
        return (0, false);
    };
    let close = match open {
        '[' => ']',
        '{' => '}',
        '(' => ')',
        '<' => '>',
        c => c,
    };

    let mut buf = [0u8; 4];
    let close = close.encode_utf8(&mut buf).as_bytes();
    let mut cursor = Cursor::at(rest.as_bytes(), open.len_utf8());

    loop {
        if cursor.at_seq(close) {
            return (cursor.offset() + close.len(), true);
        }
        match cursor.read() {
            None => return (cursor.offset(), false),
            Some(b'\\') => cursor.advance(),
            Some(_) => {}
        }
    }
}

fn finish(
    lex: &mut Lexer<'_, SyntaxKind>,
    cursor: &Cursor<'_, u8>,
    closed: bool,
    sign: &'static str,
) {
    lex.bump(cursor.offset());
    if !closed {
        lex.extras.unterminated = Some(sign);
    }
}
