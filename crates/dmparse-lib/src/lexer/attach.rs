//! Trivia attachment.
//!
//! Leads are collected greedily: every trivia token before a significant token
//! belongs to it. Trails only take whitespace and `.` markers, stopping at a
//! line end or a comment, so a comment always leads the token after it and a
//! token never owns trivia from the next line. Whatever trivia remains at the
//! end of input leads the `EndOfFile` token.

use rowan::TextRange;

use crate::cursor::Cursor;
use crate::syntax::{FilePosition, SyntaxKind, SyntaxToken, TriviaRange};

pub(super) fn attach_trivia(
    raw: &[SyntaxToken],
    (eof_position, eof_range): (FilePosition, TextRange),
) -> (Vec<SyntaxToken>, Vec<SyntaxToken>) {
    let mut cursor = Cursor::new(raw);
    let mut tokens = Vec::new();
    let mut trivia = Vec::new();
    let mut line_start = true;

    loop {
        let leads_start = trivia.len();
        while let Some(t) = cursor.peek().filter(|t| t.kind.is_trivia()) {
            line_start |= t.kind == SyntaxKind::EndOfLine;
            trivia.push(t);
            cursor.advance();
        }
        let leads = TriviaRange::new(leads_start..trivia.len());

        let Some(mut token) = cursor.read() else {
            let mut eof = SyntaxToken::new(SyntaxKind::EndOfFile, eof_range, eof_position);
            eof.leads = leads;
            eof.line_start = line_start;
            tokens.push(eof);
            break;
        };

        let trails_start = trivia.len();
        while let Some(t) = cursor.peek().filter(|t| t.kind.is_trailing_trivia()) {
            trivia.push(t);
            cursor.advance();
        }

        token.leads = leads;
        token.trails = TriviaRange::new(trails_start..trivia.len());
        token.line_start = line_start;
        tokens.push(token);
        line_start = false;
    }

    (tokens, trivia)
}
