//! Conditional compilation over a token stream.
//!
//! The preprocessor never creates or deletes tokens. It reads directive lines,
//! accumulates a [`PreprocessorContext`], and reports which token ranges sit in
//! dead branches so the parser can ignore them. Macro expansion is not
//! performed: defines only feed `#if` evaluation and `#ifdef` checks.
//!
//! Directive arguments live on the directive's line; a `\` at the end of a
//! line continues it.

mod context;
mod expr;


use std::ops::Range;

use crate::cursor::Cursor;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{SyntaxKind, SyntaxToken, TokenStream, token_sets};

pub use context::{IncludePath, OpenConditional, PreprocessorContext};

use expr::Condition;

#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub context: PreprocessorContext,
    pub diagnostics: Diagnostics,
    /// Token index ranges inside dead branches, in order.
    pub inactive: Vec<Range<usize>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Runs over `tokens`, starting from a fork of `context` (or an empty one).
    pub fn preprocess(
        &self,
        tokens: &TokenStream,
        context: Option<&PreprocessorContext>,
    ) -> Preprocessed {
        let context = context.cloned().unwrap_or_default();
        let inherited = context.ifs.len();
        let resume_dead = context.ifs.last().is_some_and(|open| !open.live);
        let mut run = Run {
            stream: tokens,
            cursor: Cursor::new(tokens.tokens()),
            inherited,
            context,
            diagnostics: Diagnostics::new(),
            inactive: Vec::new(),
        };
        if resume_dead {
            run.skip_from(0);
        }
        run.run();
        run.finish()
    }
}

struct Run<'t> {
    stream: &'t TokenStream,
    cursor: Cursor<'t, SyntaxToken>,
    context: PreprocessorContext,
    inherited: usize,
    diagnostics: Diagnostics,
    inactive: Vec<Range<usize>>,
}

impl Run<'_> {
    fn run(&mut self) {
        while let Some(token) = self.cursor.peek() {
            let index = self.cursor.offset();
            match token.kind {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::DefineDirective => self.define(index),
                SyntaxKind::UndefDirective => self.undef(index),
                SyntaxKind::IncludeDirective => self.include(index),
                SyntaxKind::IfDefDirective | SyntaxKind::IfNDefDirective => self.ifdef(index),
                SyntaxKind::IfDirective => self.if_(index),
                SyntaxKind::ElifDirective => self.elif(index),
                SyntaxKind::ElseDirective => self.else_(index),
                SyntaxKind::EndIfDirective => self.endif(index),
                SyntaxKind::WarningDirective => self.message(index, DiagnosticKind::WarningDirective),
                SyntaxKind::ErrorDirective => self.message(index, DiagnosticKind::ErrorDirective),
                _ => self.cursor.advance(),
            }
        }
    }

    fn finish(mut self) -> Preprocessed {
        for open in &self.context.ifs[self.inherited.min(self.context.ifs.len())..] {
            self.diagnostics
                .report_range(DiagnosticKind::EndIfNotFound, open.range, open.position)
                .argument(open.text.as_str())
                .emit();
        }
        Preprocessed {
            context: self.context,
            diagnostics: self.diagnostics,
            inactive: self.inactive,
        }
    }

    /// Tokens after the directive at `index` on its logical line.
    fn arguments(&self, index: usize) -> Range<usize> {
        index + 1..self.stream.line_end(index)
    }

    fn token(&self, index: usize) -> SyntaxToken {
        self.stream.tokens()[index]
    }

    fn text(&self, index: usize) -> &str {
        self.stream.text(&self.stream.tokens()[index])
    }

    /// Moves past the directive line starting at `index`.
    fn skip_line(&mut self, index: usize) {
        self.cursor = Cursor::at(self.stream.tokens(), self.stream.line_end(index));
    }

    /// First argument of the directive at `index`, or a `missing-argument` issue.
    fn required_argument(&mut self, index: usize) -> Option<usize> {
        let args = self.arguments(index);
        if args.is_empty() {
            let directive = self.token(index);
            let text = self.text(index).to_owned();
            self.diagnostics
                .report(DiagnosticKind::MissingArgument, &directive)
                .argument(text)
                .emit();
            return None;
        }
        Some(args.start)
    }

    fn define(&mut self, index: usize) {
        self.skip_line(index);
        let Some(name_index) = self.required_argument(index) else {
            return;
        };

        let args = self.arguments(index);
        let name = self.text(name_index).to_owned();
        let value = self.stream.span_text(name_index + 1..args.end).to_owned();

        if self.context.defines.contains_key(&name) {
            let token = self.token(name_index);
            self.diagnostics
                .report(DiagnosticKind::VariableAlreadyDefined, &token)
                .argument(name)
                .emit();
            return;
        }

        tracing::trace!(%name, %value, "define");
        self.context.defines.insert(name, value);
    }

    fn undef(&mut self, index: usize) {
        self.skip_line(index);
        let Some(name_index) = self.required_argument(index) else {
            return;
        };
        let name = self.text(name_index).to_owned();
        self.context.defines.shift_remove(&name);
    }

    fn include(&mut self, index: usize) {
        self.skip_line(index);
        if self.required_argument(index).is_none() {
            return;
        }
        let include = IncludePath::from_arguments(self.stream, self.arguments(index));
        self.context.includes.push(include);
    }

    fn message(&mut self, index: usize, kind: DiagnosticKind) {
        self.skip_line(index);
        let args = self.arguments(index);
        let directive = self.token(index);

        let builder = match args.is_empty() {
            true => self.diagnostics.report(kind, &directive),
            false => {
                let tail = self.stream.tokens()[args.start];
                let text = self.stream.span_text(args);
                self.diagnostics.report(kind, &tail).argument(text)
            }
        };
        builder.emit();
    }

    fn ifdef(&mut self, index: usize) {
        self.skip_line(index);
        self.open(index);

        let condition = match self.required_argument(index) {
            Some(name_index) => {
                let defined = self.context.is_defined(self.text(name_index));
                defined == (self.token(index).kind == SyntaxKind::IfDefDirective)
            }
            None => false,
        };
        self.branch(index, condition);
    }

    fn if_(&mut self, index: usize) {
        self.skip_line(index);
        self.open(index);
        let condition = self.condition(index);
        self.branch(index, condition);
    }

    fn elif(&mut self, index: usize) {
        self.skip_line(index);
        let Some(taken) = self.context.ifs.last().map(|open| open.taken) else {
            self.unexpected_else(index);
            return;
        };

        if taken {
            self.skip_block(index);
        } else {
            let condition = self.condition(index);
            self.branch(index, condition);
        }
    }

    fn else_(&mut self, index: usize) {
        self.skip_line(index);
        let Some(taken) = self.context.ifs.last_mut().map(|open| &mut open.taken) else {
            self.unexpected_else(index);
            return;
        };

        if *taken {
            self.skip_block(index);
        } else {
            *taken = true;
        }
    }

    fn endif(&mut self, index: usize) {
        self.skip_line(index);
        if self.context.ifs.pop().is_none() {
            let token = self.token(index);
            self.diagnostics
                .report(DiagnosticKind::ExtraEndIf, &token)
                .emit();
            return;
        }
        self.inherited = self.inherited.min(self.context.ifs.len());
    }

    fn open(&mut self, index: usize) {
        let opener = OpenConditional::from_token(self.stream, &self.token(index));
        self.context.ifs.push(opener);
    }

    fn condition(&mut self, index: usize) -> bool {
        let directive = self.token(index);
        let args = self.arguments(index);
        let mut condition = Condition {
            stream: self.stream,
            directive: &directive,
            defines: &self.context.defines,
            diagnostics: &mut self.diagnostics,
        };
        condition.evaluate(&self.stream.tokens()[args])
    }

    /// Enters the branch after the directive at `index` when `condition`
    /// holds, otherwise skips to the next branch boundary.
    fn branch(&mut self, index: usize, condition: bool) {
        if condition {
            if let Some(open) = self.context.ifs.last_mut() {
                open.taken = true;
            }
        } else {
            self.skip_block(index);
        }
    }

    fn unexpected_else(&mut self, index: usize) {
        let token = self.token(index);
        let text = self.text(index).to_owned();
        self.diagnostics
            .report(DiagnosticKind::UnexpectedElse, &token)
            .argument(text)
            .emit();
    }

    /// Skips the dead branch opened by the directive at `index`, stopping
    /// before the `#else`/`#elif`/`#endif` that ends it.
    fn skip_block(&mut self, index: usize) {
        tracing::trace!(
            directive = self.text(index),
            line = self.token(index).position.line,
            "dead branch"
        );
        self.skip_from(self.stream.line_end(index));
    }

    /// Skips from token `start` to the next branch boundary of the innermost
    /// open conditional.
    ///
    /// Conditionals nested inside the dead branch are skipped whole: their own
    /// `#else`/`#endif` do not end the outer branch. Reaching end of input
    /// leaves the innermost conditional dead for the next file.
    fn skip_from(&mut self, start: usize) {
        let mut cursor = Cursor::at(self.stream.tokens(), start);
        let mut depth = 0usize;

        let reached_end = loop {
            let Some(token) = cursor.peek() else {
                break true;
            };
            match token.kind {
                SyntaxKind::EndOfFile => break true,
                kind if token_sets::CONDITIONAL_OPENERS.contains(kind) => depth += 1,
                SyntaxKind::ElseDirective | SyntaxKind::ElifDirective if depth == 0 => break false,
                SyntaxKind::EndIfDirective if depth == 0 => break false,
                SyntaxKind::EndIfDirective => depth -= 1,
                _ => {}
            }
            cursor.advance();
        };

        let end = cursor.offset();
        tracing::trace!(tokens = end - start, reached_end, "skipping inactive block");
        if start < end {
            self.inactive.push(start..end);
        }
        if let Some(open) = self.context.ifs.last_mut() {
            open.live = !reached_end;
        }
        self.cursor = cursor;
    }
}
