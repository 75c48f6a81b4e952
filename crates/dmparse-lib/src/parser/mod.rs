//! Declaration parser.
//!
//! Builds a flat list of top-level declarations (types, vars, procs and
//! verbs) from a preprocessed token stream. Statement and expression bodies
//! are skipped, not parsed.
//!
//! # Recovery Strategy
//!
//! The parser always reaches `EndOfFile`:
//!
//! 1. An unexpected token is reported and the rest of its line is skipped
//! 2. A doubled `/` is reported and ignored
//! 3. A `var`/`proc`/`verb` keyword that never gets a name is reported
//!
//! Fuel exhaustion and broken invariants return an actual error immediately.

pub mod ast;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod parser_tests;

use std::ops::Range;

pub use ast::{
    CompilationUnit, Declaration, DeclarationKind, ProcDeclaration, TypeDeclaration,
    VariableDeclaration, VerbDeclaration,
};
pub use core::{ParseResult, Parser};

use crate::PassResult;
use crate::syntax::TokenStream;

/// Parses `stream`, ignoring the `inactive` token ranges. Returns Err on fuel exhaustion.
pub fn parse(
    stream: &TokenStream,
    inactive: &[Range<usize>],
    exec_fuel: Option<u32>,
) -> PassResult<CompilationUnit> {
    let result = Parser::new(stream)
        .with_inactive(inactive)
        .with_exec_fuel(exec_fuel)
        .parse()?;
    Ok((result.unit, result.diagnostics))
}
