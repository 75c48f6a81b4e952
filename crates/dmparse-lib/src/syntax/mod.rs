//! Token model shared by the lexer, preprocessor and parser.

mod kind;
mod token;


pub use kind::{SyntaxKind, TokenSet, token_sets};
pub use token::{FilePosition, SyntaxToken, TokenStream, TriviaRange};
