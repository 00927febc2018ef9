//! Lexing and parsing into lossless syntax trees.

pub mod ast;
pub mod green;
mod kind;
pub mod lexer;
mod parse;
pub mod red;
mod tree;

#[cfg(test)]
mod tests;

pub use self::kind::{Kind, TriviaKind};
pub use self::parse::{
    parse_green, parse_tokens, ArrayTokens, ParseOptions, StreamingTokens, TokenSource,
    TokenSourceKind,
};
pub use self::red::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxVisitor};
pub use self::tree::{parse, SyntaxTree};
