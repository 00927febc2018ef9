//! A recursive descent parser producing lossless green trees.
//!
//! Parsing never fails. Missing tokens are inserted with zero width, and input
//! the parser cannot make sense of is wrapped in `Unexpected*` nodes, both
//! carrying messages saying what went wrong.

mod declarations;
mod expressions;
mod parser;
mod statements;
mod tokens;
mod types;

#[cfg(test)]
mod tests;

pub use self::tokens::{ArrayTokens, StreamingTokens, TokenSource};

use self::declarations::UNIT;
use self::parser::{Parser, Production};
use super::green::{GreenCache, Node};
use super::lexer::tokenize;

/// How the parser gets its tokens.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TokenSourceKind {
    /// Lex everything up front.
    #[default]
    Array,

    /// Lex tokens as the parser asks for them.
    Streaming,
}

#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub token_source: TokenSourceKind,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streaming(self) -> Self {
        Self { token_source: TokenSourceKind::Streaming }
    }
}

/// Parse a whole compilation unit into a green tree.
pub fn parse_green(text: &str, options: &ParseOptions, cache: &GreenCache) -> Node {
    let root = match options.token_source {
        TokenSourceKind::Array => parse_tokens(ArrayTokens::new(tokenize(text)), cache),
        TokenSourceKind::Streaming => parse_tokens(StreamingTokens::new(text), cache),
    };

    log::debug!(
        "parsed {} bytes ({} cached green nodes)",
        root.width(),
        cache.len()
    );

    root
}

/// Parse a compilation unit from any token source.
pub fn parse_tokens(tokens: impl TokenSource, cache: &GreenCache) -> Node {
    let mut parser = Parser::new(tokens, cache);
    UNIT.parse(&mut parser);
    parser.finish_root()
}
