use std::fmt;

use super::SyntaxNode;
use crate::source::Span;
use crate::syntax::green::{Node, Token, Trivia};
use crate::syntax::Kind;

/// A position-aware view of a green token. Tokens are not cached; they are
/// identified by their parent and their index in it.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: usize,
    offset: usize,
}

impl SyntaxToken {
    pub(super) fn new(parent: SyntaxNode, index: usize, offset: usize) -> Self {
        Self { parent, index, offset }
    }

    pub fn kind(&self) -> Kind {
        self.green().kind()
    }

    pub fn green(&self) -> &Node {
        &self.parent.green().children()[self.index]
    }

    fn token(&self) -> &Token {
        self.green().as_token().expect("token elements always hold green tokens")
    }

    pub fn text(&self) -> &str {
        self.token().text()
    }

    /// The processed value of a literal, if it has one.
    pub fn value(&self) -> Option<&str> {
        self.token().value()
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        self.token().leading()
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.token().trailing()
    }

    pub fn parent(&self) -> &SyntaxNode {
        &self.parent
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the parser inserted this token in place of a missing
    /// one.
    pub fn is_missing(&self) -> bool {
        self.green().is_missing()
    }

    /// The span of the text of this token.
    pub fn span(&self) -> Span {
        let start = self.offset + self.token().leading_width();
        self.parent.source().span(start, start + self.text().len())
    }

    /// The span of this token with its trivia.
    pub fn full_span(&self) -> Span {
        self.parent.source().span(self.offset, self.offset + self.green().width())
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{:?}@{}..{} {:?}", self.kind(), span.start, span.end, self.text())
    }
}
