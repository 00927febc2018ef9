//! The red tree: parent pointers and positions on top of the green tree.

mod node;
mod token;
mod visit;


pub use self::node::SyntaxNode;
pub use self::token::SyntaxToken;
pub use self::visit::{walk_node, SyntaxVisitor};

use crate::source::Span;
use crate::syntax::Kind;

/// Either a node or a token.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Node(node) => node.span(),
            Self::Token(token) => token.span(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            Self::Node(node) => node.full_span(),
            Self::Token(token) => token.full_span(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}

/// A preorder traversal of a subtree.
pub struct Preorder {
    stack: Vec<SyntaxElement>,
}

impl Preorder {
    fn new(start: SyntaxElement) -> Self {
        Self { stack: vec![start] }
    }
}

impl Iterator for Preorder {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;

        if let SyntaxElement::Node(node) = &element {
            let children: Vec<_> = node.children().collect();
            self.stack.extend(children.into_iter().rev());
        }

        Some(element)
    }
}
