pub use self::cache::GreenCache;

mod cache;
mod checks;
mod debug;

use std::sync::Arc;

use smol_str::SmolStr;

use super::{Kind, TriviaKind};
use crate::errors::Template;

/// A green node is a lossless and immutable syntax tree facilitating sharing.
/// Each node stores its total width in bytes, including trivia, but neither its
/// position nor its parent. Identical subtrees may therefore be shared freely
/// between positions and even between trees.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Node {
    /// The total width of this node. This must be the equal to
    /// `self.data.width()`.
    pub(crate) width: usize,
    pub(crate) kind: Kind,
    pub(crate) data: Data,
}

/// A node contains either a token or a set of children.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Data {
    Tree(Arc<Tree>),
    Token(Arc<Token>),
}

/// The children of an inner node, along with any messages explaining why the
/// node exists (for the error recovery node kinds).
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct Tree {
    pub(crate) children: Box<[Node]>,
    pub(crate) messages: Box<[SyntaxMessage]>,
}

/// A single token, with the trivia surrounding it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub(crate) text: SmolStr,

    /// The processed value of literal tokens, such as a string with its escape
    /// sequences resolved.
    pub(crate) value: Option<SmolStr>,
    pub(crate) leading: Box<[Trivia]>,
    pub(crate) trailing: Box<[Trivia]>,
    pub(crate) messages: Box<[SyntaxMessage]>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: SmolStr,
}

/// A diagnostic attached to a green node. Its position is relative to the
/// start of the node it is attached to (including leading trivia), so it stays
/// valid wherever the node ends up.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SyntaxMessage {
    pub template: &'static Template,
    pub args: Box<[SmolStr]>,
    pub offset: usize,
    pub width: usize,
}

impl SyntaxMessage {
    pub fn new<S: Into<SmolStr>>(
        template: &'static Template,
        args: impl IntoIterator<Item = S>,
    ) -> Self {
        Self { template, args: args.into_iter().map(Into::into).collect(), offset: 0, width: 0 }
    }

    pub fn bare(template: &'static Template) -> Self {
        Self::new(template, [] as [SmolStr; 0])
    }

    pub fn at(self, offset: usize, width: usize) -> Self {
        Self { offset, width, ..self }
    }
}

impl Node {
    pub fn tree(kind: Kind, children: impl IntoIterator<Item = Node>) -> Self {
        Self::tree_with_messages(kind, children, [])
    }

    pub fn tree_with_messages(
        kind: Kind,
        children: impl IntoIterator<Item = Node>,
        messages: impl IntoIterator<Item = SyntaxMessage>,
    ) -> Self {
        debug_assert!(!kind.is_token(), "{kind:?} is a token kind");
        let children: Box<[Node]> = children.into_iter().collect();
        let width = children.iter().map(|node| node.width).sum();

        Self {
            width,
            kind,
            data: Data::Tree(Arc::new(Tree { children, messages: messages.into_iter().collect() })),
        }
    }

    pub fn token(kind: Kind, token: Token) -> Self {
        debug_assert!(kind.is_token(), "{kind:?} is a node kind");
        Self { width: token.full_width(), kind, data: Data::Token(Arc::new(token)) }
    }

    /// A zero-width token standing in for one the parser expected but did not
    /// find.
    pub fn missing(kind: Kind, message: SyntaxMessage) -> Self {
        Self::token(kind, Token { messages: Box::new([message.at(0, 0)]), ..Token::new("") })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn children(&self) -> &[Node] {
        match &self.data {
            Data::Tree(tree) => &tree.children,
            Data::Token(_) => &[],
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match &self.data {
            Data::Token(token) => Some(token),
            Data::Tree(_) => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self.data, Data::Token(_))
    }

    /// Messages attached directly to this node, not to any of its children.
    pub fn messages(&self) -> &[SyntaxMessage] {
        match &self.data {
            Data::Tree(tree) => &tree.messages,
            Data::Token(token) => &token.messages,
        }
    }

    /// Returns `true` if this is a token inserted by the parser in place of a
    /// missing one.
    pub fn is_missing(&self) -> bool {
        self.as_token()
            .is_some_and(|token| token.text.is_empty() && self.kind != Kind::EndOfInput)
    }

    /// Returns `true` if `self` and `other` are the very same allocation, as
    /// opposed to merely being structurally equal.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (&self.data, &other.data) {
            (Data::Tree(a), Data::Tree(b)) => Arc::ptr_eq(a, b),
            (Data::Token(a), Data::Token(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// An address identifying the allocation of this node.
    pub fn address(&self) -> usize {
        match &self.data {
            Data::Tree(tree) => Arc::as_ptr(tree) as usize,
            Data::Token(token) => Arc::as_ptr(token) as usize,
        }
    }

    /// The same node with one more message attached.
    pub fn with_message(&self, message: SyntaxMessage) -> Node {
        match &self.data {
            Data::Tree(tree) => {
                let messages = tree.messages.iter().cloned().chain([message]);
                Node::tree_with_messages(self.kind, tree.children.iter().cloned(), messages)
            }

            Data::Token(token) => {
                let messages = token.messages.iter().cloned().chain([message]).collect();
                Node::token(self.kind, Token { messages, ..(**token).clone() })
            }
        }
    }

    /// The first token in this subtree, in source order.
    pub fn first_token(&self) -> Option<&Token> {
        match &self.data {
            Data::Token(token) => Some(token),
            Data::Tree(tree) => tree.children.iter().find_map(Node::first_token),
        }
    }

    /// The last token in this subtree, in source order.
    pub fn last_token(&self) -> Option<&Token> {
        match &self.data {
            Data::Token(token) => Some(token),
            Data::Tree(tree) => tree.children.iter().rev().find_map(Node::last_token),
        }
    }

    /// The width of the leading trivia of the first token in this subtree.
    pub fn leading_trivia_width(&self) -> usize {
        self.first_token().map_or(0, Token::leading_width)
    }

    /// The width of the trailing trivia of the last token in this subtree.
    pub fn trailing_trivia_width(&self) -> usize {
        self.last_token().map_or(0, Token::trailing_width)
    }
}

impl Token {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            value: None,
            leading: Box::new([]),
            trailing: Box::new([]),
            messages: Box::new([]),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn leading(&self) -> &[Trivia] {
        &self.leading
    }

    pub fn trailing(&self) -> &[Trivia] {
        &self.trailing
    }

    pub fn leading_width(&self) -> usize {
        self.leading.iter().map(|trivia| trivia.text.len()).sum()
    }

    pub fn trailing_width(&self) -> usize {
        self.trailing.iter().map(|trivia| trivia.text.len()).sum()
    }

    pub fn full_width(&self) -> usize {
        self.leading_width() + self.text.len() + self.trailing_width()
    }
}
