use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use super::{Preorder, SyntaxElement, SyntaxToken, SyntaxVisitor};
use crate::errors::{Diagnostic, Diagnostics};
use crate::once::get_or_compute;
use crate::source::{SourceId, Span};
use crate::syntax::green::Node;
use crate::syntax::Kind;

/// A position-aware view of a green node.
///
/// Red nodes are created on demand as the tree is navigated, and cached in
/// their parent so that navigating to the same position twice gives the very
/// same node, even from different threads. Children are owned by their parent
/// and refer back to it weakly, while every handle keeps the root alive.
#[derive(Clone)]
pub struct SyntaxNode {
    root: Arc<RedData>,
    data: Arc<RedData>,
}

struct RedData {
    green: Node,
    parent: Option<Weak<RedData>>,
    index: usize,

    /// Offset of the start of this node, leading trivia included.
    offset: usize,
    source: SourceId,
    slots: Box<[Slot]>,
    span: OnceLock<Span>,
}

/// Lazily computed information about one child.
#[derive(Default)]
struct Slot {
    offset: OnceLock<usize>,
    node: OnceLock<Arc<RedData>>,
}

impl RedData {
    fn new(
        green: Node,
        parent: Option<Weak<RedData>>,
        index: usize,
        offset: usize,
        source: SourceId,
    ) -> Self {
        let slots = green.children().iter().map(|_| Slot::default()).collect();
        Self { green, parent, index, offset, source, slots, span: OnceLock::new() }
    }
}

impl SyntaxNode {
    pub(crate) fn new_root(green: Node, source: SourceId) -> Self {
        let data = Arc::new(RedData::new(green, None, 0, 0, source));
        Self { root: data.clone(), data }
    }

    pub fn kind(&self) -> Kind {
        self.data.green.kind()
    }

    pub fn green(&self) -> &Node {
        &self.data.green
    }

    pub fn source(&self) -> SourceId {
        self.data.source
    }

    /// The index of this node among the children of its parent.
    pub fn index(&self) -> usize {
        self.data.index
    }

    /// The offset of the start of this node, leading trivia included.
    pub fn offset(&self) -> usize {
        self.data.offset
    }

    /// The span of this node including all of its trivia.
    pub fn full_span(&self) -> Span {
        self.data.source.span(self.data.offset, self.data.offset + self.data.green.width())
    }

    /// The span of this node without the leading trivia of its first token and
    /// the trailing trivia of its last.
    pub fn span(&self) -> Span {
        *get_or_compute(&self.data.span, || {
            let green = &self.data.green;
            let start = self.data.offset + green.leading_trivia_width();
            let end = self.data.offset + green.width() - green.trailing_trivia_width();
            self.data.source.span(start, end.max(start))
        })
    }

    /// The source text of this node, trivia included.
    pub fn text(&self) -> String {
        self.data.green.write()
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        let data = self.data.parent.as_ref()?.upgrade()?;
        Some(SyntaxNode { root: self.root.clone(), data })
    }

    /// The root of the tree this node belongs to.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode { root: self.root.clone(), data: self.root.clone() }
    }

    /// Every proper ancestor of this node, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    pub fn child_count(&self) -> usize {
        self.data.slots.len()
    }

    pub fn child(&self, index: usize) -> Option<SyntaxElement> {
        let green = self.data.green.children().get(index)?;
        let offset = self.child_offset(index);

        if green.is_token() {
            return Some(SyntaxElement::Token(SyntaxToken::new(self.clone(), index, offset)));
        }

        let data = get_or_compute(&self.data.slots[index].node, || {
            let parent = Some(Arc::downgrade(&self.data));
            Arc::new(RedData::new(green.clone(), parent, index, offset, self.data.source))
        });

        Some(SyntaxElement::Node(SyntaxNode { root: self.root.clone(), data: data.clone() }))
    }

    pub fn child_node(&self, index: usize) -> Option<SyntaxNode> {
        self.child(index).and_then(SyntaxElement::into_node)
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        (0..self.child_count()).filter_map(|index| self.child(index))
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.data
            .green
            .children()
            .iter()
            .enumerate()
            .filter(|(_, child)| !child.is_token())
            .filter_map(|(index, _)| self.child_node(index))
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.children().filter_map(SyntaxElement::into_token)
    }

    /// The first direct child token of the given kind.
    pub fn child_token(&self, kind: Kind) -> Option<SyntaxToken> {
        self.child_token_any(&[kind])
    }

    /// The first direct child token of any of the given kinds.
    pub fn child_token_any(&self, kinds: &[Kind]) -> Option<SyntaxToken> {
        let index = self.data.green.children().iter().position(|child| {
            child.is_token() && kinds.contains(&child.kind())
        })?;

        self.child(index).and_then(SyntaxElement::into_token)
    }

    /// This node and every node below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = SyntaxNode> {
        self.preorder().filter_map(SyntaxElement::into_node)
    }

    /// This node and every node and token below it, in preorder.
    pub fn preorder(&self) -> Preorder {
        Preorder::new(SyntaxElement::Node(self.clone()))
    }

    /// Every token in this subtree, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        self.preorder().filter_map(SyntaxElement::into_token)
    }

    /// The narrowest node in this subtree whose full span contains `offset`.
    /// Offsets past the end of the subtree give this node.
    pub fn node_at(&self, offset: usize) -> SyntaxNode {
        let mut node = self.clone();

        loop {
            let next = node.child_nodes().find(|child| child.full_span().contains(offset));
            match next {
                Some(child) => node = child,
                None => break node,
            }
        }
    }

    /// The token in this subtree whose full span contains `offset`.
    pub fn token_at(&self, offset: usize) -> Option<SyntaxToken> {
        let node = self.node_at(offset);
        let found = node.child_tokens().find(|token| token.full_span().contains(offset));
        found
    }

    /// Collect every message in this subtree, in preorder, as located
    /// diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let mut stack = vec![(&self.data.green, self.data.offset)];

        while let Some((node, offset)) = stack.pop() {
            for message in node.messages() {
                let start = offset + message.offset;
                let at = self.data.source.span(start, start + message.width);
                let args = message.args.iter().map(ToString::to_string).collect();
                let _ = diagnostics.add(Diagnostic::new(message.template, at, args));
            }

            let mut child_offset = offset + node.width();
            for child in node.children().iter().rev() {
                child_offset -= child.width();
                stack.push((child, child_offset));
            }
        }

        diagnostics
    }

    pub fn accept<V: SyntaxVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_node(self);
    }

    /// The offset of the child at `index`. Offsets are computed by summing the
    /// widths of the preceding siblings, starting from the nearest child whose
    /// offset is already known, and remembered for every child passed.
    fn child_offset(&self, index: usize) -> usize {
        let slots = &self.data.slots;
        let children = self.data.green.children();

        let (mut at, mut offset) = (0..=index)
            .rev()
            .find_map(|i| slots[i].offset.get().map(|offset| (i, *offset)))
            .unwrap_or((0, self.data.offset));

        while at < index {
            offset += children[at].width();
            at += 1;
            let _ = slots[at].offset.set(offset);
        }

        offset
    }
}

/// Red nodes are equal only if they are the same position in the same tree.
/// Shared green nodes at different positions give distinct red nodes.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.data).hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.full_span();
        write!(f, "{:?}@{}..{}", self.kind(), span.start, span.end)
    }
}
