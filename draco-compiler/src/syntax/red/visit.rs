use super::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Walks a red tree. By default every node is descended into and tokens are
/// ignored; override [`SyntaxVisitor::visit_node`] and call [`walk_node`] to
/// keep descending.
pub trait SyntaxVisitor {
    fn visit_node(&mut self, node: &SyntaxNode) {
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &SyntaxToken) {
        let _ = token;
    }
}

/// Visit every child of `node` in order.
pub fn walk_node<V: SyntaxVisitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) {
    for child in node.children() {
        match child {
            SyntaxElement::Node(node) => visitor.visit_node(&node),
            SyntaxElement::Token(token) => visitor.visit_token(&token),
        }
    }
}
