use dashmap::DashMap;

use super::{Data, Node};

/// Small leaves (and small nodes built only from leaves) wider than this are
/// never shared.
const MAX_CACHED_WIDTH: usize = 64;
const MAX_CACHED_CHILDREN: usize = 3;

/// The number of shared nodes kept before the cache starts over.
const DEFAULT_CAPACITY: usize = 1 << 16;

/// Interns small, diagnostic-free green nodes so that identical tokens and
/// leaf-level nodes are shared between positions in one tree and between
/// successive parses of an edited text. The cache can be shared by several
/// threads parsing at once.
///
/// A cache that reaches its capacity is emptied. Nodes handed out earlier stay
/// valid, they are just no longer shared with later parses.
#[derive(Debug)]
pub struct GreenCache {
    nodes: DashMap<Node, ()>,
    capacity: usize,
}

impl Default for GreenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GreenCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: DashMap::new(), capacity }
    }

    /// Get the shared version of `node`, if it is eligible for sharing.
    pub fn intern(&self, node: Node) -> Node {
        if !Self::is_cacheable(&node) {
            return node;
        }

        if let Some(entry) = self.nodes.get(&node) {
            return entry.key().clone();
        }

        if self.nodes.len() >= self.capacity {
            self.nodes.clear();
        }

        self.nodes.entry(node).or_insert(()).key().clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn is_cacheable(node: &Node) -> bool {
        if node.width > MAX_CACHED_WIDTH || !node.messages().is_empty() {
            return false;
        }

        match &node.data {
            Data::Token(_) => !node.is_missing(),
            Data::Tree(tree) => {
                tree.children.len() <= MAX_CACHED_CHILDREN
                    && tree.children.iter().all(|child| {
                        child.is_token() && Self::is_cacheable(child)
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GreenCache;
    use crate::syntax::green::{Node, SyntaxMessage, Token};
    use crate::syntax::Kind;

    #[test]
    fn shares_identical_tokens() {
        let cache = GreenCache::new();
        let a = cache.intern(Node::token(Kind::Identifier, Token::new("x")));
        let b = cache.intern(Node::token(Kind::Identifier, Token::new("x")));

        assert!(a.ptr_eq(&b));
        assert_eq!(1, cache.len());
    }

    #[test]
    fn shares_leaf_nodes() {
        let cache = GreenCache::new();
        let make = || {
            let name = cache.intern(Node::token(Kind::Identifier, Token::new("x")));
            cache.intern(Node::tree(Kind::NameExpression, [name]))
        };

        assert!(make().ptr_eq(&make()));
    }

    #[test]
    fn shares_tokens_inside_small_trees() {
        let cache = GreenCache::new();
        let x = cache.intern(Node::token(Kind::Identifier, Token::new("x")));
        let y = cache.intern(Node::token(Kind::Identifier, Token::new("y")));
        let a = cache.intern(Node::tree(Kind::List, [x.clone(), y.clone()]));
        let b = cache.intern(Node::tree(Kind::List, [x, y]));

        assert!(a.ptr_eq(&b));
        assert_eq!(3, cache.len());
    }

    #[test]
    fn starts_over_when_full() {
        let cache = GreenCache::with_capacity(2);
        let first = cache.intern(Node::token(Kind::Identifier, Token::new("a")));
        cache.intern(Node::token(Kind::Identifier, Token::new("b")));
        cache.intern(Node::token(Kind::Identifier, Token::new("c")));

        assert_eq!(1, cache.len());
        assert_eq!(Some("a"), first.as_token().map(Token::text));

        let again = cache.intern(Node::token(Kind::Identifier, Token::new("a")));
        assert!(!first.ptr_eq(&again));
        assert!(cache.len() <= 2);
    }

    #[test]
    fn never_shares_missing_tokens() {
        let cache = GreenCache::new();
        let message = SyntaxMessage::expected(Kind::ParenClose);
        let a = cache.intern(Node::missing(Kind::ParenClose, message.clone()));
        let b = cache.intern(Node::missing(Kind::ParenClose, message));

        assert!(!a.ptr_eq(&b));
        assert!(cache.is_empty());
    }
}
