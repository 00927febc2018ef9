use std::ops::Range;
use std::sync::Arc;

use super::green::{GreenCache, Node};
use super::parse::{parse_green, ParseOptions};
use super::red::{SyntaxNode, SyntaxToken};
use crate::errors::Diagnostics;
use crate::source::Source;

/// A parsed source file. The tree is immutable; edits produce a new tree which
/// shares unchanged green nodes with this one.
pub struct SyntaxTree {
    source: Arc<Source>,
    options: ParseOptions,
    cache: Arc<GreenCache>,
    root: SyntaxNode,
}

impl SyntaxTree {
    pub fn parse(source: Arc<Source>) -> Self {
        Self::parse_with(source, ParseOptions::default(), Arc::new(GreenCache::new()))
    }

    /// Parse with the given options, sharing green nodes through `cache`.
    pub fn parse_with(source: Arc<Source>, options: ParseOptions, cache: Arc<GreenCache>) -> Self {
        let green = parse_green(&source.text, &options, &cache);
        let root = SyntaxNode::new_root(green, source.id);
        Self { source, options, cache, root }
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn green(&self) -> &Node {
        self.root.green()
    }

    pub fn cache(&self) -> &Arc<GreenCache> {
        &self.cache
    }

    /// The full text of the tree. Always equal to the parsed source text.
    pub fn text(&self) -> String {
        self.root.text()
    }

    /// Every lexical and syntactic diagnostic in this tree.
    pub fn diagnostics(&self) -> Diagnostics {
        self.root.diagnostics()
    }

    /// The narrowest node whose span contains `offset`.
    pub fn node_at(&self, offset: usize) -> SyntaxNode {
        self.root.node_at(offset)
    }

    pub fn token_at(&self, offset: usize) -> Option<SyntaxToken> {
        self.root.token_at(offset)
    }

    /// Replace the text in `range` and reparse. Green nodes which did not
    /// change are shared with this tree through the green cache.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds or not on character boundaries.
    pub fn with_edit(&self, range: Range<usize>, replacement: &str) -> SyntaxTree {
        let mut text = self.source.text.clone();
        text.replace_range(range, replacement);

        let source = Arc::new(Source::new(self.source.path.clone(), text));
        Self::parse_with(source, self.options.clone(), self.cache.clone())
    }
}

/// Parse `text` as the contents of the file at `path`.
pub fn parse(text: &str, path: &str) -> SyntaxTree {
    SyntaxTree::parse(Arc::new(Source::new(path, text)))
}
