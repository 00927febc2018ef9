use super::symbols::Symbol;
use super::Compilation;
use crate::syntax::{Kind, SyntaxNode};

/// Answers questions about the syntax of a compilation in terms of symbols.
#[derive(Clone, Copy)]
pub struct SemanticModel<'a> {
    compilation: &'a Compilation,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(compilation: &'a Compilation) -> Self {
        Self { compilation }
    }

    /// The symbol declared by a declaration, parameter or label node.
    pub fn declared_symbol(&self, node: &SyntaxNode) -> Option<Symbol<'a>> {
        match node.kind() {
            Kind::CompilationUnit => Some(self.compilation.module()),
            Kind::FunctionDeclaration
            | Kind::VariableDeclaration
            | Kind::LabelDeclaration
            | Kind::Parameter
            | Kind::GenericParameter => self.resolve(node),
            _ => None,
        }
    }

    /// The symbol a name or `goto` refers to.
    pub fn referenced_symbol(&self, node: &SyntaxNode) -> Option<Symbol<'a>> {
        match node.kind() {
            Kind::NameExpression | Kind::NameType | Kind::GotoExpression => self.resolve(node),
            _ => None,
        }
    }

    /// The symbols contained in `symbol`.
    pub fn members(&self, symbol: Symbol<'a>) -> Vec<Symbol<'a>> {
        symbol.members()
    }

    /// The narrowest node containing `offset`.
    pub fn node_at(&self, offset: usize) -> SyntaxNode {
        self.compilation.syntax_tree().node_at(offset)
    }

    /// The symbol declared or referenced by the narrowest node at `offset`
    /// which declares or references one.
    pub fn symbol_at(&self, offset: usize) -> Option<Symbol<'a>> {
        let node = self.node_at(offset);
        std::iter::once(node.clone()).chain(node.ancestors()).find_map(|node| {
            self.referenced_symbol(&node).or_else(|| self.declared_symbol(&node))
        })
    }

    fn resolve(&self, node: &SyntaxNode) -> Option<Symbol<'a>> {
        let owner = self.owner_of(node)?;
        let id = owner.resolve(node)?;
        Some(self.compilation.symbol(id))
    }

    /// The symbol whose binding resolved `node`: the innermost enclosing
    /// function, or global for nodes in an initializer, or else the module.
    fn owner_of(&self, node: &SyntaxNode) -> Option<Symbol<'a>> {
        for ancestor in node.ancestors() {
            let owns = match ancestor.kind() {
                Kind::FunctionDeclaration => true,
                Kind::VariableDeclaration => is_top_level(&ancestor),
                _ => false,
            };

            if owns {
                let container = self.owner_of(&ancestor)?;
                let id = container.resolve(&ancestor)?;
                return Some(self.compilation.symbol(id));
            }
        }

        Some(self.compilation.module())
    }
}

/// Returns `true` if `node` is directly in the declaration list of the
/// compilation unit.
fn is_top_level(node: &SyntaxNode) -> bool {
    let grandparent = node.parent().and_then(|parent| parent.parent());
    grandparent.is_some_and(|grandparent| grandparent.kind() == Kind::CompilationUnit)
}
