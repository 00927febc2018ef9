use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use super::intrinsics::Intrinsics;
use super::model::SemanticModel;
use super::symbols::{Details, ModuleDetails, Symbol, SymbolData, SymbolId, SymbolKind, SymbolTable};
use crate::errors::Diagnostics;
use crate::flow;
use crate::once::get_or_compute;
use crate::syntax::{self, SyntaxTree};

/// Which flow analyses a compilation runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompilationOptions {
    /// Check that functions with a return type return on all paths.
    pub returns: bool,

    /// Check that locals are initialized before use, and that `val` locals
    /// are initialized at most once.
    pub definite_assignment: bool,
}

impl CompilationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_returns(self, returns: bool) -> Self {
        Self { returns, ..self }
    }

    pub fn with_definite_assignment(self, definite_assignment: bool) -> Self {
        Self { definite_assignment, ..self }
    }
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { returns: true, definite_assignment: true }
    }
}

/// One source file and everything known about it. Symbols are created and
/// bound on demand, so a compilation can be shared between threads and queried
/// in any order.
pub struct Compilation {
    tree: SyntaxTree,
    options: CompilationOptions,

    symbols: SymbolTable,
    intrinsics: Intrinsics,
    module: OnceLock<SymbolId>,
}

impl Compilation {
    pub fn new(tree: SyntaxTree) -> Self {
        Self::with_options(tree, CompilationOptions::default())
    }

    pub fn with_options(tree: SyntaxTree, options: CompilationOptions) -> Self {
        let symbols = SymbolTable::new();
        let intrinsics = Intrinsics::new(&symbols);
        Self { tree, options, symbols, intrinsics, module: OnceLock::new() }
    }

    /// Parse `text` and start a compilation of it.
    pub fn parse(text: &str, path: &str) -> Self {
        Self::new(syntax::parse(text, path))
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }

    /// The module declared by the source file, named after it.
    pub fn module(&self) -> Symbol<'_> {
        let id = get_or_compute(&self.module, || {
            let path = self.tree.source().path.as_str();
            let stem = Path::new(path).file_stem().and_then(|stem| stem.to_str());
            let name = stem.unwrap_or(path);

            self.symbols.add(SymbolData {
                name: name.into(),
                kind: SymbolKind::Module,
                declaration: Some(self.tree.root().clone()),
                container: None,
                details: Details::Module(ModuleDetails::default()),
            })
        });

        Symbol::new(self, *id)
    }

    pub fn symbol(&self, id: SymbolId) -> Symbol<'_> {
        Symbol::new(self, id)
    }

    /// Look up an intrinsic type or function by name.
    pub fn intrinsic(&self, name: &str) -> Option<Symbol<'_>> {
        self.intrinsics.lookup(name).map(|id| self.symbol(id))
    }

    pub fn semantic_model(&self) -> SemanticModel<'_> {
        SemanticModel::new(self)
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub(crate) fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn syntax_diagnostics(&self) -> Diagnostics {
        self.tree.diagnostics()
    }

    /// Bind everything and collect what went wrong.
    pub fn binding_diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        for symbol in self.declared_symbols() {
            diagnostics.extend(symbol.diagnostics());
        }

        diagnostics
    }

    /// Run the enabled flow analyses over every body.
    pub fn flow_diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        for symbol in self.declared_symbols() {
            if let Some(body) = symbol.body() {
                diagnostics.extend(flow::check(self, symbol, &body));
            }
        }

        diagnostics
    }

    /// Every diagnostic of every phase.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = self.syntax_diagnostics();
        diagnostics.extend(self.binding_diagnostics());
        diagnostics.extend(self.flow_diagnostics());

        debug!(
            "{} errors and {} warnings in {}",
            diagnostics.num_errors(),
            diagnostics.num_warnings(),
            self.tree.source().path
        );

        diagnostics
    }

    /// The module and every symbol declared in it, nested ones included, in
    /// declaration order.
    fn declared_symbols(&self) -> Vec<Symbol<'_>> {
        let mut found = Vec::new();
        let mut stack = vec![self.module()];

        while let Some(symbol) = stack.pop() {
            let members = symbol.members();
            found.push(symbol);
            stack.extend(members.into_iter().rev());
        }

        found
    }
}
