//! Binding: turning declarations into symbols and syntax into bound trees.
//!
//! Every entry point binds exactly one property of one symbol and is called
//! lazily from [`Symbol`](super::Symbol) accessors. Nothing here recurses into
//! the properties of other symbols except through those accessors, so each
//! property is bound at most once per compilation.

mod expr;
mod stmt;
mod types;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::debug;
use smol_str::SmolStr;

use super::bound::{BoundBody, BoundExpr, ExprNode, Resolutions, Type};
use super::symbols::{
    Bound, Details, FunctionDetails, Members, Signature, Symbol, SymbolData, SymbolId,
    SymbolKind, VariableDetails,
};
use super::Compilation;
use crate::errors::Diagnostics;
use crate::source::Span;
use crate::syntax::ast::{self, AstNode};
use crate::syntax::{SyntaxNode, SyntaxToken};

/// Declare every top-level declaration of a module.
pub(crate) fn module_members(compilation: &Compilation, module: SymbolId) -> Bound<Members> {
    let data = compilation.symbols().get(module);
    let Some(unit) = data.declaration.clone().and_then(ast::CompilationUnit::cast) else {
        return Bound::new(Members::default());
    };

    let mut binder = Binder::new(compilation, module);
    let mut list = Vec::new();
    let mut by_name: BTreeMap<SmolStr, SymbolId> = BTreeMap::new();
    let mut spans: BTreeMap<SymbolId, Span> = BTreeMap::new();

    let declarations = unit.declarations();
    for declaration in declarations.iter().flat_map(|list| list.iter()) {
        let (token, kind, details) = match &declaration {
            ast::Declaration::FunctionDeclaration(function) => (
                function.name(),
                SymbolKind::Function,
                Details::Function(FunctionDetails::default()),
            ),

            ast::Declaration::VariableDeclaration(variable) => (
                variable.name(),
                SymbolKind::Global,
                Details::Variable(VariableDetails {
                    mutable: !variable.is_immutable(),
                    ..Default::default()
                }),
            ),

            // Labels are only meaningful inside function bodies.
            ast::Declaration::LabelDeclaration(_) | ast::Declaration::UnexpectedDeclaration(_) => {
                continue
            }
        };

        let (name, at) = name_of(token.as_ref(), declaration.syntax());
        let id = binder.add_symbol(name.clone(), kind, Some(declaration.syntax()), details);
        list.push(id);
        spans.insert(id, at);

        if name.is_empty() {
            continue;
        }

        match by_name.get(&name) {
            Some(previous) => {
                let previous = spans[previous];
                let _ = binder.diagnostics.binding_error(at).duplicate_definition(previous, &name);
            }
            None => {
                by_name.insert(name, id);
            }
        }
    }

    debug!("declared {} module members", list.len());
    binder.finish(Members { list: list.into(), by_name })
}

/// Bind the generic parameters, parameters and return type of a function.
pub(crate) fn signature(compilation: &Compilation, function: SymbolId) -> Bound<Signature> {
    let data = compilation.symbols().get(function);
    let Some(declaration) = data.declaration.clone().and_then(ast::FunctionDeclaration::cast)
    else {
        // Intrinsic functions accept anything.
        return Bound::new(Signature {
            generics: Box::new([]),
            parameters: Box::new([]),
            return_type: Type::Named(compilation.intrinsics().unit),
            variadic: true,
        });
    };

    let mut binder = Binder::new(compilation, function);
    let generics = binder.generic_parameters(declaration.generics());
    let parameters = binder.parameters(declaration.parameters());
    let return_type = match declaration.return_type().and_then(|specifier| specifier.ty()) {
        Some(ty) => binder.ty(&ty),
        None => Type::Named(compilation.intrinsics().unit),
    };

    let variadic = parameters.iter().any(|id| Symbol::new(compilation, *id).is_variadic());
    binder.finish(Signature {
        generics: generics.into(),
        parameters: parameters.into(),
        return_type,
        variadic,
    })
}

/// Bind the body of a function.
pub(crate) fn function_body(
    compilation: &Compilation,
    function: SymbolId,
) -> Bound<Option<Arc<BoundBody>>> {
    let data = compilation.symbols().get(function);
    let Some(declaration) = data.declaration.clone().and_then(ast::FunctionDeclaration::cast)
    else {
        return Bound::new(None);
    };

    let signature = Symbol::new(compilation, function).signature();
    let mut binder = Binder::new(compilation, function);

    for id in signature.iter().flat_map(|s| s.generics.iter().chain(s.parameters.iter())) {
        let name = compilation.symbols().get(*id).name.clone();
        if !name.is_empty() {
            binder.scopes.1.names.entry(name).or_insert(*id);
        }
    }

    let (root, block) = match declaration.body() {
        Some(ast::FunctionBody::BlockFunctionBody(body)) => {
            binder.declare_labels(body.syntax());
            let span = body.syntax().span();
            let statements = body.statements();
            let root = binder.scope(|this| {
                let statements = this.statements(statements.iter().flat_map(|list| list.iter()));
                let unit = BoundExpr::new(ExprNode::Unit, Span { start: span.end, ..span });
                BoundExpr::new(ExprNode::Block(statements, Box::new(unit)), span)
            });

            (root, true)
        }

        Some(ast::FunctionBody::InlineFunctionBody(body)) => {
            binder.declare_labels(body.syntax());
            let root = binder.expr_or_error(body.value(), body.syntax().span());
            (root, false)
        }

        Some(ast::FunctionBody::UnexpectedFunctionBody(_)) | None => {
            return binder.finish(None);
        }
    };

    debug!("bound body of `{}`", data.name);
    binder.body(root, block)
}

/// Bind the type of a global.
///
/// Parameters and locals have their type bound along with their declaration,
/// so only globals ever reach this.
pub(crate) fn global_type(compilation: &Compilation, global: SymbolId) -> Bound<Type> {
    let data = compilation.symbols().get(global);
    let declaration = data.declaration.clone().and_then(ast::VariableDeclaration::cast);
    let Some(declaration) = declaration.filter(|_| data.kind == SymbolKind::Global) else {
        return Bound::new(Type::Unknown);
    };

    let mut binder = Binder::new(compilation, global);
    let ty = match declaration.type_specifier().map(|specifier| specifier.ty()) {
        Some(Some(ty)) => binder.ty(&ty),
        Some(None) => Type::Error,
        None if declaration.value().is_some() => Type::Unknown,
        None => {
            let (name, at) = name_of(declaration.name().as_ref(), declaration.syntax());
            let _ = binder.diagnostics.binding_error(at).missing_type(&name);
            Type::Error
        }
    };

    binder.finish(ty)
}

/// Bind the initial value of a global.
pub(crate) fn global_initializer(
    compilation: &Compilation,
    global: SymbolId,
) -> Bound<Option<Arc<BoundBody>>> {
    let data = compilation.symbols().get(global);
    let declaration = data.declaration.clone().and_then(ast::VariableDeclaration::cast);
    let Some(value) = declaration.and_then(|declaration| declaration.value()) else {
        return Bound::new(None);
    };

    let mut binder = Binder::new(compilation, global);
    binder.declare_labels(value.syntax());
    let root = binder.expr_or_error(value.value(), value.syntax().span());

    debug!("bound initializer of `{}`", data.name);
    binder.body(root, false)
}

/// The name a declaration declares, and where to report problems with it.
fn name_of(token: Option<&SyntaxToken>, declaration: &SyntaxNode) -> (SmolStr, Span) {
    match token.filter(|token| !token.is_missing()) {
        Some(token) => (SmolStr::new(token.text()), token.span()),
        None => (SmolStr::default(), declaration.span()),
    }
}

struct Binder<'a> {
    compilation: &'a Compilation,
    owner: SymbolId,

    diagnostics: Diagnostics,
    resolutions: Resolutions,

    scopes: (Vec<Scope>, Scope),

    /// Every label in the body, visible throughout it.
    labels: BTreeMap<SmolStr, SymbolId>,
    label_declarations: HashMap<SyntaxNode, SymbolId>,
    loops: Vec<Loop>,

    locals: Vec<SymbolId>,
    label_list: Vec<SymbolId>,
    functions: Vec<SymbolId>,
}

#[derive(Clone, Copy, Debug)]
struct Loop {
    break_label: SymbolId,
    continue_label: SymbolId,
}

#[derive(Debug, Default)]
struct Scope {
    names: BTreeMap<SmolStr, SymbolId>,
}

impl<'a> Binder<'a> {
    fn new(compilation: &'a Compilation, owner: SymbolId) -> Self {
        Self {
            compilation,
            owner,
            diagnostics: Diagnostics::new(),
            resolutions: Resolutions::default(),
            scopes: (Vec::new(), Scope::default()),
            labels: BTreeMap::new(),
            label_declarations: HashMap::new(),
            loops: Vec::new(),
            locals: Vec::new(),
            label_list: Vec::new(),
            functions: Vec::new(),
        }
    }

    fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    fn finish<T>(self, value: T) -> Bound<T> {
        Bound { value, diagnostics: self.diagnostics, resolutions: self.resolutions }
    }

    fn body(mut self, root: BoundExpr, block: bool) -> Bound<Option<Arc<BoundBody>>> {
        let body = BoundBody {
            root,
            block,
            locals: std::mem::take(&mut self.locals).into(),
            labels: std::mem::take(&mut self.label_list).into(),
            functions: std::mem::take(&mut self.functions).into(),
        };

        self.finish(Some(Arc::new(body)))
    }

    fn add_symbol(
        &mut self,
        name: SmolStr,
        kind: SymbolKind,
        declaration: Option<&SyntaxNode>,
        details: Details,
    ) -> SymbolId {
        let data = SymbolData {
            name,
            kind,
            declaration: declaration.cloned(),
            container: Some(self.owner),
            details,
        };

        let id = self.compilation().symbols().add(data);
        if let Some(declaration) = declaration {
            self.resolutions.declarations.insert(declaration.clone(), id);
        }

        id
    }

    /// Make `id` visible by `name` in the innermost scope.
    fn declare(&mut self, name: SmolStr, id: SymbolId) {
        if !name.is_empty() {
            self.scopes.1.names.insert(name, id);
        }
    }

    /// Look a name up in the enclosing scopes, then in the module, then among
    /// the intrinsics.
    fn lookup(&self, name: &str) -> Option<SymbolId> {
        let compilation = self.compilation();
        std::iter::once(&self.scopes.1)
            .chain(self.scopes.0.iter().rev())
            .find_map(|scope| scope.names.get(name).copied())
            .or_else(|| compilation.module().member(name).map(|symbol| symbol.id()))
            .or_else(|| compilation.intrinsics().lookup(name))
    }

    fn error_symbol(&self) -> SymbolId {
        self.compilation().intrinsics().error
    }

    fn scope<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        let mut top = Scope::default();
        std::mem::swap(&mut self.scopes.1, &mut top);
        self.scopes.0.push(top);

        let result = f(self);

        let top = self.scopes.0.pop().expect("only the `scope` method modifies the scope stack");
        self.scopes.1 = top;

        result
    }

    /// Declare every label in `root`, not counting those in nested functions.
    fn declare_labels(&mut self, root: &SyntaxNode) {
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            if let Some(label) = ast::LabelDeclaration::cast(node.clone()) {
                let (name, at) = name_of(label.name().as_ref(), &node);
                let kind = SymbolKind::Label;
                let id = self.add_symbol(name.clone(), kind, Some(&node), Details::None);
                self.label_list.push(id);
                self.label_declarations.insert(node.clone(), id);

                if let Some(previous) = self.labels.get(&name).copied() {
                    let previous = Symbol::new(self.compilation(), previous).span().unwrap_or(at);
                    let mut errors = self.diagnostics.binding_error(at);
                    let _ = errors.duplicate_definition(previous, &name);
                } else if !name.is_empty() {
                    self.labels.insert(name, id);
                }

                continue;
            }

            if ast::FunctionDeclaration::cast(node.clone()).is_some() {
                continue;
            }

            let children: Vec<_> = node.child_nodes().collect();
            stack.extend(children.into_iter().rev());
        }
    }

    /// A label for a loop, which has no syntax of its own.
    fn loop_label(&mut self, name: &str) -> SymbolId {
        let id = self.add_symbol(name.into(), SymbolKind::Label, None, Details::None);
        self.label_list.push(id);
        id
    }

    fn generic_parameters(&mut self, list: Option<ast::GenericParameterList>) -> Vec<SymbolId> {
        let mut ids = Vec::new();
        let mut seen: BTreeMap<SmolStr, Span> = BTreeMap::new();
        let parameters = list.and_then(|list| list.parameters());

        for parameter in parameters.iter().flat_map(|list| list.iter()) {
            let (name, at) = name_of(parameter.name().as_ref(), parameter.syntax());
            let kind = SymbolKind::TypeParameter;
            let id = self.add_symbol(name.clone(), kind, Some(parameter.syntax()), Details::None);
            ids.push(id);

            self.check_shadowing(&mut seen, &name, at, id);
        }

        ids
    }

    fn parameters(&mut self, list: Option<ast::ParameterList>) -> Vec<SymbolId> {
        let mut ids = Vec::new();
        let mut seen: BTreeMap<SmolStr, Span> = BTreeMap::new();
        let parameters: Vec<_> =
            list.and_then(|list| list.parameters()).iter().flat_map(|list| list.iter()).collect();

        for (index, parameter) in parameters.iter().enumerate() {
            let (name, at) = name_of(parameter.name().as_ref(), parameter.syntax());
            let variadic = parameter.variadic().is_some();
            if variadic && index + 1 != parameters.len() {
                let _ = self.diagnostics.binding_error(at).variadic_not_last(&name);
            }

            let ty = match parameter.type_specifier().and_then(|specifier| specifier.ty()) {
                Some(ty) => self.ty(&ty),
                None => Type::Error,
            };

            let details = Details::Variable(VariableDetails {
                mutable: false,
                variadic,
                ty: Bound::new(ty).into(),
                ..Default::default()
            });

            let kind = SymbolKind::Parameter;
            let id = self.add_symbol(name.clone(), kind, Some(parameter.syntax()), details);
            ids.push(id);

            self.check_shadowing(&mut seen, &name, at, id);
        }

        ids
    }

    /// Report every name in a parameter list after its first occurrence.
    fn check_shadowing(
        &mut self,
        seen: &mut BTreeMap<SmolStr, Span>,
        name: &SmolStr,
        at: Span,
        id: SymbolId,
    ) {
        if name.is_empty() {
            return;
        }

        match seen.get(name) {
            Some(first) => {
                let _ = self.diagnostics.binding_error(at).illegal_shadowing(*first, name);
            }
            None => {
                seen.insert(name.clone(), at);
                self.declare(name.clone(), id);
            }
        }
    }
}
