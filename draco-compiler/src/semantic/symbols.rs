use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use smol_str::SmolStr;

use super::binder;
use super::bound::{BoundBody, Resolutions, Type};
use super::Compilation;
use crate::errors::Diagnostics;
use crate::once::get_or_compute;
use crate::source::Span;
use crate::syntax::{Kind, SyntaxNode};

/// Uniquely identifies a symbol within one compilation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SymbolId(usize);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SymbolKind {
    Module,
    Function,
    Parameter,
    Global,
    Local,
    Label,
    Type,
    TypeParameter,

    /// Stands in for anything which could not be resolved.
    Error,
}

impl SymbolKind {
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Function | Self::Parameter | Self::Global | Self::Local | Self::Error
        )
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type | Self::TypeParameter | Self::Error)
    }
}

/// Something computed lazily by the binder, along with everything reported
/// and resolved while computing it.
#[derive(Debug)]
pub(crate) struct Bound<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
    pub resolutions: Resolutions,
}

impl<T> Bound<T> {
    pub fn new(value: T) -> Self {
        Self { value, diagnostics: Diagnostics::new(), resolutions: Resolutions::default() }
    }
}

pub(crate) struct SymbolData {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub declaration: Option<SyntaxNode>,
    pub container: Option<SymbolId>,
    pub details: Details,
}

pub(crate) enum Details {
    None,
    Module(ModuleDetails),
    Function(FunctionDetails),
    Variable(VariableDetails),
}

#[derive(Default)]
pub(crate) struct ModuleDetails {
    pub members: OnceLock<Bound<Members>>,
}

#[derive(Debug, Default)]
pub(crate) struct Members {
    pub list: Box<[SymbolId]>,

    /// The first member of each name.
    pub by_name: BTreeMap<SmolStr, SymbolId>,
}

#[derive(Default)]
pub(crate) struct FunctionDetails {
    pub signature: OnceLock<Bound<Signature>>,
    pub body: OnceLock<Bound<Option<Arc<BoundBody>>>>,
}

/// Parameters, globals and locals.
#[derive(Default)]
pub(crate) struct VariableDetails {
    pub mutable: bool,
    pub variadic: bool,
    pub ty: OnceLock<Bound<Type>>,

    /// The initial value of a global.
    pub initializer: OnceLock<Bound<Option<Arc<BoundBody>>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub generics: Box<[SymbolId]>,
    pub parameters: Box<[SymbolId]>,
    pub return_type: Type,

    /// Variadic functions without declared parameters accept anything.
    pub variadic: bool,
}

/// Stores every symbol of a compilation. Symbols are added as binding
/// progresses and never removed.
#[derive(Default)]
pub(crate) struct SymbolTable {
    symbols: DashMap<SymbolId, Arc<SymbolData>>,
    counter: AtomicUsize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, data: SymbolData) -> SymbolId {
        let id = SymbolId(self.counter.fetch_add(1, Ordering::SeqCst));
        self.symbols.insert(id, Arc::new(data));
        id
    }

    pub fn get(&self, id: SymbolId) -> Arc<SymbolData> {
        self.symbols
            .get(&id)
            .expect("symbols from separate compilations are never mixed")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// A handle to a symbol of a compilation. Properties which need binding are
/// computed on first access and remembered.
#[derive(Clone, Copy)]
pub struct Symbol<'a> {
    compilation: &'a Compilation,
    id: SymbolId,
}

impl<'a> Symbol<'a> {
    pub(crate) fn new(compilation: &'a Compilation, id: SymbolId) -> Self {
        Self { compilation, id }
    }

    fn data(&self) -> Arc<SymbolData> {
        self.compilation.symbols().get(self.id)
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> SmolStr {
        self.data().name.clone()
    }

    pub fn kind(&self) -> SymbolKind {
        self.data().kind
    }

    /// The syntax declaring this symbol, if any. Intrinsics and loop labels
    /// synthesized by the binder have none of their own.
    pub fn declaration(&self) -> Option<SyntaxNode> {
        self.data().declaration.clone()
    }

    pub fn container(&self) -> Option<Symbol<'a>> {
        self.data().container.map(|id| Symbol::new(self.compilation, id))
    }

    /// Where this symbol is declared: the name in its declaration if it has
    /// one.
    pub fn span(&self) -> Option<Span> {
        let declaration = self.declaration()?;
        let name = declaration.child_token(Kind::Identifier).filter(|token| !token.is_missing());
        Some(name.map_or_else(|| declaration.span(), |token| token.span()))
    }

    pub fn is_intrinsic(&self) -> bool {
        let data = self.data();
        data.declaration.is_none() && data.container.is_none()
    }

    pub fn is_mutable(&self) -> bool {
        match &self.data().details {
            Details::Variable(variable) => variable.mutable,
            _ => false,
        }
    }

    pub fn is_variadic(&self) -> bool {
        match &self.data().details {
            Details::Variable(variable) => variable.variadic,
            Details::Function(_) => self.signature().is_some_and(|signature| signature.variadic),
            _ => false,
        }
    }

    /// The symbols directly contained in this one: the declarations of a
    /// module, or the parameters, locals, labels and nested functions of a
    /// function.
    pub fn members(&self) -> Vec<Symbol<'a>> {
        let data = self.data();
        let ids: Vec<SymbolId> = match &data.details {
            Details::Module(module) => {
                let members = get_or_compute(&module.members, || {
                    binder::module_members(self.compilation, self.id)
                });
                members.value.list.to_vec()
            }

            Details::Function(_) => {
                let mut ids = Vec::new();
                if let Some(signature) = self.signature() {
                    ids.extend(signature.generics.iter());
                    ids.extend(signature.parameters.iter());
                }

                if let Some(body) = self.body() {
                    ids.extend(body.locals.iter());
                    ids.extend(body.labels.iter());
                    ids.extend(body.functions.iter());
                }

                ids
            }

            Details::Variable(_) => {
                self.body().map(|body| body.functions.to_vec()).unwrap_or_default()
            }
            Details::None => Vec::new(),
        };

        ids.into_iter().map(|id| Symbol::new(self.compilation, id)).collect()
    }

    /// Look up a member of a module by name.
    pub fn member(&self, name: &str) -> Option<Symbol<'a>> {
        let data = self.data();
        let Details::Module(module) = &data.details else {
            return None;
        };

        let members =
            get_or_compute(&module.members, || binder::module_members(self.compilation, self.id));
        members.value.by_name.get(name).map(|id| Symbol::new(self.compilation, *id))
    }

    /// The generic parameters, parameters and return type of a function.
    pub fn signature(&self) -> Option<Signature> {
        let data = self.data();
        let Details::Function(function) = &data.details else {
            return None;
        };

        let bound =
            get_or_compute(&function.signature, || binder::signature(self.compilation, self.id));
        Some(bound.value.clone())
    }

    pub fn parameters(&self) -> Vec<Symbol<'a>> {
        let signature = self.signature();
        let ids = signature.iter().flat_map(|signature| signature.parameters.iter());
        ids.map(|id| Symbol::new(self.compilation, *id)).collect()
    }

    pub fn generic_parameters(&self) -> Vec<Symbol<'a>> {
        let signature = self.signature();
        let ids = signature.iter().flat_map(|signature| signature.generics.iter());
        ids.map(|id| Symbol::new(self.compilation, *id)).collect()
    }

    pub fn return_type(&self) -> Option<Type> {
        self.signature().map(|signature| signature.return_type)
    }

    /// The type of a variable.
    pub fn ty(&self) -> Option<Type> {
        let data = self.data();
        let Details::Variable(variable) = &data.details else {
            return None;
        };

        let bound = get_or_compute(&variable.ty, || binder::global_type(self.compilation, self.id));
        Some(bound.value.clone())
    }

    /// The bound body of a function, or the bound initializer of a global.
    pub fn body(&self) -> Option<Arc<BoundBody>> {
        let data = self.data();
        match &data.details {
            Details::Function(function) => {
                let bound = get_or_compute(&function.body, || {
                    binder::function_body(self.compilation, self.id)
                });
                bound.value.clone()
            }

            Details::Variable(variable) if data.kind == SymbolKind::Global => {
                let bound = get_or_compute(&variable.initializer, || {
                    binder::global_initializer(self.compilation, self.id)
                });
                bound.value.clone()
            }

            _ => None,
        }
    }

    /// Every diagnostic reported while binding the properties of this symbol
    /// itself, not including its members.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.with_bound(|bound| diagnostics.extend(bound.iter().cloned()));
        diagnostics
    }

    /// The symbol `node` refers to or declares, according to the binding of
    /// this symbol.
    pub(crate) fn resolve(&self, node: &SyntaxNode) -> Option<SymbolId> {
        let mut found = None;
        self.with_resolutions(|resolutions| {
            found = found
                .or_else(|| resolutions.references.get(node).copied())
                .or_else(|| resolutions.declarations.get(node).copied());
        });
        found
    }

    /// Force every lazily bound property of this symbol, and visit the
    /// diagnostics of each.
    fn with_bound(&self, mut f: impl FnMut(&Diagnostics)) {
        self.force();
        let data = self.data();
        match &data.details {
            Details::Module(module) => {
                module.members.get().into_iter().for_each(|b| f(&b.diagnostics))
            }
            Details::Function(function) => {
                function.signature.get().into_iter().for_each(|b| f(&b.diagnostics));
                function.body.get().into_iter().for_each(|b| f(&b.diagnostics));
            }
            Details::Variable(variable) => {
                variable.ty.get().into_iter().for_each(|b| f(&b.diagnostics));
                variable.initializer.get().into_iter().for_each(|b| f(&b.diagnostics));
            }
            Details::None => {}
        }
    }

    fn with_resolutions(&self, mut f: impl FnMut(&Resolutions)) {
        self.force();
        let data = self.data();
        match &data.details {
            Details::Module(module) => {
                module.members.get().into_iter().for_each(|b| f(&b.resolutions))
            }
            Details::Function(function) => {
                function.signature.get().into_iter().for_each(|b| f(&b.resolutions));
                function.body.get().into_iter().for_each(|b| f(&b.resolutions));
            }
            Details::Variable(variable) => {
                variable.ty.get().into_iter().for_each(|b| f(&b.resolutions));
                variable.initializer.get().into_iter().for_each(|b| f(&b.resolutions));
            }
            Details::None => {}
        }
    }

    fn force(&self) {
        match self.kind() {
            SymbolKind::Module => {
                let _ = self.members();
            }
            SymbolKind::Function => {
                let _ = self.signature();
                let _ = self.body();
            }
            SymbolKind::Global => {
                let _ = self.ty();
                let _ = self.body();
            }
            _ => {}
        }
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.compilation, other.compilation) && self.id == other.id
    }
}

impl Eq for Symbol<'_> {}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        write!(f, "{:?} `{}` ({:?})", data.kind, data.name, self.id)
    }
}
