use std::collections::BTreeMap;

use super::graph::{Graph, Payload};
use super::lattice::Lattice;
use super::solver::analyze;
use crate::errors::Diagnostics;
use crate::semantic::{BoundBody, BoundStatement, Compilation, ExprNode, SymbolId};

/// Whether a local has been given a value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    Uninitialized,
    Initialized,

    /// Initialized on some paths but not on others.
    Maybe,
}

/// Tracks the initialization status of every local of a body. `None` stands
/// for operations no path reaches.
#[derive(Clone, Debug)]
pub struct DefiniteAssignment {
    locals: BTreeMap<SymbolId, usize>,
}

impl DefiniteAssignment {
    pub fn new(body: &BoundBody) -> Self {
        let locals = body.locals.iter().enumerate().map(|(index, id)| (*id, index)).collect();
        Self { locals }
    }

    pub fn index(&self, local: SymbolId) -> Option<usize> {
        self.locals.get(&local).copied()
    }

    /// The status of `local` in `state`, if `local` is tracked and the state is
    /// reachable.
    pub fn status(&self, state: &Option<Box<[Status]>>, local: SymbolId) -> Option<Status> {
        Some(state.as_ref()?[self.index(local)?])
    }

    fn set(
        &self,
        input: &Option<Box<[Status]>>,
        local: SymbolId,
        status: Status,
    ) -> Option<Box<[Status]>> {
        let mut state = input.clone()?;
        if let Some(index) = self.index(local) {
            state[index] = status;
        }

        Some(state)
    }
}

impl Lattice for DefiniteAssignment {
    type Element = Option<Box<[Status]>>;

    fn identity(&self) -> Self::Element {
        None
    }

    fn entry(&self) -> Self::Element {
        Some(vec![Status::Uninitialized; self.locals.len()].into())
    }

    fn meet(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (None, other) | (other, None) => other.clone(),
            (Some(a), Some(b)) => Some(
                a.iter()
                    .zip(b.iter())
                    .map(|(a, b)| if a == b { *a } else { Status::Maybe })
                    .collect(),
            ),
        }
    }

    fn transfer(&self, payload: &Payload<'_>, input: &Self::Element) -> Self::Element {
        match payload {
            Payload::Statement(BoundStatement::Local { local, value, .. }) => {
                let status =
                    if value.is_some() { Status::Initialized } else { Status::Uninitialized };
                self.set(input, *local, status)
            }

            Payload::Expression(expr) => match &expr.node {
                ExprNode::Assign { target, .. } => self.set(input, *target, Status::Initialized),
                _ => input.clone(),
            },

            _ => input.clone(),
        }
    }
}

/// Report locals read before they are definitely initialized, and `val` locals
/// assigned when they might already have a value.
pub fn check(
    compilation: &Compilation,
    body: &BoundBody,
    graph: &Graph<'_>,
    diagnostics: &mut Diagnostics,
) {
    let lattice = DefiniteAssignment::new(body);
    let solution = analyze(&lattice, graph);

    for id in graph.reachable() {
        let Payload::Expression(expr) = graph.get(id).payload else {
            continue;
        };

        let input = solution.input(id);
        match &expr.node {
            ExprNode::Reference(local) => {
                let status = lattice.status(input, *local);
                if status.is_some_and(|status| status != Status::Initialized) {
                    let name = compilation.symbol(*local).name();
                    let _ = diagnostics.flow_error(expr.span).use_before_initialization(&name);
                }
            }

            ExprNode::Assign { target, operator, .. } => {
                let Some(status) = lattice.status(input, *target) else {
                    continue;
                };

                let symbol = compilation.symbol(*target);
                if operator.is_some() && status != Status::Initialized {
                    let _ = diagnostics
                        .flow_error(expr.span)
                        .use_before_initialization(&symbol.name());
                }

                if !symbol.is_mutable() && status != Status::Uninitialized {
                    let _ = diagnostics
                        .flow_error(expr.span)
                        .immutable_reassigned(&symbol.name(), symbol.span());
                }
            }

            _ => {}
        }
    }
}
