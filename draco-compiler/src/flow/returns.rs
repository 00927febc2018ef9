use super::graph::{Graph, Payload};
use super::lattice::Lattice;
use super::solver::analyze;
use crate::semantic::ExprNode;

/// Whether every path so far has returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Returns {
    /// No path reaches this point.
    Unreached,

    /// Some path reaches this point without returning.
    NotReturned,

    /// Every path reaching this point has returned.
    Returned,
}

/// Tracks whether control has passed a `return`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnsLattice;

impl Lattice for ReturnsLattice {
    type Element = Returns;

    fn identity(&self) -> Returns {
        Returns::Unreached
    }

    fn entry(&self) -> Returns {
        Returns::NotReturned
    }

    fn meet(&self, a: &Returns, b: &Returns) -> Returns {
        match (a, b) {
            (Returns::Unreached, other) | (other, Returns::Unreached) => *other,
            (Returns::Returned, Returns::Returned) => Returns::Returned,
            _ => Returns::NotReturned,
        }
    }

    fn transfer(&self, payload: &Payload<'_>, input: &Returns) -> Returns {
        match payload {
            Payload::Expression(expr) if *input != Returns::Unreached => match &expr.node {
                ExprNode::Return(_) => Returns::Returned,
                _ => *input,
            },
            _ => *input,
        }
    }
}

/// Returns `true` if no exit of `graph` is reachable without passing a
/// `return`.
pub fn returns_on_all_paths(graph: &Graph<'_>) -> bool {
    let solution = analyze(&ReturnsLattice, graph);
    graph.exits().into_iter().all(|exit| *solution.output(exit) != Returns::NotReturned)
}
