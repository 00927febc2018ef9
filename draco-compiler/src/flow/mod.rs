//! Control flow graphs over bound bodies, and the dataflow analyses run on
//! them.

mod assignment;
mod builder;
mod graph;
mod lattice;
mod returns;
mod solver;

#[cfg(test)]
mod tests;

pub use self::assignment::{DefiniteAssignment, Status};
pub use self::builder::build;
pub use self::graph::{Graph, Operation, OperationId, Payload};
pub use self::lattice::{FlowInfo, Lattice};
pub use self::returns::{returns_on_all_paths, Returns, ReturnsLattice};
pub use self::solver::{analyze, Solution};

use log::debug;

use crate::errors::Diagnostics;
use crate::semantic::{BoundBody, Compilation, Symbol, SymbolKind, Type};

/// Run the flow analyses enabled for `compilation` over the body of `owner`.
pub fn check(compilation: &Compilation, owner: Symbol<'_>, body: &BoundBody) -> Diagnostics {
    let options = compilation.options();
    let graph = build(body);
    debug!("flow graph of `{}` has {} operations", owner.name(), graph.len());

    let mut diagnostics = Diagnostics::new();

    let returns = options.returns && body.block && must_return(compilation, owner);
    if returns && !returns_on_all_paths(&graph) {
        let at = owner.span().unwrap_or(body.root.span);
        let _ = diagnostics.flow_error(at).does_not_return(&owner.name());
    }

    if options.definite_assignment {
        assignment::check(compilation, body, &graph, &mut diagnostics);
    }

    diagnostics
}

/// Returns `true` for functions declared to return something other than
/// `unit`.
fn must_return(compilation: &Compilation, owner: Symbol<'_>) -> bool {
    if owner.kind() != SymbolKind::Function {
        return false;
    }

    let unit = compilation.intrinsic("unit").map(|unit| unit.id());
    match owner.return_type() {
        Some(Type::Named(id)) => Some(id) != unit,
        Some(Type::Generic(..)) => true,
        Some(Type::Error | Type::Unknown) | None => false,
    }
}
