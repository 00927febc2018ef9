use log::trace;

use super::graph::{Graph, OperationId};
use super::lattice::{FlowInfo, Lattice};

/// The result of running an analysis to its fixpoint.
#[derive(Debug, PartialEq)]
pub struct Solution<E> {
    infos: Vec<FlowInfo<E>>,
    passes: usize,
}

impl<E> Solution<E> {
    pub fn get(&self, id: OperationId) -> &FlowInfo<E> {
        &self.infos[id.index()]
    }

    pub fn input(&self, id: OperationId) -> &E {
        &self.get(id).input
    }

    pub fn output(&self, id: OperationId) -> &E {
        &self.get(id).output
    }

    /// How many full passes it took to reach the fixpoint, the last of which
    /// changed nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Mark every operation clean, as if the last pass changed nothing.
    pub fn clear_dirty(&mut self) {
        self.infos.iter_mut().for_each(|info| info.dirty = false);
    }
}

/// Run `lattice` over every reachable operation of `graph` until a full pass
/// changes nothing. Operations are visited in reverse postorder, so acyclic
/// graphs converge in two passes.
pub fn analyze<L: Lattice>(lattice: &L, graph: &Graph<'_>) -> Solution<L::Element> {
    let order = graph.reachable();
    let infos = (0..graph.len()).map(|_| FlowInfo::new(lattice.identity())).collect();
    let mut solution = Solution { infos, passes: 0 };

    loop {
        solution.passes += 1;
        let mut changed = false;

        for id in &order {
            let operation = graph.get(*id);
            let start = if *id == graph.entry() { lattice.entry() } else { lattice.identity() };
            let input = operation.predecessors.iter().fold(start, |input, predecessor| {
                lattice.meet(&input, solution.output(*predecessor))
            });

            let output = lattice.transfer(&operation.payload, &input);

            let info = &mut solution.infos[id.index()];
            info.dirty = info.input != input || info.output != output;
            if info.dirty {
                info.input = input;
                info.output = output;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    trace!("reached a fixpoint over {} operations in {} passes", order.len(), solution.passes);
    solution
}
