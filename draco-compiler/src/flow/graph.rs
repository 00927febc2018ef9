use std::collections::BTreeSet;

use crate::semantic::{BoundExpr, BoundStatement, SymbolId};

/// Identifies an operation within one graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OperationId(usize);

impl OperationId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What an operation does. Expressions appear after their operands, so an
/// operation sees the state produced by evaluating everything it depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload<'b> {
    Entry,
    NoOp,

    /// A label targeted before it was reached. Filled in when the builder
    /// reaches the label, or with a no-op if it never does.
    Placeholder,

    Label(SymbolId),
    Expression(&'b BoundExpr),
    Statement(&'b BoundStatement),
}

#[derive(Debug)]
pub struct Operation<'b> {
    pub payload: Payload<'b>,
    pub predecessors: BTreeSet<OperationId>,
    pub successors: BTreeSet<OperationId>,
}

/// A control flow graph over a bound body. Loops and jumps make it cyclic, so
/// operations refer to each other by id.
#[derive(Debug)]
pub struct Graph<'b> {
    operations: Vec<Operation<'b>>,
    entry: OperationId,
}

impl<'b> Graph<'b> {
    pub(super) fn new() -> Self {
        let mut graph = Self { operations: Vec::new(), entry: OperationId(0) };
        graph.entry = graph.add(Payload::Entry);
        graph
    }

    pub fn entry(&self) -> OperationId {
        self.entry
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, id: OperationId) -> &Operation<'b> {
        &self.operations[id.0]
    }

    pub fn operations(&self) -> impl Iterator<Item = (OperationId, &Operation<'b>)> + '_ {
        self.operations.iter().enumerate().map(|(index, operation)| (OperationId(index), operation))
    }

    /// The reachable operations control leaves the body from.
    pub fn exits(&self) -> Vec<OperationId> {
        let mut exits: Vec<_> = self
            .reachable()
            .into_iter()
            .filter(|id| self.get(*id).successors.is_empty())
            .collect();
        exits.sort();
        exits
    }

    /// Every operation reachable from the entry, in reverse postorder. Apart
    /// from back edges, every operation comes after its predecessors.
    pub fn reachable(&self) -> Vec<OperationId> {
        let mut visited = vec![false; self.operations.len()];
        let mut postorder = Vec::with_capacity(self.operations.len());
        let mut stack = vec![(self.entry, false)];

        while let Some((id, finished)) = stack.pop() {
            if finished {
                postorder.push(id);
                continue;
            }

            if std::mem::replace(&mut visited[id.0], true) {
                continue;
            }

            stack.push((id, true));
            for successor in self.get(id).successors.iter().rev() {
                if !visited[successor.0] {
                    stack.push((*successor, false));
                }
            }
        }

        postorder.reverse();
        postorder
    }

    pub(super) fn add(&mut self, payload: Payload<'b>) -> OperationId {
        let id = OperationId(self.operations.len());
        self.operations.push(Operation {
            payload,
            predecessors: BTreeSet::new(),
            successors: BTreeSet::new(),
        });

        id
    }

    pub(super) fn connect(&mut self, from: OperationId, to: OperationId) {
        self.operations[from.0].successors.insert(to);
        self.operations[to.0].predecessors.insert(from);
    }

    pub(super) fn fill(&mut self, id: OperationId, payload: Payload<'b>) {
        self.operations[id.0].payload = payload;
    }

    /// Replace every placeholder left over with a no-op.
    pub(super) fn fill_placeholders(&mut self) {
        for operation in &mut self.operations {
            if operation.payload == Payload::Placeholder {
                operation.payload = Payload::NoOp;
            }
        }
    }
}
