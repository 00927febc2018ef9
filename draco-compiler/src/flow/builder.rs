use std::collections::BTreeMap;

use log::trace;

use super::graph::{Graph, OperationId, Payload};
use crate::semantic::{BoundBody, BoundExpr, BoundStatement, ExprNode, StringPart, SymbolId};

/// Build the control flow graph of a body.
pub fn build(body: &BoundBody) -> Graph<'_> {
    let graph = Graph::new();
    let mut builder = Builder { current: Some(graph.entry()), graph, labels: BTreeMap::new() };

    builder.expr(&body.root);
    builder.append(Payload::NoOp);
    builder.graph.fill_placeholders();

    trace!("built flow graph with {} operations", builder.graph.len());
    builder.graph
}

struct Builder<'b> {
    graph: Graph<'b>,

    /// The operation control is at, or `None` after a jump.
    current: Option<OperationId>,
    labels: BTreeMap<SymbolId, OperationId>,
}

impl<'b> Builder<'b> {
    /// Add an operation after the current one and continue from it. After a
    /// jump, the new operation starts an unreachable chain of its own.
    fn append(&mut self, payload: Payload<'b>) -> OperationId {
        let id = self.graph.add(payload);
        self.join(self.current, id);
        self.current = Some(id);
        id
    }

    fn join(&mut self, from: Option<OperationId>, to: OperationId) {
        if let Some(from) = from {
            self.graph.connect(from, to);
        }
    }

    /// The operation of a label, created as a placeholder if it doesn't exist
    /// yet.
    fn label(&mut self, label: SymbolId) -> OperationId {
        if let Some(id) = self.labels.get(&label) {
            return *id;
        }

        let id = self.graph.add(Payload::Placeholder);
        self.labels.insert(label, id);
        id
    }

    /// Continue from the operation of `label`.
    fn place_label(&mut self, label: SymbolId) {
        let id = self.label(label);
        self.graph.fill(id, Payload::Label(label));
        self.join(self.current, id);
        self.current = Some(id);
    }

    /// Continue from a fresh no-op which every given chain flows into.
    fn merge(&mut self, chains: &[Option<OperationId>]) {
        let join = self.graph.add(Payload::NoOp);
        for chain in chains {
            self.join(*chain, join);
        }

        self.current = Some(join);
    }

    fn statement(&mut self, statement: &'b BoundStatement) {
        match statement {
            BoundStatement::Expression(expr) => self.expr(expr),

            BoundStatement::Local { value, .. } => {
                if let Some(value) = value {
                    self.expr(value);
                }

                self.append(Payload::Statement(statement));
            }

            BoundStatement::Label(label, _) => self.place_label(*label),

            // Nested functions get graphs of their own.
            BoundStatement::Function(_) => {}
        }
    }

    fn expr(&mut self, expr: &'b BoundExpr) {
        match &expr.node {
            ExprNode::Error | ExprNode::Unit | ExprNode::Literal(_) | ExprNode::Reference(_) => {}

            ExprNode::String(parts) => {
                for part in parts.iter() {
                    if let StringPart::Interpolation(expr) = part {
                        self.expr(expr);
                    }
                }
            }

            ExprNode::Member(receiver, _) => self.expr(receiver),
            ExprNode::Generic(instantiated, _) => self.expr(instantiated),

            ExprNode::Call(function, arguments) => {
                self.expr(function);
                arguments.iter().for_each(|argument| self.expr(argument));
            }

            ExprNode::Block(statements, value) => {
                statements.iter().for_each(|statement| self.statement(statement));
                self.expr(value);
            }

            ExprNode::If { condition, then, otherwise } => {
                self.expr(condition);
                let fork = self.current;

                self.expr(then);
                let then = self.current;

                self.current = fork;
                if let Some(otherwise) = otherwise {
                    self.expr(otherwise);
                }

                self.merge(&[then, self.current]);
            }

            ExprNode::While { condition, body, continue_label, break_label } => {
                self.place_label(*continue_label);
                let head = self.label(*continue_label);

                self.expr(condition);
                let fork = self.current;

                self.expr(body);
                self.join(self.current, head);

                self.current = fork;
                self.place_label(*break_label);
            }

            ExprNode::Return(value) => {
                if let Some(value) = value {
                    self.expr(value);
                }

                self.append(Payload::Expression(expr));
                self.current = None;
                return;
            }

            ExprNode::Goto(label) => {
                self.append(Payload::Expression(expr));
                let target = self.label(*label);
                self.join(self.current, target);
                self.current = None;
                return;
            }

            ExprNode::Assign { value, .. } => self.expr(value),
            ExprNode::Unary(_, operand) => self.expr(operand),

            ExprNode::Binary(_, operands) => {
                let [left, right] = &**operands;
                self.expr(left);
                self.expr(right);
            }

            ExprNode::And(operands) | ExprNode::Or(operands) => {
                let [left, right] = &**operands;
                self.expr(left);
                let skip = self.current;

                self.expr(right);
                self.merge(&[skip, self.current]);
            }

            ExprNode::Relational(left, comparisons) => {
                self.expr(left);
                comparisons.iter().for_each(|(_, right)| self.expr(right));
            }
        }

        self.append(Payload::Expression(expr));
    }
}
