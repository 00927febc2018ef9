use log::trace;

use super::{Binder, Loop};
use crate::semantic::bound::{
    BinaryOperator, BoundExpr, ExprNode, Literal, RelationalOperator, StringPart, UnaryOperator,
};
use crate::semantic::symbols::{Symbol, SymbolId, SymbolKind};
use crate::source::Span;
use crate::syntax::ast::{self, AstNode};
use crate::syntax::{Kind, SyntaxToken};

impl Binder<'_> {
    /// Bind `expr`, or produce an error expression at `at` if it is missing.
    /// The parser has already reported the missing expression.
    pub(super) fn expr_or_error(&mut self, expr: Option<ast::Expression>, at: Span) -> BoundExpr {
        match expr {
            Some(expr) => self.expr(&expr),
            None => BoundExpr::error(at),
        }
    }

    pub(super) fn expr(&mut self, expr: &ast::Expression) -> BoundExpr {
        let span = expr.syntax().span();
        let node = match expr {
            ast::Expression::LiteralExpression(literal) => {
                match literal.literal().map(|token| self.literal(&token)) {
                    Some(Some(literal)) => ExprNode::Literal(literal),
                    _ => ExprNode::Error,
                }
            }

            ast::Expression::StringExpression(string) => {
                let parts = string.parts();
                let parts = parts
                    .iter()
                    .flat_map(|list| list.iter())
                    .map(|part| match part {
                        ast::StringPart::TextStringPart(text) => {
                            StringPart::Text(text.value().into())
                        }
                        ast::StringPart::InterpolationStringPart(part) => {
                            let at = part.syntax().span();
                            StringPart::Interpolation(self.expr_or_error(part.expression(), at))
                        }
                    })
                    .collect();

                ExprNode::String(parts)
            }

            ast::Expression::NameExpression(name) => {
                let Some(token) = name.name().filter(|token| !token.is_missing()) else {
                    return BoundExpr::error(span);
                };

                let id = self.value(&token);
                self.resolutions.references.insert(name.syntax().clone(), id);
                ExprNode::Reference(id)
            }

            // Members are looked up once values have types.
            ast::Expression::MemberExpression(member) => {
                let receiver = self.expr_or_error(member.receiver(), span);
                let name = member.member().map(|token| token.text().into()).unwrap_or_default();
                ExprNode::Member(Box::new(receiver), name)
            }

            ast::Expression::GenericExpression(generic) => {
                let instantiated = self.expr_or_error(generic.instantiated(), span);
                let arguments = generic.arguments().and_then(|list| list.arguments());
                let arguments = arguments.iter().flat_map(|list| list.iter());
                let arguments = arguments.map(|ty| self.ty(&ty)).collect();
                ExprNode::Generic(Box::new(instantiated), arguments)
            }

            ast::Expression::CallExpression(call) => {
                let function = self.expr_or_error(call.function(), span);
                let arguments = call.arguments().and_then(|list| list.arguments());
                let arguments = arguments.iter().flat_map(|list| list.iter());
                let arguments = arguments.map(|argument| self.expr(&argument)).collect();
                ExprNode::Call(Box::new(function), arguments)
            }

            ast::Expression::GroupingExpression(grouping) => {
                return self.expr_or_error(grouping.expression(), span);
            }

            ast::Expression::BlockExpression(block) => self.scope(|this| {
                let statements = block.statements();
                let statements = this.statements(statements.iter().flat_map(|list| list.iter()));
                let value = match block.value() {
                    Some(value) => this.expr(&value),
                    None => BoundExpr::new(ExprNode::Unit, Span { start: span.end, ..span }),
                };

                ExprNode::Block(statements, Box::new(value))
            }),

            ast::Expression::IfExpression(conditional) => {
                let condition = self.expr_or_error(conditional.condition(), span);
                let then = self.expr_or_error(conditional.then(), span);
                let otherwise = conditional
                    .else_clause()
                    .map(|clause| self.expr_or_error(clause.expression(), clause.syntax().span()));

                ExprNode::If {
                    condition: Box::new(condition),
                    then: Box::new(then),
                    otherwise: otherwise.map(Box::new),
                }
            }

            ast::Expression::WhileExpression(looping) => {
                let continue_label = self.loop_label("continue");
                let break_label = self.loop_label("break");

                let condition = self.expr_or_error(looping.condition(), span);
                self.loops.push(Loop { break_label, continue_label });
                let body = self.expr_or_error(looping.body(), span);
                self.loops.pop();

                ExprNode::While {
                    condition: Box::new(condition),
                    body: Box::new(body),
                    continue_label,
                    break_label,
                }
            }

            ast::Expression::ReturnExpression(ret) => {
                let value = ret.value().map(|value| Box::new(self.expr(&value)));
                ExprNode::Return(value)
            }

            ast::Expression::GotoExpression(goto) => {
                let Some(target) = goto.target().filter(|token| !token.is_missing()) else {
                    return BoundExpr::error(span);
                };

                match self.labels.get(target.text()).copied() {
                    Some(label) => {
                        self.resolutions.references.insert(goto.syntax().clone(), label);
                        ExprNode::Goto(label)
                    }

                    None => {
                        let mut errors = self.diagnostics.binding_error(target.span());
                        let _ = errors.undefined_reference(target.text());
                        ExprNode::Error
                    }
                }
            }

            ast::Expression::BreakExpression(_) => self.jump(span, "break", |l| l.break_label),
            ast::Expression::ContinueExpression(_) => {
                self.jump(span, "continue", |l| l.continue_label)
            }

            ast::Expression::UnaryExpression(unary) => {
                let operand = self.expr_or_error(unary.operand(), span);
                let operator = match unary.operator().map(|token| token.kind()) {
                    Some(Kind::KeywordNot | Kind::Bang) => UnaryOperator::Not,
                    Some(Kind::Minus) => UnaryOperator::Negate,
                    Some(Kind::Plus) => UnaryOperator::Plus,
                    _ => return BoundExpr::error(span),
                };

                ExprNode::Unary(operator, Box::new(operand))
            }

            ast::Expression::BinaryExpression(binary) => {
                let left = self.expr_or_error(binary.left(), span);
                let right = self.expr_or_error(binary.right(), span);
                match binary.operator().and_then(|token| binary_operator(token.kind())) {
                    Some(operator) => ExprNode::Binary(operator, Box::new([left, right])),
                    None => ExprNode::Error,
                }
            }

            ast::Expression::AssignmentExpression(assignment) => {
                let value = self.expr_or_error(assignment.value(), span);
                let operator = match assignment.operator().map(|token| token.kind()) {
                    Some(Kind::PlusAssign) => Some(BinaryOperator::Add),
                    Some(Kind::MinusAssign) => Some(BinaryOperator::Subtract),
                    Some(Kind::StarAssign) => Some(BinaryOperator::Multiply),
                    Some(Kind::SlashAssign) => Some(BinaryOperator::Divide),
                    _ => None,
                };

                let target = match assignment.target() {
                    Some(target) => self.assignment_target(&target),
                    None => self.error_symbol(),
                };

                ExprNode::Assign { target, operator, value: Box::new(value) }
            }

            ast::Expression::AndExpression(and) => {
                let left = self.expr_or_error(and.left(), span);
                let right = self.expr_or_error(and.right(), span);
                ExprNode::And(Box::new([left, right]))
            }

            ast::Expression::OrExpression(or) => {
                let left = self.expr_or_error(or.left(), span);
                let right = self.expr_or_error(or.right(), span);
                ExprNode::Or(Box::new([left, right]))
            }

            ast::Expression::RelationalExpression(relational) => {
                let left = self.expr_or_error(relational.left(), span);
                let comparisons = relational.comparisons();
                let comparisons = comparisons
                    .iter()
                    .flat_map(|list| list.iter())
                    .filter_map(|comparison| {
                        let operator = relational_operator(comparison.operator()?.kind())?;
                        let at = comparison.syntax().span();
                        Some((operator, self.expr_or_error(comparison.right(), at)))
                    })
                    .collect();

                ExprNode::Relational(Box::new(left), comparisons)
            }

            ast::Expression::UnexpectedExpression(_) => ExprNode::Error,
        };

        BoundExpr::new(node, span)
    }

    /// Resolve a name used as a value. Unresolved names and names of things
    /// which aren't values resolve to the error symbol.
    fn value(&mut self, token: &SyntaxToken) -> SymbolId {
        let name = token.text();
        let at = token.span();

        let Some(id) = self.lookup(name) else {
            let _ = self.diagnostics.binding_error(at).undefined_reference(name);
            return self.error_symbol();
        };

        if self.compilation().symbols().get(id).kind.is_value() {
            id
        } else {
            let _ = self.diagnostics.binding_error(at).not_a_value(name);
            self.error_symbol()
        }
    }

    /// Bind the left side of an assignment. Only names of mutable variables
    /// can be assigned to; whether a `val` local is assigned more than once is
    /// up to flow analysis.
    fn assignment_target(&mut self, target: &ast::Expression) -> SymbolId {
        let ast::Expression::NameExpression(name) = target else {
            let _ = self.expr(target);
            let at = target.syntax().span();
            let _ = self.diagnostics.binding_error(at).illegal_assignment_target();
            return self.error_symbol();
        };

        let Some(token) = name.name().filter(|token| !token.is_missing()) else {
            return self.error_symbol();
        };

        let id = self.value(&token);
        self.resolutions.references.insert(name.syntax().clone(), id);

        let data = self.compilation().symbols().get(id);
        let immutable = match data.kind {
            SymbolKind::Parameter | SymbolKind::Function => true,
            SymbolKind::Global => !Symbol::new(self.compilation(), id).is_mutable(),
            _ => false,
        };

        if immutable {
            let mut errors = self.diagnostics.binding_error(token.span());
            let _ = errors.immutable_assignment(&data.name);
        }

        id
    }

    fn jump(&mut self, at: Span, keyword: &str, target: impl Fn(&Loop) -> SymbolId) -> ExprNode {
        match self.loops.last() {
            Some(innermost) => ExprNode::Goto(target(innermost)),
            None => {
                let _ = self.diagnostics.binding_error(at).jump_outside_loop(keyword);
                ExprNode::Error
            }
        }
    }

    fn literal(&mut self, token: &SyntaxToken) -> Option<Literal> {
        let text = token.text();
        match token.kind() {
            Kind::LiteralInteger => {
                let digits: String = text.chars().filter(|c| *c != '_').collect();
                let parsed = if let Some(hex) = digits.strip_prefix("0x") {
                    i64::from_str_radix(hex, 16)
                } else if let Some(binary) = digits.strip_prefix("0b") {
                    i64::from_str_radix(binary, 2)
                } else {
                    digits.parse()
                };

                match parsed {
                    Ok(value) => Some(Literal::Integer(value)),
                    Err(_) => {
                        let mut errors = self.diagnostics.binding_error(token.span());
                        let _ = errors.integer_out_of_range(text);
                        None
                    }
                }
            }

            Kind::LiteralFloat => {
                let digits: String = text.chars().filter(|c| *c != '_').collect();
                digits.parse().ok().map(Literal::Float)
            }

            Kind::LiteralCharacter => {
                let value = token.value()?.chars().next()?;
                Some(Literal::Character(value))
            }

            Kind::KeywordTrue => Some(Literal::Bool(true)),
            Kind::KeywordFalse => Some(Literal::Bool(false)),

            kind => {
                trace!("no literal value for {kind:?}");
                None
            }
        }
    }
}

fn binary_operator(kind: Kind) -> Option<BinaryOperator> {
    Some(match kind {
        Kind::Plus => BinaryOperator::Add,
        Kind::Minus => BinaryOperator::Subtract,
        Kind::Star => BinaryOperator::Multiply,
        Kind::Slash => BinaryOperator::Divide,
        Kind::KeywordMod => BinaryOperator::Modulo,
        Kind::KeywordRem | Kind::Percent => BinaryOperator::Remainder,
        _ => return None,
    })
}

fn relational_operator(kind: Kind) -> Option<RelationalOperator> {
    Some(match kind {
        Kind::Equal => RelationalOperator::Equal,
        Kind::NotEqual => RelationalOperator::NotEqual,
        Kind::LessThan => RelationalOperator::Less,
        Kind::GreaterThan => RelationalOperator::Greater,
        Kind::LessEqual => RelationalOperator::LessEqual,
        Kind::GreaterEqual => RelationalOperator::GreaterEqual,
        _ => return None,
    })
}
