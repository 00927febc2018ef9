//! The bound tree: function bodies and initializers with every name resolved
//! to a symbol.

use std::collections::HashMap;

use smol_str::SmolStr;

use super::symbols::SymbolId;
use crate::source::Span;
use crate::syntax::SyntaxNode;

/// A resolved type. Types are not checked, only looked up.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// A type which could not be resolved. A diagnostic has been reported.
    Error,

    /// A variable without annotation, whose type would be inferred.
    Unknown,

    Named(SymbolId),
    Generic(SymbolId, Box<[Type]>),
}

/// The bound contents of one function body or global initializer.
#[derive(Debug)]
pub struct BoundBody {
    pub root: BoundExpr,

    /// Whether this is the block body of a function, as opposed to an inline
    /// body or an initializer.
    pub block: bool,

    /// Every local declared in the body, in declaration order.
    pub locals: Box<[SymbolId]>,
    pub labels: Box<[SymbolId]>,

    /// Functions declared inside the body.
    pub functions: Box<[SymbolId]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundExpr {
    pub node: ExprNode,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    /// An expression which could not be bound. A diagnostic has been reported.
    Error,

    /// The value of a block without a final expression.
    Unit,

    Literal(Literal),
    String(Box<[StringPart]>),
    Reference(SymbolId),
    Member(Box<BoundExpr>, SmolStr),
    Generic(Box<BoundExpr>, Box<[Type]>),
    Call(Box<BoundExpr>, Box<[BoundExpr]>),

    Block(Box<[BoundStatement]>, Box<BoundExpr>),
    If {
        condition: Box<BoundExpr>,
        then: Box<BoundExpr>,
        otherwise: Option<Box<BoundExpr>>,
    },
    While {
        condition: Box<BoundExpr>,
        body: Box<BoundExpr>,
        continue_label: SymbolId,
        break_label: SymbolId,
    },
    Return(Option<Box<BoundExpr>>),

    /// A jump to a label. `break` and `continue` jump to the labels of their
    /// loop.
    Goto(SymbolId),

    /// `target = value`, or `target op= value` for compound assignments.
    Assign {
        target: SymbolId,
        operator: Option<BinaryOperator>,
        value: Box<BoundExpr>,
    },

    Unary(UnaryOperator, Box<BoundExpr>),
    Binary(BinaryOperator, Box<[BoundExpr; 2]>),
    And(Box<[BoundExpr; 2]>),
    Or(Box<[BoundExpr; 2]>),
    Relational(Box<BoundExpr>, Box<[(RelationalOperator, BoundExpr)]>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum BoundStatement {
    Expression(BoundExpr),

    /// A local declaration, with its initial value if it has one.
    Local {
        local: SymbolId,
        value: Option<BoundExpr>,
        span: Span,
    },

    Label(SymbolId, Span),

    /// A nested function declaration. Its body is bound separately.
    Function(SymbolId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Character(char),
    Bool(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub enum StringPart {
    Text(SmolStr),
    Interpolation(BoundExpr),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnaryOperator {
    Not,
    Negate,
    Plus,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Remainder,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BoundExpr {
    pub fn new(node: ExprNode, span: Span) -> Self {
        Self { node, span }
    }

    pub fn error(span: Span) -> Self {
        Self::new(ExprNode::Error, span)
    }
}

/// What the binder found out about the syntax it bound, besides the bound
/// value itself.
#[derive(Debug, Default)]
pub(crate) struct Resolutions {
    /// The symbol each name refers to.
    pub references: HashMap<SyntaxNode, SymbolId>,

    /// The symbol each declaration declares.
    pub declarations: HashMap<SyntaxNode, SymbolId>,
}
