//! Symbols, binding and the semantic model.
//!
//! A [`Compilation`] owns a syntax tree and the symbols declared in it. Symbol
//! properties are bound lazily the first time they are asked for, and every
//! bound property keeps the diagnostics reported while binding it.

mod binder;
mod bound;
mod compilation;
mod intrinsics;
mod model;
mod symbols;

#[cfg(test)]
mod tests;

pub use self::bound::{
    BinaryOperator, BoundBody, BoundExpr, BoundStatement, ExprNode, Literal, RelationalOperator,
    StringPart, Type, UnaryOperator,
};
pub use self::compilation::{Compilation, CompilationOptions};
pub use self::model::SemanticModel;
pub use self::symbols::{Signature, Symbol, SymbolId, SymbolKind};
