//! Typed views of red nodes.
//!
//! Each view wraps a [`SyntaxNode`] of one kind and projects its children
//! lazily through the red tree. Children are looked up by kind, so views work
//! on trees with missing or unexpected parts; accessors return `None` when the
//! child isn't there.

use std::fmt;
use std::marker::PhantomData;

use super::red::{SyntaxNode, SyntaxToken};
use super::Kind;

/// A typed view of a syntax node.
pub trait AstNode: Sized {
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// The children of a [`Kind::List`] node which are of type `T`.
pub struct SyntaxList<T> {
    node: SyntaxNode,
    _item: PhantomData<fn() -> T>,
}

impl<T: AstNode> SyntaxList<T> {
    fn new(node: SyntaxNode) -> Option<Self> {
        (node.kind() == Kind::List).then_some(Self { node, _item: PhantomData })
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.node.child_nodes().filter_map(T::cast)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.iter().nth(index)
    }
}

/// The children of a [`Kind::SeparatedList`] node: items of type `T`
/// interleaved with separator tokens.
pub struct SeparatedSyntaxList<T> {
    node: SyntaxNode,
    _item: PhantomData<fn() -> T>,
}

impl<T: AstNode> SeparatedSyntaxList<T> {
    fn new(node: SyntaxNode) -> Option<Self> {
        (node.kind() == Kind::SeparatedList).then_some(Self { node, _item: PhantomData })
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.node
    }

    /// The items, skipping separators and anything not of type `T`.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.node.child_nodes().filter_map(T::cast)
    }

    pub fn separators(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.node.child_tokens()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.iter().nth(index)
    }
}

impl<T> fmt::Debug for SyntaxList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyntaxList({:?})", self.node)
    }
}

impl<T> fmt::Debug for SeparatedSyntaxList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeparatedSyntaxList({:?})", self.node)
    }
}

/// Declare a typed view of the node kind of the same name, with one accessor
/// per field:
///
/// - `token(Kind)`: the first child token of that kind
/// - `token_any(Kind, ...)`: the first child token of any of those kinds
/// - `first_token()`: the first child token
/// - `node(Type)`: the first child node of that type
/// - `nth(Type, n)`: the `n`th child node of that type
/// - `list(Type)`: the child list of that type
/// - `separated(Type)`: the child separated list of that type
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident { $($field:ident: $how:ident ($($args:tt)*)),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == Kind::$name).then_some(Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl $name {
            $(ast_node!(@field $field $how ($($args)*));)*
        }
    };

    (@field $field:ident token ($kind:ident)) => {
        pub fn $field(&self) -> Option<SyntaxToken> {
            self.0.child_token(Kind::$kind)
        }
    };

    (@field $field:ident token_any ($($kind:ident),+)) => {
        pub fn $field(&self) -> Option<SyntaxToken> {
            self.0.child_token_any(&[$(Kind::$kind),+])
        }
    };

    (@field $field:ident first_token ()) => {
        pub fn $field(&self) -> Option<SyntaxToken> {
            self.0.child_tokens().next()
        }
    };

    (@field $field:ident node ($ty:ident)) => {
        pub fn $field(&self) -> Option<$ty> {
            self.0.child_nodes().find_map($ty::cast)
        }
    };

    (@field $field:ident nth ($ty:ident, $n:literal)) => {
        pub fn $field(&self) -> Option<$ty> {
            self.0.child_nodes().filter_map($ty::cast).nth($n)
        }
    };

    (@field $field:ident list ($ty:ident)) => {
        pub fn $field(&self) -> Option<SyntaxList<$ty>> {
            self.0.child_nodes().find_map(SyntaxList::new)
        }
    };

    (@field $field:ident separated ($ty:ident)) => {
        pub fn $field(&self) -> Option<SeparatedSyntaxList<$ty>> {
            self.0.child_nodes().find_map(SeparatedSyntaxList::new)
        }
    };
}

/// Declare a typed view over several node kinds, each with a view of the same
/// name.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $($variant($variant)),+
        }

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(Kind::$variant => Some(Self::$variant($variant(node))),)+
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(inner) => inner.syntax(),)+
                }
            }
        }
    };
}

ast_node!(
    /// A whole source file
    CompilationUnit {
        declarations: list(Declaration),
        end: token(EndOfInput),
    }
);

ast_enum!(
    Declaration {
        FunctionDeclaration,
        VariableDeclaration,
        LabelDeclaration,
        UnexpectedDeclaration,
    }
);

ast_node!(FunctionDeclaration {
    func_keyword: token(KeywordFunc),
    name: token(Identifier),
    generics: node(GenericParameterList),
    parameters: node(ParameterList),
    return_type: node(TypeSpecifier),
    body: node(FunctionBody),
});

ast_node!(GenericParameterList {
    open: token(LessThan),
    parameters: separated(GenericParameter),
    close: token(GreaterThan),
});

ast_node!(GenericParameter { name: token(Identifier) });

ast_node!(ParameterList {
    open: token(ParenOpen),
    parameters: separated(Parameter),
    close: token(ParenClose),
});

ast_node!(Parameter {
    variadic: token(Ellipsis),
    name: token(Identifier),
    type_specifier: node(TypeSpecifier),
});

ast_node!(TypeSpecifier {
    colon: token(Colon),
    ty: node(Type),
});

ast_enum!(
    FunctionBody {
        BlockFunctionBody,
        InlineFunctionBody,
        UnexpectedFunctionBody,
    }
);

ast_node!(BlockFunctionBody {
    open: token(CurlyOpen),
    statements: list(Statement),
    close: token(CurlyClose),
});

ast_node!(InlineFunctionBody {
    assign: token(Assign),
    value: node(Expression),
    semicolon: token(Semicolon),
});

ast_node!(VariableDeclaration {
    keyword: token_any(KeywordVar, KeywordVal),
    name: token(Identifier),
    type_specifier: node(TypeSpecifier),
    value: node(ValueSpecifier),
    semicolon: token(Semicolon),
});

impl VariableDeclaration {
    /// Returns `true` for `val` declarations.
    pub fn is_immutable(&self) -> bool {
        self.keyword().is_some_and(|keyword| keyword.kind() == Kind::KeywordVal)
    }
}

ast_node!(ValueSpecifier {
    assign: token(Assign),
    value: node(Expression),
});

ast_node!(LabelDeclaration {
    name: token(Identifier),
    colon: token(Colon),
});

ast_node!(UnexpectedDeclaration {});
ast_node!(UnexpectedParameter {});
ast_node!(UnexpectedFunctionBody {});

ast_enum!(
    Statement {
        EmptyStatement,
        DeclarationStatement,
        ExpressionStatement,
        UnexpectedStatement,
    }
);

ast_node!(EmptyStatement { semicolon: token(Semicolon) });
ast_node!(DeclarationStatement { declaration: node(Declaration) });

ast_node!(ExpressionStatement {
    expression: node(Expression),
    semicolon: token(Semicolon),
});

ast_node!(UnexpectedStatement {});

ast_enum!(
    Type {
        NameType,
        MemberType,
        GenericType,
        UnexpectedType,
    }
);

ast_node!(NameType { name: token(Identifier) });

ast_node!(MemberType {
    receiver: node(Type),
    dot: token(Dot),
    member: token(Identifier),
});

ast_node!(GenericType {
    instantiated: node(Type),
    arguments: node(GenericArgumentList),
});

ast_node!(GenericArgumentList {
    open: token(LessThan),
    arguments: separated(Type),
    close: token(GreaterThan),
});

ast_node!(UnexpectedType {});

ast_enum!(
    Expression {
        LiteralExpression,
        StringExpression,
        NameExpression,
        MemberExpression,
        GenericExpression,
        CallExpression,
        GroupingExpression,
        BlockExpression,
        IfExpression,
        WhileExpression,
        ReturnExpression,
        GotoExpression,
        BreakExpression,
        ContinueExpression,
        UnaryExpression,
        BinaryExpression,
        AssignmentExpression,
        AndExpression,
        OrExpression,
        RelationalExpression,
        UnexpectedExpression,
    }
);

ast_node!(LiteralExpression { literal: first_token() });

ast_node!(StringExpression {
    open: token_any(LineStringStart, MultiLineStringStart),
    parts: list(StringPart),
    close: token_any(LineStringEnd, MultiLineStringEnd),
});

ast_enum!(StringPart { TextStringPart, InterpolationStringPart });

ast_node!(TextStringPart {});

impl TextStringPart {
    /// The content tokens of this part, with escapes resolved and line breaks
    /// normalized.
    pub fn value(&self) -> String {
        self.0.child_tokens().filter_map(|token| token.value().map(str::to_owned)).collect()
    }
}

ast_node!(InterpolationStringPart {
    open: token(InterpolationStart),
    expression: node(Expression),
    close: token(InterpolationEnd),
});

ast_node!(NameExpression { name: token(Identifier) });

ast_node!(MemberExpression {
    receiver: node(Expression),
    dot: token(Dot),
    member: token(Identifier),
});

ast_node!(GenericExpression {
    instantiated: node(Expression),
    arguments: node(GenericArgumentList),
});

ast_node!(CallExpression {
    function: node(Expression),
    arguments: node(ArgumentList),
});

ast_node!(ArgumentList {
    open: token(ParenOpen),
    arguments: separated(Expression),
    close: token(ParenClose),
});

ast_node!(GroupingExpression {
    open: token(ParenOpen),
    expression: node(Expression),
    close: token(ParenClose),
});

ast_node!(BlockExpression {
    open: token(CurlyOpen),
    statements: list(Statement),
    value: node(Expression),
    close: token(CurlyClose),
});

ast_node!(IfExpression {
    if_keyword: token(KeywordIf),
    condition: nth(Expression, 0),
    then: nth(Expression, 1),
    else_clause: node(ElseClause),
});

ast_node!(ElseClause {
    else_keyword: token(KeywordElse),
    expression: node(Expression),
});

ast_node!(WhileExpression {
    while_keyword: token(KeywordWhile),
    condition: nth(Expression, 0),
    body: nth(Expression, 1),
});

ast_node!(ReturnExpression {
    return_keyword: token(KeywordReturn),
    value: node(Expression),
});

ast_node!(GotoExpression {
    goto_keyword: token(KeywordGoto),
    target: token(Identifier),
});

ast_node!(BreakExpression { keyword: token(KeywordBreak) });
ast_node!(ContinueExpression { keyword: token(KeywordContinue) });

ast_node!(UnaryExpression {
    operator: first_token(),
    operand: node(Expression),
});

ast_node!(BinaryExpression {
    left: nth(Expression, 0),
    operator: first_token(),
    right: nth(Expression, 1),
});

ast_node!(AssignmentExpression {
    target: nth(Expression, 0),
    operator: first_token(),
    value: nth(Expression, 1),
});

ast_node!(AndExpression {
    left: nth(Expression, 0),
    operator: first_token(),
    right: nth(Expression, 1),
});

ast_node!(OrExpression {
    left: nth(Expression, 0),
    operator: first_token(),
    right: nth(Expression, 1),
});

ast_node!(RelationalExpression {
    left: node(Expression),
    comparisons: list(Comparison),
});

ast_node!(Comparison {
    operator: first_token(),
    right: node(Expression),
});

ast_node!(UnexpectedExpression {});
