/// Every kind of token and node in the syntax tree. Tokens come first, and
/// every kind after [`Kind::CompilationUnit`] is a node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Kind {
    // Tokens
    /// The end of the input. Carries any trivia at the very end of the source.
    EndOfInput,

    /// A character which does not start any token
    Unknown,

    /// An identifier
    Identifier,

    /// An integer literal, like `12`, `0xff` or `0b1010`
    LiteralInteger,

    /// A floating point literal, like `1.5e3`
    LiteralFloat,

    /// A character literal, like `'a'`
    LiteralCharacter,

    /// `"` opening a line string
    LineStringStart,

    /// `"` closing a line string
    LineStringEnd,

    /// `"""` opening a multi-line string
    MultiLineStringStart,

    /// `"""` closing a multi-line string
    MultiLineStringEnd,

    /// Text and escape sequences inside a string
    StringContent,

    /// A line break inside a multi-line string
    StringNewline,

    /// `\{` opening an interpolation inside a string
    InterpolationStart,

    /// `}` closing an interpolation inside a string
    InterpolationEnd,

    /// `and`
    KeywordAnd,
    /// `break`
    KeywordBreak,
    /// `continue`
    KeywordContinue,
    /// `else`
    KeywordElse,
    /// `false`
    KeywordFalse,
    /// `func`
    KeywordFunc,
    /// `goto`
    KeywordGoto,
    /// `if`
    KeywordIf,
    /// `mod`
    KeywordMod,
    /// `not`
    KeywordNot,
    /// `or`
    KeywordOr,
    /// `rem`
    KeywordRem,
    /// `return`
    KeywordReturn,
    /// `true`
    KeywordTrue,
    /// `val`
    KeywordVal,
    /// `var`
    KeywordVar,
    /// `while`
    KeywordWhile,

    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `{`
    CurlyOpen,
    /// `}`
    CurlyClose,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,

    /// `%`, rejected in favour of `rem`
    Percent,
    /// `||`, rejected in favour of `or`
    PipePipe,
    /// `&&`, rejected in favour of `and`
    AmpersandAmpersand,
    /// `!`, rejected in favour of `not`
    Bang,

    // Lists
    /// A sequence of nodes of the same kind
    List,

    /// A sequence of nodes of the same kind, interleaved with separator tokens
    SeparatedList,

    // Declarations
    /// A whole source file
    CompilationUnit,

    /// `func name<T>(params): type body`
    FunctionDeclaration,

    /// `<T, U>` after a function name
    GenericParameterList,

    /// `T` inside a generic parameter list
    GenericParameter,

    /// `(a: T, ...b: U)`
    ParameterList,

    /// `a: T`
    Parameter,

    /// `: type`
    TypeSpecifier,

    /// `{ statements }` as a function body
    BlockFunctionBody,

    /// `= expression;` as a function body
    InlineFunctionBody,

    /// `var name: type = value;`
    VariableDeclaration,

    /// `= value` in a variable declaration
    ValueSpecifier,

    /// `name:` inside a function body
    LabelDeclaration,

    /// Skipped input where a declaration was expected
    UnexpectedDeclaration,

    /// Skipped input inside a parameter list
    UnexpectedParameter,

    /// Skipped input where a function body was expected
    UnexpectedFunctionBody,

    // Statements
    /// A lone `;`
    EmptyStatement,

    /// A declaration in statement position
    DeclarationStatement,

    /// An expression in statement position
    ExpressionStatement,

    /// Skipped input where a statement was expected
    UnexpectedStatement,

    // Types
    /// A type referred to by name
    NameType,

    /// `Outer.Inner`
    MemberType,

    /// `List<T>`
    GenericType,

    /// `<T, U>` after a type or expression
    GenericArgumentList,

    /// Skipped input where a type was expected
    UnexpectedType,

    // Expressions
    /// A single literal token
    LiteralExpression,

    /// A line or multi-line string
    StringExpression,

    /// A run of string content tokens
    TextStringPart,

    /// `\{ expression }`
    InterpolationStringPart,

    /// A value referred to by name
    NameExpression,

    /// `receiver.member`
    MemberExpression,

    /// `function<T>`
    GenericExpression,

    /// `function(arguments)`
    CallExpression,

    /// `(a, b)` after a callee
    ArgumentList,

    /// `(expression)`
    GroupingExpression,

    /// `{ statements value }`
    BlockExpression,

    /// `if (condition) then else otherwise`
    IfExpression,

    /// `else otherwise`
    ElseClause,

    /// `while (condition) body`
    WhileExpression,

    /// `return value`
    ReturnExpression,

    /// `goto label`
    GotoExpression,

    /// `break`
    BreakExpression,

    /// `continue`
    ContinueExpression,

    /// `-operand`, `not operand`
    UnaryExpression,

    /// `left + right`
    BinaryExpression,

    /// `target = value`, `target += value`
    AssignmentExpression,

    /// `left and right`
    AndExpression,

    /// `left or right`
    OrExpression,

    /// `first < second <= third`, any number of comparisons as one node
    RelationalExpression,

    /// `< second` inside a relational expression
    Comparison,

    /// Skipped input where an expression was expected
    UnexpectedExpression,
}

impl Kind {
    /// Returns `true` if this is the kind of a token.
    pub fn is_token(&self) -> bool {
        *self < Kind::List
    }

    /// Returns `true` if this is one of the error recovery node kinds.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Kind::UnexpectedDeclaration
                | Kind::UnexpectedParameter
                | Kind::UnexpectedFunctionBody
                | Kind::UnexpectedStatement
                | Kind::UnexpectedType
                | Kind::UnexpectedExpression
        )
    }

    /// Look up the keyword spelled exactly `text`.
    pub fn keyword(text: &str) -> Option<Kind> {
        Some(match text {
            "and" => Kind::KeywordAnd,
            "break" => Kind::KeywordBreak,
            "continue" => Kind::KeywordContinue,
            "else" => Kind::KeywordElse,
            "false" => Kind::KeywordFalse,
            "func" => Kind::KeywordFunc,
            "goto" => Kind::KeywordGoto,
            "if" => Kind::KeywordIf,
            "mod" => Kind::KeywordMod,
            "not" => Kind::KeywordNot,
            "or" => Kind::KeywordOr,
            "rem" => Kind::KeywordRem,
            "return" => Kind::KeywordReturn,
            "true" => Kind::KeywordTrue,
            "val" => Kind::KeywordVal,
            "var" => Kind::KeywordVar,
            "while" => Kind::KeywordWhile,
            _ => return None,
        })
    }

    /// The text every token of this kind has, if it is fixed.
    pub fn fixed_text(&self) -> Option<&'static str> {
        Some(match self {
            Kind::KeywordAnd => "and",
            Kind::KeywordBreak => "break",
            Kind::KeywordContinue => "continue",
            Kind::KeywordElse => "else",
            Kind::KeywordFalse => "false",
            Kind::KeywordFunc => "func",
            Kind::KeywordGoto => "goto",
            Kind::KeywordIf => "if",
            Kind::KeywordMod => "mod",
            Kind::KeywordNot => "not",
            Kind::KeywordOr => "or",
            Kind::KeywordRem => "rem",
            Kind::KeywordReturn => "return",
            Kind::KeywordTrue => "true",
            Kind::KeywordVal => "val",
            Kind::KeywordVar => "var",
            Kind::KeywordWhile => "while",
            Kind::LineStringStart | Kind::LineStringEnd => "\"",
            Kind::MultiLineStringStart | Kind::MultiLineStringEnd => "\"\"\"",
            Kind::InterpolationStart => "\\{",
            Kind::InterpolationEnd => "}",
            Kind::ParenOpen => "(",
            Kind::ParenClose => ")",
            Kind::CurlyOpen => "{",
            Kind::CurlyClose => "}",
            Kind::Dot => ".",
            Kind::Ellipsis => "...",
            Kind::Comma => ",",
            Kind::Colon => ":",
            Kind::Semicolon => ";",
            Kind::Assign => "=",
            Kind::PlusAssign => "+=",
            Kind::MinusAssign => "-=",
            Kind::StarAssign => "*=",
            Kind::SlashAssign => "/=",
            Kind::Plus => "+",
            Kind::Minus => "-",
            Kind::Star => "*",
            Kind::Slash => "/",
            Kind::Equal => "==",
            Kind::NotEqual => "!=",
            Kind::LessThan => "<",
            Kind::GreaterThan => ">",
            Kind::LessEqual => "<=",
            Kind::GreaterEqual => ">=",
            Kind::Percent => "%",
            Kind::PipePipe => "||",
            Kind::AmpersandAmpersand => "&&",
            Kind::Bang => "!",
            _ => return None,
        })
    }

    /// A short human readable description, used in diagnostics.
    pub fn describe(&self) -> String {
        if let Some(text) = self.fixed_text() {
            return format!("`{text}`");
        }

        match self {
            Kind::EndOfInput => "end of input",
            Kind::Identifier => "an identifier",
            Kind::LiteralInteger => "an integer",
            Kind::LiteralFloat => "a floating point number",
            Kind::LiteralCharacter => "a character",
            Kind::StringContent | Kind::StringNewline => "string content",
            Kind::Unknown => "an unknown character",
            Kind::FunctionDeclaration => "a function declaration",
            Kind::VariableDeclaration => "a variable declaration",
            Kind::Parameter => "a parameter",
            Kind::NameType | Kind::MemberType | Kind::GenericType => "a type",
            Kind::BlockFunctionBody | Kind::InlineFunctionBody => "a function body",
            _ if self.is_unexpected() => "unexpected input",
            _ => "a syntax node",
        }
        .into()
    }
}

/// The kinds of trivia attached to tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TriviaKind {
    /// Spaces and tabs
    Whitespace,

    /// A single `\n`, `\r\n` or `\r`
    Newline,

    /// `// comment`
    LineComment,

    /// `/// documentation`
    DocumentationComment,
}
