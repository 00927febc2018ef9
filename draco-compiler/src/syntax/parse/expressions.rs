use super::parser::{Parser, Production, Separated};
use super::statements::block_contents;
use super::tokens::TokenSource;
use super::types::GENERIC_ARGUMENTS;
use crate::syntax::green::SyntaxMessage;
use crate::syntax::Kind;

/// Tokens an expression never starts with, and which a missing expression
/// therefore leaves alone.
const EXPRESSION_SYNC: &[Kind] = &[
    Kind::Semicolon,
    Kind::Comma,
    Kind::ParenClose,
    Kind::CurlyClose,
    Kind::KeywordElse,
    Kind::KeywordFunc,
    Kind::KeywordVar,
    Kind::KeywordVal,
    Kind::InterpolationEnd,
    Kind::LineStringEnd,
    Kind::MultiLineStringEnd,
];

const ASSIGNMENT_OPERATORS: &[Kind] = &[
    Kind::Assign,
    Kind::PlusAssign,
    Kind::MinusAssign,
    Kind::StarAssign,
    Kind::SlashAssign,
];

const RELATIONAL_OPERATORS: &[Kind] = &[
    Kind::Equal,
    Kind::NotEqual,
    Kind::LessThan,
    Kind::GreaterThan,
    Kind::LessEqual,
    Kind::GreaterEqual,
];

/// How far ahead the parser looks to decide whether `<` opens generic
/// arguments.
const GENERIC_LOOKAHEAD: usize = 64;

/// One level of the operator precedence table.
enum Level {
    /// `target op value`, right associative
    Assignment,

    /// Left associative binary operators producing `node`
    Binary { operators: &'static [Kind], node: Kind },

    /// Prefix operators, which may be repeated
    Prefix { operators: &'static [Kind] },

    /// Any number of comparisons, collected into one node
    Relational,

    /// Calls, member access and generic instantiation
    Postfix,
}

/// Operator precedence, loosest binding first.
const LEVELS: &[Level] = &[
    Level::Assignment,
    Level::Binary { operators: &[Kind::KeywordOr, Kind::PipePipe], node: Kind::OrExpression },
    Level::Binary {
        operators: &[Kind::KeywordAnd, Kind::AmpersandAmpersand],
        node: Kind::AndExpression,
    },
    Level::Prefix { operators: &[Kind::KeywordNot, Kind::Bang] },
    Level::Relational,
    Level::Binary { operators: &[Kind::Plus, Kind::Minus], node: Kind::BinaryExpression },
    Level::Binary {
        operators: &[Kind::Star, Kind::Slash, Kind::KeywordMod, Kind::KeywordRem, Kind::Percent],
        node: Kind::BinaryExpression,
    },
    Level::Prefix { operators: &[Kind::Plus, Kind::Minus] },
    Level::Postfix,
];

/// ```abnf
/// expr = assign
/// assign = or [assign-op assign]
/// or = and *("or" and)
/// and = not *("and" not)
/// not = "not" not / rel
/// rel = add *(rel-op add)
/// add = mul *(("+" / "-") mul)
/// mul = prefix *(("*" / "/" / "mod" / "rem") prefix)
/// prefix = ("-" / "+") prefix / postfix
/// ```
pub(super) const EXPRESSION: Expression = Expression;
pub(super) struct Expression;

impl Production for Expression {
    const FIRST: &'static [Kind] = &[
        Kind::LiteralInteger,
        Kind::LiteralFloat,
        Kind::LiteralCharacter,
        Kind::KeywordTrue,
        Kind::KeywordFalse,
        Kind::LineStringStart,
        Kind::MultiLineStringStart,
        Kind::Identifier,
        Kind::ParenOpen,
        Kind::CurlyOpen,
        Kind::KeywordIf,
        Kind::KeywordWhile,
        Kind::KeywordReturn,
        Kind::KeywordGoto,
        Kind::KeywordBreak,
        Kind::KeywordContinue,
        Kind::Plus,
        Kind::Minus,
        Kind::KeywordNot,
        Kind::Bang,
    ];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        level(parser, 0);
    }
}

fn level<S: TokenSource>(parser: &mut Parser<'_, S>, index: usize) {
    let start = parser.start();

    match &LEVELS[index] {
        Level::Assignment => {
            level(parser, index + 1);
            if parser.peek_any(ASSIGNMENT_OPERATORS) {
                parser.advance();
                level(parser, index);
                parser.finish(Kind::AssignmentExpression, start);
            }
        }

        Level::Binary { operators, node } => {
            level(parser, index + 1);
            while parser.peek_any(operators) {
                operator(parser);
                level(parser, index + 1);
                parser.finish(*node, start);
            }
        }

        Level::Prefix { operators } => {
            if parser.peek_any(operators) {
                operator(parser);
                level(parser, index);
                parser.finish(Kind::UnaryExpression, start);
            } else {
                level(parser, index + 1);
            }
        }

        Level::Relational => {
            level(parser, index + 1);
            if parser.peek_any(RELATIONAL_OPERATORS) {
                parser.always_collect(Kind::List, |parser| {
                    while parser.peek_any(RELATIONAL_OPERATORS) {
                        parser.always_collect(Kind::Comparison, |parser| {
                            parser.advance();
                            level(parser, index + 1);
                        });
                    }
                });

                parser.finish(Kind::RelationalExpression, start);
            }
        }

        Level::Postfix => postfix(parser),
    }
}

/// Consume an operator, rejecting the ones borrowed from other languages.
fn operator<S: TokenSource>(parser: &mut Parser<'_, S>) {
    let replacement = match parser.current() {
        Kind::Percent => Some(("%", "rem")),
        Kind::PipePipe => Some(("||", "or")),
        Kind::AmpersandAmpersand => Some(("&&", "and")),
        Kind::Bang => Some(("!", "not")),
        _ => None,
    };

    match replacement {
        Some((found, replacement)) => {
            parser.advance_with(SyntaxMessage::heritage_operator(found, replacement))
        }
        None => parser.advance(),
    }
}

/// ```abnf
/// postfix = atom *(args / "." NAME / generic-args)
/// ```
fn postfix<S: TokenSource>(parser: &mut Parser<'_, S>) {
    let start = parser.start();
    atom(parser);

    loop {
        match parser.current() {
            Kind::ParenOpen => {
                ARGUMENTS.parse(parser);
                parser.finish(Kind::CallExpression, start);
            }

            Kind::Dot => {
                parser.advance();
                parser.expect(Kind::Identifier);
                parser.finish(Kind::MemberExpression, start);
            }

            Kind::LessThan if generic_arguments_follow(parser) => {
                GENERIC_ARGUMENTS.parse(parser);
                parser.finish(Kind::GenericExpression, start);
            }

            _ => break,
        }
    }
}

/// `<` starts generic arguments only if it is closed by a matching `>`,
/// with nothing but names, dots and commas in between, and is followed by a
/// call.
fn generic_arguments_follow<S: TokenSource>(parser: &mut Parser<'_, S>) -> bool {
    let mut depth = 0usize;

    for ahead in 0..GENERIC_LOOKAHEAD {
        match parser.nth(ahead) {
            Kind::LessThan => depth += 1,
            Kind::GreaterThan => {
                depth -= 1;
                if depth == 0 {
                    return parser.nth(ahead + 1) == Kind::ParenOpen;
                }
            }
            Kind::Identifier | Kind::Dot | Kind::Comma => {}
            _ => return false,
        }
    }

    false
}

/// ```abnf
/// atom = literal / string / NAME / "(" expr ")" / block / if / while
///      / "return" [expr] / "goto" NAME / "break" / "continue"
/// ```
pub(super) fn atom<S: TokenSource>(parser: &mut Parser<'_, S>) {
    match parser.current() {
        Kind::LiteralInteger
        | Kind::LiteralFloat
        | Kind::LiteralCharacter
        | Kind::KeywordTrue
        | Kind::KeywordFalse => parser.always_collect(Kind::LiteralExpression, Parser::advance),

        Kind::LineStringStart | Kind::MultiLineStringStart => string(parser),

        Kind::Identifier => parser.always_collect(Kind::NameExpression, Parser::advance),

        Kind::ParenOpen => parser.always_collect(Kind::GroupingExpression, |parser| {
            parser.advance();
            EXPRESSION.parse(parser);
            parser.expect(Kind::ParenClose);
        }),

        Kind::CurlyOpen => parser.always_collect(Kind::BlockExpression, |parser| {
            parser.advance();
            block_contents(parser, true);
            parser.expect(Kind::CurlyClose);
        }),

        Kind::KeywordIf => parser.always_collect(Kind::IfExpression, |parser| {
            parser.advance();
            condition(parser);
            EXPRESSION.parse(parser);

            if parser.peek(Kind::KeywordElse) {
                parser.always_collect(Kind::ElseClause, |parser| {
                    parser.advance();
                    EXPRESSION.parse(parser);
                });
            }
        }),

        Kind::KeywordWhile => parser.always_collect(Kind::WhileExpression, |parser| {
            parser.advance();
            condition(parser);
            EXPRESSION.parse(parser);
        }),

        Kind::KeywordReturn => parser.always_collect(Kind::ReturnExpression, |parser| {
            parser.advance();
            if parser.peek_any(Expression::FIRST) {
                EXPRESSION.parse(parser);
            }
        }),

        Kind::KeywordGoto => parser.always_collect(Kind::GotoExpression, |parser| {
            parser.advance();
            parser.expect(Kind::Identifier);
        }),

        Kind::KeywordBreak => parser.always_collect(Kind::BreakExpression, Parser::advance),
        Kind::KeywordContinue => parser.always_collect(Kind::ContinueExpression, Parser::advance),

        _ => parser.unexpected_token(Kind::UnexpectedExpression, "an expression", EXPRESSION_SYNC),
    }
}

/// ```abnf
/// condition = "(" expr ")"
/// ```
fn condition<S: TokenSource>(parser: &mut Parser<'_, S>) {
    parser.expect(Kind::ParenOpen);
    EXPRESSION.parse(parser);
    parser.expect(Kind::ParenClose);
}

/// ```abnf
/// args = "(" [expr *("," expr)] ")"
/// ```
const ARGUMENTS: Arguments = Arguments;
struct Arguments;

impl Production for Arguments {
    const FIRST: &'static [Kind] = &[Kind::ParenOpen];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::ArgumentList, |parser| {
            parser.expect(Kind::ParenOpen);

            Separated {
                inner: EXPRESSION,
                stop: &[Kind::ParenClose, Kind::Semicolon, Kind::CurlyClose],
                close: None,
                unexpected: Kind::UnexpectedExpression,
                expected: "an argument",
            }
            .parse(parser);

            parser.expect(Kind::ParenClose);
        })
    }
}

/// ```abnf
/// string = string-start *(text / "\{" expr "}") string-end
/// text = 1*(CONTENT / NEWLINE)
/// ```
fn string<S: TokenSource>(parser: &mut Parser<'_, S>) {
    parser.always_collect(Kind::StringExpression, |parser| {
        let end = match parser.current() {
            Kind::MultiLineStringStart => Kind::MultiLineStringEnd,
            _ => Kind::LineStringEnd,
        };

        parser.advance();

        parser.always_collect(Kind::List, |parser| loop {
            match parser.current() {
                Kind::StringContent | Kind::StringNewline => {
                    parser.always_collect(Kind::TextStringPart, |parser| {
                        while parser.peek_any(&[Kind::StringContent, Kind::StringNewline]) {
                            parser.advance();
                        }
                    })
                }

                Kind::InterpolationStart => interpolation(parser),

                _ => break,
            }
        });

        parser.expect(end);
    })
}

fn interpolation<S: TokenSource>(parser: &mut Parser<'_, S>) {
    const SYNC: &[Kind] = &[Kind::InterpolationEnd, Kind::LineStringEnd, Kind::MultiLineStringEnd];

    parser.always_collect(Kind::InterpolationStringPart, |parser| {
        parser.advance();
        EXPRESSION.parse(parser);

        if !parser.is_done() && !parser.peek_any(SYNC) {
            parser.unexpected(Kind::UnexpectedExpression, "`}`", SYNC);
        }

        parser.expect(Kind::InterpolationEnd);
    })
}
