use super::expressions::EXPRESSION;
use super::parser::{constcat, Parser, Production, Separated};
use super::statements::block_contents;
use super::tokens::TokenSource;
use super::types::TYPE;
use crate::syntax::Kind;

/// Where recovery inside a declaration gives up and lets the enclosing list
/// try again.
const DECLARATION_SYNC: &[Kind] =
    constcat!(Kind::CurlyClose; Declaration::FIRST, &[Kind::CurlyClose]);

/// Where a parameter list ends, even if its closing `)` is missing.
const PARAMETER_STOP: &[Kind] = constcat!(Kind::ParenClose;
    &[Kind::ParenClose, Kind::CurlyOpen, Kind::CurlyClose, Kind::Assign, Kind::Semicolon],
    Declaration::FIRST
);

const GENERIC_PARAMETER_STOP: &[Kind] = constcat!(Kind::GreaterThan;
    &[Kind::GreaterThan, Kind::ParenOpen],
    PARAMETER_STOP
);

/// ```abnf
/// unit = *decl EOF
/// ```
pub(super) const UNIT: Unit = Unit;
pub(super) struct Unit;

impl Production for Unit {
    const FIRST: &'static [Kind] = Declaration::FIRST;

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::CompilationUnit, |parser| {
            parser.always_collect(Kind::List, |parser| {
                while !parser.is_done() {
                    if parser.peek_any(Declaration::FIRST) {
                        DECLARATION.parse(parser);
                    } else {
                        let kind = Kind::UnexpectedDeclaration;
                        parser.unexpected(kind, "a declaration", Declaration::FIRST);
                    }
                }
            });

            parser.expect(Kind::EndOfInput);
        })
    }
}

/// ```abnf
/// decl = func / var
/// ```
pub(super) const DECLARATION: Declaration = Declaration;
pub(super) struct Declaration;

impl Production for Declaration {
    const FIRST: &'static [Kind] = constcat!(Kind::KeywordFunc; Function::FIRST, Variable::FIRST);

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        if parser.peek_any(Function::FIRST) {
            FUNCTION.parse(parser)
        } else {
            VARIABLE.parse(parser)
        }
    }
}

/// ```abnf
/// func = "func" NAME [generics] params [type-spec] body
/// ```
const FUNCTION: Function = Function;
struct Function;

impl Production for Function {
    const FIRST: &'static [Kind] = &[Kind::KeywordFunc];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::FunctionDeclaration, |parser| {
            parser.expect(Kind::KeywordFunc);
            parser.expect(Kind::Identifier);

            if parser.peek_any(GenericParameters::FIRST) {
                GENERIC_PARAMETERS.parse(parser);
            }

            PARAMETERS.parse(parser);

            if parser.peek_any(TypeSpecifier::FIRST) {
                TYPE_SPECIFIER.parse(parser);
            }

            BODY.parse(parser);
        })
    }
}

/// ```abnf
/// generics = "<" [NAME *("," NAME)] ">"
/// ```
const GENERIC_PARAMETERS: GenericParameters = GenericParameters;
struct GenericParameters;

impl Production for GenericParameters {
    const FIRST: &'static [Kind] = &[Kind::LessThan];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::GenericParameterList, |parser| {
            parser.expect(Kind::LessThan);

            Separated {
                inner: GENERIC_PARAMETER,
                stop: GENERIC_PARAMETER_STOP,
                close: None,
                unexpected: Kind::UnexpectedParameter,
                expected: "a generic parameter",
            }
            .parse(parser);

            parser.expect(Kind::GreaterThan);
        })
    }
}

const GENERIC_PARAMETER: GenericParameter = GenericParameter;
struct GenericParameter;

impl Production for GenericParameter {
    const FIRST: &'static [Kind] = &[Kind::Identifier];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::GenericParameter, |parser| parser.expect(Kind::Identifier))
    }
}

/// ```abnf
/// params = "(" [param *("," param)] ")"
/// ```
const PARAMETERS: Parameters = Parameters;
struct Parameters;

impl Production for Parameters {
    const FIRST: &'static [Kind] = &[Kind::ParenOpen];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::ParameterList, |parser| {
            let opened = parser.peek(Kind::ParenOpen);
            parser.expect(Kind::ParenOpen);

            Separated {
                inner: PARAMETER,
                stop: PARAMETER_STOP,
                close: opened.then_some(Kind::ParenClose),
                unexpected: Kind::UnexpectedParameter,
                expected: "a parameter",
            }
            .parse(parser);

            parser.expect(Kind::ParenClose);
        })
    }
}

/// ```abnf
/// param = ["..."] NAME type-spec
/// ```
const PARAMETER: Parameter = Parameter;
struct Parameter;

impl Production for Parameter {
    const FIRST: &'static [Kind] = &[Kind::Ellipsis, Kind::Identifier];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::Parameter, |parser| {
            parser.consume(Kind::Ellipsis);
            parser.expect(Kind::Identifier);
            TYPE_SPECIFIER.parse(parser);
        })
    }
}

/// ```abnf
/// type-spec = ":" type
/// ```
pub(super) const TYPE_SPECIFIER: TypeSpecifier = TypeSpecifier;
pub(super) struct TypeSpecifier;

impl Production for TypeSpecifier {
    const FIRST: &'static [Kind] = &[Kind::Colon];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::TypeSpecifier, |parser| {
            parser.expect(Kind::Colon);
            TYPE.parse(parser);
        })
    }
}

/// ```abnf
/// body = "{" *stmt "}" / "=" expr ";"
/// ```
const BODY: Body = Body;
struct Body;

impl Production for Body {
    const FIRST: &'static [Kind] = &[Kind::CurlyOpen, Kind::Assign];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        if parser.peek(Kind::CurlyOpen) {
            parser.always_collect(Kind::BlockFunctionBody, |parser| {
                parser.advance();
                block_contents(parser, false);
                parser.expect(Kind::CurlyClose);
            })
        } else if parser.peek(Kind::Assign) {
            parser.always_collect(Kind::InlineFunctionBody, |parser| {
                parser.advance();
                EXPRESSION.parse(parser);
                parser.expect(Kind::Semicolon);
            })
        } else {
            parser.unexpected(Kind::UnexpectedFunctionBody, "a function body", DECLARATION_SYNC);
        }
    }
}

/// ```abnf
/// var = ("var" / "val") NAME [type-spec] ["=" expr] ";"
/// ```
const VARIABLE: Variable = Variable;
struct Variable;

impl Production for Variable {
    const FIRST: &'static [Kind] = &[Kind::KeywordVar, Kind::KeywordVal];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::VariableDeclaration, |parser| {
            if !parser.consume_any(Self::FIRST) {
                parser.expect(Kind::KeywordVar);
            }

            parser.expect(Kind::Identifier);

            if parser.peek_any(TypeSpecifier::FIRST) {
                TYPE_SPECIFIER.parse(parser);
            }

            if parser.peek(Kind::Assign) {
                parser.always_collect(Kind::ValueSpecifier, |parser| {
                    parser.advance();
                    EXPRESSION.parse(parser);
                });
            }

            parser.expect(Kind::Semicolon);
        })
    }
}

/// ```abnf
/// label = NAME ":"
/// ```
pub(super) fn label<S: TokenSource>(parser: &mut Parser<'_, S>) {
    parser.always_collect(Kind::LabelDeclaration, |parser| {
        parser.expect(Kind::Identifier);
        parser.expect(Kind::Colon);
    })
}
