use super::parser::{Parser, Production, Separated};
use super::tokens::TokenSource;
use crate::syntax::green::SyntaxMessage;
use crate::syntax::Kind;

/// Tokens which may follow a type, and which a missing type leaves alone.
const TYPE_SYNC: &[Kind] = &[
    Kind::Comma,
    Kind::ParenOpen,
    Kind::ParenClose,
    Kind::GreaterThan,
    Kind::Assign,
    Kind::Semicolon,
    Kind::CurlyOpen,
    Kind::CurlyClose,
];

/// ```abnf
/// type = NAME *("." NAME / generic-args)
/// ```
pub(super) const TYPE: Type = Type;
pub(super) struct Type;

impl Production for Type {
    const FIRST: &'static [Kind] = &[Kind::Identifier];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        let start = parser.start();

        if parser.peek(Kind::Identifier) {
            parser.always_collect(Kind::NameType, Parser::advance);
        } else if parser.is_done() || parser.peek_any(TYPE_SYNC) {
            parser.always_collect(Kind::NameType, |parser| {
                parser.missing(Kind::Identifier, SyntaxMessage::expected_what("a type"))
            });
            return;
        } else {
            parser.unexpected_token(Kind::UnexpectedType, "a type", TYPE_SYNC);
            return;
        }

        loop {
            if parser.peek(Kind::Dot) {
                parser.advance();
                parser.expect(Kind::Identifier);
                parser.finish(Kind::MemberType, start);
            } else if parser.peek_any(GenericArguments::FIRST) {
                GENERIC_ARGUMENTS.parse(parser);
                parser.finish(Kind::GenericType, start);
            } else {
                break;
            }
        }
    }
}

/// ```abnf
/// generic-args = "<" [type *("," type)] ">"
/// ```
pub(super) const GENERIC_ARGUMENTS: GenericArguments = GenericArguments;
pub(super) struct GenericArguments;

impl Production for GenericArguments {
    const FIRST: &'static [Kind] = &[Kind::LessThan];

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::GenericArgumentList, |parser| {
            parser.expect(Kind::LessThan);

            Separated {
                inner: TYPE,
                stop: &[Kind::GreaterThan, Kind::ParenOpen, Kind::ParenClose, Kind::Semicolon],
                close: None,
                unexpected: Kind::UnexpectedType,
                expected: "a type",
            }
            .parse(parser);

            parser.expect(Kind::GreaterThan);
        })
    }
}
