use super::declarations::{label, Declaration, DECLARATION};
use super::expressions::{atom, Expression, EXPRESSION};
use super::parser::{constcat, Parser, Production};
use super::tokens::TokenSource;
use crate::syntax::Kind;

/// Where a skipped statement ends.
const STATEMENT_SYNC: &[Kind] = constcat!(Kind::Semicolon;
    &[Kind::Semicolon, Kind::CurlyClose],
    Declaration::FIRST,
    Expression::FIRST
);

/// Expressions which end in a block, and need no `;` as statements.
const BLOCK_LIKE: &[Kind] = &[Kind::KeywordIf, Kind::KeywordWhile, Kind::CurlyOpen];

/// ```abnf
/// block-contents = *stmt [expr]
/// ```
///
/// Parses statements up to, but not including, the closing `}` into a list.
/// With `allow_value`, a final expression not followed by `;` is the value of
/// the block, and is left on the stack after the list.
pub(super) fn block_contents<S: TokenSource>(parser: &mut Parser<'_, S>, allow_value: bool) {
    let start = parser.start();
    let mut value = None;

    while !parser.is_done() && !parser.peek(Kind::CurlyClose) {
        if statement(parser, allow_value) {
            value = Some(parser.pop());
            break;
        }
    }

    parser.finish(Kind::List, start);
    if let Some(value) = value {
        parser.push(value);
    }
}

/// ```abnf
/// stmt = ";" / decl / label / block-like-expr [";"] / expr ";"
/// ```
///
/// Returns `true` if what was parsed is not a statement but the value of the
/// enclosing block.
fn statement<S: TokenSource>(parser: &mut Parser<'_, S>, allow_value: bool) -> bool {
    if parser.peek(Kind::Semicolon) {
        parser.always_collect(Kind::EmptyStatement, |parser| parser.advance());
    } else if parser.peek_any(Declaration::FIRST) {
        parser.always_collect(Kind::DeclarationStatement, |parser| DECLARATION.parse(parser));
    } else if parser.peek(Kind::Identifier) && parser.nth(1) == Kind::Colon {
        parser.always_collect(Kind::DeclarationStatement, |parser| label(parser));
    } else if parser.peek_any(Expression::FIRST) {
        let start = parser.start();
        let block_like = parser.peek_any(BLOCK_LIKE);

        if block_like {
            atom(parser);
        } else {
            EXPRESSION.parse(parser);
        }

        if parser.consume(Kind::Semicolon) {
            parser.finish(Kind::ExpressionStatement, start);
        } else if allow_value && parser.peek(Kind::CurlyClose) {
            return true;
        } else {
            if !block_like {
                parser.expect(Kind::Semicolon);
            }

            parser.finish(Kind::ExpressionStatement, start);
        }
    } else {
        parser.unexpected(Kind::UnexpectedStatement, "a statement", STATEMENT_SYNC);
    }

    false
}
