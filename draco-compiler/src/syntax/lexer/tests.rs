use proptest::{prop_assert, prop_assert_eq, proptest};

use super::tokenize;
use crate::syntax::green::Node;
use crate::syntax::{Kind, TriviaKind};

fn kinds(source: &str) -> Vec<Kind> {
    tokenize(source).iter().map(Node::kind).collect()
}

fn texts(source: &str) -> Vec<String> {
    tokenize(source)
        .iter()
        .map(|token| token.as_token().unwrap().text().to_string())
        .collect()
}

proptest! {
    #[test]
    fn tokens_cover_the_source(s in r"(.|\n)*") {
        let tokens = tokenize(&s);
        let written: String = tokens.iter().map(Node::write).collect();
        prop_assert_eq!(s, written);
    }

    #[test]
    fn ends_exactly_once(s in r"(.|\n)*") {
        let tokens = tokenize(&s);
        prop_assert_eq!(Some(Kind::EndOfInput), tokens.last().map(Node::kind));
        let ends = tokens.iter().filter(|token| token.kind() == Kind::EndOfInput).count();
        prop_assert_eq!(1, ends);
    }

    #[test]
    fn only_end_of_input_is_empty(s in r"[a-z0-9 (){}+*/<>=.,;:'\x22\\\n-]*") {
        let tokens = tokenize(&s);
        for token in &tokens[..tokens.len() - 1] {
            let text = token.as_token().unwrap().text();
            let allowed = matches!(
                token.kind(),
                Kind::StringContent | Kind::LineStringEnd | Kind::MultiLineStringEnd
            );
            prop_assert!(allowed || !text.is_empty(), "{:?}", token);
        }
    }
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        vec![Kind::KeywordFunc, Kind::Identifier, Kind::KeywordWhile, Kind::Identifier, Kind::EndOfInput],
        kinds("func main while whiles")
    );
}

#[test]
fn numbers() {
    assert_eq!(
        vec![
            Kind::LiteralInteger,
            Kind::LiteralInteger,
            Kind::LiteralFloat,
            Kind::LiteralFloat,
            Kind::EndOfInput
        ],
        kinds("12 0xff 1.5 2e10")
    );
}

#[test]
fn member_access_on_integer_is_not_a_float() {
    assert_eq!(
        vec![Kind::LiteralInteger, Kind::Dot, Kind::Identifier, Kind::EndOfInput],
        kinds("1.x")
    );
}

#[test]
fn trailing_trivia_stops_after_newline() {
    let tokens = tokenize("a // note\n\n  b");
    let a = tokens[0].as_token().unwrap();
    let b = tokens[1].as_token().unwrap();

    let trailing: Vec<_> = a.trailing().iter().map(|trivia| trivia.kind).collect();
    assert_eq!(vec![TriviaKind::Whitespace, TriviaKind::LineComment, TriviaKind::Newline], trailing);

    let leading: Vec<_> = b.leading().iter().map(|trivia| trivia.kind).collect();
    assert_eq!(vec![TriviaKind::Newline, TriviaKind::Whitespace], leading);
}

#[test]
fn documentation_comments() {
    let tokens = tokenize("/// docs\n//// not docs\nfunc");
    let func = tokens[0].as_token().unwrap();
    let leading: Vec<_> = func.leading().iter().map(|trivia| trivia.kind).collect();

    assert_eq!(
        vec![
            TriviaKind::DocumentationComment,
            TriviaKind::Newline,
            TriviaKind::LineComment,
            TriviaKind::Newline
        ],
        leading
    );
}

#[test]
fn comment_at_end_of_input() {
    let tokens = tokenize("x // done");
    assert_eq!(2, tokens.len());
    assert_eq!("x // done", tokens.iter().map(Node::write).collect::<String>());
}

#[test]
fn unknown_characters_carry_a_message() {
    let tokens = tokenize("a $ b");
    assert_eq!(Kind::Unknown, tokens[1].kind());
    assert_eq!(1, tokens[1].messages().len());
}

#[test]
fn heritage_operators_are_tokens() {
    assert_eq!(
        vec![Kind::Percent, Kind::PipePipe, Kind::AmpersandAmpersand, Kind::Bang, Kind::NotEqual, Kind::EndOfInput],
        kinds("% || && ! !=")
    );
}

#[test]
fn line_string() {
    assert_eq!(
        vec![Kind::LineStringStart, Kind::StringContent, Kind::LineStringEnd, Kind::EndOfInput],
        kinds(r#""hello world""#)
    );

    let tokens = tokenize(r#""a\tb""#);
    assert_eq!(Some("a\tb"), tokens[1].as_token().unwrap().value());
}

#[test]
fn empty_line_string() {
    assert_eq!(vec![Kind::LineStringStart, Kind::LineStringEnd, Kind::EndOfInput], kinds("\"\""));
}

#[test]
fn unterminated_line_string() {
    let tokens = tokenize("\"abc\nx");
    let kinds: Vec<_> = tokens.iter().map(Node::kind).collect();
    assert_eq!(
        vec![Kind::LineStringStart, Kind::StringContent, Kind::LineStringEnd, Kind::Identifier, Kind::EndOfInput],
        kinds
    );

    assert_eq!(1, tokens[2].messages().len());
    assert_eq!("", tokens[2].as_token().unwrap().text());
}

#[test]
fn interpolation() {
    assert_eq!(
        vec![
            Kind::LineStringStart,
            Kind::StringContent,
            Kind::InterpolationStart,
            Kind::Identifier,
            Kind::Plus,
            Kind::CurlyOpen,
            Kind::Identifier,
            Kind::CurlyClose,
            Kind::InterpolationEnd,
            Kind::LineStringEnd,
            Kind::EndOfInput,
        ],
        kinds(r#""x = \{x + {y}}""#)
    );
}

#[test]
fn nested_strings_in_interpolation() {
    assert_eq!(
        vec![
            Kind::LineStringStart,
            Kind::InterpolationStart,
            Kind::LineStringStart,
            Kind::StringContent,
            Kind::LineStringEnd,
            Kind::InterpolationEnd,
            Kind::LineStringEnd,
            Kind::EndOfInput,
        ],
        kinds(r#""\{"inner"}""#)
    );
}

#[test]
fn illegal_escape() {
    let tokens = tokenize(r#""a\qb""#);
    let content = &tokens[1];
    assert_eq!(1, content.messages().len());
    assert_eq!(Some("ab"), content.as_token().unwrap().value());
}

#[test]
fn unicode_escape() {
    let tokens = tokenize(r#""\u{1F600}""#);
    assert_eq!(Some("\u{1F600}"), tokens[1].as_token().unwrap().value());
    assert!(tokens[1].messages().is_empty());

    let tokens = tokenize(r#""\u{zz}""#);
    assert!(!tokens[1].messages().is_empty());
}

#[test]
fn characters() {
    let tokens = tokenize(r"'a' '\n' ''");
    assert_eq!(Some("a"), tokens[0].as_token().unwrap().value());
    assert_eq!(Some("\n"), tokens[1].as_token().unwrap().value());
    assert_eq!(Kind::LiteralCharacter, tokens[2].kind());
    assert_eq!(1, tokens[2].messages().len());
}

#[test]
fn unterminated_character() {
    let tokens = tokenize("'a\nb");
    assert_eq!(Kind::LiteralCharacter, tokens[0].kind());
    assert_eq!(1, tokens[0].messages().len());
    assert_eq!(Kind::Identifier, tokens[1].kind());
}

#[test]
fn multi_line_string_strips_closing_indentation() {
    let source = "\"\"\"\n    first\n      second\n    \"\"\"";
    let tokens = tokenize(source);

    assert_eq!(
        vec![
            Kind::MultiLineStringStart,
            Kind::StringContent,
            Kind::StringNewline,
            Kind::StringContent,
            Kind::MultiLineStringEnd,
            Kind::EndOfInput,
        ],
        tokens.iter().map(Node::kind).collect::<Vec<_>>()
    );

    assert_eq!(Some("first"), tokens[1].as_token().unwrap().value());
    assert_eq!(Some("  second"), tokens[3].as_token().unwrap().value());
    assert!(tokens.iter().all(|token| token.messages().is_empty()));
    assert_eq!(source, tokens.iter().map(Node::write).collect::<String>());
}

#[test]
fn multi_line_string_insufficient_indentation() {
    let source = "\"\"\"\n  short\n    \"\"\"";
    let tokens = tokenize(source);

    assert_eq!(Kind::StringContent, tokens[1].kind());
    assert_eq!(1, tokens[1].messages().len());
    assert_eq!(source, tokens.iter().map(Node::write).collect::<String>());
}

#[test]
fn multi_line_string_content_after_opening_quotes() {
    let tokens = tokenize("\"\"\"oops\n\"\"\"");
    assert_eq!(Kind::MultiLineStringStart, tokens[0].kind());
    assert_eq!(1, tokens[0].messages().len());
}

#[test]
fn multi_line_string_closing_quotes_not_alone() {
    let tokens = tokenize("\"\"\"\nabc\"\"\"");
    let end = tokens.iter().find(|token| token.kind() == Kind::MultiLineStringEnd).unwrap();
    assert_eq!(1, end.messages().len());
}

#[test]
fn interpolation_in_multi_line_string() {
    assert_eq!(
        vec!["\"\"\"", "a ", "\\{", "b", "}", "\"\"\"", ""],
        texts("\"\"\"\na \\{b}\n\"\"\"")
    );
}
