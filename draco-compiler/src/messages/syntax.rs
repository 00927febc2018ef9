use super::error;
use crate::errors::{Phase, Template};
use crate::syntax::green::SyntaxMessage;
use crate::syntax::Kind;

pub(crate) static UNEXPECTED_CHARACTER: Template =
    error("DS0001", Phase::Syntax, "unexpected character", "unexpected character `{0}`");
pub(crate) static UNTERMINATED_STRING: Template =
    error("DS0002", Phase::Syntax, "unterminated string", "unterminated string literal");
pub(crate) static UNTERMINATED_CHARACTER: Template =
    error("DS0003", Phase::Syntax, "unterminated character", "unterminated character literal");
pub(crate) static EMPTY_CHARACTER: Template =
    error("DS0004", Phase::Syntax, "empty character", "empty character literal");
pub(crate) static ILLEGAL_ESCAPE: Template =
    error("DS0005", Phase::Syntax, "illegal escape", "illegal escape sequence `{0}`");
pub(crate) static INSUFFICIENT_INDENTATION: Template = error(
    "DS0006",
    Phase::Syntax,
    "insufficient indentation",
    "this line is indented less than the closing quotes of its string",
);
pub(crate) static EXTRA_AFTER_OPENING_QUOTES: Template = error(
    "DS0007",
    Phase::Syntax,
    "content after opening quotes",
    "the content of a multi-line string must start on a new line",
);
pub(crate) static CLOSING_QUOTES_NOT_ALONE: Template = error(
    "DS0008",
    Phase::Syntax,
    "closing quotes not alone",
    "the closing quotes of a multi-line string must be on their own line",
);
pub(crate) static EXPECTED: Template =
    error("DS0009", Phase::Syntax, "expected token", "expected {0}");
pub(crate) static UNEXPECTED_INPUT: Template =
    error("DS0010", Phase::Syntax, "unexpected input", "unexpected input while parsing {0}");
pub(crate) static HERITAGE_OPERATOR: Template = error(
    "DS0011",
    Phase::Syntax,
    "unsupported operator",
    "`{0}` is not an operator, use `{1}` instead",
);

impl SyntaxMessage {
    pub(crate) fn unexpected_character(c: char) -> Self {
        Self::new(&UNEXPECTED_CHARACTER, [c.to_string()])
    }

    pub(crate) fn unterminated_string() -> Self {
        Self::bare(&UNTERMINATED_STRING)
    }

    pub(crate) fn unterminated_character() -> Self {
        Self::bare(&UNTERMINATED_CHARACTER)
    }

    pub(crate) fn empty_character() -> Self {
        Self::bare(&EMPTY_CHARACTER)
    }

    pub(crate) fn illegal_escape(sequence: &str) -> Self {
        Self::new(&ILLEGAL_ESCAPE, [sequence])
    }

    pub(crate) fn insufficient_indentation() -> Self {
        Self::bare(&INSUFFICIENT_INDENTATION)
    }

    pub(crate) fn extra_after_opening_quotes() -> Self {
        Self::bare(&EXTRA_AFTER_OPENING_QUOTES)
    }

    pub(crate) fn closing_quotes_not_alone() -> Self {
        Self::bare(&CLOSING_QUOTES_NOT_ALONE)
    }

    pub(crate) fn expected(kind: Kind) -> Self {
        Self::new(&EXPECTED, [kind.describe()])
    }

    pub(crate) fn expected_what(what: &str) -> Self {
        Self::new(&EXPECTED, [what])
    }

    pub(crate) fn unexpected_input(while_parsing: &str) -> Self {
        Self::new(&UNEXPECTED_INPUT, [while_parsing])
    }

    pub(crate) fn heritage_operator(found: &str, replacement: &str) -> Self {
        Self::new(&HERITAGE_OPERATOR, [found, replacement])
    }
}
