use logos::Logos;

use crate::syntax::Kind;

/// The tokens of code (outside of strings) which can be recognized without any
/// lexer state. Keywords are lexed as identifiers and looked up afterwards.
#[derive(Logos, Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawToken {
    #[regex(r"[\p{XID_Start}_][\p{XID_Continue}]*")]
    Identifier,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0b[01][01_]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    Float,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    CurlyOpen,
    #[token("}")]
    CurlyClose,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,

    // Operators from other languages, lexed so that the parser can suggest the
    // right replacement.
    #[token("%")]
    Percent,
    #[token("||")]
    PipePipe,
    #[token("&&")]
    AmpersandAmpersand,
    #[token("!")]
    Bang,
}

impl RawToken {
    /// Get the token kind of a lexeme recognized as `self`.
    pub fn kind(&self, lexeme: &str) -> Kind {
        match self {
            Self::Identifier => Kind::keyword(lexeme).unwrap_or(Kind::Identifier),
            Self::Integer => Kind::LiteralInteger,
            Self::Float => Kind::LiteralFloat,
            Self::ParenOpen => Kind::ParenOpen,
            Self::ParenClose => Kind::ParenClose,
            Self::CurlyOpen => Kind::CurlyOpen,
            Self::CurlyClose => Kind::CurlyClose,
            Self::Dot => Kind::Dot,
            Self::Ellipsis => Kind::Ellipsis,
            Self::Comma => Kind::Comma,
            Self::Colon => Kind::Colon,
            Self::Semicolon => Kind::Semicolon,
            Self::Assign => Kind::Assign,
            Self::PlusAssign => Kind::PlusAssign,
            Self::MinusAssign => Kind::MinusAssign,
            Self::StarAssign => Kind::StarAssign,
            Self::SlashAssign => Kind::SlashAssign,
            Self::Plus => Kind::Plus,
            Self::Minus => Kind::Minus,
            Self::Star => Kind::Star,
            Self::Slash => Kind::Slash,
            Self::Equal => Kind::Equal,
            Self::NotEqual => Kind::NotEqual,
            Self::LessThan => Kind::LessThan,
            Self::GreaterThan => Kind::GreaterThan,
            Self::LessEqual => Kind::LessEqual,
            Self::GreaterEqual => Kind::GreaterEqual,
            Self::Percent => Kind::Percent,
            Self::PipePipe => Kind::PipePipe,
            Self::AmpersandAmpersand => Kind::AmpersandAmpersand,
            Self::Bang => Kind::Bang,
        }
    }
}
