//! Turns source text into green tokens with attached trivia.
//!
//! Trivia before a token becomes its leading trivia. Trivia after a token up
//! to and including the first line break becomes its trailing trivia. Lexing
//! never fails: anything unexpected still produces a token, with a message
//! attached to it.

mod string;
mod tokens;

#[cfg(test)]
mod tests;

use logos::Logos;
use smol_str::SmolStr;

use self::tokens::RawToken;
use super::green::{Node, SyntaxMessage, Token, Trivia};
use super::{Kind, TriviaKind};
use crate::source::SourceReader;

pub struct Lexer<'src> {
    source: &'src str,
    reader: SourceReader<'src>,
    modes: Vec<Mode>,
    finished: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    /// Ordinary code at the top level.
    Code,

    /// Code inside `\{ ... }` in a string. `depth` counts unclosed `{`.
    Interpolation { depth: usize },

    /// Inside `"..."`.
    LineString,

    /// Inside `"""..."""`. `cutoff` is the indentation of the closing quotes,
    /// which is stripped from every line.
    MultiLineString { cutoff: usize, line_start: bool },
}

/// The parts of a token other than its text, collected while lexing it.
/// Message offsets are relative to the start of the token text until the token
/// is finished.
#[derive(Debug, Default)]
struct Lexeme {
    leading: Vec<Trivia>,
    value: Option<String>,
    trailing: Vec<Trivia>,
    messages: Vec<SyntaxMessage>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, reader: SourceReader::new(source), modes: Vec::new(), finished: false }
    }

    /// Lex the next token. After a token of kind [`Kind::EndOfInput`] has been
    /// returned, callers should stop.
    pub fn lex(&mut self) -> Node {
        match self.mode() {
            Mode::Code | Mode::Interpolation { .. } => self.lex_code(),
            Mode::LineString => self.lex_line_string(),
            Mode::MultiLineString { cutoff, line_start } => {
                self.lex_multi_line_string(cutoff, line_start)
            }
        }
    }

    fn mode(&self) -> Mode {
        self.modes.last().copied().unwrap_or(Mode::Code)
    }

    fn set_mode(&mut self, mode: Mode) {
        match self.modes.last_mut() {
            Some(last) => *last = mode,
            None => self.modes.push(mode),
        }
    }

    fn in_code(&self) -> bool {
        matches!(self.mode(), Mode::Code | Mode::Interpolation { .. })
    }

    fn lex_code(&mut self) -> Node {
        let mut lexeme = Lexeme { leading: self.trivia(false), ..Default::default() };
        let start = self.reader.position();
        let kind = self.code_token(start, &mut lexeme);

        if kind == Kind::MultiLineStringStart {
            self.opening_quotes_trailer(start, &mut lexeme);
        } else if kind != Kind::EndOfInput && self.in_code() {
            lexeme.trailing = self.trivia(true);
        }

        self.finish(kind, start, lexeme)
    }

    fn code_token(&mut self, start: usize, lexeme: &mut Lexeme) -> Kind {
        if self.reader.is_end() {
            return Kind::EndOfInput;
        }

        let c = self.reader.peek(0, '\0');
        match c {
            '"' => return self.string_start(),
            '\'' => return self.character(start, lexeme),
            _ => {}
        }

        if let Mode::Interpolation { depth } = self.mode() {
            match c {
                '{' => self.set_mode(Mode::Interpolation { depth: depth + 1 }),
                '}' if depth == 0 => {
                    self.modes.pop();
                    self.reader.advance(1);
                    return Kind::InterpolationEnd;
                }
                '}' => self.set_mode(Mode::Interpolation { depth: depth - 1 }),
                _ => {}
            }
        }

        let mut raw = RawToken::lexer(self.reader.rest());
        match raw.next() {
            Some(Ok(token)) => {
                let width = raw.span().end;
                let text = self.reader.advance_bytes(width);
                token.kind(text)
            }

            _ => {
                let skipped = self.reader.advance(1);
                lexeme.messages.push(SyntaxMessage::unexpected_character(c).at(0, skipped.len()));
                Kind::Unknown
            }
        }
    }

    /// Lex a character literal. The cursor is at the opening `'`.
    fn character(&mut self, start: usize, lexeme: &mut Lexeme) -> Kind {
        self.reader.advance(1);

        match self.reader.peek(0, '\n') {
            '\'' => {
                self.reader.advance(1);
                lexeme.messages.push(SyntaxMessage::empty_character().at(0, 2));
                return Kind::LiteralCharacter;
            }

            c if is_newline(c) => {
                lexeme.messages.push(SyntaxMessage::unterminated_character().at(0, 1));
                return Kind::LiteralCharacter;
            }

            '\\' => lexeme.value = self.escape(start, lexeme).map(String::from),

            c => {
                self.reader.advance(1);
                lexeme.value = Some(c.into());
            }
        }

        if self.reader.peek(0, '\n') == '\'' {
            self.reader.advance(1);
        } else {
            let width = self.reader.position() - start;
            lexeme.messages.push(SyntaxMessage::unterminated_character().at(0, width));
        }

        Kind::LiteralCharacter
    }

    /// Lex an escape sequence. The cursor is at the `\`. Returns the escaped
    /// character, if the sequence is valid.
    fn escape(&mut self, text_start: usize, lexeme: &mut Lexeme) -> Option<char> {
        let offset = self.reader.position() - text_start;
        let escaped = match self.reader.peek(1, '\n') {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\'' => Some('\''),
            'u' if self.reader.peek(2, '\n') == '{' => {
                return self.unicode_escape(offset, lexeme);
            }
            _ => None,
        };

        if escaped.is_some() {
            self.reader.advance(2);
            return escaped;
        }

        let skipped = if is_newline(self.reader.peek(1, '\n')) {
            self.reader.advance(1)
        } else {
            self.reader.advance(2)
        };

        lexeme.messages.push(SyntaxMessage::illegal_escape(skipped).at(offset, skipped.len()));
        None
    }

    /// Lex `\u{XXXX}`. The cursor is at the `\`.
    fn unicode_escape(&mut self, offset: usize, lexeme: &mut Lexeme) -> Option<char> {
        let start = self.reader.position();
        self.reader.advance(3);

        let digits = self.count_while(|c| c.is_ascii_hexdigit());
        let digits = self.reader.advance_bytes(digits);
        let closed = self.reader.peek(0, '\n') == '}';
        if closed {
            self.reader.advance(1);
        }

        let escaped = closed
            .then(|| u32::from_str_radix(digits, 16).ok())
            .flatten()
            .and_then(char::from_u32);

        if escaped.is_none() {
            let sequence = &self.source[start..self.reader.position()];
            lexeme
                .messages
                .push(SyntaxMessage::illegal_escape(sequence).at(offset, sequence.len()));
        }

        escaped
    }

    /// Lex a run of trivia. Trailing trivia stops after the first line break.
    fn trivia(&mut self, trailing: bool) -> Vec<Trivia> {
        let mut trivia = Vec::new();

        loop {
            let c = self.reader.peek(0, '\0');

            if let Some(width) = self.newline_width() {
                trivia.push(self.take(TriviaKind::Newline, width));
                if trailing {
                    break;
                }
            } else if is_inline_whitespace(c) {
                let width = self.count_while(is_inline_whitespace);
                trivia.push(self.take(TriviaKind::Whitespace, width));
            } else if c == '/' && self.reader.peek(1, '\0') == '/' {
                let documentation =
                    self.reader.peek(2, '\0') == '/' && self.reader.peek(3, '\0') != '/';
                let kind = if documentation {
                    TriviaKind::DocumentationComment
                } else {
                    TriviaKind::LineComment
                };

                let width = self.count_while(|c| !is_newline(c));
                trivia.push(self.take(kind, width));
            } else {
                break;
            }
        }

        trivia
    }

    /// The width of the line break at the cursor, if there is one. `\r\n` is a
    /// single line break.
    fn newline_width(&self) -> Option<usize> {
        match (self.reader.peek(0, '\0'), self.reader.peek(1, '\0')) {
            ('\r', '\n') => Some(2),
            ('\r', _) | ('\n', _) => Some(1),
            _ => None,
        }
    }

    /// The width in bytes of the longest prefix of the remaining input whose
    /// characters all satisfy `predicate`.
    fn count_while(&self, predicate: impl Fn(char) -> bool) -> usize {
        self.reader
            .rest()
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map_or(self.reader.rest().len(), |(index, _)| index)
    }

    fn take(&mut self, kind: TriviaKind, width: usize) -> Trivia {
        Trivia { kind, text: self.reader.advance_bytes(width).into() }
    }

    /// Build a token whose text starts at `start` and ends at the cursor (not
    /// counting any trailing trivia already lexed).
    fn finish(&self, kind: Kind, start: usize, lexeme: Lexeme) -> Node {
        let trailing_width: usize = lexeme.trailing.iter().map(|trivia| trivia.text.len()).sum();
        let text = &self.source[start..self.reader.position() - trailing_width];
        let leading_width: usize = lexeme.leading.iter().map(|trivia| trivia.text.len()).sum();

        let messages = lexeme
            .messages
            .into_iter()
            .map(|message| {
                let offset = message.offset + leading_width;
                SyntaxMessage { offset, ..message }
            })
            .collect();

        Node::token(
            kind,
            Token {
                text: SmolStr::new(text),
                value: lexeme.value.map(SmolStr::from),
                leading: lexeme.leading.into(),
                trailing: lexeme.trailing.into(),
                messages,
            },
        )
    }
}

impl Iterator for Lexer<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.lex();
        if token.kind() == Kind::EndOfInput {
            self.finished = true;
        }

        Some(token)
    }
}

/// Lex an entire source into a vector of tokens, ending with
/// [`Kind::EndOfInput`].
pub fn tokenize(source: &str) -> Vec<Node> {
    let tokens: Vec<_> = Lexer::new(source).collect();
    log::trace!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    tokens
}

fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_inline_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_newline(c)
}
