use super::{is_newline, Lexeme, Lexer, Mode};
use crate::syntax::green::{Node, SyntaxMessage};
use crate::syntax::{Kind, TriviaKind};

const TRIPLE_QUOTES: &str = "\"\"\"";

impl Lexer<'_> {
    /// Lex the opening quotes of a string and enter the matching string mode.
    /// The cursor is at the first `"`.
    pub(super) fn string_start(&mut self) -> Kind {
        if self.reader.rest().starts_with(TRIPLE_QUOTES) {
            self.reader.advance(3);
            let cutoff = closing_indentation(self.reader.rest()).unwrap_or(0);
            self.modes.push(Mode::MultiLineString { cutoff, line_start: false });
            Kind::MultiLineStringStart
        } else {
            self.reader.advance(1);
            self.modes.push(Mode::LineString);
            Kind::LineStringStart
        }
    }

    /// The opening quotes of a multi-line string may only be followed by
    /// whitespace and a line break, all of which is trailing trivia.
    pub(super) fn opening_quotes_trailer(&mut self, start: usize, lexeme: &mut Lexeme) {
        let width = self.count_while(is_indentation);
        if width > 0 {
            lexeme.trailing.push(self.take(TriviaKind::Whitespace, width));
        }

        if let Some(width) = self.newline_width() {
            lexeme.trailing.push(self.take(TriviaKind::Newline, width));
            if let Mode::MultiLineString { cutoff, .. } = self.mode() {
                self.set_mode(Mode::MultiLineString { cutoff, line_start: true });
            }
        } else if !self.reader.is_end() {
            let offset = self.reader.position() - start;
            lexeme.messages.push(SyntaxMessage::extra_after_opening_quotes().at(offset, 0));
        }
    }

    pub(super) fn lex_line_string(&mut self) -> Node {
        let start = self.reader.position();
        let mut lexeme = Lexeme::default();

        // Peeking past the end gives a line break, so the end of input also
        // ends the string.
        let c = self.reader.peek(0, '\n');
        if is_newline(c) {
            self.modes.pop();
            lexeme.messages.push(SyntaxMessage::unterminated_string());
            return self.finish(Kind::LineStringEnd, start, lexeme);
        }

        if c == '"' {
            self.reader.advance(1);
            self.modes.pop();
            return self.finish_delimiter(Kind::LineStringEnd, start, lexeme);
        }

        if self.at_interpolation() {
            return self.interpolation_start(start, lexeme);
        }

        let mut value = String::new();
        loop {
            let c = self.reader.peek(0, '\n');
            if is_newline(c) || c == '"' || self.at_interpolation() {
                break;
            }

            if c == '\\' {
                value.extend(self.escape(start, &mut lexeme));
            } else {
                value.push(c);
                self.reader.advance(1);
            }
        }

        lexeme.value = Some(value);
        self.finish(Kind::StringContent, start, lexeme)
    }

    pub(super) fn lex_multi_line_string(&mut self, cutoff: usize, line_start: bool) -> Node {
        let mut lexeme = Lexeme::default();

        if line_start {
            self.set_mode(Mode::MultiLineString { cutoff, line_start: false });

            let indentation = self.count_while(is_indentation);
            let closing = self.reader.rest()[indentation..].starts_with(TRIPLE_QUOTES);
            let stripped = if closing { indentation } else { indentation.min(cutoff) };

            if stripped > 0 {
                lexeme.leading.push(self.take(TriviaKind::Whitespace, stripped));
            }

            let blank = self.newline_width().is_some() || self.reader.is_end();
            if !closing && !blank && indentation < cutoff {
                lexeme.messages.push(SyntaxMessage::insufficient_indentation());
            }
        }

        let start = self.reader.position();

        if self.reader.is_end() {
            self.modes.pop();
            lexeme.messages.push(SyntaxMessage::unterminated_string());
            return self.finish(Kind::MultiLineStringEnd, start, lexeme);
        }

        if let Some(width) = self.newline_width() {
            if self.closing_line_follows(width) {
                lexeme.leading.push(self.take(TriviaKind::Newline, width));
                let indentation = self.count_while(is_indentation);
                if indentation > 0 {
                    lexeme.leading.push(self.take(TriviaKind::Whitespace, indentation));
                }

                return self.closing_quotes(lexeme);
            }

            self.reader.advance_bytes(width);
            self.set_mode(Mode::MultiLineString { cutoff, line_start: true });
            lexeme.value = Some("\n".into());
            return self.finish(Kind::StringNewline, start, lexeme);
        }

        if self.reader.rest().starts_with(TRIPLE_QUOTES) {
            if !line_start {
                lexeme.messages.push(SyntaxMessage::closing_quotes_not_alone().at(0, 3));
            }

            return self.closing_quotes(lexeme);
        }

        if self.at_interpolation() {
            return self.interpolation_start(start, lexeme);
        }

        let mut value = String::new();
        loop {
            let c = self.reader.peek(0, '\n');
            let done = is_newline(c)
                || self.reader.rest().starts_with(TRIPLE_QUOTES)
                || self.at_interpolation();

            if done {
                break;
            }

            if c == '\\' {
                value.extend(self.escape(start, &mut lexeme));
            } else {
                value.push(c);
                self.reader.advance(1);
            }
        }

        lexeme.value = Some(value);
        self.finish(Kind::StringContent, start, lexeme)
    }

    /// Lex `"""` closing a multi-line string. Leading trivia has already been
    /// collected.
    fn closing_quotes(&mut self, lexeme: Lexeme) -> Node {
        let start = self.reader.position();
        self.reader.advance(3);
        self.modes.pop();
        self.finish_delimiter(Kind::MultiLineStringEnd, start, lexeme)
    }

    fn at_interpolation(&self) -> bool {
        self.reader.peek(0, '\n') == '\\' && self.reader.peek(1, '\n') == '{'
    }

    fn interpolation_start(&mut self, start: usize, mut lexeme: Lexeme) -> Node {
        self.reader.advance(2);
        self.modes.push(Mode::Interpolation { depth: 0 });
        lexeme.trailing = self.trivia(true);
        self.finish(Kind::InterpolationStart, start, lexeme)
    }

    /// Finish a token which leaves string mode, giving it trailing trivia if
    /// the lexer is back in code.
    fn finish_delimiter(&mut self, kind: Kind, start: usize, mut lexeme: Lexeme) -> Node {
        if self.in_code() {
            lexeme.trailing = self.trivia(true);
        }

        self.finish(kind, start, lexeme)
    }

    /// Returns `true` if the line after the line break of `newline_width`
    /// bytes at the cursor holds the closing quotes.
    fn closing_line_follows(&self, newline_width: usize) -> bool {
        let next_line = &self.reader.rest()[newline_width..];
        next_line.trim_start_matches(is_indentation).starts_with(TRIPLE_QUOTES)
    }
}

/// The indentation of the first line after the current one which starts with
/// `"""`, in bytes.
fn closing_indentation(rest: &str) -> Option<usize> {
    rest.lines().skip(1).find_map(|line| {
        let trimmed = line.trim_start_matches(is_indentation);
        trimmed.starts_with(TRIPLE_QUOTES).then(|| line.len() - trimmed.len())
    })
}

fn is_indentation(c: char) -> bool {
    c == ' ' || c == '\t'
}
