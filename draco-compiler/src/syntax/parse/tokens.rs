use std::collections::VecDeque;

use crate::syntax::green::Node;
use crate::syntax::lexer::Lexer;
use crate::syntax::Kind;

/// Where the parser gets its tokens from. Sources must support peeking a
/// bounded number of tokens ahead, and must keep producing
/// [`Kind::EndOfInput`] once the input is exhausted.
pub trait TokenSource {
    /// The kind of the token `ahead` tokens past the current one.
    fn peek(&mut self, ahead: usize) -> Kind;

    /// Take the current token. At the end of input this returns the end token
    /// without moving past it.
    fn advance(&mut self) -> Node;
}

/// A token source over a fully lexed input.
pub struct ArrayTokens {
    tokens: Vec<Node>,
    index: usize,
}

impl ArrayTokens {
    /// Create a source from lexed tokens. The last token must be the end of
    /// input.
    pub fn new(tokens: Vec<Node>) -> Self {
        assert_eq!(
            Some(Kind::EndOfInput),
            tokens.last().map(Node::kind),
            "token array must end with the end of input"
        );

        Self { tokens, index: 0 }
    }
}

impl TokenSource for ArrayTokens {
    fn peek(&mut self, ahead: usize) -> Kind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.index + ahead).min(last)].kind()
    }

    fn advance(&mut self) -> Node {
        let token = self.tokens[self.index].clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }

        token
    }
}

/// A token source which lexes on demand, buffering only as many tokens as the
/// parser has peeked at.
pub struct StreamingTokens<'src> {
    lexer: Lexer<'src>,
    buffer: VecDeque<Node>,
}

impl<'src> StreamingTokens<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { lexer: Lexer::new(source), buffer: VecDeque::new() }
    }

    fn fill(&mut self, ahead: usize) {
        while self.buffer.len() <= ahead {
            if self.buffer.back().is_some_and(|token| token.kind() == Kind::EndOfInput) {
                break;
            }

            let token = self.lexer.lex();
            self.buffer.push_back(token);
        }
    }
}

impl TokenSource for StreamingTokens<'_> {
    fn peek(&mut self, ahead: usize) -> Kind {
        self.fill(ahead);
        let index = ahead.min(self.buffer.len() - 1);
        self.buffer[index].kind()
    }

    fn advance(&mut self) -> Node {
        self.fill(0);
        match self.buffer.front() {
            Some(token) if token.kind() == Kind::EndOfInput => token.clone(),
            _ => self.buffer.pop_front().expect("the buffer was filled above"),
        }
    }
}
