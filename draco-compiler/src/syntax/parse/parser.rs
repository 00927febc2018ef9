use super::tokens::TokenSource;
use crate::syntax::green::{GreenCache, Node, SyntaxMessage};
use crate::syntax::Kind;

/// Builds a green tree bottom-up on a stack. Productions push tokens and then
/// wrap a suffix of the stack into a new node.
pub(super) struct Parser<'a, S> {
    tokens: S,
    cache: &'a GreenCache,
    stack: Vec<Node>,
}

/// Parser bases
impl<'a, S: TokenSource> Parser<'a, S> {
    pub fn new(tokens: S, cache: &'a GreenCache) -> Self {
        Self { tokens, cache, stack: Vec::new() }
    }

    /// Take the single finished node off the stack.
    pub fn finish_root(mut self) -> Node {
        debug_assert_eq!(1, self.stack.len(), "exactly one root after parsing");
        self.stack.pop().expect("the parser produced no root")
    }

    pub fn current(&mut self) -> Kind {
        self.tokens.peek(0)
    }

    pub fn nth(&mut self, ahead: usize) -> Kind {
        self.tokens.peek(ahead)
    }

    pub fn is_done(&mut self) -> bool {
        self.current() == Kind::EndOfInput
    }

    pub fn peek(&mut self, kind: Kind) -> bool {
        self.current() == kind
    }

    pub fn peek_any(&mut self, kinds: &[Kind]) -> bool {
        kinds.contains(&self.current())
    }

    /// Move the current token onto the stack.
    pub fn advance(&mut self) {
        let token = self.tokens.advance();
        self.stack.push(self.cache.intern(token));
    }

    /// Move the current token onto the stack, attaching a message to its text.
    pub fn advance_with(&mut self, message: SyntaxMessage) {
        let token = self.tokens.advance();
        let (offset, width) = match token.as_token() {
            Some(inner) => (inner.leading_width(), inner.text().len()),
            None => (0, token.width()),
        };

        self.stack.push(token.with_message(message.at(offset, width)));
    }

    pub fn consume(&mut self, kind: Kind) -> bool {
        self.consume_any(&[kind])
    }

    pub fn consume_any(&mut self, kinds: &[Kind]) -> bool {
        if self.peek_any(kinds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind, or put a missing one in its place.
    pub fn expect(&mut self, kind: Kind) {
        if !self.consume(kind) {
            self.missing(kind, SyntaxMessage::expected(kind));
        }
    }

    /// Push a zero-width token standing in for one which isn't there.
    pub fn missing(&mut self, kind: Kind, message: SyntaxMessage) {
        self.stack.push(Node::missing(kind, message));
    }

    pub fn start(&self) -> usize {
        self.stack.len()
    }

    /// Wrap everything pushed since `start` into a node of the given kind.
    pub fn finish(&mut self, kind: Kind, start: usize) {
        debug_assert!(start <= self.stack.len(), "{start} > {}", self.stack.len());
        let children: Vec<_> = self.stack.drain(start..).collect();
        let node = Node::tree(kind, children);
        self.stack.push(self.cache.intern(node));
    }

    /// Like [`Parser::finish`], with a message covering the text of the whole
    /// node.
    pub fn finish_with(&mut self, kind: Kind, start: usize, message: SyntaxMessage) {
        let children: Vec<_> = self.stack.drain(start..).collect();
        let node = Node::tree(kind, children);

        let leading = node.leading_trivia_width();
        let width = node.width().saturating_sub(leading + node.trailing_trivia_width());
        self.stack.push(node.with_message(message.at(leading, width)));
    }

    pub fn always_collect(&mut self, kind: Kind, body: impl FnOnce(&mut Self)) {
        let start = self.start();
        body(self);
        self.finish(kind, start);
    }

    /// Skip tokens until one in `sync` or the end of input, wrapping the
    /// skipped tokens in an error recovery node of the given kind. If nothing
    /// can be skipped, the node is empty and only says what was expected.
    pub fn unexpected(&mut self, kind: Kind, expected: &str, sync: &[Kind]) {
        debug_assert!(kind.is_unexpected());
        let start = self.start();

        while !self.is_done() && !self.peek_any(sync) {
            self.advance();
        }

        let message = if self.start() == start {
            SyntaxMessage::expected_what(expected)
        } else {
            SyntaxMessage::unexpected_input(expected)
        };

        self.finish_with(kind, start, message);
    }

    /// Skip exactly the current token (if any) into an error recovery node.
    pub fn unexpected_token(&mut self, kind: Kind, expected: &str, sync: &[Kind]) {
        if self.is_done() || self.peek_any(sync) {
            let start = self.start();
            self.finish_with(kind, start, SyntaxMessage::expected_what(expected));
        } else {
            let start = self.start();
            self.advance();
            self.finish_with(kind, start, SyntaxMessage::unexpected_input(expected));
        }
    }

    /// Pop the node on top of the stack.
    pub fn pop(&mut self) -> Node {
        self.stack.pop().expect("popped an empty parser stack")
    }

    pub fn push(&mut self, node: Node) {
        self.stack.push(node);
    }
}

pub(super) trait Production {
    const FIRST: &'static [Kind];
    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>);
}

/// Concatenate multiple slices at compile time.  The first argument is an
/// initializer, used only to create the array.
macro_rules! constcat {
    ($init:expr; $($slice:expr),*) => {
        &{
            const LEN: usize = $( $slice.len() + )* 0;
            let mut arr = [$init; LEN];
            let mut base = 0;

            $({
                let mut i = 0;
                while i < $slice.len() {
                    arr[base + i] = $slice[i];
                    i += 1;
                }
                base += $slice.len();
            })*

            if base != LEN {
                panic!("bad invocation");
            }

            arr
        }
    };
}

pub(super) use constcat;

/// ```abnf
/// separated{inner} = [inner *("," inner) [","]]
/// ```
///
/// Always produces a [`Kind::SeparatedList`], which is empty if no items are
/// present. Parsing stops at any token in `stop`. If the list stops where an
/// item should be but not at `close`, an empty `unexpected` node stands in for
/// the missing item.
pub(super) struct Separated<P: 'static> {
    pub inner: P,
    pub stop: &'static [Kind],
    pub close: Option<Kind>,
    pub unexpected: Kind,
    pub expected: &'static str,
}

impl<P: Production> Production for Separated<P> {
    const FIRST: &'static [Kind] = P::FIRST;

    fn parse<S: TokenSource>(&self, parser: &mut Parser<'_, S>) {
        parser.always_collect(Kind::SeparatedList, |parser| loop {
            if parser.is_done() || parser.peek_any(self.stop) {
                if self.close.is_some_and(|close| !parser.peek(close)) {
                    let start = parser.start();
                    let message = SyntaxMessage::expected_what(self.expected);
                    parser.finish_with(self.unexpected, start, message);
                }

                break;
            }

            if parser.peek_any(P::FIRST) {
                self.inner.parse(parser);
            } else if !parser.peek(Kind::Comma) {
                let start = parser.start();
                while !parser.is_done()
                    && !parser.peek(Kind::Comma)
                    && !parser.peek_any(self.stop)
                {
                    parser.advance();
                }

                let message = SyntaxMessage::unexpected_input(self.expected);
                parser.finish_with(self.unexpected, start, message);
            }

            if !parser.consume(Kind::Comma) {
                break;
            }
        })
    }
}
