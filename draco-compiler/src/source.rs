use std::ops::{Add, AddAssign};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::once::get_or_compute;

/// Identifies a particular source.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceId(usize);

impl SourceId {
    /// Create a new, globally unique source id.
    pub fn fresh() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        Span { source: *self, start, end }
    }
}

/// Identifies some portion of the source text. Offsets are in bytes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Span {
    pub source: SourceId,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl Add for Span {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(
            self.source, rhs.source,
            "only spans from the same source can be combined"
        );
        Self { source: self.source, start: self.start.min(rhs.start), end: self.end.max(rhs.end) }
    }
}

impl AddAssign for Span {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A single source text together with the path it was read from.
#[derive(Debug)]
pub struct Source {
    pub id: SourceId,
    pub path: String,
    pub text: String,
    lines: OnceLock<Vec<usize>>,
}

impl Source {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: SourceId::fresh(), path: path.into(), text: text.into(), lines: OnceLock::new() }
    }

    /// Get the zero-based line and column (in characters) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let lines = get_or_compute(&self.lines, || {
            std::iter::once(0)
                .chain(self.text.match_indices('\n').map(|(index, _)| index + 1))
                .collect()
        });

        let offset = offset.min(self.text.len());
        let line = match lines.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };

        let column = self.text[lines[line]..offset].chars().count();
        (line, column)
    }
}

/// A cursor over source text with bounded lookahead.
///
/// Peeking never fails: looking past the end gives the caller-supplied default
/// instead, which lets line-oriented scanning loops stop at the end of input
/// without special cases. [`SourceReader::advance`] is the only mutator.
#[derive(Clone, Debug)]
pub struct SourceReader<'src> {
    text: &'src str,
    position: usize,
}

impl<'src> SourceReader<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text, position: 0 }
    }

    /// Look at the character `offset` characters ahead of the cursor.
    pub fn peek(&self, offset: usize, default: char) -> char {
        self.rest().chars().nth(offset).unwrap_or(default)
    }

    /// Move the cursor `amount` characters forward, returning exactly the text
    /// skipped.
    pub fn advance(&mut self, amount: usize) -> &'src str {
        let rest = self.rest();
        let width = rest.char_indices().nth(amount).map(|(index, _)| index).unwrap_or(rest.len());
        self.advance_bytes(width)
    }

    /// Move the cursor `width` bytes forward. `width` must fall on a character
    /// boundary.
    pub fn advance_bytes(&mut self, width: usize) -> &'src str {
        let skipped = &self.text[self.position..self.position + width];
        self.position += width;
        skipped
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.text.len()
    }

    /// The byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        assert!(self.text.is_char_boundary(position), "seeking into the middle of a character");
        self.position = position;
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'src str {
        &self.text[self.position..]
    }
}

#[cfg(test)]
mod tests {
    use super::{Source, SourceReader};

    #[test]
    fn peek_past_end_gives_default() {
        let reader = SourceReader::new("ab");
        assert_eq!('a', reader.peek(0, '\n'));
        assert_eq!('b', reader.peek(1, '\n'));
        assert_eq!('\n', reader.peek(2, '\n'));
    }

    #[test]
    fn advance_returns_skipped_text() {
        let mut reader = SourceReader::new("héllo");
        assert_eq!("hé", reader.advance(2));
        assert_eq!(3, reader.position());
        assert_eq!("llo", reader.advance(10));
        assert!(reader.is_end());
    }

    #[test]
    fn seek_back() {
        let mut reader = SourceReader::new("abc");
        reader.advance(2);
        reader.seek(1);
        assert_eq!('b', reader.peek(0, '\0'));
    }

    #[test]
    fn line_columns() {
        let source = Source::new("test.draco", "ab\ncd\n\nx");
        assert_eq!((0, 0), source.line_col(0));
        assert_eq!((0, 2), source.line_col(2));
        assert_eq!((1, 1), source.line_col(4));
        assert_eq!((2, 0), source.line_col(6));
        assert_eq!((3, 0), source.line_col(7));
    }
}
