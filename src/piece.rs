//! Piece descriptors for the piece table.
//!
//! A [`Piece`] is a span reference into one of the buffer's two backing
//! stores. Pieces carry no position: document order is the order of the
//! piece sequence, and a piece's logical start is the sum of the lengths
//! of every piece before it.

use std::fmt;

/// Which backing store a piece's span lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The immutable text the buffer was constructed with.
    Original,
    /// The append-only log of all inserted text.
    Added,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps the inspect dump's columns aligned
        match self {
            Self::Original => f.pad("original"),
            Self::Added => f.pad("added"),
        }
    }
}

/// A contiguous span of text in one backing store.
///
/// The referenced bytes are immutable for the buffer's lifetime, so pieces
/// are plain `Copy` values. The owning buffer never stores a zero-length
/// piece; empty halves produced by [`split`](Piece::split) are dropped by
/// the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    /// Store the span lives in.
    pub source: Source,
    /// Start index into that store, in bytes.
    pub offset: usize,
    /// Span length in bytes.
    pub length: usize,
}

impl Piece {
    /// Create a piece referencing `length` bytes at `offset` in `source`.
    #[must_use]
    pub fn new(source: Source, offset: usize, length: usize) -> Self {
        Self {
            source,
            offset,
            length,
        }
    }

    /// Check whether the piece references an empty span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Split into a `before` half of length `at` and an `after` half with
    /// the remainder, both referencing the same store.
    ///
    /// Either half may come back empty (`at == 0` or `at == length`); the
    /// caller must not store an empty half in the table.
    #[must_use]
    pub fn split(self, at: usize) -> (Self, Self) {
        debug_assert!(at <= self.length, "split point {at} past piece length");
        let before = Self::new(self.source, self.offset, at);
        let after = Self::new(self.source, self.offset + at, self.length - at);
        (before, after)
    }
}
