//! Piece-table text buffer.
//!
//! This module provides [`Buffer`], a text buffer supporting insertion and
//! deletion at arbitrary positions in time proportional to the number of
//! edits touched, not the size of the document.
//!
//! The buffer keeps two immutable backing stores: the original text it was
//! constructed with and an append-only log of all inserted text. The
//! current document is described by an ordered sequence of [`Piece`] spans
//! into those stores; edits only split and splice that sequence, never
//! copying document text. The full text is reconstructed on demand via
//! [`Display`](std::fmt::Display).
//!
//! # Examples
//!
//! ```
//! use quilt::Buffer;
//!
//! let mut buffer = Buffer::with_text("hello world");
//! buffer.insert(6, "cruel ")?;
//! assert_eq!(buffer.to_string(), "hello cruel world");
//!
//! buffer.delete(0, 6)?;
//! assert_eq!(buffer.to_string(), "cruel world");
//! # Ok::<(), quilt::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::piece::{Piece, Source};
use log::debug;
use std::fmt;
use std::fmt::Write as _;

/// Text buffer backed by a piece table.
///
/// Positions are byte offsets into the logical document. Insert and delete
/// positions must fall on UTF-8 character boundaries; out-of-range or
/// mid-character positions are rejected before any state is touched, so a
/// failed operation leaves the buffer unchanged.
///
/// For editing with a cursor, wrap this in an [`Editor`](crate::Editor).
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    original: String,
    added: String,
    pieces: Vec<Piece>,
}

impl Buffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer using `text` as the initial document.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let pieces = if text.is_empty() {
            Vec::new()
        } else {
            vec![Piece::new(Source::Original, 0, text.len())]
        };
        Self {
            original: text.to_string(),
            added: String::new(),
            pieces,
        }
    }

    /// Get the document length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.iter().map(|piece| piece.length).sum()
    }

    /// Check if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Get the current piece sequence.
    ///
    /// Diagnostic accessor; the concatenated spans equal the document.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Insert `text` at byte position `pos`.
    ///
    /// The text is appended verbatim to the add log and a piece referencing
    /// it is spliced into the sequence, splitting the piece containing
    /// `pos` when the position falls inside one. Inserting an empty string
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `pos` exceeds [`len`](Self::len)
    /// and [`Error::NotCharBoundary`] when `pos` falls inside a multi-byte
    /// character. The buffer is unchanged on error.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        let len = self.len();
        if pos > len {
            debug!("insert rejected: position {pos} past end of buffer ({len})");
            return Err(Error::OutOfBounds { pos, len });
        }
        if text.is_empty() {
            return Ok(());
        }

        let Some((index, start)) = self.locate(pos) else {
            // Empty table: the new piece is the whole document.
            let piece = Piece::new(Source::Added, self.added.len(), text.len());
            self.added.push_str(text);
            self.pieces.push(piece);
            return Ok(());
        };

        let target = self.pieces[index];
        let at = pos - start;
        if !self.on_char_boundary(target, at) {
            debug!("insert rejected: position {pos} splits a character");
            return Err(Error::NotCharBoundary { pos });
        }

        let piece = Piece::new(Source::Added, self.added.len(), text.len());
        self.added.push_str(text);
        let (before, after) = target.split(at);
        let replacement: Vec<Piece> = [before, piece, after]
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect();
        self.pieces.splice(index..=index, replacement);
        Ok(())
    }

    /// Delete `n` bytes starting at position `pos`.
    ///
    /// Both boundary pieces are split so the deleted region is
    /// piece-aligned, then every piece fully inside `pos..pos + n` is
    /// removed and the retained fragments spliced together. Deleting zero
    /// bytes is a no-op; deleting the whole document leaves an empty piece
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `pos + n` exceeds
    /// [`len`](Self::len) and [`Error::NotCharBoundary`] when either end of
    /// the range splits a multi-byte character. Out-of-range deletes are
    /// rejected, never truncated, and the buffer is unchanged on error.
    pub fn delete(&mut self, pos: usize, n: usize) -> Result<()> {
        let len = self.len();
        let end = match pos.checked_add(n) {
            Some(end) if end <= len => end,
            _ => {
                debug!("delete rejected: range {pos}+{n} past end of buffer ({len})");
                return Err(Error::OutOfBounds {
                    pos: pos.saturating_add(n),
                    len,
                });
            }
        };
        if n == 0 {
            return Ok(());
        }

        // n > 0 implies a non-empty table, so both lookups succeed.
        let Some((begin_index, begin_start)) = self.locate(pos) else {
            return Err(Error::OutOfBounds { pos, len });
        };
        let Some((end_index, end_start)) = self.locate(end) else {
            return Err(Error::OutOfBounds { pos: end, len });
        };

        let begin_piece = self.pieces[begin_index];
        let end_piece = self.pieces[end_index];
        let begin_at = pos - begin_start;
        let end_at = end - end_start;
        if !self.on_char_boundary(begin_piece, begin_at) {
            debug!("delete rejected: position {pos} splits a character");
            return Err(Error::NotCharBoundary { pos });
        }
        if !self.on_char_boundary(end_piece, end_at) {
            debug!("delete rejected: position {end} splits a character");
            return Err(Error::NotCharBoundary { pos: end });
        }

        let (left, _) = begin_piece.split(begin_at);
        let (_, right) = end_piece.split(end_at);
        let kept: Vec<Piece> = [left, right]
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect();
        self.pieces.splice(begin_index..=end_index, kept);
        Ok(())
    }

    /// Find the nearest occurrence of `target` at or before `pos`.
    ///
    /// Scans backward piece by piece without materializing the document.
    /// A `pos` past the end of the buffer clamps to the last unit. Returns
    /// `None` when the buffer holds no occurrence at or before `pos`.
    #[must_use]
    pub fn find_backwards(&self, pos: usize, target: char) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let end = pos.min(len - 1) + 1;
        let mut start = len;
        for piece in self.pieces.iter().rev() {
            start -= piece.length;
            if start >= end {
                continue;
            }
            let found = self
                .piece_text(piece)
                .match_indices(target)
                .rev()
                .map(|(i, _)| start + i)
                .find(|&i| i < end);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Find the nearest occurrence of `target` at or after `pos`.
    ///
    /// Forward counterpart of [`find_backwards`](Self::find_backwards).
    #[must_use]
    pub fn find_forwards(&self, pos: usize, target: char) -> Option<usize> {
        let mut start = 0;
        for piece in &self.pieces {
            let piece_end = start + piece.length;
            if piece_end > pos {
                let found = self
                    .piece_text(piece)
                    .match_indices(target)
                    .map(|(i, _)| start + i)
                    .find(|&i| i >= pos);
                if found.is_some() {
                    return found;
                }
            }
            start = piece_end;
        }
        None
    }

    /// Render the piece table for debugging: one line per piece with its
    /// index, store tag, offset, length, and resolved text.
    #[must_use]
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        for (i, piece) in self.pieces.iter().enumerate() {
            let _ = writeln!(
                out,
                "{i:3} {:>8} {:4} {:4} {:?}",
                piece.source,
                piece.offset,
                piece.length,
                self.piece_text(piece)
            );
        }
        out
    }

    /// First piece, in sequence order, whose inclusive span
    /// `start..=start + length` contains `pos`. `pos == len()` resolves to
    /// the last piece. `None` only for the empty table.
    fn locate(&self, pos: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if pos >= start && pos <= start + piece.length {
                return Some((index, start));
            }
            start += piece.length;
        }
        None
    }

    fn store(&self, source: Source) -> &str {
        match source {
            Source::Original => &self.original,
            Source::Added => &self.added,
        }
    }

    fn piece_text(&self, piece: &Piece) -> &str {
        &self.store(piece.source)[piece.offset..piece.offset + piece.length]
    }

    fn on_char_boundary(&self, piece: Piece, at: usize) -> bool {
        self.store(piece.source).is_char_boundary(piece.offset + at)
    }
}

impl fmt::Display for Buffer {
    /// Materialize the full document by concatenating every piece's span
    /// in sequence order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            f.write_str(self.piece_text(piece))?;
        }
        Ok(())
    }
}
