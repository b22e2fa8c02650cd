//! Cursor-based editor over a piece-table buffer.
//!
//! This module provides [`Editor`], which wraps a [`Buffer`] with a single
//! insert cursor and line-oriented motion built from the buffer's character
//! search. The editor also caches the last materialized text behind a dirty
//! flag so repeated reads between edits avoid reconstruction; the cache is
//! a pure optimization and the observable text always equals the buffer's.
//!
//! # Examples
//!
//! ```
//! use quilt::Editor;
//!
//! let mut editor = Editor::with_text("hello\n");
//! editor.end_of_buffer();
//! editor.insert("world");
//! editor.beginning_of_line();
//! assert_eq!(editor.position(), 6);
//! assert_eq!(editor.text(), "hello\nworld");
//! ```

use crate::buffer::Buffer;

/// Line separator unit used by the line-motion operations.
const LINE_SEPARATOR: char = '\n';

/// A buffer with an attached cursor marking the current insert position.
///
/// The cursor is a byte offset always clamped to `0..=buffer.len()`; every
/// operation maintains that range and motion never errors. Edits that would
/// split a multi-byte character are rejected by the buffer and leave the
/// editor unchanged.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    buffer: Buffer,
    cursor: usize,
    cache: String,
    dirty: bool,
}

impl Editor {
    /// Create an editor over an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor for a buffer with the provided contents, cursor at
    /// the beginning.
    #[must_use]
    pub fn with_text(contents: &str) -> Self {
        Self {
            buffer: Buffer::with_text(contents),
            cursor: 0,
            cache: contents.to_string(),
            dirty: false,
        }
    }

    /// Get the current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Get the underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Get the document length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Move the cursor forward by `n` units, stopping at the end of the
    /// buffer.
    pub fn forward(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n).min(self.buffer.len());
    }

    /// Move the cursor backward by `n` units, stopping at the beginning of
    /// the buffer.
    pub fn backward(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Insert `text` at the cursor and advance the cursor past it.
    pub fn insert(&mut self, text: &str) {
        // The cursor is always clamped, so only a mid-character cursor can
        // be rejected; the editor stays put in that case.
        if self.buffer.insert(self.cursor, text).is_ok() {
            self.cursor += text.len();
            self.dirty = true;
        }
    }

    /// Delete `n` units after the cursor, clamped to the end of the buffer.
    /// The cursor does not move; it ends up pointing at whatever followed
    /// the deleted span.
    pub fn delete(&mut self, n: usize) {
        let n = n.min(self.buffer.len() - self.cursor);
        if n == 0 {
            return;
        }
        if self.buffer.delete(self.cursor, n).is_ok() {
            self.dirty = true;
        }
    }

    /// Set the cursor to the beginning of the buffer.
    pub fn beginning_of_buffer(&mut self) {
        self.cursor = 0;
    }

    /// Set the cursor past the last unit of the buffer.
    pub fn end_of_buffer(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Set the cursor just after the nearest line separator strictly before
    /// it, or to the beginning of the buffer when no separator precedes it.
    pub fn beginning_of_line(&mut self) {
        let separator = self
            .cursor
            .checked_sub(1)
            .and_then(|pos| self.buffer.find_backwards(pos, LINE_SEPARATOR));
        self.cursor = separator.map_or(0, |pos| pos + 1);
    }

    /// Set the cursor on the nearest line separator at or after it, or to
    /// the end of the buffer when no separator follows.
    pub fn end_of_line(&mut self) {
        match self.buffer.find_forwards(self.cursor, LINE_SEPARATOR) {
            Some(pos) => self.cursor = pos,
            None => self.end_of_buffer(),
        }
    }

    /// Move the cursor to the beginning of the next line, `n` times.
    ///
    /// Each step goes to the end of the line and then forward one unit, so
    /// the cursor clamps to the end of the buffer on the last line.
    pub fn forward_line(&mut self, n: usize) {
        for _ in 0..n {
            self.end_of_line();
            self.forward(1);
        }
    }

    /// Move the cursor to the beginning of the previous line, `n` times.
    ///
    /// Each step goes to the beginning of the line, steps backward one
    /// unit, and goes to the beginning of the line again, so the cursor
    /// clamps to the beginning of the buffer on the first line.
    pub fn backward_line(&mut self, n: usize) {
        for _ in 0..n {
            self.beginning_of_line();
            self.backward(1);
            self.beginning_of_line();
        }
    }

    /// Get the contents of the buffer managed by this editor.
    ///
    /// Served from a cache that is invalidated by every edit and recomputed
    /// lazily here.
    pub fn text(&mut self) -> &str {
        if self.dirty {
            self.cache = self.buffer.to_string();
            self.dirty = false;
        }
        &self.cache
    }

    /// Get the text before the cursor.
    ///
    /// A cursor inside a multi-byte character rounds down to the nearest
    /// character boundary.
    pub fn before(&mut self) -> &str {
        let at = self.cursor;
        let text = self.text();
        &text[..floor_char_boundary(text, at)]
    }

    /// Get the text at and after the cursor.
    ///
    /// A cursor inside a multi-byte character rounds down to the nearest
    /// character boundary.
    pub fn after(&mut self) -> &str {
        let at = self.cursor;
        let text = self.text();
        &text[floor_char_boundary(text, at)..]
    }
}

fn floor_char_boundary(text: &str, mut at: usize) -> usize {
    at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}
