//! quilt - piece-table text buffer with a cursor editor
//!
//! An in-memory text buffer for interactive editing. [`Buffer`] keeps the
//! document as an ordered sequence of pieces over two immutable backing
//! stores (the original text and an append-only add log), so inserts and
//! deletes at arbitrary positions splice spans instead of copying text.
//! [`Editor`] layers a single clamped cursor with line-oriented motion on
//! top of the buffer's search primitives.
//!
//! ```
//! use quilt::{Buffer, Editor};
//!
//! let mut buffer = Buffer::with_text("abc");
//! buffer.insert(1, "1")?;
//! buffer.insert(3, "2")?;
//! assert_eq!(buffer.to_string(), "a1b2c");
//!
//! let mut editor = Editor::new();
//! editor.insert("hello\nworld\n");
//! editor.beginning_of_buffer();
//! editor.forward_line(1);
//! assert_eq!(editor.position(), 6);
//! # Ok::<(), quilt::Error>(())
//! ```

#![allow(clippy::module_name_repetitions)] // Buffer/Editor live in same-named modules
#![allow(clippy::missing_const_for_fn)] // Trivial accessors, not critical
#![allow(clippy::must_use_candidate)] // must_use applied where it matters

pub mod buffer;
pub mod editor;
pub mod error;
pub mod piece;

pub use buffer::Buffer;
pub use editor::Editor;
pub use error::{Error, Result};
pub use piece::{Piece, Source};
