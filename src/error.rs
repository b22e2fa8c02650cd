//! Error types for quilt.

use thiserror::Error;

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for buffer operations.
///
/// All errors are precondition violations detected before any mutation is
/// applied; a failed insert or delete leaves the buffer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Position or range beyond the current buffer length.
    #[error("position {pos} out of bounds for buffer of length {len}")]
    OutOfBounds { pos: usize, len: usize },
    /// Split point falls inside a multi-byte character.
    #[error("position {pos} is not a character boundary")]
    NotCharBoundary { pos: usize },
}
