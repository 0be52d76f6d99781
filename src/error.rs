//! Error types for index decoding
//!
//! Every failure is terminal for the decode attempt: the decoder never hands
//! back a partially built index.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Result type alias using [`IndexError`]
pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    /// Underlying read or seek failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source ended before a decode step got all the bytes it needs
    #[error("unexpected end of index at offset {offset}: wanted {wanted} bytes, {available} available")]
    UnexpectedEnd {
        offset: u64,
        wanted: u64,
        available: u64,
    },

    /// The first four bytes are not the `DIRC` magic
    #[error("invalid index signature {}", crate::artifacts::index::signature_string(.found))]
    BadSignature { found: [u8; 4] },

    /// The trailing SHA-1 does not match the content
    #[error("index checksum mismatch: stored {expected}, computed {actual}")]
    IntegrityViolation {
        expected: ObjectId,
        actual: ObjectId,
    },

    #[error("malformed cached tree entry at payload offset {offset}: {reason}")]
    MalformedTreeCacheEntry { offset: usize, reason: &'static str },

    #[error("malformed resolve undo entry at payload offset {offset}: {reason}")]
    MalformedUndoEntry { offset: usize, reason: &'static str },

    /// An object id was built from something other than 20 bytes
    #[error("invalid object id length: {length}")]
    InvalidObjectId { length: usize },

    #[error("invalid object id: {0}")]
    InvalidObjectIdHex(String),
}

impl IndexError {
    pub(crate) fn unexpected_end(offset: u64, wanted: u64, available: u64) -> Self {
        IndexError::UnexpectedEnd {
            offset,
            wanted,
            available,
        }
    }
}
