//! Git object identifiers
//!
//! The index refers to blobs, gitlinks and trees only by their SHA-1 object id;
//! it never embeds the objects themselves.

pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_SIZE: usize = 20;

/// Length of an abbreviated object id
pub const SHORT_OID_LENGTH: usize = 7;
