//! Git index file format
//!
//! The index (also called staging area or cache) stores information about the working tree.
//! It tracks which files should be included in the next commit.
//!
//! ## File Format (Versions 2 and 3)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Each entry padded to 8-byte alignment
//!   - Contains metadata and path
//!
//! Extensions (optional, repeated):
//!   - Signature (4 bytes), size (4 bytes), payload
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod cache_time;
pub mod checksum;
pub mod decoder;
pub mod entry_flags;
pub mod entry_mode;
pub mod extensions;
pub mod index_entry;
pub mod index_header;
pub mod index_state;
pub mod reader;

#[cfg(test)]
pub(crate) mod fixtures;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20; // SHA1 produces a 20-byte hash

/// Magic signature identifying index files
pub const SIGNATURE: [u8; 4] = *b"DIRC"; // "dircache"

/// Index file format versions this decoder knows the layout of
///
/// Version 4 prefix-compresses entry names, which is not understood here.
pub const SUPPORTED_VERSIONS: std::ops::RangeInclusive<u32> = 2..=3;

/// First version whose entries may carry a second flags word
pub const EXTENDED_FLAGS_VERSION: u32 = 3;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed part of an entry, up to and including the flags
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Chunk size used when hashing the file for verification
pub const CHECKSUM_CHUNK_SIZE: usize = 8 * 1024;

/// Render a four byte signature as `{'D', 'I', 'R', 'C'}`
pub fn signature_string(signature: &[u8; 4]) -> String {
    let chars = signature
        .iter()
        .map(|&b| format!("'{}'", std::ascii::escape_default(b)))
        .collect::<Vec<_>>();
    format!("{{{}}}", chars.join(", "))
}
