//! Index extensions
//!
//! Extensions follow the entries and run up to the trailing checksum. Each one is
//!
//! ```text
//!   4-byte signature, 32-bit size, `size` bytes of payload
//! ```
//!
//! There is no extension count; the sequence ends where the checksum begins.
//! A signature starting with `'A'..='Z'` marks an optional extension. Only the
//! cached tree (`TREE`) and resolve undo (`REUC`) payloads are decoded; every
//! other payload is kept verbatim.

pub mod cached_tree;
pub mod resolve_undo;

use crate::artifacts::core::{Lines, hex_lines, indented};
use crate::artifacts::index::extensions::cached_tree::CachedTree;
use crate::artifacts::index::extensions::resolve_undo::ResolveUndo;
use crate::artifacts::index::reader::IndexReader;
use crate::error::{IndexError, Result};
use bstr::ByteSlice;
use bytes::Bytes;
use std::io::{Read, Seek};

/// Human names of the extensions Git writes
pub const EXTENSION_NAMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "TREE" => "cached tree",
    "REUC" => "resolve undo",
    "link" => "split index",
    "UNTR" => "untracked cache",
    "FSMN" => "file system monitor cache",
    "EOIE" => "end of index entry",
    "IEOT" => "index entry offset table",
    "sdir" => "sparse directory entries",
};

/// Size of an extension's signature plus its size field
const EXTENSION_HEADER_SIZE: u64 = 8;

/// Decode a whole extension payload
pub trait Unpackable {
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

/// Four byte extension signature, ordered by its big-endian value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    pub const CACHED_TREE: Signature = Signature(*b"TREE");
    pub const RESOLVE_UNDO: Signature = Signature(*b"REUC");

    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Optional extensions can be ignored by readers that don't understand them
    pub fn is_optional(&self) -> bool {
        self.0[0].is_ascii_uppercase()
    }

    pub fn name(&self) -> Option<&'static str> {
        std::str::from_utf8(&self.0)
            .ok()
            .and_then(|text| EXTENSION_NAMES.get(text).copied())
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_bstr())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionData {
    CachedTree(CachedTree),
    ResolveUndo(ResolveUndo),
    /// Payload of an extension this decoder does not interpret
    Optional(Bytes),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub signature: Signature,
    pub size: u32,
    pub data: ExtensionData,
}

impl Extension {
    /// Read one extension block; `end` is the offset of the trailing checksum
    pub(crate) fn read_from<R: Read + Seek>(reader: &mut IndexReader<R>, end: u64) -> Result<Self> {
        let offset = reader.position();
        let available = end.saturating_sub(offset);
        if available < EXTENSION_HEADER_SIZE {
            return Err(IndexError::unexpected_end(offset, EXTENSION_HEADER_SIZE, available));
        }

        let signature = Signature(reader.read_array::<4>()?);
        let size = reader.read_u32()?;

        let available = end.saturating_sub(reader.position());
        if u64::from(size) > available {
            return Err(IndexError::unexpected_end(
                reader.position(),
                u64::from(size),
                available,
            ));
        }
        let payload = reader.read_bytes(size as usize)?;

        let data = match signature {
            Signature::CACHED_TREE => ExtensionData::CachedTree(CachedTree::deserialize(payload)?),
            Signature::RESOLVE_UNDO => ExtensionData::ResolveUndo(ResolveUndo::deserialize(payload)?),
            _ => {
                if !signature.is_optional() {
                    tracing::warn!(%signature, "keeping unknown required extension as raw data");
                }
                ExtensionData::Optional(payload)
            }
        };

        tracing::debug!(%signature, size, offset, "decoded index extension");

        Ok(Extension {
            signature,
            size,
            data,
        })
    }

    pub fn cached_tree(&self) -> Option<&CachedTree> {
        match &self.data {
            ExtensionData::CachedTree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn resolve_undo(&self) -> Option<&ResolveUndo> {
        match &self.data {
            ExtensionData::ResolveUndo(undo) => Some(undo),
            _ => None,
        }
    }

    pub fn raw_data(&self) -> Option<&Bytes> {
        match &self.data {
            ExtensionData::Optional(data) => Some(data),
            _ => None,
        }
    }
}

impl Lines for Extension {
    fn to_lines(&self) -> Vec<String> {
        let title = match self.signature.name() {
            Some(name) => format!("{} ({name}): {} bytes", self.signature, self.size),
            None => format!("{}: {} bytes", self.signature, self.size),
        };
        let body = match &self.data {
            ExtensionData::CachedTree(tree) => tree.to_lines(),
            ExtensionData::ResolveUndo(undo) => undo.to_lines(),
            ExtensionData::Optional(data) => hex_lines(data),
        };

        std::iter::once(title).chain(indented(body)).collect()
    }
}

/// Forward-only cursor over an extension payload
///
/// Returns `None` when a delimiter or enough bytes are missing; each decoder
/// turns that into its own error kind.
#[derive(Debug)]
pub(crate) struct FieldScanner<'p> {
    data: &'p [u8],
    position: usize,
}

impl<'p> FieldScanner<'p> {
    pub(crate) fn new(data: &'p [u8]) -> Self {
        FieldScanner { data, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Bytes up to `delimiter`, which is consumed but not returned
    pub(crate) fn take_until(&mut self, delimiter: u8) -> Option<&'p [u8]> {
        let rest = &self.data[self.position..];
        let end = rest.find_byte(delimiter)?;
        self.position += end + 1;
        Some(&rest[..end])
    }

    pub(crate) fn take(&mut self, count: usize) -> Option<&'p [u8]> {
        let rest = &self.data[self.position..];
        let taken = rest.get(..count)?;
        self.position += count;
        Some(taken)
    }
}
