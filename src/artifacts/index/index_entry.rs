//! Index entry representation
//!
//! Each entry in the index represents a staged path with:
//! - Path name (raw bytes, relative to the repository root)
//! - Content hash (object ID)
//! - File metadata (stat data, mode, flags)
//!
//! ## Entry Format
//!
//! ```text
//!   ctime sec, ctime nsec, mtime sec, mtime nsec   4 bytes each
//!   dev, ino, mode, uid, gid, size                 4 bytes each
//!   object id                                      20 bytes
//!   flags                                          2 bytes
//!   extended flags (v3+, only if flagged)          2 bytes
//!   path name                                      name length bytes
//!   1-8 NUL bytes of padding to an 8-byte boundary
//! ```
//!
//! Entries are sorted by name as unsigned bytes (memcmp order, no special
//! casing of `/`), then by stage.

use crate::artifacts::core::{Lines, indented};
use crate::artifacts::index::cache_time::CacheTime;
use crate::artifacts::index::entry_flags::{EntryFlags, ExtendedFlags, NameLength, Stage};
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::reader::IndexReader;
use crate::artifacts::index::{ENTRY_BLOCK, EXTENDED_FLAGS_VERSION};
use crate::artifacts::objects::OBJECT_ID_SIZE;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::Result;
use bstr::{BString, ByteSlice};
use std::io::{Read, Seek};

/// Index entry representing a staged path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to repository root, byte-exact
    pub name: BString,
    /// SHA-1 hash of the staged content
    pub oid: ObjectId,
    /// Stat data captured when the path was staged
    pub metadata: EntryMetadata,
    pub mode: EntryMode,
    pub flags: EntryFlags,
    /// Present only for version 3+ entries with the extended flag set
    pub extended_flags: Option<ExtendedFlags>,
}

/// File metadata stored in index entries
///
/// Git compares these against the working tree to detect changes without
/// reading file content. All values are truncated to 32 bits on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Last status change
    pub ctime: CacheTime,
    /// Last content modification
    pub mtime: CacheTime,
    pub dev: u32,
    pub ino: u32,
    pub uid: u32,
    pub gid: u32,
    /// File size in bytes
    pub size: u32,
}

impl IndexEntry {
    /// Decode one entry, consuming its trailing padding
    pub(crate) fn read_from<R: Read + Seek>(reader: &mut IndexReader<R>, version: u32) -> Result<Self> {
        let start = reader.position();

        let ctime = CacheTime::read_from(reader)?;
        let mtime = CacheTime::read_from(reader)?;
        let dev = reader.read_u32()?;
        let ino = reader.read_u32()?;
        let mode = EntryMode::from(reader.read_u32()?);
        let uid = reader.read_u32()?;
        let gid = reader.read_u32()?;
        let size = reader.read_u32()?;
        let oid = ObjectId::from(reader.read_array::<OBJECT_ID_SIZE>()?);
        let flags = EntryFlags::from(reader.read_u16()?);

        let extended_flags = if flags.extended && version >= EXTENDED_FLAGS_VERSION {
            Some(ExtendedFlags::from(reader.read_u16()?))
        } else {
            None
        };

        if flags.name_length == NameLength::Overflow {
            tracing::warn!(
                offset = start,
                "entry name length overflows 12 bits, reading only {} bytes",
                NameLength::OVERFLOW
            );
        }
        let name = BString::from(reader.read_bytes(flags.name_length.len())?.to_vec());

        let consumed = reader.position() - start;
        let padding = ENTRY_BLOCK as u64 - consumed % ENTRY_BLOCK as u64;
        reader.skip(padding)?;

        tracing::trace!(name = %name, stage = %flags.stage, offset = start, "decoded index entry");

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime,
                mtime,
                dev,
                ino,
                uid,
                gid,
                size,
            },
            mode,
            flags,
            extended_flags,
        })
    }

    pub fn stage(&self) -> Stage {
        self.flags.stage
    }

    pub fn is_conflicted(&self) -> bool {
        self.flags.stage.is_conflicted()
    }

    /// Index order: name as unsigned bytes, then stage
    pub fn index_order(&self, other: &Self) -> std::cmp::Ordering {
        self.name
            .as_bytes()
            .cmp(other.name.as_bytes())
            .then_with(|| self.stage().cmp(&other.stage()))
    }
}

impl Lines for IndexEntry {
    fn to_lines(&self) -> Vec<String> {
        let metadata = &self.metadata;
        let mut details = vec![
            format!("stage: {}", self.stage()),
            format!(
                "mode: {} ({}, {:o})",
                self.mode,
                self.mode.object_type.as_str(),
                self.mode.permission
            ),
            format!("oid: {}", self.oid),
            format!("ctime: {}", metadata.ctime),
            format!("mtime: {}", metadata.mtime),
            format!("dev: {}, ino: {}", metadata.dev, metadata.ino),
            format!("uid: {}, gid: {}", metadata.uid, metadata.gid),
            format!("size: {}", metadata.size),
        ];

        let mut flags = Vec::new();
        if self.flags.assume_valid {
            flags.push("assume-valid");
        }
        if self.flags.extended {
            flags.push("extended");
        }
        if let Some(extended) = self.extended_flags {
            if extended.skip_worktree {
                flags.push("skip-worktree");
            }
            if extended.intent_to_add {
                flags.push("intent-to-add");
            }
        }
        if self.flags.name_length == NameLength::Overflow {
            flags.push("name-length-overflow");
        }
        if !flags.is_empty() {
            details.push(format!("flags: {}", flags.join(", ")));
        }

        std::iter::once(self.name.to_string())
            .chain(indented(details))
            .collect()
    }
}
