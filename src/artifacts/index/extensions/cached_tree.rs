//! Cached tree extension (`TREE`)
//!
//! Holds precomputed tree ids for directories whose index entries have not
//! changed, so writing a tree from the index can skip them. Each entry is:
//!
//! ```text
//!   NUL-terminated path component (relative to the parent directory)
//!   ASCII decimal entry count, a space
//!   ASCII decimal subtree count, a newline
//!   20-byte tree id, only when the entry count is not negative
//! ```
//!
//! A negative entry count marks an invalidated directory. Entries are written
//! top-down, depth-first: the root first, then its first subtree, then that
//! subtree's first subtree, and so on.

use crate::artifacts::core::Lines;
use crate::artifacts::index::extensions::{FieldScanner, Unpackable};
use crate::artifacts::objects::OBJECT_ID_SIZE;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{IndexError, Result};
use bstr::{BStr, BString, ByteSlice, ByteVec};
use bytes::Bytes;

/// Whether a cached directory still has a valid tree id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Entries under this directory changed; no tree id is stored
    Invalidated,
    Valid(ObjectId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTreeEntry {
    /// Path component relative to the parent; empty for the root
    pub name: BString,
    /// Number of index entries covered, negative when invalidated
    pub entry_count: i32,
    pub subtree_count: u32,
    pub state: CacheState,
}

impl CachedTreeEntry {
    pub fn oid(&self) -> Option<&ObjectId> {
        match &self.state {
            CacheState::Valid(oid) => Some(oid),
            CacheState::Invalidated => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedTree {
    entries: Vec<CachedTreeEntry>,
}

impl CachedTree {
    /// Entries in the order they were written (pre-order, depth-first)
    pub fn entries(&self) -> &[CachedTreeEntry] {
        &self.entries
    }

    pub fn root(&self) -> Option<&CachedTreeEntry> {
        self.entries.first()
    }

    /// Full directory path of every entry, parallel to [`Self::entries`]
    ///
    /// Rebuilt from the pre-order layout and the subtree counts. An entry that
    /// appears after its parent's subtrees are used up is treated as top level.
    pub fn paths(&self) -> Vec<BString> {
        let mut paths = Vec::with_capacity(self.entries.len());
        // (directory path, subtrees still to come)
        let mut open: Vec<(BString, u32)> = Vec::new();

        for entry in &self.entries {
            let path = match open.last_mut() {
                Some((parent, left)) => {
                    *left -= 1;
                    join(parent.as_bstr(), entry.name.as_bstr())
                }
                None => entry.name.clone(),
            };

            while matches!(open.last(), Some((_, 0))) {
                open.pop();
            }
            if entry.subtree_count > 0 {
                open.push((path.clone(), entry.subtree_count));
            }

            paths.push(path);
        }

        paths
    }

    /// Find the cached entry for a directory path (`""` is the root)
    pub fn find(&self, path: &[u8]) -> Option<&CachedTreeEntry> {
        self.paths()
            .iter()
            .position(|candidate| candidate.as_bytes() == path)
            .map(|i| &self.entries[i])
    }
}

fn join(parent: &BStr, name: &BStr) -> BString {
    if parent.is_empty() {
        return name.to_owned();
    }
    let mut path = parent.to_owned();
    path.push_byte(b'/');
    path.push_str(name);
    path
}

fn malformed(offset: usize, reason: &'static str) -> IndexError {
    IndexError::MalformedTreeCacheEntry { offset, reason }
}

fn parse_decimal<T: std::str::FromStr>(field: &[u8]) -> Option<T> {
    std::str::from_utf8(field).ok()?.parse().ok()
}

impl Unpackable for CachedTree {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let mut scanner = FieldScanner::new(&payload);
        let mut entries = Vec::new();

        while !scanner.is_exhausted() {
            let start = scanner.position();

            let name = scanner
                .take_until(0)
                .ok_or_else(|| malformed(start, "missing NUL after path component"))?;

            let field_at = scanner.position();
            let entry_count = scanner
                .take_until(b' ')
                .ok_or_else(|| malformed(field_at, "missing space after entry count"))?;
            let entry_count: i32 = parse_decimal(entry_count)
                .ok_or_else(|| malformed(field_at, "entry count is not a decimal number"))?;

            let field_at = scanner.position();
            let subtree_count = scanner
                .take_until(b'\n')
                .ok_or_else(|| malformed(field_at, "missing newline after subtree count"))?;
            let subtree_count: u32 = parse_decimal(subtree_count)
                .ok_or_else(|| malformed(field_at, "subtree count is not a decimal number"))?;

            let state = if entry_count >= 0 {
                let field_at = scanner.position();
                let oid = scanner
                    .take(OBJECT_ID_SIZE)
                    .ok_or_else(|| malformed(field_at, "truncated tree id"))?;
                CacheState::Valid(ObjectId::try_from(oid)?)
            } else {
                CacheState::Invalidated
            };

            entries.push(CachedTreeEntry {
                name: BString::from(name),
                entry_count,
                subtree_count,
                state,
            });
        }

        tracing::debug!(entries = entries.len(), "decoded cached tree");
        Ok(CachedTree { entries })
    }
}

impl CachedTreeEntry {
    fn describe(&self, path: &BStr) -> String {
        let counts = format!("{} subtrees", self.subtree_count);
        match &self.state {
            CacheState::Valid(oid) => format!("{path}/: {oid} ({} entries, {counts})", self.entry_count),
            CacheState::Invalidated => format!("{path}/: invalidated ({counts})"),
        }
    }
}

impl Lines for CachedTreeEntry {
    fn to_lines(&self) -> Vec<String> {
        vec![self.describe(self.name.as_bstr())]
    }
}

impl Lines for CachedTree {
    fn to_lines(&self) -> Vec<String> {
        self.paths()
            .iter()
            .zip(&self.entries)
            .map(|(path, entry)| entry.describe(path.as_bstr()))
            .collect()
    }
}
