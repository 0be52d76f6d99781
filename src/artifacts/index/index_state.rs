//! Decoded index
//!
//! [`IndexState`] is the immutable result of a successful decode. It is only
//! produced by [`IndexStateBuilder::build`], after the trailing checksum has
//! been read, so a failed decode never hands out a partial index.

use crate::artifacts::core::{INDENT, Lines, indented};
use crate::artifacts::index::decoder::IndexDecoder;
use crate::artifacts::index::entry_flags::Stage;
use crate::artifacts::index::extensions::cached_tree::CachedTree;
use crate::artifacts::index::extensions::resolve_undo::ResolveUndo;
use crate::artifacts::index::extensions::{Extension, Signature};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::Result;
use bstr::ByteSlice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexState {
    header: IndexHeader,
    entries: Vec<IndexEntry>,
    extensions: Vec<Extension>,
    checksum: ObjectId,
}

impl IndexState {
    /// Decode an index held in memory
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        IndexDecoder::new(std::io::Cursor::new(bytes.as_ref()))?.decode()
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// Entries sorted by name (as unsigned bytes), then stage
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a path at a given stage
    pub fn entry(&self, name: &[u8], stage: Stage) -> Option<&IndexEntry> {
        self.entries
            .binary_search_by(|entry| {
                entry
                    .name
                    .as_bytes()
                    .cmp(name)
                    .then_with(|| entry.stage().cmp(&stage))
            })
            .ok()
            .map(|i| &self.entries[i])
    }

    /// All stages recorded for a path, in stage order
    pub fn entries_for(&self, name: &[u8]) -> &[IndexEntry] {
        let start = self.entries.partition_point(|entry| entry.name.as_bytes() < name);
        let end = self.entries.partition_point(|entry| entry.name.as_bytes() <= name);
        &self.entries[start..end]
    }

    /// Entries of unresolved merges (stage 1 to 3)
    pub fn conflicts(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(|entry| entry.is_conflicted())
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// Extensions ordered by signature
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn extension(&self, signature: Signature) -> Option<&Extension> {
        self.extensions
            .iter()
            .find(|extension| extension.signature == signature)
    }

    pub fn cached_tree(&self) -> Option<&CachedTree> {
        self.extension(Signature::CACHED_TREE)
            .and_then(Extension::cached_tree)
    }

    pub fn resolve_undo(&self) -> Option<&ResolveUndo> {
        self.extension(Signature::RESOLVE_UNDO)
            .and_then(Extension::resolve_undo)
    }

    /// SHA-1 over everything before it, as stored at the end of the file
    pub fn checksum(&self) -> &ObjectId {
        &self.checksum
    }
}

impl Lines for IndexState {
    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec!["[header]".to_string()];
        lines.extend(indented(self.header.to_lines()));

        lines.push("[entries]".to_string());
        for entry in &self.entries {
            lines.extend(indented(entry.to_lines()));
        }

        lines.push("[extensions]".to_string());
        for extension in &self.extensions {
            lines.extend(indented(extension.to_lines()));
        }

        lines.push("[checksum]".to_string());
        lines.push(format!("{}{}", INDENT, self.checksum));
        lines
    }
}

/// Accumulates decoded parts; only [`Self::build`] exposes them
#[derive(Debug)]
pub(crate) struct IndexStateBuilder {
    header: IndexHeader,
    entries: Vec<IndexEntry>,
    extensions: Vec<Extension>,
}

impl IndexStateBuilder {
    pub(crate) fn new(header: IndexHeader) -> Self {
        let capacity = header.entries_count.min(1 << 16) as usize;
        IndexStateBuilder {
            header,
            entries: Vec::with_capacity(capacity),
            extensions: Vec::new(),
        }
    }

    pub(crate) fn push_entry(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn push_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Order entries and extensions and seal the index
    ///
    /// Both sorts are stable, so duplicate (name, stage) pairs and repeated
    /// signatures keep the order they were read in.
    pub(crate) fn build(mut self, checksum: ObjectId) -> IndexState {
        self.entries.sort_by(IndexEntry::index_order);
        self.extensions.sort_by_key(|extension| extension.signature);

        IndexState {
            header: self.header,
            entries: self.entries,
            extensions: self.extensions,
            checksum,
        }
    }
}
