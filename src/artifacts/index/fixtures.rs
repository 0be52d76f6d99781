//! Synthetic index files for unit tests

use crate::artifacts::index::{ENTRY_BLOCK, ENTRY_FIXED_SIZE, SIGNATURE};
use byteorder::{NetworkEndian, WriteBytesExt};
use derive_new::new;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Append the SHA-1 of `content` to it
pub(crate) fn seal(mut content: Vec<u8>) -> Vec<u8> {
    let digest = Sha1::digest(&content);
    content.extend_from_slice(digest.as_slice());
    content
}

pub(crate) fn oid_bytes(seed: u8) -> [u8; 20] {
    let mut raw = [0u8; 20];
    for (i, byte) in raw.iter_mut().enumerate() {
        *byte = seed.wrapping_add(i as u8);
    }
    raw
}

#[derive(Debug, Clone, new)]
pub(crate) struct EntrySpec {
    pub name: Vec<u8>,
    pub stage: u16,
    #[new(value = "0o100644")]
    pub mode: u32,
    #[new(value = "oid_bytes(1)")]
    pub oid: [u8; 20],
    #[new(default)]
    pub extended_flags: Option<u16>,
}

impl EntrySpec {
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        let start = out.len();
        for value in [
            1_700_000_000u32,
            11,
            1_700_000_100,
            22,
            0x801,
            4242,
            self.mode,
            1000,
            1000,
            12,
        ] {
            out.write_u32::<NetworkEndian>(value).unwrap();
        }
        out.write_all(&self.oid).unwrap();

        let mut flags = (self.stage << 12) | (self.name.len().min(0xFFF) as u16);
        if self.extended_flags.is_some() {
            flags |= 0x4000;
        }
        out.write_u16::<NetworkEndian>(flags).unwrap();
        if let Some(extended) = self.extended_flags {
            out.write_u16::<NetworkEndian>(extended).unwrap();
        }
        out.write_all(&self.name).unwrap();

        let consumed = out.len() - start;
        debug_assert!(consumed >= ENTRY_FIXED_SIZE);
        let padding = ENTRY_BLOCK - consumed % ENTRY_BLOCK;
        out.extend(std::iter::repeat_n(0u8, padding));
    }
}

/// Builds the bytes of an index file, checksum included
#[derive(Debug, Clone, new)]
pub(crate) struct IndexFixture {
    #[new(value = "2")]
    pub version: u32,
    #[new(default)]
    pub entries: Vec<EntrySpec>,
    #[new(default)]
    pub extensions: Vec<([u8; 4], Vec<u8>)>,
    #[new(default)]
    pub declared_count: Option<u32>,
}

impl IndexFixture {
    pub(crate) fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn entry(mut self, entry: EntrySpec) -> Self {
        self.entries.push(entry);
        self
    }

    pub(crate) fn extension(mut self, signature: &[u8; 4], payload: Vec<u8>) -> Self {
        self.extensions.push((*signature, payload));
        self
    }

    pub(crate) fn declared_count(mut self, count: u32) -> Self {
        self.declared_count = Some(count);
        self
    }

    pub(crate) fn unsealed(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_all(&SIGNATURE).unwrap();
        out.write_u32::<NetworkEndian>(self.version).unwrap();
        out.write_u32::<NetworkEndian>(
            self.declared_count.unwrap_or(self.entries.len() as u32),
        )
        .unwrap();

        for entry in &self.entries {
            entry.write_to(&mut out);
        }
        for (signature, payload) in &self.extensions {
            out.write_all(signature).unwrap();
            out.write_u32::<NetworkEndian>(payload.len() as u32).unwrap();
            out.write_all(payload).unwrap();
        }

        out
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        seal(self.unsealed())
    }
}

/// One `TREE` entry: path, counts and an optional object id
pub(crate) fn tree_entry(name: &str, entry_count: i32, subtrees: u32, oid: Option<[u8; 20]>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(name.as_bytes());
    out.push(0);
    out.extend_from_slice(format!("{entry_count} {subtrees}\n").as_bytes());
    if let Some(oid) = oid {
        out.extend_from_slice(&oid);
    }
    out
}

/// One `REUC` entry: path, three octal modes and the ids of the present stages
pub(crate) fn undo_entry(path: &str, modes: [&str; 3], oids: &[[u8; 20]]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(path.as_bytes());
    out.push(0);
    for mode in modes {
        out.extend_from_slice(mode.as_bytes());
        out.push(0);
    }
    for oid in oids {
        out.extend_from_slice(oid);
    }
    out
}
