use crate::artifacts::core::Lines;
use crate::artifacts::index::reader::IndexReader;
use crate::artifacts::index::{SIGNATURE, SUPPORTED_VERSIONS, signature_string};
use crate::error::{IndexError, Result};
use derive_new::new;
use std::io::{Read, Seek};

/// The 12-byte index header
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: [u8; 4],
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    /// Read signature, version and entry count, rejecting anything but `DIRC`
    ///
    /// Versions outside [`SUPPORTED_VERSIONS`] only get a warning and are
    /// still decoded with the version 2/3 layout.
    pub(crate) fn read_from<R: Read + Seek>(reader: &mut IndexReader<R>) -> Result<Self> {
        let marker = reader.read_array::<4>()?;
        if marker != SIGNATURE {
            return Err(IndexError::BadSignature { found: marker });
        }

        let version = reader.read_u32()?;
        let entries_count = reader.read_u32()?;

        if !SUPPORTED_VERSIONS.contains(&version) {
            tracing::warn!(version, "unknown index version, decoding anyway");
        }

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}

impl Lines for IndexHeader {
    fn to_lines(&self) -> Vec<String> {
        vec![
            format!("signature: {}", signature_string(&self.marker)),
            format!("version: {}", self.version),
            format!("entries: {}", self.entries_count),
        ]
    }
}
