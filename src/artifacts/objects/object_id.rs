//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 160-bit SHA-1 hashes. Inside the index they are stored as
//! 20 raw bytes; for humans they are rendered as 40 lowercase hex characters.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_SIZE, SHORT_OID_LENGTH};
use crate::error::{IndexError, Result};

/// Git object identifier (SHA-1 hash)
///
/// Always exactly 20 bytes; any other length is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_SIZE]);

impl ObjectId {
    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(IndexError::InvalidObjectIdHex(format!(
                "expected {OBJECT_ID_LENGTH} hex characters, got {}",
                id.len()
            )));
        }

        let mut raw = [0u8; OBJECT_ID_SIZE];
        hex::decode_to_slice(id, &mut raw)
            .map_err(|_| IndexError::InvalidObjectIdHex(id.to_string()))?;

        Ok(Self(raw))
    }

    /// First 7 hex characters, Git's default abbreviation
    pub fn to_short_oid(&self) -> String {
        self.to_string()[..SHORT_OID_LENGTH].to_string()
    }
}

impl From<[u8; OBJECT_ID_SIZE]> for ObjectId {
    fn from(raw: [u8; OBJECT_ID_SIZE]) -> Self {
        Self(raw)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = IndexError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; OBJECT_ID_SIZE] = bytes
            .try_into()
            .map_err(|_| IndexError::InvalidObjectId {
                length: bytes.len(),
            })?;
        Ok(Self(raw))
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
