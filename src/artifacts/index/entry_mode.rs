//! Entry mode decoding
//!
//! The 32-bit mode of an index entry is split into (high to low bits):
//!
//! ```text
//!   16 bits unused (zero)
//!    4 bits object type: 1000 regular file, 1010 symbolic link, 1110 gitlink
//!    3 bits unused
//!    9 bits unix permission: 0755 or 0644 for files, 0 otherwise
//! ```

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum ObjectType {
    #[default]
    Regular,
    Symlink,
    Gitlink,
    /// Any other 4-bit value, kept as read
    Unknown(u8),
}

impl ObjectType {
    pub fn bits(&self) -> u8 {
        match self {
            ObjectType::Regular => 0b1000,
            ObjectType::Symlink => 0b1010,
            ObjectType::Gitlink => 0b1110,
            ObjectType::Unknown(bits) => *bits,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Regular => "regular file",
            ObjectType::Symlink => "symbolic link",
            ObjectType::Gitlink => "gitlink",
            ObjectType::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for ObjectType {
    fn from(bits: u8) -> Self {
        match bits & 0xF {
            0b1000 => ObjectType::Regular,
            0b1010 => ObjectType::Symlink,
            0b1110 => ObjectType::Gitlink,
            other => ObjectType::Unknown(other),
        }
    }
}

/// Decoded entry mode: object type and unix permission bits
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub struct EntryMode {
    pub object_type: ObjectType,
    pub permission: u16,
}

impl EntryMode {
    /// Parse the ASCII octal form used by the resolve undo extension
    pub fn from_octal(text: &[u8]) -> Option<Self> {
        if text.is_empty() || !text.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return None;
        }
        let text = std::str::from_utf8(text).ok()?;
        u32::from_str_radix(text, 8).ok().map(Self::from)
    }

    pub fn as_u32(&self) -> u32 {
        (u32::from(self.object_type.bits()) << 12) | u32::from(self.permission)
    }
}

impl From<u32> for EntryMode {
    fn from(mode: u32) -> Self {
        EntryMode {
            object_type: ObjectType::from(((mode >> 12) & 0xF) as u8),
            permission: (mode & 0o777) as u16,
        }
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.as_u32()
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.as_u32())
    }
}
