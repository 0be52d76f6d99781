//! Entry flags decoding
//!
//! A 16-bit flags field split into (high to low bits):
//!
//! ```text
//!    1 bit  assume-valid
//!    1 bit  extended (must be zero in version 2)
//!    2 bits stage (during merge)
//!   12 bits name length, or 0xFFF if the name is that long or longer
//! ```
//!
//! Version 3 entries with the extended bit set carry a second 16-bit word:
//!
//! ```text
//!    1 bit  reserved
//!    1 bit  skip-worktree
//!    1 bit  intent-to-add
//!   13 bits unused
//! ```

const ASSUME_VALID_BIT: u16 = 0x8000;
const EXTENDED_BIT: u16 = 0x4000;
const STAGE_SHIFT: u16 = 12;
const NAME_LENGTH_MASK: u16 = 0x0FFF;

const SKIP_WORKTREE_BIT: u16 = 0x4000;
const INTENT_TO_ADD_BIT: u16 = 0x2000;

/// Merge stage of an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Resolved, the normal state
    #[default]
    Merged = 0,
    /// Common ancestor version
    Base = 1,
    /// Version from the current branch
    Ours = 2,
    /// Version from the branch being merged
    Theirs = 3,
}

impl Stage {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn is_conflicted(&self) -> bool {
        *self != Stage::Merged
    }
}

impl From<u8> for Stage {
    fn from(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Stage::Base,
            2 => Stage::Ours,
            3 => Stage::Theirs,
            _ => Stage::Merged,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The 12-bit name length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLength {
    Exact(u16),
    /// The name is at least 0xFFF bytes long; the real length is not recorded
    Overflow,
}

impl NameLength {
    pub const OVERFLOW: u16 = NAME_LENGTH_MASK;

    /// Number of name bytes to read. An overflowed length reads exactly 0xFFF.
    pub fn len(&self) -> usize {
        match self {
            NameLength::Exact(length) => usize::from(*length),
            NameLength::Overflow => usize::from(Self::OVERFLOW),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFlags {
    pub assume_valid: bool,
    pub extended: bool,
    pub stage: Stage,
    pub name_length: NameLength,
}

impl From<u16> for EntryFlags {
    fn from(bits: u16) -> Self {
        let name_length = match bits & NAME_LENGTH_MASK {
            NameLength::OVERFLOW => NameLength::Overflow,
            length => NameLength::Exact(length),
        };

        EntryFlags {
            assume_valid: bits & ASSUME_VALID_BIT != 0,
            extended: bits & EXTENDED_BIT != 0,
            stage: Stage::from((bits >> STAGE_SHIFT) as u8),
            name_length,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendedFlags {
    pub skip_worktree: bool,
    pub intent_to_add: bool,
}

impl From<u16> for ExtendedFlags {
    fn from(bits: u16) -> Self {
        ExtendedFlags {
            skip_worktree: bits & SKIP_WORKTREE_BIT != 0,
            intent_to_add: bits & INTENT_TO_ADD_BIT != 0,
        }
    }
}
