use crate::artifacts::index::reader::IndexReader;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::io::{Read, Seek};

/// A stat timestamp as stored in an index entry
///
/// Only the low 32 bits of the seconds are kept by Git. They are compared for
/// equality, never for order, so overflow does not matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheTime {
    pub seconds: u32,
    pub nanoseconds: u32,
}

impl CacheTime {
    pub(crate) fn read_from<R: Read + Seek>(reader: &mut IndexReader<R>) -> Result<Self> {
        Ok(CacheTime {
            seconds: reader.read_u32()?,
            nanoseconds: reader.read_u32()?,
        })
    }

    /// The timestamp as a UTC date, if the nanosecond part is in range
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.seconds), self.nanoseconds)
    }
}

impl std::fmt::Display for CacheTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}.{:09}", self.seconds, self.nanoseconds),
        }
    }
}
