use crate::artifacts::index::reader::IndexReader;
use crate::artifacts::index::{CHECKSUM_CHUNK_SIZE, CHECKSUM_SIZE};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{IndexError, Result};
use sha1::{Digest, Sha1};
use std::io::{Read, Seek};

/// Whole-file integrity check
///
/// Hashes every byte before the trailing checksum in fixed-size chunks and
/// compares the result against the stored SHA-1. The reader is put back where
/// it was, so structural decoding is unaffected by the pass.
#[derive(Debug)]
pub struct Checksum {
    digest: Sha1,
}

impl Checksum {
    pub(crate) fn new() -> Self {
        Checksum {
            digest: Sha1::new(),
        }
    }

    pub(crate) fn verify<R: Read + Seek>(mut self, reader: &mut IndexReader<R>) -> Result<ObjectId> {
        let resume_at = reader.position();
        let data_size = reader
            .length()
            .checked_sub(CHECKSUM_SIZE as u64)
            .ok_or_else(|| {
                IndexError::unexpected_end(0, CHECKSUM_SIZE as u64, reader.length())
            })?;

        reader.seek(0)?;

        let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];
        let mut left = data_size;
        while left > 0 {
            let step = left.min(CHECKSUM_CHUNK_SIZE as u64) as usize;
            reader.read_into(&mut buffer[..step])?;
            self.digest.update(&buffer[..step]);
            left -= step as u64;
        }

        let expected = ObjectId::from(reader.read_array::<CHECKSUM_SIZE>()?);
        let actual = ObjectId::try_from(self.digest.finalize().as_slice())?;

        reader.seek(resume_at)?;

        if expected != actual {
            return Err(IndexError::IntegrityViolation { expected, actual });
        }

        tracing::debug!(checksum = %expected, bytes = data_size, "index checksum verified");
        Ok(expected)
    }
}
