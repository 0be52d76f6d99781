//! Top-to-bottom index decoding
//!
//! 1. peek the signature, so that non-index files are reported as such
//! 2. verify the trailing checksum over the whole file
//! 3. header, entries, extensions
//! 4. read the trailing checksum and seal the result

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::extensions::Extension;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::index_state::{IndexState, IndexStateBuilder};
use crate::artifacts::index::reader::IndexReader;
use crate::artifacts::index::{CHECKSUM_SIZE, SIGNATURE};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{IndexError, Result};
use std::io::{Read, Seek};

#[derive(Debug)]
pub struct IndexDecoder<R> {
    reader: IndexReader<R>,
}

impl<R: Read + Seek> IndexDecoder<R> {
    pub fn new(source: R) -> Result<Self> {
        Ok(IndexDecoder {
            reader: IndexReader::new(source)?,
        })
    }

    pub fn decode(mut self) -> Result<IndexState> {
        self.check_signature()?;
        let verified = Checksum::new().verify(&mut self.reader)?;

        let header = IndexHeader::read_from(&mut self.reader)?;
        tracing::debug!(
            version = header.version,
            entries = header.entries_count,
            "decoding index"
        );

        let mut builder = IndexStateBuilder::new(header.clone());
        for _ in 0..header.entries_count {
            builder.push_entry(IndexEntry::read_from(&mut self.reader, header.version)?);
        }

        let checksum_offset = self.reader.length() - CHECKSUM_SIZE as u64;
        if self.reader.position() > checksum_offset {
            return Err(IndexError::unexpected_end(
                self.reader.position(),
                CHECKSUM_SIZE as u64,
                self.reader.remaining(),
            ));
        }

        while self.reader.position() < checksum_offset {
            builder.push_extension(Extension::read_from(&mut self.reader, checksum_offset)?);
        }

        let checksum = ObjectId::from(self.reader.read_array::<CHECKSUM_SIZE>()?);
        debug_assert_eq!(checksum, verified);

        Ok(builder.build(checksum))
    }

    fn check_signature(&mut self) -> Result<()> {
        let marker = self.reader.read_array::<4>()?;
        if marker != SIGNATURE {
            return Err(IndexError::BadSignature { found: marker });
        }
        self.reader.seek(0)
    }
}
