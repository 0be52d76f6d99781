//! Sequential, bounds-checked reader over an index source
//!
//! All multi-byte integers in the index are big-endian (network byte order).
//! Every read checks the remaining length first, so running out of data is
//! always reported as [`IndexError::UnexpectedEnd`] with the offset at which it
//! happened rather than as a bare I/O error.

use crate::error::{IndexError, Result};
use byteorder::{NetworkEndian, ReadBytesExt};
use bytes::Bytes;
use std::io::{self, Read, Seek, SeekFrom};

#[derive(Debug)]
pub struct IndexReader<R> {
    inner: R,
    position: u64,
    length: u64,
}

impl<R: Read + Seek> IndexReader<R> {
    /// Wrap a source, measuring its total length once and rewinding to the start
    pub fn new(mut inner: R) -> Result<Self> {
        let length = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;

        Ok(IndexReader {
            inner,
            position: 0,
            length,
        })
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn remaining(&self) -> u64 {
        self.length.saturating_sub(self.position)
    }

    fn ensure(&self, wanted: u64) -> Result<()> {
        if self.remaining() < wanted {
            return Err(IndexError::unexpected_end(
                self.position,
                wanted,
                self.remaining(),
            ));
        }
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let value = self.inner.read_u32::<NetworkEndian>()?;
        self.position += 4;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = self.inner.read_u16::<NetworkEndian>()?;
        self.position += 2;
        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buffer = [0u8; N];
        self.read_into(&mut buffer)?;
        Ok(buffer)
    }

    pub fn read_into(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.ensure(buffer.len() as u64)?;
        self.inner.read_exact(buffer)?;
        self.position += buffer.len() as u64;
        Ok(())
    }

    pub fn read_bytes(&mut self, size: usize) -> Result<Bytes> {
        let mut buffer = vec![0; size];
        self.read_into(&mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Move forward by `count` bytes, discarding them
    ///
    /// Reads instead of seeking so a buffered source keeps its buffer.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.ensure(count)?;
        let skipped = io::copy(&mut (&mut self.inner).take(count), &mut io::sink())?;
        if skipped < count {
            return Err(IndexError::unexpected_end(self.position + skipped, count - skipped, 0));
        }
        self.position += count;
        Ok(())
    }

    /// Jump to an absolute position; the end of the source is a valid target
    pub fn seek(&mut self, position: u64) -> Result<()> {
        if position > self.length {
            return Err(IndexError::unexpected_end(
                self.position,
                position - self.position,
                self.remaining(),
            ));
        }
        self.position = self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}
