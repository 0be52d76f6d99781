//! Git index file
//!
//! The index lives at `.git/index` and is rewritten by Git whenever the
//! staging area changes. Reading it takes a shared advisory lock on the first
//! byte, so a writer that follows the same convention (taking an exclusive
//! lock) cannot replace the content halfway through a decode.

use crate::artifacts::index::decoder::IndexDecoder;
use crate::artifacts::index::index_state::IndexState;
use crate::error::Result;
use std::io::BufReader;
use std::ops::DerefMut;
use std::path::Path;

/// Handle to an index file on disk
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Index {
            path: path.as_ref().into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode and verify the index file
    ///
    /// The file is held under a shared lock until decoding finishes or fails.
    pub fn load(&self) -> Result<IndexState> {
        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        tracing::debug!(path = %self.path.display(), "loading index");
        IndexDecoder::new(BufReader::new(lock.deref_mut()))?.decode()
    }
}
