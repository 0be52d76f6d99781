use crate::areas::index::Index;
use crate::artifacts::index::index_state::IndexState;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Shared context of the commands: the index file to read and where to
/// write their output
pub struct Inspector {
    index: Index,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Inspector {
    pub fn new(index_path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> Self {
        Inspector {
            index: Index::new(index_path),
            writer: RefCell::new(writer),
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub(crate) fn load_index(&self) -> anyhow::Result<IndexState> {
        self.index
            .load()
            .with_context(|| format!("failed to read index {}", self.index.path().display()))
    }
}
