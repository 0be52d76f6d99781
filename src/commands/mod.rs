//! Command implementations
//!
//! Every command is a method on [`crate::areas::inspector::Inspector`] that
//! decodes the index and writes its report to the inspector's writer.
//!
//! - `plumbing`: Low-level views of the index file (show, ls-files, verify)

pub mod plumbing;
