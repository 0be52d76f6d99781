//! Index file access
//!
//! - `index`: The on-disk index file (`.git/index`), decoded under a shared lock
//! - `inspector`: Command context pairing an index file with an output writer

pub mod index;
pub mod inspector;
