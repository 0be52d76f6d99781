//! Git index (`.git/index`) decoding
//!
//! - `areas`: the on-disk index file and the inspector driving the commands
//! - `artifacts`: index format types, the decoder and rendering helpers
//! - `commands`: command implementations behind the `dircache` binary
//! - `error`: the typed [`error::IndexError`]
//!
//! ```ignore
//! use dircache::areas::index::Index;
//!
//! let index = Index::new(".git/index").load()?;
//! for entry in index.entries() {
//!     println!("{} {}", entry.oid, entry.name);
//! }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;

pub use artifacts::index::decoder::IndexDecoder;
pub use artifacts::index::index_state::IndexState;
pub use error::{IndexError, Result};
