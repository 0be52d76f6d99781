//! Plumbing commands
//!
//! ## Commands
//!
//! - `show`: Every decoded field of the index, section by section
//! - `ls-files`: Staged paths, optionally with mode, object id and stage
//! - `verify`: Check the trailing checksum and report it

pub mod ls_files;
pub mod show_index;
pub mod verify_index;
