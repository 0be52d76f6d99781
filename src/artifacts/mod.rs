//! Index data structures and algorithms
//!
//! - `core`: Shared rendering helpers
//! - `index`: Index file format and decoder
//! - `objects`: Object ids

pub mod core;
pub mod index;
pub mod objects;
