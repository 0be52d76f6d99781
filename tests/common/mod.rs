#![allow(dead_code)]

pub mod command;
pub mod file;

/// Minimal valid index: header for version 2 with no entries, then its SHA-1
pub fn empty_index() -> Vec<u8> {
    use sha1::{Digest, Sha1};

    let mut bytes = b"DIRC\0\0\0\x02\0\0\0\0".to_vec();
    let digest = Sha1::digest(&bytes);
    bytes.extend_from_slice(digest.as_slice());
    bytes
}

pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}
