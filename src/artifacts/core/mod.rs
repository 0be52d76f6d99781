//! Core utilities and shared types
//!
//! [`Lines`] renders decoded structures as plain text, one item per line,
//! for the terminal or for a dump file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Bytes per line of a hex dump
const HEX_LINE_WIDTH: usize = 16;

/// Bytes per space separated group of a hex dump
const HEX_GROUP_WIDTH: usize = 2;

/// Indentation for nested lines
pub const INDENT: &str = "  ";

/// Text rendering of a decoded structure
pub trait Lines {
    fn to_lines(&self) -> Vec<String>;

    /// Write every line followed by a newline
    fn display(&self, writer: &mut dyn Write) -> io::Result<()> {
        for line in self.to_lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// Write the lines to `path`, creating or truncating it
    fn dump(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.display(&mut writer)?;
        writer.flush()
    }
}

/// Hex dump of opaque bytes: 16 bytes per line, groups of 2 bytes
pub fn hex_lines(data: &[u8]) -> Vec<String> {
    data.chunks(HEX_LINE_WIDTH)
        .map(|line| {
            line.chunks(HEX_GROUP_WIDTH)
                .map(|group| group.iter().map(|b| format!("{b:02x}")).collect::<String>())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Prefix every line with one level of indentation
pub fn indented(lines: Vec<String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|line| format!("{INDENT}{line}"))
}
