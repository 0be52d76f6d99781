//! Resolve undo extension (`REUC`)
//!
//! A conflict is represented in the index as a set of higher stage entries.
//! When the conflict is resolved (e.g. with `git add path`) those entries are
//! removed and a stage 0 entry takes their place. The removed entries are
//! saved here so the conflict can be recreated (e.g. with `git checkout -m`).
//!
//! Each entry is:
//!
//! ```text
//!   NUL-terminated full path
//!   three NUL-terminated ASCII octal modes, for stages 1 to 3 (exactly "0" if missing)
//!   one 20-byte object id per present stage, in stage order
//! ```

use crate::artifacts::core::{Lines, indented};
use crate::artifacts::index::entry_flags::Stage;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::extensions::{FieldScanner, Unpackable};
use crate::artifacts::objects::OBJECT_ID_SIZE;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{IndexError, Result};
use bstr::BString;
use bytes::Bytes;

/// One side of a resolved conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoStage {
    pub mode: EntryMode,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveUndoEntry {
    /// Path relative to the repository root
    pub path: BString,
    /// Stages 1 (base), 2 (ours) and 3 (theirs)
    pub stages: [Option<UndoStage>; 3],
}

impl ResolveUndoEntry {
    /// The saved stage, if any; stage 0 is never saved
    pub fn stage(&self, stage: Stage) -> Option<&UndoStage> {
        match stage {
            Stage::Merged => None,
            other => self.stages[usize::from(other.as_u8()) - 1].as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveUndo {
    entries: Vec<ResolveUndoEntry>,
}

impl ResolveUndo {
    pub fn entries(&self) -> &[ResolveUndoEntry] {
        &self.entries
    }

    pub fn find(&self, path: &[u8]) -> Option<&ResolveUndoEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }
}

/// Mode text written for a stage that did not exist
const MISSING_STAGE_MODE: &[u8] = b"0";

fn malformed(offset: usize, reason: &'static str) -> IndexError {
    IndexError::MalformedUndoEntry { offset, reason }
}

impl Unpackable for ResolveUndo {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let mut scanner = FieldScanner::new(&payload);
        let mut entries = Vec::new();

        while !scanner.is_exhausted() {
            let start = scanner.position();
            let path = scanner
                .take_until(0)
                .ok_or_else(|| malformed(start, "missing NUL after path"))?;

            // (mode, present); only the literal "0" marks a missing stage
            let mut modes = [(EntryMode::default(), false); 3];
            for (mode, present) in modes.iter_mut() {
                let field_at = scanner.position();
                let text = scanner
                    .take_until(0)
                    .ok_or_else(|| malformed(field_at, "missing NUL after mode"))?;
                *mode = EntryMode::from_octal(text)
                    .ok_or_else(|| malformed(field_at, "mode is not an octal number"))?;
                *present = text != MISSING_STAGE_MODE;
            }

            let mut stages = [None; 3];
            for (stage, (mode, present)) in stages.iter_mut().zip(modes) {
                if !present {
                    continue;
                }
                let field_at = scanner.position();
                let oid = scanner
                    .take(OBJECT_ID_SIZE)
                    .ok_or_else(|| malformed(field_at, "truncated object id"))?;
                *stage = Some(UndoStage {
                    mode,
                    oid: ObjectId::try_from(oid)?,
                });
            }

            entries.push(ResolveUndoEntry {
                path: BString::from(path),
                stages,
            });
        }

        tracing::debug!(entries = entries.len(), "decoded resolve undo");
        Ok(ResolveUndo { entries })
    }
}

impl Lines for ResolveUndoEntry {
    fn to_lines(&self) -> Vec<String> {
        let stages = self.stages.iter().enumerate().map(|(i, stage)| match stage {
            Some(stage) => format!("stage {}: {} {}", i + 1, stage.mode, stage.oid),
            None => format!("stage {}: -", i + 1),
        });

        std::iter::once(self.path.to_string())
            .chain(indented(stages.collect()))
            .collect()
    }
}

impl Lines for ResolveUndo {
    fn to_lines(&self) -> Vec<String> {
        self.entries.iter().flat_map(|entry| entry.to_lines()).collect()
    }
}
