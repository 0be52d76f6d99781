use crate::areas::inspector::Inspector;
use std::io::Write;

impl Inspector {
    /// List staged paths in index order
    ///
    /// With `stage` every line is `<mode> <oid> <stage>\t<path>`, the layout of
    /// `git ls-files --stage`. Paths are written byte for byte.
    pub fn ls_files(&self, stage: bool) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let mut writer = self.writer();

        for entry in index.entries() {
            if stage {
                write!(writer, "{} {} {}\t", entry.mode, entry.oid, entry.stage())?;
            }
            writer.write_all(&entry.name)?;
            writeln!(writer)?;
        }

        Ok(())
    }
}
