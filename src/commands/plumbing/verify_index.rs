use crate::areas::inspector::Inspector;
use std::io::Write;

impl Inspector {
    /// Decode the index, which checks its trailing checksum, and report it
    pub fn verify(&self) -> anyhow::Result<()> {
        let index = self.load_index()?;

        writeln!(
            self.writer(),
            "ok {} (version {}, {} entries, {} extensions)",
            index.checksum(),
            index.version(),
            index.len(),
            index.extensions().len()
        )?;

        Ok(())
    }
}
