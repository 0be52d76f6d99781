use crate::areas::inspector::Inspector;
use crate::artifacts::core::Lines;
use anyhow::Context;
use std::path::Path;

impl Inspector {
    /// Render the decoded index, to the writer or to `output` when given
    pub fn show(&self, output: Option<&Path>) -> anyhow::Result<()> {
        let index = self.load_index()?;

        match output {
            Some(path) => index
                .dump(path)
                .with_context(|| format!("failed to write dump to {}", path.display())),
            None => {
                let mut writer = self.writer();
                index.display(&mut *writer)?;
                Ok(())
            }
        }
    }
}
