/// Target shape of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// One Markdown file per entry, bundled into a zip archive.
    #[default]
    Archive,
    /// All entries concatenated into one Markdown document.
    SingleDocument,
}

/// Final counts of an export run.
///
/// `processed` counts every attempted entry, including the ones that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportTally {
    pub processed: usize,
    pub errors: usize,
}

impl ExportTally {
    pub fn succeeded(&self) -> usize {
        self.processed.saturating_sub(self.errors)
    }

    pub fn summary(&self) -> String {
        let mut text = format!("Conversion complete! {} entries exported.", self.succeeded());
        if self.errors > 0 {
            text.push_str(&format!(
                " ({} of {} entries failed)",
                self.errors, self.processed
            ));
        }
        text
    }
}
