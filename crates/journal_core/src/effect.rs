use crate::{ExportMode, IndexEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the export pipeline over the selected entries.
    StartExport {
        entries: Vec<IndexEntry>,
        mode: ExportMode,
    },
}
