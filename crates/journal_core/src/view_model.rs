use crate::{ExportMode, ExportPhase, FatalState, FilterRange, Notice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Every entry recognized in the index.
    pub entry_count: usize,
    /// Earliest and latest entry dates, if any entries were parsed.
    pub bounds: Option<FilterRange>,
    /// Currently selected range.
    pub range: Option<FilterRange>,
    /// Entries inside `range`.
    pub in_range: usize,
    pub convert_enabled: bool,
    pub mode: ExportMode,
    pub phase: ExportPhase,
    pub fatal: Option<FatalState>,
    pub notice: Option<Notice>,
    /// Entries that failed during the current or last export.
    pub failures: Vec<String>,
    pub dirty: bool,
}
