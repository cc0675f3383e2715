use chrono::NaiveDate;

use crate::view_model::AppViewModel;
use crate::{filter_entries, ExportMode, ExportTally, FilterRange, FilteredEntries, IndexEntry};

/// Where the current session's export stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Running { label: String, percent: u8 },
    Finished { tally: ExportTally, artifact: String },
    Failed(String),
}

/// Conditions that leave nothing usable for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalState {
    /// An index exists but none of its links look like journal entries.
    NoEntriesParsed,
}

/// Non-fatal feedback for the last user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingToConvert,
}

/// One conversion session: the parsed entries plus the user's current choices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    entries: Vec<IndexEntry>,
    bounds: Option<FilterRange>,
    range: Option<FilterRange>,
    mode: ExportMode,
    phase: ExportPhase,
    fatal: Option<FatalState>,
    notice: Option<Notice>,
    failures: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let in_range = self.selected().map_or(0, |s| s.count());
        AppViewModel {
            entry_count: self.entries.len(),
            bounds: self.bounds,
            range: self.range,
            in_range,
            convert_enabled: self.fatal.is_none() && in_range > 0 && !self.is_exporting(),
            mode: self.mode,
            phase: self.phase.clone(),
            fatal: self.fatal,
            notice: self.notice,
            failures: self.failures.clone(),
            dirty: self.dirty,
        }
    }

    /// Entries inside the current range, in index order.
    pub fn selected(&self) -> Option<FilteredEntries<'_>> {
        self.range
            .as_ref()
            .map(|range| filter_entries(&self.entries, range))
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_exporting(&self) -> bool {
        matches!(self.phase, ExportPhase::Running { .. })
    }

    pub(crate) fn fatal(&self) -> Option<FatalState> {
        self.fatal
    }

    pub(crate) fn mode(&self) -> ExportMode {
        self.mode
    }

    pub(crate) fn load_entries(&mut self, entries: Vec<IndexEntry>) {
        self.bounds = FilterRange::covering(&entries);
        self.range = self.bounds;
        self.fatal = if entries.is_empty() {
            Some(FatalState::NoEntriesParsed)
        } else {
            None
        };
        self.entries = entries;
        self.phase = ExportPhase::Idle;
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn set_start(&mut self, start: NaiveDate) {
        if let Some(range) = self.range.as_mut() {
            range.start = start;
            self.notice = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_end(&mut self, end: NaiveDate) {
        if let Some(range) = self.range.as_mut() {
            range.end = end;
            self.notice = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_mode(&mut self, mode: ExportMode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn begin_export(&mut self) {
        self.failures.clear();
        self.notice = None;
        self.set_phase(ExportPhase::Running {
            label: "Initializing...".to_string(),
            percent: 0,
        });
    }

    pub(crate) fn record_failure(&mut self, description: String) {
        self.failures.push(description);
        self.mark_dirty();
    }

    pub(crate) fn set_phase(&mut self, phase: ExportPhase) {
        self.phase = phase;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
