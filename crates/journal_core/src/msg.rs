use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The index document was parsed; replaces the whole entry set.
    IndexParsed(Vec<crate::IndexEntry>),
    /// User picked a new start date.
    StartDateChanged(NaiveDate),
    /// User picked a new end date.
    EndDateChanged(NaiveDate),
    /// User switched between archive and single-document output.
    ModeChanged(crate::ExportMode),
    /// User asked to convert the selected range.
    ConvertClicked,
    /// Engine progress for the running export.
    ExportProgress { label: String, percent: u8 },
    /// One entry could not be exported; the run continues.
    EntryFailed(String),
    /// Engine finished the export and the artifact was saved.
    ExportFinished {
        tally: crate::ExportTally,
        artifact: String,
    },
    /// Export aborted by a fatal error.
    ExportFailed(String),
}
