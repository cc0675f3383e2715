use std::fmt;

use journal_core::ExportTally;

use crate::index::ParsedIndex;
use crate::source::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    pub label: String,
    pub percent: u8,
}

#[derive(Debug)]
pub enum EngineEvent {
    /// Answer to [`crate::EngineHandle::load_index`].
    IndexLoaded(Result<ParsedIndex, SourceError>),
    Progress(ExportProgress),
    /// A single entry was skipped; the export continues.
    EntryFailed(EntryFailure),
    ExportCompleted(Result<ExportArtifact, ExportError>),
}

/// Per-entry failure. Counted and reported, never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFailure {
    /// No file in the collection ends with the entry's reference.
    MissingFile { href: String },
    /// The backing file could not be read, decoded or converted.
    ConversionFailure { href: String, reason: String },
}

impl EntryFailure {
    pub fn href(&self) -> &str {
        match self {
            EntryFailure::MissingFile { href } | EntryFailure::ConversionFailure { href, .. } => {
                href
            }
        }
    }
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryFailure::MissingFile { href } => write!(f, "file not found for entry {href}"),
            EntryFailure::ConversionFailure { href, reason } => {
                write!(f, "failed to convert {href}: {reason}")
            }
        }
    }
}

/// Fatal export outcomes; no artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("no entries selected for export")]
    NoEntriesSelected,
    #[error("failed to package export: {0}")]
    Packaging(String),
    #[error("export cancelled")]
    Cancelled,
}

/// Finished export, ready to be saved under `filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub tally: ExportTally,
    /// Failed entries in processing order.
    pub failures: Vec<EntryFailure>,
}
