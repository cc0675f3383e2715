use std::fmt;
use std::io::{Cursor, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use journal_core::{ExportMode, ExportTally, IndexEntry};
use journal_logging::{journal_info, journal_warn};
use tokio_util::sync::CancellationToken;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::convert::{Html2MdConverter, MarkdownConverter};
use crate::decode::decode_document;
use crate::extract::EntryExtractor;
use crate::filename::{archive_filename, document_filename, entry_filename};
use crate::progress::ProgressSink;
use crate::source::FileSource;
use crate::types::{EntryFailure, ExportArtifact, ExportError};

/// Lines placed after every entry in a single-document export.
pub const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// Destination for converted entries, finalized into the artifact bytes.
pub trait OutputBundle {
    fn add(&mut self, entry: &IndexEntry, markdown: String);
    /// Status label shown while finalizing.
    fn finalizing_label(&self) -> &'static str;
    fn finalize(self) -> Result<Vec<u8>, ExportError>;
}

/// One `.md` member per entry, written as a Deflate zip on finalize.
#[derive(Debug, Default)]
pub struct ZipBundle {
    members: Vec<(String, String)>,
}

impl ZipBundle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputBundle for ZipBundle {
    fn add(&mut self, entry: &IndexEntry, markdown: String) {
        let name = entry_filename(entry.date, &entry.title);
        // Same day and title: the later entry replaces the earlier one in place.
        if let Some(existing) = self.members.iter_mut().find(|(n, _)| *n == name) {
            journal_warn!("Duplicate archive member {}; keeping the later entry", name);
            existing.1 = markdown;
        } else {
            self.members.push((name, markdown));
        }
    }

    fn finalizing_label(&self) -> &'static str {
        "Generating Zip..."
    }

    fn finalize(self) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in &self.members {
            zip.start_file(name.as_str(), options)
                .map_err(packaging_error)?;
            zip.write_all(content.as_bytes()).map_err(packaging_error)?;
        }
        let cursor = zip.finish().map_err(packaging_error)?;
        Ok(cursor.into_inner())
    }
}

/// Every entry's Markdown followed by [`ENTRY_SEPARATOR`], in insertion order.
#[derive(Debug, Default)]
pub struct ConcatenatedDocument {
    buffer: String,
}

impl ConcatenatedDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputBundle for ConcatenatedDocument {
    fn add(&mut self, _entry: &IndexEntry, markdown: String) {
        self.buffer.push_str(&markdown);
        self.buffer.push_str(ENTRY_SEPARATOR);
    }

    fn finalizing_label(&self) -> &'static str {
        "Generating Markdown..."
    }

    fn finalize(self) -> Result<Vec<u8>, ExportError> {
        Ok(self.buffer.into_bytes())
    }
}

fn packaging_error(err: impl fmt::Display) -> ExportError {
    ExportError::Packaging(err.to_string())
}

/// Entries selected for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Selected entries in any order; the packager sorts them by date.
    pub entries: Vec<IndexEntry>,
    pub mode: ExportMode,
    /// Date stamped into the artifact name.
    pub today: NaiveDate,
}

/// Drives resolve -> read -> extract -> convert for every entry and bundles the results.
pub struct Packager {
    source: Arc<dyn FileSource>,
    extractor: EntryExtractor,
    converter: Box<dyn MarkdownConverter>,
}

impl Packager {
    pub fn new(source: Arc<dyn FileSource>, extractor: EntryExtractor) -> Self {
        Self {
            source,
            extractor,
            converter: Box::new(Html2MdConverter),
        }
    }

    pub fn with_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Convert a single entry to its Markdown document.
    pub async fn convert_entry(&self, entry: &IndexEntry) -> Result<String, EntryFailure> {
        let Some(key) = self.source.resolve(&entry.href) else {
            return Err(EntryFailure::MissingFile {
                href: entry.href.clone(),
            });
        };
        let conversion_failure = |reason: String| EntryFailure::ConversionFailure {
            href: entry.href.clone(),
            reason,
        };
        let bytes = self
            .source
            .read(&key)
            .await
            .map_err(|err| conversion_failure(err.to_string()))?;
        let decoded = decode_document(&bytes).map_err(|err| conversion_failure(err.to_string()))?;
        Ok(self
            .extractor
            .render(&decoded.text, entry, self.converter.as_ref()))
    }

    /// Run a whole export. Per-entry failures are tallied; only an empty
    /// selection, cancellation or a packaging failure abort the run.
    pub async fn export(
        &self,
        job: ExportJob,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ExportArtifact, ExportError> {
        if job.entries.is_empty() {
            return Err(ExportError::NoEntriesSelected);
        }
        let mut entries = job.entries;
        entries.sort_by_key(|entry| entry.date);

        match job.mode {
            ExportMode::Archive => {
                self.run(&entries, ZipBundle::new(), archive_filename(job.today), sink, cancel)
                    .await
            }
            ExportMode::SingleDocument => {
                self.run(
                    &entries,
                    ConcatenatedDocument::new(),
                    document_filename(job.today),
                    sink,
                    cancel,
                )
                .await
            }
        }
    }

    async fn run<B: OutputBundle>(
        &self,
        entries: &[IndexEntry],
        mut bundle: B,
        filename: String,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ExportArtifact, ExportError> {
        let total = entries.len();
        let mut tally = ExportTally::default();
        let mut failures = Vec::new();

        for entry in entries {
            if cancel.is_cancelled() {
                journal_warn!("Export cancelled after {} of {} entries", tally.processed, total);
                return Err(ExportError::Cancelled);
            }
            tally.processed += 1;
            sink.progress(
                &format!("Processing {}/{}: {}", tally.processed, total, entry.title),
                percent_of(tally.processed, total),
            );

            match self.convert_entry(entry).await {
                Ok(markdown) => bundle.add(entry, markdown),
                Err(failure) => {
                    journal_warn!("{}", failure);
                    tally.errors += 1;
                    sink.entry_failed(&failure);
                    failures.push(failure);
                }
            }
        }

        sink.progress(bundle.finalizing_label(), 100);
        let bytes = bundle.finalize()?;
        journal_info!(
            "Packaged {} ({} bytes): {} processed, {} failed",
            filename,
            bytes.len(),
            tally.processed,
            tally.errors
        );
        Ok(ExportArtifact {
            filename,
            bytes,
            tally,
            failures,
        })
    }
}

/// Rounded completion percentage, `done` out of `total`.
fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done * 200 + total) / (total * 2)).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::percent_of;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(3, 3), 100);
    }
}
