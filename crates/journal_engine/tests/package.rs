mod common;

use std::io::{Cursor, Read};
use std::sync::Arc;

use common::{entry, init_logging, marked_entry_html, sample_export, ymd, RecordingSink};
use journal_core::{ExportMode, ExportTally, IndexEntry};
use journal_engine::{
    EntryExtractor, EntryFailure, ExportError, ExportJob, FileSource, MemoryFileSource, Packager,
    SourceError, ENTRY_SEPARATOR,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

fn unsorted_entries() -> Vec<IndexEntry> {
    vec![
        entry(ymd(2026, 2, 4), "My Day", "Entries/2026-02-04.html"),
        entry(ymd(2025, 12, 15), "Untitled", "Entries/2025-12-15.html"),
        entry(ymd(2026, 1, 10), "Snow", "Entries/2026-01-10.html"),
    ]
}

fn job(entries: Vec<IndexEntry>, mode: ExportMode) -> ExportJob {
    ExportJob {
        entries,
        mode,
        today: ymd(2026, 10, 19),
    }
}

fn packager(source: impl FileSource + 'static) -> Packager {
    Packager::new(Arc::new(source), EntryExtractor::default())
}

fn zip_members(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

#[tokio::test]
async fn archive_members_are_named_and_ordered_by_date() {
    init_logging();
    let sink = RecordingSink::default();
    let artifact = packager(sample_export())
        .export(
            job(unsorted_entries(), ExportMode::Archive),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(artifact.filename, "Journal_Export_2026-10-19.zip");
    assert_eq!(
        artifact.tally,
        ExportTally {
            processed: 3,
            errors: 0
        }
    );

    let members = zip_members(&artifact.bytes);
    let names: Vec<&str> = members.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "2025-12-15 - Untitled.md",
            "2026-01-10 - Snow.md",
            "2026-02-04 - My Day.md"
        ]
    );
    assert!(members[0].1.starts_with("# Untitled\n\n*Date: 15/12/2025*"));
    assert!(members[0].1.contains("Text of December"));
    assert!(members[1].1.contains("Recovered text"));
    assert!(members[2].1.contains("Text of my day"));
}

#[tokio::test]
async fn single_document_concatenates_in_date_order() {
    init_logging();
    let sink = RecordingSink::default();
    let artifact = packager(sample_export())
        .export(
            job(unsorted_entries(), ExportMode::SingleDocument),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(artifact.filename, "Journal_Full_Export_2026-10-19.md");
    let text = String::from_utf8(artifact.bytes).unwrap();
    let december = text.find("# Untitled").unwrap();
    let january = text.find("# Snow").unwrap();
    let february = text.find("# My Day").unwrap();
    assert!(december < january && january < february);
    assert!(text.ends_with(ENTRY_SEPARATOR));
    assert!(text.starts_with("# Untitled\n\n"));
}

#[tokio::test]
async fn missing_file_is_counted_and_the_batch_continues() {
    init_logging();
    let mut entries = unsorted_entries();
    entries.push(entry(ymd(2026, 1, 1), "Lost", "Entries/missing.html"));
    let sink = RecordingSink::default();

    let artifact = packager(sample_export())
        .export(job(entries, ExportMode::Archive), &sink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(artifact.tally.processed, 4);
    assert_eq!(artifact.tally.errors, 1);
    assert_eq!(
        artifact.failures,
        vec![EntryFailure::MissingFile {
            href: "Entries/missing.html".to_string()
        }]
    );
    assert_eq!(*sink.failures.lock().unwrap(), artifact.failures);
    assert_eq!(zip_members(&artifact.bytes).len(), 3);
}

struct BrokenReads(MemoryFileSource);

#[async_trait::async_trait]
impl FileSource for BrokenReads {
    fn keys(&self) -> Vec<&str> {
        self.0.keys()
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        if key.contains("broken") {
            return Err(SourceError::Io {
                path: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            });
        }
        self.0.read(key).await
    }
}

#[tokio::test]
async fn read_failure_is_a_conversion_failure() {
    init_logging();
    let source = BrokenReads(
        MemoryFileSource::new()
            .with_file("J/Entries/ok.html", marked_entry_html("fine"))
            .with_file("J/Entries/broken.html", marked_entry_html("never read")),
    );
    let entries = vec![
        entry(ymd(2026, 1, 2), "Broken", "Entries/broken.html"),
        entry(ymd(2026, 1, 1), "Ok", "Entries/ok.html"),
    ];
    let sink = RecordingSink::default();

    let artifact = packager(source)
        .export(
            job(entries, ExportMode::SingleDocument),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        artifact.tally,
        ExportTally {
            processed: 2,
            errors: 1
        }
    );
    assert!(matches!(
        &artifact.failures[..],
        [EntryFailure::ConversionFailure { href, reason }]
            if href == "Entries/broken.html" && reason.contains("disk on fire")
    ));
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert!(text.contains("fine"));
    assert!(!text.contains("never read"));
}

#[tokio::test]
async fn every_entry_failing_still_produces_an_artifact() {
    let entries = vec![
        entry(ymd(2026, 1, 1), "a", "Entries/nope-a.html"),
        entry(ymd(2026, 1, 2), "b", "Entries/nope-b.html"),
    ];
    let artifact = packager(sample_export())
        .export(
            job(entries, ExportMode::SingleDocument),
            &RecordingSink::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(artifact.tally.succeeded(), 0);
    assert_eq!(artifact.tally.processed, 2);
    assert!(artifact.bytes.is_empty());
}

#[tokio::test]
async fn progress_is_monotonic_and_ends_with_finalizing() {
    let sink = RecordingSink::default();
    packager(sample_export())
        .export(
            job(unsorted_entries(), ExportMode::Archive),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        sink.labels(),
        vec![
            "Processing 1/3: Untitled",
            "Processing 2/3: Snow",
            "Processing 3/3: My Day",
            "Generating Zip...",
        ]
    );
    assert_eq!(sink.percents(), vec![33, 67, 100, 100]);
}

#[tokio::test]
async fn same_day_and_title_replace_the_archive_member() {
    let source = MemoryFileSource::new()
        .with_file("J/Entries/first.html", marked_entry_html("first version"))
        .with_file("J/Entries/second.html", marked_entry_html("second version"));
    let entries = vec![
        entry(ymd(2026, 1, 1), "Same", "Entries/first.html"),
        entry(ymd(2026, 1, 1), "Same", "Entries/second.html"),
    ];
    let artifact = packager(source)
        .export(
            job(entries, ExportMode::Archive),
            &RecordingSink::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let members = zip_members(&artifact.bytes);
    assert_eq!(members.len(), 1);
    assert!(members[0].1.contains("second version"));
    assert_eq!(artifact.tally.processed, 2);
}

#[tokio::test]
async fn cancellation_discards_partial_output() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = packager(sample_export())
        .export(
            job(unsorted_entries(), ExportMode::Archive),
            &RecordingSink::default(),
            &cancel,
        )
        .await;
    assert_eq!(result, Err(ExportError::Cancelled));
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let result = packager(sample_export())
        .export(
            job(Vec::new(), ExportMode::Archive),
            &RecordingSink::default(),
            &CancellationToken::new(),
        )
        .await;
    assert_eq!(result, Err(ExportError::NoEntriesSelected));
}
