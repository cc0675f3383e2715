#![allow(dead_code)]

use std::sync::{Mutex, Once};

use chrono::NaiveDate;
use journal_core::IndexEntry;
use journal_engine::{EntryFailure, MemoryFileSource, ProgressSink};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(journal_logging::initialize_for_tests);
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn entry(date: NaiveDate, title: &str, href: &str) -> IndexEntry {
    IndexEntry {
        date,
        original_text: format!("{} — {title}", date.format("%-d. %b %Y")),
        href: href.to_string(),
        title: title.to_string(),
    }
}

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>Journal</title></head>
<body>
<p class="p1"><span class="s1"><a href="Entries/2026-02-04.html">4. Feb 2026 — My Day</a></span></p>
<p class="p1"><span class="s1"><a href="Entries/2025-12-15.html">15. Dec 2025</a></span></p>
<p class="p1"><span class="s1"><a href="Entries/2026-01-10.html">10. Jan 2026 — Snow</a></span></p>
<p class="p1"><span class="s1"><a href="about.html">About this export</a></span></p>
<p><a name="top">4. Feb 2026 — anchor without href</a></p>
</body></html>"#;

/// Entry whose text sits in marked body paragraphs.
pub fn marked_entry_html(text: &str) -> String {
    format!(
        r#"<html><head><style>p {{ margin: 0 }}</style></head><body>
<p class="p1"><span class="s1">Wrapper metadata</span></p>
<p class="p2">{text}</p>
<p class="p3"> </p>
<p class="p2">Second paragraph</p>
<p>Loose paragraph</p>
<p>   </p>
</body></html>"#
    )
}

/// Entry without marked paragraphs, wrapped in layout blocks.
pub const UNMARKED_ENTRY_HTML: &str = r#"<html><head><style>.x { color: red }</style></head><body>
<div class="pageContainer">
  <div class="pageHeader">Header noise</div>
  <div class="title">Title noise</div>
  <div class="assetGrid"><img src="photo.jpg" alt="Photo noise"></div>
  <div class="reflectionPrompt">Prompt noise</div>
  <div class="photoBanner">Banner noise</div>
  <div class="bodyText"><p>Recovered text</p></div>
  <script>var scriptNoise = 1;</script>
</div>
</body></html>"#;

/// Export folder with an index and three entries, under a root folder name.
pub fn sample_export() -> MemoryFileSource {
    MemoryFileSource::new()
        .with_file("MyJournal/index.html", INDEX_HTML)
        .with_file(
            "MyJournal/Entries/2026-02-04.html",
            marked_entry_html("Text of my day"),
        )
        .with_file(
            "MyJournal/Entries/2025-12-15.html",
            marked_entry_html("Text of December"),
        )
        .with_file("MyJournal/Entries/2026-01-10.html", UNMARKED_ENTRY_HTML)
        .with_file("MyJournal/Resources/photo.jpg", vec![0xFF, 0xD8, 0xFF])
}

#[derive(Default)]
pub struct RecordingSink {
    pub updates: Mutex<Vec<(String, u8)>>,
    pub failures: Mutex<Vec<EntryFailure>>,
}

impl RecordingSink {
    pub fn labels(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    pub fn percents(&self) -> Vec<u8> {
        self.updates.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn progress(&self, label: &str, percent: u8) {
        self.updates
            .lock()
            .unwrap()
            .push((label.to_string(), percent));
    }

    fn entry_failed(&self, failure: &EntryFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}
