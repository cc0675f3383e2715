use journal_core::{FilterRange, IndexEntry};
use journal_logging::{journal_debug, journal_info, journal_trace};
use scraper::{Html, Selector};

use crate::decode::decode_document;
use crate::source::{locate_index, FileSource, SourceError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedIndex {
    /// Recognized entries in document order.
    pub entries: Vec<IndexEntry>,
    /// Earliest and latest entry dates; `None` when no entry was recognized.
    pub bounds: Option<FilterRange>,
}

/// Collect journal entries from every `<a href>` in the index document.
///
/// Anchors whose text does not start with a `D. Mon YYYY` date are skipped
/// silently. An index without any entry yields an empty result, not an error.
pub fn parse_index(html: &str) -> ParsedIndex {
    let doc = Html::parse_document(html);
    let Some(anchor_sel) = Selector::parse("a[href]").ok() else {
        return ParsedIndex::default();
    };

    let mut parsed = ParsedIndex::default();
    for anchor in doc.select(&anchor_sel) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }
        let text: String = anchor.text().collect();
        let Some(entry) = IndexEntry::from_anchor(&text, href) else {
            journal_trace!("Skipping non-entry link {:?}", href);
            continue;
        };

        parsed.bounds = Some(match parsed.bounds {
            Some(range) => FilterRange::new(range.start.min(entry.date), range.end.max(entry.date)),
            None => FilterRange::new(entry.date, entry.date),
        });
        parsed.entries.push(entry);
    }

    journal_debug!("Index lists {} entries", parsed.entries.len());
    parsed
}

/// Locate, read, decode and parse the index document of `source`.
pub async fn load_index(source: &dyn FileSource) -> Result<ParsedIndex, SourceError> {
    let key = locate_index(source)?;
    journal_info!("Using index document {}", key);
    let bytes = source.read(&key).await?;
    let decoded = decode_document(&bytes)?;
    Ok(parse_index(&decoded.text))
}
