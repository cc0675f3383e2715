use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Title used when the anchor text carries a date but no `—` delimiter.
pub const UNTITLED: &str = "Untitled";

const TITLE_DELIMITER: char = '—';

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static ANCHOR_DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\.\s+([A-Za-z]{3})\s+(\d{4})").ok());

/// One journal day as listed in the index document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub date: NaiveDate,
    /// Anchor text as it appeared in the index, trimmed.
    pub original_text: String,
    /// Relative reference exactly as written in the index.
    pub href: String,
    pub title: String,
}

impl IndexEntry {
    /// Build an entry from an anchor's text and reference.
    ///
    /// Returns `None` for anchors that are not journal entries (no leading
    /// `D. Mon YYYY` date); index documents routinely contain such links.
    pub fn from_anchor(text: &str, href: &str) -> Option<Self> {
        let original_text = text.trim();
        let (date, title) = parse_anchor_text(original_text)?;
        Some(Self {
            date,
            original_text: original_text.to_string(),
            href: href.to_string(),
            title,
        })
    }
}

/// Parse anchor text of the form `"4. Feb 2026 — My Day"` into a date and title.
///
/// The month abbreviation is matched case-sensitively against `Jan`..`Dec`.
/// Day/month combinations that do not form a real calendar date are rejected.
pub fn parse_anchor_text(text: &str) -> Option<(NaiveDate, String)> {
    let text = text.trim();
    let re = ANCHOR_DATE.as_ref()?;
    let caps = re.captures(text)?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month_abbrev = caps.get(2)?.as_str();
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    let month = MONTHS.iter().position(|m| *m == month_abbrev)? as u32 + 1;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let title = text
        .split_once(TITLE_DELIMITER)
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string());

    Some((date, title))
}
