use std::fmt::Write;

use chrono::NaiveDate;
use journal_core::IndexEntry;

/// Day/month/year, the convention of the export tool's own UI.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid date format {0:?}")]
pub struct InvalidDateFormat(pub String);

/// Validated `chrono` strftime pattern for the `*Date: …*` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self, InvalidDateFormat> {
        let pattern = pattern.into();
        let mut probe = String::new();
        // Unknown specifiers and time fields make chrono's Display fail.
        if write!(probe, "{}", NaiveDate::MIN.format(&pattern)).is_err() {
            return Err(InvalidDateFormat(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.0)).is_err() {
            return date.to_string();
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

/// Entry document: generated header from index metadata, then the body.
pub fn build_entry_document(entry: &IndexEntry, date_format: &DateFormat, body_markdown: &str) -> String {
    format!(
        "# {title}\n\n*Date: {date}*\n\n---\n\n{body}",
        title = entry.title,
        date = date_format.format(entry.date),
        body = body_markdown
    )
}
