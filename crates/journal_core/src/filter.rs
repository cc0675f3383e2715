use chrono::NaiveDate;

use crate::IndexEntry;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Smallest range holding every entry, or `None` when there are no entries.
    pub fn covering(entries: &[IndexEntry]) -> Option<Self> {
        let mut dates = entries.iter().map(|e| e.date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Borrowed view of the entries that fall inside a [`FilterRange`], in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntries<'a> {
    entries: Vec<&'a IndexEntry>,
}

impl<'a> FilteredEntries<'a> {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a IndexEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Owned copies for handing the selection across a thread boundary.
    pub fn to_vec(&self) -> Vec<IndexEntry> {
        self.entries.iter().map(|e| (*e).clone()).collect()
    }
}

/// Select the entries dated within `range`, both bounds inclusive.
///
/// Pure: the same inputs always yield the same subsequence and count.
pub fn filter_entries<'a>(entries: &'a [IndexEntry], range: &FilterRange) -> FilteredEntries<'a> {
    FilteredEntries {
        entries: entries.iter().filter(|e| range.contains(e.date)).collect(),
    }
}
