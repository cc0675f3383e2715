use journal_core::{AppViewModel, ExportPhase, FatalState, FilteredEntries, Notice};
use journal_engine::DateFormat;

/// Entry count, available bounds and the current selection.
pub(crate) fn overview_lines(view: &AppViewModel, date_format: &DateFormat) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(bounds) = view.bounds {
        lines.push(format!(
            "Found {} entries from {} to {}",
            view.entry_count,
            date_format.format(bounds.start),
            date_format.format(bounds.end)
        ));
    }
    if let Some(range) = view.range {
        lines.push(format!(
            "Selected range {} to {} contains {} entries.",
            range.start, range.end, view.in_range
        ));
    }
    lines
}

/// One line per selected entry: ISO date, title and reference.
pub(crate) fn entry_lines(selected: &FilteredEntries<'_>) -> Vec<String> {
    selected
        .iter()
        .map(|entry| format!("{}  {}  ({})", entry.date, entry.title, entry.href))
        .collect()
}

pub(crate) fn progress_line(view: &AppViewModel) -> Option<String> {
    match &view.phase {
        ExportPhase::Running { label, percent } => Some(format!("[{percent:>3}%] {label}")),
        _ => None,
    }
}

/// Why nothing was converted, if that is the case.
pub(crate) fn blocking_message(view: &AppViewModel) -> Option<&'static str> {
    if let Some(FatalState::NoEntriesParsed) = view.fatal {
        return Some("No journal entries were found in index.html. Nothing to convert.");
    }
    if let Some(Notice::NothingToConvert) = view.notice {
        return Some("Selected range contains 0 entries. Nothing to convert.");
    }
    None
}

pub(crate) fn outcome_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines: Vec<String> = view
        .failures
        .iter()
        .map(|failure| format!("  skipped: {failure}"))
        .collect();
    match &view.phase {
        ExportPhase::Finished { tally, artifact } => {
            lines.push(tally.summary());
            lines.push(format!("Saved to {artifact}"));
        }
        ExportPhase::Failed(reason) => lines.push(format!("Export failed: {reason}")),
        ExportPhase::Idle | ExportPhase::Running { .. } => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_core::{ExportTally, FilterRange};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overview_uses_display_format_for_bounds() {
        let view = AppViewModel {
            entry_count: 12,
            bounds: Some(FilterRange::new(ymd(2025, 12, 1), ymd(2026, 2, 4))),
            range: Some(FilterRange::new(ymd(2025, 12, 1), ymd(2026, 1, 31))),
            in_range: 9,
            ..Default::default()
        };
        assert_eq!(
            overview_lines(&view, &DateFormat::default()),
            vec![
                "Found 12 entries from 01/12/2025 to 04/02/2026".to_string(),
                "Selected range 2025-12-01 to 2026-01-31 contains 9 entries.".to_string(),
            ]
        );
    }

    #[test]
    fn finished_export_reports_partial_failures() {
        let view = AppViewModel {
            phase: ExportPhase::Finished {
                tally: ExportTally {
                    processed: 3,
                    errors: 1,
                },
                artifact: "out/Journal_Export_2026-10-19.zip".to_string(),
            },
            failures: vec!["file not found for entry Entries/x.html".to_string()],
            ..Default::default()
        };
        assert_eq!(
            outcome_lines(&view),
            vec![
                "  skipped: file not found for entry Entries/x.html".to_string(),
                "Conversion complete! 2 entries exported. (1 of 3 entries failed)".to_string(),
                "Saved to out/Journal_Export_2026-10-19.zip".to_string(),
            ]
        );
    }

    #[test]
    fn running_export_renders_percent() {
        let view = AppViewModel {
            phase: ExportPhase::Running {
                label: "Processing 1/3: Snow".to_string(),
                percent: 33,
            },
            ..Default::default()
        };
        assert_eq!(
            progress_line(&view).as_deref(),
            Some("[ 33%] Processing 1/3: Snow")
        );
    }

    #[test]
    fn empty_index_and_empty_range_are_told_apart() {
        let fatal = AppViewModel {
            fatal: Some(FatalState::NoEntriesParsed),
            ..Default::default()
        };
        let empty = AppViewModel {
            notice: Some(Notice::NothingToConvert),
            ..Default::default()
        };
        assert_ne!(blocking_message(&fatal), blocking_message(&empty));
        assert_eq!(blocking_message(&AppViewModel::default()), None);
    }
}
