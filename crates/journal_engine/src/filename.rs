use chrono::NaiveDate;

/// Archive member name: `{ISO date} - {sanitized title}.md`.
pub fn entry_filename(date: NaiveDate, title: &str) -> String {
    format!("{} - {}.md", date.format("%Y-%m-%d"), sanitize_title(title))
}

/// Multi-file export artifact name for the given day.
pub fn archive_filename(today: NaiveDate) -> String {
    format!("Journal_Export_{}.zip", today.format("%Y-%m-%d"))
}

/// Single-document export artifact name for the given day.
pub fn document_filename(today: NaiveDate) -> String {
    format!("Journal_Full_Export_{}.md", today.format("%Y-%m-%d"))
}

/// Replace characters that are unsafe in file names with `_`, one for one.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '"' | '*' | '?' | '<' | '>' | '|')
}
