use chrono::NaiveDate;
use journal_core::{parse_anchor_text, IndexEntry, UNTITLED};
use pretty_assertions::assert_eq;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn date_and_title_are_split_on_em_dash() {
    let (date, title) = parse_anchor_text("4. Feb 2026 — My Day").unwrap();
    assert_eq!(date, ymd(2026, 2, 4));
    assert_eq!(title, "My Day");
}

#[test]
fn missing_delimiter_yields_untitled() {
    let (date, title) = parse_anchor_text("15. Dec 2025").unwrap();
    assert_eq!(date, ymd(2025, 12, 15));
    assert_eq!(title, UNTITLED);
}

#[test]
fn every_month_abbreviation_maps_to_its_number() {
    let months = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    for (idx, month) in months.iter().enumerate() {
        let text = format!("1. {month} 2024 — x");
        let (date, _) = parse_anchor_text(&text).unwrap();
        assert_eq!(date, ymd(2024, idx as u32 + 1, 1), "month {month}");
    }
}

#[test]
fn two_digit_days_and_extra_spacing_are_accepted() {
    let (date, title) = parse_anchor_text("28.  Nov   2025 —   Walk in the park  ").unwrap();
    assert_eq!(date, ymd(2025, 11, 28));
    assert_eq!(title, "Walk in the park");
}

#[test]
fn title_keeps_later_em_dashes() {
    let (_, title) = parse_anchor_text("3. Mar 2026 — Before — After").unwrap();
    assert_eq!(title, "Before — After");
}

#[test]
fn text_without_leading_date_is_not_an_entry() {
    assert_eq!(parse_anchor_text("Back to top"), None);
    assert_eq!(parse_anchor_text("My Day — 4. Feb 2026"), None);
    assert_eq!(parse_anchor_text("4 Feb 2026 — no dot"), None);
    assert_eq!(parse_anchor_text("4. Foo 2026 — bad month"), None);
    assert_eq!(parse_anchor_text("4. Feb 26 — short year"), None);
}

#[test]
fn entry_from_anchor_carries_all_fields() {
    let entry = IndexEntry::from_anchor("4. Feb 2026 — My Day", "Entries/2026-02-04.html").unwrap();
    assert_eq!(
        entry,
        IndexEntry {
            date: ymd(2026, 2, 4),
            original_text: "4. Feb 2026 — My Day".to_string(),
            href: "Entries/2026-02-04.html".to_string(),
            title: "My Day".to_string(),
        }
    );
}
