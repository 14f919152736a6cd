//! Public holiday lookup.
//!
//! Backed by a fixed table of the 2024 Korean public holidays. The table is a
//! static data source, not a computed calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// 2024 public holidays keyed by `YYYY-MM-DD`.
const HOLIDAYS_2024: [(&str, &str); 14] = [
    ("2024-01-01", "신정"),
    ("2024-02-09", "설날"),
    ("2024-02-10", "설날"),
    ("2024-02-11", "설날"),
    ("2024-03-01", "삼일절"),
    ("2024-05-05", "어린이날"),
    ("2024-06-06", "현충일"),
    ("2024-08-15", "광복절"),
    ("2024-09-16", "추석"),
    ("2024-09-17", "추석"),
    ("2024-09-18", "추석"),
    ("2024-10-03", "개천절"),
    ("2024-10-09", "한글날"),
    ("2024-12-25", "크리스마스"),
];

/// Returns the holidays in the calendar month of `reference`.
///
/// The map is keyed by full date string and is empty for months without
/// holidays.
pub fn fetch_holidays(reference: NaiveDate) -> BTreeMap<String, String> {
    let prefix = reference.format("%Y-%m-").to_string();
    HOLIDAYS_2024
        .iter()
        .filter(|(date, _)| date.starts_with(&prefix))
        .map(|(date, name)| (date.to_string(), name.to_string()))
        .collect()
}
