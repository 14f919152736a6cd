//! Calendar grid helpers for the week and month views.
//!
//! Weeks start on Sunday everywhere in this crate: the week filter, the week
//! grid and the month grid all use [`week_start`].

use chrono::{Datelike, Duration, NaiveDate};

/// Returns the Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Returns the seven days (Sunday through Saturday) of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Returns the number of days in a month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .filter(|last| last.month() == month)
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Lays out the month containing `date` as Sunday-first rows of day numbers.
///
/// Cells outside the month are `None`.
pub fn month_weeks(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let total = days_in_month(date.year(), date.month());
    let offset = date
        .with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0);

    let mut weeks = Vec::new();
    let mut row = [None; 7];
    let mut col = offset as usize;
    for day in 1..=total {
        row[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(row);
            row = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(row);
    }
    weeks
}

/// Returns true if `date` lies in `[start, end]`.
pub fn is_date_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// Short Korean weekday name, Sunday first.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    const LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];
    LABELS[date.weekday().num_days_from_sunday() as usize]
}

/// Title for the week view, e.g. `2024년 10월 1주`.
///
/// The week belongs to the month of its Thursday, so a week spanning two
/// months is numbered in whichever month holds most of its days.
pub fn format_week(date: NaiveDate) -> String {
    let thursday = week_start(date) + Duration::days(4);
    let week_of_month = (thursday.day() - 1) / 7 + 1;
    format!(
        "{}년 {}월 {}주",
        thursday.year(),
        thursday.month(),
        week_of_month
    )
}

/// Title for the month view, e.g. `2024년 10월`.
pub fn format_month(date: NaiveDate) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

/// Formats a date as `YYYY-MM-DD`, the form events store.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
