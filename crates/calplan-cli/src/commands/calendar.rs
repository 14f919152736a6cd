//! Calendar grid and holiday listing.

use std::collections::BTreeMap;

use calplan_core::{
    Event, OutputFormat, OutputFormatter, ViewMode, fetch_holidays, filter_events_by_view,
    week_dates,
};
use chrono::NaiveDate;
use serde_json::json;

use crate::cli::DateViewArgs;
use crate::error::CliResult;

/// Renders the week or month grid around the reference date.
pub fn calendar(
    events: &[Event],
    args: &DateViewArgs,
    default_view: ViewMode,
    today: NaiveDate,
    formatter: &OutputFormatter,
    format: OutputFormat,
) -> CliResult<String> {
    let reference = args.date.unwrap_or(today);
    let view = args.view.unwrap_or(default_view);
    let holidays = holidays_for_view(reference, view);
    let visible = filter_events_by_view(events, reference, view);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "view": view,
            "date": reference.format("%Y-%m-%d").to_string(),
            "events": visible,
            "holidays": holidays,
        }))?),
        OutputFormat::Text => Ok(match view {
            ViewMode::Month => formatter.format_month_grid(reference, &visible, &holidays),
            ViewMode::Week => formatter.format_week_grid(reference, &visible, &holidays),
        }),
    }
}

/// Lists the holidays in the reference date's month.
pub fn holidays(date: Option<NaiveDate>, today: NaiveDate, format: OutputFormat) -> CliResult<String> {
    let reference = date.unwrap_or(today);
    let holidays = fetch_holidays(reference);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&holidays)?),
        OutputFormat::Text if holidays.is_empty() => Ok(format!(
            "{}년 {}월에는 공휴일이 없습니다.",
            reference.format("%Y"),
            reference.format("%-m")
        )),
        OutputFormat::Text => Ok(holidays
            .iter()
            .map(|(date, name)| format!("{} {}", date, name))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Holidays visible in the view. A week can straddle two months.
fn holidays_for_view(reference: NaiveDate, view: ViewMode) -> BTreeMap<String, String> {
    match view {
        ViewMode::Month => fetch_holidays(reference),
        ViewMode::Week => {
            let days = week_dates(reference);
            let mut holidays = fetch_holidays(days[0]);
            holidays.extend(fetch_holidays(days[6]));
            holidays
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Vec<Event> {
        vec![
            Event::new("1", "기존 회의", "2024-10-01", "10:00", "11:00"),
            Event::new("2", "다음 달 일정", "2024-11-01", "09:00", "10:00"),
        ]
    }

    #[test]
    fn month_grid_uses_default_view() {
        let output = calendar(
            &events(),
            &DateViewArgs::default(),
            ViewMode::Month,
            date(2024, 10, 20),
            &OutputFormatter::with_defaults(),
            OutputFormat::Text,
        )
        .unwrap();

        assert!(output.starts_with("2024년 10월\n"));
        assert!(output.contains("10-01 + 10:00-11:00 기존 회의"));
        assert!(output.contains("10-03 * 개천절"));
        assert!(!output.contains("다음 달 일정"));
    }

    #[test]
    fn week_grid_marks_holidays() {
        let args = DateViewArgs {
            date: Some(date(2024, 9, 15)),
            view: Some(ViewMode::Week),
        };
        let output = calendar(
            &[],
            &args,
            ViewMode::Month,
            date(2024, 1, 1),
            &OutputFormatter::with_defaults(),
            OutputFormat::Text,
        )
        .unwrap();

        assert!(output.contains("09-16 (월) * 추석"));
        assert!(output.contains("09-18 (수) * 추석"));
    }

    #[test]
    fn week_holidays_from_both_months() {
        let holidays = holidays_for_view(date(2024, 9, 30), ViewMode::Week);
        assert!(holidays.contains_key("2024-10-03"));
        assert!(holidays.contains_key("2024-09-17"));
    }

    #[test]
    fn calendar_json() {
        let args = DateViewArgs {
            date: Some(date(2024, 10, 1)),
            view: None,
        };
        let output = calendar(
            &events(),
            &args,
            ViewMode::Month,
            date(2024, 1, 1),
            &OutputFormatter::with_defaults(),
            OutputFormat::Json,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["view"], "month");
        assert_eq!(json["date"], "2024-10-01");
        assert_eq!(json["events"].as_array().unwrap().len(), 1);
        assert_eq!(json["holidays"]["2024-10-09"], "한글날");
    }

    #[test]
    fn holidays_text() {
        let output = holidays(Some(date(2024, 2, 20)), date(2024, 1, 1), OutputFormat::Text).unwrap();
        assert_eq!(output, "2024-02-09 설날\n2024-02-10 설날\n2024-02-11 설날");
    }

    #[test]
    fn holidays_empty_month() {
        let output = holidays(None, date(2024, 4, 1), OutputFormat::Text).unwrap();
        assert_eq!(output, "2024년 4월에는 공휴일이 없습니다.");
    }

    #[test]
    fn holidays_json() {
        let output = holidays(Some(date(2024, 1, 1)), date(2024, 1, 1), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json, serde_json::json!({ "2024-01-01": "신정" }));
    }
}
