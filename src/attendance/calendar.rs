use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use super::metrics::{effective_status, AttendanceMap, OvertimeMap};
use super::status::DayStatus;
use crate::models::holiday::HolidayMap;

/// Every date of the given month; empty for an invalid month.
pub fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .into_iter()
        .flat_map(move |first| first.iter_days().take_while(move |d| d.month() == month))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First and last day of a calendar year.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = month_days(year, month).last()?;
    Some((first, last))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(example = "2026-10-01")]
    pub date: NaiveDate,
    /// 0 = Sunday … 6 = Saturday
    pub weekday: u32,
    pub is_weekend: bool,
    /// Effective status after layering public holidays
    pub status: DayStatus,
    /// Persisted code of the effective status
    pub code: i32,
    pub holiday_name: Option<String>,
    pub overtime_hours: Option<f64>,
}

/// One entry per day of the month, as the calendar grid shows it.
pub fn month_view(
    year: i32,
    month: u32,
    records: &AttendanceMap,
    holidays: &HolidayMap,
    overtime: &OvertimeMap,
) -> Vec<CalendarDay> {
    month_days(year, month)
        .map(|date| {
            let day = effective_status(date, records, holidays);
            CalendarDay {
                date,
                weekday: date.weekday().num_days_from_sunday(),
                is_weekend: is_weekend(date),
                status: day.status,
                code: day.status.encode(),
                holiday_name: day.holiday.map(|h| h.name.clone()),
                overtime_hours: overtime.get(&date).copied().filter(|h| *h > 0.0),
            }
        })
        .collect()
}
