//! Derived metrics over a user's attendance, holiday and overtime maps.
//!
//! Everything here is pure: callers pass the reference date and the
//! displayed month explicitly.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::calendar::{is_weekend, month_days};
use super::status::{DayStatus, StatusKey};
use crate::models::holiday::{Holiday, HolidayMap};

pub type AttendanceMap = BTreeMap<NaiveDate, DayStatus>;
pub type OvertimeMap = BTreeMap<NaiveDate, f64>;

const HALF_DAY: f64 = 0.5;

/// Status shown for a day once public holidays are layered under the
/// user's own records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveDay<'a> {
    pub status: DayStatus,
    pub holiday: Option<&'a Holiday>,
}

pub fn effective_status<'a>(
    date: NaiveDate,
    records: &AttendanceMap,
    holidays: &'a HolidayMap,
) -> EffectiveDay<'a> {
    if let Some(record) = records.get(&date).filter(|r| r.overrides_holiday()) {
        return EffectiveDay {
            status: *record,
            holiday: None,
        };
    }

    match holidays.get(&date) {
        Some(holiday) => EffectiveDay {
            status: DayStatus::uniform(StatusKey::PublicHoliday),
            holiday: Some(holiday),
        },
        None => EffectiveDay {
            status: DayStatus::NONE,
            holiday: None,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct WioBreakdown {
    pub office_units: f64,
    pub total_working_units: f64,
    /// Rounded to the nearest whole percent; 0 when there are no working units.
    pub percentage: u32,
}

/// Work-in-office share of the weekday half-days in a month.
///
/// Leave and holiday halves are left out of the denominator so taking leave
/// does not lower the score.
pub fn wio_breakdown(
    year: i32,
    month: u32,
    records: &AttendanceMap,
    holidays: &HolidayMap,
) -> WioBreakdown {
    let mut office_units = 0.0;
    let mut total_working_units = 0.0;

    for date in month_days(year, month).filter(|d| !is_weekend(*d)) {
        let day = effective_status(date, records, holidays);
        for half in day.status.halves() {
            if !half.is_working_time() {
                continue;
            }
            total_working_units += HALF_DAY;
            if half == StatusKey::Office {
                office_units += HALF_DAY;
            }
        }
    }

    let percentage = if total_working_units > 0.0 {
        (office_units / total_working_units * 100.0).round() as u32
    } else {
        0
    };

    WioBreakdown {
        office_units,
        total_working_units,
        percentage,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct LeaveUsage {
    pub annual_used: f64,
    pub sick_used: f64,
    pub public_holidays_used: u32,
    pub public_holidays_total: u32,
}

/// Leave taken and public holidays granted during `year`.
///
/// Leave is counted from the user's explicit records only. A holiday counts
/// toward the total unless a record overrides it, and toward "used" once
/// its date is on or before `today`.
pub fn leave_usage(
    year: i32,
    records: &AttendanceMap,
    holidays: &HolidayMap,
    today: NaiveDate,
) -> LeaveUsage {
    let mut usage = LeaveUsage::default();

    for record in records
        .iter()
        .filter(|(date, _)| date.year() == year)
        .map(|(_, record)| record)
    {
        for half in record.halves() {
            match half {
                StatusKey::AnnualLeave => usage.annual_used += HALF_DAY,
                StatusKey::SickLeave => usage.sick_used += HALF_DAY,
                _ => {}
            }
        }
    }

    for date in holidays.keys().filter(|d| d.year() == year) {
        let overridden = records
            .get(date)
            .is_some_and(|record| record.overrides_holiday());
        if overridden {
            continue;
        }

        usage.public_holidays_total += 1;
        if *date <= today {
            usage.public_holidays_used += 1;
        }
    }

    usage
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct OvertimeTotals {
    pub month_total: f64,
    pub year_total: f64,
}

pub fn overtime_totals(year: i32, month: u32, overtime: &OvertimeMap) -> OvertimeTotals {
    overtime
        .iter()
        .filter(|(date, _)| date.year() == year)
        .fold(OvertimeTotals::default(), |mut totals, (date, hours)| {
            let hours = if hours.is_finite() { *hours } else { 0.0 };
            totals.year_total += hours;
            if date.month() == month {
                totals.month_total += hours;
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holiday_on(d: NaiveDate) -> HolidayMap {
        let mut map = HolidayMap::new();
        map.insert(d, Holiday::public(d, "Founders Day"));
        map
    }

    fn all_weekdays(year: i32, month: u32, status: DayStatus) -> AttendanceMap {
        month_days(year, month)
            .filter(|d| !is_weekend(*d))
            .map(|d| (d, status))
            .collect()
    }

    #[test]
    fn test_full_office_month_is_100() {
        // February 2027 has exactly 20 weekdays.
        let records = all_weekdays(2027, 2, DayStatus::uniform(StatusKey::Office));
        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());

        assert_eq!(wio.percentage, 100);
        assert_eq!(wio.office_units, 20.0);
        assert_eq!(wio.total_working_units, 20.0);
    }

    #[test]
    fn test_unmarked_weekdays_count_as_working_time() {
        let mut records = AttendanceMap::new();
        records.insert(date(2027, 2, 1), DayStatus::uniform(StatusKey::Office));

        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());
        assert_eq!(wio.office_units, 1.0);
        assert_eq!(wio.total_working_units, 20.0);
        assert_eq!(wio.percentage, 5);
    }

    #[test]
    fn test_leave_day_leaves_percentage_unchanged() {
        let mut records = all_weekdays(2027, 2, DayStatus::uniform(StatusKey::Office));
        records.insert(date(2027, 2, 3), DayStatus::uniform(StatusKey::AnnualLeave));

        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());
        assert_eq!(wio.office_units, 19.0);
        assert_eq!(wio.total_working_units, 19.0);
        assert_eq!(wio.percentage, 100);
    }

    #[test]
    fn test_split_day_contributes_half_units() {
        let mut records = all_weekdays(2027, 2, DayStatus::uniform(StatusKey::Remote));
        records.insert(
            date(2027, 2, 3),
            DayStatus::new(StatusKey::Office, StatusKey::Remote),
        );

        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());
        assert_eq!(wio.office_units, 0.5);
        assert_eq!(wio.total_working_units, 20.0);
    }

    #[test]
    fn test_weekends_are_ignored() {
        let mut records = AttendanceMap::new();
        // 2027-02-06 is a Saturday.
        records.insert(date(2027, 2, 6), DayStatus::uniform(StatusKey::Office));

        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());
        assert_eq!(wio.office_units, 0.0);
        assert_eq!(wio.percentage, 0);
    }

    #[test]
    fn test_empty_denominator_yields_zero() {
        let records = all_weekdays(2027, 2, DayStatus::uniform(StatusKey::SickLeave));
        let wio = wio_breakdown(2027, 2, &records, &HolidayMap::new());
        assert_eq!(wio.total_working_units, 0.0);
        assert_eq!(wio.percentage, 0);

        assert_eq!(wio_breakdown(2027, 13, &records, &HolidayMap::new()).percentage, 0);
    }

    #[test]
    fn test_holiday_excluded_unless_overridden() {
        let day = date(2027, 2, 3);
        let holidays = holiday_on(day);
        let mut records = all_weekdays(2027, 2, DayStatus::uniform(StatusKey::Office));
        records.remove(&day);

        let wio = wio_breakdown(2027, 2, &records, &holidays);
        assert_eq!(wio.total_working_units, 19.0);
        assert_eq!(wio.percentage, 100);

        records.insert(day, DayStatus::uniform(StatusKey::Remote));
        let wio = wio_breakdown(2027, 2, &records, &holidays);
        assert_eq!(wio.total_working_units, 20.0);
        assert_eq!(wio.percentage, 95);
    }

    #[test]
    fn test_effective_status_prefers_holiday_over_weak_record() {
        let day = date(2027, 2, 3);
        let holidays = holiday_on(day);
        let mut records = AttendanceMap::new();
        records.insert(day, DayStatus::new(StatusKey::None, StatusKey::Office));

        let effective = effective_status(day, &records, &holidays);
        assert_eq!(effective.status, DayStatus::uniform(StatusKey::PublicHoliday));
        assert_eq!(effective.holiday.map(|h| h.name.as_str()), Some("Founders Day"));

        let other = effective_status(date(2027, 2, 4), &records, &holidays);
        assert_eq!(other.status, DayStatus::NONE);
        assert!(other.holiday.is_none());
    }

    #[test]
    fn test_leave_usage_counts_half_days_in_year() {
        let mut records = AttendanceMap::new();
        records.insert(date(2026, 3, 2), DayStatus::uniform(StatusKey::AnnualLeave));
        records.insert(
            date(2026, 3, 3),
            DayStatus::new(StatusKey::AnnualLeave, StatusKey::SickLeave),
        );
        records.insert(date(2025, 12, 31), DayStatus::uniform(StatusKey::AnnualLeave));

        let usage = leave_usage(2026, &records, &HolidayMap::new(), date(2026, 6, 1));
        assert_eq!(usage.annual_used, 1.5);
        assert_eq!(usage.sick_used, 0.5);
        assert_eq!(usage.public_holidays_total, 0);
    }

    #[test]
    fn test_public_holiday_moves_to_used_once_passed() {
        let day = date(2026, 10, 1);
        let holidays = holiday_on(day);
        let records = AttendanceMap::new();

        let before = leave_usage(2026, &records, &holidays, date(2026, 9, 30));
        assert_eq!(before.public_holidays_total, 1);
        assert_eq!(before.public_holidays_used, 0);

        let on_the_day = leave_usage(2026, &records, &holidays, day);
        assert_eq!(on_the_day.public_holidays_used, 1);

        let other_year = leave_usage(2027, &records, &holidays, date(2027, 1, 1));
        assert_eq!(other_year.public_holidays_total, 0);
    }

    #[test]
    fn test_overridden_holiday_not_counted() {
        let day = date(2026, 10, 1);
        let holidays = holiday_on(day);
        let mut records = AttendanceMap::new();
        records.insert(day, DayStatus::uniform(StatusKey::AnnualLeave));

        let usage = leave_usage(2026, &records, &holidays, date(2026, 12, 31));
        assert_eq!(usage.public_holidays_total, 0);
        assert_eq!(usage.public_holidays_used, 0);
        assert_eq!(usage.annual_used, 1.0);
    }

    #[test]
    fn test_overtime_totals_split_by_month_and_year() {
        let mut overtime = OvertimeMap::new();
        overtime.insert(date(2026, 4, 1), 2.5);
        overtime.insert(date(2026, 4, 18), 8.0);
        overtime.insert(date(2026, 5, 2), 1.0);
        overtime.insert(date(2025, 4, 2), 3.0);

        let totals = overtime_totals(2026, 4, &overtime);
        assert_eq!(totals.month_total, 10.5);
        assert_eq!(totals.year_total, 11.5);
    }
}
