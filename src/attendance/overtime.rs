use chrono::NaiveDate;

use super::calendar::is_weekend;

pub const WORKDAY_MAX_HOURS: f64 = 16.0;
pub const REST_DAY_MAX_HOURS: f64 = 24.0;

/// Upper bound for overtime logged on `date`.
pub fn max_overtime_hours(date: NaiveDate, is_public_holiday: bool) -> f64 {
    if is_public_holiday || is_weekend(date) {
        REST_DAY_MAX_HOURS
    } else {
        WORKDAY_MAX_HOURS
    }
}

/// Normalises an overtime entry before it is stored.
///
/// Returns `None` when the entry should be removed: non-finite, zero or
/// negative input, or anything that rounds to zero. Otherwise the value is
/// capped for the kind of day and rounded to the nearest half hour.
pub fn normalize_overtime(date: NaiveDate, hours: f64, is_public_holiday: bool) -> Option<f64> {
    if !hours.is_finite() || hours <= 0.0 {
        return None;
    }

    let capped = hours.min(max_overtime_hours(date, is_public_holiday));
    let rounded = (capped * 2.0).round() / 2.0;

    (rounded > 0.0).then_some(rounded)
}

/// What a requested overtime value does to the stored entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OvertimeChange {
    Set(f64),
    Clear,
}

impl OvertimeChange {
    pub fn hours(self) -> Option<f64> {
        match self {
            OvertimeChange::Set(hours) => Some(hours),
            OvertimeChange::Clear => None,
        }
    }
}

/// Resolves a request body value; a missing value clears the entry.
pub fn overtime_change(
    date: NaiveDate,
    hours: Option<f64>,
    is_public_holiday: bool,
) -> OvertimeChange {
    hours
        .and_then(|h| normalize_overtime(date, h, is_public_holiday))
        .map_or(OvertimeChange::Clear, OvertimeChange::Set)
}
