use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::attendance::{AttendanceMap, DayStatus, Legend, OvertimeMap, StatusKey};

/// Row of `calendar_data`: one per user and day.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarRow {
    pub date: NaiveDate,
    pub status: Option<i32>,
    pub ot: Option<f64>,
}

impl CalendarRow {
    pub fn day_status(&self) -> DayStatus {
        DayStatus::decode(self.status)
    }

    pub fn overtime_hours(&self) -> Option<f64> {
        self.ot.filter(|h| h.is_finite() && *h > 0.0)
    }
}

/// Splits stored rows into the attendance and overtime maps the metrics work on.
/// Rows whose status decodes to `{none, none}` are left out of the attendance map.
pub fn split_rows(rows: &[CalendarRow]) -> (AttendanceMap, OvertimeMap) {
    let mut attendance = AttendanceMap::new();
    let mut overtime = OvertimeMap::new();

    for row in rows {
        let status = row.day_status();
        if !status.is_none() {
            attendance.insert(row.date, status);
        }
        if let Some(hours) = row.overtime_hours() {
            overtime.insert(row.date, hours);
        }
    }

    (attendance, overtime)
}

/// Decoded view of a stored day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarRecord {
    #[schema(example = "2026-10-01")]
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Persisted status code
    #[schema(example = 112)]
    pub code: i32,
    pub overtime_hours: Option<f64>,
}

impl From<&CalendarRow> for CalendarRecord {
    fn from(row: &CalendarRow) -> Self {
        let status = row.day_status();
        Self {
            date: row.date,
            status,
            code: status.encode(),
            overtime_hours: row.overtime_hours(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// The caller's local date (YYYY-MM-DD); the server's UTC date when absent
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    /// YYYY-MM-DD, inclusive
    pub start: String,
    /// YYYY-MM-DD, inclusive
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyLegendInput {
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckInMode {
    Office,
    Remote,
}

impl CheckInMode {
    pub fn status(self) -> DayStatus {
        match self {
            CheckInMode::Office => DayStatus::uniform(StatusKey::Office),
            CheckInMode::Remote => DayStatus::uniform(StatusKey::Remote),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckInInput {
    pub mode: CheckInMode,
    /// The caller's local date; the server's UTC date when absent
    #[serde(default)]
    #[schema(example = "2026-10-01")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OvertimeInput {
    /// Null or absent removes the entry
    #[serde(default)]
    #[schema(example = 2.5)]
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OvertimeResponse {
    #[schema(example = "2026-10-01")]
    pub date: NaiveDate,
    /// Stored hours; absent when the entry was removed
    pub hours: Option<f64>,
    pub max_hours: f64,
}
