use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::metrics::{
    leave_usage, overtime_totals, wio_breakdown, AttendanceMap, LeaveUsage, OvertimeMap,
    OvertimeTotals, WioBreakdown,
};
use crate::models::{holiday::HolidayMap, settings::UserSettings};

/// Dashboard figures for one displayed month.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub wio: WioBreakdown,
    pub wio_target: i32,
    pub below_target: bool,
    pub leave: LeaveUsage,
    /// Quota minus used; negative when over quota
    pub annual_leave_remaining: f64,
    pub sick_leave_remaining: f64,
    pub overtime: OvertimeTotals,
}

pub struct SummaryInput<'a> {
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
    pub records: &'a AttendanceMap,
    pub holidays: &'a HolidayMap,
    pub overtime: &'a OvertimeMap,
    pub settings: &'a UserSettings,
}

pub fn summarize(input: SummaryInput<'_>) -> MonthSummary {
    let wio = wio_breakdown(input.year, input.month, input.records, input.holidays);
    let leave = leave_usage(input.year, input.records, input.holidays, input.today);
    let overtime = overtime_totals(input.year, input.month, input.overtime);
    let settings = input.settings;

    MonthSummary {
        year: input.year,
        month: input.month,
        below_target: (wio.percentage as i64) < settings.wio_target as i64,
        wio,
        wio_target: settings.wio_target,
        annual_leave_remaining: settings.annual_leave_quota as f64 - leave.annual_used,
        sick_leave_remaining: settings.sick_leave_quota as f64 - leave.sick_used,
        leave,
        overtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::status::{DayStatus, StatusKey};
    use uuid::Uuid;

    #[test]
    fn test_summary_combines_metrics_and_quotas() {
        let date = |d| NaiveDate::from_ymd_opt(2027, 2, d).unwrap();

        let mut records = AttendanceMap::new();
        records.insert(date(1), DayStatus::uniform(StatusKey::Office));
        records.insert(date(2), DayStatus::uniform(StatusKey::AnnualLeave));
        records.insert(date(3), DayStatus::new(StatusKey::SickLeave, StatusKey::Remote));

        let mut overtime = OvertimeMap::new();
        overtime.insert(date(4), 3.0);

        let mut settings = UserSettings::defaults(Uuid::nil());
        settings.annual_leave_quota = 10;
        settings.sick_leave_quota = 0;

        let summary = summarize(SummaryInput {
            year: 2027,
            month: 2,
            today: date(10),
            records: &records,
            holidays: &HolidayMap::new(),
            overtime: &overtime,
            settings: &settings,
        });

        assert_eq!(summary.wio.office_units, 1.0);
        assert_eq!(summary.wio.total_working_units, 18.5);
        assert!(summary.below_target);
        assert_eq!(summary.annual_leave_remaining, 9.0);
        assert_eq!(summary.sick_leave_remaining, -0.5);
        assert_eq!(summary.overtime.month_total, 3.0);
    }

    #[test]
    fn test_meeting_target_is_not_below() {
        let mut settings = UserSettings::defaults(Uuid::nil());
        settings.wio_target = 0;

        let summary = summarize(SummaryInput {
            year: 2027,
            month: 2,
            today: NaiveDate::from_ymd_opt(2027, 2, 1).unwrap(),
            records: &AttendanceMap::new(),
            holidays: &HolidayMap::new(),
            overtime: &OvertimeMap::new(),
            settings: &settings,
        });

        assert_eq!(summary.wio.percentage, 0);
        assert!(!summary.below_target);
    }
}
