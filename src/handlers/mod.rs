pub mod admin_handler;
pub mod calendar_handler;
pub mod health;
pub mod holidays_handler;
pub mod metrics;
pub mod schedules_handler;
pub mod settings_handler;
pub mod summary_handler;

use chrono::{Datelike, NaiveDate, Utc};

use crate::{AppError, AppResult};

pub use health::health_check;
pub use self::metrics::{metrics_handler, setup_metrics_recorder, MetricsState};

/// Parses a YYYY-MM-DD path or query value.
pub(crate) fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid {} date '{}': {}", field, raw, e)))
}

/// Inclusive date range from two query values; start must not be after end.
pub(crate) fn parse_range(start: &str, end: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = parse_date(start, "start")?;
    let end = parse_date(end, "end")?;
    if start > end {
        return Err(AppError::BadRequest(format!(
            "start {} is after end {}",
            start, end
        )));
    }
    Ok((start, end))
}

/// Year and month from optional query values, defaulting to the month of `today`.
pub(crate) fn resolve_month(
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> AppResult<(i32, u32)> {
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    if !(1970..=9999).contains(&year) {
        return Err(AppError::BadRequest(format!("year out of range: {}", year)));
    }

    Ok((year, month))
}

/// The caller's date when it sent one, else the server's UTC date.
pub(crate) fn resolve_today(client_date: Option<NaiveDate>) -> NaiveDate {
    client_date.unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-10-01", "date").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
        );
        assert!(matches!(parse_date("2026-13-01", "date"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_date("01/10/2026", "date"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_range_order() {
        assert!(parse_range("2026-10-01", "2026-10-31").is_ok());
        assert!(parse_range("2026-10-01", "2026-10-01").is_ok());
        assert!(matches!(
            parse_range("2026-10-31", "2026-10-01"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_resolve_month() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(resolve_month(Some(2026), Some(2), today).unwrap(), (2026, 2));
        assert!(resolve_month(Some(2026), Some(0), today).is_err());
        assert!(resolve_month(Some(2026), Some(13), today).is_err());
        assert!(resolve_month(Some(-5), Some(1), today).is_err());

        assert_eq!(resolve_month(None, None, today).unwrap(), (2026, 10));
    }

    #[test]
    fn test_client_date_wins_over_server_clock() {
        // A client east of UTC is already on the 1st while UTC is still on the 31st.
        let local = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        assert_eq!(resolve_today(Some(local)), local);
        assert_eq!(resolve_month(None, None, resolve_today(Some(local))).unwrap(), (2026, 11));
    }
}
