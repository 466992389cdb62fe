use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    attendance::{
        self, calendar::month_bounds, overtime::max_overtime_hours, CalendarDay, DayStatus,
        OvertimeChange,
    },
    db,
    extractors::AuthenticatedUser,
    handlers::{parse_date, parse_range, resolve_month, resolve_today},
    models::{
        calendar::split_rows, ApplyLegendInput, CalendarRecord, CheckInInput, MonthQuery,
        OvertimeInput, OvertimeResponse, RangeQuery,
    },
    AppError, AppResult, AppState,
};

/// GET /api/calendar?year=&month=&today=
#[utoipa::path(
    get,
    path = "/api/calendar",
    params(MonthQuery),
    responses(
        (status = 200, description = "One entry per day of the month with holidays layered in", body = Vec<CalendarDay>),
        (status = 400, description = "Invalid year or month")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn get_month(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    let (year, month) = resolve_month(query.year, query.month, resolve_today(query.today))?;
    let (start, end) = month_bounds(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month {}-{}", year, month)))?;

    let settings = db::settings::fetch_settings(&state.db, user.user_id).await?;
    let rows = db::calendar::fetch_range(&state.db, user.user_id, start, end).await?;
    let holidays = state
        .holidays
        .holiday_map(settings.country.as_deref(), &[year])
        .await;

    let (records, overtime) = split_rows(&rows);
    tracing::debug!(user_id = %user.user_id, year, month, rows = rows.len(), "Month view loaded");

    Ok(Json(attendance::month_view(
        year, month, &records, &holidays, &overtime,
    )))
}

/// GET /api/calendar/records?start=&end=
#[utoipa::path(
    get,
    path = "/api/calendar/records",
    params(RangeQuery),
    responses(
        (status = 200, description = "Stored records in the range, decoded", body = Vec<CalendarRecord>),
        (status = 400, description = "Invalid date range")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<CalendarRecord>>> {
    let (start, end) = parse_range(&query.start, &query.end)?;

    let rows = db::calendar::fetch_range(&state.db, user.user_id, start, end).await?;

    Ok(Json(rows.iter().map(CalendarRecord::from).collect()))
}

/// PUT /api/calendar/{date} - Set the am/pm status of a day
#[utoipa::path(
    put,
    path = "/api/calendar/{date}",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    request_body = DayStatus,
    responses(
        (status = 200, description = "Day updated", body = CalendarRecord),
        (status = 400, description = "Invalid date"),
        (status = 422, description = "Unknown status key")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
    Json(status): Json<DayStatus>,
) -> AppResult<Json<CalendarRecord>> {
    let date = parse_date(&date, "path")?;
    store_status(&state, user.user_id, date, status).await
}

/// POST /api/calendar/{date}/cycle - Advance a day to the next status
#[utoipa::path(
    post,
    path = "/api/calendar/{date}/cycle",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    responses(
        (status = 200, description = "Day advanced to the next status", body = CalendarRecord),
        (status = 400, description = "Invalid date")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn cycle_status(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
) -> AppResult<Json<CalendarRecord>> {
    let date = parse_date(&date, "path")?;
    let current = current_status(&state, user.user_id, date).await?;

    store_status(&state, user.user_id, date, attendance::cycle(current)).await
}

/// POST /api/calendar/{date}/legend - Apply the selected legend to a day
#[utoipa::path(
    post,
    path = "/api/calendar/{date}/legend",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    request_body = ApplyLegendInput,
    responses(
        (status = 200, description = "Legend applied, or the day cleared when it already matched", body = CalendarRecord),
        (status = 400, description = "Invalid date"),
        (status = 422, description = "Unknown status key")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn apply_legend(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
    Json(input): Json<ApplyLegendInput>,
) -> AppResult<Json<CalendarRecord>> {
    let date = parse_date(&date, "path")?;
    let current = current_status(&state, user.user_id, date).await?;

    store_status(
        &state,
        user.user_id,
        date,
        attendance::apply_legend(current, input.legend),
    )
    .await
}

/// POST /api/calendar/check-in - Mark the caller's today as office or remote
#[utoipa::path(
    post,
    path = "/api/calendar/check-in",
    request_body = CheckInInput,
    responses(
        (status = 200, description = "Today marked", body = CalendarRecord),
        (status = 422, description = "Unknown mode")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(input): Json<CheckInInput>,
) -> AppResult<Json<CalendarRecord>> {
    let date = resolve_today(input.date);
    tracing::info!(user_id = %user.user_id, %date, mode = ?input.mode, "Check-in");

    store_status(&state, user.user_id, date, input.mode.status()).await
}

/// PUT /api/calendar/{date}/overtime - Log or remove overtime hours
#[utoipa::path(
    put,
    path = "/api/calendar/{date}/overtime",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    request_body = OvertimeInput,
    responses(
        (status = 200, description = "Overtime stored after capping and rounding; hours absent when removed", body = OvertimeResponse),
        (status = 400, description = "Invalid date")
    ),
    security(("bearer_auth" = [])),
    tag = "calendar"
)]
pub async fn set_overtime(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
    Json(input): Json<OvertimeInput>,
) -> AppResult<Json<OvertimeResponse>> {
    let date = parse_date(&date, "path")?;

    let settings = db::settings::fetch_settings(&state.db, user.user_id).await?;
    let holidays = state
        .holidays
        .holiday_map(settings.country.as_deref(), &[date.year()])
        .await;
    let is_public_holiday = holidays.contains_key(&date);

    let change = attendance::overtime_change(date, input.hours, is_public_holiday);
    match change {
        OvertimeChange::Set(hours) => {
            db::calendar::upsert_overtime(&state.db, user.user_id, date, hours).await?;
            tracing::debug!(user_id = %user.user_id, %date, requested = ?input.hours, hours, "Overtime stored");
        }
        OvertimeChange::Clear => {
            let cleared = db::calendar::clear_overtime(&state.db, user.user_id, date).await?;
            tracing::debug!(user_id = %user.user_id, %date, cleared, "Overtime removed");
        }
    }

    Ok(Json(OvertimeResponse {
        date,
        hours: change.hours(),
        max_hours: max_overtime_hours(date, is_public_holiday),
    }))
}

async fn current_status(state: &AppState, user_id: Uuid, date: NaiveDate) -> AppResult<DayStatus> {
    Ok(db::calendar::fetch_day(&state.db, user_id, date)
        .await?
        .map(|row| row.day_status())
        .unwrap_or(DayStatus::NONE))
}

async fn store_status(
    state: &AppState,
    user_id: Uuid,
    date: NaiveDate,
    status: DayStatus,
) -> AppResult<Json<CalendarRecord>> {
    let row = db::calendar::upsert_status(&state.db, user_id, date, status.encode()).await?;
    tracing::debug!(%user_id, %date, code = row.status, "Day status stored");

    Ok(Json(CalendarRecord::from(&row)))
}
