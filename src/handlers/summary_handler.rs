use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    attendance::{calendar::year_bounds, summarize, MonthSummary, SummaryInput},
    db,
    extractors::AuthenticatedUser,
    handlers::{resolve_month, resolve_today},
    models::{calendar::split_rows, MonthQuery},
    AppError, AppResult, AppState,
};

/// GET /api/summary?year=&month=&today=
#[utoipa::path(
    get,
    path = "/api/summary",
    params(MonthQuery),
    responses(
        (status = 200, description = "WIO, leave usage and overtime for the month", body = MonthSummary),
        (status = 400, description = "Invalid year or month")
    ),
    security(("bearer_auth" = [])),
    tag = "summary"
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<MonthSummary>> {
    let today = resolve_today(query.today);
    let (year, month) = resolve_month(query.year, query.month, today)?;
    let (start, end) = year_bounds(year)
        .ok_or_else(|| AppError::BadRequest(format!("year out of range: {}", year)))?;

    // Leave usage and overtime totals are yearly, so the whole year is loaded.
    let settings = db::settings::fetch_settings(&state.db, user.user_id).await?;
    let rows = db::calendar::fetch_range(&state.db, user.user_id, start, end).await?;
    let holidays = state
        .holidays
        .holiday_map(settings.country.as_deref(), &[year])
        .await;

    let (records, overtime) = split_rows(&rows);

    let summary = summarize(SummaryInput {
        year,
        month,
        today,
        records: &records,
        holidays: &holidays,
        overtime: &overtime,
        settings: &settings,
    });

    if summary.below_target {
        tracing::debug!(
            user_id = %user.user_id,
            year,
            month,
            wio = summary.wio.percentage,
            target = summary.wio_target,
            "WIO below target"
        );
    }

    Ok(Json(summary))
}
