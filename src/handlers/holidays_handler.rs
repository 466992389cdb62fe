use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use std::sync::Arc;

use crate::{
    extractors::AuthenticatedUser,
    handlers::resolve_today,
    holidays::normalize_country,
    models::{Holiday, HolidayQuery},
    AppError, AppResult, AppState,
};

/// GET /api/holidays?country=&year=
#[utoipa::path(
    get,
    path = "/api/holidays",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Public holidays for the country and year; empty when no source had data", body = Vec<Holiday>),
        (status = 400, description = "Invalid country code or year")
    ),
    security(("bearer_auth" = [])),
    tag = "holidays"
)]
pub async fn get_holidays(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Query(query): Query<HolidayQuery>,
) -> AppResult<Json<Vec<Holiday>>> {
    if query.country.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let country = normalize_country(&query.country)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid country code: {}", query.country)))?;
    let year = query.year.unwrap_or_else(|| resolve_today(None).year());
    if !(1970..=9999).contains(&year) {
        return Err(AppError::BadRequest(format!("year out of range: {}", year)));
    }

    let holidays = state.holidays.holidays(&country, year).await;
    Ok(Json((*holidays).clone()))
}
