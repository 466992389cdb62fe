use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    db,
    extractors::AuthenticatedUser,
    models::{UpdateSettingsInput, UserSettings},
    AppError, AppResult, AppState,
};

/// GET /api/settings - Stored settings, or defaults for a new user
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = UserSettings)
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> AppResult<Json<UserSettings>> {
    let settings = db::settings::fetch_settings(&state.db, user.user_id).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - Partial update; omitted fields are kept
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsInput,
    responses(
        (status = 200, description = "Updated settings", body = UserSettings),
        (status = 422, description = "Value out of range")
    ),
    security(("bearer_auth" = [])),
    tag = "settings"
)]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(input): Json<UpdateSettingsInput>,
) -> AppResult<Json<UserSettings>> {
    let current = db::settings::fetch_settings(&state.db, user.user_id).await?;
    let next = input.apply_to(current).map_err(AppError::Validation)?;

    let saved = db::settings::upsert_settings(&state.db, &next).await?;
    tracing::info!(user_id = %user.user_id, country = ?saved.country, wio_target = saved.wio_target, "Settings updated");

    Ok(Json(saved))
}
