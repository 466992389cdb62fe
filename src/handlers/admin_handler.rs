use axum::{extract::State, Json};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    auth,
    extractors::AdminUser,
    models::{growth::signups_per_day, GrowthPoint, GrowthResponse},
    AppError, AppResult, AppState,
};

// Listing every auth user is slow; keep the aggregate for a minute.
static GROWTH_CACHE: Lazy<Cache<&'static str, Arc<Vec<GrowthPoint>>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(1)
        .build()
});

const GROWTH_KEY: &str = "signups_per_day";

/// GET /api/admin/growth - Sign-ups per day, oldest first
#[utoipa::path(
    get,
    path = "/api/admin/growth",
    responses(
        (status = 200, description = "Sign-ups per UTC day", body = GrowthResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not on the admin list, or the list is not configured"),
        (status = 500, description = "Service role key not configured"),
        (status = 502, description = "Auth provider request failed")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_growth(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<GrowthResponse>> {
    let service_key = state.config.supabase_service_role_key.as_deref().ok_or_else(|| {
        tracing::error!("SUPABASE_SERVICE_ROLE_KEY is not configured");
        AppError::Internal("Server configuration error: SUPABASE_SERVICE_ROLE_KEY is missing".to_string())
    })?;

    if let Some(cached) = GROWTH_CACHE.get(GROWTH_KEY).await {
        return Ok(Json(GrowthResponse {
            data: (*cached).clone(),
        }));
    }

    let users = auth::list_auth_users(&state.http, &state.config.supabase_url, service_key).await?;
    let data = signups_per_day(&users);

    tracing::info!(admin = %admin.user_id, users = users.len(), days = data.len(), "Growth report generated");
    GROWTH_CACHE.insert(GROWTH_KEY, Arc::new(data.clone())).await;

    Ok(Json(GrowthResponse { data }))
}
