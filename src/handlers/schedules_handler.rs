use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extractors::AuthenticatedUser,
    handlers::parse_range,
    models::{
        CreateScheduleInput, Schedule, ScheduleMutationResponse, ScheduleQuery,
        UpdateScheduleInput,
    },
    AppError, AppResult, AppState,
};

/// GET /api/schedules?start=&end=
#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules in the range, timed entries first", body = Vec<Schedule>),
        (status = 400, description = "Invalid date range")
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn get_schedules(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<Schedule>>> {
    let (start, end) = parse_range(&query.start, &query.end)?;

    let schedules = sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, user_id, date, title, time, is_completed, created_at
        FROM schedules
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        ORDER BY date, time ASC NULLS LAST, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(schedules))
}

/// POST /api/schedules - Create a schedule entry
#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleInput,
    responses(
        (status = 200, description = "Schedule created", body = Schedule),
        (status = 422, description = "Empty title or invalid time")
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(input): Json<CreateScheduleInput>,
) -> AppResult<Json<Schedule>> {
    let input = input.validated().map_err(AppError::Validation)?;

    let schedule = sqlx::query_as::<_, Schedule>(
        r#"
        INSERT INTO schedules (id, user_id, date, title, time, is_completed, created_at)
        VALUES ($1, $2, $3, $4, $5, false, NOW())
        RETURNING id, user_id, date, title, time, is_completed, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(input.date)
    .bind(&input.title)
    .bind(&input.time)
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %user.user_id, schedule_id = %schedule.id, date = %schedule.date, "Schedule created");

    Ok(Json(schedule))
}

/// PUT /api/schedules/{id} - Mark a schedule done or not done
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule id")),
    request_body = UpdateScheduleInput,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(schedule_id): Path<Uuid>,
    Json(input): Json<UpdateScheduleInput>,
) -> AppResult<Json<Schedule>> {
    let schedule = sqlx::query_as::<_, Schedule>(
        r#"
        UPDATE schedules
        SET is_completed = $1
        WHERE id = $2 AND user_id = $3
        RETURNING id, user_id, date, title, time, is_completed, created_at
        "#,
    )
    .bind(input.is_completed)
    .bind(schedule_id)
    .bind(user.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", schedule_id)))?;

    Ok(Json(schedule))
}

/// DELETE /api/schedules/{id}
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule id")),
    responses(
        (status = 200, description = "Schedule deleted", body = ScheduleMutationResponse),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(schedule_id): Path<Uuid>,
) -> AppResult<Json<ScheduleMutationResponse>> {
    let result = sqlx::query(r#"DELETE FROM schedules WHERE id = $1 AND user_id = $2"#)
        .bind(schedule_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Schedule {} not found",
            schedule_id
        )));
    }

    Ok(Json(ScheduleMutationResponse {
        success: true,
        message: Some("Schedule deleted successfully".to_string()),
    }))
}
