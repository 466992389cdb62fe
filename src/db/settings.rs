use sqlx::PgPool;
use uuid::Uuid;

use crate::models::UserSettings;

/// Stored settings, or the defaults when the user never saved any.
pub async fn fetch_settings(db: &PgPool, user_id: Uuid) -> Result<UserSettings, sqlx::Error> {
    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        SELECT user_id, wio_target, annual_leave_quota, sick_leave_quota, country, language, updated_at
        FROM user_settings
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(settings.unwrap_or_else(|| UserSettings::defaults(user_id)))
}

pub async fn upsert_settings(db: &PgPool, settings: &UserSettings) -> Result<UserSettings, sqlx::Error> {
    sqlx::query_as::<_, UserSettings>(
        r#"
        INSERT INTO user_settings
            (user_id, wio_target, annual_leave_quota, sick_leave_quota, country, language, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET
            wio_target = EXCLUDED.wio_target,
            annual_leave_quota = EXCLUDED.annual_leave_quota,
            sick_leave_quota = EXCLUDED.sick_leave_quota,
            country = EXCLUDED.country,
            language = EXCLUDED.language,
            updated_at = NOW()
        RETURNING user_id, wio_target, annual_leave_quota, sick_leave_quota, country, language, updated_at
        "#,
    )
    .bind(settings.user_id)
    .bind(settings.wio_target)
    .bind(settings.annual_leave_quota)
    .bind(settings.sick_leave_quota)
    .bind(&settings.country)
    .bind(&settings.language)
    .fetch_one(db)
    .await
}
