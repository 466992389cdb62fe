use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::CalendarRow;

pub async fn fetch_range(
    db: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CalendarRow>, sqlx::Error> {
    sqlx::query_as::<_, CalendarRow>(
        r#"
        SELECT date, status, ot
        FROM calendar_data
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

pub async fn fetch_day(
    db: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Option<CalendarRow>, sqlx::Error> {
    sqlx::query_as::<_, CalendarRow>(
        r#"
        SELECT date, status, ot
        FROM calendar_data
        WHERE user_id = $1 AND date = $2
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await
}

/// Writes the status code for a day, leaving any overtime untouched.
pub async fn upsert_status(
    db: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    code: i32,
) -> Result<CalendarRow, sqlx::Error> {
    sqlx::query_as::<_, CalendarRow>(
        r#"
        INSERT INTO calendar_data (user_id, date, status, ot, updated_at)
        VALUES ($1, $2, $3, 0, NOW())
        ON CONFLICT (user_id, date)
        DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
        RETURNING date, status, ot
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(code)
    .fetch_one(db)
    .await
}

/// Writes overtime hours for a day, leaving the status untouched.
pub async fn upsert_overtime(
    db: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    hours: f64,
) -> Result<CalendarRow, sqlx::Error> {
    sqlx::query_as::<_, CalendarRow>(
        r#"
        INSERT INTO calendar_data (user_id, date, status, ot, updated_at)
        VALUES ($1, $2, 0, $3, NOW())
        ON CONFLICT (user_id, date)
        DO UPDATE SET ot = EXCLUDED.ot, updated_at = NOW()
        RETURNING date, status, ot
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(hours)
    .fetch_one(db)
    .await
}

/// Removes the overtime of an existing day. Days with no row stay absent.
pub async fn clear_overtime(db: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE calendar_data
        SET ot = 0, updated_at = NOW()
        WHERE user_id = $1 AND date = $2 AND ot IS NOT NULL AND ot <> 0
        "#,
    )
    .bind(user_id)
    .bind(date)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
