use sqlx::{types::Json, PgPool};

use crate::models::Holiday;

/// Cached holiday list for a country and year, if one was stored.
pub async fn fetch_cached(
    db: &PgPool,
    country: &str,
    year: i32,
) -> Result<Option<Vec<Holiday>>, sqlx::Error> {
    let row = sqlx::query_scalar::<_, Json<Vec<Holiday>>>(
        r#"SELECT data FROM public_holidays WHERE country_code = $1 AND year = $2"#,
    )
    .bind(country)
    .bind(year)
    .fetch_optional(db)
    .await?;

    Ok(row.map(|Json(holidays)| holidays))
}

pub async fn store(
    db: &PgPool,
    country: &str,
    year: i32,
    holidays: &[Holiday],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO public_holidays (country_code, year, data, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (country_code, year)
        DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
        "#,
    )
    .bind(country)
    .bind(year)
    .bind(Json(holidays))
    .execute(db)
    .await?;

    Ok(())
}
