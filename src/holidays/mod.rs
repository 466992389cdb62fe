//! Public holidays per country and year.
//!
//! Lookups go through an in-process cache, then the `public_holidays`
//! table, then the external APIs. Fetched lists are written back to the
//! table. Failures at any layer are logged and never reach the caller:
//! the worst case is an empty list.

pub mod sources;

use metrics::counter;
use moka::future::Cache;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::AppConfig,
    db,
    models::{holiday::index_by_date, Holiday, HolidayMap},
};

const CHINA: &str = "CN";

pub struct HolidayService {
    db: PgPool,
    client: reqwest::Client,
    cache: Cache<(String, i32), Arc<Vec<Holiday>>>,
    nager_api_url: String,
    timor_api_url: String,
}

impl HolidayService {
    pub fn new(db: PgPool, client: reqwest::Client, config: &AppConfig) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(6 * 3600))
            .max_capacity(1_000)
            .build();

        Self {
            db,
            client,
            cache,
            nager_api_url: config.nager_api_url.clone(),
            timor_api_url: config.timor_api_url.clone(),
        }
    }

    pub async fn holidays(&self, country: &str, year: i32) -> Arc<Vec<Holiday>> {
        let Some(country) = normalize_country(country) else {
            return Arc::new(Vec::new());
        };
        let key = (country.clone(), year);

        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let holidays = Arc::new(self.load(&country, year).await);
        // Empty results are not cached so a transient upstream outage is retried.
        if !holidays.is_empty() {
            self.cache.insert(key, holidays.clone()).await;
        }
        holidays
    }

    /// Holidays of all `years` for the user's country, keyed by date.
    pub async fn holiday_map(&self, country: Option<&str>, years: &[i32]) -> HolidayMap {
        let Some(country) = country else {
            return HolidayMap::new();
        };

        let mut map = HolidayMap::new();
        for year in years {
            let holidays = self.holidays(country, *year).await;
            map.extend(index_by_date(holidays.iter()));
        }
        map
    }

    async fn load(&self, country: &str, year: i32) -> Vec<Holiday> {
        match db::holidays::fetch_cached(&self.db, country, year).await {
            Ok(Some(holidays)) if !holidays.is_empty() => {
                tracing::debug!(country, year, count = holidays.len(), "Holidays loaded from database cache");
                counter!("holiday_fetch_total", "source" => "database", "outcome" => "hit").increment(1);
                return holidays;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, country, year, "Holiday cache lookup failed, falling back to API");
            }
        }

        let holidays = self.fetch_remote(country, year).await;

        if !holidays.is_empty() {
            if let Err(e) = db::holidays::store(&self.db, country, year, &holidays).await {
                tracing::error!(error = %e, country, year, "Failed to cache holidays");
            }
        }

        holidays
    }

    async fn fetch_remote(&self, country: &str, year: i32) -> Vec<Holiday> {
        if country == CHINA {
            match sources::fetch_timor(&self.client, &self.timor_api_url, year).await {
                Ok(holidays) if !holidays.is_empty() => {
                    counter!("holiday_fetch_total", "source" => "timor", "outcome" => "ok").increment(1);
                    return holidays;
                }
                Ok(_) => {
                    tracing::warn!(year, "Timor returned no holidays, trying Nager.Date");
                }
                Err(e) => {
                    counter!("holiday_fetch_total", "source" => "timor", "outcome" => "error").increment(1);
                    tracing::error!(error = %e, year, "Timor holiday fetch failed, trying Nager.Date");
                }
            }
        }

        match sources::fetch_nager(&self.client, &self.nager_api_url, country, year).await {
            Ok(holidays) => {
                counter!("holiday_fetch_total", "source" => "nager", "outcome" => "ok").increment(1);
                holidays
            }
            Err(e) => {
                counter!("holiday_fetch_total", "source" => "nager", "outcome" => "error").increment(1);
                tracing::warn!(error = %e, country, year, "Nager.Date holiday fetch failed");
                Vec::new()
            }
        }
    }
}

/// Upper-cased two-letter code, or `None` for anything else.
pub fn normalize_country(country: &str) -> Option<String> {
    let country = country.trim().to_ascii_uppercase();
    (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic())).then_some(country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country(" sg"), Some("SG".to_string()));
        assert_eq!(normalize_country("CN"), Some("CN".to_string()));
        assert_eq!(normalize_country(""), None);
        assert_eq!(normalize_country("USA"), None);
        assert_eq!(normalize_country("1A"), None);
    }

    /// Serves a failing Timor endpoint and a working Nager.Date endpoint.
    async fn fake_upstream() -> String {
        use axum::{http::StatusCode, routing::get, Json, Router};

        let app = Router::new()
            .route(
                "/api/holiday/year/{year}",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/api/v3/PublicHolidays/{year}/{country}",
                get(|| async {
                    Json(serde_json::json!([
                        {"date": "2026-10-01", "localName": "国庆节", "name": "National Day"}
                    ]))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_china_falls_back_to_nager_when_timor_fails() {
        let base = fake_upstream().await;
        let service = HolidayService {
            db: PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            client: reqwest::Client::new(),
            cache: Cache::builder().build(),
            nager_api_url: base.clone(),
            timor_api_url: base,
        };

        let holidays = service.fetch_remote(CHINA, 2026).await;
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name, "国庆节");
    }

    #[tokio::test]
    #[ignore] // Calls the public Nager.Date API
    async fn test_fetch_nager_live() {
        let client = reqwest::Client::new();
        let holidays = sources::fetch_nager(&client, "https://date.nager.at", "SG", 2026)
            .await
            .unwrap();

        assert!(!holidays.is_empty());
    }
}
