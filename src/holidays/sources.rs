//! Public holiday APIs: Timor (mainland China, knows substitute workdays)
//! and Nager.Date (everything else).

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::Holiday;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),

    #[error("upstream reported code {0}")]
    Rejected(i32),
}

#[derive(Debug, Deserialize)]
pub struct TimorResponse {
    pub code: i32,
    #[serde(default)]
    pub holiday: Option<HashMap<String, TimorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct TimorEntry {
    /// `false` marks a substitute workday
    pub holiday: bool,
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NagerHoliday {
    pub date: NaiveDate,
    pub local_name: Option<String>,
    pub name: String,
}

/// Days off from a Timor response, sorted by date. Substitute workdays are dropped.
pub fn from_timor(response: TimorResponse) -> Result<Vec<Holiday>, SourceError> {
    if response.code != 0 {
        return Err(SourceError::Rejected(response.code));
    }

    let mut holidays: Vec<Holiday> = response
        .holiday
        .unwrap_or_default()
        .into_values()
        .filter(|entry| entry.holiday)
        .map(|entry| Holiday::public(entry.date, entry.name))
        .collect();
    holidays.sort_by_key(|h| h.date);

    Ok(holidays)
}

pub fn from_nager(entries: Vec<NagerHoliday>) -> Vec<Holiday> {
    entries
        .into_iter()
        .map(|entry| {
            let name = entry
                .local_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(entry.name);
            Holiday::public(entry.date, name)
        })
        .collect()
}

pub async fn fetch_timor(
    client: &reqwest::Client,
    base_url: &str,
    year: i32,
) -> Result<Vec<Holiday>, SourceError> {
    let url = format!("{}/api/holiday/year/{}", base_url.trim_end_matches('/'), year);
    tracing::debug!(url, "Fetching holidays from Timor");

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(SourceError::Status(response.status()));
    }

    from_timor(response.json().await?)
}

pub async fn fetch_nager(
    client: &reqwest::Client,
    base_url: &str,
    country: &str,
    year: i32,
) -> Result<Vec<Holiday>, SourceError> {
    let url = format!(
        "{}/api/v3/PublicHolidays/{}/{}",
        base_url.trim_end_matches('/'),
        year,
        country
    );
    tracing::debug!(url, "Fetching holidays from Nager.Date");

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(SourceError::Status(response.status()));
    }

    Ok(from_nager(response.json().await?))
}
