use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// The subset of an auth-provider user record the growth report needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserRecord {
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GrowthPoint {
    #[schema(example = "2026-10-01")]
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GrowthResponse {
    pub data: Vec<GrowthPoint>,
}

/// Sign-ups per UTC day, oldest first.
pub fn signups_per_day(users: &[AuthUserRecord]) -> Vec<GrowthPoint> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for user in users {
        *per_day.entry(user.created_at.date_naive()).or_default() += 1;
    }

    per_day
        .into_iter()
        .map(|(date, count)| GrowthPoint { date, count })
        .collect()
}
