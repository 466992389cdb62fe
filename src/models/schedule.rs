use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A to-do item pinned to a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "2026-10-20")]
    pub date: NaiveDate,
    #[schema(example = "Quarterly review")]
    pub title: String,
    /// HH:MM
    #[schema(example = "14:30")]
    pub time: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateScheduleInput {
    #[schema(example = "2026-10-20")]
    pub date: NaiveDate,
    pub title: String,
    pub time: Option<String>,
}

impl CreateScheduleInput {
    /// Trims the title and canonicalises the optional time to HH:MM.
    pub fn validated(self) -> Result<Self, String> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err("title must not be empty".to_string());
        }

        let time = match self.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
                    .map_err(|_| format!("Invalid time '{}', expected HH:MM", raw))?;
                Some(parsed.format("%H:%M").to_string())
            }
        };

        Ok(Self {
            date: self.date,
            title,
            time,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateScheduleInput {
    pub is_completed: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ScheduleQuery {
    /// YYYY-MM-DD, inclusive
    pub start: String,
    /// YYYY-MM-DD, inclusive
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
