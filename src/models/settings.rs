use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_WIO_TARGET: i32 = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSettings {
    pub user_id: Uuid,
    /// Target work-in-office percentage
    #[schema(example = 60)]
    pub wio_target: i32,
    #[schema(example = 15)]
    pub annual_leave_quota: i32,
    #[schema(example = 10)]
    pub sick_leave_quota: i32,
    /// Country used for public holidays
    #[schema(example = "SG")]
    pub country: Option<String>,
    #[schema(example = "en")]
    pub language: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSettings {
    /// Settings for a user who never saved any.
    pub fn defaults(user_id: Uuid) -> Self {
        Self {
            user_id,
            wio_target: DEFAULT_WIO_TARGET,
            annual_leave_quota: 0,
            sick_leave_quota: 0,
            country: None,
            language: Language::En.as_str().to_string(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

/// PUT /api/settings body. Omitted fields keep their stored value; an
/// empty `country` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingsInput {
    pub wio_target: Option<i32>,
    pub annual_leave_quota: Option<i32>,
    pub sick_leave_quota: Option<i32>,
    pub country: Option<String>,
    pub language: Option<Language>,
}

impl UpdateSettingsInput {
    /// Checks ranges and merges onto `current`.
    pub fn apply_to(self, current: UserSettings) -> Result<UserSettings, String> {
        let mut next = current;

        if let Some(target) = self.wio_target {
            if !(0..=100).contains(&target) {
                return Err(format!("wio_target must be between 0 and 100, got {}", target));
            }
            next.wio_target = target;
        }

        if let Some(quota) = self.annual_leave_quota {
            if quota < 0 {
                return Err("annual_leave_quota must not be negative".to_string());
            }
            next.annual_leave_quota = quota;
        }

        if let Some(quota) = self.sick_leave_quota {
            if quota < 0 {
                return Err("sick_leave_quota must not be negative".to_string());
            }
            next.sick_leave_quota = quota;
        }

        if let Some(country) = self.country {
            let country = country.trim().to_ascii_uppercase();
            next.country = if country.is_empty() {
                None
            } else if country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()) {
                Some(country)
            } else {
                return Err(format!("Invalid country code: {}", country));
            };
        }

        if let Some(language) = self.language {
            next.language = language.as_str().to_string();
        }

        Ok(next)
    }
}
