use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// A public holiday as cached in `public_holidays.data`.
///
/// Field names match the JSON already stored by earlier clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    #[schema(example = "2026-10-01")]
    pub date: NaiveDate,
    #[schema(example = "National Day")]
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    #[schema(example = "public")]
    pub kind: String,
    #[serde(rename = "isSubstitute", default)]
    pub is_substitute: bool,
}

fn default_kind() -> String {
    "public".to_string()
}

impl Holiday {
    pub fn public(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            kind: default_kind(),
            is_substitute: false,
        }
    }
}

/// Holidays keyed by date. A later entry for the same date replaces an earlier one.
pub type HolidayMap = BTreeMap<NaiveDate, Holiday>;

pub fn index_by_date<'a>(holidays: impl IntoIterator<Item = &'a Holiday>) -> HolidayMap {
    holidays
        .into_iter()
        .map(|h| (h.date, h.clone()))
        .collect()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HolidayQuery {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub year: Option<i32>,
}
