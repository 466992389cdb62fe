use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Attendance state of a single half-day.
///
/// The discriminant is the ordinal used by the persisted status code, so the
/// declaration order must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    #[default]
    None = 0,
    Office = 1,
    Remote = 2,
    AnnualLeave = 3,
    SickLeave = 4,
    UnpaidLeave = 5,
    CompensatoryLeave = 6,
    PublicHoliday = 7,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status key: {0}")]
pub struct UnknownStatusKey(pub String);

impl StatusKey {
    /// All keys in ordinal order.
    pub const ALL: [StatusKey; 8] = [
        StatusKey::None,
        StatusKey::Office,
        StatusKey::Remote,
        StatusKey::AnnualLeave,
        StatusKey::SickLeave,
        StatusKey::UnpaidLeave,
        StatusKey::CompensatoryLeave,
        StatusKey::PublicHoliday,
    ];

    pub fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKey::None => "none",
            StatusKey::Office => "office",
            StatusKey::Remote => "remote",
            StatusKey::AnnualLeave => "annual_leave",
            StatusKey::SickLeave => "sick_leave",
            StatusKey::UnpaidLeave => "unpaid_leave",
            StatusKey::CompensatoryLeave => "compensatory_leave",
            StatusKey::PublicHoliday => "public_holiday",
        }
    }

    /// Whether a half-day in this state belongs in the WIO denominator.
    pub fn is_working_time(self) -> bool {
        !matches!(
            self,
            StatusKey::AnnualLeave
                | StatusKey::SickLeave
                | StatusKey::UnpaidLeave
                | StatusKey::PublicHoliday
        )
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKey {
    type Err = UnknownStatusKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownStatusKey(s.to_string()))
    }
}

/// AM/PM pair recorded for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct DayStatus {
    pub am: StatusKey,
    pub pm: StatusKey,
}

impl DayStatus {
    pub const NONE: DayStatus = DayStatus {
        am: StatusKey::None,
        pm: StatusKey::None,
    };

    pub fn new(am: StatusKey, pm: StatusKey) -> Self {
        Self { am, pm }
    }

    pub fn uniform(key: StatusKey) -> Self {
        Self { am: key, pm: key }
    }

    pub fn is_uniform(&self) -> bool {
        self.am == self.pm
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// An explicit record hides a public holiday unless its AM half is
    /// `none` or `public_holiday`.
    pub fn overrides_holiday(&self) -> bool {
        !matches!(self.am, StatusKey::None | StatusKey::PublicHoliday)
    }

    pub fn halves(&self) -> [StatusKey; 2] {
        [self.am, self.pm]
    }

    pub fn encode(self) -> i32 {
        encode_status(self.am, self.pm)
    }

    pub fn decode(code: Option<i32>) -> Self {
        decode_status(code)
    }
}

/// Offset marking a code whose halves differ.
pub const SPLIT_CODE_BASE: i32 = 100;

/// Packs an AM/PM pair into its persisted integer form.
///
/// Uniform days use the bare ordinal (0..=7); split days use
/// `100 + am * 10 + pm`.
pub fn encode_status(am: StatusKey, pm: StatusKey) -> i32 {
    if am == pm {
        return am.ordinal();
    }

    SPLIT_CODE_BASE + am.ordinal() * 10 + pm.ordinal()
}

/// Unpacks a persisted status code. Never fails: a missing code or an
/// unknown ordinal reads as `none`.
pub fn decode_status(code: Option<i32>) -> DayStatus {
    let Some(code) = code else {
        return DayStatus::NONE;
    };

    if code < SPLIT_CODE_BASE {
        return DayStatus::uniform(lenient_ordinal(code));
    }

    let packed = code - SPLIT_CODE_BASE;
    DayStatus::new(lenient_ordinal(packed / 10), lenient_ordinal(packed % 10))
}

fn lenient_ordinal(ordinal: i32) -> StatusKey {
    StatusKey::from_ordinal(ordinal).unwrap_or_else(|| {
        tracing::warn!(ordinal, "Unknown status ordinal, treating as none");
        StatusKey::None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_survives_encoding() {
        for am in StatusKey::ALL {
            for pm in StatusKey::ALL {
                let code = encode_status(am, pm);
                assert_eq!(decode_status(Some(code)), DayStatus::new(am, pm));
            }
        }
    }

    #[test]
    fn test_uniform_days_use_simple_codes() {
        assert_eq!(encode_status(StatusKey::Office, StatusKey::Office), 1);
        assert_eq!(encode_status(StatusKey::PublicHoliday, StatusKey::PublicHoliday), 7);
        assert_eq!(DayStatus::NONE.encode(), 0);
    }

    #[test]
    fn test_split_day_code() {
        assert_eq!(encode_status(StatusKey::Office, StatusKey::Remote), 112);
        assert_eq!(
            decode_status(Some(112)),
            DayStatus::new(StatusKey::Office, StatusKey::Remote)
        );
        assert_eq!(encode_status(StatusKey::None, StatusKey::SickLeave), 104);
    }

    #[test]
    fn test_missing_code_is_none() {
        assert_eq!(decode_status(None), DayStatus::NONE);
    }

    #[test]
    fn test_unknown_ordinals_degrade_to_none() {
        assert_eq!(decode_status(Some(999)), DayStatus::NONE);
        assert_eq!(decode_status(Some(42)), DayStatus::NONE);
        assert_eq!(decode_status(Some(-3)), DayStatus::NONE);
        assert_eq!(
            decode_status(Some(191)),
            DayStatus::new(StatusKey::None, StatusKey::Office)
        );
    }

    #[test]
    fn test_strict_parse_rejects_unknown_key() {
        assert_eq!("sick_leave".parse::<StatusKey>(), Ok(StatusKey::SickLeave));
        assert!("Sick_Leave".parse::<StatusKey>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_keys() {
        let status = DayStatus::new(StatusKey::AnnualLeave, StatusKey::CompensatoryLeave);
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"am": "annual_leave", "pm": "compensatory_leave"})
        );

        let parsed: Result<DayStatus, _> =
            serde_json::from_value(serde_json::json!({"am": "office", "pm": "beach"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_holiday_override_rule() {
        assert!(DayStatus::uniform(StatusKey::Office).overrides_holiday());
        assert!(DayStatus::new(StatusKey::AnnualLeave, StatusKey::None).overrides_holiday());
        assert!(!DayStatus::new(StatusKey::None, StatusKey::Office).overrides_holiday());
        assert!(!DayStatus::uniform(StatusKey::PublicHoliday).overrides_holiday());
    }
}
