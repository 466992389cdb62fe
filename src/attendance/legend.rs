use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::{DayStatus, StatusKey};

/// Status pre-selected in the calendar and applied by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Legend {
    /// Same state for both halves
    Single(StatusKey),
    /// Distinct AM/PM combination
    Combined(DayStatus),
}

impl Legend {
    pub fn target(self) -> DayStatus {
        match self {
            Legend::Single(key) => DayStatus::uniform(key),
            Legend::Combined(status) => status,
        }
    }
}

/// Next status when a day is clicked with no legend selected.
///
/// Uniform days step through [`StatusKey::ALL`] and wrap around; split days
/// restart at `none`.
pub fn cycle(current: DayStatus) -> DayStatus {
    if !current.is_uniform() {
        return DayStatus::NONE;
    }

    let next = (current.am.ordinal() as usize + 1) % StatusKey::ALL.len();
    DayStatus::uniform(StatusKey::ALL[next])
}

/// Status after clicking a day with `legend` selected. Applying the value a
/// day already has clears it.
pub fn apply_legend(current: DayStatus, legend: Legend) -> DayStatus {
    let target = legend.target();
    if !target.is_none() && current == target {
        return DayStatus::NONE;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_walks_all_states_and_wraps() {
        let mut status = DayStatus::NONE;
        let mut seen = Vec::new();
        for _ in 0..StatusKey::ALL.len() {
            status = cycle(status);
            seen.push(status.am);
        }

        assert_eq!(seen.first(), Some(&StatusKey::Office));
        assert_eq!(seen.last(), Some(&StatusKey::None));
        assert_eq!(
            cycle(DayStatus::uniform(StatusKey::PublicHoliday)),
            DayStatus::NONE
        );
    }

    #[test]
    fn test_cycle_resets_split_day() {
        let split = DayStatus::new(StatusKey::Office, StatusKey::Remote);
        assert_eq!(cycle(split), DayStatus::NONE);
    }

    #[test]
    fn test_apply_same_legend_twice_clears() {
        let legend = Legend::Single(StatusKey::Remote);
        let once = apply_legend(DayStatus::NONE, legend);
        assert_eq!(once, DayStatus::uniform(StatusKey::Remote));
        assert_eq!(apply_legend(once, legend), DayStatus::NONE);
    }

    #[test]
    fn test_none_legend_always_clears() {
        let office = DayStatus::uniform(StatusKey::Office);
        assert_eq!(
            apply_legend(office, Legend::Single(StatusKey::None)),
            DayStatus::NONE
        );
        assert_eq!(
            apply_legend(DayStatus::NONE, Legend::Single(StatusKey::None)),
            DayStatus::NONE
        );
    }

    #[test]
    fn test_combined_legend_from_json() {
        let legend: Legend =
            serde_json::from_value(serde_json::json!({"am": "office", "pm": "remote"})).unwrap();
        let current = DayStatus::uniform(StatusKey::Office);
        assert_eq!(
            apply_legend(current, legend),
            DayStatus::new(StatusKey::Office, StatusKey::Remote)
        );

        let single: Legend = serde_json::from_value(serde_json::json!("sick_leave")).unwrap();
        assert_eq!(single, Legend::Single(StatusKey::SickLeave));
    }
}
