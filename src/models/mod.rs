pub mod calendar;
pub mod growth;
pub mod holiday;
pub mod schedule;
pub mod settings;

pub use calendar::{
    ApplyLegendInput, CalendarRecord, CalendarRow, CheckInInput, CheckInMode, MonthQuery,
    OvertimeInput, OvertimeResponse, RangeQuery,
};
pub use growth::{AuthUserRecord, GrowthPoint, GrowthResponse};
pub use holiday::{Holiday, HolidayMap, HolidayQuery};
pub use schedule::{
    CreateScheduleInput, Schedule, ScheduleMutationResponse, ScheduleQuery, UpdateScheduleInput,
};
pub use settings::{Language, UpdateSettingsInput, UserSettings};
