//! Attendance status codec and the metrics derived from it.
//!
//! Nothing in this module performs I/O; handlers load rows and holidays and
//! hand plain maps in.

pub mod calendar;
pub mod legend;
pub mod metrics;
pub mod overtime;
pub mod status;
pub mod summary;

pub use calendar::{month_view, CalendarDay};
pub use legend::{apply_legend, cycle, Legend};
pub use self::metrics::{AttendanceMap, LeaveUsage, OvertimeMap, OvertimeTotals, WioBreakdown};
pub use overtime::{overtime_change, OvertimeChange};
pub use status::{DayStatus, StatusKey};
pub use summary::{summarize, MonthSummary, SummaryInput};
