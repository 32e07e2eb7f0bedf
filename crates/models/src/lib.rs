//! Weekly timetable model: curricular units, their shifts and lessons, and the
//! overlap rule used to tell whether two lessons can both be attended.

pub mod calendar;
pub mod curricular_unit;
pub mod days;
pub mod error;
pub mod lesson;
pub mod response;
pub mod schedule;
pub mod shift;
pub mod time_block;

pub use calendar::{BlockConfig, Calendar, DayTable, WeekdayTables};
pub use curricular_unit::{CurricularUnit, Ingested, RowDiagnostic, RowTuple};
pub use days::Weekday;
pub use error::{Result, TimetableError};
pub use lesson::{Lesson, Slot, overlaps};
pub use schedule::{Conflict, Schedule};
pub use shift::{Shift, ShiftId, ShiftKind};
pub use time_block::TimeBlock;
