//! Error types for the timetable model

use thiserror::Error;

/// Result type for timetable operations
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors that can occur while building or querying a timetable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// Day abbreviation not present in either locale table
    #[error("Unknown weekday: {0:?}")]
    UnknownWeekday(String),

    /// Clock time not in `HH:MM` form or not aligned to the block granularity
    #[error("Malformed time: {0:?}")]
    MalformedTime(String),

    /// Lesson whose end is not after its start
    #[error("Lesson ends at {end} before it starts at {start}")]
    InvertedSpan { start: String, end: String },

    /// Row tuple missing a field it needs
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// Block configuration that cannot discretize an hour
    #[error("Invalid calendar configuration: {0}")]
    InvalidConfig(String),

    /// No shift could be resolved for a curricular unit
    #[error("No shifts found for {locator:?}")]
    EmptyUnit { locator: String },
}
