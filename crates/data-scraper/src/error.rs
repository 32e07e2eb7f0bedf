use models::TimetableError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// Shift name did not yield a type through the shift-type pattern
    #[error("No shift type in shift name {0:?}")]
    EmptyShiftTypeMatch(String),

    /// Environment variable with an unusable value
    #[error("Invalid value {value:?} for {key}")]
    Config { key: String, value: String },

    #[error(transparent)]
    Timetable(#[from] TimetableError),
}
