//! Turns the cell text of a curricular unit's shift table into the row tuples
//! the timetable model is built from.

pub mod config;
pub mod error;
pub mod shifts;
