use crate::{
    calendar::BlockConfig,
    error::{Result, TimetableError},
};
use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter, Result as FmtResult};

lazy_static! {
    static ref CLOCK_TIME: Regex = Regex::new(r"^(\d{2}):(\d{2})$").unwrap();
}

/// A discretized instant: the number of blocks since the calendar origin.
///
/// Ordering and equality follow the block index, so two clock times that fall
/// into the same block compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeBlock(i32);

impl TimeBlock {
    pub fn new(index: i32) -> Self {
        Self(index)
    }

    /// Parses an `HH:MM` clock time into its block.
    ///
    /// # Errors
    /// [`TimetableError::MalformedTime`] if the string is not two digits, a colon and
    /// two digits, names an impossible time, or the minute is not a multiple of the
    /// block granularity
    pub fn parse(s: &str, config: &BlockConfig) -> Result<Self> {
        let malformed = || TimetableError::MalformedTime(s.to_owned());

        let captures = CLOCK_TIME.captures(s).ok_or_else(malformed)?;
        let hour: u32 = captures[1].parse().map_err(|_| malformed())?;
        let minute: u32 = captures[2].parse().map_err(|_| malformed())?;

        if hour > 23 || minute > 59 || minute % config.granularity() != 0 {
            return Err(malformed());
        }

        Ok(Self::from_clock(hour, minute, config))
    }

    /// `(hour - origin) * blocks_per_hour + minute / granularity`
    pub fn from_clock(hour: u32, minute: u32, config: &BlockConfig) -> Self {
        let hours = hour as i32 - config.origin_hour() as i32;
        let blocks = hours * config.blocks_per_hour() as i32 + (minute / config.granularity()) as i32;

        Self(blocks)
    }

    pub fn index(self) -> i32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn prev(self) -> Self {
        Self(self.0 - 1)
    }

    /// Wall-clock time at which the block starts
    pub fn to_time(self, config: &BlockConfig) -> NaiveTime {
        let minutes = config.origin_hour() as i64 * 60 + self.0 as i64 * config.granularity() as i64;
        let seconds = minutes.rem_euclid(24 * 60) * 60;

        NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0).unwrap_or_default()
    }

    /// Renders the block start as `HH:MM`
    pub fn format(self, config: &BlockConfig) -> String {
        self.to_time(config).format("%H:%M").to_string()
    }
}

impl Display for TimeBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}
