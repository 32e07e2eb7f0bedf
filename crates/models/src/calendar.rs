//! Calendar conventions shared by every parsing and rendering function.
//!
//! A [`Calendar`] is built once (usually from [`Calendar::default`]) and handed
//! around behind an `Arc`. Nothing in it changes after construction.

use crate::{
    days::Weekday,
    error::{Result, TimetableError},
};
use strum::{EnumProperty, IntoEnumIterator};

const MINUTES_PER_HOUR: u32 = 60;

/// How wall-clock time is cut into comparable blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockConfig {
    origin_hour: u32,
    granularity: u32,
}

impl BlockConfig {
    /// Hour at which block zero starts in the catalog
    pub const DEFAULT_ORIGIN_HOUR: u32 = 8;
    /// Length of a block in minutes
    pub const DEFAULT_GRANULARITY: u32 = 30;

    pub fn new(origin_hour: u32, granularity: u32) -> Result<Self> {
        if origin_hour > 23 {
            return Err(TimetableError::InvalidConfig(format!(
                "origin hour {origin_hour} is not a valid hour"
            )));
        }

        if granularity == 0 || MINUTES_PER_HOUR % granularity != 0 {
            return Err(TimetableError::InvalidConfig(format!(
                "granularity of {granularity} minutes does not divide an hour"
            )));
        }

        Ok(Self {
            origin_hour,
            granularity,
        })
    }

    pub fn origin_hour(&self) -> u32 {
        self.origin_hour
    }

    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    pub fn blocks_per_hour(&self) -> u32 {
        MINUTES_PER_HOUR / self.granularity
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            origin_hour: Self::DEFAULT_ORIGIN_HOUR,
            granularity: Self::DEFAULT_GRANULARITY,
        }
    }
}

/// Seven day names, Monday first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTable {
    names: [String; 7],
}

impl DayTable {
    pub fn new(names: [&str; 7]) -> Self {
        Self {
            names: names.map(str::to_owned),
        }
    }

    /// Builds a table from the locale property attached to each [`Weekday`]
    fn from_prop(prop: &str) -> Self {
        let mut names: [String; 7] = Default::default();
        for day in Weekday::iter() {
            names[day.index()] = day.get_str(prop).unwrap_or_default().to_owned();
        }

        Self { names }
    }

    pub fn portuguese() -> Self {
        Self::from_prop("pt")
    }

    pub fn english() -> Self {
        Self::from_prop("en")
    }

    pub fn name(&self, day: Weekday) -> &str {
        &self.names[day.index()]
    }

    /// Index of `abbrev` in the table, if present
    pub fn position(&self, abbrev: &str) -> Option<usize> {
        self.names.iter().position(|name| name == abbrev)
    }
}

/// The pair of locale tables accepted when parsing day abbreviations.
///
/// Parsing looks in both; formatting always uses `canonical`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayTables {
    pub canonical: DayTable,
    pub alternate: DayTable,
}

impl Default for WeekdayTables {
    fn default() -> Self {
        Self {
            canonical: DayTable::portuguese(),
            alternate: DayTable::english(),
        }
    }
}

/// Block configuration plus day tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub blocks: BlockConfig,
    pub days: WeekdayTables,
}

impl Calendar {
    pub fn new(blocks: BlockConfig, days: WeekdayTables) -> Self {
        Self { blocks, days }
    }
}
