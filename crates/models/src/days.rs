use crate::{
    calendar::WeekdayTables,
    error::{Result, TimetableError},
};
use lazy_static::lazy_static;
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

lazy_static! {
    /// Tables used by [`Display`], the catalog's own conventions
    static ref DEFAULT_TABLES: WeekdayTables = WeekdayTables::default();
}

/// Represents the day of the week a lesson occurs on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumProperty,
)]
#[repr(u8)]
pub enum Weekday {
    #[strum(props(pt = "Seg", en = "Mon"))]
    Monday = 0,
    #[strum(props(pt = "Ter", en = "Tue"))]
    Tuesday = 1,
    #[strum(props(pt = "Qua", en = "Wed"))]
    Wednesday = 2,
    #[strum(props(pt = "Qui", en = "Thu"))]
    Thursday = 3,
    #[strum(props(pt = "Sex", en = "Fri"))]
    Friday = 4,
    #[strum(props(pt = "Sab", en = "Sat"))]
    Saturday = 5,
    #[strum(props(pt = "Dom", en = "Sun"))]
    Sunday = 6,
}

impl Weekday {
    /// Number of days in the timetable grid that hold lessons
    pub const WORKING_DAYS: usize = 6;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn all() -> Vec<Weekday> {
        Self::iter().collect()
    }

    /// Monday through Saturday
    pub fn is_working_day(self) -> bool {
        self.index() < Self::WORKING_DAYS
    }

    /// Looks `abbrev` up in both locale tables.
    ///
    /// # Errors
    /// [`TimetableError::UnknownWeekday`] if neither table knows the abbreviation
    pub fn parse(abbrev: &str, tables: &WeekdayTables) -> Result<Self> {
        let abbrev = abbrev.trim();

        tables
            .canonical
            .position(abbrev)
            .or_else(|| tables.alternate.position(abbrev))
            .and_then(Self::from_index)
            .ok_or_else(|| TimetableError::UnknownWeekday(abbrev.to_owned()))
    }

    /// Renders the day with the canonical table, whichever locale it was parsed from
    pub fn format(self, tables: &WeekdayTables) -> &str {
        tables.canonical.name(self)
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.format(&DEFAULT_TABLES))
    }
}
