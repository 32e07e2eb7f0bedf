use crate::error::ScrapeError;
use models::{BlockConfig, Calendar, WeekdayTables};

/// Hour at which the first block of the day starts
pub const ORIGIN_HOUR_VAR: &str = "TIMETABLE_ORIGIN_HOUR";
/// Length of a block in minutes
pub const BLOCK_MINUTES_VAR: &str = "TIMETABLE_BLOCK_MINUTES";

/// Catalog conventions, overridable from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScraperConfig {
    pub origin_hour: u32,
    pub block_minutes: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            origin_hour: BlockConfig::DEFAULT_ORIGIN_HOUR,
            block_minutes: BlockConfig::DEFAULT_GRANULARITY,
        }
    }
}

impl ScraperConfig {
    /// Reads the configuration from the process environment, loading a `.env`
    /// file first if there is one
    pub fn from_env() -> Result<Self, ScrapeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to the defaults for
    /// unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScrapeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let read = |key: &str, default: u32| -> Result<u32, ScrapeError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value.trim().parse().map_err(|_| ScrapeError::Config {
                    key: key.to_owned(),
                    value,
                }),
            }
        };

        Ok(Self {
            origin_hour: read(ORIGIN_HOUR_VAR, defaults.origin_hour)?,
            block_minutes: read(BLOCK_MINUTES_VAR, defaults.block_minutes)?,
        })
    }

    /// Builds the calendar used to parse lesson spans
    pub fn calendar(&self) -> Result<Calendar, ScrapeError> {
        let blocks = BlockConfig::new(self.origin_hour, self.block_minutes)?;
        Ok(Calendar::new(blocks, WeekdayTables::default()))
    }
}
