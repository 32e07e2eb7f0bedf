use crate::error::ScrapeError;
use lazy_static::lazy_static;
use log::warn;
use models::{RowTuple, TimetableError};
use regex::Regex;

/// Column holding the shift name, e.g. `"1234PB05"`
pub const NAME_COLUMN: usize = 0;
/// Column holding the lesson span, e.g. `"Seg, 08:00 — 09:30"`
pub const LESSON_COLUMN: usize = 2;
/// Column holding the whitespace-separated class groups
pub const GROUPS_COLUMN: usize = 4;

lazy_static! {
    static ref SHIFT_TYPE: Regex = Regex::new(r"\d+([A-Z]*)\d+").unwrap();
}

/// A classified row of the shift table
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A row the timetable model can ingest
    Row(RowTuple),
    /// Nothing but blank cells
    Empty,
    /// A row that could not be read, kept for diagnostics
    Unknown { text: String, error: ScrapeError },
}

/// Extracts the shift type from a shift name: the capital letters between the
/// course number and the shift number.
///
/// # Returns
/// The type, e.g. `"PB"` for `"1234PB05"`
///
/// # Errors
/// [`ScrapeError::EmptyShiftTypeMatch`] if the pattern does not match or captures
/// nothing
pub fn shift_type_of(name: &str) -> Result<&str, ScrapeError> {
    SHIFT_TYPE
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map(|kind| kind.as_str())
        .filter(|kind| !kind.is_empty())
        .ok_or_else(|| ScrapeError::EmptyShiftTypeMatch(name.to_owned()))
}

/// Gets a trimmed, non-empty cell
fn cell<S: AsRef<str>>(cells: &[S], column: usize) -> Option<&str> {
    cells
        .get(column)
        .map(|text| text.as_ref().trim())
        .filter(|text| !text.is_empty())
}

/// Determines which `Line` variant a row of cells fits into
///
/// # Arguments
/// * `cells` - The text of each cell of the row, in column order
pub fn parse_line<S: AsRef<str>>(cells: &[S]) -> Line {
    if cells.iter().all(|text| text.as_ref().trim().is_empty()) {
        return Line::Empty;
    }

    let unknown = |error: ScrapeError| {
        let text = cells
            .iter()
            .map(|text| text.as_ref().trim())
            .collect::<Vec<_>>()
            .join(" | ");
        warn!("Unknown row format: {text} ({error})");
        Line::Unknown { text, error }
    };

    let Some(name) = cell(cells, NAME_COLUMN) else {
        return unknown(TimetableError::MalformedRow("row has no shift name".into()).into());
    };

    let kind = match shift_type_of(name) {
        Ok(kind) => kind,
        Err(error) => return unknown(error),
    };

    Line::Row(RowTuple {
        shift_name: name.to_owned(),
        shift_type: kind.to_owned(),
        lesson_span: cell(cells, LESSON_COLUMN).map(str::to_owned),
        class_groups: cell(cells, GROUPS_COLUMN)
            .map(|groups| groups.split_whitespace().map(str::to_owned).collect()),
    })
}

/// Classifies every row of a shift table.
///
/// # Arguments
/// * `rows` - The rows of the table body, each a list of cell texts
///
/// # Returns
/// One `Line` per input row, in order
pub fn first_pass<I, R, S>(rows: I) -> Vec<Line>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.into_iter().map(|row| parse_line(row.as_ref())).collect()
}
