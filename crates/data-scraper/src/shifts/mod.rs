pub mod first_pass;

use crate::{
    error::ScrapeError,
    shifts::first_pass::{Line, first_pass},
};
use lazy_static::lazy_static;
use models::{Calendar, CurricularUnit, Ingested, RowDiagnostic, TimetableError};
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref SEMESTER_LOCATOR: Regex = Regex::new(r".*-semestre").unwrap();
}

/// Cuts a curricular unit page address down to its semester page
///
/// # Returns
/// The address up to and including `-semestre`, or `None` if it has no such part
pub fn normalize_locator(url: &str) -> Option<&str> {
    SEMESTER_LOCATOR.find(url).map(|m| m.as_str())
}

/// Builds a curricular unit from the rows of its shift table.
///
/// `locator` is cut down with [`normalize_locator`] when it has a semester
/// part, so every page of the same unit yields the same locator. Rows that cannot be read are reported as malformed alongside the rows the
/// model itself rejects. Diagnostics refer to positions in `rows`.
///
/// # Errors
/// [`ScrapeError::Timetable`] with [`TimetableError::EmptyUnit`] if no shift
/// could be built
pub fn build_unit<I, R, S>(
    name: &str,
    locator: &str,
    rows: I,
    calendar: Arc<Calendar>,
) -> Result<Ingested, ScrapeError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut positions = Vec::new();
    let mut tuples = Vec::new();
    let mut diagnostics = Vec::new();

    for (row, line) in first_pass(rows).into_iter().enumerate() {
        match line {
            Line::Row(tuple) => {
                positions.push(row);
                tuples.push(tuple);
            }
            Line::Empty => {}
            Line::Unknown { error, .. } => diagnostics.push(RowDiagnostic {
                row,
                error: TimetableError::MalformedRow(error.to_string()),
            }),
        }
    }

    let locator = normalize_locator(locator).unwrap_or(locator);
    let mut ingested = CurricularUnit::from_rows(name, locator, tuples, calendar)?;

    for diagnostic in &mut ingested.diagnostics {
        diagnostic.row = positions[diagnostic.row];
    }
    ingested.diagnostics.extend(diagnostics);
    ingested.diagnostics.sort_by_key(|diagnostic| diagnostic.row);

    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Weekday;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_normalize_locator() {
        assert_eq!(
            normalize_locator("https://fenix.example.pt/disciplinas/ALGE/2024-2025/1-semestre/turnos"),
            Some("https://fenix.example.pt/disciplinas/ALGE/2024-2025/1-semestre")
        );
        assert_eq!(normalize_locator("https://fenix.example.pt/disciplinas/ALGE"), None);
    }

    #[test]
    fn test_build_unit() {
        let _ = env_logger::builder().is_test(true).try_init();

        let rows = table(&[
            &["1234T01", "Teórica", "Seg, 08:00 — 09:30", "Sala 1", "G1 G2"],
            &["1234T01", "Teórica", "Qua, 08:00 — 09:30", "Sala 1", "G3"],
            &["", "", "", "", ""],
            &["Sem turno", "", "Ter, 10:00 — 11:00", "", ""],
            &["1234PB01", "Problemas", "Sex, 25:00 — 26:00", "Sala 2", "G1"],
            &["1234PB02", "Problemas", "Qui, 14:00 — 15:00", "Sala 2", "G2"],
        ]);

        let ingested = build_unit("Algebra", "alge-1-semestre", &rows, Arc::new(Calendar::default()))
            .unwrap();

        let skipped: Vec<_> = ingested.diagnostics.iter().map(|d| d.row).collect();
        assert_eq!(skipped, vec![3, 4]);
        assert!(matches!(
            ingested.diagnostics[0].error,
            TimetableError::MalformedRow(_)
        ));
        assert_eq!(
            ingested.diagnostics[1].error,
            TimetableError::MalformedTime("25:00".to_string())
        );

        let unit = ingested.unit;
        let theory = unit.shift_named("T", "1234T01").unwrap();
        assert_eq!(theory.lessons().len(), 2);
        assert_eq!(theory.lessons()[1].weekday(), Weekday::Wednesday);
        assert_eq!(
            theory.class_groups().iter().collect::<Vec<_>>(),
            vec!["G1", "G2"]
        );

        let problems: Vec<_> = unit.shifts_of("PB").map(|s| s.name()).collect();
        assert_eq!(problems, vec!["1234PB02"]);
    }

    #[test]
    fn test_build_unit_without_shifts() {
        let rows = table(&[&["Sem turnos disponíveis"]]);
        let result = build_unit("Algebra", "alge-1-semestre", &rows, Arc::new(Calendar::default()));
        assert_eq!(
            result.unwrap_err(),
            ScrapeError::Timetable(TimetableError::EmptyUnit {
                locator: "alge-1-semestre".to_string()
            })
        );
    }

    #[test]
    fn test_build_unit_normalizes_the_locator() {
        let rows = table(&[&["1234T01", "Teórica", "Seg, 08:00 — 09:30", "Sala 1", "G1"]]);
        let shifts_page = "https://fenix.example.pt/disciplinas/ALGE/2024-2025/1-semestre/turnos";

        let unit = build_unit("Algebra", shifts_page, &rows, Arc::new(Calendar::default()))
            .unwrap()
            .unit;
        let semester_page = "https://fenix.example.pt/disciplinas/ALGE/2024-2025/1-semestre";
        assert_eq!(unit.locator(), semester_page);
        assert_eq!(unit.shifts()[0].unit(), semester_page);

        let unchanged = build_unit("Algebra", "ALGE", &rows, Arc::new(Calendar::default()))
            .unwrap()
            .unit;
        assert_eq!(unchanged.locator(), "ALGE");
    }
}
