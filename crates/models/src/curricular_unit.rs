use crate::{
    calendar::Calendar,
    error::{Result, TimetableError},
    lesson::{Lesson, Slot},
    response::{LessonResponse, ShiftResponse, UnitResponse},
    shift::{Shift, ShiftId},
};
use log::{info, warn};
use serde::{Serialize, Serializer};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

/// One row of the catalog's shift table, already extracted from markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTuple {
    pub shift_name: String,
    pub shift_type: String,
    /// Lesson span such as `"Seg, 08:00 — 09:30"`
    pub lesson_span: Option<String>,
    pub class_groups: Option<Vec<String>>,
}

impl RowTuple {
    pub fn new(shift_name: &str, shift_type: &str) -> Self {
        Self {
            shift_name: shift_name.to_owned(),
            shift_type: shift_type.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_lesson(mut self, span: &str) -> Self {
        self.lesson_span = Some(span.to_owned());
        self
    }

    pub fn with_class_groups<S: AsRef<str>>(mut self, groups: &[S]) -> Self {
        self.class_groups = Some(groups.iter().map(|g| g.as_ref().to_owned()).collect());
        self
    }
}

/// A row that was skipped while building a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// Zero-based position of the row in the input
    pub row: usize,
    pub error: TimetableError,
}

/// Result of folding a row sequence into a unit
#[derive(Debug)]
pub struct Ingested {
    pub unit: CurricularUnit,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// A course and every shift offered for it.
///
/// Shifts live in an arena in creation order. Each type bucket lists the ids of
/// its shifts, and `index` maps `(type, name)` to the single shift allowed for
/// that pair.
#[derive(Debug, Clone)]
pub struct CurricularUnit {
    name: String,
    locator: String,
    calendar: Arc<Calendar>,
    shifts: Vec<Shift>,
    buckets: BTreeMap<String, Vec<ShiftId>>,
    index: HashMap<(String, String), ShiftId>,
}

impl CurricularUnit {
    pub fn new(name: &str, locator: &str, calendar: Arc<Calendar>) -> Self {
        Self {
            name: name.to_owned(),
            locator: locator.to_owned(),
            calendar,
            shifts: Vec::new(),
            buckets: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a unit from the rows of its shift table.
    ///
    /// Rows that cannot be applied are skipped and reported in
    /// [`Ingested::diagnostics`]; the rest of the unit is still built.
    ///
    /// # Errors
    /// [`TimetableError::EmptyUnit`] if not a single shift could be resolved
    pub fn from_rows<I>(
        name: &str,
        locator: &str,
        rows: I,
        calendar: Arc<Calendar>,
    ) -> Result<Ingested>
    where
        I: IntoIterator<Item = RowTuple>,
    {
        let mut unit = Self::new(name, locator, calendar);
        let mut diagnostics = Vec::new();

        for (row, tuple) in rows.into_iter().enumerate() {
            if let Err(error) = unit.ingest(&tuple) {
                warn!("Skipping row {row} of {locator}: {error}");
                diagnostics.push(RowDiagnostic { row, error });
            }
        }

        if unit.shifts.is_empty() {
            return Err(TimetableError::EmptyUnit {
                locator: locator.to_owned(),
            });
        }

        info!(
            "Built {} with {} shifts across {} types ({} rows skipped)",
            unit.name,
            unit.shifts.len(),
            unit.buckets.len(),
            diagnostics.len()
        );

        Ok(Ingested { unit, diagnostics })
    }

    /// Applies a single row.
    ///
    /// The row is validated in full before anything changes, so a rejected row
    /// leaves the unit as it was.
    pub fn ingest(&mut self, row: &RowTuple) -> Result<()> {
        let name = row.shift_name.trim();
        if name.is_empty() {
            return Err(TimetableError::MalformedRow("row has no shift name".into()));
        }

        let kind = row.shift_type.trim();
        if kind.is_empty() {
            return Err(TimetableError::MalformedRow(format!(
                "shift {name:?} has no type"
            )));
        }

        let slot = row
            .lesson_span
            .as_deref()
            .map(str::trim)
            .filter(|span| !span.is_empty())
            .map(|span| Slot::parse(span, &self.calendar))
            .transpose()?;

        let id = self.find_or_create_shift(name, kind);
        let shift = &mut self.shifts[id.0];

        if let Some(slot) = slot {
            shift.add_lesson(slot);
        }

        if let Some(groups) = &row.class_groups {
            shift.set_class_groups(groups);
        }

        Ok(())
    }

    /// Returns the shift named `name` in the `kind` bucket, creating it at the end
    /// of the bucket if there is none
    pub fn find_or_create_shift(&mut self, name: &str, kind: &str) -> ShiftId {
        let key = (kind.to_owned(), name.to_owned());
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = ShiftId(self.shifts.len());
        self.shifts.push(Shift::new(id, &self.locator, name, kind));
        self.index.insert(key, id);

        let bucket = self.buckets.entry(kind.to_owned()).or_default();
        bucket.push(id);

        debug_assert!(
            bucket
                .iter()
                .filter(|&&other| self.shifts[other.0].name() == name)
                .count()
                == 1,
            "duplicate shift {name} in bucket {kind}"
        );

        id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Shift types present, in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Shifts of one type, in the order they were first seen
    pub fn shifts_of<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a Shift> + use<'a> {
        self.buckets
            .get(kind)
            .into_iter()
            .flatten()
            .map(|id| &self.shifts[id.0])
    }

    /// All shifts, in creation order
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.get(id.0)
    }

    pub fn shift_named(&self, kind: &str, name: &str) -> Option<&Shift> {
        self.index
            .get(&(kind.to_owned(), name.to_owned()))
            .and_then(|&id| self.shift(id))
    }

    /// The shift a lesson of this unit belongs to
    pub fn shift_of(&self, lesson: &Lesson) -> Option<&Shift> {
        self.shift(lesson.shift)
    }

    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.shifts.iter().flat_map(Shift::lessons)
    }

    /// Every pair of lessons, one from each unit, that overlap
    pub fn overlapping_lessons<'a>(
        &'a self,
        other: &'a CurricularUnit,
    ) -> Vec<(&'a Lesson, &'a Lesson)> {
        self.lessons()
            .flat_map(|a| {
                other
                    .lessons()
                    .filter(move |b| a.overlaps(b))
                    .map(move |b| (a, b))
            })
            .collect()
    }

    /// Renders the unit in its wire form
    pub fn to_response(&self) -> UnitResponse {
        let blocks = &self.calendar.blocks;
        let days = &self.calendar.days;

        let shifts: BTreeMap<_, _> = self
            .buckets
            .keys()
            .map(|kind| {
                let shifts: Vec<ShiftResponse> = self
                    .shifts_of(kind)
                    .map(|shift| ShiftResponse {
                        name: shift.name().to_owned(),
                        kind: shift.kind().to_owned(),
                        class_groups: shift.class_groups().iter().cloned().collect(),
                        lessons: shift
                            .lessons()
                            .iter()
                            .map(|lesson| LessonResponse {
                                day: lesson.weekday().format(days).to_owned(),
                                start: lesson.slot.start_time(blocks),
                                end: lesson.slot.end_time(blocks),
                            })
                            .collect(),
                    })
                    .collect();

                (kind.clone(), shifts)
            })
            .collect();

        UnitResponse {
            name: self.name.clone(),
            shifts,
        }
    }
}

impl Serialize for CurricularUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_response().serialize(serializer)
    }
}

impl Display for CurricularUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}: {}", self.name, self.locator)?;

        for kind in self.kinds() {
            writeln!(f, "{kind}:")?;
            for shift in self.shifts_of(kind) {
                writeln!(f, "{}", shift.format(&self.calendar))?;
            }
        }
        Ok(())
    }
}
