//! A candidate timetable assembled from shifts of one or more curricular units.
//!
//! The schedule only checks the shifts it is given against each other with the
//! lesson overlap predicate. Choosing which shifts to try is left to the caller.

use crate::{calendar::Calendar, days::Weekday, lesson::Lesson, shift::Shift};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};
use thiserror::Error;

/// Two chosen shifts that cannot both be attended
#[derive(Error, Debug, Clone, Copy)]
#[error(
    "{} of {} clashes with {} of {} on {}",
    .candidate.name(), .candidate.unit(), .chosen.name(), .chosen.unit(), .weekday
)]
pub struct Conflict<'a> {
    pub chosen: &'a Shift,
    pub candidate: &'a Shift,
    /// Day of the first clashing lesson pair
    pub weekday: Weekday,
}

/// Shifts are the same when they are the same object. Locators are not
/// required to be unique, so two units may hand out equal `(unit, id)` pairs.
fn same_shift(a: &Shift, b: &Shift) -> bool {
    std::ptr::eq(a, b)
}

fn first_clash<'a>(chosen: &'a Shift, candidate: &'a Shift) -> Option<Conflict<'a>> {
    chosen.lessons().iter().find_map(|a| {
        candidate
            .lessons()
            .iter()
            .find(|b| a.overlaps(b))
            .map(|_| Conflict {
                chosen,
                candidate,
                weekday: a.weekday(),
            })
    })
}

#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    /// Used only to render the schedule
    calendar: &'a Calendar,
    shifts: Vec<&'a Shift>,
}

impl<'a> Schedule<'a> {
    pub fn new(calendar: &'a Calendar) -> Self {
        Self {
            calendar,
            shifts: Vec::new(),
        }
    }

    pub fn shifts(&self) -> &[&'a Shift] {
        &self.shifts
    }

    pub fn contains(&self, shift: &Shift) -> bool {
        self.shifts.iter().any(|chosen| same_shift(chosen, shift))
    }

    /// The first chosen shift `shift` would clash with
    pub fn first_conflict(&self, shift: &'a Shift) -> Option<Conflict<'a>> {
        self.shifts
            .iter()
            .copied()
            .filter(|chosen| !same_shift(chosen, shift))
            .find_map(|chosen| first_clash(chosen, shift))
    }

    /// Adds `shift` if none of its lessons overlap a lesson already chosen.
    /// Adding a shift that is already in the schedule does nothing.
    pub fn try_add(&mut self, shift: &'a Shift) -> Result<(), Conflict<'a>> {
        if self.contains(shift) {
            return Ok(());
        }

        if let Some(conflict) = self.first_conflict(shift) {
            return Err(conflict);
        }

        self.shifts.push(shift);
        Ok(())
    }

    /// Adds `shift` without checking it, see [`Schedule::conflicts`]
    pub fn add_unchecked(&mut self, shift: &'a Shift) {
        if !self.contains(shift) {
            self.shifts.push(shift);
        }
    }

    /// Every pair of chosen shifts that clash, in the order they were added
    pub fn conflicts(&self) -> Vec<Conflict<'a>> {
        self.shifts
            .iter()
            .enumerate()
            .flat_map(|(i, &chosen)| {
                self.shifts[i + 1..]
                    .iter()
                    .filter_map(move |&candidate| first_clash(chosen, candidate))
            })
            .collect()
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts().is_empty()
    }

    /// Chosen lessons grouped by day, each day ordered by start block
    pub fn lessons_by_day(&self) -> BTreeMap<Weekday, Vec<(&'a Shift, &'a Lesson)>> {
        let mut days: BTreeMap<Weekday, Vec<(&'a Shift, &'a Lesson)>> = BTreeMap::new();

        for &shift in &self.shifts {
            for lesson in shift.lessons() {
                days.entry(lesson.weekday()).or_default().push((shift, lesson));
            }
        }

        for lessons in days.values_mut() {
            lessons.sort_by_key(|(_, lesson)| (lesson.slot.start, lesson.slot.end));
        }

        days
    }
}

impl Display for Schedule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let blocks = &self.calendar.blocks;

        for (day, lessons) in self.lessons_by_day() {
            let entries = lessons
                .iter()
                .map(|(shift, lesson)| {
                    format!(
                        "{} {} — {}",
                        shift.name(),
                        lesson.slot.start_time(blocks),
                        lesson.slot.end_time(blocks)
                    )
                })
                .collect::<Vec<_>>();

            writeln!(f, "{}: {}", day.format(&self.calendar.days), entries.join(", "))?;
        }
        Ok(())
    }
}
