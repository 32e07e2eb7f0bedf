use crate::{
    calendar::Calendar,
    lesson::{Lesson, Slot},
};
use log::debug;
use serde::Serialize;
use std::{collections::BTreeSet, str::FromStr};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString};

/// Position of a shift inside its curricular unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShiftId(pub usize);

/// Section kinds the catalog is known to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, EnumProperty)]
pub enum ShiftKind {
    #[strum(serialize = "T", props(description = "Theory"))]
    Theory,
    #[strum(serialize = "TP", props(description = "Theory-practice"))]
    TheoryPractice,
    #[strum(serialize = "PB", props(description = "Problems"))]
    Problems,
    #[strum(serialize = "P", props(description = "Practical"))]
    Practical,
    #[strum(serialize = "L", props(description = "Laboratory"))]
    Laboratory,
    #[strum(serialize = "S", props(description = "Seminar"))]
    Seminar,
}

impl ShiftKind {
    pub fn tag(&self) -> &str {
        self.as_ref()
    }

    pub fn description(&self) -> &'static str {
        self.get_str("description").unwrap_or_default()
    }
}

/// A scheduled section of a curricular unit
#[derive(Debug, Clone)]
pub struct Shift {
    id: ShiftId,
    /// Locator of the owning curricular unit
    unit: String,
    name: String,
    kind: String,
    class_groups: BTreeSet<String>,
    lessons: Vec<Lesson>,
}

impl Shift {
    pub(crate) fn new(id: ShiftId, unit: &str, name: &str, kind: &str) -> Self {
        Self {
            id,
            unit: unit.to_owned(),
            name: name.to_owned(),
            kind: kind.to_owned(),
            class_groups: BTreeSet::new(),
            lessons: Vec::new(),
        }
    }

    pub fn id(&self) -> ShiftId {
        self.id
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn known_kind(&self) -> Option<ShiftKind> {
        ShiftKind::from_str(&self.kind).ok()
    }

    pub fn class_groups(&self) -> &BTreeSet<String> {
        &self.class_groups
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Appends a lesson at `slot` unless an identical one is already there.
    ///
    /// # Returns
    /// `true` if the lesson was added
    pub(crate) fn add_lesson(&mut self, slot: Slot) -> bool {
        if self.lessons.iter().any(|lesson| lesson.slot == slot) {
            debug!("Shift {} already has a lesson at {:?}", self.name, slot);
            return false;
        }

        self.lessons.push(Lesson::new(slot, self.id));
        true
    }

    /// Populates the class groups if they are still empty.
    ///
    /// Blank labels are ignored. Once populated the set is never overwritten.
    ///
    /// # Returns
    /// `true` if the set was populated by this call
    pub(crate) fn set_class_groups<I, S>(&mut self, labels: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.class_groups.is_empty() {
            debug!("Shift {} keeps its class groups", self.name);
            return false;
        }

        self.class_groups = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_owned())
            .filter(|label| !label.is_empty())
            .collect();

        !self.class_groups.is_empty()
    }

    /// Renders the shift with its lessons in wall-clock form, e.g.
    /// `T01 (T): [G1 G2] Seg, 08:00 — 09:30; Qua, 08:00 — 09:30`
    pub fn format(&self, calendar: &Calendar) -> String {
        let groups = self.class_groups.iter().cloned().collect::<Vec<_>>();
        let mut text = format!("{} ({}): [{}]", self.name, self.kind, groups.join(" "));

        let lessons = self
            .lessons
            .iter()
            .map(|lesson| lesson.slot.format(calendar))
            .collect::<Vec<_>>();
        if !lessons.is_empty() {
            text.push(' ');
            text.push_str(&lessons.join("; "));
        }

        text
    }

    /// Whether any lesson of this shift overlaps any lesson of `other`
    pub fn conflicts_with(&self, other: &Shift) -> bool {
        self.lessons
            .iter()
            .any(|a| other.lessons.iter().any(|b| a.overlaps(b)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn slot(span: &str) -> Slot {
        Slot::parse(span, &Calendar::default()).unwrap()
    }

    #[test]
    fn test_add_lesson_keeps_order_and_backreference() {
        let mut shift = Shift::new(ShiftId(3), "uc", "T01", "T");
        assert!(shift.add_lesson(slot("Qua, 08:00 — 09:30")));
        assert!(shift.add_lesson(slot("Seg, 08:00 — 09:30")));

        let days: Vec<_> = shift.lessons().iter().map(Lesson::weekday).collect();
        assert_eq!(days, vec![crate::days::Weekday::Wednesday, crate::days::Weekday::Monday]);
        assert!(shift.lessons().iter().all(|lesson| lesson.shift == ShiftId(3)));
    }

    #[test]
    fn test_identical_lesson_is_ignored() {
        let mut shift = Shift::new(ShiftId(0), "uc", "T01", "T");
        assert!(shift.add_lesson(slot("Seg, 08:00 — 09:30")));
        assert!(!shift.add_lesson(slot("Mon, 08:00 — 09:30")));
        assert_eq!(shift.lessons().len(), 1);
    }

    #[test]
    fn test_class_groups_first_writer_wins() {
        let mut shift = Shift::new(ShiftId(0), "uc", "T01", "T");
        assert!(!shift.set_class_groups(["", "  "]));
        assert!(shift.set_class_groups(["G2", "G1", "G2"]));
        assert!(!shift.set_class_groups(["G9"]));

        let groups: Vec<_> = shift.class_groups().iter().map(String::as_str).collect();
        assert_eq!(groups, vec!["G1", "G2"]);
    }

    #[test]
    fn test_conflicts_with() {
        let mut a = Shift::new(ShiftId(0), "uc", "T01", "T");
        a.add_lesson(slot("Seg, 08:00 — 09:30"));
        a.add_lesson(slot("Qua, 08:00 — 09:30"));

        let mut b = Shift::new(ShiftId(1), "uc", "PB01", "PB");
        b.add_lesson(slot("Qua, 09:00 — 10:00"));

        let mut c = Shift::new(ShiftId(2), "uc", "PB02", "PB");
        c.add_lesson(slot("Qua, 09:30 — 11:00"));

        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_format_uses_wall_clock_times() {
        let calendar = Calendar::default();
        let mut shift = Shift::new(ShiftId(0), "uc", "T01", "T");
        assert_eq!(shift.format(&calendar), "T01 (T): []");

        shift.set_class_groups(["G2", "G1"]);
        shift.add_lesson(slot("Mon, 08:00 — 09:30"));
        shift.add_lesson(slot("Qua, 10:00 — 11:00"));
        assert_eq!(
            shift.format(&calendar),
            "T01 (T): [G1 G2] Seg, 08:00 — 09:30; Qua, 10:00 — 11:00"
        );
    }

    #[test]
    fn test_known_kind() {
        let lab = Shift::new(ShiftId(0), "uc", "L03", "L");
        assert_eq!(lab.known_kind(), Some(ShiftKind::Laboratory));
        assert_eq!(lab.known_kind().unwrap().description(), "Laboratory");
        assert_eq!(ShiftKind::TheoryPractice.tag(), "TP");

        let odd = Shift::new(ShiftId(1), "uc", "X01", "X");
        assert_eq!(odd.known_kind(), None);
    }
}
