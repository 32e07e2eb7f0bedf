use crate::{
    calendar::{BlockConfig, Calendar},
    days::Weekday,
    error::{Result, TimetableError},
    shift::ShiftId,
    time_block::TimeBlock,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `<Day>, HH:MM — HH:MM`, with an em-dash, en-dash or hyphen between the times
    static ref LESSON_SPAN: Regex =
        Regex::new(r"^\s*([^\s,]+)\s*,\s*([0-9:]+)\s*[—–-]\s*([0-9:]+)\s*$").unwrap();
}

/// When a lesson happens: a weekday and a closed range of blocks.
///
/// `end` is the last block the lesson occupies, not the first free one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub weekday: Weekday,
    pub start: TimeBlock,
    pub end: TimeBlock,
}

impl Slot {
    /// Creates a slot from wall-clock start and end times.
    ///
    /// The end clock time is exclusive, so it is moved back one block before being
    /// stored. A lesson ending at 11:30 and one starting at 11:30 share no block.
    pub fn new(weekday: Weekday, start: &str, end: &str, config: &BlockConfig) -> Result<Self> {
        let start_block = TimeBlock::parse(start, config)?;
        let end_block = TimeBlock::parse(end, config)?;

        if end_block <= start_block {
            return Err(TimetableError::InvertedSpan {
                start: start.to_owned(),
                end: end.to_owned(),
            });
        }

        Ok(Self {
            weekday,
            start: start_block,
            end: end_block.prev(),
        })
    }

    /// Parses a full lesson span such as `"Seg, 08:00 — 09:30"`
    pub fn parse(span: &str, calendar: &Calendar) -> Result<Self> {
        let captures = LESSON_SPAN.captures(span).ok_or_else(|| {
            TimetableError::MalformedRow(format!("unrecognized lesson span {span:?}"))
        })?;

        let weekday = Weekday::parse(&captures[1], &calendar.days)?;
        Self::new(weekday, &captures[2], &captures[3], &calendar.blocks)
    }

    /// Two slots overlap when they fall on the same day and their closed block
    /// ranges intersect
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.weekday == other.weekday && self.start <= other.end && other.start <= self.end
    }

    /// Number of blocks occupied. A hand-built slot whose end precedes its
    /// start occupies none.
    pub fn block_count(&self) -> u32 {
        u32::try_from(self.end.index() - self.start.index() + 1).unwrap_or(0)
    }

    pub fn duration_minutes(&self, config: &BlockConfig) -> u32 {
        self.block_count() * config.granularity()
    }

    pub fn start_time(&self, config: &BlockConfig) -> String {
        self.start.format(config)
    }

    /// Wall-clock end, i.e. the start of the first block after the lesson
    pub fn end_time(&self, config: &BlockConfig) -> String {
        self.end.next().format(config)
    }

    /// Renders the slot back into the catalog's lesson span form
    pub fn format(&self, calendar: &Calendar) -> String {
        format!(
            "{}, {} — {}",
            self.weekday.format(&calendar.days),
            self.start_time(&calendar.blocks),
            self.end_time(&calendar.blocks)
        )
    }
}

/// One weekly occurrence of a shift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub slot: Slot,
    /// Shift this lesson belongs to, inside the owning curricular unit
    pub shift: ShiftId,
}

impl Lesson {
    pub fn new(slot: Slot, shift: ShiftId) -> Self {
        Self { slot, shift }
    }

    pub fn parse(span: &str, shift: ShiftId, calendar: &Calendar) -> Result<Self> {
        Slot::parse(span, calendar).map(|slot| Self::new(slot, shift))
    }

    pub fn weekday(&self) -> Weekday {
        self.slot.weekday
    }

    pub fn overlaps(&self, other: &Lesson) -> bool {
        overlaps(self, other)
    }
}

/// Whether two lessons conflict.
///
/// Symmetric, and reflexive for every lesson. Lessons on different weekdays
/// never conflict.
pub fn overlaps(a: &Lesson, b: &Lesson) -> bool {
    a.slot.overlaps(&b.slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(span: &str) -> Lesson {
        Lesson::parse(span, ShiftId(0), &Calendar::default()).unwrap()
    }

    #[test]
    fn test_end_is_last_occupied_block() {
        let slot = Slot::parse("Seg, 11:00 — 11:30", &Calendar::default()).unwrap();
        assert_eq!(slot.start.index(), 6);
        assert_eq!(slot.end.index(), 6);
        assert_eq!(slot.block_count(), 1);
    }

    #[test]
    fn test_adjacent_lessons_do_not_overlap() {
        let first = lesson("Mon, 10:00 — 10:30");
        let second = lesson("Mon, 10:30 — 11:00");
        assert!(!overlaps(&first, &second));
        assert!(!overlaps(&second, &first));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = lesson("Mon, 09:00 — 11:00");
        let inner = lesson("Mon, 09:30 — 10:00");
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_partial_overlap() {
        let a = lesson("Ter, 09:00 — 10:30");
        let b = lesson("Tue, 10:00 — 12:00");
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_different_days_never_overlap() {
        let a = lesson("Seg, 08:00 — 20:00");
        let b = lesson("Ter, 09:00 — 10:00");
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_symmetric_and_reflexive() {
        let spans = [
            "Seg, 08:00 — 09:30",
            "Seg, 09:00 — 10:00",
            "Seg, 09:30 — 11:00",
            "Qua, 08:00 — 09:30",
            "Sun, 20:00 — 20:30",
        ];
        let lessons: Vec<_> = spans.iter().map(|s| lesson(s)).collect();

        for a in &lessons {
            assert!(overlaps(a, a));
            for b in &lessons {
                assert_eq!(overlaps(a, b), overlaps(b, a));
            }
        }
    }

    #[test]
    fn test_separators_and_spacing() {
        let calendar = Calendar::default();
        let em = Slot::parse("Qui, 14:00 — 15:30", &calendar).unwrap();
        let en = Slot::parse("Qui,14:00–15:30", &calendar).unwrap();
        let hyphen = Slot::parse("  Thu, 14:00 - 15:30 ", &calendar).unwrap();
        assert_eq!(em, en);
        assert_eq!(em, hyphen);
    }

    #[test]
    fn test_parse_errors() {
        let calendar = Calendar::default();
        assert!(matches!(
            Slot::parse("Seg 08:00 09:00", &calendar),
            Err(TimetableError::MalformedRow(_))
        ));
        assert_eq!(
            Slot::parse("Foo, 08:00 — 09:00", &calendar),
            Err(TimetableError::UnknownWeekday("Foo".to_string()))
        );
        assert_eq!(
            Slot::parse("Seg, 8:00 — 09:00", &calendar),
            Err(TimetableError::MalformedTime("8:00".to_string()))
        );
        assert_eq!(
            Slot::parse("Seg, 08:10 — 09:00", &calendar),
            Err(TimetableError::MalformedTime("08:10".to_string()))
        );
        assert!(matches!(
            Slot::parse("Seg, 10:00 — 10:00", &calendar),
            Err(TimetableError::InvertedSpan { .. })
        ));
        assert!(matches!(
            Slot::parse("Seg, 11:00 — 10:00", &calendar),
            Err(TimetableError::InvertedSpan { .. })
        ));
    }

    #[test]
    fn test_rendering_round_trips_clock_times() {
        let calendar = Calendar::default();
        let slot = Slot::parse("Fri, 08:00 — 09:30", &calendar).unwrap();
        assert_eq!(slot.start_time(&calendar.blocks), "08:00");
        assert_eq!(slot.end_time(&calendar.blocks), "09:30");
        assert_eq!(slot.duration_minutes(&calendar.blocks), 90);
        assert_eq!(slot.format(&calendar), "Sex, 08:00 — 09:30");
    }

    #[test]
    fn test_inverted_slot_occupies_no_blocks() {
        let calendar = Calendar::default();
        let slot = Slot {
            weekday: Weekday::Monday,
            start: TimeBlock::new(5),
            end: TimeBlock::new(2),
        };
        assert_eq!(slot.block_count(), 0);
        assert_eq!(slot.duration_minutes(&calendar.blocks), 0);

        let single = Slot {
            end: TimeBlock::new(5),
            ..slot
        };
        assert_eq!(single.block_count(), 1);
    }
}
