//! Clock editor
//!
//! Six positional fields edited one at a time. Values that would leave
//! a field's range are ignored rather than wrapped.

use cncpanel_hal::CalendarTime;

/// Editable fields in screen order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Second,
}

impl TimeField {
    /// Fields in screen order
    pub const ALL: [TimeField; 6] = [
        TimeField::Day,
        TimeField::Month,
        TimeField::Year,
        TimeField::Hour,
        TimeField::Minute,
        TimeField::Second,
    ];

    /// Accepted range, year as an offset from 2000
    pub const fn range(self) -> (u8, u8) {
        match self {
            TimeField::Day => (1, 31),
            TimeField::Month => (1, 12),
            TimeField::Year => (12, 30),
            TimeField::Hour => (0, 23),
            TimeField::Minute | TimeField::Second => (0, 59),
        }
    }

    /// Position on screen (0 = leftmost)
    pub fn position(self) -> usize {
        match self {
            TimeField::Day => 0,
            TimeField::Month => 1,
            TimeField::Year => 2,
            TimeField::Hour => 3,
            TimeField::Minute => 4,
            TimeField::Second => 5,
        }
    }
}

/// Clock editor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeEditor {
    time: CalendarTime,
    field: usize,
}

impl TimeEditor {
    /// Create a new editor starting from `time`
    pub fn new(time: CalendarTime) -> Self {
        Self { time, field: 0 }
    }

    /// Time as edited so far
    pub fn time(&self) -> &CalendarTime {
        &self.time
    }

    /// Highlighted field
    pub fn field(&self) -> TimeField {
        TimeField::ALL[self.field]
    }

    /// Current value of a field, year as an offset from 2000
    pub fn value(&self, field: TimeField) -> i32 {
        match field {
            TimeField::Day => i32::from(self.time.mday),
            TimeField::Month => i32::from(self.time.month),
            TimeField::Year => i32::from(self.time.year) - 2000,
            TimeField::Hour => i32::from(self.time.hour),
            TimeField::Minute => i32::from(self.time.min),
            TimeField::Second => i32::from(self.time.sec),
        }
    }

    /// Raise the highlighted field by one
    pub fn increment(&mut self) -> bool {
        self.adjust(1)
    }

    /// Lower the highlighted field by one
    pub fn decrement(&mut self) -> bool {
        self.adjust(-1)
    }

    /// Highlight the next field, wrapping to the first
    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % TimeField::ALL.len();
    }

    /// Highlight the previous field, wrapping to the last
    pub fn previous_field(&mut self) {
        self.field = self
            .field
            .checked_sub(1)
            .unwrap_or(TimeField::ALL.len() - 1);
    }

    /// Apply a step; returns whether the value changed
    fn adjust(&mut self, delta: i32) -> bool {
        let field = self.field();
        let value = self.value(field) + delta;
        let (min, max) = field.range();
        if value < i32::from(min) || value > i32::from(max) {
            return false;
        }

        // Range check above keeps every value within u8
        let v = value as u8;
        match field {
            TimeField::Day => self.time.mday = v,
            TimeField::Month => self.time.month = v,
            TimeField::Year => self.time.year = 2000 + u16::from(v),
            TimeField::Hour => self.time.hour = v,
            TimeField::Minute => self.time.min = v,
            TimeField::Second => self.time.sec = v,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> CalendarTime {
        CalendarTime {
            year: 2024,
            month: 12,
            mday: 31,
            hour: 23,
            min: 0,
            sec: 59,
        }
    }

    #[test]
    fn test_upper_bounds_ignored() {
        let mut editor = TimeEditor::new(sample());
        assert!(!editor.increment());
        assert_eq!(editor.time().mday, 31);

        editor.next_field();
        assert!(!editor.increment());
        assert_eq!(editor.time().month, 12);

        editor.next_field();
        assert!(editor.increment());
        assert_eq!(editor.time().year, 2025);
    }

    #[test]
    fn test_minute_lower_bound() {
        let mut editor = TimeEditor::new(sample());
        for _ in 0..4 {
            editor.next_field();
        }
        assert_eq!(editor.field(), TimeField::Minute);
        assert!(!editor.decrement());
        assert_eq!(editor.time().min, 0);
        assert!(editor.increment());
        assert_eq!(editor.time().min, 1);
    }

    #[test]
    fn test_year_window() {
        let mut time = sample();
        time.year = 2030;
        let mut editor = TimeEditor::new(time);
        editor.next_field();
        editor.next_field();
        assert!(!editor.increment());
        assert!(editor.decrement());
        assert_eq!(editor.value(TimeField::Year), 29);
    }

    #[test]
    fn test_field_moves_wrap() {
        let mut editor = TimeEditor::new(sample());
        editor.previous_field();
        assert_eq!(editor.field(), TimeField::Second);
        editor.next_field();
        assert_eq!(editor.field(), TimeField::Day);
    }

    #[test]
    fn test_positions_follow_screen_order() {
        for (i, field) in TimeField::ALL.iter().enumerate() {
            assert_eq!(field.position(), i);
        }
    }

    proptest! {
        #[test]
        fn prop_edits_keep_time_valid(
            steps in proptest::collection::vec(0u8..4, 0..200),
        ) {
            let mut editor = TimeEditor::new(CalendarTime::default());
            for step in steps {
                match step {
                    0 => { editor.increment(); }
                    1 => { editor.decrement(); }
                    2 => editor.next_field(),
                    _ => editor.previous_field(),
                }
                prop_assert!(editor.time().is_valid());
                let year = editor.value(TimeField::Year);
                prop_assert!((12..=30).contains(&year));
            }
        }
    }
}
