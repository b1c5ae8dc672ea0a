//! Time sources
//!
//! Every board has a seconds counter (SysTick or RTC prescaler). Boards
//! with a battery-backed real-time clock also expose calendar time.

/// Calendar time as kept by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// Month 1-12
    pub month: u8,
    /// Day of month 1-31
    pub mday: u8,
    /// Hour 0-23
    pub hour: u8,
    /// Minute 0-59
    pub min: u8,
    /// Second 0-59
    pub sec: u8,
}

impl Default for CalendarTime {
    fn default() -> Self {
        Self {
            year: 2012,
            month: 1,
            mday: 1,
            hour: 0,
            min: 0,
            sec: 0,
        }
    }
}

impl CalendarTime {
    /// Two-digit year as shown on the panel
    pub fn short_year(&self) -> u16 {
        self.year % 100
    }

    /// Check field ranges (day-of-month is not checked against the month)
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.mday)
            && self.hour <= 23
            && self.min <= 59
            && self.sec <= 59
    }
}

/// Errors from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Board has no calendar clock
    Unsupported,
    /// Calendar fields out of range
    InvalidTime,
    /// RTC did not accept the write
    Device,
}

/// Clock trait
pub trait Clock {
    /// Seconds since power-on (or any monotonic-ish seconds count)
    ///
    /// Only changes of this value matter to the panel; wrap-around is fine.
    fn now_seconds(&mut self) -> u32;

    /// Current calendar time, if the board has an RTC
    fn calendar(&mut self) -> Option<CalendarTime> {
        None
    }

    /// Set the calendar time
    fn set_calendar(&mut self, time: &CalendarTime) -> Result<(), ClockError> {
        let _ = time;
        Err(ClockError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_time_is_valid() {
        assert!(CalendarTime::default().is_valid());
    }

    #[test]
    fn test_invalid_fields() {
        let mut t = CalendarTime::default();
        t.month = 13;
        assert!(!t.is_valid());

        let mut t = CalendarTime::default();
        t.mday = 0;
        assert!(!t.is_valid());

        let mut t = CalendarTime::default();
        t.hour = 24;
        assert!(!t.is_valid());
    }

    #[test]
    fn test_short_year() {
        let t = CalendarTime {
            year: 2024,
            ..Default::default()
        };
        assert_eq!(t.short_year(), 24);
    }

    struct Uptime(u32);

    impl Clock for Uptime {
        fn now_seconds(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_clock_without_rtc() {
        let mut clock = Uptime(42);
        assert_eq!(clock.now_seconds(), 42);
        assert!(clock.calendar().is_none());
        assert_eq!(
            clock.set_calendar(&CalendarTime::default()),
            Err(ClockError::Unsupported)
        );
    }
}
