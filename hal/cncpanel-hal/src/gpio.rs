//! GPIO pin abstractions
//!
//! Provides the digital input trait used for limit switches and other
//! contacts that can be implemented by chip-specific HALs.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Electrical level at which a contact counts as triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Normally-open switch pulling the line low
    #[default]
    Low,
    /// Switch driving the line high
    High,
}

impl ActiveLevel {
    /// Check whether a pin is in its triggered state
    pub fn is_active<P: InputPin + ?Sized>(self, pin: &P) -> bool {
        match self {
            ActiveLevel::Low => pin.is_low(),
            ActiveLevel::High => pin.is_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low() {
        assert!(ActiveLevel::Low.is_active(&Level(false)));
        assert!(!ActiveLevel::Low.is_active(&Level(true)));
    }

    #[test]
    fn test_active_high() {
        assert!(ActiveLevel::High.is_active(&Level(true)));
        assert!(!ActiveLevel::High.is_active(&Level(false)));
    }
}
