//! Status sensors
//!
//! Spindle temperature and axis limit switches, as shown on the status
//! line.

use cncpanel_hal::{ActiveLevel, InputPin};

use crate::config::AXIS_COUNT;

/// Set of triggered limit switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitMask(u8);

impl LimitMask {
    /// X axis limit
    pub const X: LimitMask = LimitMask(1 << 0);
    /// Y axis limit
    pub const Y: LimitMask = LimitMask(1 << 1);
    /// Z axis limit
    pub const Z: LimitMask = LimitMask(1 << 2);

    const ALL_BITS: u8 = 0b111;

    /// No limit triggered
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from raw bits; bits above Z are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether the limit of an axis (0 = X) is triggered
    pub const fn is_triggered(self, axis: usize) -> bool {
        axis < AXIS_COUNT && self.0 & (1 << axis) != 0
    }

    /// Check whether every limit in `other` is triggered
    pub const fn contains(self, other: LimitMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether nothing is triggered
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for LimitMask {
    type Output = LimitMask;

    fn bitor(self, rhs: Self) -> Self {
        LimitMask(self.0 | rhs.0)
    }
}

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// ADC conversion error
    ConversionError,
}

/// Trait for temperature sensors
///
/// Implementations should handle the specific sensor type (NTC thermistor,
/// thermocouple, digital probe, etc.)
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 45.5°C is returned as 455.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_celsius_x10().map(|t| t / 10)
    }
}

/// Source of the status-line readings
pub trait StatusSensors {
    /// Spindle temperature in whole degrees, `None` without a working sensor
    fn spindle_temperature_c(&mut self) -> Option<i16>;

    /// Currently triggered limit switches
    fn limit_switches(&mut self) -> LimitMask;
}

/// Status sensors built from a temperature probe and three limit inputs
pub struct PanelSensors<T, P> {
    spindle: Option<T>,
    limits: [P; AXIS_COUNT],
    level: ActiveLevel,
}

impl<T: TemperatureSensor, P: InputPin> PanelSensors<T, P> {
    /// Create a new sensor set
    ///
    /// `limits` are in axis order (X, Y, Z).
    pub fn new(spindle: Option<T>, limits: [P; AXIS_COUNT], level: ActiveLevel) -> Self {
        Self {
            spindle,
            limits,
            level,
        }
    }
}

impl<T: TemperatureSensor, P: InputPin> StatusSensors for PanelSensors<T, P> {
    fn spindle_temperature_c(&mut self) -> Option<i16> {
        let sensor = self.spindle.as_mut()?;
        match sensor.read_celsius() {
            Ok(t) => Some(t),
            Err(e) => {
                debug!("Spindle sensor error: {}", e);
                None
            }
        }
    }

    fn limit_switches(&mut self) -> LimitMask {
        let mut bits = 0u8;
        for (axis, pin) in self.limits.iter().enumerate() {
            if self.level.is_active(pin) {
                bits |= 1 << axis;
            }
        }
        LimitMask::from_bits(bits)
    }
}
