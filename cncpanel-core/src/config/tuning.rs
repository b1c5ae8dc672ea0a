//! Motion tuning parameters
//!
//! Ramp and feed limits handed to the stepper engine. All rates are
//! steps per second multiplied by [`K_FRQ`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of motion axes (X, Y, Z)
pub const AXIS_COUNT: usize = 3;

/// Fixed-point scale of the step timer
pub const K_FRQ: i32 = 100;

// Machine constants the defaults are derived from
const STEPS_PER_MM: [i32; AXIS_COUNT] = [200, 200, 400];
const RAMP_UP_FROM_ZERO_SPS: [i32; AXIS_COUNT] = [400, 400, 300];
const RAMP_DOWN_TO_ZERO_SPS: [i32; AXIS_COUNT] = [400, 400, 300];
const RAMP_FEED_DELTA_MM_PER_MIN: [i32; AXIS_COUNT] = [10, 10, 5];
const RAMP_FEED_PERIOD_MS: i32 = 20;
const MAX_STEPS_PER_SEC: [i32; AXIS_COUNT] = [4000, 4000, 2000];

/// Default spindle switch-off temperature in degrees Celsius
pub const DEFAULT_MAX_SPINDLE_TEMPERATURE: i32 = 80;

/// Ramp profile of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisTuning {
    /// Start rate when accelerating from standstill
    pub ramp_up_from_zero: i32,
    /// Rate below which the axis stops dead when decelerating
    pub ramp_down_to_zero: i32,
    /// Rate change per ramp period
    pub ramp_acceleration: i32,
    /// Highest rate the axis is driven at
    pub max_feed_rate: i32,
}

impl AxisTuning {
    /// Compiled-in defaults for an axis
    pub const fn default_for(axis: usize) -> Self {
        Self {
            ramp_up_from_zero: RAMP_UP_FROM_ZERO_SPS[axis] * K_FRQ,
            ramp_down_to_zero: RAMP_DOWN_TO_ZERO_SPS[axis] * K_FRQ,
            ramp_acceleration: RAMP_FEED_DELTA_MM_PER_MIN[axis]
                * STEPS_PER_MM[axis]
                * RAMP_FEED_PERIOD_MS
                * K_FRQ
                / 1000,
            max_feed_rate: MAX_STEPS_PER_SEC[axis] * K_FRQ,
        }
    }

    /// Values in file order
    pub fn to_array(&self) -> [i32; 4] {
        [
            self.ramp_up_from_zero,
            self.ramp_down_to_zero,
            self.ramp_acceleration,
            self.max_feed_rate,
        ]
    }

    /// Build from values in file order
    pub fn from_array(values: [i32; 4]) -> Self {
        Self {
            ramp_up_from_zero: values[0],
            ramp_down_to_zero: values[1],
            ramp_acceleration: values[2],
            max_feed_rate: values[3],
        }
    }
}

/// Full tuning record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionTuningParameters {
    /// X, Y, Z ramp profiles
    pub axes: [AxisTuning; AXIS_COUNT],
    /// Spindle temperature (°C) at which the spindle is switched off
    pub max_spindle_temperature: i32,
}

impl Default for MotionTuningParameters {
    fn default() -> Self {
        Self {
            axes: [
                AxisTuning::default_for(0),
                AxisTuning::default_for(1),
                AxisTuning::default_for(2),
            ],
            max_spindle_temperature: DEFAULT_MAX_SPINDLE_TEMPERATURE,
        }
    }
}

impl MotionTuningParameters {
    /// Check whether a spindle temperature is still below the cutoff
    pub fn spindle_temperature_ok(&self, celsius: i16) -> bool {
        self.max_spindle_temperature > i32::from(celsius)
    }
}
