//! Status reporter
//!
//! Composes the bottom status line once per clock second and tracks the
//! limit switch indicators. Holds nothing but the two "last seen" values,
//! so it can run on every loop iteration whatever the session state.

use core::fmt::Write;

use heapless::String;

use cncpanel_display::Color;
use cncpanel_hal::Clock;

use crate::config::{MotionTuningParameters, PanelCapabilities};
use crate::traits::{LimitMask, StatusSensors};

/// Maximum length of the clock part of the status line
pub const MAX_CLOCK_TEXT: usize = 24;

/// Maximum length of the temperature part
pub const MAX_TEMPERATURE_TEXT: usize = 10;

/// Spindle temperature reading as shown
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureText {
    pub text: String<MAX_TEMPERATURE_TEXT>,
    /// Green below the cutoff, red at or above it
    pub color: Color,
}

/// Freshly composed status line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLine {
    /// `dd.mm.yy hh:mm:ss ` or uptime `hh:mm:ss `
    pub clock: String<MAX_CLOCK_TEXT>,
    pub temperature: Option<TemperatureText>,
}

/// What has to be redrawn this iteration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFrame {
    /// New status line, when the second changed
    pub line: Option<StatusLine>,
    /// New indicator state, when it changed or the line was redrawn
    pub limits: Option<LimitMask>,
}

impl StatusFrame {
    /// Check whether nothing needs drawing
    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.limits.is_none()
    }
}

/// Per-second status composer
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    last_second: Option<u32>,
    last_limits: Option<LimitMask>,
}

impl StatusReporter {
    /// Create a new reporter; the first poll always draws
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was drawn, e.g. after the screen was cleared
    pub fn invalidate(&mut self) {
        self.last_second = None;
        self.last_limits = None;
    }

    /// Sample the clock and sensors
    pub fn poll<C, T>(
        &mut self,
        clock: &mut C,
        sensors: &mut T,
        caps: &PanelCapabilities,
        tuning: &MotionTuningParameters,
    ) -> StatusFrame
    where
        C: Clock + ?Sized,
        T: StatusSensors + ?Sized,
    {
        let mut frame = StatusFrame::default();

        let second = clock.now_seconds();
        if self.last_second != Some(second) {
            self.last_second = Some(second);
            // The fresh line is drawn over the indicators
            self.last_limits = None;
            frame.line = Some(compose_line(
                clock,
                sensors,
                caps,
                second,
                tuning,
            ));
        }

        let limits = sensors.limit_switches();
        if self.last_limits != Some(limits) {
            self.last_limits = Some(limits);
            frame.limits = Some(limits);
        }

        frame
    }
}

fn compose_line<C, T>(
    clock: &mut C,
    sensors: &mut T,
    caps: &PanelCapabilities,
    second: u32,
    tuning: &MotionTuningParameters,
) -> StatusLine
where
    C: Clock + ?Sized,
    T: StatusSensors + ?Sized,
{
    let mut text: String<MAX_CLOCK_TEXT> = String::new();
    let calendar = if caps.has_clock { clock.calendar() } else { None };
    let _ = match calendar {
        Some(t) => write!(
            text,
            "{:02}.{:02}.{:02} {:02}:{:02}:{:02} ",
            t.mday,
            t.month,
            t.short_year(),
            t.hour,
            t.min,
            t.sec
        ),
        None => write!(
            text,
            "{:02}:{:02}:{:02} ",
            (second / 3600) % 24,
            (second / 60) % 60,
            second % 60
        ),
    };

    let temperature = if caps.has_spindle_sensor {
        sensors.spindle_temperature_c().map(|celsius| {
            let mut t: String<MAX_TEMPERATURE_TEXT> = String::new();
            let _ = write!(t, "t:{}C", celsius);
            let color = if tuning.spindle_temperature_ok(celsius) {
                Color::Green
            } else {
                Color::Red
            };
            TemperatureText { text: t, color }
        })
    } else {
        None
    };

    StatusLine {
        clock: text,
        temperature,
    }
}
