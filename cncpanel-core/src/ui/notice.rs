//! Message windows

use core::fmt;

use heapless::Vec;

use cncpanel_display::Color;

use super::text::{format_line, Line};

/// Maximum lines in a message window
pub const MAX_NOTICE_LINES: usize = 8;

/// Window look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowStyle {
    /// Progress and results
    Message,
    /// Faults
    Error,
}

impl WindowStyle {
    /// (foreground, background) of the window
    pub fn colors(self) -> (Color, Color) {
        match self {
            WindowStyle::Message => (Color::White, Color::Blue),
            WindowStyle::Error => (Color::Yellow, Color::Red),
        }
    }
}

/// A message waiting for the acknowledge key
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notice {
    style: WindowStyle,
    lines: Vec<Line, MAX_NOTICE_LINES>,
}

impl Notice {
    /// Create an empty message window
    pub fn message() -> Self {
        Self {
            style: WindowStyle::Message,
            lines: Vec::new(),
        }
    }

    /// Create an empty error window
    pub fn error() -> Self {
        Self {
            style: WindowStyle::Error,
            lines: Vec::new(),
        }
    }

    /// Append a line; lines past the window height are dropped
    pub fn line(mut self, args: fmt::Arguments<'_>) -> Self {
        let _ = self.lines.push(format_line(args));
        self
    }

    /// Append an empty line
    pub fn blank(self) -> Self {
        self.line(format_args!(""))
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Check whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}
