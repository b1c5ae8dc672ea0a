//! Touch-screen key regions
//!
//! Boards with a touch panel instead of a keypad draw a row of buttons
//! and translate touches inside them into ordinary [`KeyCode`]s.
//! Coordinates are in display pixels on a 320x240 panel, corners
//! inclusive.

use crate::keys::KeyCode;

/// Maximum keys in a single layout
pub const MAX_TOUCH_KEYS: usize = 8;

/// A rectangular touch region that reports a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchKey {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    /// Key reported when the region is touched
    pub key: KeyCode,
    /// Legend drawn inside the region
    pub label: &'static str,
}

impl TouchKey {
    /// Create a touch region
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16, key: KeyCode, label: &'static str) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            key,
            label,
        }
    }

    /// Check whether a touch point falls inside this region
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Region width in pixels
    pub fn width(&self) -> u16 {
        self.x1.saturating_sub(self.x0) + 1
    }

    /// Region height in pixels
    pub fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0) + 1
    }
}

/// A set of touch regions active at the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchLayout {
    keys: &'static [TouchKey],
}

impl TouchLayout {
    /// Create a layout from a static key table
    pub const fn new(keys: &'static [TouchKey]) -> Self {
        Self { keys }
    }

    /// Keys in this layout
    pub fn keys(&self) -> &'static [TouchKey] {
        self.keys
    }

    /// Resolve a touch point to a key
    ///
    /// The first matching region wins when regions overlap.
    pub fn hit(&self, x: u16, y: u16) -> Option<KeyCode> {
        self.keys.iter().find(|k| k.contains(x, y)).map(|k| k.key)
    }
}

const FILE_BROWSER_KEYS: [TouchKey; 4] = [
    TouchKey::new(0, 145, 76, 216, KeyCode::B, "DOWN"),
    TouchKey::new(84, 145, 156, 216, KeyCode::A, "UP"),
    TouchKey::new(164, 145, 236, 216, KeyCode::Key5, "INFO"),
    TouchKey::new(244, 145, 319, 216, KeyCode::Key0, "START"),
];

const QUESTION_KEYS: [TouchKey; 2] = [
    TouchKey::new(16, 145, 100, 216, KeyCode::D, "YES"),
    TouchKey::new(104, 145, 188, 216, KeyCode::C, "NO"),
];

const ACKNOWLEDGE_KEYS: [TouchKey; 1] = [TouchKey::new(0, 208, 319, 239, KeyCode::C, "Press C")];

/// Layout shown under the file list
pub const FILE_BROWSER: TouchLayout = TouchLayout::new(&FILE_BROWSER_KEYS);

/// Yes / no question layout
pub const QUESTION: TouchLayout = TouchLayout::new(&QUESTION_KEYS);

/// Full-width strip on the last two text lines
pub const ACKNOWLEDGE: TouchLayout = TouchLayout::new(&ACKNOWLEDGE_KEYS);
