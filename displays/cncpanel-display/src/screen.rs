//! Character screen buffer
//!
//! Provides an in-memory character grid that implements
//! [`DisplayBackend`]. Host simulators render it to a terminal; tests
//! read it back to check what the panel drew.

use heapless::Vec;

use crate::backend::{Color, DisplayBackend, DisplayError};

/// Number of character rows on the 320x240 panel
pub const SCREEN_ROWS: usize = 15;

/// Number of character columns on the 320x240 panel
pub const SCREEN_COLS: usize = 40;

/// Font cell width in pixels
pub const CHAR_WIDTH: u16 = 8;

/// Font cell height in pixels
pub const CHAR_HEIGHT: u16 = 16;

/// Maximum remembered filled rectangles
pub const MAX_RECTS: usize = 8;

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilledRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub color: Color,
}

/// Screen buffer for the character-mode panel
#[derive(Clone)]
pub struct TextScreen {
    /// ASCII characters, space when empty
    chars: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// (foreground, background) per cell
    colors: [[(Color, Color); SCREEN_COLS]; SCREEN_ROWS],
    /// Latest fill per rectangle origin
    rects: Vec<FilledRect, MAX_RECTS>,
    /// Number of full clears since creation
    clears: u32,
    /// Whether the screen changed since the last flush
    dirty: bool,
}

impl Default for TextScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TextScreen {
    /// Create a new blank screen
    pub fn new() -> Self {
        Self {
            chars: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            colors: [[(Color::White, Color::Black); SCREEN_COLS]; SCREEN_ROWS],
            rects: Vec::new(),
            clears: 0,
            dirty: true,
        }
    }

    /// Text of a row, trailing spaces included
    ///
    /// Non-ASCII characters are stored as `?`.
    pub fn row_text(&self, row: usize) -> &str {
        self.chars
            .get(row)
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }

    /// Check if any row contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        (0..SCREEN_ROWS).any(|row| self.row_text(row).contains(needle))
    }

    /// Find the first row containing `needle`
    pub fn find_row(&self, needle: &str) -> Option<usize> {
        (0..SCREEN_ROWS).find(|&row| self.row_text(row).contains(needle))
    }

    /// Foreground color of a cell
    pub fn foreground_at(&self, col: usize, row: usize) -> Option<Color> {
        self.colors.get(row).and_then(|r| r.get(col)).map(|c| c.0)
    }

    /// Background color of a cell
    pub fn background_at(&self, col: usize, row: usize) -> Option<Color> {
        self.colors.get(row).and_then(|r| r.get(col)).map(|c| c.1)
    }

    /// Latest fill at a given origin
    pub fn rect_at(&self, x: u16, y: u16) -> Option<FilledRect> {
        self.rects.iter().find(|r| r.x == x && r.y == y).copied()
    }

    /// Number of full clears
    pub fn clear_count(&self) -> u32 {
        self.clears
    }

    /// Check if the screen changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl DisplayBackend for TextScreen {
    fn clear(&mut self, background: Color) -> Result<(), DisplayError> {
        self.chars = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.colors = [[(Color::White, background); SCREEN_COLS]; SCREEN_ROWS];
        self.rects.clear();
        self.clears = self.clears.wrapping_add(1);
        self.dirty = true;
        Ok(())
    }

    fn draw_text(
        &mut self,
        col: u8,
        row: u8,
        text: &str,
        foreground: Color,
        background: Color,
    ) -> Result<(), DisplayError> {
        let row = row as usize;
        let col = col as usize;
        if row >= SCREEN_ROWS || col >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        for (offset, ch) in text.chars().take(SCREEN_COLS - col).enumerate() {
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.chars[row][col + offset] = byte;
            self.colors[row][col + offset] = (foreground, background);
        }
        self.dirty = true;
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let max_x = SCREEN_COLS as u16 * CHAR_WIDTH;
        let max_y = SCREEN_ROWS as u16 * CHAR_HEIGHT;
        if x >= max_x || y >= max_y {
            return Err(DisplayError::InvalidCoordinates);
        }

        let rect = FilledRect {
            x,
            y,
            width,
            height,
            color,
        };
        if let Some(existing) = self.rects.iter_mut().find(|r| r.x == x && r.y == y) {
            *existing = rect;
        } else {
            if self.rects.is_full() {
                self.rects.remove(0);
            }
            let _ = self.rects.push(rect);
        }
        self.dirty = true;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextScreen[");
        for row in 0..SCREEN_ROWS {
            if row > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.row_text(row).trim_end());
        }
        defmt::write!(f, "]");
    }
}
