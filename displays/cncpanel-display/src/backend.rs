//! Display backend trait
//!
//! Defines the interface for the panel LCD.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Panel colors
///
/// Backends map these onto their native pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Gray,
}

impl Color {
    /// RGB565 value used by TFT controllers
    pub const fn rgb565(self) -> u16 {
        match self {
            Color::Black => 0x0000,
            Color::White => 0xFFFF,
            Color::Red => 0xF800,
            Color::Green => 0x07E0,
            Color::Blue => 0x001F,
            Color::Yellow => 0xFFE0,
            Color::Cyan => 0x07FF,
            Color::Gray => 0x8430,
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for the character-mode panel.
/// Text coordinates are in character cells, rectangles in pixels.
pub trait DisplayBackend {
    /// Fill the whole display with a color
    fn clear(&mut self, background: Color) -> Result<(), DisplayError>;

    /// Draw text starting at a character cell
    ///
    /// - `col`: Column in characters (0-based)
    /// - `row`: Row in characters (0-based)
    /// - `text`: Text to display; clipped at the right edge
    fn draw_text(
        &mut self,
        col: u8,
        row: u8,
        text: &str,
        foreground: Color,
        background: Color,
    ) -> Result<(), DisplayError>;

    /// Fill a rectangle given in pixels
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Flush buffered content to the display
    ///
    /// Unbuffered controllers draw immediately and need not override this.
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_primaries() {
        assert_eq!(Color::Red.rgb565() & Color::Green.rgb565(), 0);
        assert_eq!(Color::Green.rgb565() & Color::Blue.rgb565(), 0);
        assert_eq!(
            Color::Red.rgb565() | Color::Green.rgb565() | Color::Blue.rgb565(),
            Color::White.rgb565()
        );
    }
}
