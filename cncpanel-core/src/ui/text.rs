//! Fixed-width line formatting

use core::fmt::{self, Write};

use heapless::String;

use cncpanel_display::SCREEN_COLS;

/// One screen row of text
pub type Line = String<SCREEN_COLS>;

/// Writer that drops whatever does not fit on a row
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a row, cutting at the screen width
pub fn format_line(args: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    let _ = Truncating(&mut line).write_fmt(args);
    line
}

/// Copy `text` into a row padded with spaces to `width`
pub fn padded(text: &str, width: usize) -> Line {
    let width = width.min(SCREEN_COLS);
    let mut line = Line::new();
    for ch in text.chars().take(width) {
        let _ = line.push(ch);
    }
    while line.len() < width {
        let _ = line.push(' ');
    }
    line
}
