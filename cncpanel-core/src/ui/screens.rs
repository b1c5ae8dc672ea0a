//! Panel screens
//!
//! Drawing helpers layered on the display backend. Each helper owns a
//! fixed region of the screen (see [`super::layout`]) and overwrites it
//! completely, so helpers can be called in any order.

use cncpanel_display::{
    Color, DisplayBackend, DisplayError, CHAR_HEIGHT, CHAR_WIDTH, SCREEN_COLS,
};
use cncpanel_protocol::TouchLayout;

use crate::catalog::{Catalog, WINDOW_ROWS};
use crate::session::time_editor::{TimeEditor, TimeField};
use crate::status::StatusLine;
use crate::traits::LimitMask;

use super::layout::*;
use super::notice::{Notice, WindowStyle};
use super::text::{format_line, padded, Line};

const MENU_LEGEND: [&str; 4] = [
    "0 - start gcode   1 - manual mode",
    "2 - show gcode    3 - delete file",
    "4 - set time      5 - file info",
    "7 - save conf.file",
];

/// Helper trait for drawing the panel screens
pub trait PanelDisplay: DisplayBackend {
    /// Draw a whole row in one color pair
    fn draw_row(&mut self, row: u8, text: &str, fg: Color, bg: Color) -> Result<(), DisplayError> {
        self.draw_text(0, row, &padded(text, SCREEN_COLS), fg, bg)
    }

    /// Draw the file list window and its scroll bar
    fn draw_file_list(&mut self, catalog: &Catalog) -> Result<(), DisplayError> {
        let mut drawn = 0usize;
        for row in catalog.visible_rows() {
            let (fg, bg) = if row.is_selected {
                (Color::Black, Color::White)
            } else {
                (Color::White, Color::Black)
            };
            let line = padded(row.entry.name(), LIST_WIDTH);
            self.draw_text(0, LIST_TOP + drawn as u8, &line, fg, bg)?;
            drawn += 1;
        }

        for row in drawn..WINDOW_ROWS {
            let text = if catalog.is_empty() && row == 0 {
                "(no files)"
            } else {
                ""
            };
            let line = padded(text, LIST_WIDTH);
            self.draw_text(0, LIST_TOP + row as u8, &line, Color::Gray, Color::Black)?;
        }

        self.draw_scrollbar(catalog)
    }

    /// Draw the scroll bar next to the file list
    fn draw_scrollbar(&mut self, catalog: &Catalog) -> Result<(), DisplayError> {
        let thumb = scrollbar_thumb(catalog.len(), catalog.window_start());
        for row in 0..WINDOW_ROWS {
            let (text, color) = match thumb {
                Some((start, end)) if row >= start && row < end => ("#", Color::White),
                Some(_) => ("|", Color::Gray),
                None => (" ", Color::Black),
            };
            self.draw_text(SCROLLBAR_COL, LIST_TOP + row as u8, text, color, Color::Black)?;
        }
        Ok(())
    }

    /// Draw the key legend below the file list
    fn draw_menu_legend(&mut self) -> Result<(), DisplayError> {
        for (i, text) in MENU_LEGEND.iter().enumerate() {
            self.draw_row(MENU_TOP + i as u8, text, Color::Cyan, Color::Black)?;
        }
        Ok(())
    }

    /// Draw the labels of on-screen buttons
    fn draw_touch_buttons(&mut self, layout: &TouchLayout) -> Result<(), DisplayError> {
        for key in layout.keys() {
            self.fill_rect(key.x0, key.y0, key.width(), key.height(), Color::Gray)?;
            let cols = (key.width() / CHAR_WIDTH) as usize;
            let pad = cols.saturating_sub(key.label.len()) / 2;
            let col = (key.x0 / CHAR_WIDTH) as usize + pad;
            let row = key.y0 / CHAR_HEIGHT + 1;
            if col < SCREEN_COLS {
                self.draw_text(col as u8, row as u8, key.label, Color::Black, Color::Gray)?;
            }
        }
        Ok(())
    }

    /// Fill the window area with a style's background
    fn draw_window(&mut self, style: WindowStyle) -> Result<(), DisplayError> {
        let (fg, bg) = style.colors();
        for row in 0..WINDOW_ROWS_END {
            self.draw_row(row, "", fg, bg)?;
        }
        Ok(())
    }

    /// Draw a message window with its acknowledge prompt
    fn draw_notice(&mut self, notice: &Notice) -> Result<(), DisplayError> {
        let (fg, bg) = notice.style().colors();
        self.draw_window(notice.style())?;
        for (i, line) in notice.lines().iter().enumerate() {
            self.draw_text(2, 2 + i as u8, line, fg, bg)?;
        }
        self.draw_text(8, WINDOW_ROWS_END - 2, "PRESS C-KEY", fg, bg)
    }

    /// Draw the delete question
    fn draw_delete_question(&mut self, name: &str) -> Result<(), DisplayError> {
        let (fg, bg) = WindowStyle::Message.colors();
        self.draw_window(WindowStyle::Message)?;
        self.draw_text(2, 1, "Delete file:", fg, bg)?;
        self.draw_text(2, 2, &format_line(format_args!("'{}'?", name)), fg, bg)?;
        self.draw_text(5, 6, "'D' - OK,  'C' - Cancel", fg, bg)
    }

    /// Draw the info window header
    fn draw_info_header(&mut self, name: &str, size: u32) -> Result<(), DisplayError> {
        let (fg, bg) = WindowStyle::Message.colors();
        self.draw_window(WindowStyle::Message)?;
        self.draw_text(0, 0, &format_line(format_args!("File:{}", name)), fg, bg)?;
        self.draw_text(0, 1, &format_line(format_args!("Size:{}", size)), fg, bg)?;
        self.draw_text(8, INFO_TOP + INFO_LINES as u8, "PRESS C-KEY", fg, bg)
    }

    /// Draw a page of file excerpt, blanking rows past the end of file
    fn draw_info_lines(&mut self, lines: &[Line]) -> Result<(), DisplayError> {
        let (fg, bg) = WindowStyle::Message.colors();
        for i in 0..INFO_LINES {
            let text = lines.get(i).map(|l| l.as_str()).unwrap_or("");
            self.draw_text(0, INFO_TOP + i as u8, &padded(text, SCREEN_COLS), bg, fg)?;
        }
        Ok(())
    }

    /// Draw the clock editor
    fn draw_time_editor(&mut self, editor: &TimeEditor) -> Result<(), DisplayError> {
        let (fg, bg) = WindowStyle::Message.colors();
        self.draw_window(WindowStyle::Message)?;
        self.draw_text(0, 0, "D-ENTER C-CANCEL A-Up B-Down", fg, bg)?;
        self.draw_text(0, 1, "'*' -Left '#' -RIGHT", fg, bg)?;

        let t = editor.time();
        let line = format_line(format_args!(
            " New: {:02}.{:02}.{:02} {:02}:{:02}:{:02}",
            t.mday,
            t.month,
            t.short_year(),
            t.hour,
            t.min,
            t.sec
        ));
        self.draw_text(0, TIME_ROW, &line, fg, bg)?;

        let field = editor.field();
        let value = format_line(format_args!("{:02}", editor.value(field)));
        self.draw_text(field_column(field), TIME_ROW, &value, bg, fg)
    }

    /// Draw the remaining move count of a running job
    fn draw_progress(&mut self, remaining: u32) -> Result<(), DisplayError> {
        let line = format_line(format_args!(" remain moves: {}", remaining));
        self.draw_row(PROGRESS_ROW, &line, Color::Yellow, Color::Blue)
    }

    /// Draw the job summary
    fn draw_job_finished(&mut self, elapsed_seconds: u32, cancelled: bool) -> Result<(), DisplayError> {
        let first = if cancelled {
            "   STOPPED. PRESS C-KEY"
        } else {
            "   FINISH. PRESS C-KEY"
        };
        self.draw_row(FINISH_ROW, first, Color::Yellow, Color::Blue)?;
        let line = format_line(format_args!(
            "   work time: {:02}:{:02}",
            elapsed_seconds / 60,
            elapsed_seconds % 60
        ));
        self.draw_row(FINISH_ROW + 1, &line, Color::Yellow, Color::Blue)
    }

    /// Draw the status line
    fn draw_status(&mut self, status: &StatusLine) -> Result<(), DisplayError> {
        self.draw_text(STATUS_COL, STATUS_ROW, &status.clock, Color::White, Color::Black)?;
        if let Some(t) = &status.temperature {
            let col = STATUS_COL as usize + status.clock.len();
            if col < SCREEN_COLS {
                self.draw_text(col as u8, STATUS_ROW, &t.text, t.color, Color::Black)?;
            }
        }
        Ok(())
    }

    /// Draw the three limit switch indicators
    fn draw_limits(&mut self, limits: LimitMask) -> Result<(), DisplayError> {
        let (w, h) = LIMIT_RECT_SIZE;
        for (axis, &(x, y)) in LIMIT_RECTS.iter().enumerate() {
            let color = if limits.is_triggered(axis) {
                Color::Red
            } else {
                Color::Green
            };
            self.fill_rect(x, y, w, h, color)?;
        }
        Ok(())
    }
}

// Blanket implementation for all display backends
impl<T: DisplayBackend + ?Sized> PanelDisplay for T {}

/// Scroll bar thumb rows `[start, end)`, `None` when the list fits
fn scrollbar_thumb(len: usize, window_start: usize) -> Option<(usize, usize)> {
    if len <= WINDOW_ROWS {
        return None;
    }
    let size = (WINDOW_ROWS * WINDOW_ROWS / len).max(1);
    let start = (window_start * WINDOW_ROWS / len).min(WINDOW_ROWS - size);
    Some((start, start + size))
}

/// Screen column of a clock editor field
fn field_column(field: TimeField) -> u8 {
    TIME_COL + (field.position() * 3) as u8
}
