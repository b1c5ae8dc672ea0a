//! Screen regions of the 40x15 character panel

use cncpanel_display::SCREEN_COLS;

use crate::catalog::WINDOW_ROWS;

/// First row of the file list
pub const LIST_TOP: u8 = 0;

/// Columns used by file names; the last column holds the scroll bar
pub const LIST_WIDTH: usize = SCREEN_COLS - 2;

/// Scroll bar column
pub const SCROLLBAR_COL: u8 = (SCREEN_COLS - 1) as u8;

/// First row of the key legend
pub const MENU_TOP: u8 = LIST_TOP + WINDOW_ROWS as u8 + 1;

/// Job progress row
pub const PROGRESS_ROW: u8 = 12;

/// Job summary rows
pub const FINISH_ROW: u8 = 12;

/// Message window rows (everything above the status line)
pub const WINDOW_ROWS_END: u8 = 14;

/// Status line row
pub const STATUS_ROW: u8 = 14;

/// Status line start column
pub const STATUS_COL: u8 = 2;

/// Limit indicator origins (X, Y, Z) in pixels
pub const LIMIT_RECTS: [(u16, u16); 3] = [(283, 224), (296, 224), (309, 224)];

/// Limit indicator size in pixels
pub const LIMIT_RECT_SIZE: (u16, u16) = (11, 16);

/// Rows of file excerpt in the info window
pub const INFO_LINES: usize = 5;

/// First excerpt row in the info window
pub const INFO_TOP: u8 = 2;

/// Clock editor value row
pub const TIME_ROW: u8 = 4;

/// Column of the first clock editor field
pub const TIME_COL: u8 = 6;
