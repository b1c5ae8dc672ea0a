//! Display and keypad abstraction for the cncpanel front panel
//!
//! This crate provides:
//! - `DisplayBackend` trait for the character-mode LCD (text cells with
//!   foreground/background colors plus filled rectangles)
//! - `Keypad` trait for the matrix keypad or touch panel
//! - `TextScreen`, an in-memory backend for host builds and simulators
//!
//! # Architecture
//!
//! The panel logic renders through these traits only. A board crate
//! implements `DisplayBackend` on top of its LCD controller driver and
//! font rasterizer, and `Keypad` on top of its key scanner or touch
//! controller.
//!
//! ## Supported Display Types
//!
//! - **320x240 TFT panels** (ILI9320 class) with an 8x16 font, giving a
//!   40x15 character grid.
//! - **Host framebuffers** through [`TextScreen`].

#![no_std]

pub mod backend;
pub mod input;
pub mod screen;

// Re-export key types
pub use backend::{Color, DisplayBackend, DisplayError};
pub use input::Keypad;
pub use screen::{TextScreen, CHAR_HEIGHT, CHAR_WIDTH, SCREEN_COLS, SCREEN_ROWS};
