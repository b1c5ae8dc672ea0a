//! Screen composition
//!
//! Everything the session draws goes through [`PanelDisplay`], which is
//! implemented for every [`cncpanel_display::DisplayBackend`].

pub mod layout;
pub mod notice;
pub mod screens;
pub mod text;

pub use notice::{Notice, WindowStyle};
pub use screens::PanelDisplay;
pub use text::{format_line, Line};
