//! Configuration
//!
//! Two kinds of configuration live here:
//!
//! - The board description ([`board`]), fixed when the firmware is built
//! - The motion tuning parameters ([`tuning`]), kept as a text file on
//!   the storage medium by [`store`]

pub mod board;
pub mod store;
pub mod tuning;

pub use board::{KeypadStyle, PanelCapabilities, PanelConfig};
pub use store::{ConfigError, LoadedConfig, CONFIG_FILE_NAME};
pub use tuning::{AxisTuning, MotionTuningParameters, AXIS_COUNT, K_FRQ};
