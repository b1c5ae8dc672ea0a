//! Board description
//!
//! Which optional peripherals a panel has, and where its files live.
//! Fixed per board; with the `board-toml` feature it can be read from a
//! TOML description such as:
//!
//! ```toml
//! root = "0:"
//! config_file = "sm.conf"
//!
//! [capabilities]
//! has_clock = true
//! has_storage = true
//! has_spindle_sensor = false
//! keypad = "touch"
//! ```

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::store::CONFIG_FILE_NAME;

/// Maximum length of the volume root path
pub const MAX_ROOT_LEN: usize = 16;

/// Maximum length of the tuning file name
pub const MAX_FILE_NAME_LEN: usize = 32;

/// Operator input hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeypadStyle {
    /// 4x4 matrix keypad with printed legends
    #[default]
    Matrix,
    /// Resistive touch screen with on-screen buttons
    Touch,
}

/// Optional peripherals present on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelCapabilities {
    /// Battery-backed calendar clock
    pub has_clock: bool,
    /// Removable storage with job files
    pub has_storage: bool,
    /// Spindle temperature probe
    pub has_spindle_sensor: bool,
    /// Input hardware
    pub keypad: KeypadStyle,
}

impl Default for PanelCapabilities {
    fn default() -> Self {
        Self {
            has_clock: false,
            has_storage: true,
            has_spindle_sensor: false,
            keypad: KeypadStyle::Matrix,
        }
    }
}

impl PanelCapabilities {
    /// Check whether input comes from on-screen buttons
    pub fn is_touch(&self) -> bool {
        self.keypad == KeypadStyle::Touch
    }
}

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardConfigError {
    /// TOML text did not parse or did not match the schema
    Parse,
    /// Root path is empty
    EmptyRoot,
    /// Tuning file name is empty or contains a path separator
    InvalidConfigFile,
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Peripherals present
    pub capabilities: PanelCapabilities,
    /// Volume root listed for job files
    pub root: String<MAX_ROOT_LEN>,
    /// Tuning file name, hidden from the catalog
    pub config_file: String<MAX_FILE_NAME_LEN>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let mut root = String::new();
        let _ = root.push_str("0:");
        let mut config_file = String::new();
        let _ = config_file.push_str(CONFIG_FILE_NAME);
        Self {
            capabilities: PanelCapabilities::default(),
            root,
            config_file,
        }
    }
}

impl PanelConfig {
    /// Create a configuration with default paths
    pub fn with_capabilities(capabilities: PanelCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Parse a TOML board description and validate it
    #[cfg(feature = "board-toml")]
    pub fn from_toml(text: &str) -> Result<Self, BoardConfigError> {
        let config: PanelConfig = toml::from_str(text).map_err(|_| BoardConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check paths for values the session cannot use
    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.root.is_empty() {
            return Err(BoardConfigError::EmptyRoot);
        }
        if self.config_file.is_empty() || self.config_file.contains(['/', '\\']) {
            return Err(BoardConfigError::InvalidConfigFile);
        }
        Ok(())
    }
}
