//! Session errors

use cncpanel_display::DisplayError;
use cncpanel_hal::{ClockError, StorageError};

use crate::config::ConfigError;

/// Errors surfaced by the session control loop
///
/// None of these stop the loop. Storage faults become a blocking notice,
/// the rest are logged and absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Mount, directory, open, create or delete failed
    StorageFault(StorageError),
    /// Tuning file ended before every record was read
    ParseShort,
    /// A remembered entry was not present after a reload
    NotFound,
    /// Real-time clock rejected a read or write
    Clock(ClockError),
    /// Display backend failed
    Display(DisplayError),
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::StorageFault(e)
    }
}

impl From<ClockError> for SessionError {
    fn from(e: ClockError) -> Self {
        SessionError::Clock(e)
    }
}

impl From<DisplayError> for SessionError {
    fn from(e: DisplayError) -> Self {
        SessionError::Display(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Storage(e) => SessionError::StorageFault(e),
            ConfigError::NotFound => SessionError::NotFound,
        }
    }
}
