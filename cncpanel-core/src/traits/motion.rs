//! Motion engine trait

use cncpanel_hal::StorageError;

/// How the engine should treat a job file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    /// Drive the machine
    Execute,
    /// Draw the tool path without moving
    Preview,
    /// Parse the file and report errors only
    Validate,
}

/// Errors from starting a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Job file could not be opened
    Open(StorageError),
    /// A job is already running
    Busy,
}

impl From<StorageError> for MotionError {
    fn from(e: StorageError) -> Self {
        MotionError::Open(e)
    }
}

/// Trait for the stepper/G-code execution engine
///
/// The engine runs on its own (interrupts or another core); the panel
/// only starts it and polls it.
pub trait MotionEngine {
    /// Start a job
    ///
    /// For [`RunMode::Execute`] this returns once the job is queued and
    /// the engine reports progress through [`MotionEngine::is_in_progress`].
    /// [`RunMode::Preview`] and [`RunMode::Validate`] complete before
    /// returning.
    fn run_file(&mut self, name: &str, mode: RunMode) -> Result<(), MotionError>;

    /// Check whether the current job still has moves to make
    fn is_in_progress(&mut self) -> bool;

    /// Number of moves still queued
    fn remaining_count(&mut self) -> u32;

    /// Halt all axes and release the job
    ///
    /// Must be safe to call when nothing is running.
    fn stop(&mut self);

    /// Hand the keypad to the engine's jog mode until the operator leaves it
    fn manual_mode(&mut self) {}

    /// Report (and clear) a storage-medium change seen by the engine
    fn take_media_changed(&mut self) -> bool {
        false
    }
}
