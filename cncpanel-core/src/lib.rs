//! Board-agnostic core logic for the CNC front panel
//!
//! This crate contains all panel logic that does not depend on a
//! specific board:
//!
//! - Job file catalog with the scrolling selection window
//! - Tuning parameter file (load/save)
//! - Board description and capability set
//! - Session state machine and job supervision loop
//! - Status line reporter
//! - Key to command dispatch
//! - Device traits for the motion engine and status sensors

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod status;
pub mod traits;
pub mod ui;

#[cfg(test)]
pub(crate) mod mock;

pub use error::SessionError;
pub use session::{Panel, Peripherals, Session, SessionState};
