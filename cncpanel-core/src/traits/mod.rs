//! Device traits
//!
//! These traits define the interface between the session control loop
//! and subsystems that live outside this crate. Storage, clock, display
//! and keypad traits come from the HAL and display crates.

pub mod motion;
pub mod sensors;

pub use motion::{MotionEngine, MotionError, RunMode};
pub use sensors::{LimitMask, PanelSensors, SensorError, StatusSensors, TemperatureSensor};
