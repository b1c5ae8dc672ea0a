//! Front panel key protocol
//!
//! This crate defines the raw key codes produced by the operator panel
//! and the touch-screen layouts that emulate them.
//!
//! # Input sources
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │ 4x4 matrix keypad│      │ resistive touch  │
//! │  0-9 A-D * #     │      │  (x, y) samples  │
//! └────────┬─────────┘      └────────┬─────────┘
//!          │ scan byte               │ hit test against TouchKey regions
//!          ▼                         ▼
//!        ┌─────────────────────────────┐
//!        │          KeyCode            │
//!        └─────────────────────────────┘
//! ```
//!
//! Both sources end up as the same [`KeyCode`], so the panel logic never
//! needs to know which kind of keyboard a board carries.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod keys;
pub mod touch;

pub use keys::KeyCode;
pub use touch::{TouchKey, TouchLayout, MAX_TOUCH_KEYS};
