//! cncpanel Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the panel consumes. Board
//! support crates implement them on top of their chip HAL, SD-card
//! stack and RTC.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  cncpanel-core (session control loop)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cncpanel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  FAT volume   │       │  RTC / SysTick│
//! │  (SD card)    │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::FileStorage`] - Removable FAT volume with line-oriented files
//! - [`clock::Clock`] - Uptime seconds and optional calendar clock
//! - [`gpio::InputPin`] - Digital inputs (limit switches)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use clock::{CalendarTime, Clock, ClockError};
pub use gpio::{ActiveLevel, InputPin};
pub use storage::{DirEntry, FileStorage, StorageError, MAX_LFN_LEN};
