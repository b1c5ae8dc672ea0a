//! Session control loop
//!
//! [`Session`] owns everything the panel remembers between iterations.
//! [`Panel`] pairs it with the peripherals and runs the loop.

pub mod context;
pub mod job;
pub mod panel;
pub mod state;
pub mod time_editor;

pub use context::{AfterNotice, Session};
pub use job::{ActiveJob, JobOutcome, JobSummary};
pub use panel::{Panel, Peripherals};
pub use state::{SessionEvent, SessionState};
pub use time_editor::{TimeEditor, TimeField};
