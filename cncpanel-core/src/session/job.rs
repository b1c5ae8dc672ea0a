//! Job bookkeeping

use crate::catalog::EntryName;

/// How a supervised job ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobOutcome {
    /// Engine ran out of moves
    Completed,
    /// Operator stopped it
    Cancelled,
}

/// Job currently running
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveJob {
    pub name: EntryName,
    /// Clock second at launch
    pub started_at: u32,
}

impl ActiveJob {
    /// Create a new job record
    pub fn new(name: EntryName, started_at: u32) -> Self {
        Self { name, started_at }
    }

    /// Close the record at clock second `now`
    pub fn finish(self, now: u32, outcome: JobOutcome) -> JobSummary {
        JobSummary {
            name: self.name,
            outcome,
            elapsed_seconds: now.wrapping_sub(self.started_at),
        }
    }
}

/// Record of the last finished job
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobSummary {
    pub name: EntryName,
    pub outcome: JobOutcome,
    pub elapsed_seconds: u32,
}

impl JobSummary {
    pub fn was_cancelled(&self) -> bool {
        self.outcome == JobOutcome::Cancelled
    }
}
