//! Logical operator commands

/// Commands produced by the key map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    // File browser
    /// Select the previous entry
    MoveUp,
    /// Select the next entry
    MoveDown,
    /// Jump one window back
    PageUp,
    /// Jump one window forward
    PageDown,
    /// Run the selected job
    Launch,
    /// Enter jog mode
    ManualMode,
    /// Draw the selected job without moving
    Preview,
    /// Ask to delete the selected file
    Delete,
    /// Open the clock editor
    EditTime,
    /// Show size and first lines of the selected file
    Info,
    /// Write the tuning file
    SaveConfig,

    // Questions and editors
    /// Accept (delete, new time)
    Confirm,
    /// Decline, discard or abort a running job
    Cancel,

    // Clock editor
    /// Raise the highlighted field
    Increment,
    /// Lower the highlighted field
    Decrement,
    /// Highlight the field to the left
    PreviousField,
    /// Highlight the field to the right
    NextField,

    // File info
    /// Show the next lines
    ScrollInfo,

    /// Dismiss the current window
    Acknowledge,
}

impl Command {
    /// Check whether the command acts on the selected file
    pub fn needs_selection(&self) -> bool {
        matches!(
            self,
            Command::Launch | Command::Preview | Command::Delete | Command::Info
        )
    }
}
