//! Session state machine
//!
//! What the panel shows and which keys it accepts is a function of the
//! current state. Side effects (storage, motion, drawing) are carried out
//! by the panel; this table only decides where to go next.

use crate::input::Command;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// File list visible, menu keys live
    #[default]
    Browsing,
    /// Asking whether to delete the selected file
    ConfirmDelete,
    /// Clock editor open
    EditTime,
    /// File size and excerpt shown
    ShowInfo,
    /// Job running under supervision
    Executing,
    /// Message window waiting for acknowledgement
    Notice,
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Operator command from the key map
    Command(Command),
    /// The motion engine reported the job done
    JobEnded,
    /// A storage or device fault has to be shown
    Fault,
}

impl From<Command> for SessionEvent {
    fn from(command: Command) -> Self {
        SessionEvent::Command(command)
    }
}

impl SessionState {
    /// Check if this state blocks on the keypad instead of polling
    pub fn waits_for_key(&self) -> bool {
        matches!(
            self,
            SessionState::ConfirmDelete
                | SessionState::EditTime
                | SessionState::ShowInfo
                | SessionState::Notice
        )
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use Command as C;
        use SessionEvent::Command as Cmd;
        use SessionState::*;

        match (self, event) {
            // Faults always end up in a message window
            (_, SessionEvent::Fault) => Notice,

            // Browsing transitions
            (Browsing, Cmd(C::MoveUp | C::MoveDown | C::PageUp | C::PageDown)) => Browsing,
            (Browsing, Cmd(C::Launch)) => Executing,
            (Browsing, Cmd(C::Delete)) => ConfirmDelete,
            (Browsing, Cmd(C::Info)) => ShowInfo,
            (Browsing, Cmd(C::EditTime)) => EditTime,
            (Browsing, Cmd(C::SaveConfig | C::Preview)) => Notice,
            (Browsing, Cmd(C::ManualMode)) => Browsing,

            // ConfirmDelete transitions
            (ConfirmDelete, Cmd(C::Confirm | C::Cancel)) => Browsing,

            // EditTime transitions
            (
                EditTime,
                Cmd(C::Increment | C::Decrement | C::PreviousField | C::NextField),
            ) => EditTime,
            (EditTime, Cmd(C::Confirm | C::Cancel)) => Browsing,

            // ShowInfo transitions
            (ShowInfo, Cmd(C::ScrollInfo)) => ShowInfo,
            (ShowInfo, Cmd(C::Acknowledge)) => Browsing,

            // Executing transitions
            (Executing, Cmd(C::Cancel)) => Notice,
            (Executing, SessionEvent::JobEnded) => Notice,

            // Notice transitions
            (Notice, Cmd(C::Acknowledge)) => Browsing,

            // Default: stay in current state
            _ => self,
        }
    }
}
