//! Key map
//!
//! One table per session state. A key that has no entry in the active
//! table, or whose feature the board lacks, produces nothing.

use cncpanel_protocol::touch::{ACKNOWLEDGE, FILE_BROWSER, QUESTION};
use cncpanel_protocol::{KeyCode, TouchLayout};

use crate::config::PanelCapabilities;
use crate::session::SessionState;

use super::command::Command;

/// Maps raw keys to commands for the board's capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap {
    caps: PanelCapabilities,
}

impl KeyMap {
    /// Create a new key map
    pub fn new(caps: &PanelCapabilities) -> Self {
        Self { caps: *caps }
    }

    /// Resolve a key in the given state
    pub fn command(&self, state: SessionState, key: KeyCode) -> Option<Command> {
        use Command::*;
        use KeyCode as K;

        let command = match (state, key) {
            (SessionState::Browsing, K::A) => MoveUp,
            (SessionState::Browsing, K::B) => MoveDown,
            (SessionState::Browsing, K::Star) => PageDown,
            (SessionState::Browsing, K::Hash) => PageUp,
            (SessionState::Browsing, K::Key0) => Launch,
            (SessionState::Browsing, K::Key1) => ManualMode,
            (SessionState::Browsing, K::Key2) => Preview,
            (SessionState::Browsing, K::Key3) => Delete,
            (SessionState::Browsing, K::Key4) => EditTime,
            (SessionState::Browsing, K::Key5) => Info,
            (SessionState::Browsing, K::Key7) => SaveConfig,

            (SessionState::ConfirmDelete, K::D) => Confirm,
            (SessionState::ConfirmDelete, K::C) => Cancel,

            (SessionState::EditTime, K::A) => Increment,
            (SessionState::EditTime, K::B) => Decrement,
            (SessionState::EditTime, K::Star) => PreviousField,
            (SessionState::EditTime, K::Hash) => NextField,
            (SessionState::EditTime, K::D) => Confirm,
            (SessionState::EditTime, K::C) => Cancel,

            (SessionState::ShowInfo, K::B) => ScrollInfo,
            (SessionState::ShowInfo, K::C) => Acknowledge,

            (SessionState::Notice, K::C) => Acknowledge,

            (SessionState::Executing, K::C) => Cancel,

            _ => return None,
        };

        self.is_available(command).then_some(command)
    }

    /// Check whether the board supports a command
    pub fn is_available(&self, command: Command) -> bool {
        match command {
            // Touch layouts have no page buttons
            Command::PageUp | Command::PageDown => !self.caps.is_touch(),
            Command::EditTime => self.caps.has_clock,
            Command::Launch
            | Command::Preview
            | Command::Delete
            | Command::Info
            | Command::SaveConfig => self.caps.has_storage,
            _ => true,
        }
    }

    /// On-screen buttons for a state, `None` on matrix keypads
    pub fn touch_layout(&self, state: SessionState) -> Option<TouchLayout> {
        if !self.caps.is_touch() {
            return None;
        }
        Some(match state {
            SessionState::Browsing => FILE_BROWSER,
            SessionState::ConfirmDelete => QUESTION,
            SessionState::EditTime
            | SessionState::ShowInfo
            | SessionState::Executing
            | SessionState::Notice => ACKNOWLEDGE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeypadStyle;
    use cncpanel_protocol::keys::ALL_KEYS;

    fn full_caps() -> PanelCapabilities {
        PanelCapabilities {
            has_clock: true,
            has_storage: true,
            has_spindle_sensor: true,
            keypad: KeypadStyle::Matrix,
        }
    }

    #[test]
    fn test_browsing_keys() {
        let map = KeyMap::new(&full_caps());
        let s = SessionState::Browsing;
        assert_eq!(map.command(s, KeyCode::A), Some(Command::MoveUp));
        assert_eq!(map.command(s, KeyCode::B), Some(Command::MoveDown));
        assert_eq!(map.command(s, KeyCode::Star), Some(Command::PageDown));
        assert_eq!(map.command(s, KeyCode::Hash), Some(Command::PageUp));
        assert_eq!(map.command(s, KeyCode::Key0), Some(Command::Launch));
        assert_eq!(map.command(s, KeyCode::Key5), Some(Command::Info));
        assert_eq!(map.command(s, KeyCode::Key7), Some(Command::SaveConfig));
        assert_eq!(map.command(s, KeyCode::Key6), None);
        assert_eq!(map.command(s, KeyCode::D), None);
    }

    #[test]
    fn test_keys_ignored_outside_their_state() {
        let map = KeyMap::new(&full_caps());
        assert_eq!(map.command(SessionState::Executing, KeyCode::A), None);
        assert_eq!(map.command(SessionState::ConfirmDelete, KeyCode::Key0), None);
        assert_eq!(map.command(SessionState::Notice, KeyCode::D), None);
        assert_eq!(
            map.command(SessionState::ShowInfo, KeyCode::B),
            Some(Command::ScrollInfo)
        );
    }

    #[test]
    fn test_capabilities_gate_commands() {
        let caps = PanelCapabilities {
            has_clock: false,
            has_storage: false,
            ..full_caps()
        };
        let map = KeyMap::new(&caps);
        let s = SessionState::Browsing;
        assert_eq!(map.command(s, KeyCode::Key4), None);
        assert_eq!(map.command(s, KeyCode::Key0), None);
        assert_eq!(map.command(s, KeyCode::Key3), None);
        assert_eq!(map.command(s, KeyCode::Key1), Some(Command::ManualMode));
        assert_eq!(map.command(s, KeyCode::A), Some(Command::MoveUp));
    }

    #[test]
    fn test_touch_board() {
        let caps = PanelCapabilities {
            keypad: KeypadStyle::Touch,
            ..full_caps()
        };
        let map = KeyMap::new(&caps);
        assert_eq!(map.command(SessionState::Browsing, KeyCode::Star), None);
        assert_eq!(
            map.touch_layout(SessionState::Browsing),
            Some(FILE_BROWSER)
        );
        assert_eq!(
            map.touch_layout(SessionState::ConfirmDelete),
            Some(QUESTION)
        );
        assert_eq!(map.touch_layout(SessionState::Notice), Some(ACKNOWLEDGE));
        assert_eq!(KeyMap::new(&full_caps()).touch_layout(SessionState::Browsing), None);
    }

    #[test]
    fn test_touch_buttons_map_to_commands() {
        let caps = PanelCapabilities {
            keypad: KeypadStyle::Touch,
            ..full_caps()
        };
        let map = KeyMap::new(&caps);
        for state in [SessionState::Browsing, SessionState::ConfirmDelete] {
            let layout = map.touch_layout(state).unwrap();
            for key in layout.keys() {
                assert!(map.command(state, key.key).is_some());
            }
        }
    }

    #[test]
    fn test_blocking_states_accept_few_keys() {
        let map = KeyMap::new(&full_caps());
        let mapped = |state| {
            ALL_KEYS
                .iter()
                .filter(|&&k| map.command(state, k).is_some())
                .count()
        };
        assert_eq!(mapped(SessionState::Notice), 1);
        assert_eq!(mapped(SessionState::Executing), 1);
        assert_eq!(mapped(SessionState::ConfirmDelete), 2);
        assert_eq!(mapped(SessionState::ShowInfo), 2);
        assert_eq!(mapped(SessionState::EditTime), 6);
        assert_eq!(mapped(SessionState::Browsing), 11);
    }
}
