//! Operator input source

use cncpanel_protocol::{KeyCode, TouchLayout};

/// Trait for the operator keypad
///
/// Implemented by matrix keypad scanners and touch controllers alike;
/// touch boards resolve touches through the active [`TouchLayout`].
pub trait Keypad {
    /// Return the next pending key without waiting
    fn poll_key(&mut self) -> Option<KeyCode>;

    /// Wait until a key is pressed
    ///
    /// The default spins on [`Keypad::poll_key`]. Boards with a key
    /// interrupt can sleep instead.
    fn wait_key(&mut self) -> KeyCode {
        loop {
            if let Some(key) = self.poll_key() {
                return key;
            }
            core::hint::spin_loop();
        }
    }

    /// Install the touch regions for the current screen
    ///
    /// Keypad-only boards ignore this.
    fn set_touch_layout(&mut self, layout: TouchLayout) {
        let _ = layout;
    }

    /// Discard keys pressed while the panel was busy
    fn flush_keys(&mut self) {
        while self.poll_key().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Queue {
        keys: [Option<KeyCode>; 4],
        pos: usize,
    }

    impl Keypad for Queue {
        fn poll_key(&mut self) -> Option<KeyCode> {
            let key = self.keys.get(self.pos).copied().flatten();
            self.pos += 1;
            key
        }
    }

    #[test]
    fn test_wait_key_skips_empty_polls() {
        let mut keypad = Queue {
            keys: [None, None, Some(KeyCode::D), None],
            pos: 0,
        };
        assert_eq!(keypad.wait_key(), KeyCode::D);
        assert_eq!(keypad.pos, 3);
    }

    #[test]
    fn test_flush_keys_drains_queue() {
        let mut keypad = Queue {
            keys: [Some(KeyCode::A), Some(KeyCode::B), None, Some(KeyCode::C)],
            pos: 0,
        };
        keypad.flush_keys();
        assert_eq!(keypad.pos, 3);
        assert_eq!(keypad.poll_key(), Some(KeyCode::C));
    }
}
