//! Raw key codes from the operator keypad

/// Key values reported by the keypad scanner
///
/// The 4x4 matrix carries digits, four letter keys and the `*`/`#`
/// keys. Touch layouts report the same codes for their regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    /// Up / increment
    A,
    /// Down / decrement
    B,
    /// Cancel / acknowledge
    C,
    /// Enter / confirm
    D,
    /// `*` key
    Star,
    /// `#` key
    Hash,
}

/// All key codes in scan order
pub const ALL_KEYS: [KeyCode; 16] = [
    KeyCode::Key0,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
    KeyCode::A,
    KeyCode::B,
    KeyCode::C,
    KeyCode::D,
    KeyCode::Star,
    KeyCode::Hash,
];

impl KeyCode {
    /// Parse a key from the scanner byte (the ASCII legend of the key)
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0'..=b'9' => Self::from_digit(byte - b'0'),
            b'A' | b'a' => Some(KeyCode::A),
            b'B' | b'b' => Some(KeyCode::B),
            b'C' | b'c' => Some(KeyCode::C),
            b'D' | b'd' => Some(KeyCode::D),
            b'*' => Some(KeyCode::Star),
            b'#' => Some(KeyCode::Hash),
            _ => None,
        }
    }

    /// Convert to the scanner byte
    pub fn to_byte(self) -> u8 {
        match self {
            KeyCode::A => b'A',
            KeyCode::B => b'B',
            KeyCode::C => b'C',
            KeyCode::D => b'D',
            KeyCode::Star => b'*',
            KeyCode::Hash => b'#',
            digit => b'0' + digit.digit().unwrap_or(0),
        }
    }

    /// Key for a decimal digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(KeyCode::Key0),
            1 => Some(KeyCode::Key1),
            2 => Some(KeyCode::Key2),
            3 => Some(KeyCode::Key3),
            4 => Some(KeyCode::Key4),
            5 => Some(KeyCode::Key5),
            6 => Some(KeyCode::Key6),
            7 => Some(KeyCode::Key7),
            8 => Some(KeyCode::Key8),
            9 => Some(KeyCode::Key9),
            _ => None,
        }
    }

    /// Decimal value of a digit key
    pub fn digit(self) -> Option<u8> {
        match self {
            KeyCode::Key0 => Some(0),
            KeyCode::Key1 => Some(1),
            KeyCode::Key2 => Some(2),
            KeyCode::Key3 => Some(3),
            KeyCode::Key4 => Some(4),
            KeyCode::Key5 => Some(5),
            KeyCode::Key6 => Some(6),
            KeyCode::Key7 => Some(7),
            KeyCode::Key8 => Some(8),
            KeyCode::Key9 => Some(9),
            _ => None,
        }
    }

    /// Returns true for the digit keys
    pub fn is_digit(&self) -> bool {
        self.digit().is_some()
    }

    /// Returns true for the letter and symbol keys
    pub fn is_function(&self) -> bool {
        !self.is_digit()
    }
}
