use std::fmt;

/// Partially typed hex pair for the hex entry modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexPair {
    high: Option<u8>,
}

impl HexPair {
    /// Feed one keystroke. Returns `Ok(Some(byte))` once the second digit
    /// arrives, `Ok(None)` while waiting for it, and `Err` for anything that
    /// is not a hex digit; the pending digit is kept in that case.
    pub fn push(&mut self, ch: char) -> Result<Option<u8>, char> {
        let nibble = ch.to_digit(16).ok_or(ch)? as u8;
        match self.high.take() {
            Some(high) => Ok(Some(high << 4 | nibble)),
            None => {
                self.high = Some(nibble);
                Ok(None)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.high.is_some()
    }
}

/// The current editing mode. Hex entry modes carry their half-typed pair,
/// line-input modes carry the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Append(HexPair),
    AppendAscii,
    Insert(HexPair),
    InsertAscii,
    Replace(HexPair),
    Command(String),
    Search(String),
}

impl Mode {
    pub fn insert() -> Self {
        Mode::Insert(HexPair::default())
    }

    pub fn append() -> Self {
        Mode::Append(HexPair::default())
    }

    pub fn replace() -> Self {
        Mode::Replace(HexPair::default())
    }

    /// Text of the command or search line being typed, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            Mode::Command(s) | Mode::Search(s) => Some(s),
            _ => None,
        }
    }

    /// Status line label shown while the mode is active.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal | Mode::Command(_) | Mode::Search(_) => "",
            Mode::Append(_) => "-- APPEND --",
            Mode::AppendAscii => "-- APPEND ASCII --",
            Mode::Insert(_) => "-- INSERT --",
            Mode::InsertAscii => "-- INSERT ASCII --",
            Mode::Replace(_) => "-- REPLACE --",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "NORMAL"),
            Mode::Append(_) => write!(f, "APPEND"),
            Mode::AppendAscii => write!(f, "APPEND ASCII"),
            Mode::Insert(_) => write!(f, "INSERT"),
            Mode::InsertAscii => write!(f, "INSERT ASCII"),
            Mode::Replace(_) => write!(f, "REPLACE"),
            Mode::Command(_) => write!(f, "COMMAND"),
            Mode::Search(_) => write!(f, "SEARCH"),
        }
    }
}
