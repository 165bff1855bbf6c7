//! Response definitions
//!
//! A validated device frame and the value handed back to callers.

use std::fmt;

/// Size of every device response
pub const FRAME_LEN: usize = 10;

/// Marker the device puts at bytes 5..7 on success
pub const SUCCESS_MARKER: &[u8] = b"OK";

pub(crate) const MARKER_RANGE: std::ops::Range<usize> = 5..7;
pub(crate) const PAYLOAD_RANGE: std::ops::Range<usize> = 7..9;

/// A complete, successful response frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The 10 ASCII bytes as received
    text: String,
}

impl Frame {
    /// Callers go through `decode_response`, which checks length, ASCII and marker
    pub(crate) fn new_unchecked(text: String) -> Self {
        Self { text }
    }

    /// The 2-character data field
    pub fn payload(&self) -> &str {
        &self.text[PAYLOAD_RANGE]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Result of a successful `send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Status query answered with this payload
    Status(String),

    /// Action acknowledged
    Done,
}

impl Reply {
    pub fn payload(&self) -> Option<&str> {
        match self {
            Reply::Status(payload) => Some(payload),
            Reply::Done => None,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(payload) => f.write_str(payload),
            Reply::Done => f.write_str("true"),
        }
    }
}
