//! Code arithmetic
//!
//! Pure transformations deriving status, step and toggle codes. Device state
//! is always passed in; nothing here touches the serial line.

use crate::error::{Result, TvError};

/// Width of the trailing payload field
pub const PAYLOAD_LEN: usize = 2;

/// Payload that asks the device to report instead of set
pub const STATUS_PAYLOAD: &str = "ff";

/// Split point between prefix and payload. Codes are ASCII; a code too short
/// (or not split on a char boundary) has an empty payload.
fn split_at_payload(code: &str) -> usize {
    let at = code.len().saturating_sub(PAYLOAD_LEN);
    if code.is_char_boundary(at) {
        at
    } else {
        code.len()
    }
}

/// The command family part of a code (everything but the payload)
pub fn prefix(code: &str) -> &str {
    &code[..split_at_payload(code)]
}

/// The trailing 2-character payload of a code
pub fn payload(code: &str) -> &str {
    &code[split_at_payload(code)..]
}

/// Whether two codes address the same setting.
///
/// Deliberately stricter than comparing the first 6 characters: everything
/// but the payload must match. `3Dnone` (`xt 00 01 00 00 00`) and `3Dsbs`
/// (`xt 00 00 01 00 00`) share `xt 00 ` yet differ outside the payload, and a
/// toggle between them could never read its state back from one payload.
pub fn same_family(a: &str, b: &str) -> bool {
    prefix(a) == prefix(b)
}

/// Replace the payload with the status sentinel
pub fn status_code(code: &str) -> String {
    format!("{}{}", prefix(code), STATUS_PAYLOAD)
}

/// Step a 2-hex-digit `state` by `delta` and put it on `code`'s prefix.
///
/// Results are clamped to `00..=ff`: stepping past either end of the byte
/// leaves the value at the boundary.
pub fn delta_code(code: &str, state: &str, delta: i16) -> Result<String> {
    let state = state.trim();
    let current = u8::from_str_radix(state, 16).map_err(|_| {
        TvError::ProtocolFailure(format!("device reported non-hex level {:?}", state))
    })?;

    let next = (i16::from(current) + delta).clamp(0, i16::from(u8::MAX));

    Ok(format!("{}{:02x}", prefix(code), next))
}

/// Pick the code that moves the device away from its observed state.
///
/// If the device reports `first`'s payload, switch to `second`; in every
/// other case (including no report at all) switch to `first`.
pub fn toggle_code(observed: Option<&str>, first: &str, second: &str) -> String {
    let on_first = observed
        .map(|state| state.trim().eq_ignore_ascii_case(payload(first)))
        .unwrap_or(false);

    if on_first {
        second.to_string()
    } else {
        first.to_string()
    }
}
