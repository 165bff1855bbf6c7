//! Protocol codec
//!
//! Encoding of requests and validation of response frames.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Result, TvError};

use super::response::{Frame, FRAME_LEN, MARKER_RANGE, SUCCESS_MARKER};

/// Request line terminator
const TERMINATOR: u8 = b'\r';

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a code as a request line: code bytes + CR
pub fn encode_request(code: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(code.len() + 1);
    message.extend_from_slice(code.as_bytes());
    message.push(TERMINATOR);
    message
}

/// Write a request line to a stream
pub fn write_request<W: Write + ?Sized>(writer: &mut W, code: &str) -> Result<()> {
    writer.write_all(&encode_request(code))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Validate a raw response.
///
/// Anything other than exactly one 10-byte ASCII frame with `OK` at the
/// marker offset is a `ProtocolFailure`.
pub fn decode_response(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() != FRAME_LEN {
        return Err(TvError::ProtocolFailure(format!(
            "Incomplete frame: expected {} bytes, got {}",
            FRAME_LEN,
            bytes.len()
        )));
    }

    if !bytes.is_ascii() {
        return Err(TvError::ProtocolFailure(format!(
            "Non-ASCII frame: {:02x?}",
            bytes
        )));
    }

    if &bytes[MARKER_RANGE] != SUCCESS_MARKER {
        return Err(TvError::ProtocolFailure(format!(
            "Device rejected command: {:?}",
            String::from_utf8_lossy(bytes)
        )));
    }

    let text = String::from_utf8_lossy(bytes).into_owned();
    Ok(Frame::new_unchecked(text))
}

/// Read up to one frame from a stream.
///
/// Stops at `FRAME_LEN` bytes, end of stream, or the port's read timeout;
/// whatever arrived by then is returned for `decode_response` to judge.
pub fn read_frame<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let mut buf = [0u8; FRAME_LEN];
    let mut filled = 0;

    while filled < FRAME_LEN {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::TimedOut => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(buf[..filled].to_vec())
}
