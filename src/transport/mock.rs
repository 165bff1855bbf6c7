//! Mock display for deterministic testing without hardware.
//!
//! [`MockDevice`] behaves like a display on the other end of the cable: set
//! commands store their payload per command family and are acknowledged,
//! `ff` queries report the stored payload. Scripted replies override that
//! behaviour for a specific code (malformed frames, `NG`, silence).
//!
//! [`MockConnector`] hands out links to one shared device, so a test keeps a
//! clone and inspects what was written after the `Tv` is done with it.
//!
//! ```
//! use tvctl::transport::MockConnector;
//!
//! let mock = MockConnector::new();
//! mock.set_state("kf 00 ff", "0a");
//! assert_eq!(mock.connects(), 0);
//! ```

use std::collections::{HashMap, VecDeque};
use std::io::{self, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::codes::{payload, prefix, STATUS_PAYLOAD};
use crate::error::{Result, TvError};

use super::link::{Connector, Link};

/// Simulated display state shared by every link of one connector
#[derive(Debug, Default)]
pub struct MockDevice {
    /// Current payload per command family (code prefix)
    state: HashMap<String, String>,
    /// Fixed replies keyed by exact code
    scripted: HashMap<String, Vec<u8>>,
    /// Every request line received, without the terminator
    written: Vec<String>,
    /// Successful connects
    connects: usize,
    /// Connect attempts still to refuse
    refuse_connects: usize,
    /// Refuse every connect
    unplugged: bool,
}

impl MockDevice {
    /// Build the 10-byte frame a display sends for `code`
    fn answer(&mut self, code: &str) -> Vec<u8> {
        if let Some(reply) = self.scripted.get(code) {
            return reply.clone();
        }

        let family = prefix(code).to_string();
        let requested = payload(code);

        let (marker, data) = if requested.eq_ignore_ascii_case(STATUS_PAYLOAD) {
            match self.state.get(&family) {
                Some(current) => ("OK", current.clone()),
                None => ("NG", "00".to_string()),
            }
        } else {
            self.state.insert(family, requested.to_string());
            ("OK", requested.to_string())
        };

        Self::frame(code, marker, &data)
    }

    /// `<cmd2> <set id> <marker><data>x`
    fn frame(code: &str, marker: &str, data: &str) -> Vec<u8> {
        let mut fields = code.split_whitespace();
        let cmd2 = fields
            .next()
            .and_then(|cmd| cmd.chars().nth(1))
            .unwrap_or('?');
        let set_id = fields.next().unwrap_or("00");

        format!("{} {:0>2} {}{:0>2}x", cmd2, set_id, marker, data).into_bytes()
    }
}

/// Connector to a [`MockDevice`]
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    device: Arc<Mutex<MockDevice>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the value the device reports for `code`'s family
    pub fn set_state(&self, code: &str, value: &str) {
        self.device
            .lock()
            .state
            .insert(prefix(code).to_string(), value.to_string());
    }

    /// Current value for `code`'s family, if the device has one
    pub fn state(&self, code: &str) -> Option<String> {
        self.device.lock().state.get(prefix(code)).cloned()
    }

    /// Always answer `code` with `reply` (may be short, `NG`, or empty)
    pub fn respond(&self, code: &str, reply: &[u8]) {
        self.device
            .lock()
            .scripted
            .insert(code.to_string(), reply.to_vec());
    }

    /// Refuse the next `count` connect attempts
    pub fn refuse_connects(&self, count: usize) {
        self.device.lock().refuse_connects = count;
    }

    /// Refuse all connects until plugged back in
    pub fn set_unplugged(&self, unplugged: bool) {
        self.device.lock().unplugged = unplugged;
    }

    /// Request lines received so far
    pub fn written(&self) -> Vec<String> {
        self.device.lock().written.clone()
    }

    pub fn connects(&self) -> usize {
        self.device.lock().connects
    }
}

impl Connector for MockConnector {
    fn connect(&self) -> Result<Box<dyn Link>> {
        let mut device = self.device.lock();

        if device.unplugged {
            return Err(TvError::PortUnavailable("mock: unplugged".to_string()));
        }
        if device.refuse_connects > 0 {
            device.refuse_connects -= 1;
            return Err(TvError::PortUnavailable("mock: busy".to_string()));
        }

        device.connects += 1;
        Ok(Box::new(MockLink {
            device: Arc::clone(&self.device),
            line: Vec::new(),
            pending: VecDeque::new(),
        }))
    }

    fn endpoint(&self) -> String {
        "mock".to_string()
    }
}

/// One open link to the mock device
struct MockLink {
    device: Arc<Mutex<MockDevice>>,
    line: Vec<u8>,
    pending: VecDeque<u8>,
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            if byte == b'\r' {
                let code = String::from_utf8_lossy(&self.line).into_owned();
                self.line.clear();

                let mut device = self.device.lock();
                device.written.push(code.clone());
                let reply = device.answer(&code);
                self.pending.extend(reply);
            } else {
                self.line.push(byte);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "mock: no reply"));
        }

        let n = buf.len().min(self.pending.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
