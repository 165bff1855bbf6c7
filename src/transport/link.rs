//! Serial link
//!
//! Opens the display's RS-232 port.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::config::Config;
use crate::error::{Result, TvError};

/// A duplex byte channel to the display
pub trait Link: Read + Write + Send {}

impl<T: Read + Write + Send + ?Sized> Link for T {}

/// Produces a fresh link on every call
pub trait Connector {
    /// Open the channel; `PortUnavailable` when the device is not there (yet)
    fn connect(&self) -> Result<Box<dyn Link>>;

    /// Human-readable endpoint for logs
    fn endpoint(&self) -> String;
}

/// Connector for a real serial port
#[derive(Debug, Clone)]
pub struct SerialConnector {
    port: String,
    baud_rate: u32,
    read_timeout: Duration,
}

impl SerialConnector {
    pub fn new(port: impl Into<String>, baud_rate: u32, read_timeout: Duration) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            read_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.port, config.baud_rate, config.read_timeout())
    }
}

impl Connector for SerialConnector {
    fn connect(&self) -> Result<Box<dyn Link>> {
        let port = serialport::new(&self.port, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.read_timeout)
            .open()
            .map_err(|e| TvError::PortUnavailable(format!("{}: {}", self.port, e)))?;

        Ok(Box::new(port))
    }

    fn endpoint(&self) -> String {
        self.port.clone()
    }
}
