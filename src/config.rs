//! Configuration for tvctl
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for a display connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Display model name (e.g. "42LW650S"); selects the code set
    pub model: String,

    // -------------------------------------------------------------------------
    // Serial Configuration
    // -------------------------------------------------------------------------
    /// Serial device path ("/dev/ttyUSB0", "COM3", ...)
    pub port: String,

    /// Line speed. The display only speaks 8-N-1 without flow control.
    pub baud_rate: u32,

    /// Read timeout for a single response frame (milliseconds)
    pub read_timeout_ms: u64,

    /// Pause between attempts when waiting for the port to appear (milliseconds)
    pub open_retry_interval_ms: u64,

    // -------------------------------------------------------------------------
    // Debounce Configuration
    // -------------------------------------------------------------------------
    /// Directory holding one lock file per debounced command
    pub lock_dir: PathBuf,

    /// Settle delay used when a command is debounced without an explicit delay
    pub default_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "42LW650S".to_string(),
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 1000,
            open_retry_interval_ms: 70,
            lock_dir: std::env::temp_dir(),
            default_settle_ms: 500,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn open_retry_interval(&self) -> Duration {
        Duration::from_millis(self.open_retry_interval_ms)
    }

    pub fn default_settle(&self) -> Duration {
        Duration::from_millis(self.default_settle_ms)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the display model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the serial device path
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.config.port = port.into();
        self
    }

    /// Set the baud rate
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.config.baud_rate = baud;
        self
    }

    /// Set the response read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the port-open retry interval (in milliseconds)
    pub fn open_retry_interval_ms(mut self, ms: u64) -> Self {
        self.config.open_retry_interval_ms = ms;
        self
    }

    /// Set the directory for debounce lock files
    pub fn lock_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lock_dir = path.into();
        self
    }

    /// Set the default debounce settle delay (in milliseconds)
    pub fn default_settle_ms(mut self, ms: u64) -> Self {
        self.config.default_settle_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
