//! Transport session
//!
//! Owns the open/closed lifecycle of one channel and performs request/response
//! exchanges on it.

use std::thread;
use std::time::Duration;

use crate::error::{Result, TvError};
use crate::protocol::{decode_response, read_frame, write_request, Frame};

use super::link::{Connector, Link};

/// Source of observed device state for toggle and step commands
pub trait StateProbe {
    /// Send a status query and return the reported payload
    fn query_data(&mut self, code: &str) -> Result<String>;
}

/// A lazily opened channel, closed explicitly after every top-level send
pub struct Session<C: Connector> {
    connector: C,
    link: Option<Box<dyn Link>>,
    retry_interval: Duration,
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C, retry_interval: Duration) -> Self {
        Self {
            connector,
            link: None,
            retry_interval,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn is_open(&self) -> bool {
        self.link.is_some()
    }

    /// Open with a single attempt; failure propagates immediately
    pub fn open_once(&mut self) -> Result<()> {
        if self.link.is_none() {
            self.link = Some(self.connector.connect()?);
            tracing::debug!(endpoint = %self.connector.endpoint(), "port opened");
        }
        Ok(())
    }

    /// Open, waiting for the port to appear.
    ///
    /// Only `PortUnavailable` is retried, and without limit; callers that
    /// need a deadline must enforce it themselves.
    pub fn open_retrying(&mut self) -> Result<()> {
        let mut attempts: u64 = 0;
        loop {
            match self.open_once() {
                Ok(()) => return Ok(()),
                Err(TvError::PortUnavailable(reason)) => {
                    attempts += 1;
                    if attempts == 1 {
                        tracing::warn!(%reason, "port unavailable, waiting for it");
                    } else {
                        tracing::trace!(attempts, %reason, "port still unavailable");
                    }
                    thread::sleep(self.retry_interval);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Write `code` + CR, read one frame, and validate it
    pub fn exchange(&mut self, code: &str) -> Result<Frame> {
        let link = self
            .link
            .as_mut()
            .ok_or_else(|| TvError::PortUnavailable("session is not open".to_string()))?;

        write_request(link.as_mut(), code)?;
        let raw = read_frame(link.as_mut())?;

        tracing::debug!(
            code,
            response = %String::from_utf8_lossy(&raw),
            "exchange"
        );

        decode_response(&raw)
    }

    /// Drop the channel; a later open creates a new one
    pub fn close(&mut self) {
        if self.link.take().is_some() {
            tracing::debug!(endpoint = %self.connector.endpoint(), "port closed");
        }
    }
}

impl<C: Connector> StateProbe for Session<C> {
    fn query_data(&mut self, code: &str) -> Result<String> {
        Ok(self.exchange(code)?.payload().to_string())
    }
}
