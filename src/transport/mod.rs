//! Transport Module
//!
//! Byte channel to the display and the per-call session over it.
//!
//! ## Responsibilities
//! - Open the serial port at 9600 8-N-1, no flow control, short read timeout
//! - Write one request line, read one fixed-size frame, validate it
//! - Close after every top-level `send` (no reuse between calls)
//!
//! `Connector` is the seam between the protocol core and the physical port:
//! `SerialConnector` talks to hardware, `MockConnector` plays a scripted
//! display for tests and is only built with the `mock` feature.

mod link;
#[cfg(feature = "mock")]
mod mock;
mod session;

pub use link::{Connector, Link, SerialConnector};
#[cfg(feature = "mock")]
pub use mock::{MockConnector, MockDevice};
pub use session::{Session, StateProbe};
