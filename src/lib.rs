//! # tvctl
//!
//! Command encoder/executor for the RS-232 control port of display devices:
//! - Symbolic command names mapped to ASCII command codes per model family
//! - Status queries, toggles and level steps computed from device state
//! - Fixed 10-byte response validation
//! - Cross-process debouncing of repeated button presses
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Tv::send(name)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Debounce Guard                             │
//! │        (per-name lock file, settle delay, optional)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Command Resolver                            │
//! │     plan (pure) ──▶ complete (queries device state)          │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐           ┌──────────────────┐
//!   │   Code Table    │           │ Transport Session│
//!   │ + Arithmetic    │           │ (write CR, read  │
//!   └─────────────────┘           │  10-byte frame)  │
//!                                 └────────┬─────────┘
//!                                          ▼
//!                                 ┌──────────────────┐
//!                                 │   Serial port    │
//!                                 │  9600 8-N-1      │
//!                                 └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codes;
pub mod protocol;
pub mod transport;
pub mod resolver;
pub mod debounce;
pub mod tv;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TvError, Result};
pub use config::Config;
pub use protocol::Reply;
pub use tv::Tv;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tvctl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
