//! Error types for tvctl
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TvError
pub type Result<T> = std::result::Result<T, TvError>;

/// Unified error type for tvctl operations
#[derive(Debug, Error)]
pub enum TvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lookup Errors (fatal to the command being processed, never retried)
    // -------------------------------------------------------------------------
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown toggle: {0}")]
    UnknownToggle(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Invalid toggle: {0}")]
    InvalidToggle(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Port unavailable: {0}")]
    PortUnavailable(String),

    #[error("Protocol failure: {0}")]
    ProtocolFailure(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Debounced: {0} is already running")]
    Debounced(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
