//! Protocol Module
//!
//! Defines the line protocol spoken with the display.
//!
//! ## Request Format
//! ```text
//! ┌─────────────────────────────┬──────┐
//! │ Code (ASCII, e.g. ka 00 01) │  CR  │
//! └─────────────────────────────┴──────┘
//! ```
//!
//! ## Response Format (10 bytes)
//! ```text
//! ┌────────┬───┬────────────┬───┬─────────┬─────────────┬─────┐
//! │ Cmd2(1)│ ␠ │ Set ID (2) │ ␠ │ OK / NG │ Payload (2) │  x  │
//! └────────┴───┴────────────┴───┴─────────┴─────────────┴─────┘
//!   0        1   2..4         4   5..7      7..9          9
//! ```
//!
//! ## Command Names
//! - `toggle<name>`: alternate between two registered states
//! - `<stem>up` / `<stem>down`: step `<stem>level` by one
//! - names ending in `status` or `level`: status queries
//! - anything else: static action

mod codec;
mod command;
mod response;

pub use codec::{decode_response, encode_request, read_frame, write_request};
pub use command::{classify, is_status_query, CommandKind, QueryKind};
pub use response::{Frame, Reply, FRAME_LEN, SUCCESS_MARKER};
