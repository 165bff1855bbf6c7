//! Codes Module
//!
//! Static command codes and the pure arithmetic over them.
//!
//! ## Code Format
//! ```text
//! ┌────────────┬───┬────────────┬───┬─────────────┐
//! │ Cmd (2)    │ ␠ │ Set ID (2) │ ␠ │ Payload (2) │
//! └────────────┴───┴────────────┴───┴─────────────┘
//!   "ka"             "00"             "01"
//! ```
//!
//! Everything before the payload is the code's *prefix* (its command
//! family). Two codes with the same prefix address the same setting.
//! A payload of `ff` turns any code into a status query.

mod arith;
mod table;

pub use arith::{
    delta_code, payload, prefix, same_family, status_code, toggle_code, PAYLOAD_LEN,
    STATUS_PAYLOAD,
};
pub use table::{normalize_model, CodeTable};
