//! rf95modem AT Protocol
//!
//! This crate provides types and utilities for talking to rf95modem LoRa
//! firmware over its serial AT interface. The protocol is line based and
//! human readable: the host sends `AT+...` commands terminated with `\n`, and
//! the firmware answers with one or more text lines.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → firmware): `AT+INFO`, terminated with `\n`
//! - **Responses** (firmware → host): lines terminated with `\n` or `\r\n`
//! - **Framing**: multi-line answers open with a `+<NAME>:` marker and close
//!   with `+OK`
//!
//! The status query `AT+INFO` returns a fixed-length block:
//!
//! ```text
//! +STATUS:
//! firmware: 0.6.0
//! features: rfm95 lora
//! modem config: 3 Bw125Cr48Sf4096
//! frequency: 868.10
//! max pkt size: 255
//! BFB: 0
//! rx bad: 0
//! rx good: 12
//! tx good: 8
//! rx listener: 0
//! GPS: 0
//! +OK
//! ```
//!
//! # Example
//!
//! ```rust
//! use rf95_protocol::{assemble_status, Command, STATUS_LINE_COUNT};
//!
//! let cmd = Command::Info;
//! assert_eq!(cmd.encode(), b"AT+INFO\n");
//!
//! let lines = [
//!     "+STATUS:\n", "firmware: 0.6.0\n", "features: rfm95 lora\n",
//!     "modem config: 3 Bw125Cr48Sf4096\n", "frequency: 868.10\n",
//!     "max pkt size: 255\n", "BFB: 0\n", "rx bad: 0\n", "rx good: 12\n",
//!     "tx good: 8\n", "rx listener: 0\n", "GPS: 0\n", "+OK\n",
//! ];
//! let status = assemble_status(&lines, STATUS_LINE_COUNT).unwrap();
//! assert_eq!(status.mtu, 255);
//! ```

mod codec;
mod commands;
mod error;
mod line;
mod status;

pub use codec::*;
pub use commands::*;
pub use error::*;
pub use line::*;
pub use status::*;
