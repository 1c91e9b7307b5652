//! rf95modem driver.
//!
//! This crate drives rf95modem LoRa firmware over any byte stream that
//! implements [`std::io::Read`] and [`std::io::Write`], typically a serial
//! port opened by the caller. Protocol decoding lives in
//! [`rf95_protocol`]; this crate adds the request/response exchange, the
//! [`Modem`] handle and its MTU cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use rf95_modem::{LineDispatch, Modem};
//!
//! let port = serialport::new("/dev/ttyUSB0", 115_200).open()?;
//! let mut modem = Modem::new(LineDispatch::new(port));
//!
//! let status = modem.fetch_status()?;
//! println!("{status}");
//! println!("mtu = {}", modem.mtu()?);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod modem;

pub use config::ModemConfig;
pub use dispatch::{Dispatch, LineDispatch};
pub use error::{ModemError, ModemResult};
pub use modem::Modem;
pub use rf95_protocol::{Command, ModemMode, ProtocolError, Status};
