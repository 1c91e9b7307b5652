//! Error types for the modem driver.

use rf95_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while talking to the modem.
#[derive(Debug, Error)]
pub enum ModemError {
    /// The underlying byte stream failed, including its read timeout.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The byte stream reached end of file mid-response.
    #[error("modem disconnected")]
    Disconnected,

    /// A response line grew past the configured limit without a newline.
    #[error("response line too long: max {max} bytes, got {actual}")]
    LineTooLong {
        /// Configured maximum line length.
        max: usize,
        /// Bytes buffered when the limit was hit.
        actual: usize,
    },

    /// The response could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Result type alias for modem operations.
pub type ModemResult<T> = Result<T, ModemError>;
