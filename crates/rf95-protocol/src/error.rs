//! Error types for the AT protocol.

use thiserror::Error;

/// Errors that can occur while decoding a modem response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A payload line does not have the `key: value` shape.
    #[error("info line does not match `key: value`: {line:?}")]
    MalformedLine {
        /// The offending raw line.
        line: String,
    },

    /// A well-formed line carries a key the decoder does not know.
    #[error("unknown info key {key:?} in line {line:?}")]
    UnknownKey {
        /// The unrecognized key.
        key: String,
        /// The raw line the key came from.
        line: String,
    },

    /// A composite value lacks the part that should be extracted from it.
    #[error("failed to extract {key} from {value:?}")]
    ExtractFailed {
        /// Wire key of the field.
        key: &'static str,
        /// The value that could not be split.
        value: String,
    },

    /// A modem configuration index outside the known range.
    #[error("modem config {value} is not in [0, {max}]")]
    RangeError {
        /// The extracted digits.
        value: String,
        /// Highest valid index.
        max: u8,
    },

    /// An integer or float conversion failed.
    #[error("invalid number for {key}: {value:?} ({reason})")]
    NumberFormat {
        /// Wire key of the field.
        key: &'static str,
        /// The value that failed to parse.
        value: String,
        /// Message from the number parser.
        reason: String,
    },

    /// The response did not have the expected number of lines.
    #[error("incomplete response: expected {expected} lines, got {actual}")]
    IncompleteResponse {
        /// Lines the protocol requires.
        expected: usize,
        /// Lines actually received.
        actual: usize,
    },

    /// The closing `+OK` sentinel was never seen.
    #[error("response is missing the +OK terminator")]
    MissingTerminator,

    /// A required key did not appear in the response.
    #[error("response is missing the {key:?} line")]
    MissingKey {
        /// Wire key that was never decoded.
        key: &'static str,
    },
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
