//! Commands that can be sent to the rf95modem firmware.

use crate::codec::LineCodec;

/// Number of lines in a complete `AT+INFO` response, framing included.
pub const STATUS_LINE_COUNT: usize = 13;

/// AT commands understood by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Query the modem status (`AT+INFO`).
    Info,

    /// Send a raw command string.
    Raw {
        /// The raw command text, without terminator.
        command: String,
    },
}

impl Command {
    /// Encode the command as a line to send to the firmware.
    /// Returns the bytes to send (including the `\n` terminator).
    pub fn encode(&self) -> Vec<u8> {
        LineCodec::encode_command(&self.to_command_string())
    }

    /// Get the command string without the terminator.
    pub fn to_command_string(&self) -> String {
        match self {
            Command::Info => "AT+INFO".to_string(),
            Command::Raw { command } => command.clone(),
        }
    }
}
