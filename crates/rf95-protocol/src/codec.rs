//! Line-based codec for AT communication.
//!
//! Commands are terminated with `\n`. Responses are `\n` terminated, usually
//! with a `\r` in front of it. The codec hands out lines with their
//! terminator intact so that framing checks see exactly what the firmware
//! sent.

use bytes::BytesMut;

/// Initial capacity of the receive buffer.
const INITIAL_CAPACITY: usize = 256;

/// A codec for reading and writing AT lines.
///
/// Received bytes are accumulated until a `\n` is found. Blank lines are
/// returned like any other line because multi-line responses are counted
/// line by line.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete line from the buffer.
    ///
    /// Returns `Some(line)` including its `\n` (and `\r`, if sent), or `None`
    /// if more data is needed. Invalid UTF-8 is replaced lossily.
    pub fn decode_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_data = self.buffer.split_to(end + 1);
        Some(String::from_utf8_lossy(&line_data).into_owned())
    }

    /// Encode a command for transmission.
    ///
    /// Appends the `\n` terminator.
    pub fn encode_command(cmd: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(cmd.len() + 1);
        buf.extend_from_slice(cmd.as_bytes());
        buf.push(b'\n');
        buf
    }

    /// Get the number of buffered bytes.
    ///
    /// Once every complete line has been decoded this is the length of the
    /// pending partial line.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the current buffer contents as a string (for debugging).
    pub fn buffer_as_str(&self) -> String {
        String::from_utf8_lossy(&self.buffer).to_string()
    }
}
