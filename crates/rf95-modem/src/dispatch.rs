//! Command dispatch: send one AT command, collect N response lines.
//!
//! [`Dispatch`] is the seam between the [`Modem`](crate::Modem) and the wire.
//! [`LineDispatch`] implements it over any blocking byte stream. Timeouts are
//! the stream's business; a timed-out read surfaces as
//! [`ModemError::Transport`].

use std::io::{ErrorKind, Read, Write};

use rf95_protocol::{strip_terminator, Command, LineCodec};
use tracing::{trace, warn};

use crate::config::ModemConfig;
use crate::error::{ModemError, ModemResult};

/// Sends commands to the modem and gathers their raw response lines.
pub trait Dispatch {
    /// Send `command` and return exactly `lines` response lines.
    ///
    /// Each line still carries its `\n` or `\r\n` terminator.
    fn send_multiline(&mut self, command: &Command, lines: usize) -> ModemResult<Vec<String>>;
}

impl<D: Dispatch + ?Sized> Dispatch for &mut D {
    fn send_multiline(&mut self, command: &Command, lines: usize) -> ModemResult<Vec<String>> {
        (**self).send_multiline(command, lines)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for Box<D> {
    fn send_multiline(&mut self, command: &Command, lines: usize) -> ModemResult<Vec<String>> {
        (**self).send_multiline(command, lines)
    }
}

/// [`Dispatch`] over a blocking byte stream such as a serial port.
#[derive(Debug)]
pub struct LineDispatch<T> {
    stream: T,
    codec: LineCodec,
    scratch: Vec<u8>,
    max_line_length: usize,
}

impl<T: Read + Write> LineDispatch<T> {
    /// Wrap a stream using the default configuration.
    pub fn new(stream: T) -> Self {
        Self::with_config(stream, &ModemConfig::default())
    }

    /// Wrap a stream using the limits from `config`.
    pub fn with_config(stream: T, config: &ModemConfig) -> Self {
        LineDispatch {
            stream,
            codec: LineCodec::new(),
            scratch: vec![0u8; config.read_chunk.max(1)],
            max_line_length: config.max_line_length,
        }
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    /// Get a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    /// Unwrap the underlying stream. Buffered partial input is dropped.
    pub fn into_inner(self) -> T {
        self.stream
    }

    fn read_line(&mut self) -> ModemResult<String> {
        loop {
            if let Some(line) = self.codec.decode_line() {
                trace!("LineDispatch: received {:?}", line);
                let length = strip_terminator(&line).len();
                if length > self.max_line_length {
                    return Err(ModemError::LineTooLong {
                        max: self.max_line_length,
                        actual: length,
                    });
                }
                return Ok(line);
            }

            let pending = self.codec.buffered_len();
            if pending > self.max_line_length {
                self.codec.clear();
                return Err(ModemError::LineTooLong {
                    max: self.max_line_length,
                    actual: pending,
                });
            }

            let n = match self.stream.read(&mut self.scratch) {
                Ok(0) => {
                    self.codec.clear();
                    return Err(ModemError::Disconnected);
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.codec.push(&self.scratch[..n]);
        }
    }
}

impl<T: Read + Write> Dispatch for LineDispatch<T> {
    fn send_multiline(&mut self, command: &Command, lines: usize) -> ModemResult<Vec<String>> {
        if self.codec.buffered_len() > 0 {
            warn!(
                "LineDispatch: dropping {} stale bytes: {:?}",
                self.codec.buffered_len(),
                self.codec.buffer_as_str()
            );
            self.codec.clear();
        }

        let frame = command.encode();
        trace!(
            "LineDispatch: sending command '{}' ({} bytes), expecting {} lines",
            command.to_command_string(),
            frame.len(),
            lines
        );
        self.stream.write_all(&frame)?;
        self.stream.flush()?;

        let mut response = Vec::with_capacity(lines);
        while response.len() < lines {
            response.push(self.read_line()?);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// In-memory duplex stream: reads come from `input`, writes land in `output`.
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            MockStream {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sends_encoded_command() {
        let mut dispatch = LineDispatch::new(MockStream::new(b"+OK\r\n"));
        let lines = dispatch.send_multiline(&Command::Info, 1).unwrap();

        assert_eq!(lines, vec!["+OK\r\n".to_string()]);
        assert_eq!(dispatch.get_ref().output, b"AT+INFO\n");
    }

    #[test]
    fn test_collects_exact_line_count() {
        let mut dispatch = LineDispatch::new(MockStream::new(b"a: 1\r\n\r\nb: 2\r\n+OK\r\n"));
        let lines = dispatch.send_multiline(&Command::Info, 3).unwrap();

        assert_eq!(lines, vec!["a: 1\r\n", "\r\n", "b: 2\r\n"]);
    }

    #[test]
    fn test_small_read_chunks() {
        let config = ModemConfig {
            read_chunk: 1,
            ..ModemConfig::default()
        };
        let mut dispatch =
            LineDispatch::with_config(MockStream::new(b"firmware: 0.6.0\n+OK\n"), &config);
        let lines = dispatch.send_multiline(&Command::Info, 2).unwrap();

        assert_eq!(lines, vec!["firmware: 0.6.0\n", "+OK\n"]);
    }

    #[test]
    fn test_eof_is_disconnected() {
        let mut dispatch = LineDispatch::new(MockStream::new(b"a: 1\r\nb: 2"));
        let err = dispatch.send_multiline(&Command::Info, 2).unwrap_err();

        assert!(matches!(err, ModemError::Disconnected));
    }

    #[test]
    fn test_line_too_long() {
        let config = ModemConfig {
            max_line_length: 8,
            read_chunk: 4,
            ..ModemConfig::default()
        };
        let mut dispatch =
            LineDispatch::with_config(MockStream::new(b"firmware: 0.6.0\n"), &config);
        let err = dispatch.send_multiline(&Command::Info, 1).unwrap_err();

        assert!(matches!(err, ModemError::LineTooLong { max: 8, actual: 12 }));
    }

    #[test]
    fn test_line_too_long_in_single_read() {
        let config = ModemConfig {
            max_line_length: 16,
            read_chunk: 64,
            ..ModemConfig::default()
        };
        let input = format!("firmware: {}\n", "x".repeat(40));
        let mut dispatch = LineDispatch::with_config(MockStream::new(input.as_bytes()), &config);
        let err = dispatch.send_multiline(&Command::Info, 1).unwrap_err();

        assert!(matches!(err, ModemError::LineTooLong { max: 16, actual: 50 }));
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let config = ModemConfig {
            max_line_length: 15,
            ..ModemConfig::default()
        };
        let mut dispatch =
            LineDispatch::with_config(MockStream::new(b"firmware: 0.6.0\r\n"), &config);
        let lines = dispatch.send_multiline(&Command::Info, 1).unwrap();

        assert_eq!(lines, vec!["firmware: 0.6.0\r\n"]);
    }

    #[test]
    fn test_stale_bytes_are_dropped() {
        let mut dispatch = LineDispatch::new(MockStream::new(b"+OK\r\nleftover"));
        dispatch.send_multiline(&Command::Info, 1).unwrap();

        dispatch.get_mut().input = Cursor::new(b"+OK\r\n".to_vec());
        let lines = dispatch.send_multiline(&Command::Info, 1).unwrap();

        assert_eq!(lines, vec!["+OK\r\n"]);
        assert_eq!(dispatch.into_inner().output, b"AT+INFO\nAT+INFO\n");
    }
}
