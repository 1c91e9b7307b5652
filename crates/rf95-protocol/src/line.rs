//! Classification and splitting of single response lines.
//!
//! Every line handed to these functions is a raw line as it came off the
//! wire, still carrying its `\n` or `\r\n` terminator. Lines without a
//! terminator are accepted as well.

use crate::error::{ProtocolError, ProtocolResult};

/// Marker opening the `AT+INFO` response block.
pub const STATUS_MARKER: &str = "+STATUS:";

/// Sentinel closing every successful multi-line response.
pub const OK_MARKER: &str = "+OK";

/// Separator between key and value in a payload line.
const KEY_VALUE_SEPARATOR: &str = ": ";

/// Strip one trailing `\n`, then one trailing `\r`.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Check whether a line is pure protocol framing.
///
/// Framing lines are the `+STATUS:` marker, the `+OK` sentinel and blank
/// lines. They carry no payload and are skipped by the assembler.
pub fn is_framing(line: &str) -> bool {
    matches!(strip_terminator(line), "" | STATUS_MARKER | OK_MARKER)
}

/// Check whether a line is the closing `+OK` sentinel.
pub fn is_terminator(line: &str) -> bool {
    strip_terminator(line) == OK_MARKER
}

/// Split a payload line into its key and value.
///
/// The key is everything before the first `:` followed by one or more
/// spaces; the value is everything after that run of spaces. Spaces and
/// colons inside the value are kept.
pub fn parse_line(line: &str) -> ProtocolResult<(&str, &str)> {
    let malformed = || ProtocolError::MalformedLine {
        line: line.to_string(),
    };

    let body = strip_terminator(line);
    let sep = body.find(KEY_VALUE_SEPARATOR).ok_or_else(malformed)?;

    let key = &body[..sep];
    let value = body[sep + 1..].trim_start_matches(' ');

    if key.is_empty() || value.is_empty() || value.contains('\r') {
        return Err(malformed());
    }

    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_lines() {
        assert!(is_framing("+STATUS:\r\n"));
        assert!(is_framing("+STATUS:\n"));
        assert!(is_framing("+OK\r\n"));
        assert!(is_framing("+OK\n"));
        assert!(is_framing("\r\n"));
        assert!(is_framing("\n"));
        assert!(is_framing(""));
    }

    #[test]
    fn test_payload_lines_are_not_framing() {
        assert!(!is_framing("firmware: 0.6.0\n"));
        assert!(!is_framing("+OK \n"));
        assert!(!is_framing(" +STATUS:\n"));
        assert!(!is_framing("+FAIL\n"));
    }

    #[test]
    fn test_is_terminator() {
        assert!(is_terminator("+OK\r\n"));
        assert!(!is_terminator("+STATUS:\n"));
        assert!(!is_terminator("\n"));
    }

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_line("firmware: 0.6.0\n").unwrap(), ("firmware", "0.6.0"));
    }

    #[test]
    fn test_parse_crlf_line() {
        assert_eq!(parse_line("rx good: 12\r\n").unwrap(), ("rx good", "12"));
    }

    #[test]
    fn test_parse_keeps_value_spaces() {
        assert_eq!(
            parse_line("modem config: 3 Bw125Cr48Sf4096\n").unwrap(),
            ("modem config", "3 Bw125Cr48Sf4096")
        );
    }

    #[test]
    fn test_parse_multiple_separator_spaces() {
        assert_eq!(parse_line("BFB:    0\n").unwrap(), ("BFB", "0"));
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        assert_eq!(parse_line("a: b: c\n").unwrap(), ("a", "b: c"));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = parse_line("firmware 0.6.0\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::MalformedLine {
                line: "firmware 0.6.0\n".to_string()
            }
        );
        assert!(parse_line("firmware:0.6.0\n").is_err());
    }

    #[test]
    fn test_parse_empty_key_or_value() {
        assert!(parse_line(": 0.6.0\n").is_err());
        assert!(parse_line("firmware: \n").is_err());
    }

    #[test]
    fn test_parse_rejects_stray_carriage_return() {
        assert!(parse_line("firmware: 0.6\r.0\n").is_err());
    }
}
