//! Driver configuration.

use rf95_protocol::STATUS_LINE_COUNT;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Modem`](crate::Modem) and its dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Number of lines the firmware sends in answer to `AT+INFO`,
    /// framing included.
    pub status_lines: usize,
    /// Longest response line accepted before giving up on the exchange.
    pub max_line_length: usize,
    /// Size of each read from the byte stream.
    pub read_chunk: usize,
}

impl Default for ModemConfig {
    fn default() -> Self {
        ModemConfig {
            status_lines: STATUS_LINE_COUNT,
            max_line_length: 256,
            read_chunk: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_firmware() {
        let config = ModemConfig::default();
        assert_eq!(config.status_lines, 13);
        assert!(config.max_line_length > 0);
        assert!(config.read_chunk > 0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ModemConfig = serde_json::from_str(r#"{ "status_lines": 14 }"#).unwrap();
        assert_eq!(config.status_lines, 14);
        assert_eq!(config.max_line_length, ModemConfig::default().max_line_length);
        assert_eq!(config.read_chunk, ModemConfig::default().read_chunk);
    }
}
