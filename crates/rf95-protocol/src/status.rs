//! Status decoding for the `AT+INFO` response.
//!
//! Each payload line of the response is a `key: value` pair. Keys are looked
//! up in a closed table ([`StatusField`]) and the value is converted with the
//! rule that belongs to that key. Unknown keys are an error: a firmware
//! update that adds a field must not be absorbed silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::line::{is_framing, is_terminator, parse_line};

/// Highest valid [`ModemMode`] index.
pub const MAX_MODEM_MODE: u8 = 4;

/// Radio profiles offered by the firmware.
///
/// These are the RadioHead RF95 modem configurations, named after bandwidth,
/// coding rate and spreading factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModemMode {
    /// 125 kHz, 4/5, SF7. Medium range.
    #[default]
    Bw125Cr45Sf128 = 0,
    /// 500 kHz, 4/5, SF7. Fast, short range.
    Bw500Cr45Sf128 = 1,
    /// 31.25 kHz, 4/8, SF9. Slow, long range.
    Bw31_25Cr48Sf512 = 2,
    /// 125 kHz, 4/8, SF12. Slow, long range.
    Bw125Cr48Sf4096 = 3,
    /// 125 kHz, 4/5, SF11. Slow, long range.
    Bw125Cr45Sf2048 = 4,
}

impl ModemMode {
    /// All modes in index order.
    pub const ALL: [ModemMode; MAX_MODEM_MODE as usize + 1] = [
        ModemMode::Bw125Cr45Sf128,
        ModemMode::Bw500Cr45Sf128,
        ModemMode::Bw31_25Cr48Sf512,
        ModemMode::Bw125Cr48Sf4096,
        ModemMode::Bw125Cr45Sf2048,
    ];

    /// Look up a mode by its firmware index. Returns None if out of range.
    pub fn from_index(index: u8) -> Option<ModemMode> {
        Self::ALL.get(index as usize).copied()
    }

    /// The firmware index of this mode.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The profile name as printed by the firmware.
    pub fn name(self) -> &'static str {
        match self {
            ModemMode::Bw125Cr45Sf128 => "Bw125Cr45Sf128",
            ModemMode::Bw500Cr45Sf128 => "Bw500Cr45Sf128",
            ModemMode::Bw31_25Cr48Sf512 => "Bw31_25Cr48Sf512",
            ModemMode::Bw125Cr48Sf4096 => "Bw125Cr48Sf4096",
            ModemMode::Bw125Cr45Sf2048 => "Bw125Cr45Sf2048",
        }
    }
}

impl TryFrom<u8> for ModemMode {
    type Error = ProtocolError;

    fn try_from(index: u8) -> ProtocolResult<ModemMode> {
        ModemMode::from_index(index).ok_or(ProtocolError::RangeError {
            value: index.to_string(),
            max: MAX_MODEM_MODE,
        })
    }
}

impl fmt::Display for ModemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Modem status as reported by `AT+INFO`.
///
/// A `Status` returned from [`assemble_status`] has every field set from the
/// response. `Status::default()` is the all-zero value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Status {
    /// Firmware version string.
    pub firmware: String,
    /// Feature tokens in the order the firmware reports them.
    pub features: Vec<String>,
    /// Active radio profile.
    pub mode: ModemMode,
    /// Maximum packet size in bytes.
    pub mtu: usize,
    /// Radio frequency in MHz.
    pub frequency: f64,
    /// Big funky BLE frames counter.
    pub bfb: i64,
    /// Packets received with a bad checksum.
    pub rx_bad: i64,
    /// Packets received intact.
    pub rx_good: i64,
    /// Packets transmitted.
    pub tx_good: i64,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status(firmware={},", self.firmware)?;
        write!(f, "features={},", self.features.join(","))?;
        write!(f, "mode={},", self.mode)?;
        write!(f, "mtu={},", self.mtu)?;
        write!(f, "frequency={:.2},", self.frequency)?;
        write!(f, "big_funky_ble_frames={},", self.bfb)?;
        write!(f, "rx_bad={},", self.rx_bad)?;
        write!(f, "rx_good={},", self.rx_good)?;
        write!(f, "tx_good={})", self.tx_good)
    }
}

/// Keys of the `AT+INFO` response, each tagged with its decoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    /// `firmware`, stored verbatim.
    Firmware,
    /// `features`, a space separated list.
    Features,
    /// `modem config`, `"<index> <profile name>"`.
    ModemConfig,
    /// `frequency`, a float.
    Frequency,
    /// `max pkt size`, an integer.
    MaxPacketSize,
    /// `BFB`, an integer.
    Bfb,
    /// `rx bad`, an integer.
    RxBad,
    /// `rx good`, an integer.
    RxGood,
    /// `tx good`, an integer.
    TxGood,
    /// `rx listener`, discarded.
    RxListener,
    /// `GPS`, discarded.
    Gps,
}

impl StatusField {
    /// Fields that must appear in every response.
    pub const REQUIRED: [StatusField; 9] = [
        StatusField::Firmware,
        StatusField::Features,
        StatusField::ModemConfig,
        StatusField::Frequency,
        StatusField::MaxPacketSize,
        StatusField::Bfb,
        StatusField::RxBad,
        StatusField::RxGood,
        StatusField::TxGood,
    ];

    /// Get the key string used on the wire.
    pub fn as_key(&self) -> &'static str {
        match self {
            StatusField::Firmware => "firmware",
            StatusField::Features => "features",
            StatusField::ModemConfig => "modem config",
            StatusField::Frequency => "frequency",
            StatusField::MaxPacketSize => "max pkt size",
            StatusField::Bfb => "BFB",
            StatusField::RxBad => "rx bad",
            StatusField::RxGood => "rx good",
            StatusField::TxGood => "tx good",
            StatusField::RxListener => "rx listener",
            StatusField::Gps => "GPS",
        }
    }

    /// Parse a field from its wire key. Keys are case sensitive.
    pub fn from_key(key: &str) -> Option<StatusField> {
        match key {
            "firmware" => Some(StatusField::Firmware),
            "features" => Some(StatusField::Features),
            "modem config" => Some(StatusField::ModemConfig),
            "frequency" => Some(StatusField::Frequency),
            "max pkt size" => Some(StatusField::MaxPacketSize),
            "BFB" => Some(StatusField::Bfb),
            "rx bad" => Some(StatusField::RxBad),
            "rx good" => Some(StatusField::RxGood),
            "tx good" => Some(StatusField::TxGood),
            "rx listener" => Some(StatusField::RxListener),
            "GPS" => Some(StatusField::Gps),
            _ => None,
        }
    }

    /// Whether the value of this field is thrown away.
    pub fn is_ignored(&self) -> bool {
        matches!(self, StatusField::RxListener | StatusField::Gps)
    }
}

/// Accumulates decoded fields into a [`Status`].
#[derive(Debug, Clone, Default)]
pub struct StatusBuilder {
    firmware: Option<String>,
    features: Option<Vec<String>>,
    mode: Option<ModemMode>,
    mtu: Option<usize>,
    frequency: Option<f64>,
    bfb: Option<i64>,
    rx_bad: Option<i64>,
    rx_good: Option<i64>,
    tx_good: Option<i64>,
}

impl StatusBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one payload line and store its value.
    pub fn apply_line(&mut self, line: &str) -> ProtocolResult<()> {
        let (key, value) = parse_line(line)?;
        let field = StatusField::from_key(key).ok_or_else(|| ProtocolError::UnknownKey {
            key: key.to_string(),
            line: line.to_string(),
        })?;
        self.apply(field, value)
    }

    /// Decode `value` with the rule of `field` and store it.
    pub fn apply(&mut self, field: StatusField, value: &str) -> ProtocolResult<()> {
        match field {
            StatusField::Firmware => self.firmware = Some(value.to_string()),
            StatusField::Features => {
                self.features = Some(value.split(' ').map(|t| t.trim().to_string()).collect())
            }
            StatusField::ModemConfig => self.mode = Some(parse_modem_config(value)?),
            StatusField::Frequency => self.frequency = Some(parse_number(field, value)?),
            StatusField::MaxPacketSize => self.mtu = Some(parse_number(field, value)?),
            StatusField::Bfb => self.bfb = Some(parse_number(field, value)?),
            StatusField::RxBad => self.rx_bad = Some(parse_number(field, value)?),
            StatusField::RxGood => self.rx_good = Some(parse_number(field, value)?),
            StatusField::TxGood => self.tx_good = Some(parse_number(field, value)?),
            StatusField::RxListener | StatusField::Gps => {}
        }
        Ok(())
    }

    /// Finish decoding. Fails if any required field was never set.
    pub fn build(self) -> ProtocolResult<Status> {
        let missing = |field: StatusField| ProtocolError::MissingKey {
            key: field.as_key(),
        };

        Ok(Status {
            firmware: self.firmware.ok_or_else(|| missing(StatusField::Firmware))?,
            features: self.features.ok_or_else(|| missing(StatusField::Features))?,
            mode: self.mode.ok_or_else(|| missing(StatusField::ModemConfig))?,
            mtu: self.mtu.ok_or_else(|| missing(StatusField::MaxPacketSize))?,
            frequency: self.frequency.ok_or_else(|| missing(StatusField::Frequency))?,
            bfb: self.bfb.ok_or_else(|| missing(StatusField::Bfb))?,
            rx_bad: self.rx_bad.ok_or_else(|| missing(StatusField::RxBad))?,
            rx_good: self.rx_good.ok_or_else(|| missing(StatusField::RxGood))?,
            tx_good: self.tx_good.ok_or_else(|| missing(StatusField::TxGood))?,
        })
    }
}

/// Parse a `modem config` value such as `"3 Bw125Cr48Sf4096"`.
pub fn parse_modem_config(value: &str) -> ProtocolResult<ModemMode> {
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    if digits_end == 0 || !value[digits_end..].starts_with(' ') {
        return Err(ProtocolError::ExtractFailed {
            key: StatusField::ModemConfig.as_key(),
            value: value.to_string(),
        });
    }

    let digits = &value[..digits_end];
    let out_of_range = || ProtocolError::RangeError {
        value: digits.to_string(),
        max: MAX_MODEM_MODE,
    };

    // Only overflow can fail here; the run is all ASCII digits.
    let index: u8 = digits.parse().map_err(|_| out_of_range())?;
    ModemMode::from_index(index).ok_or_else(out_of_range)
}

fn parse_number<T>(field: StatusField, value: &str) -> ProtocolResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ProtocolError::NumberFormat {
        key: field.as_key(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a complete `AT+INFO` response.
///
/// `lines` are the raw response lines, framing included, and must number
/// exactly `expected_lines`. Decoding stops at the first bad line; no
/// partially filled `Status` is ever returned.
pub fn assemble_status<S: AsRef<str>>(lines: &[S], expected_lines: usize) -> ProtocolResult<Status> {
    if lines.len() != expected_lines {
        return Err(ProtocolError::IncompleteResponse {
            expected: expected_lines,
            actual: lines.len(),
        });
    }

    let mut builder = StatusBuilder::new();
    let mut terminated = false;

    for line in lines {
        let line = line.as_ref();
        if is_framing(line) {
            terminated |= is_terminator(line);
            continue;
        }
        builder.apply_line(line)?;
    }

    if !terminated {
        return Err(ProtocolError::MissingTerminator);
    }

    builder.build()
}
