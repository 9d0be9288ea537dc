//! ISO 9564 format selectors and the PIN / PAN field encoders.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Shortest PIN accepted.
pub const MIN_PIN_LEN: usize = 1;
/// Longest PIN accepted.
pub const MAX_PIN_LEN: usize = 9;
/// Shortest PAN that still has 12 digits before its check digit.
pub const MIN_PAN_LEN: usize = 13;

const FIELD_HEX_LEN: usize = 16;
const PAN_DIGITS: usize = 12;

/// ISO 9564 PIN block format.
///
/// Encoding is available for [`Format::Iso0`] and [`Format::Iso3`], decoding
/// for [`Format::Iso0`] and [`Format::Iso1`]. Only format 0 has a PAN
/// derivation, so in practice only format 0 completes in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Format 0 (ANSI X9.8, ECI-1).
    Iso0,
    /// Format 1.
    Iso1,
    /// Format 3.
    Iso3,
}

impl Format {
    /// Format digit stored in the first nibble of the PIN field.
    pub const fn code(self) -> u8 {
        match self {
            Format::Iso0 => 0,
            Format::Iso1 => 1,
            Format::Iso3 => 3,
        }
    }
}

impl TryFrom<u8> for Format {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Format::Iso0),
            1 => Ok(Format::Iso1),
            3 => Ok(Format::Iso3),
            other => Err(Error::IsoFormat(u64::from(other))),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Accepts `0`, `iso0` or `iso-0` (any case), and likewise for 1 and 3.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("iso")
            .map(|rest| rest.trim_start_matches(['-', '_']))
            .unwrap_or(lower.as_str());
        match digits.parse::<u8>() {
            Ok(code) => Format::try_from(code),
            Err(_) => Err(Error::IsoFormat(u64::MAX)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISO-{}", self.code())
    }
}

/// Builds the PIN field as hex digits.
///
/// Format 0 yields `0`, the length digit, the PIN, then `F` fill up to 16
/// digits. Formats 1 and 3 yield the format digit, length digit and PIN with
/// no fill, so their field is shorter than a block.
pub fn pad_pin(format: Format, pin: &str) -> Result<String> {
    let len = pin.len();
    if !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&len) {
        return Err(Error::PinSize(len));
    }

    let mut field = format!("{}{}{}", format.code(), len, pin);
    if format == Format::Iso0 {
        field.extend(core::iter::repeat('F').take(FIELD_HEX_LEN - field.len()));
    }
    Ok(field)
}

/// Builds the PAN field as hex digits: `0000` followed by the 12 PAN digits
/// that precede the check digit.
///
/// Only format 0 defines this field.
pub fn shift_pan(format: Format, pan: &str) -> Result<String> {
    if format != Format::Iso0 {
        return Err(Error::IsoFormat(u64::from(format.code())));
    }
    if let Some((index, c)) = pan.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(Error::HexDecode(hex::FromHexError::InvalidHexCharacter {
            c,
            index,
        }));
    }
    if pan.len() < MIN_PAN_LEN {
        return Err(Error::PanSize(pan.len()));
    }

    let start = pan.len() - MIN_PAN_LEN;
    Ok(format!("0000{}", &pan[start..start + PAN_DIGITS]))
}
