//! Error type shared by every PIN block operation.

use thiserror::Error;

/// Result alias for PIN block operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure kinds surfaced by encoding and decoding.
///
/// Caller input faults (`PinSize`, `PanSize`, `KeySize`, `HexDecode`) are kept
/// distinct from protocol mismatches (`IsoFormat`) so callers can tell which side
/// is at fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// PIN length outside `1..=9`.
    #[error("pinblock: invalid pin size {0}")]
    PinSize(usize),

    /// Format selector not usable for the requested operation, or a decoded
    /// length nibble that cannot belong to the expected format.
    #[error("pinblock: invalid ISO format {0}")]
    IsoFormat(u64),

    /// Key length not one of 8, 16 or 24 bytes.
    #[error("pinblock: invalid key size {0}")]
    KeySize(usize),

    /// Malformed hexadecimal key, PIN field, PAN field or PIN block.
    #[error("pinblock: hex decode failed: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// PAN too short to take the 12 digits preceding the check digit.
    #[error("pinblock: PAN must have at least 13 digits, got {0}")]
    PanSize(usize),

    /// BCD unpacking asked for more digits than the buffer holds.
    #[error("pinblock: need {needed} bytes of BCD data, only {available} available")]
    InsufficientData {
        /// Bytes required for the requested digit count.
        needed: usize,
        /// Bytes actually supplied.
        available: usize,
    },

    /// Two buffers that must have equal length do not.
    #[error("pinblock: length mismatch, expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },
}
