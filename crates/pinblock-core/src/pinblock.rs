//! Top-level PIN block encode and decode.

use log::{debug, trace};
use serde::Serialize;

use crate::bcd::{bcd_to_ascii, bcd_to_decimal};
use crate::block::{xor_buffers, xor_hex};
use crate::cipher::{crypt_block, Direction};
use crate::error::{Error, Result};
use crate::format::{pad_pin, shift_pan, Format};
use crate::key::{expand, PinCipher};

/// Largest length nibble a format 0 block may carry before it is treated as garbage.
const MAX_DECODED_PIN_LEN: u64 = 10;

/// Intermediate values of one encode, each as a hex string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PinBlockTrace {
    /// ISO format digit.
    pub format: u8,
    /// PIN field before masking.
    pub padded_pin: String,
    /// PAN field used as the mask.
    pub shifted_pan: String,
    /// PIN field XOR PAN field.
    pub clear_block: String,
    /// Encrypted PIN block.
    pub pin_block: String,
}

/// Encrypts `pin` for `pan` under `key_hex` and returns the PIN block as 16 hex digits.
///
/// Supported for [`Format::Iso0`]. [`Format::Iso1`] is rejected outright and
/// [`Format::Iso3`] fails when the PAN field is built.
pub fn encrypt_pin_block(format: Format, pin: &str, pan: &str, key_hex: &str) -> Result<String> {
    encode(format, pin, pan, key_hex).map(|t| t.pin_block)
}

/// Same as [`encrypt_pin_block`] but returns every intermediate field.
pub fn trace_pin_block(
    format: Format,
    pin: &str,
    pan: &str,
    key_hex: &str,
) -> Result<PinBlockTrace> {
    encode(format, pin, pan, key_hex)
}

/// Decrypts `pin_block_hex` and recovers the PIN digits.
///
/// The block is decrypted before the format is checked. Supported for
/// [`Format::Iso0`]; [`Format::Iso1`] fails when the PAN field is built and
/// [`Format::Iso3`] is rejected outright.
pub fn decrypt_pin_block(
    format: Format,
    pan: &str,
    key_hex: &str,
    pin_block_hex: &str,
) -> Result<String> {
    debug!("decrypting {} PIN block", format);
    let cipher = cipher_from_hex(key_hex)?;
    let encrypted = hex::decode(pin_block_hex)?;
    let clear = crypt_block(Direction::Decrypt, &cipher, &encrypted)?;

    if format == Format::Iso3 {
        return Err(Error::IsoFormat(u64::from(format.code())));
    }

    let pan_field = hex::decode(shift_pan(format, pan)?)?;
    let plain = xor_buffers(&clear, &pan_field)?;

    let pin_len = bcd_to_decimal(&plain[..1]);
    trace!("decoded length nibble {}", pin_len);
    if format == Format::Iso0 && pin_len > MAX_DECODED_PIN_LEN {
        return Err(Error::IsoFormat(pin_len));
    }
    let digits = usize::try_from(pin_len).map_err(|_| Error::IsoFormat(pin_len))?;

    bcd_to_ascii(&plain[1..], digits)
}

fn encode(format: Format, pin: &str, pan: &str, key_hex: &str) -> Result<PinBlockTrace> {
    debug!("encrypting {} PIN block for {}-digit PIN", format, pin.len());
    let cipher = cipher_from_hex(key_hex)?;
    let padded_pin = pad_pin(format, pin)?;

    if format == Format::Iso1 {
        return Err(Error::IsoFormat(u64::from(format.code())));
    }

    let shifted_pan = shift_pan(format, pan)?;
    let clear = xor_hex(&padded_pin, &shifted_pan)?;
    let encrypted = crypt_block(Direction::Encrypt, &cipher, &clear)?;
    trace!("PIN block encrypted");

    Ok(PinBlockTrace {
        format: format.code(),
        padded_pin,
        shifted_pan,
        clear_block: hex::encode(&clear),
        pin_block: hex::encode(encrypted),
    })
}

fn cipher_from_hex(key_hex: &str) -> Result<PinCipher> {
    let key = hex::decode(key_hex)?;
    trace!("using {}-byte key", key.len());
    expand(&key)
}
