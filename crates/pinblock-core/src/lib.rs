//! ISO 9564 PIN block construction and recovery.
//!
//! A PIN block is built by padding the PIN into a 16-digit field, masking it
//! with a field derived from the account number, and encrypting the resulting
//! 8-byte block with triple-DES. This crate provides:
//! - Key expansion from single, double and triple length keys.
//! - PIN and PAN field encoders per ISO format.
//! - Masking, single-block encryption and packed BCD decoding.
//! - Hex-in, hex-out encode and decode entry points.
//!
//! Every operation is a pure function of its inputs; nothing is cached or
//! shared between calls.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bcd;
mod block;
mod cipher;
mod error;
mod format;
mod key;
mod pinblock;

pub use crate::bcd::{bcd_to_ascii, bcd_to_decimal};
pub use crate::block::{to_block, xor_buffers, xor_hex, Block, BLOCK_SIZE};
pub use crate::cipher::{crypt_block, Direction};
pub use crate::error::{Error, Result};
pub use crate::format::{pad_pin, shift_pan, Format, MAX_PIN_LEN, MIN_PAN_LEN, MIN_PIN_LEN};
pub use crate::key::{
    expand, expand_key, PinCipher, TripleLengthKey, DOUBLE_LENGTH, SINGLE_LENGTH, TRIPLE_LENGTH,
};
pub use crate::pinblock::{decrypt_pin_block, encrypt_pin_block, trace_pin_block, PinBlockTrace};
