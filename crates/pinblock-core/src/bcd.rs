//! Packed BCD helpers for reading a clear PIN block back.

use crate::error::{Error, Result};

/// Decodes packed BCD, two decimal digits per byte, high nibble first.
///
/// Nibbles above 9 are not rejected; they contribute their raw value, so a
/// byte `0x1c` reads as `1 * 10 + 12`. Saturates at `u64::MAX` on over-long input.
pub fn bcd_to_decimal(bcd: &[u8]) -> u64 {
    bcd.iter().fold(0u64, |acc, &byte| {
        let pair = u64::from(byte >> 4) * 10 + u64::from(byte & 0x0f);
        acc.saturating_mul(100).saturating_add(pair)
    })
}

/// Unpacks `digits` nibbles into ASCII, high nibble of each byte first.
///
/// Nibbles 0-9 map to `'0'..='9'` and 10-15 to `'A'..='F'`.
pub fn bcd_to_ascii(bcd: &[u8], digits: usize) -> Result<String> {
    let needed = digits.div_ceil(2);
    if needed > bcd.len() {
        return Err(Error::InsufficientData {
            needed,
            available: bcd.len(),
        });
    }

    Ok((0..digits)
        .map(|i| {
            let byte = bcd[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            nibble_to_ascii(nibble)
        })
        .collect())
}

#[inline]
fn nibble_to_ascii(nibble: u8) -> char {
    match nibble {
        0..=9 => char::from(b'0' + nibble),
        _ => char::from(b'A' + nibble - 10),
    }
}
