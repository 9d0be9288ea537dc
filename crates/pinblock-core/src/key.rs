//! Key normalization for triple-DES PIN encryption keys.
//!
//! Single and double length keys are stretched to the canonical triple length
//! by repeating sub-keys:
//! - 8 bytes `K` becomes `K || K || K`.
//! - 16 bytes `K1 || K2` becomes `K1 || K2 || K1`.
//! - 24 bytes are used unchanged.

use des::cipher::generic_array::GenericArray;
use des::cipher::KeyInit;
use des::TdesEde3;

use crate::error::{Error, Result};

/// Length of one DES sub-key in bytes.
pub const SINGLE_LENGTH: usize = 8;
/// Length of a two-key triple-DES key in bytes.
pub const DOUBLE_LENGTH: usize = 16;
/// Length of a three-key triple-DES key in bytes.
pub const TRIPLE_LENGTH: usize = 24;

/// Canonical 24-byte triple-length key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TripleLengthKey(pub [u8; TRIPLE_LENGTH]);

impl TripleLengthKey {
    /// Returns the sub-key at `index` (0..=2).
    #[inline]
    pub fn sub_key(&self, index: usize) -> &[u8] {
        &self.0[index * SINGLE_LENGTH..(index + 1) * SINGLE_LENGTH]
    }
}

impl core::fmt::Debug for TripleLengthKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TripleLengthKey(..)")
    }
}

/// Expands an 8, 16 or 24 byte key to triple length.
pub fn expand_key(key: &[u8]) -> Result<TripleLengthKey> {
    let mut out = [0u8; TRIPLE_LENGTH];
    match key.len() {
        SINGLE_LENGTH => {
            for chunk in out.chunks_exact_mut(SINGLE_LENGTH) {
                chunk.copy_from_slice(key);
            }
        }
        DOUBLE_LENGTH => {
            out[..DOUBLE_LENGTH].copy_from_slice(key);
            out[DOUBLE_LENGTH..].copy_from_slice(&key[..SINGLE_LENGTH]);
        }
        TRIPLE_LENGTH => out.copy_from_slice(key),
        other => return Err(Error::KeySize(other)),
    }
    Ok(TripleLengthKey(out))
}

/// Keyed triple-DES (EDE) instance used for a single encode or decode call.
pub struct PinCipher {
    pub(crate) inner: TdesEde3,
}

impl PinCipher {
    /// Keys the cipher with an already expanded key.
    pub fn new(key: &TripleLengthKey) -> Self {
        Self {
            inner: TdesEde3::new(GenericArray::from_slice(&key.0)),
        }
    }
}

impl core::fmt::Debug for PinCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PinCipher(..)")
    }
}

/// Validates and expands raw key bytes, then keys a triple-DES cipher.
pub fn expand(key: &[u8]) -> Result<PinCipher> {
    let key = expand_key(key)?;
    Ok(PinCipher::new(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn single_length_key_is_repeated_three_times() {
        let k = hex!("0123456789abcdef");
        let expanded = expand_key(&k).unwrap();
        assert_eq!(expanded.sub_key(0), &k);
        assert_eq!(expanded.sub_key(1), &k);
        assert_eq!(expanded.sub_key(2), &k);
    }

    #[test]
    fn double_length_key_reuses_first_half_as_third_sub_key() {
        let k = hex!("0123456789abcdeffedcba9876543210");
        let expanded = expand_key(&k).unwrap();
        assert_eq!(expanded.sub_key(0), &k[..8]);
        assert_eq!(expanded.sub_key(1), &k[8..]);
        assert_eq!(expanded.sub_key(2), &k[..8]);
    }

    #[test]
    fn triple_length_key_is_used_as_is() {
        let k = hex!("0123456789abcdeffedcba987654321089abcdef01234567");
        assert_eq!(expand_key(&k).unwrap().0, k);
    }

    #[test]
    fn other_lengths_are_rejected_with_their_size() {
        for len in [0usize, 7, 9, 15, 17, 23, 25, 32] {
            let key = vec![0x11u8; len];
            assert_eq!(expand_key(&key).unwrap_err(), Error::KeySize(len));
            assert_eq!(expand(&key).unwrap_err(), Error::KeySize(len));
        }
    }

    #[test]
    fn debug_output_hides_key_material() {
        let expanded = expand_key(&hex!("0123456789abcdef")).unwrap();
        assert_eq!(format!("{:?}", expanded), "TripleLengthKey(..)");
    }
}
