//! PIN block representation and the PIN/PAN masking transform.

use crate::error::{Error, Result};

/// Size of a PIN block in bytes (one DES block).
pub const BLOCK_SIZE: usize = 8;

/// A single 8-byte PIN block, clear or encrypted.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two equally sized buffers byte by byte.
pub fn xor_buffers(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// Hex-decodes two fields and XORs them.
pub fn xor_hex(a: &str, b: &str) -> Result<Vec<u8>> {
    let a = hex::decode(a)?;
    let b = hex::decode(b)?;
    xor_buffers(&a, &b)
}

/// Converts a buffer into a [`Block`], rejecting any other length.
pub fn to_block(bytes: &[u8]) -> Result<Block> {
    bytes.try_into().map_err(|_| Error::LengthMismatch {
        expected: BLOCK_SIZE,
        actual: bytes.len(),
    })
}
