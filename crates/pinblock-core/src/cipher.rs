//! Single-block triple-DES transform applied to PIN blocks.

use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt, BlockEncrypt};

use crate::block::{to_block, Block};
use crate::error::Result;
use crate::key::PinCipher;

/// Direction of a block cipher invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clear PIN block to wire PIN block.
    Encrypt,
    /// Wire PIN block to clear PIN block.
    Decrypt,
}

/// Runs one triple-DES block operation over exactly 8 bytes of `src`.
///
/// There is no chaining: a PIN block is a single cipher block.
pub fn crypt_block(direction: Direction, cipher: &PinCipher, src: &[u8]) -> Result<Block> {
    let mut block = to_block(src)?;
    let buf = GenericArray::from_mut_slice(&mut block);
    match direction {
        Direction::Encrypt => cipher.inner.encrypt_block(buf),
        Direction::Decrypt => cipher.inner.decrypt_block(buf),
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::key::expand;
    use hex_literal::hex;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn single_length_key_matches_des_reference_vector() {
        let cipher = expand(&hex!("0123456789abcdef")).unwrap();
        let ct = crypt_block(Direction::Encrypt, &cipher, &hex!("4e6f772069732074")).unwrap();
        assert_eq!(ct, hex!("3fa40e8a984d4815"));
        let pt = crypt_block(Direction::Decrypt, &cipher, &ct).unwrap();
        assert_eq!(pt, hex!("4e6f772069732074"));
    }

    #[test]
    fn short_keys_match_their_triple_length_expansion() {
        let block = hex!("045851b9da6a7aea");
        let k1 = hex!("0123456789abcdef");
        let k2 = hex!("fedcba9876543210");

        let single = expand(&k1).unwrap();
        let single_as_triple = expand(&[k1, k1, k1].concat()).unwrap();
        assert_eq!(
            crypt_block(Direction::Encrypt, &single, &block).unwrap(),
            crypt_block(Direction::Encrypt, &single_as_triple, &block).unwrap()
        );

        let double = expand(&[k1, k2].concat()).unwrap();
        let double_as_triple = expand(&[k1, k2, k1].concat()).unwrap();
        assert_eq!(
            crypt_block(Direction::Encrypt, &double, &block).unwrap(),
            crypt_block(Direction::Encrypt, &double_as_triple, &block).unwrap()
        );
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for key_len in [8usize, 16, 24] {
            for _ in 0..32 {
                let mut key = vec![0u8; key_len];
                let mut block = [0u8; 8];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut block);
                let cipher = expand(&key).unwrap();
                let ct = crypt_block(Direction::Encrypt, &cipher, &block).unwrap();
                let pt = crypt_block(Direction::Decrypt, &cipher, &ct).unwrap();
                assert_eq!(pt, block);
            }
        }
    }

    #[test]
    fn rejects_input_that_is_not_one_block() {
        let cipher = expand(&[0x5au8; 16]).unwrap();
        assert_eq!(
            crypt_block(Direction::Decrypt, &cipher, &[0u8; 16]).unwrap_err(),
            Error::LengthMismatch {
                expected: 8,
                actual: 16
            }
        );
    }
}
