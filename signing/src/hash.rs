//! Hash helpers shared by addresses, WIF and both signature schemes.

use num_bigint::BigUint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256, the hash inside a P2PKH address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// Read a digest as a big-endian unsigned integer.
#[inline]
pub fn int_from_hash(digest: &[u8]) -> BigUint {
    BigUint::from_bytes_be(digest)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256(b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn test_sha256_concat_matches_single_buffer() {
        assert_eq!(sha256_concat(&[b"hello ", b"world"]), sha256(b"hello world"));
    }

    #[test]
    fn test_double_sha256() {
        assert_eq!(
            double_sha256(b"hello"),
            hex!("9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50")
        );
    }

    #[test]
    fn test_hash160_of_generator() {
        let compressed_g =
            hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
        assert_eq!(
            hash160(&compressed_g),
            hex!("751e76e8199196d454941c45d1b3a323f1433bd6")
        );
    }
}
