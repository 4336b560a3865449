//! Base58check: base58 with a trailing four-byte double-SHA-256 checksum.

use crate::constants::CHECKSUM_SIZE;
use crate::hash::double_sha256;

pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_SIZE);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_SIZE]);
    bs58::encode(data).into_string()
}

/// Decode and strip the checksum. `None` on bad characters, short input or
/// checksum mismatch.
pub fn base58check_decode(encoded: &str) -> Option<Vec<u8>> {
    let mut data = bs58::decode(encoded).into_vec().ok()?;
    if data.len() < CHECKSUM_SIZE {
        return None;
    }
    let checksum = data.split_off(data.len() - CHECKSUM_SIZE);
    (double_sha256(&data)[..CHECKSUM_SIZE] == checksum[..]).then_some(data)
}
