//! Pay-to-pubkey-hash addresses.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use crate::constants::P2PKH_VERSION;
use crate::encoding::{base58check_decode, base58check_encode};
use crate::errors::SignatureError;
use crate::hash::hash160;
use crate::keys::{PublicKeyFormat, VerifyingKey};

/// A P2PKH address: `hash160` of a SEC1 public key, shown as base58check of
/// `0x00 || hash`.
///
/// The same key yields different addresses for its compressed and
/// uncompressed encodings. Equality compares the hash, so two strings that
/// decode to the same payload are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    hash: [u8; 20],
}

impl Address {
    pub fn p2pkh(key: &VerifyingKey, format: PublicKeyFormat) -> Self {
        Self::from_public_key_bytes(&key.to_sec1(format))
    }

    /// Address of an already encoded public key.
    pub fn from_public_key_bytes(sec1: &[u8]) -> Self {
        Address {
            hash: hash160(sec1),
        }
    }

    #[inline]
    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; 21];
        payload[0] = P2PKH_VERSION;
        payload[1..].copy_from_slice(&self.hash);
        f.write_str(&base58check_encode(&payload))
    }
}

impl FromStr for Address {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = base58check_decode(s.trim()).ok_or(SignatureError::InvalidAddress)?;
        match payload.split_first() {
            Some((&P2PKH_VERSION, hash)) if hash.len() == 20 => {
                let mut out = [0u8; 20];
                out.copy_from_slice(hash);
                Ok(Address { hash: out })
            }
            _ => Err(SignatureError::InvalidAddress),
        }
    }
}
