//! Schnorr signatures over secp256k1 with deterministic nonces.
//!
//! Signing, for secret key `d` with public key `Q = d * G`:
//!
//! 1. `k = SHA256(d || m) mod n`, failing if `k = 0`.
//! 2. `R = k * G`; if R.y is not a quadratic residue, `k = n - k`.
//! 3. `e = SHA256(R.x || compressed(Q) || m) mod n`.
//! 4. The signature is `R.x || (k + e * d mod n)`, 64 bytes.
//!
//! Verification computes `R' = s * G - e * Q` and accepts iff R' is finite,
//! R'.y is a quadratic residue and `R'.x = r`.

use core::fmt::{self, Debug, Display, Formatter};

use curve::{BigUint, Group, Projective, double_scalar_mul_basepoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SCHNORR_SIG_SIZE;
use crate::errors::SignatureError;
use crate::hash::{int_from_hash, sha256_concat};
use crate::keys::{PublicKeyFormat, SigningKey, VerifyingKey};

/// A Schnorr signature `r || s`.
///
/// `r` is the x-coordinate of the commitment R, `s` the response scalar.
/// Parsing does not range-check them; verification does.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchnorrSignature {
    r: [u8; 32],
    s: [u8; 32],
}

impl SchnorrSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SCHNORR_SIG_SIZE {
            return Err(SignatureError::InvalidSignatureEncoding);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(SchnorrSignature { r, s })
    }

    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s.trim()).map_err(|_| SignatureError::InvalidSignatureEncoding)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; SCHNORR_SIG_SIZE] {
        let mut out = [0u8; SCHNORR_SIG_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    #[inline]
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }
}

impl Display for SchnorrSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl Debug for SchnorrSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SchnorrSignature({self})")
    }
}

impl SigningKey {
    /// Sign `message`. The same key and message always give the same
    /// signature.
    pub fn sign_schnorr(&self, message: &[u8]) -> Result<SchnorrSignature, SignatureError> {
        let curve = self.curve();
        let width = curve.field_bytes();
        let secret = self.to_bytes();

        let nonce = sha256_concat(&[secret.as_slice(), message]);
        let k = curve.scalar_element(int_from_hash(&nonce));
        if k.is_zero() {
            return Err(SignatureError::DegenerateNonce);
        }

        let big_r = Projective::generator(curve)
            .scalar_mul(k.value(), curve)
            .to_affine();
        let (rx, ry) = big_r.coordinates().ok_or(SignatureError::DegenerateNonce)?;
        let k = if ry.legendre() == 1 { k } else { -k };

        let r = rx.to_bytes_be(width);
        let pk = self.verifying_key().to_sec1(PublicKeyFormat::Compressed);
        let challenge = sha256_concat(&[r.as_slice(), pk.as_slice(), message]);
        let e = curve.scalar_element(int_from_hash(&challenge));
        let s = &k + &(&e * &self.scalar().to_field(curve));

        let mut bytes = r;
        bytes.extend_from_slice(&s.to_bytes_be(width));
        SchnorrSignature::from_bytes(&bytes)
    }
}

impl VerifyingKey {
    /// Verify a Schnorr signature on `message` under this key.
    pub fn verify_schnorr(&self, message: &[u8], signature: &SchnorrSignature) -> bool {
        let curve = self.curve();
        let r = BigUint::from_bytes_be(&signature.r);
        let s = BigUint::from_bytes_be(&signature.s);
        if &r >= curve.p().as_ref() {
            debug!("schnorr: r is not below p");
            return false;
        }
        if &s >= curve.n().as_ref() {
            debug!("schnorr: s is not below n");
            return false;
        }

        let pk = self.to_sec1(PublicKeyFormat::Compressed);
        let challenge = sha256_concat(&[signature.r.as_slice(), pk.as_slice(), message]);
        let neg_e = -curve.scalar_element(int_from_hash(&challenge));

        let big_r = double_scalar_mul_basepoint(
            &s,
            neg_e.value(),
            &Projective::from(self.as_affine()),
            curve,
        )
        .to_affine();

        let Some((x, y)) = big_r.coordinates() else {
            debug!("schnorr: R' is the identity");
            return false;
        };
        if y.legendre() != 1 {
            debug!("schnorr: R'.y is not a quadratic residue");
            return false;
        }
        if x.value() != &r {
            debug!("schnorr: R'.x does not match r");
            return false;
        }
        true
    }

    /// Verify a raw 64-byte signature. Any other length fails.
    pub fn verify_schnorr_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        match SchnorrSignature::from_bytes(signature) {
            Ok(signature) => self.verify_schnorr(message, &signature),
            Err(_) => {
                debug!(len = signature.len(), "schnorr: wrong signature length");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_signature_bytes_round_trip() {
        let bytes: Vec<u8> = (0..64).collect();
        let sig = SchnorrSignature::from_bytes(&bytes).expect("64 bytes");
        assert_eq!(sig.to_bytes().as_slice(), bytes.as_slice());
        assert_eq!(sig.r()[0], 0);
        assert_eq!(sig.s()[0], 32);
        assert_eq!(SchnorrSignature::from_hex(&sig.to_string()), Ok(sig));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            SchnorrSignature::from_bytes(&[0u8; 63]),
            Err(SignatureError::InvalidSignatureEncoding)
        );
        assert_eq!(
            SchnorrSignature::from_hex("zz"),
            Err(SignatureError::InvalidSignatureEncoding)
        );
    }

    #[test]
    fn test_display_is_lower_hex() {
        let sig = SchnorrSignature::from_bytes(&[0xABu8; 64]).expect("64 bytes");
        assert_eq!(sig.to_string(), "ab".repeat(64));
    }

    #[test]
    fn test_generator_key_vector() {
        let sk = SigningKey::from_bytes(&[1u8]).expect("key one");
        let sig = sk.sign_schnorr(&[0u8; 32]).expect("sign");
        assert_eq!(
            sig.to_bytes(),
            hex!(
                "787A848E71043D280C50470E8E1532B2DD5D20EE912A45DBDD2BD1DFBF187EF6"
                "7031A98831859DC34DFFEEDDA86831842CCD0079E1F92AF177F7F22CC1DCED05"
            )
        );
        assert!(sk.verifying_key().verify_schnorr(&[0u8; 32], &sig));
    }

    #[test]
    fn test_rejects_r_not_below_p() {
        let vk = SigningKey::from_bytes(&[1u8]).expect("key one").verifying_key();
        let mut bytes = [0xFFu8; 64];
        bytes[32..].fill(0);
        assert!(!vk.verify_schnorr_bytes(&[0u8; 32], &bytes));
    }

    #[test]
    fn test_rejects_s_not_below_n() {
        let sk = SigningKey::from_bytes(&[1u8]).expect("key one");
        let sig = sk.sign_schnorr(b"msg").expect("sign");
        let mut bytes = sig.to_bytes();
        bytes[32..].fill(0xFF);
        assert!(!sk.verifying_key().verify_schnorr_bytes(b"msg", &bytes));
    }

    #[test]
    fn test_deterministic() {
        let sk = SigningKey::from_bytes(&[7u8; 32]).expect("key");
        assert_eq!(sk.sign_schnorr(b"same"), sk.sign_schnorr(b"same"));
        assert_ne!(sk.sign_schnorr(b"same"), sk.sign_schnorr(b"other"));
    }
}
