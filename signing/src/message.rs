//! Signed messages that prove control of a P2PKH address.
//!
//! The signed digest is `SHA256(SHA256(magic || compact_size(len) || message))`.
//! A signature is `header || r || s`, 65 bytes, carried as base64. The header
//! is 27 plus the parity of R.y, plus 4 when the signer's address uses the
//! compressed key.
//!
//! Verification needs only the address: it lifts `r` back to the two points
//! with that x-coordinate, recovers a candidate public key from each, and
//! accepts if either one hashes to the address. This relies on secp256k1's
//! cofactor of 1 and on `r < n <= p`, so that `r` itself is R.x.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use curve::{Affine, BigUint, CurveParameters, Projective, double_scalar_mul_basepoint};
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::address::Address;
use crate::constants::{
    HEADER_BASE, HEADER_COMPRESSED_OFFSET, HEADER_MAX, MESSAGE_MAGIC, MESSAGE_SIG_SIZE,
};
use crate::ecdsa::{self, EcdsaSignature, in_scalar_range};
use crate::errors::SignatureError;
use crate::hash::{double_sha256, int_from_hash};
use crate::keys::{PublicKeyFormat, SigningKey, VerifyingKey};

/// A 65-byte recoverable message signature.
///
/// Serialized as its 65 raw bytes, so deserialization applies the same
/// length and header checks as [`MessageSignature::from_bytes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageSignature {
    header: u8,
    r: [u8; 32],
    s: [u8; 32],
}

impl MessageSignature {
    /// Parse `header || r || s`. Only the length and the header range are
    /// checked here; range checks on r and s happen during verification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != MESSAGE_SIG_SIZE {
            return Err(SignatureError::InvalidSignatureEncoding);
        }
        let header = bytes[0];
        if !(HEADER_BASE..=HEADER_MAX).contains(&header) {
            return Err(SignatureError::InvalidSignatureEncoding);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..]);
        Ok(MessageSignature { header, r, s })
    }

    pub fn to_bytes(&self) -> [u8; MESSAGE_SIG_SIZE] {
        let mut out = [0u8; MESSAGE_SIG_SIZE];
        out[0] = self.header;
        out[1..33].copy_from_slice(&self.r);
        out[33..].copy_from_slice(&self.s);
        out
    }

    pub fn from_base64(encoded: &str) -> Result<Self, SignatureError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| SignatureError::InvalidSignatureEncoding)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    #[inline]
    pub fn header(&self) -> u8 {
        self.header
    }

    /// Whether the header says the signer's key is used compressed.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.header >= HEADER_BASE + HEADER_COMPRESSED_OFFSET
    }

    #[inline]
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    fn format(&self) -> PublicKeyFormat {
        if self.is_compressed() {
            PublicKeyFormat::Compressed
        } else {
            PublicKeyFormat::Uncompressed
        }
    }
}

impl Display for MessageSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for MessageSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl Serialize for MessageSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MessageSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        MessageSignature::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

/// Double-SHA-256 of the magic prefix, the compact-size length and `message`.
pub fn message_digest(message: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(MESSAGE_MAGIC.len() + 9 + message.len());
    data.extend_from_slice(MESSAGE_MAGIC);
    write_compact_size(&mut data, message.len() as u64);
    data.extend_from_slice(message);
    double_sha256(&data)
}

fn write_compact_size(out: &mut Vec<u8>, len: u64) {
    match len {
        0..=0xfc => out.push(len as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(len as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(len as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&len.to_le_bytes());
        }
    }
}

/// Sign `message` for the address of `key` in `format`.
pub fn sign_message<R: Rng + ?Sized>(
    key: &SigningKey,
    message: &[u8],
    format: PublicKeyFormat,
    rng: &mut R,
) -> Result<MessageSignature, SignatureError> {
    let z = int_from_hash(&message_digest(message));
    let (signature, recovery) = ecdsa::sign_prehash(key, &z, rng)?;

    let mut header = HEADER_BASE + recovery;
    if format == PublicKeyFormat::Compressed {
        header += HEADER_COMPRESSED_OFFSET;
    }
    Ok(MessageSignature {
        header,
        r: to_array(signature.r())?,
        s: to_array(signature.s())?,
    })
}

/// Check a base64 message signature against a P2PKH address on secp256k1.
pub fn verify_message(address: &str, message: &[u8], signature: &str) -> bool {
    verify_message_on(&CurveParameters::secp256k1(), address, message, signature)
}

pub fn verify_message_on(
    curve: &CurveParameters,
    address: &str,
    message: &[u8],
    signature: &str,
) -> bool {
    let expected = match Address::from_str(address) {
        Ok(address) => address,
        Err(err) => {
            debug!(%err, "message: unparseable address");
            return false;
        }
    };
    let signature = match MessageSignature::from_base64(signature) {
        Ok(signature) => signature,
        Err(err) => {
            debug!(%err, "message: unparseable signature");
            return false;
        }
    };

    let z = int_from_hash(&message_digest(message));
    let format = signature.format();
    let matched = recover_candidates(curve, &signature, &z)
        .iter()
        .filter_map(|point| encode(point, format, curve))
        .any(|sec1| Address::from_public_key_bytes(&sec1) == expected);

    if !matched {
        debug!(%expected, "message: no recovered key matches the address");
    }
    matched
}

/// Public keys `r^-1 * (s * R - z * G)` for both points R with x = r.
///
/// Empty when r or s is out of range or r is not an x-coordinate on the curve.
fn recover_candidates(
    curve: &CurveParameters,
    signature: &MessageSignature,
    z: &BigUint,
) -> Vec<Affine> {
    let r = BigUint::from_bytes_be(&signature.r);
    let s = BigUint::from_bytes_be(&signature.s);
    if !in_scalar_range(&r, curve) || !in_scalar_range(&s, curve) || &r >= curve.p().as_ref() {
        debug!("message: r or s outside [1, n - 1]");
        return Vec::new();
    }

    let x = curve.base_element(r.clone());
    let Some(y) = curve.rhs(&x).sqrt() else {
        debug!("message: r is not the x-coordinate of a curve point");
        return Vec::new();
    };
    let Ok(r_inv) = curve.scalar_element(r).invert() else {
        return Vec::new();
    };

    let u1 = &(-curve.scalar_element(z.clone())) * &r_inv;
    let u2 = &curve.scalar_element(s) * &r_inv;

    [y.clone(), -y]
        .into_iter()
        .filter_map(|y| {
            let big_r = Projective::from(Affine::new(x.clone(), y));
            let q = double_scalar_mul_basepoint(u1.value(), u2.value(), &big_r, curve).to_affine();
            (!q.is_infinity()).then_some(q)
        })
        .collect()
}

fn encode(point: &Affine, format: PublicKeyFormat, curve: &CurveParameters) -> Option<Vec<u8>> {
    match format {
        PublicKeyFormat::Compressed => point.to_compressed(curve).ok(),
        PublicKeyFormat::Uncompressed => point.to_uncompressed(curve).ok(),
    }
}

fn to_array(value: &BigUint) -> Result<[u8; 32], SignatureError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(SignatureError::InvalidSignatureEncoding);
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

impl SigningKey {
    /// Sign `message` for this key's address in `format`.
    pub fn sign_message<R: Rng + ?Sized>(
        &self,
        message: &[u8],
        format: PublicKeyFormat,
        rng: &mut R,
    ) -> Result<MessageSignature, SignatureError> {
        sign_message(self, message, format, rng)
    }
}

impl VerifyingKey {
    /// Verify a message signature against this key directly, with no
    /// recovery or address step.
    pub fn verify_message(&self, message: &[u8], signature: &MessageSignature) -> bool {
        let z = int_from_hash(&message_digest(message));
        let signature = EcdsaSignature::new(
            BigUint::from_bytes_be(&signature.r),
            BigUint::from_bytes_be(&signature.s),
        );
        ecdsa::verify_prehash(self, &z, &signature)
    }
}
