//! Signing and verifying keys.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use curve::{Affine, CurveParameters, Group, Projective, RandomElement, Scalar};
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::constants::{SK_SIZE, WIF_COMPRESSED_FLAG, WIF_VERSION};
use crate::encoding::{base58check_decode, base58check_encode};
use crate::errors::SignatureError;

/// How a public key is serialized, and therefore which address it maps to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicKeyFormat {
    /// 33 bytes: `0x02`/`0x03` parity prefix and x.
    Compressed,
    /// 65 bytes: `0x04`, x and y.
    Uncompressed,
}

/// A secret scalar `d` in `[1, n - 1]`, bound to its curve.
///
/// Serialized as its fixed-width big-endian bytes on secp256k1.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    scalar: Scalar,
    curve: Arc<CurveParameters>,
}

/// A public point `Q = d * G`.
///
/// Always on its curve and never the identity; every constructor checks this,
/// so verification does not have to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: Affine,
    curve: Arc<CurveParameters>,
}

impl SigningKey {
    /// Bind `scalar` to `curve`, checking it lies in `[1, n - 1]` for that
    /// curve's order.
    pub fn from_scalar(scalar: Scalar, curve: Arc<CurveParameters>) -> Result<Self, SignatureError> {
        let scalar = Scalar::new(scalar.value().clone(), &curve).map_err(SignatureError::lift)?;
        Ok(SigningKey { scalar, curve })
    }

    /// Parse a big-endian secp256k1 private key of at most 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let curve = CurveParameters::secp256k1();
        let scalar = Scalar::from_bytes_be(bytes, &curve).map_err(SignatureError::lift)?;
        Ok(SigningKey { scalar, curve })
    }

    /// Parse a hex secp256k1 private key, normally 64 characters.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let curve = CurveParameters::secp256k1();
        let scalar = Scalar::from_hex(s, &curve).map_err(SignatureError::lift)?;
        Ok(SigningKey { scalar, curve })
    }

    /// Draw a uniform secp256k1 key from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let curve = CurveParameters::secp256k1();
        let scalar = Scalar::random(rng, &curve);
        SigningKey { scalar, curve }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.scalar.to_bytes(&self.curve)
    }

    #[inline]
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    #[inline]
    pub fn curve(&self) -> &Arc<CurveParameters> {
        &self.curve
    }

    /// `d * G`.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = Projective::generator(&self.curve)
            .scalar_mul(&self.scalar, &self.curve)
            .to_affine();
        VerifyingKey {
            point,
            curve: Arc::clone(&self.curve),
        }
    }

    /// Shared point `d * Q` with a peer's public key. Both parties arrive at
    /// the same point.
    pub fn diffie_hellman(&self, peer: &VerifyingKey) -> Result<Affine, SignatureError> {
        if self.curve != peer.curve {
            return Err(SignatureError::InvalidPoint);
        }
        let shared = Projective::from(&peer.point)
            .scalar_mul(&self.scalar, &self.curve)
            .to_affine();
        if shared.is_infinity() {
            return Err(SignatureError::InvalidPoint);
        }
        Ok(shared)
    }

    /// Wallet Import Format: base58check of `0x80 || d`, followed by `0x01`
    /// when the key is meant to be used compressed.
    pub fn to_wif(&self, format: PublicKeyFormat) -> String {
        let mut payload = Vec::with_capacity(SK_SIZE + 2);
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&self.to_bytes());
        if format == PublicKeyFormat::Compressed {
            payload.push(WIF_COMPRESSED_FLAG);
        }
        base58check_encode(&payload)
    }

    /// Parse a WIF string, returning the key and the public key format its
    /// payload length implies.
    pub fn from_wif(wif: &str) -> Result<(Self, PublicKeyFormat), SignatureError> {
        let payload = base58check_decode(wif.trim()).ok_or(SignatureError::InvalidKeyEncoding)?;
        let (format, body) = match payload.as_slice() {
            [WIF_VERSION, body @ ..] if body.len() == SK_SIZE => {
                (PublicKeyFormat::Uncompressed, body)
            }
            [WIF_VERSION, body @ .., WIF_COMPRESSED_FLAG] if body.len() == SK_SIZE => {
                (PublicKeyFormat::Compressed, body)
            }
            _ => return Err(SignatureError::InvalidKeyEncoding),
        };
        Ok((Self::from_bytes(body)?, format))
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("curve", &self.curve.name())
            .finish_non_exhaustive()
    }
}

impl VerifyingKey {
    /// Accept `point` if it is a finite point on `curve`.
    pub fn from_affine(point: Affine, curve: Arc<CurveParameters>) -> Result<Self, SignatureError> {
        if point.is_infinity() || !point.is_on_curve(&curve) {
            return Err(SignatureError::InvalidPoint);
        }
        Ok(VerifyingKey { point, curve })
    }

    /// Parse a compressed or uncompressed secp256k1 public key.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self, SignatureError> {
        Self::from_sec1_on(bytes, CurveParameters::secp256k1())
    }

    pub fn from_sec1_on(bytes: &[u8], curve: Arc<CurveParameters>) -> Result<Self, SignatureError> {
        let point = Affine::from_sec1(bytes, &curve).map_err(SignatureError::lift)?;
        Self::from_affine(point, curve)
    }

    pub fn to_sec1(&self, format: PublicKeyFormat) -> Vec<u8> {
        let encoded = match format {
            PublicKeyFormat::Compressed => self.point.to_compressed(&self.curve),
            PublicKeyFormat::Uncompressed => self.point.to_uncompressed(&self.curve),
        };
        match encoded {
            Ok(bytes) => bytes,
            Err(_) => unreachable!("verifying keys are never the identity"),
        }
    }

    /// P2PKH address of this key in `format`.
    pub fn address(&self, format: PublicKeyFormat) -> Address {
        Address::p2pkh(self, format)
    }

    #[inline]
    pub fn as_affine(&self) -> &Affine {
        &self.point
    }

    #[inline]
    pub fn curve(&self) -> &Arc<CurveParameters> {
        &self.curve
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

impl Serialize for SigningKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SigningKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        SigningKey::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_sec1(PublicKeyFormat::Compressed).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        VerifyingKey::from_sec1(&bytes).map_err(D::Error::custom)
    }
}
