//! Plain ECDSA over an already hashed message.
//!
//! Nonces come either from a caller's `rng` or, deterministically, from
//! RFC 6979 with HMAC-SHA-256. Deterministic signatures are low-s
//! normalized; verification accepts either half.

use curve::{
    BigUint, CurveError, CurveParameters, FieldElement, Group, Projective, RandomElement, Scalar,
    double_scalar_mul_basepoint,
};
use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};
use num_traits::Zero;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha2::digest::consts::U32;
use sha2::digest::generic_array::GenericArray;
use tracing::{debug, trace};

use crate::constants::DIGEST_SIZE;
use crate::errors::SignatureError;
use crate::hash::{int_from_hash, sha256};
use crate::keys::{SigningKey, VerifyingKey};

/// An ECDSA signature `(r, s)`, both in `[1, n - 1]` when produced here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcdsaSignature {
    r: BigUint,
    s: BigUint,
}

/// ASN.1 `SEQUENCE { r INTEGER, s INTEGER }`.
#[derive(Sequence)]
struct DerSignature<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EcdsaSignature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        EcdsaSignature { r, s }
    }

    #[inline]
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Whether `s <= (n - 1) / 2`.
    pub fn is_low_s(&self, curve: &CurveParameters) -> bool {
        self.s <= curve.n().as_ref() >> 1u32
    }

    /// Replace a high `s` with `n - s`. Both verify against the same key and
    /// digest. An `s` outside `[1, n - 1]` is left as it is.
    pub fn normalize_s(&self, curve: &CurveParameters) -> Self {
        let n = curve.n().as_ref();
        if self.is_low_s(curve) || &self.s >= n {
            return self.clone();
        }
        EcdsaSignature {
            r: self.r.clone(),
            s: n - &self.s,
        }
    }

    /// Strict DER encoding of `(r, s)`.
    pub fn to_der(&self) -> Result<Vec<u8>, SignatureError> {
        let r = self.r.to_bytes_be();
        let s = self.s.to_bytes_be();
        DerSignature {
            r: UintRef::new(&r).map_err(|_| SignatureError::InvalidSignatureEncoding)?,
            s: UintRef::new(&s).map_err(|_| SignatureError::InvalidSignatureEncoding)?,
        }
        .to_der()
        .map_err(|_| SignatureError::InvalidSignatureEncoding)
    }

    /// Parse a strict DER signature. Negative or non-minimal integers and
    /// trailing bytes are rejected; r and s are range-checked at verification.
    pub fn from_der(bytes: &[u8]) -> Result<Self, SignatureError> {
        let decoded = DerSignature::from_der(bytes).map_err(|err| {
            debug!(%err, "ecdsa: malformed DER signature");
            SignatureError::InvalidSignatureEncoding
        })?;
        Ok(EcdsaSignature::new(
            BigUint::from_bytes_be(decoded.r.as_bytes()),
            BigUint::from_bytes_be(decoded.s.as_bytes()),
        ))
    }
}

/// Sign the digest `z` with a fresh nonce from `rng`.
///
/// Returns the signature and the parity of R.y, which lets a verifier pick
/// the right R when recovering the public key. Nonces that give r = 0 or
/// s = 0 are discarded and redrawn.
pub fn sign_prehash<R: Rng + ?Sized>(
    key: &SigningKey,
    z: &BigUint,
    rng: &mut R,
) -> Result<(EcdsaSignature, u8), SignatureError> {
    let curve = key.curve();
    let z = curve.scalar_element(z.clone());

    loop {
        let k = Scalar::random(rng, curve);
        if let Some(signed) = sign_with_nonce(key, &z, &k)? {
            return Ok(signed);
        }
    }
}

/// Sign a 32-byte digest with the RFC 6979 nonce for this key and digest.
///
/// The result is low-s normalized, and the returned parity is that of the R
/// matching the normalized signature. Only curves with a 256-bit order are
/// supported.
pub fn sign_prehash_rfc6979(
    key: &SigningKey,
    prehash: &[u8],
) -> Result<(EcdsaSignature, u8), SignatureError> {
    let curve = key.curve();
    if prehash.len() != DIGEST_SIZE {
        return Err(SignatureError::InvalidDigestLength);
    }
    let z = curve.scalar_element(int_from_hash(prehash));
    let k = rfc6979_nonce(key, &z)?;

    // RFC 6979 has no second nonce to fall back on.
    let (signature, recovery) =
        sign_with_nonce(key, &z, &k)?.ok_or(SignatureError::DegenerateNonce)?;
    if signature.is_low_s(curve) {
        Ok((signature, recovery))
    } else {
        Ok((signature.normalize_s(curve), recovery ^ 1))
    }
}

/// The RFC 6979 nonce for `key` and the reduced digest `z`.
pub(crate) fn rfc6979_nonce(key: &SigningKey, z: &FieldElement) -> Result<Scalar, SignatureError> {
    let curve = key.curve();
    if curve.n().bits() != 8 * DIGEST_SIZE as u64 {
        return Err(CurveError::InvalidParameters(
            "deterministic nonces need a 256-bit group order",
        )
        .into());
    }
    let k = rfc6979::generate_k::<Sha256, U32>(
        &to_generic(key.scalar().value()),
        &to_generic(curve.n()),
        &to_generic(z.value()),
        &[],
    );
    Scalar::from_bytes_be(k.as_slice(), curve).map_err(SignatureError::lift)
}

/// `(r, s)` for nonce `k`, or `None` when r or s comes out zero.
fn sign_with_nonce(
    key: &SigningKey,
    z: &FieldElement,
    k: &Scalar,
) -> Result<Option<(EcdsaSignature, u8)>, SignatureError> {
    let curve = key.curve();
    let big_r = Projective::generator(curve).scalar_mul(k, curve).to_affine();
    let Some((rx, ry)) = big_r.coordinates() else {
        trace!("nonce produced the identity, retrying");
        return Ok(None);
    };

    let r = rx.reduce_into(curve.n());
    if r.is_zero() {
        trace!("r = 0, retrying");
        return Ok(None);
    }

    let d = key.scalar().to_field(curve);
    let k_inv = k.to_field(curve).invert()?;
    let s = &k_inv * &(z + &(&r * &d));
    if s.is_zero() {
        trace!("s = 0, retrying");
        return Ok(None);
    }

    let recovery = u8::from(ry.is_odd());
    Ok(Some((EcdsaSignature::new(r.value().clone(), s.value().clone()), recovery)))
}

/// Left-pad `value` to 32 bytes. Callers guarantee `value < 2^256`.
fn to_generic(value: &BigUint) -> GenericArray<u8, U32> {
    let bytes = value.to_bytes_be();
    let mut out = GenericArray::default();
    out[DIGEST_SIZE - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Verify `signature` on the digest `z` against a known public key.
pub fn verify_prehash(key: &VerifyingKey, z: &BigUint, signature: &EcdsaSignature) -> bool {
    let curve = key.curve();
    if !in_scalar_range(&signature.r, curve) || !in_scalar_range(&signature.s, curve) {
        debug!("ecdsa: r or s outside [1, n - 1]");
        return false;
    }

    let Ok(s_inv) = curve.scalar_element(signature.s.clone()).invert() else {
        return false;
    };
    let u1 = &curve.scalar_element(z.clone()) * &s_inv;
    let u2 = &curve.scalar_element(signature.r.clone()) * &s_inv;

    let big_r = double_scalar_mul_basepoint(
        u1.value(),
        u2.value(),
        &Projective::from(key.as_affine()),
        curve,
    )
    .to_affine();

    match big_r.x() {
        None => {
            debug!("ecdsa: u1 * G + u2 * Q is the identity");
            false
        }
        Some(x) if x.reduce_into(curve.n()).value() != &signature.r => {
            debug!("ecdsa: R.x does not match r");
            false
        }
        Some(_) => true,
    }
}

pub(crate) fn in_scalar_range(value: &BigUint, curve: &CurveParameters) -> bool {
    !value.is_zero() && value < curve.n().as_ref()
}

impl SigningKey {
    /// Deterministic low-s ECDSA over `SHA256(message)`.
    pub fn sign_ecdsa(&self, message: &[u8]) -> Result<EcdsaSignature, SignatureError> {
        sign_prehash_rfc6979(self, &sha256(message)).map(|(signature, _)| signature)
    }
}

impl VerifyingKey {
    /// Verify an ECDSA signature over `SHA256(message)`. High-s signatures
    /// are accepted.
    pub fn verify_ecdsa(&self, message: &[u8], signature: &EcdsaSignature) -> bool {
        verify_prehash(self, &int_from_hash(&sha256(message)), signature)
    }
}
