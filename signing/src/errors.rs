//! Error types for key handling and signing.

use curve::CurveError;
use thiserror::Error;

/// Errors that can occur while parsing keys and signatures or while signing.
///
/// Verification never returns these; a signature that fails any check simply
/// does not verify.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A private scalar was zero or not below the group order.
    #[error("scalar is outside [1, n - 1]")]
    InvalidScalar,

    /// A public key was off the curve or the point at infinity.
    #[error("point is not a valid non-identity curve point")]
    InvalidPoint,

    /// Wrong length, unknown header byte, or malformed base64/hex.
    #[error("malformed signature encoding")]
    InvalidSignatureEncoding,

    /// Malformed SEC1, WIF or raw key bytes.
    #[error("malformed key encoding")]
    InvalidKeyEncoding,

    /// Bad base58, checksum, length or version byte.
    #[error("malformed address")]
    InvalidAddress,

    /// A deterministic nonce reduced to zero, or gave r = 0 or s = 0.
    #[error("derived nonce is degenerate")]
    DegenerateNonce,

    /// A prehash given to deterministic ECDSA was not 32 bytes.
    #[error("digest must be 32 bytes")]
    InvalidDigestLength,

    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl SignatureError {
    /// Surface scalar and point failures from the curve layer under this
    /// crate's own kinds.
    pub(crate) fn lift(err: CurveError) -> Self {
        match err {
            CurveError::InvalidScalar => SignatureError::InvalidScalar,
            CurveError::InvalidPoint => SignatureError::InvalidPoint,
            CurveError::InvalidEncoding(_) => SignatureError::InvalidKeyEncoding,
            other => SignatureError::Curve(other),
        }
    }
}
