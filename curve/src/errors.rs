//! Error type shared by the field, scalar and point layers.

use thiserror::Error;

/// Errors raised by curve arithmetic and by the decoders that feed it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A scalar was zero or not below the group order `n`.
    #[error("scalar is not in the range [1, n - 1]")]
    InvalidScalar,

    /// A point failed the on-curve check, or the identity was supplied
    /// where a finite point is required.
    #[error("point is not a valid finite point on the curve")]
    InvalidPoint,

    /// Attempted to invert zero.
    ///
    /// Every caller inside this crate guarantees a nonzero operand, so seeing
    /// this error means an invariant was already broken upstream.
    #[error("modular inverse of zero")]
    ModularInverseOfZero,

    /// Malformed byte or hex input.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    /// Rejected curve parameters.
    #[error("invalid curve parameters: {0}")]
    InvalidParameters(&'static str),
}
