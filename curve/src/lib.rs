//! Elliptic curve arithmetic over short Weierstrass curves, with secp256k1
//! as the built-in instance.
//!
//! This crate provides a prime field element type that carries its modulus,
//! affine and projective curve points, validated scalars, Cipolla square
//! roots, and helpers for random sampling. Curve parameters are an explicit
//! [`CurveParameters`] value rather than global constants.
//!
//! Scalar multiplication is variable time.

mod affine;
mod errors;
mod field;
mod group;
mod msm;
mod params;
mod projective;
mod random;
mod scalar;
mod sqrt;

pub use affine::Affine;
pub use errors::CurveError;
pub use field::FieldElement;
pub use group::{Group, ScalarBits};
pub use msm::{double_scalar_mul, double_scalar_mul_basepoint};
pub use num_bigint::BigUint;
pub use params::CurveParameters;
pub use projective::Projective;
pub use random::{random_below, random_nonzero_below, RandomElement};
pub use scalar::Scalar;
