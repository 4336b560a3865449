use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;
use tracing::trace;

use crate::{CurveParameters, FieldElement, Scalar};

/// Uniform integer in `[0, bound)` by rejection sampling over `bound`-width
/// byte strings.
///
/// # Panics
///
/// If `bound` is zero.
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    assert!(!bound.is_zero(), "random_below: bound must be nonzero");
    let bits = bound.bits();
    let mut buf = vec![0u8; bits.div_ceil(8) as usize];
    let excess = (buf.len() as u64 * 8 - bits) as u32;

    loop {
        rng.fill(buf.as_mut_slice());
        if let Some(top) = buf.first_mut() {
            *top &= 0xffu8 >> excess;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return candidate;
        }
        trace!(bits, "rejected out-of-range sample");
    }
}

/// Uniform integer in `[1, bound)`.
///
/// # Panics
///
/// If `bound` is 0 or 1.
pub fn random_nonzero_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    assert!(bound > &BigUint::one(), "random_nonzero_below: bound must exceed 1");
    loop {
        let value = random_below(rng, bound);
        if !value.is_zero() {
            return value;
        }
    }
}

/// Helper trait for sampling random elements bound to a curve.
pub trait RandomElement: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R, curve: &CurveParameters) -> Self;
}

impl RandomElement for FieldElement {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R, curve: &CurveParameters) -> Self {
        curve.base_element(random_below(rng, curve.p()))
    }
}

impl RandomElement for Scalar {
    /// Uniform in `[1, n - 1]`.
    fn random<R: Rng + ?Sized>(rng: &mut R, curve: &CurveParameters) -> Self {
        loop {
            if let Ok(scalar) = Scalar::new(random_nonzero_below(rng, curve.n()), curve) {
                return scalar;
            }
        }
    }
}
