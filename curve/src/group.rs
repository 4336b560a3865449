use num_bigint::BigUint;

use crate::{CurveParameters, Scalar};

/// Bit access for anything usable as a multiplier.
pub trait ScalarBits {
    /// Position of the highest set bit plus one; zero for zero.
    fn bit_len(&self) -> u64;
    fn bit(&self, index: u64) -> bool;
}

impl ScalarBits for BigUint {
    #[inline]
    fn bit_len(&self) -> u64 {
        self.bits()
    }

    #[inline]
    fn bit(&self, index: u64) -> bool {
        BigUint::bit(self, index)
    }
}

impl ScalarBits for Scalar {
    #[inline]
    fn bit_len(&self) -> u64 {
        self.value().bits()
    }

    #[inline]
    fn bit(&self, index: u64) -> bool {
        self.value().bit(index)
    }
}

/// Group law shared by the affine and projective representations.
///
/// Implementations keep the identity as its own variant, so `identity()` needs
/// no curve; everything that may hit the doubling formula takes the curve
/// parameters explicitly.
pub trait Group: Sized + Clone + PartialEq {
    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator(curve: &CurveParameters) -> Self;
    fn add_point(&self, other: &Self, curve: &CurveParameters) -> Self;
    fn double(&self, curve: &CurveParameters) -> Self;
    fn negate(&self) -> Self;

    #[inline]
    fn sub_point(&self, other: &Self, curve: &CurveParameters) -> Self {
        self.add_point(&other.negate(), curve)
    }

    /// Double-and-add, most significant bit first.
    ///
    /// The accumulator starts at the identity and every bit, including the
    /// top one, costs a doubling followed by an optional addition. A zero
    /// scalar therefore yields the identity. Not constant time.
    fn scalar_mul<S: ScalarBits + ?Sized>(&self, scalar: &S, curve: &CurveParameters) -> Self {
        let mut result = Self::identity();
        if self.is_identity() {
            return result;
        }

        for i in (0..scalar.bit_len()).rev() {
            result = result.double(curve);
            if scalar.bit(i) {
                result = result.add_point(self, curve);
            }
        }

        result
    }

    fn mul_u64(&self, n: u64, curve: &CurveParameters) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::identity();
        let mut temp = self.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result.add_point(&temp, curve);
            }
            temp = temp.double(curve);
            bits >>= 1;
        }

        result
    }

    fn multi_scalar_mul(points: &[Self], scalars: &[BigUint], curve: &CurveParameters) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "Points and scalars must have same length"
        );

        let mut result = Self::identity();
        for (point, scalar) in points.iter().zip(scalars.iter()) {
            result = result.add_point(&point.scalar_mul(scalar, curve), curve);
        }
        result
    }
}
