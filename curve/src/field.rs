//! Arithmetic modulo a prime.
//!
//! A [`FieldElement`] carries its modulus next to its value, so the same type
//! serves the base field (mod `p`) and the scalar field (mod `n`). Every
//! constructor and operator leaves the value reduced into `[0, modulus)`.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CurveError;

/// Element of the prime field `Z / modulus`.
///
/// Deserialization rejects a modulus below 2 and any value that is not
/// already reduced.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl FieldElement {
    /// Reduce `value` modulo `modulus`.
    pub fn new(value: BigUint, modulus: &Arc<BigUint>) -> Self {
        FieldElement {
            value: value % modulus.as_ref(),
            modulus: Arc::clone(modulus),
        }
    }

    pub fn from_u64(value: u64, modulus: &Arc<BigUint>) -> Self {
        Self::new(BigUint::from(value), modulus)
    }

    pub fn zero(modulus: &Arc<BigUint>) -> Self {
        FieldElement {
            value: BigUint::zero(),
            modulus: Arc::clone(modulus),
        }
    }

    pub fn one(modulus: &Arc<BigUint>) -> Self {
        Self::new(BigUint::one(), modulus)
    }

    /// Interpret big-endian bytes as an integer and reduce it.
    pub fn from_bytes_be(bytes: &[u8], modulus: &Arc<BigUint>) -> Self {
        Self::new(BigUint::from_bytes_be(bytes), modulus)
    }

    /// Like [`FieldElement::from_bytes_be`] but rejects integers that are not
    /// already below the modulus.
    pub fn from_canonical_bytes(bytes: &[u8], modulus: &Arc<BigUint>) -> Result<Self, CurveError> {
        let value = BigUint::from_bytes_be(bytes);
        if &value >= modulus.as_ref() {
            return Err(CurveError::InvalidEncoding("integer is not below the modulus"));
        }
        Ok(FieldElement {
            value,
            modulus: Arc::clone(modulus),
        })
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    #[inline]
    pub fn modulus(&self) -> &Arc<BigUint> {
        &self.modulus
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }

    pub fn square(&self) -> Self {
        self.mul_ref(self)
    }

    pub fn cube(&self) -> Self {
        self.square().mul_ref(self)
    }

    pub fn double(&self) -> Self {
        self.add_ref(self)
    }

    /// Modular exponentiation by an arbitrary non-negative exponent.
    pub fn pow(&self, exp: &BigUint) -> Self {
        FieldElement {
            value: self.value.modpow(exp, &self.modulus),
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Multiplicative inverse via Fermat's little theorem, `a^(m - 2)`.
    ///
    /// The modulus must be prime.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::ModularInverseOfZero);
        }
        let exp = self.modulus.as_ref() - BigUint::from(2u32);
        Ok(self.pow(&exp))
    }

    /// Fixed-width big-endian encoding, left padded with zeros.
    ///
    /// `len` must be at least the byte length of the modulus.
    pub fn to_bytes_be(&self, len: usize) -> Vec<u8> {
        let raw = self.value.to_bytes_be();
        debug_assert!(raw.len() <= len, "field element wider than {len} bytes");
        let mut out = vec![0u8; len.saturating_sub(raw.len())];
        out.extend_from_slice(&raw);
        out
    }

    /// Re-reduce this element's integer value under a different modulus.
    pub fn reduce_into(&self, modulus: &Arc<BigUint>) -> Self {
        Self::new(self.value.clone(), modulus)
    }

    #[inline]
    fn check_same_field(&self, rhs: &Self) {
        debug_assert_eq!(self.modulus, rhs.modulus, "mixed field moduli");
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        let mut value = &self.value + &rhs.value;
        if value >= *self.modulus {
            value -= self.modulus.as_ref();
        }
        FieldElement {
            value,
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        let value = if self.value >= rhs.value {
            &self.value - &rhs.value
        } else {
            self.modulus.as_ref() - &rhs.value + &self.value
        };
        FieldElement {
            value,
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        FieldElement {
            value: (&self.value * &rhs.value) % self.modulus.as_ref(),
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn neg_ref(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        FieldElement {
            value: self.modulus.as_ref() - &self.value,
            modulus: Arc::clone(&self.modulus),
        }
    }

    fn div_ref(&self, rhs: &Self) -> Self {
        match rhs.invert() {
            Ok(inv) => self.mul_ref(&inv),
            Err(err) => panic!("{err}"),
        }
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $inner:ident) => {
        impl $trait<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                self.$inner(rhs)
            }
        }

        impl $trait<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$inner(&rhs)
            }
        }

        impl $trait<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                self.$inner(rhs)
            }
        }

        impl $trait<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$inner(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, add_ref);
impl_binop!(Sub, sub, sub_ref);
impl_binop!(Mul, mul, mul_ref);
// Division by zero panics: the point formulas never divide by a zero
// denominator once their special cases have been peeled off.
impl_binop!(Div, div, div_ref);

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        self.neg_ref()
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        self.neg_ref()
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = ((self.modulus.bits() + 7) / 8 * 2) as usize;
        write!(f, "0x{:0width$x}", self.value, width = width)
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "FieldElement")]
        struct Raw {
            value: BigUint,
            modulus: Arc<BigUint>,
        }

        let Raw { value, modulus } = Raw::deserialize(deserializer)?;
        if modulus.as_ref() <= &BigUint::one() {
            return Err(D::Error::custom("field modulus must exceed 1"));
        }
        if &value >= modulus.as_ref() {
            return Err(D::Error::custom("field element is not reduced"));
        }
        Ok(FieldElement { value, modulus })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Arc<BigUint> {
        Arc::new(BigUint::from(23u32))
    }

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v, &small())
    }

    #[test]
    fn test_reduction_on_construction() {
        assert_eq!(fe(30), fe(7));
        assert_eq!(fe(23), FieldElement::zero(&small()));
    }

    #[test]
    fn test_addition() {
        assert_eq!(fe(5) + fe(7), fe(12));
        assert_eq!(fe(20) + fe(7), fe(4));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(fe(10) - fe(3), fe(7));
        assert_eq!(fe(3) - fe(10), fe(16));
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(fe(6) * fe(7), fe(19));
        assert_eq!(&fe(6) * &fe(0), fe(0));
    }

    #[test]
    fn test_negation() {
        let a = fe(5);
        assert_eq!(&a + &(-&a), fe(0));
        assert_eq!(-fe(0), fe(0));
    }

    #[test]
    fn test_inverse() {
        for v in 1..23 {
            let a = fe(v);
            let inv = a.invert().expect("nonzero");
            assert_eq!(&a * &inv, fe(1));
        }
    }

    #[test]
    fn test_inverse_of_zero_is_an_error() {
        assert_eq!(fe(0).invert(), Err(CurveError::ModularInverseOfZero));
    }

    #[test]
    #[should_panic(expected = "modular inverse of zero")]
    fn test_division_by_zero_panics() {
        let _ = fe(3) / fe(0);
    }

    #[test]
    fn test_division() {
        assert_eq!(fe(6) / fe(3), fe(2));
        assert_eq!((fe(1) / fe(5)) * fe(5), fe(1));
    }

    #[test]
    fn test_pow() {
        assert_eq!(fe(2).pow(&BigUint::from(10u32)), fe(1024 % 23));
        assert_eq!(fe(9).pow(&BigUint::zero()), fe(1));
    }

    #[test]
    fn test_fixed_width_bytes() {
        let m = Arc::new(BigUint::from(65521u32));
        let a = FieldElement::from_u64(0x0102, &m);
        assert_eq!(a.to_bytes_be(4), vec![0, 0, 1, 2]);
        assert_eq!(FieldElement::from_bytes_be(&[0, 0, 1, 2], &m), a);
    }

    #[test]
    fn test_canonical_bytes_rejects_overflow() {
        assert!(FieldElement::from_canonical_bytes(&[22], &small()).is_ok());
        assert!(FieldElement::from_canonical_bytes(&[23], &small()).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(fe(10).to_string(), "0x0a");
    }

    #[test]
    fn test_serde_round_trip() {
        let a = fe(17);
        let bytes = bincode::serialize(&a).unwrap();
        assert_eq!(bincode::deserialize::<FieldElement>(&bytes).unwrap(), a);
    }

    #[test]
    fn test_deserialize_rejects_unreduced_value() {
        // Same layout as a FieldElement: value, then modulus.
        let bytes = bincode::serialize(&(BigUint::from(30u32), BigUint::from(23u32))).unwrap();
        assert!(bincode::deserialize::<FieldElement>(&bytes).is_err());

        let bytes = bincode::serialize(&(BigUint::from(23u32), BigUint::from(23u32))).unwrap();
        assert!(bincode::deserialize::<FieldElement>(&bytes).is_err());
    }

    #[test]
    fn test_deserialize_rejects_degenerate_modulus() {
        let bytes = bincode::serialize(&(BigUint::zero(), BigUint::zero())).unwrap();
        assert!(bincode::deserialize::<FieldElement>(&bytes).is_err());

        let bytes = bincode::serialize(&(BigUint::zero(), BigUint::one())).unwrap();
        assert!(bincode::deserialize::<FieldElement>(&bytes).is_err());
    }
}
