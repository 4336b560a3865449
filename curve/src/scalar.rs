//! Scalars: integers in `[1, n - 1]`, used as private keys and nonces.

use core::fmt::{self, Debug, Formatter};

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CurveError;
use crate::{CurveParameters, FieldElement};

/// A nonzero integer below the group order `n`.
///
/// The range is checked against a specific curve on construction. A
/// deserialized scalar is checked against secp256k1; scalars for other
/// curves go through [`Scalar::new`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Scalar {
    value: BigUint,
}

impl Scalar {
    /// Accept `value` if it lies in `[1, n - 1]`.
    pub fn new(value: BigUint, curve: &CurveParameters) -> Result<Self, CurveError> {
        if value.is_zero() || &value >= curve.n().as_ref() {
            return Err(CurveError::InvalidScalar);
        }
        Ok(Scalar { value })
    }

    /// Parse a big-endian integer no wider than the group order.
    pub fn from_bytes_be(bytes: &[u8], curve: &CurveParameters) -> Result<Self, CurveError> {
        if bytes.len() > Self::byte_len(curve) {
            return Err(CurveError::InvalidEncoding("scalar is wider than the group order"));
        }
        Self::new(BigUint::from_bytes_be(bytes), curve)
    }

    /// Parse a hex string, e.g. the 64-character form of a private key.
    pub fn from_hex(s: &str, curve: &CurveParameters) -> Result<Self, CurveError> {
        let bytes = hex::decode(s.trim()).map_err(|_| CurveError::InvalidEncoding("invalid hex"))?;
        Self::from_bytes_be(&bytes, curve)
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Fixed-width big-endian encoding (32 bytes on secp256k1).
    pub fn to_bytes(&self, curve: &CurveParameters) -> Vec<u8> {
        self.to_field(curve).to_bytes_be(Self::byte_len(curve))
    }

    /// This scalar as an element of the scalar field, for signature arithmetic.
    pub fn to_field(&self, curve: &CurveParameters) -> FieldElement {
        curve.scalar_element(self.value.clone())
    }

    /// `n - self`.
    pub fn negate(&self, curve: &CurveParameters) -> Self {
        Scalar {
            value: curve.n().as_ref() - &self.value,
        }
    }

    #[inline]
    fn byte_len(curve: &CurveParameters) -> usize {
        curve.n().bits().div_ceil(8) as usize
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "Scalar")]
        struct Raw {
            value: BigUint,
        }

        let Raw { value } = Raw::deserialize(deserializer)?;
        Scalar::new(value, &CurveParameters::secp256k1()).map_err(D::Error::custom)
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{:x})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_range_checks() {
        let curve = CurveParameters::secp256k1();
        let n = curve.n().as_ref().clone();

        assert_eq!(Scalar::new(BigUint::zero(), &curve), Err(CurveError::InvalidScalar));
        assert_eq!(Scalar::new(n.clone(), &curve), Err(CurveError::InvalidScalar));
        assert_eq!(Scalar::new(&n + 1u32, &curve), Err(CurveError::InvalidScalar));
        assert!(Scalar::new(BigUint::from(1u32), &curve).is_ok());
        assert!(Scalar::new(&n - 1u32, &curve).is_ok());
    }

    #[test]
    fn test_hex_round_trip() {
        let curve = CurveParameters::secp256k1();
        let s = Scalar::from_hex(
            "29EE955FEDA1A85F87ED4004958479706BA6C71FC99A67697A9A13D9D08C618E",
            &curve,
        )
        .expect("valid key");
        assert_eq!(
            s.to_bytes(&curve),
            hex!("29EE955FEDA1A85F87ED4004958479706BA6C71FC99A67697A9A13D9D08C618E")
        );
    }

    #[test]
    fn test_short_input_is_left_padded() {
        let curve = CurveParameters::secp256k1();
        let s = Scalar::from_bytes_be(&[1], &curve).expect("one");
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(s.to_bytes(&curve), expected);
    }

    #[test]
    fn test_rejects_bad_encodings() {
        let curve = CurveParameters::secp256k1();
        assert!(Scalar::from_hex("zz", &curve).is_err());
        assert!(Scalar::from_bytes_be(&[1u8; 33], &curve).is_err());
        assert_eq!(Scalar::from_bytes_be(&[0u8; 32], &curve), Err(CurveError::InvalidScalar));
        assert_eq!(
            Scalar::from_hex(
                "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
                &curve
            ),
            Err(CurveError::InvalidScalar)
        );
    }

    #[test]
    fn test_negate() {
        let curve = CurveParameters::secp256k1();
        let s = Scalar::new(BigUint::from(5u32), &curve).unwrap();
        let neg = s.negate(&curve);
        assert!((s.to_field(&curve) + neg.to_field(&curve)).is_zero());
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = CurveParameters::secp256k1();
        let s = Scalar::new(BigUint::from(12345u32), &curve).unwrap();
        let bytes = bincode::serialize(&s).unwrap();
        assert_eq!(bincode::deserialize::<Scalar>(&bytes).unwrap(), s);
    }

    #[test]
    fn test_deserialize_checks_range() {
        let curve = CurveParameters::secp256k1();
        let zero = bincode::serialize(&BigUint::zero()).unwrap();
        assert!(bincode::deserialize::<Scalar>(&zero).is_err());

        let order = bincode::serialize(curve.n().as_ref()).unwrap();
        assert!(bincode::deserialize::<Scalar>(&order).is_err());
    }
}
