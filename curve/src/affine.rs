use serde::{Deserialize, Serialize};

use crate::errors::CurveError;
use crate::{CurveParameters, FieldElement, Group};

/// SEC1 tag for an even-y compressed point.
const TAG_EVEN: u8 = 0x02;
/// SEC1 tag for an odd-y compressed point.
const TAG_ODD: u8 = 0x03;
/// SEC1 tag for an uncompressed point.
const TAG_UNCOMPRESSED: u8 = 0x04;

/// Affine point on the elliptic curve.
/// Either the point at infinity or a pair (x, y) with y^2 = x^3 + a*x + b.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affine {
    /// The point at infinity (identity element)
    Infinity,
    /// A finite point
    Point { x: FieldElement, y: FieldElement },
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine::Infinity;

    /// Create a new finite affine point. No curve membership check is made.
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Affine::Point { x, y }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        matches!(self, Affine::Infinity)
    }

    #[inline]
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Affine::Infinity => None,
            Affine::Point { x, y } => Some((x, y)),
        }
    }

    #[inline]
    pub fn x(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    #[inline]
    pub fn y(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }

    /// Check if a point is on the curve: y^2 = x^3 + a*x + b.
    pub fn is_on_curve(&self, curve: &CurveParameters) -> bool {
        match self {
            Affine::Infinity => true,
            Affine::Point { x, y } => {
                x.modulus() == curve.p() && y.modulus() == curve.p() && y.square() == curve.rhs(x)
            }
        }
    }

    /// The finite point with the given x-coordinate and y-parity, if x is the
    /// abscissa of a curve point.
    pub fn lift_x(x: &FieldElement, odd: bool, curve: &CurveParameters) -> Option<Self> {
        let y = curve.rhs(x).sqrt()?;
        let y = if y.is_odd() == odd { y } else { -y };
        Some(Affine::new(x.clone(), y))
    }

    /// Point doubling: 2*P.
    pub fn double(&self, curve: &CurveParameters) -> Self {
        let (x, y) = match self {
            Affine::Infinity => return Affine::Infinity,
            Affine::Point { x, y } => (x, y),
        };

        // If y = 0, then 2P = O
        if y.is_zero() {
            return Affine::Infinity;
        }

        // λ = (3x^2 + a) / (2y)
        let x2 = x.square();
        let numerator = &(&x2.double() + &x2) + curve.a();
        let lambda = numerator / y.double();

        // x_r = λ^2 - 2x
        let x_r = &lambda.square() - &x.double();

        // y_r = λ(x - x_r) - y
        let y_r = &(&lambda * &(x - &x_r)) - y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        match self {
            Affine::Infinity => Affine::Infinity,
            Affine::Point { x, y } => Affine::new(x.clone(), -y),
        }
    }

    /// Point addition, with the identity and inverse cases handled first.
    pub fn add(&self, other: &Self, curve: &CurveParameters) -> Self {
        let ((x1, y1), (x2, y2)) = match (self.coordinates(), other.coordinates()) {
            (None, _) => return other.clone(),
            (_, None) => return self.clone(),
            (Some(p1), Some(p2)) => (p1, p2),
        };

        if x1 == x2 {
            return if y1 == y2 {
                self.double(curve)
            } else {
                Affine::Infinity
            };
        }

        // λ = (y2 - y1) / (x2 - x1)
        let lambda = (y2 - y1) / (x2 - x1);

        // x_r = λ^2 - x1 - x2
        let x_r = &(&lambda.square() - x1) - x2;

        // y_r = λ(x1 - x_r) - y1
        let y_r = &(&lambda * &(x1 - &x_r)) - y1;

        Affine::new(x_r, y_r)
    }

    /// 33-byte SEC1 compressed encoding: parity tag followed by x.
    pub fn to_compressed(&self, curve: &CurveParameters) -> Result<Vec<u8>, CurveError> {
        let (x, y) = self.coordinates().ok_or(CurveError::InvalidPoint)?;
        let mut out = Vec::with_capacity(1 + curve.field_bytes());
        out.push(if y.is_odd() { TAG_ODD } else { TAG_EVEN });
        out.extend_from_slice(&x.to_bytes_be(curve.field_bytes()));
        Ok(out)
    }

    /// 65-byte SEC1 uncompressed encoding: 0x04 followed by x and y.
    pub fn to_uncompressed(&self, curve: &CurveParameters) -> Result<Vec<u8>, CurveError> {
        let (x, y) = self.coordinates().ok_or(CurveError::InvalidPoint)?;
        let mut out = Vec::with_capacity(1 + 2 * curve.field_bytes());
        out.push(TAG_UNCOMPRESSED);
        out.extend_from_slice(&x.to_bytes_be(curve.field_bytes()));
        out.extend_from_slice(&y.to_bytes_be(curve.field_bytes()));
        Ok(out)
    }

    /// Parse a compressed or uncompressed SEC1 point.
    ///
    /// The identity has no encoding here and off-curve points are rejected.
    pub fn from_sec1(bytes: &[u8], curve: &CurveParameters) -> Result<Self, CurveError> {
        let len = curve.field_bytes();
        let (&tag, body) = bytes
            .split_first()
            .ok_or(CurveError::InvalidEncoding("empty point encoding"))?;

        match tag {
            TAG_EVEN | TAG_ODD => {
                if body.len() != len {
                    return Err(CurveError::InvalidEncoding("compressed point has wrong length"));
                }
                let x = FieldElement::from_canonical_bytes(body, curve.p())?;
                Self::lift_x(&x, tag == TAG_ODD, curve).ok_or(CurveError::InvalidPoint)
            }
            TAG_UNCOMPRESSED => {
                if body.len() != 2 * len {
                    return Err(CurveError::InvalidEncoding("uncompressed point has wrong length"));
                }
                let x = FieldElement::from_canonical_bytes(&body[..len], curve.p())?;
                let y = FieldElement::from_canonical_bytes(&body[len..], curve.p())?;
                let point = Affine::new(x, y);
                if point.is_on_curve(curve) {
                    Ok(point)
                } else {
                    Err(CurveError::InvalidPoint)
                }
            }
            _ => Err(CurveError::InvalidEncoding("unknown point tag")),
        }
    }
}

impl Group for Affine {
    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator(curve: &CurveParameters) -> Self {
        curve.generator().clone()
    }

    #[inline]
    fn add_point(&self, other: &Self, curve: &CurveParameters) -> Self {
        self.add(other, curve)
    }

    #[inline]
    fn double(&self, curve: &CurveParameters) -> Self {
        Self::double(self, curve)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hex_literal::hex;
    use num_bigint::BigUint;

    use super::*;

    fn secp() -> Arc<CurveParameters> {
        CurveParameters::secp256k1()
    }

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve(&secp()));
    }

    #[test]
    fn test_generator_on_curve() {
        let curve = secp();
        let g = Affine::generator(&curve);
        assert!(g.is_on_curve(&curve), "Generator point is not on the curve");
        assert!(!g.is_infinity());
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let inf = Affine::INFINITY;

        assert_eq!(g.add(&inf, &curve), g);
        assert_eq!(inf.add(&g, &curve), g);
        assert_eq!(inf.add(&inf, &curve), inf);
    }

    #[test]
    fn test_point_doubling() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let g2 = g.double(&curve);

        assert!(g2.is_on_curve(&curve), "Doubled point is not on the curve");
        assert_eq!(g.add(&g, &curve), g2);
    }

    #[test]
    fn test_point_negation() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let neg_g = g.negate();

        assert!(neg_g.is_on_curve(&curve));
        assert_eq!(g.add(&neg_g, &curve), Affine::INFINITY);
    }

    #[test]
    fn test_scalar_multiplication() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let result = g.scalar_mul(&BigUint::from(5u32), &curve);

        // 5*G = G + G + G + G + G
        let mut expected = Affine::INFINITY;
        for _ in 0..5 {
            expected = expected.add(&g, &curve);
        }
        assert_eq!(result, expected);
        assert!(result.is_on_curve(&curve));
    }

    #[test]
    fn test_scalar_mul_zero() {
        let curve = secp();
        let g = Affine::generator(&curve);
        assert_eq!(g.scalar_mul(&BigUint::from(0u32), &curve), Affine::INFINITY);
    }

    #[test]
    fn test_scalar_mul_one() {
        let curve = secp();
        let g = Affine::generator(&curve);
        assert_eq!(g.scalar_mul(&BigUint::from(1u32), &curve), g);
    }

    #[test]
    fn test_scalar_mul_known_key() {
        let curve = secp();
        let d = BigUint::from_bytes_be(&hex!(
            "29EE955FEDA1A85F87ED4004958479706BA6C71FC99A67697A9A13D9D08C618E"
        ));
        let q = Affine::generator(&curve).scalar_mul(&d, &curve);
        let (x, y) = q.coordinates().expect("finite");
        assert_eq!(
            x.to_bytes_be(32),
            hex!("F979F942AE743F27902B62CA4E8A8FE0F8A979EE3AD7BD0817339A665C3E7F4F")
        );
        assert_eq!(
            y.to_bytes_be(32),
            hex!("B8CF959134B5C66BCC333A968B26D0ADACCFAD26F1EA8607D647E5B679C49184")
        );
    }

    #[test]
    fn test_associativity() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let a = BigUint::from(3u32);
        let b = BigUint::from(5u32);

        // (a + b) * G = a*G + b*G
        let left = g.scalar_mul(&(&a + &b), &curve);
        let right = g.scalar_mul(&a, &curve).add(&g.scalar_mul(&b, &curve), &curve);

        assert_eq!(left, right);
    }

    #[test]
    fn test_mul_u64() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let n = 42u64;

        let result1 = g.mul_u64(n, &curve);
        let result2 = g.scalar_mul(&BigUint::from(n), &curve);

        assert_eq!(result1, result2);
        assert!(result1.is_on_curve(&curve));
    }

    #[test]
    fn test_multi_scalar_mul() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let h = g.mul_u64(99, &curve);

        let a = BigUint::from(7u32);
        let b = BigUint::from(11u32);

        let result = Affine::multi_scalar_mul(&[g.clone(), h.clone()], &[a.clone(), b.clone()], &curve);
        let expected = g.scalar_mul(&a, &curve).add(&h.scalar_mul(&b, &curve), &curve);

        assert_eq!(result, expected);
        assert_eq!(result, g.mul_u64(7 + 11 * 99, &curve));
    }

    #[test]
    fn test_group_properties() {
        let curve = secp();
        let g = Affine::generator(&curve);

        assert_eq!(g.double(&curve), g.add(&g, &curve));

        let triple = g.add(&g, &curve).add(&g, &curve);
        assert_eq!(triple, g.mul_u64(3, &curve));

        let h = g.mul_u64(5, &curve);
        assert_eq!(h.sub_point(&h, &curve), Affine::INFINITY);
    }

    #[test]
    fn test_compressed_encoding() {
        let curve = secp();
        let g = Affine::generator(&curve);
        assert_eq!(
            g.to_compressed(&curve).expect("finite"),
            hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
        );
        assert_eq!(Affine::from_sec1(&g.to_compressed(&curve).unwrap(), &curve), Ok(g.clone()));

        let neg = g.negate();
        let bytes = neg.to_compressed(&curve).expect("finite");
        assert_eq!(bytes[0], 0x03);
        assert_eq!(Affine::from_sec1(&bytes, &curve), Ok(neg));
    }

    #[test]
    fn test_uncompressed_encoding() {
        let curve = secp();
        let p = Affine::generator(&curve).mul_u64(1234567, &curve);
        let bytes = p.to_uncompressed(&curve).expect("finite");
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
        assert_eq!(Affine::from_sec1(&bytes, &curve), Ok(p));
    }

    #[test]
    fn test_identity_has_no_encoding() {
        let curve = secp();
        assert_eq!(Affine::INFINITY.to_compressed(&curve), Err(CurveError::InvalidPoint));
        assert_eq!(Affine::INFINITY.to_uncompressed(&curve), Err(CurveError::InvalidPoint));
    }

    #[test]
    fn test_from_sec1_rejects_malformed_input() {
        let curve = secp();
        let g = Affine::generator(&curve);

        assert!(Affine::from_sec1(&[], &curve).is_err());
        assert!(Affine::from_sec1(&[0x05; 33], &curve).is_err());

        let compressed = g.to_compressed(&curve).unwrap();
        assert!(Affine::from_sec1(&compressed[..32], &curve).is_err());

        let mut off_curve = g.to_uncompressed(&curve).unwrap();
        off_curve[64] ^= 1;
        assert_eq!(Affine::from_sec1(&off_curve, &curve), Err(CurveError::InvalidPoint));

        // x = p is not a canonical coordinate
        let mut too_big = vec![0x02];
        too_big.extend_from_slice(&curve.p().to_bytes_be());
        assert!(Affine::from_sec1(&too_big, &curve).is_err());
    }

    #[test]
    fn test_lift_x_picks_parity() {
        let curve = secp();
        let g = Affine::generator(&curve);
        let (x, y) = g.coordinates().unwrap();

        let even = Affine::lift_x(x, false, &curve).expect("lifts");
        let odd = Affine::lift_x(x, true, &curve).expect("lifts");
        assert_eq!(even.y().map(|y| y.is_odd()), Some(false));
        assert_eq!(odd.y().map(|y| y.is_odd()), Some(true));
        assert!(even == g || odd == g);
        assert_eq!(even.negate(), odd);
        assert!(!y.is_zero());
    }
}
