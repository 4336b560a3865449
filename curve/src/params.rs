//! Curve parameters.
//!
//! y^2 = x^3 + a*x + b over F_p, with a generator G of prime order n.
//!
//! secp256k1:
//!   p = 2^256 - 2^32 - 977
//!   n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!   a = 0, b = 7, cofactor 1

use std::sync::{Arc, LazyLock};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::errors::CurveError;
use crate::{Affine, FieldElement, Group, Projective};

const SECP256K1_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
const SECP256K1_N: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
const SECP256K1_GX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const SECP256K1_GY: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

static SECP256K1: LazyLock<Arc<CurveParameters>> = LazyLock::new(|| {
    let parse = |s: &str| BigUint::parse_bytes(s.as_bytes(), 16).unwrap_or_default();
    let params = CurveParameters::new(
        "secp256k1",
        parse(SECP256K1_P),
        parse(SECP256K1_N),
        BigUint::zero(),
        BigUint::from(7u32),
        parse(SECP256K1_GX),
        parse(SECP256K1_GY),
    );
    match params {
        Ok(params) => Arc::new(params),
        Err(err) => panic!("built-in secp256k1 parameters rejected: {err}"),
    }
});

/// Immutable description of a short Weierstrass curve and its base point.
///
/// Passed by reference into every operation that needs more than the field
/// modulus (doubling needs `a`, the on-curve check needs `b`, signature
/// arithmetic needs `n`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParameters {
    name: &'static str,
    p: Arc<BigUint>,
    n: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
    generator: Affine,
    field_bytes: usize,
}

impl CurveParameters {
    /// Validate and bind a set of curve parameters.
    ///
    /// Primality of `p` and `n` is not checked. The curve must be
    /// non-singular, the generator must lie on it and `n * G` must be the
    /// identity.
    pub fn new(
        name: &'static str,
        p: BigUint,
        n: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
    ) -> Result<Self, CurveError> {
        if p <= BigUint::from(3u32) || !p.bit(0) {
            return Err(CurveError::InvalidParameters("p must be an odd prime above 3"));
        }
        if n <= BigUint::one() {
            return Err(CurveError::InvalidParameters("n must exceed 1"));
        }
        if gx >= p || gy >= p {
            return Err(CurveError::InvalidParameters("generator coordinates exceed p"));
        }

        let field_bytes = p.bits().div_ceil(8) as usize;
        let p = Arc::new(p);
        let params = CurveParameters {
            name,
            a: FieldElement::new(a, &p),
            b: FieldElement::new(b, &p),
            generator: Affine::new(FieldElement::new(gx, &p), FieldElement::new(gy, &p)),
            n: Arc::new(n),
            p,
            field_bytes,
        };

        // 4a^3 + 27b^2 = 0 means the cubic has a repeated root.
        let a = &params.a;
        let b = &params.b;
        let discriminant = &(&a.cube() * &FieldElement::from_u64(4, &params.p))
            + &(&b.square() * &FieldElement::from_u64(27, &params.p));
        if discriminant.is_zero() {
            return Err(CurveError::InvalidParameters("curve is singular"));
        }
        if !params.generator.is_on_curve(&params) {
            return Err(CurveError::InvalidParameters("generator is not on the curve"));
        }
        if !Projective::from(&params.generator)
            .scalar_mul(params.n.as_ref(), &params)
            .is_infinity()
        {
            return Err(CurveError::InvalidParameters("n * G is not the identity"));
        }
        Ok(params)
    }

    /// Shared secp256k1 instance.
    pub fn secp256k1() -> Arc<Self> {
        Arc::clone(&SECP256K1)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Base field modulus.
    #[inline]
    pub fn p(&self) -> &Arc<BigUint> {
        &self.p
    }

    /// Order of the generator.
    #[inline]
    pub fn n(&self) -> &Arc<BigUint> {
        &self.n
    }

    #[inline]
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    #[inline]
    pub fn generator(&self) -> &Affine {
        &self.generator
    }

    /// Byte length of a serialized coordinate.
    #[inline]
    pub fn field_bytes(&self) -> usize {
        self.field_bytes
    }

    /// Base field element from an integer.
    pub fn base_element(&self, value: BigUint) -> FieldElement {
        FieldElement::new(value, &self.p)
    }

    /// Scalar field element (mod `n`) from an integer.
    pub fn scalar_element(&self, value: BigUint) -> FieldElement {
        FieldElement::new(value, &self.n)
    }

    /// Right-hand side of the curve equation, `x^3 + a*x + b`.
    pub fn rhs(&self, x: &FieldElement) -> FieldElement {
        &(&x.cube() + &(&self.a * x)) + &self.b
    }
}
