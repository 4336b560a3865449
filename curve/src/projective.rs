use serde::{Deserialize, Serialize};

use crate::affine::Affine;
use crate::{CurveParameters, FieldElement, Group};

/// Projective point on the elliptic curve.
/// Represents a point in homogeneous coordinates (X:Y:Z) where (x,y) = (X/Z, Y/Z).
///
/// Any `Point` whose Z is zero is treated as the point at infinity;
/// [`Projective::new`] never produces one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Projective {
    Infinity,
    Point {
        x: FieldElement,
        y: FieldElement,
        z: FieldElement,
    },
}

impl Projective {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Projective::Infinity;

    /// Create a new projective point, collapsing Z = 0 to the identity.
    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        if z.is_zero() {
            Projective::Infinity
        } else {
            Projective::Point { x, y, z }
        }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.parts().is_none()
    }

    #[inline]
    fn parts(&self) -> Option<(&FieldElement, &FieldElement, &FieldElement)> {
        match self {
            Projective::Point { x, y, z } if !z.is_zero() => Some((x, y, z)),
            _ => None,
        }
    }

    /// Convert to affine coordinates with a single inversion of Z.
    pub fn to_affine(&self) -> Affine {
        let Some((x, y, z)) = self.parts() else {
            return Affine::INFINITY;
        };

        match z.invert() {
            Ok(z_inv) => Affine::new(x * &z_inv, y * &z_inv),
            Err(_) => Affine::INFINITY,
        }
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        match point {
            Affine::Infinity => Projective::INFINITY,
            Affine::Point { x, y } => {
                Projective::new(x.clone(), y.clone(), FieldElement::one(x.modulus()))
            }
        }
    }

    /// Check if a point is on the curve: Y^2*Z = X^3 + a*X*Z^2 + b*Z^3.
    pub fn is_on_curve(&self, curve: &CurveParameters) -> bool {
        let Some((x, y, z)) = self.parts() else {
            return true;
        };
        if x.modulus() != curve.p() {
            return false;
        }

        let z2 = z.square();
        let lhs = &y.square() * z;
        let rhs = &(&x.cube() + &(&(curve.a() * x) * &z2)) + &(curve.b() * &(&z2 * z));

        lhs == rhs
    }

    /// Point doubling with the tangent-line formula, no inversion.
    pub fn double(&self, curve: &CurveParameters) -> Self {
        let Some((x1, y1, z1)) = self.parts() else {
            return Projective::INFINITY;
        };

        // Vertical tangent: 2P = O
        if y1.is_zero() {
            return Projective::INFINITY;
        }

        // d = 2*y1*z1, n = 3*x1^2 + a*z1^2
        let d = (y1 * z1).double();
        let d2 = d.square();
        let d3 = &d2 * &d;
        let x1_sq = x1.square();
        let n = &(&x1_sq.double() + &x1_sq) + &(curve.a() * &z1.square());
        let n2 = n.square();

        // x3 = n^2*d*z1 - 2*d^3*x1
        let x3 = &(&(&n2 * &d) * z1) - &(&d3 * x1).double();
        // y3 = 3*x1*n*d^2 - n^3*z1 - y1*d^3
        let x1_n_d2 = &(x1 * &n) * &d2;
        let y3 = &(&(&x1_n_d2.double() + &x1_n_d2) - &(&(&n2 * &n) * z1)) - &(y1 * &d3);
        // z3 = z1*d^3
        let z3 = z1 * &d3;

        Projective::new(x3, y3, z3)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        match self.parts() {
            None => Projective::INFINITY,
            Some((x, y, z)) => Projective::new(x.clone(), -y, z.clone()),
        }
    }

    /// Point addition.
    ///
    /// Identity operands, equal operands and mutually inverse operands are
    /// peeled off first; the chord formula divides by zero in each of them.
    pub fn add(&self, other: &Self, curve: &CurveParameters) -> Self {
        let ((x1, y1, z1), (x2, y2, z2)) = match (self.parts(), other.parts()) {
            (None, _) => return other.clone(),
            (_, None) => return self.clone(),
            (Some(p1), Some(p2)) => (p1, p2),
        };

        let x1z2 = x1 * z2;
        let x2z1 = x2 * z1;
        if x1z2 == x2z1 {
            return if y1 * z2 == y2 * z1 {
                self.double(curve)
            } else {
                Projective::INFINITY
            };
        }

        // d = x2*z1 - z2*x1, n = y2*z1 - y1*z2
        let d = &x2z1 - &x1z2;
        let n = &(y2 * z1) - &(y1 * z2);
        let d2 = d.square();
        let d3 = &d2 * &d;
        let n2 = n.square();
        let z1z2 = z1 * z2;

        // x3 = z2*z1*n^2*d - d^3*(z2*x1 + x2*z1)
        let x3 = &(&(&z1z2 * &n2) * &d) - &(&d3 * &(&x1z2 + &x2z1));
        // y3 = d^2*n*(2*x1*z2 + x2*z1) - n^3*z1*z2 - y1*d^3*z2
        let y3 = &(&(&(&d2 * &n) * &(&x1z2.double() + &x2z1)) - &(&(&n2 * &n) * &z1z2))
            - &(&(y1 * &d3) * z2);
        // z3 = z1*d^3*z2
        let z3 = &d3 * &z1z2;

        Projective::new(x3, y3, z3)
    }
}

/// Equality of projective classes by cross-multiplication, without
/// normalizing either side.
impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        match (self.parts(), other.parts()) {
            (None, None) => true,
            (Some((x1, y1, z1)), Some((x2, y2, z2))) => {
                z1.modulus() == z2.modulus() && x1 * z2 == x2 * z1 && y1 * z2 == y2 * z1
            }
            _ => false,
        }
    }
}

impl Eq for Projective {}

impl Group for Projective {
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
        Projective::from_affine(curve.generator())
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

// Conversions
impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Affine {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}

impl From<&Projective> for Affine {
    fn from(point: &Projective) -> Self {
        point.to_affine()
    }
}
