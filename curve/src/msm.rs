use crate::group::ScalarBits;
use crate::{CurveParameters, Group, Projective};

/// Compute a * P + b * Q with one shared doubling chain (Shamir's trick).
pub fn double_scalar_mul<G, A, B>(a: &A, p: &G, b: &B, q: &G, curve: &CurveParameters) -> G
where
    G: Group,
    A: ScalarBits + ?Sized,
    B: ScalarBits + ?Sized,
{
    let sum = p.add_point(q, curve);
    let bits = a.bit_len().max(b.bit_len());
    let mut result = G::identity();

    for i in (0..bits).rev() {
        result = result.double(curve);
        match (a.bit(i), b.bit(i)) {
            (true, true) => result = result.add_point(&sum, curve),
            (true, false) => result = result.add_point(p, curve),
            (false, true) => result = result.add_point(q, curve),
            (false, false) => {}
        }
    }

    result
}

/// Compute a * G + b * P, where G is the curve generator.
pub fn double_scalar_mul_basepoint<A, B>(
    a: &A,
    b: &B,
    point: &Projective,
    curve: &CurveParameters,
) -> Projective
where
    A: ScalarBits + ?Sized,
    B: ScalarBits + ?Sized,
{
    double_scalar_mul(a, &Projective::generator(curve), b, point, curve)
}
