//! Quadratic residuosity and modular square roots.
//!
//! Square roots use Cipolla's algorithm. It works for any odd prime modulus,
//! so nothing here depends on `p ≡ 3 (mod 4)`.

use num_bigint::BigUint;
use num_traits::One;

use crate::field::FieldElement;

impl FieldElement {
    /// Legendre symbol `(a | m)` by Euler's criterion: `1` for a nonzero
    /// square, `-1` for a non-residue and `0` for zero.
    pub fn legendre(&self) -> i8 {
        if self.is_zero() {
            return 0;
        }
        let exp = (self.modulus().as_ref() - BigUint::one()) >> 1;
        let symbol = self.pow(&exp);
        if symbol.value().is_one() {
            1
        } else {
            -1
        }
    }

    /// Whether this element is a nonzero quadratic residue.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.legendre() == 1
    }

    /// One square root of `self`, or `None` if it is a non-residue.
    ///
    /// The other root is the negation of the returned value.
    pub fn sqrt(&self) -> Option<Self> {
        match self.legendre() {
            0 => return Some(self.clone()),
            -1 => return None,
            _ => {}
        }

        // Smallest t with t^2 - a a non-residue. About half of all t qualify.
        let mut t = FieldElement::zero(self.modulus());
        let one = FieldElement::one(self.modulus());
        let omega_sq = loop {
            let candidate = &t.square() - self;
            match candidate.legendre() {
                -1 => break candidate,
                0 => return Some(t),
                _ => t = &t + &one,
            }
        };

        let exp = (self.modulus().as_ref() + BigUint::one()) >> 1;
        let root = QuadraticExtension::new(t, one, omega_sq).pow(&exp).re;

        (root.square() == *self).then_some(root)
    }
}

/// Element `re + im * w` of `F_p[w] / (w^2 - omega_sq)`.
struct QuadraticExtension {
    re: FieldElement,
    im: FieldElement,
    omega_sq: FieldElement,
}

impl QuadraticExtension {
    fn new(re: FieldElement, im: FieldElement, omega_sq: FieldElement) -> Self {
        QuadraticExtension { re, im, omega_sq }
    }

    fn mul(&self, rhs: &Self) -> Self {
        let re = &(&self.re * &rhs.re) + &(&(&self.im * &rhs.im) * &self.omega_sq);
        let im = &(&self.re * &rhs.im) + &(&self.im * &rhs.re);
        QuadraticExtension {
            re,
            im,
            omega_sq: self.omega_sq.clone(),
        }
    }

    fn pow(&self, exp: &BigUint) -> Self {
        let modulus = self.re.modulus();
        let mut acc = QuadraticExtension::new(
            FieldElement::one(modulus),
            FieldElement::zero(modulus),
            self.omega_sq.clone(),
        );
        for i in (0..exp.bits()).rev() {
            acc = acc.mul(&acc);
            if exp.bit(i) {
                acc = acc.mul(self);
            }
        }
        acc
    }
}
