use crate::field::{FieldElement, PrimeField};
use crate::model::InternalAffine;
use std::sync::Arc;

/// Point on the internal curve `y^2 = x^3 + a*x + b` in homogeneous
/// projective coordinates (X:Y:Z) where (x,y) = (X/Z, Y/Z).
/// The point at infinity is represented as (0:1:0).
#[derive(Clone, Debug)]
pub(crate) struct Projective {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

impl Projective {
    /// The point at infinity (identity element): (0:1:0)
    pub fn identity(field: &Arc<PrimeField>) -> Self {
        Projective {
            x: FieldElement::zero(field),
            y: FieldElement::one(field),
            z: FieldElement::zero(field),
        }
    }

    pub fn from_affine(x: FieldElement, y: FieldElement) -> Self {
        let z = FieldElement::one(x.field());
        Projective { x, y, z }
    }

    pub fn from_internal(field: &Arc<PrimeField>, point: &InternalAffine) -> Self {
        match point {
            None => Self::identity(field),
            Some((x, y)) => Self::from_affine(x.clone(), y.clone()),
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates; `None` for the point at infinity.
    pub fn to_affine(&self) -> InternalAffine {
        let z_inv = self.z.invert().ok()?;
        Some((&self.x * &z_inv, &self.y * &z_inv))
    }

    /// Check Y^2*Z = X^3 + a*X*Z^2 + b*Z^3.
    pub fn is_on_curve(&self, a: &FieldElement, b: &FieldElement) -> bool {
        if self.is_identity() {
            return true;
        }
        let z2 = self.z.square();
        let lhs = self.y.square() * &self.z;
        let rhs = self.x.square() * &self.x + a * &self.x * &z2 + b * &z2 * &self.z;
        lhs == rhs
    }

    pub fn negate(&self) -> Self {
        Projective {
            x: self.x.clone(),
            y: -&self.y,
            z: self.z.clone(),
        }
    }

    /// Point doubling, dbl-2007-bl.
    pub fn double(&self, a: &FieldElement) -> Self {
        // Points of order two (and infinity) double to infinity
        if self.is_identity() || self.y.is_zero() {
            return Self::identity(self.x.field());
        }

        let xx = self.x.square();
        let zz = self.z.square();
        let w = a * &zz + xx.double() + &xx;
        let s = (&self.y * &self.z).double();
        let ss = s.square();
        let sss = &s * &ss;
        let r = &self.y * &s;
        let rr = r.square();
        let b = (&self.x + &r).square() - &xx - &rr;
        let h = w.square() - b.double();

        Projective {
            x: &h * &s,
            y: w * (b - &h) - rr.double(),
            z: sss,
        }
    }

    /// Point addition, add-1998-cmo-2. Falls back to doubling for equal inputs.
    pub fn add(&self, other: &Self, a: &FieldElement) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let y1z2 = &self.y * &other.z;
        let x1z2 = &self.x * &other.z;
        let z1z2 = &self.z * &other.z;
        let u = &other.y * &self.z - &y1z2;
        let v = &other.x * &self.z - &x1z2;

        if v.is_zero() {
            // Same x: either P + P or P + (-P)
            if u.is_zero() {
                return self.double(a);
            }
            return Self::identity(self.x.field());
        }

        let uu = u.square();
        let vv = v.square();
        let vvv = &v * &vv;
        let r = &vv * &x1z2;
        let big_a = &uu * &z1z2 - &vvv - r.double();

        Projective {
            x: &v * &big_a,
            y: u * (r - &big_a) - &vvv * &y1z2,
            z: vvv * z1z2,
        }
    }

    /// Projective equality: X1*Z2 = X2*Z1 and Y1*Z2 = Y2*Z1.
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => {
                &self.x * &other.z == &other.x * &self.z
                    && &self.y * &other.z == &other.y * &self.z
            }
            _ => false,
        }
    }
}
