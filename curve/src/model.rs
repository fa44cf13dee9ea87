//! Curve equation forms and the birational maps onto the internal
//! short-Weierstrass model.
//!
//! Montgomery `B*v^2 = u^3 + A*u^2 + u` maps to `y^2 = x^3 + a*x + b` by
//! `x = (u + A/3) / B`, `y = v / B` with
//! `a = (3 - A^2) / (3*B^2)` and `b = (2*A^3 - 9*A) / (27*B^3)`.
//!
//! Twisted Edwards `a*x^2 + y^2 = 1 + d*x^2*y^2` maps to the Montgomery curve
//! `A = 2(a + d)/(a - d)`, `B = 4/(a - d)` by `u = (1 + y)/(1 - y)`, `v = u/x`.
//! Edwards `x^2 + y^2 = c^2(1 + d*x^2*y^2)` is first scaled to the twisted
//! Edwards curve `a = 1`, `d' = d*c^4` by dividing both coordinates by `c`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::FieldElement;

/// Equation form a curve is specified in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveForm {
    /// `y^2 = x^3 + a*x + b`
    ShortWeierstrass,
    /// `x^2 + y^2 = c^2 * (1 + d*x^2*y^2)`
    Edwards,
    /// `B*y^2 = x^3 + A*x^2 + x`
    Montgomery,
    /// `a*x^2 + y^2 = 1 + d*x^2*y^2`
    TwistedEdwards,
}

/// Affine point on the internal curve; `None` is the point at infinity.
pub(crate) type InternalAffine = Option<(FieldElement, FieldElement)>;

#[derive(Clone, Debug)]
pub(crate) struct MontgomeryMap {
    b: FieldElement,
    b_inv: FieldElement,
    a_div3: FieldElement,
}

impl MontgomeryMap {
    /// Builds the map for `B*v^2 = u^3 + A*u^2 + u`, returning it with the
    /// internal Weierstrass coefficients.
    fn new(a: &FieldElement, b: &FieldElement) -> Result<(Self, FieldElement, FieldElement)> {
        let field = a.field();
        let two = FieldElement::from_u64(field, 2);
        let three = FieldElement::from_u64(field, 3);
        let nine = FieldElement::from_u64(field, 9);
        let twenty_seven = FieldElement::from_u64(field, 27);

        if b.is_zero() {
            return Err(Error::InvalidParameters("Montgomery B must be non-zero"));
        }
        let a2 = a.square();
        if a2 == two.double() {
            return Err(Error::InvalidParameters("Montgomery A^2 must differ from 4"));
        }

        let b2 = b.square();
        let b3 = &b2 * b;
        let ws_a = (&three - &a2) * (&three * &b2).invert()?;
        let ws_b = (&two * &a2 * a - &nine * a) * (&twenty_seven * &b3).invert()?;

        let map = MontgomeryMap {
            b: b.clone(),
            b_inv: b.invert()?,
            a_div3: a * three.invert()?,
        };
        Ok((map, ws_a, ws_b))
    }

    fn to_weierstrass(&self, u: &FieldElement, v: &FieldElement) -> (FieldElement, FieldElement) {
        ((u + &self.a_div3) * &self.b_inv, v * &self.b_inv)
    }

    fn from_weierstrass(&self, x: &FieldElement, y: &FieldElement) -> (FieldElement, FieldElement) {
        (&self.b * x - &self.a_div3, &self.b * y)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EdwardsMap {
    scale: FieldElement,
    scale_inv: FieldElement,
    mont: MontgomeryMap,
}

impl EdwardsMap {
    /// Map for native points whose coordinates divided by `scale` lie on
    /// `a*x^2 + y^2 = 1 + d*x^2*y^2`.
    fn new(
        a: &FieldElement,
        d: &FieldElement,
        scale: &FieldElement,
    ) -> Result<(Self, FieldElement, FieldElement)> {
        let field = a.field();
        let diff_inv = (a - d).invert()?;
        let mont_a = (a + d).double() * &diff_inv;
        let mont_b = FieldElement::from_u64(field, 4) * &diff_inv;
        let (mont, ws_a, ws_b) = MontgomeryMap::new(&mont_a, &mont_b)?;

        let map = EdwardsMap {
            scale: scale.clone(),
            scale_inv: scale.invert()?,
            mont,
        };
        Ok((map, ws_a, ws_b))
    }

    fn to_internal(&self, x: &FieldElement, y: &FieldElement) -> Result<InternalAffine> {
        let field = x.field();
        let one = FieldElement::one(field);
        let x = x * &self.scale_inv;
        let y = y * &self.scale_inv;

        if x.is_zero() {
            // (0, 1) is the neutral element, (0, -1) the Montgomery point (0, 0)
            if y == one {
                return Ok(None);
            }
            let zero = FieldElement::zero(field);
            return Ok(Some(self.mont.to_weierstrass(&zero, &zero)));
        }

        let denom = (&one - &y)
            .invert()
            .map_err(|_| Error::ExceptionalPoint)?;
        let u = (&one + &y) * denom;
        let v = &u * x.invert()?;
        Ok(Some(self.mont.to_weierstrass(&u, &v)))
    }

    fn from_internal(&self, point: &InternalAffine) -> Result<(FieldElement, FieldElement)> {
        let field = self.scale.field();
        let zero = FieldElement::zero(field);
        let one = FieldElement::one(field);

        let (x, y) = match point {
            None => (zero, one),
            Some((wx, wy)) => {
                let (u, v) = self.mont.from_weierstrass(wx, wy);
                if u.is_zero() && v.is_zero() {
                    (zero, -one)
                } else {
                    let u_plus_1 = &u + &one;
                    if v.is_zero() || u_plus_1.is_zero() {
                        return Err(Error::ExceptionalPoint);
                    }
                    let x = &u * v.invert()?;
                    let y = (&u - &one) * u_plus_1.invert()?;
                    (x, y)
                }
            }
        };
        Ok((x * &self.scale, y * &self.scale))
    }
}

/// Native coefficients of a curve together with its maps to the internal model.
#[derive(Clone, Debug)]
pub(crate) enum Model {
    ShortWeierstrass {
        a: FieldElement,
        b: FieldElement,
    },
    Edwards {
        c: FieldElement,
        d: FieldElement,
        map: EdwardsMap,
    },
    Montgomery {
        b: FieldElement,
        a: FieldElement,
        map: MontgomeryMap,
    },
    TwistedEdwards {
        a: FieldElement,
        d: FieldElement,
        map: EdwardsMap,
    },
}

impl Model {
    /// Validates the coefficient pair of `form` (in constructor order) and
    /// derives the internal Weierstrass `(a, b)`.
    pub(crate) fn new(
        form: CurveForm,
        c1: FieldElement,
        c2: FieldElement,
    ) -> Result<(Self, FieldElement, FieldElement)> {
        match form {
            CurveForm::ShortWeierstrass => {
                let model = Model::ShortWeierstrass {
                    a: c1.clone(),
                    b: c2.clone(),
                };
                Ok((model, c1, c2))
            }
            CurveForm::Montgomery => {
                let (map, ws_a, ws_b) = MontgomeryMap::new(&c2, &c1)?;
                Ok((Model::Montgomery { b: c1, a: c2, map }, ws_a, ws_b))
            }
            CurveForm::TwistedEdwards => {
                if c1.is_zero() || c2.is_zero() {
                    return Err(Error::InvalidParameters(
                        "twisted Edwards a and d must be non-zero",
                    ));
                }
                if c1 == c2 {
                    return Err(Error::InvalidParameters("twisted Edwards a and d must differ"));
                }
                let one = FieldElement::one(c1.field());
                let (map, ws_a, ws_b) = EdwardsMap::new(&c1, &c2, &one)?;
                Ok((Model::TwistedEdwards { a: c1, d: c2, map }, ws_a, ws_b))
            }
            CurveForm::Edwards => {
                if c1.is_zero() || c2.is_zero() {
                    return Err(Error::InvalidParameters("Edwards c and d must be non-zero"));
                }
                let d_scaled = &c2 * c1.square().square();
                if d_scaled.is_one() {
                    return Err(Error::InvalidParameters("Edwards d*c^4 must differ from 1"));
                }
                let one = FieldElement::one(c1.field());
                let (map, ws_a, ws_b) = EdwardsMap::new(&one, &d_scaled, &c1)?;
                Ok((Model::Edwards { c: c1, d: c2, map }, ws_a, ws_b))
            }
        }
    }

    pub(crate) fn form(&self) -> CurveForm {
        match self {
            Model::ShortWeierstrass { .. } => CurveForm::ShortWeierstrass,
            Model::Edwards { .. } => CurveForm::Edwards,
            Model::Montgomery { .. } => CurveForm::Montgomery,
            Model::TwistedEdwards { .. } => CurveForm::TwistedEdwards,
        }
    }

    /// Coefficients in constructor order: `(a, b)`, `(c, d)`, `(B, A)` or `(a, d)`.
    pub(crate) fn coefficients(&self) -> (&FieldElement, &FieldElement) {
        match self {
            Model::ShortWeierstrass { a, b } => (a, b),
            Model::Edwards { c, d, .. } => (c, d),
            Model::Montgomery { b, a, .. } => (b, a),
            Model::TwistedEdwards { a, d, .. } => (a, d),
        }
    }

    /// Edwards forms always have an affine neutral element.
    pub(crate) fn is_edwards(&self) -> bool {
        matches!(self, Model::Edwards { .. } | Model::TwistedEdwards { .. })
    }

    /// Evaluates the native defining equation.
    pub(crate) fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool {
        let x2 = x.square();
        let y2 = y.square();
        match self {
            Model::ShortWeierstrass { a, b } => y2 == &x2 * x + a * x + b,
            Model::Montgomery { b, a, .. } => b * &y2 == &x2 * x + a * &x2 + x,
            Model::TwistedEdwards { a, d, .. } => {
                let one = FieldElement::one(x.field());
                a * &x2 + &y2 == one + d * &x2 * &y2
            }
            Model::Edwards { c, d, .. } => {
                let one = FieldElement::one(x.field());
                &x2 + &y2 == c.square() * (one + d * &x2 * &y2)
            }
        }
    }

    /// Recovers a point from the coordinate kept by compression and the
    /// parity of the dropped one. Weierstrass and Montgomery keep `x`;
    /// Edwards forms keep `y`.
    pub(crate) fn decompress(
        &self,
        kept: &FieldElement,
        odd: bool,
    ) -> Option<(FieldElement, FieldElement)> {
        let one = FieldElement::one(kept.field());
        let k2 = kept.square();
        let square = match self {
            Model::ShortWeierstrass { a, b } => &k2 * kept + a * kept + b,
            Model::Montgomery { b, a, .. } => {
                (&k2 * kept + a * &k2 + kept) * b.invert().ok()?
            }
            Model::TwistedEdwards { a, d, .. } => {
                (&one - &k2) * (a - d * &k2).invert().ok()?
            }
            Model::Edwards { c, d, .. } => {
                let c2 = c.square();
                (&c2 - &k2) * (&one - &c2 * d * &k2).invert().ok()?
            }
        };

        let mut root = square.sqrt()?;
        if root.is_odd() != odd {
            root = -root;
            // Zero has no odd representative
            if root.is_odd() != odd {
                return None;
            }
        }

        if self.is_edwards() {
            Some((root, kept.clone()))
        } else {
            Some((kept.clone(), root))
        }
    }

    /// Maps a native point that satisfies [`Model::contains`] to the internal curve.
    pub(crate) fn to_internal(&self, x: &FieldElement, y: &FieldElement) -> Result<InternalAffine> {
        match self {
            Model::ShortWeierstrass { .. } => Ok(Some((x.clone(), y.clone()))),
            Model::Montgomery { map, .. } => Ok(Some(map.to_weierstrass(x, y))),
            Model::TwistedEdwards { map, .. } | Model::Edwards { map, .. } => {
                map.to_internal(x, y)
            }
        }
    }

    /// Maps an internal point back to native coordinates.
    pub(crate) fn from_internal(&self, point: &InternalAffine) -> Result<(FieldElement, FieldElement)> {
        match (self, point) {
            (Model::ShortWeierstrass { .. } | Model::Montgomery { .. }, None) => {
                Err(Error::PointIsIdentity)
            }
            (Model::ShortWeierstrass { .. }, Some((x, y))) => Ok((x.clone(), y.clone())),
            (Model::Montgomery { map, .. }, Some((x, y))) => Ok(map.from_weierstrass(x, y)),
            (Model::TwistedEdwards { map, .. } | Model::Edwards { map, .. }, _) => {
                map.from_internal(point)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;
    use num_bigint::{BigInt, BigUint};
    use std::sync::Arc;

    fn field(p: u64) -> Arc<PrimeField> {
        PrimeField::new(&BigUint::from(p)).unwrap()
    }

    fn fe(f: &Arc<PrimeField>, v: i64) -> FieldElement {
        FieldElement::from_bigint(f, &BigInt::from(v))
    }

    /// Native affine points, found by solving for y^2 at every x.
    fn native_points(model: &Model, f: &Arc<PrimeField>, p: u64) -> Vec<(FieldElement, FieldElement)> {
        let one = FieldElement::one(f);
        let mut points = Vec::new();
        for xv in 0..p {
            let x = FieldElement::from_u64(f, xv);
            let x2 = x.square();
            let y2 = match model {
                Model::ShortWeierstrass { a, b } => Some(&x2 * &x + a * &x + b),
                Model::Montgomery { b, a, .. } => {
                    Some((&x2 * &x + a * &x2 + &x) * b.invert().unwrap())
                }
                Model::TwistedEdwards { a, d, .. } => (&one - d * &x2)
                    .invert()
                    .ok()
                    .map(|inv| (&one - a * &x2) * inv),
                Model::Edwards { c, d, .. } => {
                    let c2 = c.square();
                    (&one - &c2 * d * &x2)
                        .invert()
                        .ok()
                        .map(|inv| (&c2 - &x2) * inv)
                }
            };
            if let Some(root) = y2.and_then(|v| v.sqrt()) {
                let neg = -&root;
                points.push((x.clone(), root.clone()));
                if neg != root {
                    points.push((x.clone(), neg));
                }
            }
        }
        points
    }

    fn on_internal(ws_a: &FieldElement, ws_b: &FieldElement, point: &InternalAffine) -> bool {
        match point {
            None => true,
            Some((x, y)) => y.square() == &x.square() * x + ws_a * x + ws_b,
        }
    }

    fn check_roundtrip(form: CurveForm, p: u64, c1: i64, c2: i64, affine_points: usize) {
        let f = field(p);
        let (model, ws_a, ws_b) = Model::new(form, fe(&f, c1), fe(&f, c2)).unwrap();
        let points = native_points(&model, &f, p);
        assert_eq!(points.len(), affine_points);

        for (x, y) in points.iter() {
            assert!(model.contains(x, y));
            let internal = model.to_internal(x, y).unwrap();
            assert!(on_internal(&ws_a, &ws_b, &internal));
            let (x2, y2) = model.from_internal(&internal).unwrap();
            assert_eq!((&x2, &y2), (x, y));

            let (kept, dropped) = if model.is_edwards() { (y, x) } else { (x, y) };
            let (dx, dy) = model.decompress(kept, dropped.is_odd()).unwrap();
            assert_eq!((&dx, &dy), (x, y));
        }
    }

    #[test]
    fn test_montgomery_roundtrip() {
        check_roundtrip(CurveForm::Montgomery, 1019, 2, 11, 1027);
    }

    #[test]
    fn test_twisted_edwards_roundtrip() {
        check_roundtrip(CurveForm::TwistedEdwards, 1009, -1, 26, 1016);
    }

    #[test]
    fn test_edwards_roundtrip() {
        check_roundtrip(CurveForm::Edwards, 1019, 3, 13, 1004);
    }

    #[test]
    fn test_weierstrass_roundtrip() {
        check_roundtrip(CurveForm::ShortWeierstrass, 23, 1, 1, 27);
    }

    #[test]
    fn test_montgomery_coefficients() {
        // Curve25519: A = 486662, B = 1
        let p = (BigUint::from(1u32) << 255usize) - BigUint::from(19u32);
        let f = PrimeField::new(&p).unwrap();
        let (model, ws_a, ws_b) =
            Model::new(CurveForm::Montgomery, fe(&f, 1), fe(&f, 486662)).unwrap();
        let a = fe(&f, 486662);
        let three = fe(&f, 3);
        assert_eq!(ws_a * fe(&f, 3), &three - &a.square());
        assert_eq!(ws_b * fe(&f, 27), fe(&f, 2) * a.square() * &a - fe(&f, 9) * &a);
        assert_eq!(model.form(), CurveForm::Montgomery);
    }

    #[test]
    fn test_edwards_identity_maps() {
        let f = field(1019);
        let (model, _, _) = Model::new(CurveForm::Edwards, fe(&f, 3), fe(&f, 13)).unwrap();
        assert_eq!(model.to_internal(&fe(&f, 0), &fe(&f, 3)).unwrap(), None);
        assert_eq!(model.from_internal(&None).unwrap(), (fe(&f, 0), fe(&f, 3)));

        // (0, -c) has order two
        let internal = model.to_internal(&fe(&f, 0), &fe(&f, -3)).unwrap();
        let (_, wy) = internal.clone().unwrap();
        assert!(wy.is_zero());
        assert_eq!(model.from_internal(&internal).unwrap(), (fe(&f, 0), fe(&f, -3)));
    }

    #[test]
    fn test_identity_has_no_weierstrass_image() {
        let f = field(23);
        let (model, _, _) = Model::new(CurveForm::ShortWeierstrass, fe(&f, 1), fe(&f, 1)).unwrap();
        assert_eq!(model.from_internal(&None), Err(Error::PointIsIdentity));
        let (model, _, _) = Model::new(CurveForm::Montgomery, fe(&f, 2), fe(&f, 11)).unwrap();
        assert_eq!(model.from_internal(&None), Err(Error::PointIsIdentity));
    }

    #[test]
    fn test_exceptional_point() {
        // d = 4 is a square mod 1009, so the curve has points at infinity
        let f = field(1009);
        let (model, _, _) =
            Model::new(CurveForm::TwistedEdwards, fe(&f, -1), fe(&f, 4)).unwrap();
        let map = match &model {
            Model::TwistedEdwards { map, .. } => map.mont.clone(),
            _ => unreachable!(),
        };
        // Montgomery u = -1 has v^2 = d
        let (wx, wy) = map.to_weierstrass(&fe(&f, -1), &fe(&f, 2));
        assert_eq!(
            model.from_internal(&Some((wx, wy))),
            Err(Error::ExceptionalPoint)
        );
    }

    #[test]
    fn test_degenerate_coefficients() {
        let f = field(1019);
        let cases = [
            (CurveForm::Montgomery, 0, 11),
            (CurveForm::Montgomery, 2, 2),
            (CurveForm::Montgomery, 2, -2),
            (CurveForm::TwistedEdwards, 0, 5),
            (CurveForm::TwistedEdwards, 5, 0),
            (CurveForm::TwistedEdwards, 5, 5),
            (CurveForm::Edwards, 0, 13),
            (CurveForm::Edwards, 3, 0),
            (CurveForm::Edwards, 1, 1),
        ];
        for (form, c1, c2) in cases {
            assert!(matches!(
                Model::new(form, fe(&f, c1), fe(&f, c2)),
                Err(Error::InvalidParameters(_))
            ));
        }
    }
}
