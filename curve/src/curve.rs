use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rand::CryptoRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{FieldElement, PrimeField};
use crate::group::window_count;
use crate::model::{CurveForm, InternalAffine, Model};
use crate::random::random_nonzero_below;
use crate::registry;

/// Full numeric description of a curve.
///
/// `coefficients` are in constructor order for the form: `(a, b)` for
/// short-Weierstrass, `(c, d)` for Edwards, `(B, A)` for Montgomery and
/// `(a, d)` for twisted Edwards. Negative values are reduced modulo `p`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub form: CurveForm,
    pub p: BigUint,
    pub coefficients: (BigInt, BigInt),
    pub order: BigUint,
    pub cofactor: BigUint,
    pub generator: (BigUint, BigUint),
    pub bits: u32,
}

struct CurveInner {
    field: Arc<PrimeField>,
    model: Model,
    /// Internal short-Weierstrass coefficients.
    a: FieldElement,
    b: FieldElement,
    order: BigUint,
    cofactor: BigUint,
    group_order: BigUint,
    windows: usize,
    generator: (BigUint, BigUint),
    generator_internal: InternalAffine,
    bits: u32,
    name: Option<&'static str>,
}

/// An elliptic curve over a prime field.
///
/// Cloning is cheap and clones share the same parameters. All group-law
/// arithmetic runs on an internal short-Weierstrass model derived once at
/// construction; native coordinates are only used at the affine boundary.
#[derive(Clone)]
pub struct Curve {
    inner: Arc<CurveInner>,
}

impl Curve {
    /// `y^2 = x^3 + a*x + b`
    #[allow(clippy::too_many_arguments)]
    pub fn short_weierstrass(
        p: &BigUint,
        a: &BigInt,
        b: &BigInt,
        n: &BigUint,
        h: &BigUint,
        gx: &BigUint,
        gy: &BigUint,
        bits: u32,
    ) -> Result<Self> {
        Self::with_form(CurveForm::ShortWeierstrass, p, a, b, n, h, gx, gy, bits)
    }

    /// `x^2 + y^2 = c^2 * (1 + d*x^2*y^2)`
    #[allow(clippy::too_many_arguments)]
    pub fn edwards(
        p: &BigUint,
        c: &BigInt,
        d: &BigInt,
        n: &BigUint,
        h: &BigUint,
        gx: &BigUint,
        gy: &BigUint,
        bits: u32,
    ) -> Result<Self> {
        Self::with_form(CurveForm::Edwards, p, c, d, n, h, gx, gy, bits)
    }

    /// `B*y^2 = x^3 + A*x^2 + x`. Note the coefficient order.
    #[allow(clippy::too_many_arguments)]
    pub fn montgomery(
        p: &BigUint,
        b: &BigInt,
        a: &BigInt,
        n: &BigUint,
        h: &BigUint,
        gx: &BigUint,
        gy: &BigUint,
        bits: u32,
    ) -> Result<Self> {
        Self::with_form(CurveForm::Montgomery, p, b, a, n, h, gx, gy, bits)
    }

    /// `a*x^2 + y^2 = 1 + d*x^2*y^2`
    #[allow(clippy::too_many_arguments)]
    pub fn twisted_edwards(
        p: &BigUint,
        a: &BigInt,
        d: &BigInt,
        n: &BigUint,
        h: &BigUint,
        gx: &BigUint,
        gy: &BigUint,
        bits: u32,
    ) -> Result<Self> {
        Self::with_form(CurveForm::TwistedEdwards, p, a, d, n, h, gx, gy, bits)
    }

    #[allow(clippy::too_many_arguments)]
    fn with_form(
        form: CurveForm,
        p: &BigUint,
        c1: &BigInt,
        c2: &BigInt,
        n: &BigUint,
        h: &BigUint,
        gx: &BigUint,
        gy: &BigUint,
        bits: u32,
    ) -> Result<Self> {
        Self::from_parameters(&CurveParameters {
            form,
            p: p.clone(),
            coefficients: (c1.clone(), c2.clone()),
            order: n.clone(),
            cofactor: h.clone(),
            generator: (gx.clone(), gy.clone()),
            bits,
        })
    }

    pub fn from_parameters(params: &CurveParameters) -> Result<Self> {
        Self::build(params, None)
    }

    /// Looks up a curve in the standard-curve registry.
    pub fn from_name(name: &str) -> Result<Self> {
        registry::lookup(name)
    }

    pub(crate) fn build(params: &CurveParameters, name: Option<&'static str>) -> Result<Self> {
        if params.p <= BigUint::from(3u32) {
            return Err(Error::InvalidParameters("modulus must be a prime greater than 3"));
        }
        let field = PrimeField::new(&params.p)?;

        if params.order.is_zero() {
            return Err(Error::InvalidParameters("group order must be non-zero"));
        }
        if params.cofactor.is_zero() {
            return Err(Error::InvalidParameters("cofactor must be non-zero"));
        }

        let c1 = FieldElement::from_bigint(&field, &params.coefficients.0);
        let c2 = FieldElement::from_bigint(&field, &params.coefficients.1);
        let (model, a, b) = Model::new(params.form, c1, c2)?;

        // 4a^3 + 27b^2 != 0
        let disc = FieldElement::from_u64(&field, 4) * a.square() * &a
            + FieldElement::from_u64(&field, 27) * b.square();
        if disc.is_zero() {
            return Err(Error::InvalidParameters("curve is singular"));
        }

        let gx = FieldElement::new(&field, &params.generator.0);
        let gy = FieldElement::new(&field, &params.generator.1);
        if !model.contains(&gx, &gy) {
            return Err(Error::InvalidParameters("generator is not on the curve"));
        }
        let generator_internal = model.to_internal(&gx, &gy)?;

        let group_order = &params.order * &params.cofactor;
        let inner = CurveInner {
            windows: window_count(&group_order),
            field,
            model,
            a,
            b,
            order: params.order.clone(),
            cofactor: params.cofactor.clone(),
            group_order,
            generator: (gx.to_biguint(), gy.to_biguint()),
            generator_internal,
            bits: params.bits,
            name,
        };

        Ok(Curve {
            inner: Arc::new(inner),
        })
    }

    /// Checks the native curve equation at `(x mod p, y mod p)`.
    pub fn is_point_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let x = FieldElement::new(&self.inner.field, x);
        let y = FieldElement::new(&self.inner.field, y);
        self.inner.model.contains(&x, &y)
    }

    /// Uniform scalar in `[1, n)`.
    pub fn random_scalar<R: CryptoRng + ?Sized>(&self, rng: &mut R) -> BigUint {
        random_nonzero_below(&self.inner.order, rng)
    }

    pub fn form(&self) -> CurveForm {
        self.inner.model.form()
    }

    pub fn field(&self) -> &Arc<PrimeField> {
        &self.inner.field
    }

    pub fn modulus(&self) -> &BigUint {
        self.inner.field.modulus()
    }

    /// Native coefficients, canonical in `[0, p)`, in constructor order.
    pub fn coefficients(&self) -> (BigUint, BigUint) {
        let (c1, c2) = self.inner.model.coefficients();
        (c1.to_biguint(), c2.to_biguint())
    }

    /// Order `n` of the generator.
    pub fn order(&self) -> &BigUint {
        &self.inner.order
    }

    pub fn cofactor(&self) -> &BigUint {
        &self.inner.cofactor
    }

    /// `n * h`, the number of points on the curve.
    pub fn group_order(&self) -> &BigUint {
        &self.inner.group_order
    }

    pub fn generator_coordinates(&self) -> (&BigUint, &BigUint) {
        (&self.inner.generator.0, &self.inner.generator.1)
    }

    pub fn bits(&self) -> u32 {
        self.inner.bits
    }

    /// Registry name, if the curve came from [`Curve::from_name`].
    pub fn name(&self) -> Option<&'static str> {
        self.inner.name
    }

    pub fn parameters(&self) -> CurveParameters {
        let (c1, c2) = self.coefficients();
        CurveParameters {
            form: self.form(),
            p: self.modulus().clone(),
            coefficients: (BigInt::from(c1), BigInt::from(c2)),
            order: self.inner.order.clone(),
            cofactor: self.inner.cofactor.clone(),
            generator: self.inner.generator.clone(),
            bits: self.inner.bits,
        }
    }

    pub(crate) fn model(&self) -> &Model {
        &self.inner.model
    }

    /// Internal short-Weierstrass `a`.
    pub(crate) fn weierstrass_a(&self) -> &FieldElement {
        &self.inner.a
    }

    /// Internal short-Weierstrass `b`.
    pub(crate) fn weierstrass_b(&self) -> &FieldElement {
        &self.inner.b
    }

    pub(crate) fn generator_internal(&self) -> &InternalAffine {
        &self.inner.generator_internal
    }

    /// Number of 4-bit windows covering any reduced scalar.
    pub(crate) fn windows(&self) -> usize {
        self.inner.windows
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        let (a, b) = (&self.inner, &other.inner);
        a.model.form() == b.model.form()
            && a.model.coefficients() == b.model.coefficients()
            && a.order == b.order
            && a.cofactor == b.cofactor
            && a.generator == b.generator
    }
}

impl Eq for Curve {}

impl Debug for Curve {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("name", &self.inner.name)
            .field("form", &self.form())
            .field("p", &format_args!("0x{:x}", self.modulus()))
            .finish()
    }
}
