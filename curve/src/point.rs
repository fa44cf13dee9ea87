use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use num_bigint::BigUint;
use rand::{CryptoRng, Rng};

use crate::affine::AffinePoint;
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::group::{mul_vartime, scalar_mul_windowed, ScalarBits};
use crate::projective::Projective;
use crate::table::BaseTable;

const TAG_IDENTITY: u8 = 0x00;
const TAG_COMPRESSED_EVEN: u8 = 0x02;
const TAG_COMPRESSED_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// A point on a [`Curve`].
///
/// Coordinates are held in projective form on the curve's internal
/// short-Weierstrass model. A point may carry a precomputed table for fast
/// repeated multiplication; the table is tied to this point's value and is
/// dropped by every operation that changes the coordinates in place.
#[derive(Clone)]
pub struct Point {
    curve: Curve,
    coords: Projective,
    table: Option<Arc<BaseTable>>,
}

impl Point {
    fn from_coords(curve: &Curve, coords: Projective) -> Self {
        Point {
            curve: curve.clone(),
            coords,
            table: None,
        }
    }

    /// The point at infinity.
    pub fn identity(curve: &Curve) -> Self {
        Self::from_coords(curve, Projective::identity(curve.field()))
    }

    /// The curve's generator.
    pub fn generator(curve: &Curve) -> Self {
        let coords = Projective::from_internal(curve.field(), curve.generator_internal());
        Self::from_coords(curve, coords)
    }

    /// Builds a point from native affine coordinates, reduced modulo `p`.
    pub fn from_affine(curve: &Curve, x: &BigUint, y: &BigUint) -> Result<Self> {
        let field = curve.field();
        let x = FieldElement::new(field, x);
        let y = FieldElement::new(field, y);
        Self::from_native(curve, &x, &y)
    }

    fn from_native(curve: &Curve, x: &FieldElement, y: &FieldElement) -> Result<Self> {
        let model = curve.model();
        if !model.contains(x, y) {
            return Err(Error::PointNotOnCurve);
        }
        let internal = model.to_internal(x, y)?;
        Ok(Self::from_coords(
            curve,
            Projective::from_internal(curve.field(), &internal),
        ))
    }

    /// Samples a uniform point of the order-`n` subgroup with the
    /// thread-local CSPRNG.
    pub fn uniform_random(curve: &Curve) -> Self {
        Self::random(curve, &mut rand::rng())
    }

    /// Samples a uniform point of the order-`n` subgroup.
    ///
    /// Picks a random `x` on the internal curve, takes a square root with a
    /// random sign and clears the cofactor. Draws that land on the identity,
    /// or on a point with no native affine image, are rejected.
    pub fn random<R: CryptoRng + ?Sized>(curve: &Curve, rng: &mut R) -> Self {
        let field = curve.field();
        let (a, b) = (curve.weierstrass_a(), curve.weierstrass_b());

        loop {
            let x = FieldElement::random(field, rng);
            let rhs = x.square() * &x + a * &x + b;
            let Some(mut y) = rhs.sqrt() else {
                continue;
            };
            if rng.random::<bool>() {
                y = -y;
            }

            let coords = mul_vartime(&Projective::from_affine(x, y), curve.cofactor(), a);
            if coords.is_identity() {
                continue;
            }
            if curve.model().from_internal(&coords.to_affine()).is_err() {
                continue;
            }
            return Self::from_coords(curve, coords);
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn is_identity(&self) -> bool {
        self.coords.is_identity()
    }

    /// Native affine coordinates.
    ///
    /// On Edwards-form curves the identity maps to its affine neutral point
    /// `(0, c)`; elsewhere it fails with [`Error::PointIsIdentity`].
    pub fn to_affine(&self) -> Result<AffinePoint> {
        let (x, y) = self.native()?;
        Ok(AffinePoint::new(x.to_biguint(), y.to_biguint()))
    }

    fn native(&self) -> Result<(FieldElement, FieldElement)> {
        self.curve.model().from_internal(&self.coords.to_affine())
    }

    fn check_curve(&self, other: &Self) -> Result<()> {
        if self.curve != other.curve {
            return Err(Error::CurveMismatch);
        }
        Ok(())
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_curve(other)?;
        let coords = self.coords.add(&other.coords, self.curve.weierstrass_a());
        Ok(Self::from_coords(&self.curve, coords))
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate())
    }

    pub fn double(&self) -> Self {
        Self::from_coords(&self.curve, self.coords.double(self.curve.weierstrass_a()))
    }

    pub fn negate(&self) -> Self {
        Self::from_coords(&self.curve, self.coords.negate())
    }

    /// In-place addition. Drops any precomputed table.
    pub fn add_assign(&mut self, other: &Self) -> Result<()> {
        self.check_curve(other)?;
        self.coords = self.coords.add(&other.coords, self.curve.weierstrass_a());
        self.table = None;
        Ok(())
    }

    /// In-place doubling. Drops any precomputed table.
    pub fn double_assign(&mut self) {
        self.coords = self.coords.double(self.curve.weierstrass_a());
        self.table = None;
    }

    /// In-place negation. Drops any precomputed table.
    pub fn negate_assign(&mut self) {
        self.coords = self.coords.negate();
        self.table = None;
    }

    /// Replaces the coordinates with a new native affine point. On error the
    /// point is left unchanged.
    pub fn assign_affine(&mut self, x: &BigUint, y: &BigUint) -> Result<()> {
        let point = Self::from_affine(&self.curve, x, y)?;
        self.coords = point.coords;
        self.table = None;
        Ok(())
    }

    /// `k * self`, with `k` reduced modulo the group order `n * h`.
    pub fn scalar_mul<S: ScalarBits + ?Sized>(&self, k: &S) -> Self {
        let k = k.reduce(self.curve.group_order());
        let coords = scalar_mul_windowed(
            &self.coords,
            &k,
            self.curve.windows(),
            self.curve.weierstrass_a(),
        );
        Self::from_coords(&self.curve, coords)
    }

    /// Variable-time multiplication by a small public integer.
    pub fn mul_u64(&self, n: u64) -> Self {
        let coords = mul_vartime(&self.coords, &BigUint::from(n), self.curve.weierstrass_a());
        Self::from_coords(&self.curve, coords)
    }

    /// Builds and attaches the table of multiples `j * 16^i * self`.
    /// Clones made afterwards share the table.
    pub fn precompute(&mut self) {
        let table = BaseTable::new(
            &self.coords,
            self.curve.windows(),
            self.curve.weierstrass_a(),
        );
        self.table = Some(Arc::new(table));
    }

    pub fn has_precomputation(&self) -> bool {
        self.table.is_some()
    }

    /// `k * self` using the attached table; additions only.
    pub fn scalar_mul_precomputed<S: ScalarBits + ?Sized>(&self, k: &S) -> Result<Self> {
        let table = self.table.as_ref().ok_or(Error::NoPrecomputation)?;
        let k = k.reduce(self.curve.group_order());
        let coords = table.mul(&k, self.curve.weierstrass_a());
        Ok(Self::from_coords(&self.curve, coords))
    }

    /// SEC1-style encoding of the native affine coordinates.
    ///
    /// The identity of a Weierstrass or Montgomery curve encodes as a single
    /// zero byte. Compressed encodings keep `x` (or `y` on Edwards forms)
    /// and the parity of the other coordinate.
    pub fn to_bytes(&self, compressed: bool) -> Result<Vec<u8>> {
        let (x, y) = match self.native() {
            Ok(coords) => coords,
            Err(Error::PointIsIdentity) => return Ok(vec![TAG_IDENTITY]),
            Err(e) => return Err(e),
        };

        let len = self.curve.field().byte_len();
        let mut out = Vec::with_capacity(1 + 2 * len);
        if compressed {
            let (kept, dropped) = if self.curve.model().is_edwards() {
                (&y, &x)
            } else {
                (&x, &y)
            };
            out.push(if dropped.is_odd() {
                TAG_COMPRESSED_ODD
            } else {
                TAG_COMPRESSED_EVEN
            });
            out.extend_from_slice(&kept.to_bytes_be());
        } else {
            out.push(TAG_UNCOMPRESSED);
            out.extend_from_slice(&x.to_bytes_be());
            out.extend_from_slice(&y.to_bytes_be());
        }
        Ok(out)
    }

    /// Decodes the output of [`Point::to_bytes`].
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        let field = curve.field();
        let len = field.byte_len();
        let coordinate = |chunk: &[u8]| -> Result<FieldElement> {
            let value = BigUint::from_bytes_be(chunk);
            if &value >= field.modulus() {
                return Err(Error::InvalidEncoding);
            }
            Ok(FieldElement::new(field, &value))
        };

        match bytes.split_first() {
            Some((&TAG_IDENTITY, [])) => Ok(Self::identity(curve)),
            Some((&TAG_UNCOMPRESSED, rest)) if rest.len() == 2 * len => {
                let x = coordinate(&rest[..len])?;
                let y = coordinate(&rest[len..])?;
                Self::from_native(curve, &x, &y)
            }
            Some((&tag, rest))
                if (tag == TAG_COMPRESSED_EVEN || tag == TAG_COMPRESSED_ODD) && rest.len() == len =>
            {
                let kept = coordinate(rest)?;
                let (x, y) = curve
                    .model()
                    .decompress(&kept, tag == TAG_COMPRESSED_ODD)
                    .ok_or(Error::PointNotOnCurve)?;
                Self::from_native(curve, &x, &y)
            }
            _ => Err(Error::InvalidEncoding),
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.coords.equivalent(&other.coords)
    }
}

impl Eq for Point {}

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.to_affine() {
            Ok(affine) => write!(f, "Point(0x{:x}, 0x{:x})", affine.x, affine.y),
            Err(Error::PointIsIdentity) => write!(f, "Point(infinity)"),
            Err(e) => write!(f, "Point({})", e),
        }
    }
}
