//! Elliptic curve arithmetic over prime fields.
//!
//! Curves may be given in short-Weierstrass, Edwards, Montgomery or twisted
//! Edwards form. Each is mapped once onto an internal short-Weierstrass model
//! on which all group-law arithmetic runs; native coordinates are restored
//! only at the affine boundary. The crate provides prime-field elements,
//! curve construction and validation, a registry of standard curves, the
//! group law, fixed-window scalar multiplication and per-point
//! precomputation for repeated multiplication of one base.

mod affine;
mod curve;
mod error;
mod field;
mod group;
mod limbs;
mod model;
mod point;
mod prime;
mod projective;
mod random;
mod registry;
mod table;

pub use affine::AffinePoint;
pub use curve::{Curve, CurveParameters};
pub use error::{Error, Result};
pub use field::{FieldElement, PrimeField};
pub use group::ScalarBits;
pub use model::CurveForm;
pub use point::Point;
pub use registry::list_standard_curve_names;
