use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Affine coordinates of a point in its curve's native form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffinePoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl AffinePoint {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        AffinePoint { x, y }
    }
}

impl From<(BigUint, BigUint)> for AffinePoint {
    fn from((x, y): (BigUint, BigUint)) -> Self {
        AffinePoint { x, y }
    }
}
