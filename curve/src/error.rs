use thiserror::Error;

/// Errors returned by field, curve and point operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Curve or field parameters were rejected during construction.
    #[error("invalid curve parameters: {0}")]
    InvalidParameters(&'static str),

    /// No registry entry matches the requested name.
    #[error("unknown curve name: {0}")]
    UnknownCurve(String),

    /// The supplied coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    PointNotOnCurve,

    /// The point at infinity has no affine representation on this curve.
    #[error("point at infinity has no affine coordinates")]
    PointIsIdentity,

    /// Inversion of zero.
    #[error("element is not invertible")]
    NotInvertible,

    /// Precomputed multiplication was requested on a point without a table.
    #[error("point has no precomputed table")]
    NoPrecomputation,

    /// Operands belong to different curves or fields.
    #[error("operands belong to different curves")]
    CurveMismatch,

    /// The point maps to a point at infinity of an incomplete Edwards model.
    #[error("point has no affine image in the curve's native form")]
    ExceptionalPoint,

    /// Byte encoding is malformed.
    #[error("malformed point encoding")]
    InvalidEncoding,
}

pub type Result<T> = core::result::Result<T, Error>;
