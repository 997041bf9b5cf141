//! Error types produced while building beam element stiffness matrices.

use nalgebra::Vector3;
use thiserror::Error;

/// Result type alias using [`StiffnessError`].
pub type Result<T> = std::result::Result<T, StiffnessError>;

/// Error returned when a stiffness matrix cannot be generated.
///
/// Each variant wraps the more specific error of the input that failed
/// validation, so callers can either match on the category or inspect the
/// source for the offending value.
#[derive(Debug, Error, PartialEq)]
pub enum StiffnessError {
    /// Returned when the element orientation or length is unusable.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
    /// Returned when the material moduli are not physically meaningful.
    #[error("invalid material: {0}")]
    InvalidMaterial(#[from] MaterialError),
    /// Returned when the cross-section coefficients or shape are invalid.
    #[error("invalid section: {0}")]
    InvalidSection(#[from] SectionError),
}

/// Error returned when the beam direction or length cannot define a local axis.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when the direction vector has zero length.
    #[error("direction vector must be non-zero")]
    ZeroDirection,
    /// Returned when the direction vector contains NaN or infinite components.
    #[error("direction vector must be finite (received {direction:?})")]
    NonFiniteDirection {
        /// Rejected direction vector.
        direction: Vector3<f64>,
    },
    /// Returned when the roll angle is NaN or infinite.
    #[error("roll angle must be finite (received {theta})")]
    NonFiniteAngle {
        /// Rejected angle in radians.
        theta: f64,
    },
    /// Returned when an axis convention cannot orient any beam.
    #[error("invalid axis convention: {reason}")]
    InvalidConvention {
        /// Which setting was rejected.
        reason: &'static str,
    },
    /// Returned when an explicit element length is zero, negative or not finite.
    #[error("element length must be positive (received {length})")]
    NonPositiveLength {
        /// Rejected length.
        length: f64,
    },
    /// Returned when neither reference axis can be separated from the beam axis.
    #[error("cannot orient local axes for direction {direction:?}")]
    AmbiguousOrientation {
        /// Unit direction of the beam axis.
        direction: Vector3<f64>,
    },
}

/// Error returned when material moduli are rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MaterialError {
    /// Returned when Young's modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {value})")]
    NonPositiveElasticModulus {
        /// Rejected modulus in pascals.
        value: f64,
    },
    /// Returned when the shear modulus is zero, negative or not finite.
    #[error("shear modulus must be positive (received {value})")]
    NonPositiveShearModulus {
        /// Rejected modulus in pascals.
        value: f64,
    },
    /// Returned when a Poisson's ratio lies outside `(-1, 0.5]`.
    #[error("poisson's ratio must lie in (-1, 0.5] (received {value})")]
    PoissonRatioOutOfRange {
        /// Rejected ratio.
        value: f64,
    },
}

/// Error returned when section coefficients or shape data are rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SectionError {
    /// Returned when an area, inertia or polar moment is negative or not finite.
    #[error("{field} must be non-negative (received {value})")]
    NegativeCoefficient {
        /// Name of the offending coefficient.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the cross-sectional area is zero or negative.
    #[error("Ax must be positive (received {value})")]
    NonPositiveArea {
        /// Rejected area.
        value: f64,
    },
    /// Returned when a coefficient record lacks a required field.
    #[error("coefficient record is missing required field `{field}`")]
    MissingField {
        /// Name of the absent field.
        field: String,
    },
    /// Returned when a shape dimension is out of range.
    #[error("{shape} section has invalid {dimension} (received {value})")]
    InvalidDimension {
        /// Tag of the shape being evaluated.
        shape: &'static str,
        /// Name of the offending dimension.
        dimension: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when externally supplied data names a shape that is not supported.
    #[error("unknown section shape `{0}`")]
    UnknownShape(String),
    /// Returned when externally supplied data cannot be parsed.
    #[error("malformed section data: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },
}
