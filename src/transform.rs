//! Direction cosine matrices between the local beam frame and the global frame.
//!
//! The local x axis runs along the beam. The local y axis is taken from the
//! reference axis of the [`AxisConvention`] (global Y by default) projected onto
//! the plane normal to the beam, so for a horizontal beam local y points "up".
//! When the beam is parallel to the reference axis the fallback axis (global X
//! by default) is projected instead. Local z completes a right-handed triad and
//! the roll angle then rotates y and z about x.

use nalgebra::{Matrix3, Matrix6, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GeometryError;
use crate::geometry::{validate_angle, validate_direction};

/// Sine of the smallest angle between the beam and a reference axis that is
/// still treated as non-parallel.
pub const PARALLEL_TOLERANCE: f64 = 1.0e-6;

/// Choice of reference axes used to orient the local y and z axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConvention {
    /// Preferred "up" direction for local y.
    pub reference: Vector3<f64>,
    /// Axis used when the beam is parallel to `reference`.
    pub fallback: Vector3<f64>,
    /// Parallel detection threshold, see [`PARALLEL_TOLERANCE`].
    pub parallel_tolerance: f64,
}

impl Default for AxisConvention {
    fn default() -> Self {
        Self {
            reference: Vector3::y(),
            fallback: Vector3::x(),
            parallel_tolerance: PARALLEL_TOLERANCE,
        }
    }
}

impl AxisConvention {
    /// Check that both axes are usable directions and the tolerance is positive.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConvention`] naming the rejected setting.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let usable = |axis: &Vector3<f64>| {
            axis.iter().all(|component| component.is_finite()) && axis.norm() > 0.0
        };
        if !usable(&self.reference) {
            return Err(GeometryError::InvalidConvention {
                reason: "reference axis must be finite and non-zero",
            });
        }
        if !usable(&self.fallback) {
            return Err(GeometryError::InvalidConvention {
                reason: "fallback axis must be finite and non-zero",
            });
        }
        if !(self.parallel_tolerance > 0.0 && self.parallel_tolerance.is_finite()) {
            return Err(GeometryError::InvalidConvention {
                reason: "parallel tolerance must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Orthonormal rotation from local beam axes to global axes.
///
/// The columns are the local unit axes `ex`, `ey`, `ez` expressed in global
/// coordinates, so `T * v_local = v_global` and `T^T * v_global = v_local`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformMatrix(Matrix3<f64>);

impl TransformMatrix {
    /// Build the transform for a beam along `direction` rolled by `theta` radians,
    /// using the default [`AxisConvention`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] for a zero or non-finite direction.
    ///
    /// # Examples
    /// ```
    /// use beamx::TransformMatrix;
    /// use nalgebra::{Matrix3, Vector3};
    ///
    /// let aligned = TransformMatrix::build(Vector3::new(2.0, 0.0, 0.0), 0.0).expect("valid axis");
    /// assert_eq!(*aligned.matrix(), Matrix3::identity());
    ///
    /// let vertical = TransformMatrix::build(Vector3::new(0.0, 1.0, 0.0), 0.0).expect("fallback axis");
    /// assert!(vertical.is_orthonormal(1e-12));
    /// ```
    pub fn build(direction: Vector3<f64>, theta: f64) -> Result<Self, GeometryError> {
        Self::build_with(direction, theta, &AxisConvention::default())
    }

    /// Build the transform with an explicit choice of reference axes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDirection`] or
    /// [`GeometryError::NonFiniteDirection`] for an unusable direction,
    /// [`GeometryError::NonFiniteAngle`] for a NaN or infinite roll,
    /// [`GeometryError::InvalidConvention`] when `convention` has a zero or
    /// non-finite axis or a tolerance that is not positive, and
    /// [`GeometryError::AmbiguousOrientation`] when the beam is parallel to both
    /// reference axes of `convention`.
    pub fn build_with(
        direction: Vector3<f64>,
        theta: f64,
        convention: &AxisConvention,
    ) -> Result<Self, GeometryError> {
        let length = validate_direction(&direction)?;
        validate_angle(theta)?;
        convention.validate()?;
        let ex = direction / length;

        let tolerance = convention.parallel_tolerance;
        let ey = match perpendicular_part(&ex, &convention.reference, tolerance) {
            Some(ey) => ey,
            None => {
                debug!(?direction, "beam parallel to reference axis, using fallback axis");
                perpendicular_part(&ex, &convention.fallback, tolerance)
                    .ok_or(GeometryError::AmbiguousOrientation { direction: ex })?
            }
        };
        let ez = ex.cross(&ey).normalize();
        let ey = ez.cross(&ex);

        let (sin, cos) = theta.sin_cos();
        let ey_rolled = ey * cos + ez * sin;
        let ez_rolled = ez * cos - ey * sin;

        Ok(Self(Matrix3::from_columns(&[ex, ey_rolled, ez_rolled])))
    }

    /// The 3x3 rotation matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Local x axis (beam axis) in global coordinates.
    #[must_use]
    pub fn local_x(&self) -> Vector3<f64> {
        self.0.column(0).into_owned()
    }

    /// Local y axis in global coordinates.
    #[must_use]
    pub fn local_y(&self) -> Vector3<f64> {
        self.0.column(1).into_owned()
    }

    /// Local z axis in global coordinates.
    #[must_use]
    pub fn local_z(&self) -> Vector3<f64> {
        self.0.column(2).into_owned()
    }

    /// `blockdiag(T, T)`, rotating the translations and rotations of one node.
    #[must_use]
    pub fn block_diagonal(&self) -> Matrix6<f64> {
        let mut block = Matrix6::zeros();
        block.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.0);
        block.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.0);
        block
    }

    /// Whether `T^T T` equals the identity within `tolerance` in every entry.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let gram = self.0.transpose() * self.0;
        (gram - Matrix3::identity()).amax() <= tolerance
    }
}

/// Unit component of `reference` normal to `axis`, or `None` when the two are
/// parallel within `tolerance`.
fn perpendicular_part(
    axis: &Vector3<f64>,
    reference: &Vector3<f64>,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let reference = reference.try_normalize(0.0)?;
    if axis.cross(&reference).norm() < tolerance {
        return None;
    }
    (reference - axis * axis.dot(&reference)).try_normalize(f64::EPSILON)
}
