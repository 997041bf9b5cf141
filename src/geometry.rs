//! Element geometry: end points, beam axis direction and roll angle.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::errors::GeometryError;

/// Position in three dimensional space in global coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use beamx::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Orientation and length of a beam element.
///
/// The direction is the vector from the first node to the second node in global
/// coordinates. It does not need to be normalised: its norm is the element
/// length. `theta` rolls the cross-section about the beam axis (the beta angle)
/// and is measured in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamGeometry {
    /// Beam axis from node 1 to node 2.
    direction: Vector3<f64>,
    /// Roll angle of the section about the beam axis in radians.
    theta: f64,
}

impl BeamGeometry {
    /// Create a geometry from a direction vector and roll angle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDirection`] for a zero vector,
    /// [`GeometryError::NonFiniteDirection`] when a component is NaN or infinite
    /// and [`GeometryError::NonFiniteAngle`] for a NaN or infinite roll angle.
    ///
    /// # Examples
    /// ```
    /// use beamx::{BeamGeometry, GeometryError};
    /// use nalgebra::Vector3;
    ///
    /// let geometry = BeamGeometry::new(Vector3::new(3.0, 0.0, 4.0), 0.0).expect("valid axis");
    /// assert_eq!(geometry.length(), 5.0);
    ///
    /// let error = BeamGeometry::new(Vector3::zeros(), 0.0).expect_err("zero axis rejected");
    /// assert_eq!(error, GeometryError::ZeroDirection);
    /// ```
    pub fn new(direction: Vector3<f64>, theta: f64) -> Result<Self, GeometryError> {
        validate_direction(&direction)?;
        validate_angle(theta)?;
        Ok(Self { direction, theta })
    }

    /// Create a geometry spanning two end points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDirection`] when both points coincide.
    pub fn between(start: Point, end: Point, theta: f64) -> Result<Self, GeometryError> {
        Self::new(end.to_vector() - start.to_vector(), theta)
    }

    /// Beam axis as supplied, not normalised.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// Roll angle in radians.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Element length, the norm of the direction vector.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction.norm()
    }
}

/// Check that `direction` can define an axis and return its norm.
pub(crate) fn validate_direction(direction: &Vector3<f64>) -> Result<f64, GeometryError> {
    if direction.iter().any(|component| !component.is_finite()) {
        return Err(GeometryError::NonFiniteDirection {
            direction: *direction,
        });
    }
    let length = direction.norm();
    if length == 0.0 {
        return Err(GeometryError::ZeroDirection);
    }
    Ok(length)
}

/// Check that the roll angle is a usable number of radians.
pub(crate) fn validate_angle(theta: f64) -> Result<(), GeometryError> {
    if theta.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteAngle { theta })
    }
}
