//! A beam element bundling geometry, material and section.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::geometry::{BeamGeometry, Point};
use crate::material::MaterialProperties;
use crate::section::SectionCoefficients;
use crate::stiffness::{self, GlobalStiffnessBlocks, LocalStiffnessBlocks};
use crate::transform::{AxisConvention, TransformMatrix};

/// Inputs of one beam element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamElement {
    /// Orientation and length.
    pub geometry: BeamGeometry,
    /// Elastic moduli.
    pub material: MaterialProperties,
    /// Cross-section coefficients.
    pub section: SectionCoefficients,
}

impl BeamElement {
    /// Bundle already validated inputs.
    #[must_use]
    pub const fn new(
        geometry: BeamGeometry,
        material: MaterialProperties,
        section: SectionCoefficients,
    ) -> Self {
        Self {
            geometry,
            material,
            section,
        }
    }

    /// Create an element spanning two end points.
    ///
    /// # Errors
    ///
    /// Returns [`StiffnessError::InvalidGeometry`](crate::StiffnessError::InvalidGeometry)
    /// when the end points coincide.
    ///
    /// # Examples
    /// ```
    /// use beamx::{point, BeamElement, MaterialProperties, SectionCoefficients};
    ///
    /// let material = MaterialProperties::from_poisson(205.0e9, 0.3).expect("steel");
    /// let section = SectionCoefficients::new(4.0e-3, 2.0e-5, 1.5e-6, 5.0e-8).expect("valid section");
    /// let column = BeamElement::between(point(0.0, 0.0, 0.0), point(0.0, 4.0, 0.0), 0.0, material, section)
    ///     .expect("distinct end points");
    ///
    /// let blocks = column.global_stiffness().expect("valid element");
    /// assert!(blocks.m11[(1, 1)] > 0.0);
    /// ```
    pub fn between(
        start: Point,
        end: Point,
        theta: f64,
        material: MaterialProperties,
        section: SectionCoefficients,
    ) -> Result<Self> {
        let geometry = BeamGeometry::between(start, end, theta)?;
        Ok(Self::new(geometry, material, section))
    }

    /// Element length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.geometry.length()
    }

    /// Rotation from local to global axes under the default convention.
    ///
    /// # Errors
    ///
    /// See [`TransformMatrix::build`].
    pub fn transform(&self) -> Result<TransformMatrix> {
        Ok(TransformMatrix::build(
            self.geometry.direction(),
            self.geometry.theta(),
        )?)
    }

    /// Stiffness blocks in local axes.
    ///
    /// # Errors
    ///
    /// See [`stiffness::local_stiffness_raw`].
    pub fn local_stiffness(&self) -> Result<LocalStiffnessBlocks> {
        stiffness::local_stiffness(self.length(), &self.material, &self.section)
    }

    /// Stiffness blocks in global axes under the default convention.
    ///
    /// # Errors
    ///
    /// See [`stiffness::global_stiffness`].
    pub fn global_stiffness(&self) -> Result<GlobalStiffnessBlocks> {
        stiffness::global_stiffness(&self.geometry, &self.material, &self.section)
    }

    /// Stiffness blocks in global axes under an explicit convention.
    ///
    /// # Errors
    ///
    /// See [`stiffness::global_stiffness`].
    pub fn global_stiffness_with(
        &self,
        convention: &AxisConvention,
    ) -> Result<GlobalStiffnessBlocks> {
        stiffness::global_stiffness_with(&self.geometry, &self.material, &self.section, convention)
    }
}
