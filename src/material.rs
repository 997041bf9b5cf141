//! Linear elastic material constants.

use serde::{Deserialize, Serialize};

use crate::errors::MaterialError;

/// Isotropic elastic moduli of a beam element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Young's modulus in pascals.
    elastic_modulus: f64,
    /// Shear modulus in pascals.
    shear_modulus: f64,
}

impl MaterialProperties {
    /// Create a material from Young's modulus `E` and shear modulus `G`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError`] when either modulus is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use beamx::MaterialProperties;
    ///
    /// let steel = MaterialProperties::new(2.0e11, 8.0e10).expect("positive moduli");
    /// assert_eq!(steel.elastic_modulus(), 2.0e11);
    /// assert!(MaterialProperties::new(2.0e11, 0.0).is_err());
    /// ```
    pub fn new(elastic_modulus: f64, shear_modulus: f64) -> Result<Self, MaterialError> {
        let material = Self {
            elastic_modulus,
            shear_modulus,
        };
        material.validate()?;
        Ok(material)
    }

    /// Create a material from Young's modulus and Poisson's ratio.
    ///
    /// The shear modulus follows the isotropic relation `G = E / (2 (1 + nu))`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::PoissonRatioOutOfRange`] unless `-1 < nu <= 0.5`,
    /// and [`MaterialError::NonPositiveElasticModulus`] for a non-positive `E`.
    pub fn from_poisson(elastic_modulus: f64, poisson_ratio: f64) -> Result<Self, MaterialError> {
        if !(poisson_ratio > -1.0 && poisson_ratio <= 0.5) {
            return Err(MaterialError::PoissonRatioOutOfRange {
                value: poisson_ratio,
            });
        }
        Self::new(
            elastic_modulus,
            elastic_modulus / (2.0 * (1.0 + poisson_ratio)),
        )
    }

    /// Young's modulus in pascals.
    #[must_use]
    pub fn elastic_modulus(&self) -> f64 {
        self.elastic_modulus
    }

    /// Shear modulus in pascals.
    #[must_use]
    pub fn shear_modulus(&self) -> f64 {
        self.shear_modulus
    }

    /// Check both moduli, e.g. after deserialising.
    ///
    /// # Errors
    ///
    /// Returns the first modulus that is zero, negative or not finite.
    pub fn validate(&self) -> Result<(), MaterialError> {
        check_moduli(self.elastic_modulus, self.shear_modulus)
    }
}

/// Reject moduli that are not strictly positive and finite.
pub(crate) fn check_moduli(elastic_modulus: f64, shear_modulus: f64) -> Result<(), MaterialError> {
    if !(elastic_modulus > 0.0 && elastic_modulus.is_finite()) {
        return Err(MaterialError::NonPositiveElasticModulus {
            value: elastic_modulus,
        });
    }
    if !(shear_modulus > 0.0 && shear_modulus.is_finite()) {
        return Err(MaterialError::NonPositiveShearModulus {
            value: shear_modulus,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn shear_modulus_from_poisson_ratio() {
        let steel = MaterialProperties::from_poisson(200.0e9, 0.25).expect("valid ratio");
        assert_relative_eq!(steel.shear_modulus(), 80.0e9, max_relative = 1.0e-12);
    }

    #[test]
    fn non_positive_moduli_are_rejected() {
        assert_eq!(
            MaterialProperties::new(0.0, 8.0e10).expect_err("zero E rejected"),
            MaterialError::NonPositiveElasticModulus { value: 0.0 }
        );
        assert_eq!(
            MaterialProperties::new(2.0e11, -1.0).expect_err("negative G rejected"),
            MaterialError::NonPositiveShearModulus { value: -1.0 }
        );
        assert!(MaterialProperties::new(f64::NAN, 8.0e10).is_err());
    }

    #[test]
    fn poisson_ratio_outside_range_is_rejected() {
        for nu in [-1.0, 0.51, f64::NAN] {
            let error = MaterialProperties::from_poisson(200.0e9, nu).expect_err("ratio rejected");
            assert!(matches!(error, MaterialError::PoissonRatioOutOfRange { .. }));
        }
    }
}
