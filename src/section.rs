//! Cross-section coefficients consumed by the stiffness generator.
//!
//! The record keeps the key names used by the frame calculator's data files
//! (`Ax`, `Ay`, `Az`, `Iy`, `Iz`, `J`) when (de)serialised.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SectionError;

/// Keys that every coefficient record must provide.
const REQUIRED_FIELDS: [&str; 3] = ["Ax", "Iy", "Iz"];

/// Geometric coefficients of a beam cross-section.
///
/// Shear areas are optional: `None` (or an explicit zero) means the shear
/// stiffness is computed with the full cross-sectional area `ax`. Use
/// [`SectionCoefficients::shear_area_y`] and
/// [`SectionCoefficients::shear_area_z`] to read the resolved values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionCoefficients {
    /// Cross-sectional area.
    #[serde(rename = "Ax")]
    pub ax: f64,
    /// Second moment of area about the local y axis.
    #[serde(rename = "Iy")]
    pub iy: f64,
    /// Second moment of area about the local z axis.
    #[serde(rename = "Iz")]
    pub iz: f64,
    /// Effective shear area for forces along local y.
    #[serde(rename = "Ay", default, skip_serializing_if = "Option::is_none")]
    pub ay: Option<f64>,
    /// Effective shear area for forces along local z.
    #[serde(rename = "Az", default, skip_serializing_if = "Option::is_none")]
    pub az: Option<f64>,
    /// Polar moment of area (torsion constant).
    #[serde(rename = "J", default)]
    pub j: f64,
}

impl SectionCoefficients {
    /// Create coefficients whose shear areas default to the full area.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError`] when `ax` is not positive or any other
    /// coefficient is negative.
    ///
    /// # Examples
    /// ```
    /// use beamx::SectionCoefficients;
    ///
    /// let section = SectionCoefficients::new(0.01, 3.0e-6, 8.0e-6, 1.0e-5).expect("valid");
    /// assert_eq!(section.shear_area_y(), 0.01);
    /// ```
    pub fn new(ax: f64, iy: f64, iz: f64, j: f64) -> Result<Self, SectionError> {
        let section = Self {
            ax,
            iy,
            iz,
            ay: None,
            az: None,
            j,
        };
        section.validate()?;
        Ok(section)
    }

    /// Replace the shear areas. A zero value keeps the "use `ax`" default.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NegativeCoefficient`] for a negative area.
    pub fn with_shear_areas(self, ay: f64, az: f64) -> Result<Self, SectionError> {
        let section = Self {
            ay: Some(ay),
            az: Some(az),
            ..self
        };
        section.validate()?;
        Ok(section)
    }

    /// Parse a coefficient record from JSON.
    ///
    /// Extra keys are ignored so records produced by richer section tables can
    /// be passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::MissingField`] when `Ax`, `Iy` or `Iz` is absent,
    /// [`SectionError::Malformed`] for invalid JSON and the validation errors of
    /// [`SectionCoefficients::validate`].
    ///
    /// # Examples
    /// ```
    /// use beamx::{SectionCoefficients, SectionError};
    ///
    /// let section = SectionCoefficients::from_json(r#"{"Ax": 0.01, "Iy": 1e-6, "Iz": 2e-6, "Zy": 4e-5}"#)
    ///     .expect("extra keys ignored");
    /// assert_eq!(section.j, 0.0);
    ///
    /// let error = SectionCoefficients::from_json(r#"{"Ax": 0.01, "Iz": 2e-6}"#).expect_err("Iy required");
    /// assert_eq!(error, SectionError::MissingField { field: "Iy".into() });
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SectionError> {
        let value: Value = serde_json::from_str(text).map_err(malformed)?;
        Self::from_value(value)
    }

    /// Build a coefficient record from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// See [`SectionCoefficients::from_json`].
    pub fn from_value(value: Value) -> Result<Self, SectionError> {
        let record = value.as_object().ok_or_else(|| SectionError::Malformed {
            reason: "expected a JSON object".to_string(),
        })?;
        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .find(|field| !record.contains_key(**field))
        {
            return Err(SectionError::MissingField {
                field: (*field).to_string(),
            });
        }
        let section: Self = serde_json::from_value(value).map_err(malformed)?;
        section.validate()?;
        Ok(section)
    }

    /// Shear area along local y, falling back to `ax`.
    #[must_use]
    pub fn shear_area_y(&self) -> f64 {
        resolve_shear_area(self.ay, self.ax)
    }

    /// Shear area along local z, falling back to `ax`.
    #[must_use]
    pub fn shear_area_z(&self) -> f64 {
        resolve_shear_area(self.az, self.ax)
    }

    /// Check the numeric preconditions of every coefficient.
    ///
    /// The geometric consistency of the values is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NonPositiveArea`] when `ax <= 0` and
    /// [`SectionError::NegativeCoefficient`] for the first negative or
    /// non-finite coefficient.
    pub fn validate(&self) -> Result<(), SectionError> {
        check_coefficients(
            self.ax,
            self.iz,
            self.iy,
            self.ay.unwrap_or(0.0),
            self.az.unwrap_or(0.0),
            self.j,
        )
    }
}

/// Zero or absent means the whole section resists shear.
fn resolve_shear_area(shear_area: Option<f64>, ax: f64) -> f64 {
    match shear_area {
        Some(area) if area != 0.0 => area,
        _ => ax,
    }
}

/// Validate coefficients in the argument order of the stiffness routine.
pub(crate) fn check_coefficients(
    ax: f64,
    iz: f64,
    iy: f64,
    ay: f64,
    az: f64,
    j: f64,
) -> Result<(), SectionError> {
    if !(ax > 0.0 && ax.is_finite()) {
        return Err(SectionError::NonPositiveArea { value: ax });
    }
    for (field, value) in [("Iz", iz), ("Iy", iy), ("Ay", ay), ("Az", az), ("J", j)] {
        if !(value >= 0.0 && value.is_finite()) {
            return Err(SectionError::NegativeCoefficient { field, value });
        }
    }
    Ok(())
}

/// Wrap a JSON error as [`SectionError::Malformed`].
fn malformed(error: serde_json::Error) -> SectionError {
    SectionError::Malformed {
        reason: error.to_string(),
    }
}
