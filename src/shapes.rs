//! Section property tables for common structural shapes.
//!
//! Axes follow the frame calculator convention:
//! - local x is the beam axis,
//! - local y is the weak axis, parallel to the flanges,
//! - local z is the strong axis, parallel to the web.
//!
//! Fillets at the web-to-flange junctions of H, I and T sections are modelled
//! as the quarter-circle spandrel between the two plates.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SectionError;
use crate::section::SectionCoefficients;

/// Tags accepted in externally supplied shape data.
const SHAPE_TAGS: [&str; 6] = ["H", "I", "T", "O", "C", "R"];

/// A cross-section shape and its dimensions.
///
/// All dimensions share one length unit; the resulting areas and inertias are
/// in that unit squared and to the fourth power.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum SectionShape {
    /// Wide-flange H section.
    #[serde(rename = "H")]
    H {
        /// Overall height between the outer faces of the flanges.
        h: f64,
        /// Width of the flanges.
        b: f64,
        /// Web thickness.
        tw: f64,
        /// Flange thickness, equal for both flanges.
        tf: f64,
        /// Fillet radius, equal for all four fillets.
        #[serde(default)]
        r: f64,
    },
    /// I section. Uses the H section formulas.
    #[serde(rename = "I")]
    I {
        /// Overall height between the outer faces of the flanges.
        h: f64,
        /// Width of the flanges.
        b: f64,
        /// Web thickness.
        tw: f64,
        /// Flange thickness.
        tf: f64,
        /// Fillet radius.
        #[serde(default)]
        r: f64,
    },
    /// Tee section, an H section cut through the web.
    #[serde(rename = "T")]
    T {
        /// Height from the outer face of the flange to the tip of the web.
        h: f64,
        /// Width of the flange.
        b: f64,
        /// Web thickness.
        tw: f64,
        /// Flange thickness.
        tf: f64,
        /// Fillet radius, equal for both fillets.
        #[serde(default)]
        r: f64,
    },
    /// Solid circle or circular pipe.
    #[serde(rename = "O")]
    O {
        /// Outer diameter.
        d: f64,
        /// Wall thickness, zero for a solid bar.
        #[serde(default)]
        t: f64,
    },
    /// Channel section with the web on the local z axis.
    #[serde(rename = "C")]
    C {
        /// Overall height between the outer faces of the flanges.
        h: f64,
        /// Width of the flanges including the web.
        b: f64,
        /// Web thickness.
        tw: f64,
        /// Flange thickness.
        tf: f64,
    },
    /// Solid rectangle or rectangular hollow section.
    #[serde(rename = "R")]
    R {
        /// Height along local z.
        h: f64,
        /// Width along local y.
        b: f64,
        /// Wall thickness, zero for a solid bar.
        #[serde(default)]
        t: f64,
    },
}

/// Coefficients of a section together with derived design values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Coefficients used by the stiffness generator.
    #[serde(flatten)]
    pub coefficients: SectionCoefficients,
    /// Elastic section modulus about local y.
    #[serde(rename = "Zy")]
    pub zy: f64,
    /// Elastic section modulus about local z.
    #[serde(rename = "Zz")]
    pub zz: f64,
    /// Radius of gyration about local y.
    #[serde(rename = "iy")]
    pub iy_radius: f64,
    /// Radius of gyration about local z.
    #[serde(rename = "iz")]
    pub iz_radius: f64,
    /// Distance from the outer face of the flange to the centroid (T only).
    #[serde(rename = "Cz", default, skip_serializing_if = "Option::is_none")]
    pub cz: Option<f64>,
}

/// Area, centroid offset and own inertia of one fillet spandrel.
struct Fillet {
    /// Distance from the plate faces to the spandrel centroid.
    offset: f64,
    /// Spandrel area.
    area: f64,
    /// Inertia about the spandrel's own centroid.
    inertia: f64,
}

impl Fillet {
    /// Spandrel of a fillet with radius `r`.
    fn new(r: f64) -> Self {
        Self {
            offset: (1.0 - 2.0 / (4.0 - PI) / 3.0) * r,
            area: (1.0 - PI * 0.25) * r * r,
            inertia: (1.0 / 3.0 - PI / 16.0 - 1.0 / (4.0 - PI) / 9.0) * r.powi(4),
        }
    }

    /// Inertia about an axis `distance` away from the spandrel centroid.
    fn inertia_at(&self, distance: f64) -> f64 {
        self.inertia + self.area * distance * distance
    }
}

impl SectionShape {
    /// Parse shape data such as `{"shape": "H", "h": 0.3, "b": 0.15, "tw": 0.0065, "tf": 0.009}`.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::UnknownShape`] for an unsupported tag,
    /// [`SectionError::MissingField`] when the tag is absent and
    /// [`SectionError::Malformed`] when the dimensions do not match the shape.
    ///
    /// # Examples
    /// ```
    /// use beamx::{SectionError, SectionShape};
    ///
    /// let pipe = SectionShape::from_json(r#"{"shape": "O", "d": 0.1, "t": 0.005}"#).expect("known shape");
    /// assert_eq!(pipe.tag(), "O");
    ///
    /// let error = SectionShape::from_json(r#"{"shape": "Z", "h": 0.1}"#).expect_err("unknown shape");
    /// assert_eq!(error, SectionError::UnknownShape("Z".into()));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SectionError> {
        let value: Value = serde_json::from_str(text).map_err(|error| SectionError::Malformed {
            reason: error.to_string(),
        })?;
        let tag = match value.get("shape") {
            None => {
                return Err(SectionError::MissingField {
                    field: "shape".to_string(),
                })
            }
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => return Err(SectionError::UnknownShape(other.to_string())),
        };
        if !SHAPE_TAGS.contains(&tag.as_str()) {
            return Err(SectionError::UnknownShape(tag));
        }
        serde_json::from_value(value).map_err(|error| SectionError::Malformed {
            reason: error.to_string(),
        })
    }

    /// Single-letter tag of the shape.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::H { .. } => "H",
            Self::I { .. } => "I",
            Self::T { .. } => "T",
            Self::O { .. } => "O",
            Self::C { .. } => "C",
            Self::R { .. } => "R",
        }
    }

    /// Compute the section coefficients for this shape.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::InvalidDimension`] when a dimension is not
    /// positive or the plates do not fit inside the outline.
    ///
    /// # Examples
    /// ```
    /// use beamx::SectionShape;
    ///
    /// let bar = SectionShape::R { h: 0.2, b: 0.1, t: 0.0 };
    /// let properties = bar.properties().expect("valid rectangle");
    /// assert!((properties.coefficients.ax - 0.02).abs() < 1e-12);
    /// ```
    pub fn properties(&self) -> Result<SectionProperties, SectionError> {
        let tag = self.tag();
        match *self {
            Self::H { h, b, tw, tf, r } | Self::I { h, b, tw, tf, r } => {
                check_flanged(tag, h, b, tw, tf, r)?;
                Ok(h_section(h, b, tw, tf, r))
            }
            Self::T { h, b, tw, tf, r } => {
                check_positive(tag, &[("h", h), ("b", b), ("tw", tw), ("tf", tf)])?;
                check_non_negative(tag, "r", r)?;
                check_fits(tag, "tf", tf, h)?;
                check_fits(tag, "tw", tw, b + f64::EPSILON)?;
                Ok(t_section(h, b, tw, tf, r))
            }
            Self::O { d, t } => {
                check_positive(tag, &[("d", d)])?;
                check_non_negative(tag, "t", t)?;
                check_fits(tag, "t", 2.0 * t, d + f64::EPSILON)?;
                Ok(circular_section(d, t))
            }
            Self::C { h, b, tw, tf } => {
                check_flanged(tag, h, b, tw, tf, 0.0)?;
                Ok(channel_section(h, b, tw, tf))
            }
            Self::R { h, b, t } => {
                check_positive(tag, &[("h", h), ("b", b)])?;
                check_non_negative(tag, "t", t)?;
                check_fits(tag, "t", 2.0 * t, h.min(b))?;
                Ok(rectangular_section(h, b, t))
            }
        }
    }

    /// Compute only the coefficients consumed by the stiffness generator.
    ///
    /// # Errors
    ///
    /// See [`SectionShape::properties`].
    pub fn coefficients(&self) -> Result<SectionCoefficients, SectionError> {
        self.properties().map(|properties| properties.coefficients)
    }
}

/// H and I sections: two flanges, one web and four fillets.
fn h_section(h: f64, b: f64, tw: f64, tf: f64, r: f64) -> SectionProperties {
    let fillet = Fillet::new(r);
    let web_height = h - 2.0 * tf;
    let area = 2.0 * b * tf + web_height * tw + 4.0 * fillet.area;

    let iz = 2.0 * tf * b.powi(3) / 12.0
        + web_height * tw.powi(3) / 12.0
        + 4.0 * fillet.inertia_at(0.5 * tw + fillet.offset);
    let iy = 2.0 * (b * tf.powi(3) / 12.0 + b * tf * (h - tf).powi(2) * 0.25)
        + tw * web_height.powi(3) / 12.0
        + 4.0 * fillet.inertia_at(0.5 * h - tf - fillet.offset);

    finish(
        SectionCoefficients {
            ax: area,
            iy,
            iz,
            ay: Some(2.0 * tf * b),
            az: Some(tw * h),
            j: (2.0 * b * tf.powi(3) + web_height * tw.powi(3)) / 3.0,
        },
        2.0 * iy / h,
        2.0 * iz / b,
        None,
    )
}

/// Tee section with the centroid measured from the flange face.
fn t_section(h: f64, b: f64, tw: f64, tf: f64, r: f64) -> SectionProperties {
    let fillet = Fillet::new(r);
    let stem = h - tf;
    let area = b * tf + stem * tw + 2.0 * fillet.area;
    let first_moment =
        ((b - tw) * tf * tf + h * h * tw) * 0.5 + 2.0 * fillet.area * (tf + fillet.offset);
    let cz = first_moment / area;

    let iz = tf * b.powi(3) / 12.0
        + stem * tw.powi(3) / 12.0
        + 2.0 * fillet.inertia_at(0.5 * tw + fillet.offset);
    let iy = b * tf.powi(3) / 12.0
        + b * tf * (cz - 0.5 * tf).powi(2)
        + tw * stem.powi(3) / 12.0
        + tw * stem * (0.5 * (h + tf) - cz).powi(2)
        + 2.0 * fillet.inertia_at(cz - tf - fillet.offset);

    finish(
        SectionCoefficients {
            ax: area,
            iy,
            iz,
            ay: Some(tf * b),
            az: Some(tw * h),
            j: (b * tf.powi(3) + stem * tw.powi(3)) / 3.0,
        },
        iy / cz.max(h - cz),
        2.0 * iz / b,
        Some(cz),
    )
}

/// Solid bar when `t` is zero, pipe otherwise.
fn circular_section(d: f64, t: f64) -> SectionProperties {
    let mut area = 0.25 * PI * d * d;
    let mut inertia = PI * d.powi(4) / 64.0;
    if t > 0.0 {
        let inner = d - 2.0 * t;
        area -= 0.25 * PI * inner * inner;
        inertia -= PI * inner.powi(4) / 64.0;
    }
    let modulus = 2.0 * inertia / d;

    finish(
        SectionCoefficients {
            ax: area,
            iy: inertia,
            iz: inertia,
            ay: None,
            az: None,
            j: 2.0 * inertia,
        },
        modulus,
        modulus,
        None,
    )
}

/// Channel with the web on the local z axis and both flanges on one side.
fn channel_section(h: f64, b: f64, tw: f64, tf: f64) -> SectionProperties {
    let web_height = h - 2.0 * tf;
    let area = 2.0 * b * tf + web_height * tw;
    // Centroid measured from the back of the web.
    let cy = (tf * b * b + 0.5 * web_height * tw * tw) / area;

    let iy = (b * h.powi(3) - (b - tw) * web_height.powi(3)) / 12.0;
    let iz = 2.0 * (tf * b.powi(3) / 12.0 + tf * b * (0.5 * b - cy).powi(2))
        + web_height * tw.powi(3) / 12.0
        + web_height * tw * (cy - 0.5 * tw).powi(2);

    finish(
        SectionCoefficients {
            ax: area,
            iy,
            iz,
            ay: Some(2.0 * tf * b),
            az: Some(tw * h),
            j: (2.0 * b * tf.powi(3) + web_height * tw.powi(3)) / 3.0,
        },
        2.0 * iy / h,
        iz / cy.max(b - cy),
        None,
    )
}

/// Solid bar when `t` is zero, hollow section otherwise.
fn rectangular_section(h: f64, b: f64, t: f64) -> SectionProperties {
    let coefficients = if t > 0.0 {
        let (hi, bi) = (h - 2.0 * t, b - 2.0 * t);
        SectionCoefficients {
            ax: b * h - bi * hi,
            iy: (b * h.powi(3) - bi * hi.powi(3)) / 12.0,
            iz: (h * b.powi(3) - hi * bi.powi(3)) / 12.0,
            ay: Some(2.0 * t * b),
            az: Some(2.0 * t * h),
            // Bredt's formula along the wall centre line.
            j: 2.0 * t * (b - t).powi(2) * (h - t).powi(2) / (b + h - 2.0 * t),
        }
    } else {
        let area = b * h;
        let (long, short) = (h.max(b), h.min(b));
        SectionCoefficients {
            ax: area,
            iy: b * h.powi(3) / 12.0,
            iz: h * b.powi(3) / 12.0,
            ay: Some(5.0 / 6.0 * area),
            az: Some(5.0 / 6.0 * area),
            j: long
                * short.powi(3)
                * (1.0 / 3.0
                    - 0.21 * (short / long) * (1.0 - short.powi(4) / (12.0 * long.powi(4)))),
        }
    };
    finish(
        coefficients,
        2.0 * coefficients.iy / h,
        2.0 * coefficients.iz / b,
        None,
    )
}

/// Attach section moduli and radii of gyration to the coefficients.
fn finish(
    coefficients: SectionCoefficients,
    zy: f64,
    zz: f64,
    cz: Option<f64>,
) -> SectionProperties {
    SectionProperties {
        coefficients,
        zy,
        zz,
        iy_radius: (coefficients.iy / coefficients.ax).sqrt(),
        iz_radius: (coefficients.iz / coefficients.ax).sqrt(),
        cz,
    }
}

/// Dimension checks shared by the flanged shapes.
fn check_flanged(
    shape: &'static str,
    h: f64,
    b: f64,
    tw: f64,
    tf: f64,
    r: f64,
) -> Result<(), SectionError> {
    check_positive(shape, &[("h", h), ("b", b), ("tw", tw), ("tf", tf)])?;
    check_non_negative(shape, "r", r)?;
    check_fits(shape, "tf", 2.0 * tf, h)?;
    check_fits(shape, "tw", tw, b + f64::EPSILON)
}

/// Every dimension must be positive and finite.
fn check_positive(
    shape: &'static str,
    dimensions: &[(&'static str, f64)],
) -> Result<(), SectionError> {
    for &(dimension, value) in dimensions {
        if !(value > 0.0 && value.is_finite()) {
            return Err(SectionError::InvalidDimension {
                shape,
                dimension,
                value,
            });
        }
    }
    Ok(())
}

/// The dimension may be zero but not negative.
fn check_non_negative(
    shape: &'static str,
    dimension: &'static str,
    value: f64,
) -> Result<(), SectionError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SectionError::InvalidDimension {
            shape,
            dimension,
            value,
        })
    }
}

/// `extent` must be strictly smaller than `limit`.
fn check_fits(
    shape: &'static str,
    dimension: &'static str,
    extent: f64,
    limit: f64,
) -> Result<(), SectionError> {
    if extent < limit {
        Ok(())
    } else {
        Err(SectionError::InvalidDimension {
            shape,
            dimension,
            value: extent,
        })
    }
}
