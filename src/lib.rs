#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

/// Beam element bundling geometry, material and section.
pub mod element;
/// Error types used throughout the crate.
pub mod errors;
/// Points and beam orientation.
pub mod geometry;
/// Elastic moduli.
pub mod material;
/// Cross-section coefficients.
pub mod section;
/// Standard cross-section shapes and their properties.
pub mod shapes;
/// Local and global stiffness blocks.
pub mod stiffness;
/// Local to global axis transforms.
pub mod transform;

pub use element::BeamElement;
pub use errors::{GeometryError, MaterialError, Result, SectionError, StiffnessError};
pub use geometry::{point, BeamGeometry, Point};
pub use material::MaterialProperties;
pub use section::SectionCoefficients;
pub use shapes::{SectionProperties, SectionShape};
pub use stiffness::{
    global_stiffness, global_stiffness_with, local_stiffness, local_stiffness_raw,
    GlobalStiffnessBlocks, LocalStiffnessBlocks, Matrix12, StiffnessBlocks,
};
pub use transform::{AxisConvention, TransformMatrix, PARALLEL_TOLERANCE};
