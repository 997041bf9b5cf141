//! Stiffness matrices of a two-node Timoshenko beam element.
//!
//! The 12x12 element matrix is handled as four 6x6 blocks partitioned by node:
//!
//! ```text
//! | M11 M12 |   node 1 forces from node 1 / node 2 displacements
//! | M21 M22 |   node 2 forces from node 1 / node 2 displacements
//! ```
//!
//! Each block uses the same per-node DOF ordering:
//!
//! | index | DOF | meaning |
//! |---|---|---|
//! | 0 | `ux` | axial translation |
//! | 1 | `uy` | transverse translation along local y |
//! | 2 | `uz` | transverse translation along local z |
//! | 3 | `θx` | torsion |
//! | 4 | `θy` | rotation about local y |
//! | 5 | `θz` | rotation about local z |
//!
//! Bending in the x-y plane (`uy`, `θz`) is governed by `Iz`; bending in the
//! x-z plane (`uz`, `θy`) by `Iy`. The translation-rotation coupling terms
//! carry opposite signs in the two planes because a positive `θy` moves a
//! point on the positive x side in the negative z direction.

use nalgebra::{Matrix6, SMatrix};
use tracing::{debug, trace};

use crate::errors::{GeometryError, Result};
use crate::geometry::BeamGeometry;
use crate::material::{check_moduli, MaterialProperties};
use crate::section::{check_coefficients, SectionCoefficients};
use crate::transform::{AxisConvention, TransformMatrix};

/// Flattened 12x12 element matrix.
pub type Matrix12 = SMatrix<f64, 12, 12>;

/// The four 6x6 node partitions of an element stiffness matrix.
///
/// `m21` is always the transpose of `m12`; `m11` and `m22` are symmetric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StiffnessBlocks {
    /// Node 1 forces due to node 1 displacements.
    pub m11: Matrix6<f64>,
    /// Node 1 forces due to node 2 displacements.
    pub m12: Matrix6<f64>,
    /// Node 2 forces due to node 1 displacements.
    pub m21: Matrix6<f64>,
    /// Node 2 forces due to node 2 displacements.
    pub m22: Matrix6<f64>,
}

/// Blocks expressed in the local beam axes.
pub type LocalStiffnessBlocks = StiffnessBlocks;

/// Blocks expressed in the global axes.
pub type GlobalStiffnessBlocks = StiffnessBlocks;

impl StiffnessBlocks {
    /// Build the blocks from the two diagonal blocks and `m12`, deriving `m21`.
    #[must_use]
    pub fn from_partitions(m11: Matrix6<f64>, m12: Matrix6<f64>, m22: Matrix6<f64>) -> Self {
        Self {
            m11,
            m12,
            m21: m12.transpose(),
            m22,
        }
    }

    /// Blocks in the order `[m11, m12, m21, m22]`.
    #[must_use]
    pub fn to_array(&self) -> [Matrix6<f64>; 4] {
        [self.m11, self.m12, self.m21, self.m22]
    }

    /// Assemble the flattened 12x12 matrix `[[m11, m12], [m21, m22]]`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix12 {
        let mut matrix = Matrix12::zeros();
        matrix.fixed_view_mut::<6, 6>(0, 0).copy_from(&self.m11);
        matrix.fixed_view_mut::<6, 6>(0, 6).copy_from(&self.m12);
        matrix.fixed_view_mut::<6, 6>(6, 0).copy_from(&self.m21);
        matrix.fixed_view_mut::<6, 6>(6, 6).copy_from(&self.m22);
        matrix
    }

    /// Split a flattened 12x12 matrix into its node partitions.
    #[must_use]
    pub fn from_matrix(matrix: &Matrix12) -> Self {
        Self {
            m11: matrix.fixed_view::<6, 6>(0, 0).into_owned(),
            m12: matrix.fixed_view::<6, 6>(0, 6).into_owned(),
            m21: matrix.fixed_view::<6, 6>(6, 0).into_owned(),
            m22: matrix.fixed_view::<6, 6>(6, 6).into_owned(),
        }
    }

    /// Apply the similarity transform `T M T^T` to every block.
    ///
    /// With `T = blockdiag(R, R)` and `R` mapping local vectors to global ones,
    /// this expresses local blocks in global axes.
    #[must_use]
    pub fn rotate(&self, transform: &Matrix6<f64>) -> Self {
        let transpose = transform.transpose();
        self.map(|block| transform * block * transpose)
    }

    /// Apply the inverse similarity transform `T^T M T` to every block.
    #[must_use]
    pub fn unrotate(&self, transform: &Matrix6<f64>) -> Self {
        let transpose = transform.transpose();
        self.map(|block| transpose * block * transform)
    }

    /// Apply `f` to `m11`, `m12` and `m22`, deriving `m21` from the new `m12`.
    fn map(&self, f: impl Fn(&Matrix6<f64>) -> Matrix6<f64>) -> Self {
        Self::from_partitions(f(&self.m11), f(&self.m12), f(&self.m22))
    }
}

/// Coefficients of one bending plane.
struct BendingTerms {
    /// Translation-translation stiffness.
    k11: f64,
    /// Translation-rotation coupling, signed for the plane.
    k12: f64,
    /// Rotation-rotation stiffness at the same node.
    k22: f64,
    /// Rotation-rotation stiffness across the element.
    k24: f64,
}

impl BendingTerms {
    /// `pre` is `E I / ((phi + 1) L^2)`; `sign` is +1 for the x-y plane and
    /// -1 for the x-z plane.
    fn new(pre: f64, phi: f64, length: f64, sign: f64) -> Self {
        Self {
            k11: 12.0 * pre / length,
            k12: sign * 6.0 * pre,
            k22: (4.0 + phi) * pre * length,
            k24: (2.0 - phi) * pre * length,
        }
    }
}

/// Timoshenko shear correction factor `12 E I / (G A_s L^2)`, zero without bending stiffness.
fn shear_factor(
    elastic_modulus: f64,
    inertia: f64,
    shear_modulus: f64,
    shear_area: f64,
    length: f64,
) -> f64 {
    if inertia == 0.0 {
        0.0
    } else {
        12.0 * elastic_modulus * inertia / (shear_modulus * shear_area * length * length)
    }
}

/// Compute the local stiffness blocks from scalar inputs.
///
/// Arguments follow the order `L, E, G, Ax, Iz, Iy, Ay, Az, J`. A zero shear
/// area `ay` or `az` means the full area `ax` resists shear.
///
/// # Errors
///
/// Returns [`StiffnessError::InvalidGeometry`](crate::StiffnessError::InvalidGeometry)
/// when `length <= 0`,
/// [`StiffnessError::InvalidMaterial`](crate::StiffnessError::InvalidMaterial)
/// when `E` or `G` is not positive, and
/// [`StiffnessError::InvalidSection`](crate::StiffnessError::InvalidSection)
/// when `ax <= 0` or any other coefficient is negative.
///
/// # Examples
/// ```
/// use beamx::local_stiffness_raw;
///
/// let blocks = local_stiffness_raw(2.0, 200.0e9, 80.0e9, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0)
///     .expect("valid inputs");
/// assert_eq!(blocks.m11[(0, 0)], 200.0e9 * 0.01 / 2.0);
/// assert_eq!(blocks.m12[(0, 0)], -200.0e9 * 0.01 / 2.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn local_stiffness_raw(
    length: f64,
    elastic_modulus: f64,
    shear_modulus: f64,
    ax: f64,
    iz: f64,
    iy: f64,
    ay: f64,
    az: f64,
    j: f64,
) -> Result<LocalStiffnessBlocks> {
    if !(length > 0.0 && length.is_finite()) {
        return Err(GeometryError::NonPositiveLength { length }.into());
    }
    check_moduli(elastic_modulus, shear_modulus)?;
    check_coefficients(ax, iz, iy, ay, az, j)?;

    let ay = if ay == 0.0 { ax } else { ay };
    let az = if az == 0.0 { ax } else { az };
    let (e, g, l) = (elastic_modulus, shear_modulus, length);

    let phi_y = shear_factor(e, iz, g, ay, l);
    let phi_z = shear_factor(e, iy, g, az, l);
    trace!(phi_y, phi_z, "shear correction factors");

    let a = e * ax / l;
    let s = g * j / l;
    let kz = BendingTerms::new(e * iz / ((phi_y + 1.0) * l * l), phi_y, l, 1.0);
    let ky = BendingTerms::new(e * iy / ((phi_z + 1.0) * l * l), phi_z, l, -1.0);

    #[rustfmt::skip]
    let m11 = Matrix6::new(
        a,   0.0,     0.0,     0.0, 0.0,     0.0,
        0.0, kz.k11,  0.0,     0.0, 0.0,     kz.k12,
        0.0, 0.0,     ky.k11,  0.0, ky.k12,  0.0,
        0.0, 0.0,     0.0,     s,   0.0,     0.0,
        0.0, 0.0,     ky.k12,  0.0, ky.k22,  0.0,
        0.0, kz.k12,  0.0,     0.0, 0.0,     kz.k22,
    );
    #[rustfmt::skip]
    let m12 = Matrix6::new(
        -a,  0.0,     0.0,     0.0, 0.0,     0.0,
        0.0, -kz.k11, 0.0,     0.0, 0.0,     kz.k12,
        0.0, 0.0,     -ky.k11, 0.0, ky.k12,  0.0,
        0.0, 0.0,     0.0,     -s,  0.0,     0.0,
        0.0, 0.0,     -ky.k12, 0.0, ky.k24,  0.0,
        0.0, -kz.k12, 0.0,     0.0, 0.0,     kz.k24,
    );
    #[rustfmt::skip]
    let m22 = Matrix6::new(
        a,   0.0,     0.0,     0.0, 0.0,     0.0,
        0.0, kz.k11,  0.0,     0.0, 0.0,     -kz.k12,
        0.0, 0.0,     ky.k11,  0.0, -ky.k12, 0.0,
        0.0, 0.0,     0.0,     s,   0.0,     0.0,
        0.0, 0.0,     -ky.k12, 0.0, ky.k22,  0.0,
        0.0, -kz.k12, 0.0,     0.0, 0.0,     kz.k22,
    );

    Ok(StiffnessBlocks::from_partitions(m11, m12, m22))
}

/// Compute the local stiffness blocks of a beam of the given length.
///
/// # Errors
///
/// See [`local_stiffness_raw`].
pub fn local_stiffness(
    length: f64,
    material: &MaterialProperties,
    section: &SectionCoefficients,
) -> Result<LocalStiffnessBlocks> {
    local_stiffness_raw(
        length,
        material.elastic_modulus(),
        material.shear_modulus(),
        section.ax,
        section.iz,
        section.iy,
        section.shear_area_y(),
        section.shear_area_z(),
        section.j,
    )
}

/// Compute the stiffness blocks of a beam in global axes.
///
/// The element length is the norm of the geometry's direction vector and the
/// local axes follow the default [`AxisConvention`].
///
/// # Errors
///
/// Propagates the errors of [`TransformMatrix::build`] and [`local_stiffness_raw`].
///
/// # Examples
/// ```
/// use beamx::{global_stiffness, local_stiffness, BeamGeometry, MaterialProperties, SectionCoefficients};
/// use nalgebra::Vector3;
///
/// let geometry = BeamGeometry::new(Vector3::new(3.0, 0.0, 0.0), 0.0).expect("valid axis");
/// let material = MaterialProperties::new(2.0e11, 8.0e10).expect("valid moduli");
/// let section = SectionCoefficients::new(0.01, 3.0e-6, 8.0e-6, 1.0e-5).expect("valid section");
///
/// let global = global_stiffness(&geometry, &material, &section).expect("valid element");
/// let local = local_stiffness(3.0, &material, &section).expect("valid element");
/// assert_eq!(global, local);
/// ```
pub fn global_stiffness(
    geometry: &BeamGeometry,
    material: &MaterialProperties,
    section: &SectionCoefficients,
) -> Result<GlobalStiffnessBlocks> {
    global_stiffness_with(geometry, material, section, &AxisConvention::default())
}

/// Compute the stiffness blocks of a beam in global axes with an explicit axis convention.
///
/// # Errors
///
/// See [`global_stiffness`].
pub fn global_stiffness_with(
    geometry: &BeamGeometry,
    material: &MaterialProperties,
    section: &SectionCoefficients,
    convention: &AxisConvention,
) -> Result<GlobalStiffnessBlocks> {
    let transform =
        TransformMatrix::build_with(geometry.direction(), geometry.theta(), convention)?;
    let length = geometry.length();
    debug!(length, theta = geometry.theta(), "building global beam stiffness");
    let local = local_stiffness(length, material, section)?;
    Ok(local.rotate(&transform.block_diagonal()))
}
