#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use beamx::{
    global_stiffness, global_stiffness_with, local_stiffness, local_stiffness_raw, point,
    AxisConvention, BeamElement, BeamGeometry, GeometryError, MaterialProperties,
    SectionCoefficients, SectionError, SectionShape, StiffnessBlocks, StiffnessError,
    TransformMatrix,
};
use nalgebra::{SVector, Vector3, Vector6};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
struct FrameProperties {
    elastic_modulus: f64,
    shear_modulus: f64,
    area: f64,
    inertia_y: f64,
    inertia_z: f64,
    shear_area: f64,
    torsion: f64,
}

impl Default for FrameProperties {
    fn default() -> Self {
        Self {
            elastic_modulus: 2.0e11,
            shear_modulus: 8.0e10,
            area: 0.01,
            inertia_y: 3.0e-6,
            inertia_z: 8.0e-6,
            shear_area: 0.006,
            torsion: 1.0e-5,
        }
    }
}

impl FrameProperties {
    fn material(&self) -> MaterialProperties {
        MaterialProperties::new(self.elastic_modulus, self.shear_modulus).expect("valid moduli")
    }

    fn section(&self) -> SectionCoefficients {
        SectionCoefficients::new(self.area, self.inertia_y, self.inertia_z, self.torsion)
            .and_then(|section| section.with_shear_areas(self.shear_area, self.shear_area))
            .expect("valid section")
    }
}

fn assert_blocks_close(expected: &StiffnessBlocks, actual: &StiffnessBlocks) {
    for (expected, actual) in expected.to_array().iter().zip(actual.to_array().iter()) {
        assert_relative_eq!(*expected, *actual, epsilon = 1.0e-3, max_relative = 1.0e-9);
    }
}

#[test]
fn beam_along_global_x_has_identical_local_and_global_blocks() {
    let properties = FrameProperties::default();
    let geometry = BeamGeometry::new(Vector3::new(3.0, 0.0, 0.0), 0.0).expect("valid axis");

    let global = global_stiffness(&geometry, &properties.material(), &properties.section())
        .expect("valid element");
    let local = local_stiffness(3.0, &properties.material(), &properties.section())
        .expect("valid element");

    assert_eq!(global, local);
    assert_relative_eq!(global.m11[(0, 0)], 6.666_666_667e8, max_relative = 1.0e-9);
    assert_relative_eq!(global.m12[(0, 0)], -6.666_666_667e8, max_relative = 1.0e-9);
}

#[test]
fn random_orientations_round_trip_to_the_local_blocks() {
    let properties = FrameProperties::default();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..8 {
        let mut direction = Vector3::zeros();
        while direction.norm() < 0.5 {
            direction = Vector3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
        }
        let theta = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);

        let geometry = BeamGeometry::new(direction, theta).expect("non-zero direction");
        let transform = TransformMatrix::build(direction, theta).expect("non-zero direction");
        assert!(transform.is_orthonormal(1.0e-12));

        let global = global_stiffness(&geometry, &properties.material(), &properties.section())
            .expect("valid element");
        let local = local_stiffness(direction.norm(), &properties.material(), &properties.section())
            .expect("valid element");

        assert_blocks_close(&local, &global.unrotate(&transform.block_diagonal()));

        let matrix = global.to_matrix();
        assert_relative_eq!(matrix, matrix.transpose(), epsilon = 1.0e-3, max_relative = 1.0e-9);
        assert_relative_eq!(
            matrix.trace(),
            local.to_matrix().trace(),
            max_relative = 1.0e-9
        );
    }
}

#[test]
fn rigid_translation_produces_no_forces_in_any_orientation() {
    let properties = FrameProperties::default();
    let element = BeamElement::between(
        point(0.5, -1.0, 2.0),
        point(3.0, 1.5, -0.5),
        0.6,
        properties.material(),
        properties.section(),
    )
    .expect("valid element");
    let matrix = element.global_stiffness().expect("valid element").to_matrix();

    let shift = Vector3::new(1.0e-3, -2.0e-3, 0.5e-3);
    let mut node = Vector6::<f64>::zeros();
    node.fixed_rows_mut::<3>(0).copy_from(&shift);
    let mut displacement = SVector::<f64, 12>::zeros();
    displacement.fixed_rows_mut::<6>(0).copy_from(&node);
    displacement.fixed_rows_mut::<6>(6).copy_from(&node);

    let forces = matrix * displacement;
    assert!(forces.amax() < 1.0e-2, "residual forces {forces}");
}

#[test]
fn vertical_beams_are_finite_and_carry_axial_stiffness_along_global_y() {
    let properties = FrameProperties::default();
    for sign in [1.0, -1.0] {
        let geometry =
            BeamGeometry::new(Vector3::new(0.0, 2.0 * sign, 0.0), 0.0).expect("valid axis");
        let global = global_stiffness(&geometry, &properties.material(), &properties.section())
            .expect("valid element");

        assert!(global.to_matrix().iter().all(|value| value.is_finite()));
        assert_relative_eq!(
            global.m11[(1, 1)],
            properties.elastic_modulus * properties.area / 2.0,
            max_relative = 1.0e-12
        );
    }
}

#[test]
fn shape_data_feeds_the_global_stiffness() {
    let properties = FrameProperties::default();
    let shape = SectionShape::from_json(
        r#"{"shape": "H", "h": 0.3, "b": 0.15, "tw": 0.0071, "tf": 0.0107, "r": 0.015}"#,
    )
    .expect("known shape");
    let section = shape.coefficients().expect("valid dimensions");
    let full_area_shear = SectionCoefficients {
        ay: None,
        az: None,
        ..section
    };

    let element = BeamElement::between(
        point(0.0, 0.0, 0.0),
        point(4.0, 0.0, 3.0),
        0.0,
        properties.material(),
        section,
    )
    .expect("valid element");
    let local = element.local_stiffness().expect("valid element");
    let stiffer =
        local_stiffness(5.0, &properties.material(), &full_area_shear).expect("valid element");

    assert_relative_eq!(
        local.m11[(0, 0)],
        properties.elastic_modulus * section.ax / 5.0,
        max_relative = 1.0e-12
    );
    assert!(local.m11[(1, 1)] < stiffer.m11[(1, 1)]);
    assert!(local.m11[(2, 2)] < stiffer.m11[(2, 2)]);

    let global = element.global_stiffness().expect("valid element");
    assert!(global.to_matrix().iter().all(|value| value.is_finite()));
}

#[test]
fn configured_axis_convention_changes_orientation_only() {
    let properties = FrameProperties::default();
    let convention: AxisConvention =
        serde_json::from_str(r#"{"reference": [0.0, 0.0, 1.0], "fallback": [1.0, 0.0, 0.0]}"#)
            .expect("valid convention");
    let element = BeamElement::between(
        point(0.0, 0.0, 0.0),
        point(2.0, 1.0, 0.0),
        0.0,
        properties.material(),
        properties.section(),
    )
    .expect("valid element");

    let global = element.global_stiffness_with(&convention).expect("valid element");
    let transform = TransformMatrix::build_with(element.geometry.direction(), 0.0, &convention)
        .expect("valid axis");
    assert_relative_eq!(transform.local_y(), Vector3::z(), epsilon = 1.0e-12);

    let local = element.local_stiffness().expect("valid element");
    assert_blocks_close(&local, &global.unrotate(&transform.block_diagonal()));
}

#[test]
fn invalid_inputs_are_reported_by_category() {
    let properties = FrameProperties::default();

    let error = BeamElement::between(
        point(1.0, 2.0, 3.0),
        point(1.0, 2.0, 3.0),
        0.0,
        properties.material(),
        properties.section(),
    )
    .expect_err("zero direction rejected");
    assert_eq!(error, StiffnessError::InvalidGeometry(GeometryError::ZeroDirection));

    let error = local_stiffness_raw(3.0, 2.0e11, 8.0e10, 0.01, -8.0e-6, 3.0e-6, 0.0, 0.0, 1.0e-5)
        .expect_err("negative Iz rejected");
    assert_eq!(
        error,
        StiffnessError::InvalidSection(SectionError::NegativeCoefficient {
            field: "Iz",
            value: -8.0e-6
        })
    );

    let error = global_stiffness_with(
        &BeamGeometry::new(Vector3::new(0.0, 1.0, 0.0), 0.0).expect("valid axis"),
        &properties.material(),
        &properties.section(),
        &serde_json::from_str(r#"{"parallel_tolerance": 0.0}"#).expect("config parses"),
    )
    .expect_err("zero tolerance rejected");
    assert!(matches!(
        error,
        StiffnessError::InvalidGeometry(GeometryError::InvalidConvention { .. })
    ));

    let error = BeamGeometry::new(Vector3::new(1.0, 2.0, 3.0), f64::NAN)
        .expect_err("nan roll rejected");
    assert!(matches!(error, GeometryError::NonFiniteAngle { .. }));

    let error = local_stiffness_raw(0.0, 2.0e11, 8.0e10, 0.01, 8.0e-6, 3.0e-6, 0.0, 0.0, 1.0e-5)
        .expect_err("zero length rejected");
    assert!(matches!(error, StiffnessError::InvalidGeometry(_)));

    let error = local_stiffness_raw(3.0, 0.0, 8.0e10, 0.01, 8.0e-6, 3.0e-6, 0.0, 0.0, 1.0e-5)
        .expect_err("zero modulus rejected");
    assert!(matches!(error, StiffnessError::InvalidMaterial(_)));
}
