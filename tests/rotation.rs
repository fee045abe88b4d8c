use std::f64::consts::{PI, FRAC_PI_2};

use cgmath::{InnerSpace, Rad, Rotation, Rotation3};

use vector3d::{
    EPSILON,
    Quaternion,
    RotateError,
    Vec3,
    deg_to_rad,
    rad_to_deg,
    rotate_around_axis,
    rotate_point,
    try_rotate_around_axis,
    try_rotate_point,
};

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).len() <= EPSILON
}

fn axes() -> Vec<Vec3> {
    vec![
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0).normalized(),
        Vec3::new(-0.3, 0.8, 0.2).normalized(),
    ]
}

fn points() -> Vec<Vec3> {
    vec![
        Vec3::zero(),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-2.5, 4.0, 0.5),
        Vec3::new(0.1, -0.2, 7.3),
    ]
}

const ANGLES: [f64; 6] = [0.0, 0.3, FRAC_PI_2, 2.0, PI, -1.1];

#[test]
fn quarter_turn_about_z() {
    let p = rotate_around_axis(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2, Vec3::new(1.0, 0.0, 0.0));
    assert!(close(p, Vec3::new(0.0, 1.0, 0.0)), "{p:?}");
}

#[test]
fn half_turn_about_x() {
    let p = rotate_around_axis(Vec3::new(1.0, 0.0, 0.0), PI, Vec3::new(0.0, 1.0, 0.0));
    assert!(close(p, Vec3::new(0.0, -1.0, 0.0)), "{p:?}");
}

#[test]
fn rotation_preserves_length() {
    for axis in axes() {
        for &angle in ANGLES.iter() {
            for point in points() {
                let rotated = rotate_around_axis(axis, angle, point);
                assert!((rotated.len() - point.len()).abs() <= EPSILON);
            }
        }
    }
}

#[test]
fn zero_and_full_turns_are_identity() {
    for axis in axes() {
        for point in points() {
            assert!(close(rotate_around_axis(axis, 0.0, point), point));
            assert!(close(rotate_around_axis(axis, 2.0 * PI, point), point));
        }
    }
}

#[test]
fn negative_angle_undoes_rotation() {
    let axis = Vec3::new(0.2, -0.4, 0.9).normalized();
    let point = Vec3::new(3.0, 1.0, -2.0);
    let there = rotate_around_axis(axis, 1.3, point);
    assert!(close(rotate_around_axis(axis, -1.3, there), point));
}

#[test]
fn rotate_point_normalizes_quaternion() {
    let q = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2) * 4.0;
    assert!(!q.is_normalized());
    let p = rotate_point(q, Vec3::new(1.0, 0.0, 0.0));
    assert!(close(p, Vec3::new(0.0, 1.0, 0.0)));
    assert!(close(q.rotate(Vec3::new(1.0, 0.0, 0.0)), p));
}

#[test]
fn composed_rotations_multiply() {
    let z = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
    let x = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2);
    let point = Vec3::new(1.0, 0.0, 0.0);

    // x * z applies z first.
    let composed = rotate_point(x * z, point);
    assert!(close(composed, rotate_point(x, rotate_point(z, point))));
    assert!(close(composed, Vec3::new(0.0, 0.0, 1.0)));
    assert!(!close(composed, rotate_point(z * x, point)));
}

#[test]
fn unit_inverse_is_conjugate() {
    for axis in axes() {
        for &angle in ANGLES.iter() {
            let q = Quaternion::from_axis_angle(axis, angle);
            assert!(q.is_normalized());
            assert!((q.inverse() - q.conjugate()).len() <= EPSILON);
            assert!((q * q.inverse() - Quaternion::identity()).len() <= EPSILON);
        }
    }
}

#[test]
fn vector_products() {
    for a in points() {
        assert!(a.cross(a) == Vec3::zero());
        for b in points() {
            assert!(a.cross(b) == -b.cross(a));
            assert!(a.dot(b) == b.dot(a));
        }
    }
}

#[test]
fn vector_angles() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    assert!((x.angle(Vec3::new(0.0, 1.0, 0.0)) - 90.0).abs() <= EPSILON);
    assert!(x.angle(x) == 0.0);
    assert!((rad_to_deg(deg_to_rad(37.5)) - 37.5).abs() <= EPSILON);
    assert!((deg_to_rad(180.0) - PI).abs() <= EPSILON);
}

#[test]
fn strict_variants_reject_degenerate_input() {
    let point = Vec3::new(1.0, 2.0, 3.0);

    let zero = Quaternion::from_components(0.0, 0.0, 0.0, 0.0);
    assert!(rotate_point(zero, point) == Vec3::zero());
    assert!(try_rotate_point(zero, point) == Err(RotateError::DegenerateQuaternion(0.0)));

    assert!(matches!(
        try_rotate_around_axis(Vec3::zero(), 1.0, point),
        Err(RotateError::DegenerateVector(_))
    ));
    let ok = try_rotate_around_axis(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2, point).unwrap();
    assert!(close(ok, rotate_around_axis(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2, point)));
}

#[test]
fn matches_cgmath() {
    for axis in axes() {
        for &angle in ANGLES.iter() {
            let q = Quaternion::from_axis_angle(axis, angle);
            let cq = cgmath::Quaternion::from_axis_angle(
                cgmath::Vector3::new(axis.x, axis.y, axis.z).normalize(),
                Rad(angle),
            );
            assert!((q.s - cq.s).abs() <= EPSILON);
            assert!(close(q.v, Vec3::new(cq.v.x, cq.v.y, cq.v.z)));

            for point in points() {
                let ours = rotate_around_axis(axis, angle, point);
                let theirs = cq.rotate_vector(cgmath::Vector3::new(point.x, point.y, point.z));
                assert!(close(ours, Vec3::new(theirs.x, theirs.y, theirs.z)), "{ours:?} {theirs:?}");
            }
        }
    }
}

#[test]
fn plain_numeric_layout() {
    let points = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let flat: &[f64] = bytemuck::cast_slice(&points);
    assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let q = Quaternion::from_components(0.5, 1.0, 2.0, 3.0);
    let raw: [f64; 4] = q.into();
    assert_eq!(bytemuck::cast::<Quaternion, [f64; 4]>(q), raw);
}
