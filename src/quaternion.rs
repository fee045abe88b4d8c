use std::ops::{Neg, Add, Sub, Mul};
use std::fmt;

use crate::EPSILON;
use crate::vector::Vec3;
use crate::error::{RotateError, RotateResult};

/// `s + v.x*i + v.y*j + v.z*k`.
///
/// Used both as a rotation (unit length, built with `from_axis_angle`) and as
/// a pure quaternion (`s == 0`) carrying a point through the sandwich product.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    pub s: f64,
    pub v: Vec3,
}
impl Quaternion {
    pub fn new(s: f64, v: Vec3) -> Self {
        Self { s, v }
    }

    pub fn from_components(s: f64, xi: f64, yj: f64, zk: f64) -> Self {
        Self {
            s,
            v: Vec3::new(xi, yj, zk),
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, Vec3::zero())
    }

    /// Embeds a point as a quaternion with zero scalar part.
    pub fn pure(point: Vec3) -> Self {
        Self::new(0.0, point)
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis is used as given. A non-unit axis produces a non-unit
    /// quaternion, which `rotate_point` normalizes before use.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let half = angle / 2.0;
        Self {
            s: half.cos(),
            v: axis * half.sin(),
        }
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.s, -self.v)
    }

    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f64 {
        self.s*self.s + self.v.len_sq()
    }

    pub fn is_normalized(&self) -> bool {
        (self.len_sq() - 1.0).abs() <= EPSILON
    }

    /// `conjugate / len²`. Quaternions whose squared length is below
    /// `EPSILON` are returned unchanged.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|_| {
            log::trace!("inverting degenerate quaternion {self}, returned as is");
            *self
        })
    }

    pub fn try_inverse(&self) -> RotateResult<Self> {
        let len_sq = self.len_sq();
        if len_sq < EPSILON {
            return Err(RotateError::DegenerateQuaternion(len_sq.sqrt()));
        }
        Ok(self.conjugate() * (1.0 / len_sq))
    }

    /// Quaternions shorter than `EPSILON` are returned unchanged.
    pub fn normalized(&self) -> Self {
        self.try_normalized().unwrap_or_else(|_| {
            log::trace!("normalizing degenerate quaternion {self}, returned as is");
            *self
        })
    }

    pub fn try_normalized(&self) -> RotateResult<Self> {
        let len = self.len();
        if len < EPSILON {
            return Err(RotateError::DegenerateQuaternion(len));
        }
        Ok(Self::new(self.s / len, self.v * (1.0 / len)))
    }

    /// Rotation angle in radians, in [0, 2π].
    ///
    /// A quaternion shorter than `EPSILON` describes no rotation, so its
    /// angle is 0.
    pub fn angle(&self) -> f64 {
        match self.try_normalized() {
            Ok(unit) => 2.0 * unit.s.clamp(-1.0, 1.0).acos(),
            Err(_) => 0.0,
        }
    }

    /// Rotation axis; zero for the identity rotation.
    pub fn axis(&self) -> Vec3 {
        self.v.normalized()
    }

    /// Rotates `point` by this quaternion, see [`rotate_point`].
    pub fn rotate(&self, point: Vec3) -> Vec3 {
        rotate_point(*self, point)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.s, -self.v)
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.s + other.s, self.v + other.v)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.s - other.s, self.v - other.v)
    }
}

/// Hamilton product. Not commutative.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self {
            s: self.s*other.s - self.v.dot(other.v),
            v: self.v.cross(other.v) + other.v * self.s + self.v * other.s,
        }
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.s * other, self.v * other)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(quat: Quaternion) -> [f64; 4] {
        [quat.s, quat.v.x, quat.v.y, quat.v.z]
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}; {})", self.s, self.v)
    }
}

/// Rotates `point` with the sandwich product `q * p * q⁻¹`.
///
/// `q` is normalized first, so any non-degenerate quaternion acts as a rigid
/// rotation. The scalar part of the product is discarded.
pub fn rotate_point(q: Quaternion, point: Vec3) -> Vec3 {
    let nq = q.normalized();
    let rotated = nq * Quaternion::pure(point) * nq.inverse();
    log::debug!("rotated {point} by {nq} to {}", rotated.v);
    rotated.v
}

/// Rotates `point` by `angle` radians about `axis`, right-handed.
pub fn rotate_around_axis(axis: Vec3, angle: f64, point: Vec3) -> Vec3 {
    rotate_point(Quaternion::from_axis_angle(axis, angle), point)
}

/// `rotate_point` that fails instead of rotating by a degenerate quaternion.
pub fn try_rotate_point(q: Quaternion, point: Vec3) -> RotateResult<Vec3> {
    let nq = q.try_normalized()?;
    let rotated = nq * Quaternion::pure(point) * nq.try_inverse()?;
    Ok(rotated.v)
}

pub fn try_rotate_around_axis(axis: Vec3, angle: f64, point: Vec3) -> RotateResult<Vec3> {
    axis.try_normalized()?;
    try_rotate_point(Quaternion::from_axis_angle(axis, angle), point)
}


#[cfg(test)]
fn approx_eq(a: Quaternion, b: Quaternion) -> bool {
    (a - b).len() <= EPSILON
}

#[test]
fn multiply_test() {
    let i = Quaternion::from_components(0.0, 1.0, 0.0, 0.0);
    let j = Quaternion::from_components(0.0, 0.0, 1.0, 0.0);
    let k = Quaternion::from_components(0.0, 0.0, 0.0, 1.0);

    assert!(i * j == k);
    assert!(j * i == -k);
    assert!(i * i == Quaternion::from_components(-1.0, 0.0, 0.0, 0.0));
    assert!(i * j * k == Quaternion::from_components(-1.0, 0.0, 0.0, 0.0));
}

#[test]
fn multiply_is_not_commutative() {
    let q1 = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    let q2 = Quaternion::from_components(5.0, 6.0, 7.0, 8.0);

    assert!(q1 * q2 == Quaternion::from_components(-60.0, 12.0, 30.0, 24.0));
    assert!(q2 * q1 == Quaternion::from_components(-60.0, 20.0, 14.0, 32.0));
    assert!(q1 * q2 != q2 * q1);
}

#[test]
fn add_sub_scale_test() {
    let q1 = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    let q2 = Quaternion::from_components(0.5, -1.0, 1.0, 2.0);

    assert!(q1 + q2 == Quaternion::from_components(1.5, 1.0, 4.0, 6.0));
    assert!(q1 - q2 == Quaternion::from_components(0.5, 3.0, 2.0, 2.0));
    assert!(q1 * 2.0 == Quaternion::from_components(2.0, 4.0, 6.0, 8.0));
    assert!(q1.conjugate() == Quaternion::from_components(1.0, -2.0, -3.0, -4.0));
}

#[test]
fn inverse_test() {
    let q = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    assert!(approx_eq(q * q.inverse(), Quaternion::identity()));
    assert!(approx_eq(q.inverse() * q, Quaternion::identity()));

    let unit = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.2);
    assert!(unit.is_normalized());
    assert!(approx_eq(unit.inverse(), unit.conjugate()));
}

#[test]
fn degenerate_fallback_test() {
    let tiny = Quaternion::from_components(1e-3, 0.0, 1e-3, 0.0);
    assert!(tiny.inverse() == tiny);
    assert!(tiny.try_inverse().is_err());

    let tinier = Quaternion::from_components(0.0, 1e-6, 0.0, 0.0);
    assert!(tinier.normalized() == tinier);
    assert!(matches!(tinier.try_normalized(), Err(RotateError::DegenerateQuaternion(_))));
}

#[test]
fn normalized_test() {
    let q = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    assert!(!q.is_normalized());
    assert!(q.normalized().is_normalized());
    assert!((q.normalized().len() - 1.0).abs() <= EPSILON);
}

#[test]
fn axis_angle_roundtrip_test() {
    let q = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.75);
    assert!((q.angle() - 0.75).abs() <= EPSILON);
    assert!((q.axis() - Vec3::new(1.0, 0.0, 0.0)).len() <= EPSILON);
    assert!(Quaternion::identity().angle() == 0.0);
}

#[test]
fn degenerate_quaternion_has_no_angle() {
    assert!(Quaternion::from_components(0.0, 0.0, 0.0, 0.0).angle() == 0.0);
    assert!(Quaternion::from_components(0.0, 1e-6, 0.0, 0.0).angle() == 0.0);

    let half_turn = Quaternion::from_components(0.0, 0.0, 0.0, 2.0);
    assert!((half_turn.angle() - std::f64::consts::PI).abs() <= EPSILON);
}

#[test]
fn display_test() {
    let q = Quaternion::from_components(1.0, 0.0, -1.5, 2.0);
    assert_eq!(q.to_string(), "(1.0; [0.0/-1.5/2.0])");
}
