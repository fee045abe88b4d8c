use std::ops::{Neg, Add, Sub, Mul, Div};
use std::fmt;

use crate::EPSILON;
use crate::rad_to_deg;
use crate::error::{RotateError, RotateResult};

/// A point or direction in 3D space.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f64 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }

    /// Scalar product.
    pub fn dot(&self, vec: Vec3) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    pub fn cross(&self, vec: Vec3) -> Self {
        Self::new(
            self.y*vec.z - self.z*vec.y,
            self.z*vec.x - self.x*vec.z,
            self.x*vec.y - self.y*vec.x,
        )
    }

    /// Unit vector in the same direction. Vectors shorter than `EPSILON`
    /// are returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.len();
        if len >= EPSILON {
            *self / len
        }
        else {
            log::trace!("normalizing degenerate vector {self}, returned as is");
            *self
        }
    }

    /// Like `normalized`, but refuses vectors shorter than `EPSILON`.
    pub fn try_normalized(&self) -> RotateResult<Self> {
        let len = self.len();
        if len >= EPSILON {
            Ok(*self / len)
        }
        else {
            Err(RotateError::DegenerateVector(len))
        }
    }

    /// Angle between the two vectors in degrees.
    ///
    /// Returns 0 when either vector is (nearly) zero length. The cosine is
    /// clamped to [-1, 1] so rounding can never turn parallel vectors into NaN.
    pub fn angle(&self, vec: Vec3) -> f64 {
        let lengths = self.len() * vec.len();
        if lengths < EPSILON {
            return 0.0;
        }
        let cos = (self.dot(vec) / lengths).clamp(-1.0, 1.0);
        rad_to_deg(cos.acos())
    }

    /// False if any component is NaN or infinite, e.g. after dividing by zero.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

// Scaled by the reciprocal; a zero divisor propagates inf/NaN.
impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, other: f64) -> Self::Output {
        self * (1.0 / other)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Vec3 {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(vec: Vec3) -> [f64; 3] {
        [vec.x, vec.y, vec.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}/{:.1}/{:.1}]", self.x, self.y, self.z)
    }
}


#[test]
fn cross_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let cross = v.cross(v2);
    assert!(cross == Vec3::new(-45.0, 0.0, 30.0));
    assert!(v2.cross(v) == -cross);
}

#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    assert!(v.dot(v2) == 53.0);
    assert!(v2.dot(v) == 53.0);
}

#[test]
fn normalized_test() {
    let v = Vec3::new(4.0, 3.0, 6.0);
    assert!((v.normalized().len() - 1.0).abs() <= EPSILON);

    let tiny = Vec3::new(1e-6, -2e-6, 0.0);
    assert!(tiny.normalized() == tiny);
    assert!(Vec3::zero().normalized() == Vec3::zero());
}

#[test]
fn try_normalized_test() {
    let unit = Vec3::new(0.0, 3.0, 4.0).try_normalized().unwrap();
    assert!((unit - Vec3::new(0.0, 0.6, 0.8)).len() <= EPSILON);
    match Vec3::zero().try_normalized() {
        Err(RotateError::DegenerateVector(len)) => assert!(len == 0.0),
        other => panic!("expected degenerate vector, got {other:?}"),
    }
}

#[test]
fn angle_test() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert!((x.angle(y) - 90.0).abs() <= EPSILON);
    assert!(x.angle(x) == 0.0);
    assert!((x.angle(-x) - 180.0).abs() <= EPSILON);
    assert!(x.angle(Vec3::zero()) == 0.0);
}

#[test]
fn angle_of_parallel_vectors_is_not_nan() {
    let v = Vec3::new(0.1, 0.7, 0.3);
    let a = v.angle(v * 3.0);
    assert!(!a.is_nan());
    assert!(a.abs() <= 1e-3);
}

#[test]
fn divide_by_zero_propagates() {
    let v = Vec3::new(1.0, -1.0, 0.0) / 0.0;
    assert!(v.x == f64::INFINITY);
    assert!(v.y == f64::NEG_INFINITY);
    assert!(v.z.is_nan());
    assert!(!v.is_finite());
}

#[test]
fn array_conversion_test() {
    let v = Vec3::from([1.5, -2.0, 3.25]);
    assert!(v == Vec3::new(1.5, -2.0, 3.25));

    let arr: [f64; 3] = v.into();
    assert!(arr == [1.5, -2.0, 3.25]);
}

#[test]
fn operators_leave_operands_untouched() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(1.0, 1.0, 1.0);

    let sum = a + b;
    let scaled = a * 2.0;
    let unit = a.normalized();
    assert!(sum == Vec3::new(2.0, 3.0, 4.0));
    assert!(scaled == Vec3::new(2.0, 4.0, 6.0));
    assert!((unit.len() - 1.0).abs() <= EPSILON);
    assert!(a == Vec3::new(1.0, 2.0, 3.0));
    assert!(b == Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn display_test() {
    let v = Vec3::new(1.0, -0.24, 12.36);
    assert_eq!(v.to_string(), "[1.0/-0.2/12.4]");
}
