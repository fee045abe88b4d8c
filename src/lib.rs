use std::f64::consts::PI;

pub mod error;
pub mod vector;
pub mod quaternion;
pub mod config;

pub use crate::error::{RotateError, RotateResult};
pub use crate::vector::Vec3;
pub use crate::quaternion::{
    Quaternion,
    rotate_point,
    rotate_around_axis,
    try_rotate_point,
    try_rotate_around_axis,
};

/// Lengths below this are treated as zero by normalization, inversion and
/// `Vec3::angle`.
pub const EPSILON: f64 = 1e-5;

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}
