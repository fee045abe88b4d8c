use std::error::Error;
use std::fmt;

pub type RotateResult<T> = Result<T, RotateError>;

/// Returned by the strict (`try_*`) operations where the lenient ones
/// would silently hand back their input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotateError {
    /// Vector length below `EPSILON`.
    DegenerateVector(f64),
    /// Quaternion length (or squared length, for inversion) below `EPSILON`.
    DegenerateQuaternion(f64),
}
impl fmt::Display for RotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotateError::DegenerateVector(len) => {
                write!(f, "vector of length {len:e} is too short to normalize")
            }
            RotateError::DegenerateQuaternion(len) => {
                write!(f, "quaternion of length {len:e} is too short to normalize or invert")
            }
        }
    }
}
impl Error for RotateError {}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidNumber(String),
    UnknownFlag(String),
    Rotate(RotateError),
}
impl From<RotateError> for ConfigError {
    fn from(err: RotateError) -> Self {
        Self::Rotate(err)
    }
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => {
                write!(f, "
                    \rMissing value for {flag}",
                )
            }
            ConfigError::InvalidNumber(arg) => {
                write!(f, "
                    \rInvalid number: {arg}",
                )
            }
            ConfigError::UnknownFlag(arg) => {
                write!(f, "
                    \rUnknown argument: {arg}",
                )
            }
            ConfigError::Rotate(err) => {
                write!(f, "
                    \r{err}",
                )
            }
        }
    }
}
impl Error for ConfigError {}
