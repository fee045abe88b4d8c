use std::fmt;

use crate::{
    deg_to_rad,
    rad_to_deg,
    error::ConfigError,
    vector::Vec3,
    quaternion::{rotate_around_axis, try_rotate_around_axis},
};


/// Parsing states. Vector flags carry the index of the next component.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Parse {
    None,
    Axis(usize),
    Point(usize),
    Angle,
    Rad,
}
impl Parse {
    fn flag(&self) -> &'static str {
        match self {
            Parse::None => "",
            Parse::Axis(_) => "-axis",
            Parse::Point(_) => "-point",
            Parse::Angle => "-angle",
            Parse::Rad => "-rad",
        }
    }
}


/// A single rotation requested on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub axis: Vec3,
    /// Radians.
    pub angle: f64,
    pub point: Vec3,
    /// Fail on a degenerate axis instead of falling back.
    pub strict: bool,
}
impl Config {
    /// Create a new Config with the specified command line arguments.
    pub fn new(args: Vec<String>) -> Result<Config, ConfigError> {
        let mut parser = Parse::None;
        let mut cfg    = Config::default();

        for arg in args.into_iter() {
            if arg == "-strict" {
                if parser != Parse::None {
                    return Err(
                        ConfigError::MissingValue(parser.flag().to_string())
                    );
                }
                cfg.strict = true;
                continue;
            }
            let next = match arg.as_str() {
                "-axis"   => Some(Parse::Axis(0)),
                "-point"  => Some(Parse::Point(0)),
                "-angle"  => Some(Parse::Angle),
                "-rad"    => Some(Parse::Rad),
                _ => None,
            };
            if let Some(next) = next {
                if parser != Parse::None {
                    return Err(
                        ConfigError::MissingValue(parser.flag().to_string())
                    );
                }
                parser = next;
                continue;
            }
            match parser {
                Parse::Axis(i) => {
                    cfg.axis = with_component(cfg.axis, i, parse_number(&arg)?);
                    parser = if i == 2 { Parse::None } else { Parse::Axis(i + 1) };
                }
                Parse::Point(i) => {
                    cfg.point = with_component(cfg.point, i, parse_number(&arg)?);
                    parser = if i == 2 { Parse::None } else { Parse::Point(i + 1) };
                }
                Parse::Angle => {
                    cfg.angle = deg_to_rad(parse_number(&arg)?);
                    parser = Parse::None;
                }
                Parse::Rad => {
                    cfg.angle = parse_number(&arg)?;
                    parser = Parse::None;
                }
                Parse::None => {
                    return Err(
                        ConfigError::UnknownFlag(arg)
                    );
                }
            }
        }
        if parser != Parse::None {
            return Err(
                ConfigError::MissingValue(parser.flag().to_string())
            );
        }
        Ok(cfg)
    }

    /// Rotates the configured point.
    pub fn rotate(&self) -> Result<Vec3, ConfigError> {
        if self.strict {
            Ok(try_rotate_around_axis(self.axis, self.angle, self.point)?)
        }
        else {
            Ok(rotate_around_axis(self.axis, self.angle, self.point))
        }
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            axis: Vec3::new(0.0, 0.0, 1.0),
            angle: 0.0,
            point: Vec3::new(1.0, 0.0, 0.0),
            strict: false,
        }
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rRotation
            \r=============================================================
            \rAxis:  {}
            \rAngle: {:.1} deg
            \rPoint: {}
            \rMode:  {}",
            self.axis,
            rad_to_deg(self.angle),
            self.point,
            if self.strict { "strict" } else { "lenient" },
        )
    }
}

fn parse_number(arg: &str) -> Result<f64, ConfigError> {
    arg.parse::<f64>().map_err(|_| ConfigError::InvalidNumber(arg.to_string()))
}

fn with_component(vec: Vec3, i: usize, value: f64) -> Vec3 {
    match i {
        0 => Vec3 { x: value, ..vec },
        1 => Vec3 { y: value, ..vec },
        _ => Vec3 { z: value, ..vec },
    }
}


#[cfg(test)]
fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[test]
fn parse_full_config() {
    let cfg = Config::new(args("-axis 1 0 0 -angle 180 -point 0 1 0 -strict")).unwrap();
    assert!(cfg.axis == Vec3::new(1.0, 0.0, 0.0));
    assert!((cfg.angle - std::f64::consts::PI).abs() <= crate::EPSILON);
    assert!(cfg.point == Vec3::new(0.0, 1.0, 0.0));
    assert!(cfg.strict);
}

#[test]
fn parse_defaults_and_negative_values() {
    assert!(Config::new(Vec::new()).unwrap() == Config::default());

    let cfg = Config::new(args("-rad -1.5 -point -1 -2 -3")).unwrap();
    assert!(cfg.angle == -1.5);
    assert!(cfg.point == Vec3::new(-1.0, -2.0, -3.0));
    assert!(!cfg.strict);
}

#[test]
fn parse_errors() {
    assert!(Config::new(args("-axis 1 0")) == Err(ConfigError::MissingValue("-axis".into())));
    assert!(Config::new(args("-point 1 -angle 90")) == Err(ConfigError::MissingValue("-point".into())));
    assert!(Config::new(args("-angle ninety")) == Err(ConfigError::InvalidNumber("ninety".into())));
    assert!(Config::new(args("-spin 3")) == Err(ConfigError::UnknownFlag("-spin".into())));
}

#[test]
fn strict_flag_anywhere() {
    let first = Config::new(args("-strict -angle 90")).unwrap();
    assert!(first.strict);
    assert!((first.angle - std::f64::consts::FRAC_PI_2).abs() <= crate::EPSILON);

    let last = Config::new(args("-point 0 1 0 -strict")).unwrap();
    assert!(last.strict);
    assert!(last.point == Vec3::new(0.0, 1.0, 0.0));

    assert!(Config::new(args("-axis 1 -strict")) == Err(ConfigError::MissingValue("-axis".into())));
    assert!(Config::new(args("-strict 3")) == Err(ConfigError::UnknownFlag("3".into())));
}

#[test]
fn rotate_config() {
    let cfg = Config::new(args("-angle 90")).unwrap();
    let p = cfg.rotate().unwrap();
    assert!((p - Vec3::new(0.0, 1.0, 0.0)).len() <= crate::EPSILON);

    let strict = Config::new(args("-axis 0 0 0 -angle 90 -strict")).unwrap();
    assert!(strict.rotate().is_err());

    let lenient = Config { strict: false, ..strict };
    assert!((lenient.rotate().unwrap() - lenient.point).len() <= crate::EPSILON);
}
