//! Range arguments for wavelength and parameter sweeps.
//!
//! A clap-compatible type that turns `start:stop:step` strings into the list
//! of sample points a command should evaluate. Appending `log` as a fourth
//! field (`start:stop:count:log`) requests `count` logarithmically spaced
//! points instead, which suits wavelength grids spanning the UV to the IR.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    #[error("range must be 'start:stop:step' or 'start:stop:count:log', got '{0}'")]
    Format(String),
    #[error("invalid {field} value '{value}'")]
    Number { field: &'static str, value: String },
    #[error("step cannot be zero")]
    ZeroStep,
    #[error("step {step} moves away from stop ({start} -> {stop})")]
    WrongDirection { start: f64, stop: f64, step: f64 },
    #[error("log spacing needs positive endpoints and at least 2 points")]
    InvalidLogRange,
}

/// How the points of a range are spaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Fixed increment between points
    Linear { step: f64 },
    /// Fixed ratio between points
    Log { count: usize },
}

/// Parsed sweep range.
///
/// # Examples
/// - `"3000:10000:500"` samples 3000, 3500, ..., 10000
/// - `"10:2:-2"` sweeps downward: 10, 8, 6, 4, 2
/// - `"0.1:3.0:50:log"` gives 50 log-spaced points from 0.1 to 3.0
#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg {
    pub start: f64,
    pub stop: f64,
    pub spacing: Spacing,
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, RangeError> {
    value.trim().parse::<f64>().map_err(|_| RangeError::Number {
        field,
        value: value.to_string(),
    })
}

impl FromStr for RangeArg {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [start, stop, step] => {
                let start = parse_field("start", start)?;
                let stop = parse_field("stop", stop)?;
                let step = parse_field("step", step)?;
                RangeArg::linear(start, stop, step)
            }
            [start, stop, count, kind] if kind.trim().eq_ignore_ascii_case("log") => {
                let start = parse_field("start", start)?;
                let stop = parse_field("stop", stop)?;
                let count = count.trim().parse::<usize>().map_err(|_| RangeError::Number {
                    field: "count",
                    value: count.to_string(),
                })?;
                RangeArg::log(start, stop, count)
            }
            _ => Err(RangeError::Format(s.to_string())),
        }
    }
}

impl fmt::Display for RangeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spacing {
            Spacing::Linear { step } => write!(f, "{}:{}:{}", self.start, self.stop, step),
            Spacing::Log { count } => write!(f, "{}:{}:{}:log", self.start, self.stop, count),
        }
    }
}

impl RangeArg {
    /// Evenly stepped range; `start == stop` yields a single point.
    pub fn linear(start: f64, stop: f64, step: f64) -> Result<Self, RangeError> {
        if step == 0.0 || !step.is_finite() {
            return Err(RangeError::ZeroStep);
        }
        if (stop - start) * step < 0.0 {
            return Err(RangeError::WrongDirection { start, stop, step });
        }
        Ok(Self {
            start,
            stop,
            spacing: Spacing::Linear { step },
        })
    }

    /// Logarithmically spaced range with `count` points, endpoints included.
    pub fn log(start: f64, stop: f64, count: usize) -> Result<Self, RangeError> {
        if !(start > 0.0 && stop > 0.0) || count < 2 {
            return Err(RangeError::InvalidLogRange);
        }
        Ok(Self {
            start,
            stop,
            spacing: Spacing::Log { count },
        })
    }

    /// All sample points of the range, in sweep order.
    ///
    /// Linear ranges include `stop` when it lies on the step lattice to
    /// within floating-point noise. Points are computed as `start + i*step`
    /// rather than by accumulation.
    pub fn values(&self) -> Vec<f64> {
        match self.spacing {
            Spacing::Linear { step } => {
                let span = (self.stop - self.start) / step;
                let n = (span + 1e-9).floor() as usize + 1;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
            Spacing::Log { count } => {
                let (lo, hi) = (self.start.ln(), self.stop.ln());
                let last = (count - 1) as f64;
                (0..count)
                    .map(|i| match i {
                        0 => self.start,
                        i if i == count - 1 => self.stop,
                        i => (lo + (hi - lo) * i as f64 / last).exp(),
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_range_parsing() {
        let range: RangeArg = "3000:10000:500".parse().unwrap();
        assert_eq!(range.start, 3000.0);
        assert_eq!(range.stop, 10000.0);
        assert_eq!(range.spacing, Spacing::Linear { step: 500.0 });

        let reverse: RangeArg = "10.0:0.0:-1.0".parse().unwrap();
        assert_eq!(reverse.spacing, Spacing::Linear { step: -1.0 });

        assert!(matches!(
            "1.0:2.0".parse::<RangeArg>(),
            Err(RangeError::Format(_))
        ));
        assert!(matches!(
            "invalid:2.0:1.0".parse::<RangeArg>(),
            Err(RangeError::Number { field: "start", .. })
        ));
        assert_eq!("1.0:2.0:0.0".parse::<RangeArg>(), Err(RangeError::ZeroStep));
        assert!(matches!(
            "5.0:1.0:1.0".parse::<RangeArg>(),
            Err(RangeError::WrongDirection { .. })
        ));
        assert!(matches!(
            "1.0:5.0:-1.0".parse::<RangeArg>(),
            Err(RangeError::WrongDirection { .. })
        ));
    }

    #[test]
    fn test_linear_values() {
        let range: RangeArg = "0.0:2.0:0.5".parse().unwrap();
        assert_eq!(range.values(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        let descending: RangeArg = "10.0:8.0:-0.5".parse().unwrap();
        assert_eq!(descending.values(), vec![10.0, 9.5, 9.0, 8.5, 8.0]);

        // Stop off the lattice is not reached
        let inexact: RangeArg = "0.0:2.1:0.5".parse().unwrap();
        assert_eq!(inexact.values().len(), 5);

        let single: RangeArg = "5.0:5.0:1.0".parse().unwrap();
        assert_eq!(single.values(), vec![5.0]);
    }

    #[test]
    fn test_fractional_steps_keep_endpoint() {
        let range: RangeArg = "0.1:0.5:0.1".parse().unwrap();
        let values = range.values();
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[4], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_log_values() {
        let range: RangeArg = "0.1:10:3:log".parse().unwrap();
        let values = range.values();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], 0.1);
        assert_relative_eq!(values[1], 1.0, epsilon = 1e-12);
        assert_eq!(values[2], 10.0);

        assert_eq!(
            "0:10:3:log".parse::<RangeArg>(),
            Err(RangeError::InvalidLogRange)
        );
        assert_eq!(
            "1:10:1:log".parse::<RangeArg>(),
            Err(RangeError::InvalidLogRange)
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let range: RangeArg = "1.5:10:0.5".parse().unwrap();
        assert_eq!(range.to_string(), "1.5:10:0.5");
        let log: RangeArg = "0.3:3:20:log".parse().unwrap();
        assert_eq!(log.to_string(), "0.3:3:20:log");
    }
}
