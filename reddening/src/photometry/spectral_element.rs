//! Tabulated dimensionless functions of wavelength: passbands and transmission curves.
//!
//! A [`SpectralElement`] is a piecewise linear function W(λ) sampled on an
//! ascending wavelength table (Angstroms), together with an extrapolation
//! policy that decides what happens outside the table:
//!
//! - [`Extrapolation::Error`]: evaluation outside the table fails
//! - [`Extrapolation::Zero`]: W(λ) = 0 outside the table (filters)
//! - [`Extrapolation::Nearest`]: the edge value is held (reddening curves)
//!
//! Elements are immutable; multiplication produces a new element whose
//! table is the union of both operands' knots.
//!
//! # Example
//! ```rust
//! use reddening::photometry::{Extrapolation, SpectralElement};
//!
//! let filter = SpectralElement::box_filter(5500.0, 1000.0, 0.9).unwrap();
//! let screen = SpectralElement::from_table(
//!     vec![4000.0, 7000.0],
//!     vec![0.5, 0.8],
//!     Extrapolation::Nearest,
//! ).unwrap();
//!
//! let product = filter.multiply(&screen).unwrap();
//! assert!(product.at(5500.0).unwrap() > 0.5);
//! assert_eq!(product.at(8000.0).unwrap(), 0.0);
//! ```

use log::warn;
use shared::algo::{interp, merge_grids};
use shared::units::{Quantity, Unit, UnitError};
use thiserror::Error;

use crate::algo::trapezoid;
use crate::grid::{GridError, WavelengthGrid};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectralElementError {
    #[error("wavelength table has {wavelengths} entries but value table has {values}")]
    LengthMismatch { wavelengths: usize, values: usize },

    #[error("spectral element contains non-finite value {0}")]
    NonFiniteValue(f64),

    #[error("WavelengthOutOfRange: {wavelength} Å is outside the tabulated domain [{min}, {max}] Å")]
    OutOfDomain { wavelength: f64, min: f64, max: f64 },

    #[error("IncompatibleSupport: [{}, {}] Å and [{}, {}] Å do not overlap", .left.0, .left.1, .right.0, .right.1)]
    IncompatibleSupport { left: (f64, f64), right: (f64, f64) },

    #[error("ZeroTransmission: transmission is exactly zero at {0} Å")]
    ZeroTransmission(f64),

    #[error("unknown passband '{0}'")]
    UnknownPassband(String),

    #[error("box filter needs a positive center and width, got center {center} Å, width {width} Å")]
    InvalidBox { center: f64, width: f64 },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl SpectralElementError {
    pub fn kind(&self) -> &'static str {
        match self {
            SpectralElementError::OutOfDomain { .. } => "WavelengthOutOfRange",
            SpectralElementError::IncompatibleSupport { .. } => "IncompatibleSupport",
            SpectralElementError::ZeroTransmission(_) => "ZeroTransmission",
            SpectralElementError::Grid(err) => err.kind(),
            SpectralElementError::Unit(err) => crate::error::unit_error_kind(err),
            _ => "InvalidInput",
        }
    }
}

/// Behaviour of a tabulated function outside its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extrapolation {
    Error,
    Zero,
    Nearest,
}

impl Extrapolation {
    /// Policy of a product: an erroring operand dominates, then zero-fill
    fn combine(self, other: Extrapolation) -> Extrapolation {
        use Extrapolation::*;
        match (self, other) {
            (Error, _) | (_, Error) => Error,
            (Zero, _) | (_, Zero) => Zero,
            (Nearest, Nearest) => Nearest,
        }
    }
}

/// Tabulated transmission curve W(λ) with wavelengths in Angstroms
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralElement {
    name: Option<String>,
    wavelengths: Vec<f64>,
    values: Vec<f64>,
    extrapolation: Extrapolation,
}

impl SpectralElement {
    /// Create an element from wavelengths in Angstroms and matching values.
    ///
    /// Rows are sorted by wavelength; duplicate or non-positive wavelengths
    /// and non-finite values are rejected.
    pub fn from_table(
        wavelengths_aa: Vec<f64>,
        values: Vec<f64>,
        extrapolation: Extrapolation,
    ) -> Result<Self, SpectralElementError> {
        if wavelengths_aa.len() != values.len() {
            return Err(SpectralElementError::LengthMismatch {
                wavelengths: wavelengths_aa.len(),
                values: values.len(),
            });
        }
        if let Some(&bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(SpectralElementError::NonFiniteValue(bad));
        }

        let mut rows: Vec<(f64, f64)> = wavelengths_aa.into_iter().zip(values).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (wavelengths, values): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();

        let grid = WavelengthGrid::new(wavelengths)?;

        Ok(Self {
            name: None,
            wavelengths: grid.into_vec(),
            values,
            extrapolation,
        })
    }

    /// Create an element from unit-tagged wavelengths (any spectral-axis unit)
    pub fn from_quantity(
        wavelengths: &Quantity,
        values: Vec<f64>,
        extrapolation: Extrapolation,
    ) -> Result<Self, SpectralElementError> {
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;
        Self::from_table(angstroms.into_values(), values, extrapolation)
    }

    /// Rectangular passband with constant transmission and sharp edges.
    ///
    /// The edges are tabulated as a pair of knots a hair apart so that linear
    /// interpolation does not smear the step.
    pub fn box_filter(
        center_aa: f64,
        width_aa: f64,
        transmission: f64,
    ) -> Result<Self, SpectralElementError> {
        let lower = center_aa - width_aa / 2.0;
        let upper = center_aa + width_aa / 2.0;
        if !(width_aa > 0.0 && lower > 0.0 && center_aa.is_finite() && width_aa.is_finite()) {
            return Err(SpectralElementError::InvalidBox {
                center: center_aa,
                width: width_aa,
            });
        }

        let edge = 1e-9 * center_aa;
        Self::from_table(
            vec![lower - edge, lower, upper, upper + edge],
            vec![0.0, transmission, transmission, 0.0],
            Extrapolation::Zero,
        )
    }

    /// Load a named passband through an external loader
    pub fn from_filter_name(
        name: &str,
        loader: &dyn PassbandLoader,
    ) -> Result<Self, SpectralElementError> {
        let table = loader.load(name)?;
        Ok(Self::from_quantity(&table.wavelengths, table.transmission, Extrapolation::Zero)?
            .with_name(name))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Tabulated wavelengths in Angstroms
    pub fn knots(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Tabulated values at each knot
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First and last tabulated wavelengths
    pub fn domain(&self) -> (f64, f64) {
        (self.wavelengths[0], self.wavelengths[self.wavelengths.len() - 1])
    }

    /// Wavelength span over which the element is non-zero, bracketed by the
    /// zero-valued knots either side. `None` if every tabulated value is zero.
    ///
    /// Held edge values under [`Extrapolation::Nearest`] are not counted, so
    /// the support never extends past the table.
    pub fn support(&self) -> Option<(f64, f64)> {
        let first = self.values.iter().position(|&v| v != 0.0)?;
        let last = self.values.iter().rposition(|&v| v != 0.0)?;
        let lower = self.wavelengths[first.saturating_sub(1)];
        let upper = self.wavelengths[(last + 1).min(self.wavelengths.len() - 1)];
        Some((lower, upper))
    }

    /// Evaluate at a single wavelength in Angstroms
    pub fn at(&self, wavelength_aa: f64) -> Result<f64, SpectralElementError> {
        let (min, max) = self.domain();
        if (min..=max).contains(&wavelength_aa) {
            return interp(wavelength_aa, &self.wavelengths, &self.values).map_err(|_| {
                SpectralElementError::OutOfDomain {
                    wavelength: wavelength_aa,
                    min,
                    max,
                }
            });
        }

        match self.extrapolation {
            Extrapolation::Error => Err(SpectralElementError::OutOfDomain {
                wavelength: wavelength_aa,
                min,
                max,
            }),
            Extrapolation::Zero => Ok(0.0),
            Extrapolation::Nearest if wavelength_aa < min => Ok(self.values[0]),
            Extrapolation::Nearest => Ok(self.values[self.values.len() - 1]),
        }
    }

    /// Evaluate at many wavelengths in Angstroms
    pub fn evaluate(&self, wavelengths_aa: &[f64]) -> Result<Vec<f64>, SpectralElementError> {
        let (min, max) = self.domain();
        let outside = wavelengths_aa
            .iter()
            .filter(|w| !(min..=max).contains(*w))
            .count();
        if outside > 0 && self.extrapolation != Extrapolation::Error {
            warn!(
                "{} of {} wavelengths fall outside [{min}, {max}] Å; applying {:?} extrapolation",
                outside,
                wavelengths_aa.len(),
                self.extrapolation
            );
        }

        wavelengths_aa.iter().map(|&w| self.at(w)).collect()
    }

    /// Evaluate at wavelengths carried by a unit-tagged quantity
    pub fn evaluate_quantity(&self, wavelengths: &Quantity) -> Result<Vec<f64>, SpectralElementError> {
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;
        self.evaluate(angstroms.values())
    }

    /// 1 / W(λ), failing where the transmission is exactly zero
    pub fn reciprocal_at(&self, wavelength_aa: f64) -> Result<f64, SpectralElementError> {
        let value = self.at(wavelength_aa)?;
        if value == 0.0 {
            return Err(SpectralElementError::ZeroTransmission(wavelength_aa));
        }
        Ok(1.0 / value)
    }

    /// Pointwise product of two elements.
    ///
    /// Knots are the union of both tables. An operand with the `Error` policy
    /// restricts the product to its own domain; when both operands do and
    /// their domains are disjoint the product is undefined.
    pub fn multiply(&self, other: &SpectralElement) -> Result<SpectralElement, SpectralElementError> {
        let mut lower = f64::NEG_INFINITY;
        let mut upper = f64::INFINITY;
        for operand in [self, other] {
            if operand.extrapolation == Extrapolation::Error {
                let (min, max) = operand.domain();
                lower = lower.max(min);
                upper = upper.min(max);
            }
        }
        if lower > upper {
            return Err(SpectralElementError::IncompatibleSupport {
                left: self.domain(),
                right: other.domain(),
            });
        }

        let mut knots = merge_grids(&self.wavelengths, &other.wavelengths);

        // Zero-filled operands drop to zero just past their last knot
        for operand in [self, other] {
            if operand.extrapolation == Extrapolation::Zero {
                let (min, max) = operand.domain();
                let edges = [min - 1e-9 * min, max + 1e-9 * max];
                knots = merge_grids(&knots, &edges);
            }
        }
        knots.retain(|&w| w > 0.0 && w >= lower && w <= upper);

        let values = knots
            .iter()
            .map(|&w| Ok(self.at(w)? * other.at(w)?))
            .collect::<Result<Vec<f64>, SpectralElementError>>()?;

        let name = match (&self.name, &other.name) {
            (Some(a), Some(b)) => Some(format!("{a}*{b}")),
            (Some(a), None) | (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        };

        Ok(SpectralElement {
            name,
            wavelengths: knots,
            values,
            extrapolation: self.extrapolation.combine(other.extrapolation),
        })
    }

    /// Integrate W(λ)·f(λ) dλ over the table with the trapezoidal rule
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let weighted: Vec<f64> = self
            .wavelengths
            .iter()
            .zip(self.values.iter())
            .map(|(&w, &t)| t * f(w))
            .collect();
        trapezoid(&self.wavelengths, &weighted)
    }

    /// ∫ W(λ) dλ in Angstroms
    pub fn equivalent_width(&self) -> f64 {
        self.integrate(|_| 1.0)
    }

    /// Source-independent characteristic wavelength, sqrt(∫Wλ dλ / ∫W/λ dλ)
    pub fn pivot_wavelength(&self) -> Option<f64> {
        let numerator = self.integrate(|w| w);
        let denominator = self.integrate(|w| 1.0 / w);
        if denominator > 0.0 && numerator > 0.0 {
            Some((numerator / denominator).sqrt())
        } else {
            None
        }
    }
}

/// A passband as delivered by an external source: unit-tagged wavelengths plus transmission
#[derive(Debug, Clone, PartialEq)]
pub struct PassbandTable {
    pub wavelengths: Quantity,
    pub transmission: Vec<f64>,
}

/// Source of named passbands (a filter database, a directory of curves, ...)
pub trait PassbandLoader: Send + Sync {
    /// Look up a passband by name, failing with `UnknownPassband` if absent
    fn load(&self, name: &str) -> Result<PassbandTable, SpectralElementError>;
}
