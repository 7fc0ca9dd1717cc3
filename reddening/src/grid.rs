//! Wavelength grids: the common support of tabulated spectral functions.
//!
//! Grids are stored in Angstroms, ascending, with no duplicate or
//! non-positive entries. Inputs in any spectral-axis unit are accepted and
//! converted on construction; frequency and wavenumber inputs are re-sorted
//! since they run opposite to wavelength.

use shared::range_arg::RangeArg;
use shared::units::{Quantity, Unit, UnitError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("wavelength grid is empty")]
    Empty,

    #[error("wavelength grid contains non-finite value {0}")]
    NonFinite(f64),

    #[error("wavelength grid contains non-positive value {0}")]
    NonPositive(f64),

    #[error("wavelength grid contains duplicate value {0} Å")]
    DuplicateWavelength(f64),

    #[error("invalid grid request: {0}")]
    InvalidSpacing(String),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl GridError {
    pub fn kind(&self) -> &'static str {
        match self {
            GridError::Unit(err) => crate::error::unit_error_kind(err),
            _ => "InvalidInput",
        }
    }
}

/// Validated, ascending wavelength grid in Angstroms
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    angstroms: Vec<f64>,
}

impl WavelengthGrid {
    /// Build a grid from wavelengths in Angstroms, sorting them ascending
    pub fn new(mut angstroms: Vec<f64>) -> Result<Self, GridError> {
        if angstroms.is_empty() {
            return Err(GridError::Empty);
        }
        if let Some(&bad) = angstroms.iter().find(|v| !v.is_finite()) {
            return Err(GridError::NonFinite(bad));
        }
        if let Some(&bad) = angstroms.iter().find(|&&v| v <= 0.0) {
            return Err(GridError::NonPositive(bad));
        }

        angstroms.sort_by(f64::total_cmp);

        if let Some(pair) = angstroms.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GridError::DuplicateWavelength(pair[0]));
        }

        Ok(Self { angstroms })
    }

    /// Build a grid from any spectral-axis quantity (length, frequency or wavenumber)
    pub fn from_quantity(wavelengths: &Quantity) -> Result<Self, GridError> {
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;
        Self::new(angstroms.into_values())
    }

    /// `n` logarithmically spaced wavelengths from `min_aa` to `max_aa` inclusive
    pub fn log_spaced(min_aa: f64, max_aa: f64, n: usize) -> Result<Self, GridError> {
        let range = RangeArg::log(min_aa, max_aa, n)
            .map_err(|err| GridError::InvalidSpacing(err.to_string()))?;
        Self::new(range.values())
    }

    /// Evenly stepped wavelengths from `min_aa` to `max_aa`
    pub fn linear(min_aa: f64, max_aa: f64, step_aa: f64) -> Result<Self, GridError> {
        let range = RangeArg::linear(min_aa, max_aa, step_aa)
            .map_err(|err| GridError::InvalidSpacing(err.to_string()))?;
        Self::new(range.values())
    }

    /// Expand a command-line range given in `unit`
    pub fn from_range(range: &RangeArg, unit: Unit) -> Result<Self, GridError> {
        Self::from_quantity(&Quantity::new(range.values(), unit))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.angstroms
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.angstroms
    }

    pub fn len(&self) -> usize {
        self.angstroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angstroms.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.angstroms[0]
    }

    pub fn max(&self) -> f64 {
        self.angstroms[self.angstroms.len() - 1]
    }

    /// The grid as a unit-tagged quantity in Angstroms
    pub fn to_quantity(&self) -> Quantity {
        Quantity::new(self.angstroms.clone(), Unit::ANGSTROM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sorts_input() {
        let grid = WavelengthGrid::new(vec![6000.0, 4000.0, 5000.0]).unwrap();
        assert_eq!(grid.as_slice(), &[4000.0, 5000.0, 6000.0]);
        assert_eq!(grid.min(), 4000.0);
        assert_eq!(grid.max(), 6000.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_eq!(WavelengthGrid::new(vec![]), Err(GridError::Empty));
        assert_eq!(
            WavelengthGrid::new(vec![5000.0, 0.0]),
            Err(GridError::NonPositive(0.0))
        );
        assert_eq!(
            WavelengthGrid::new(vec![5000.0, -1.0]),
            Err(GridError::NonPositive(-1.0))
        );
        assert!(matches!(
            WavelengthGrid::new(vec![5000.0, f64::NAN]),
            Err(GridError::NonFinite(_))
        ));
        assert_eq!(
            WavelengthGrid::new(vec![5000.0, 4000.0, 5000.0]),
            Err(GridError::DuplicateWavelength(5000.0))
        );
    }

    #[test]
    fn test_from_wavenumber_quantity() {
        let x = Quantity::new(vec![1.0, 2.0, 4.0], Unit::InverseMicron);
        let grid = WavelengthGrid::from_quantity(&x).unwrap();
        assert_relative_eq!(grid.as_slice()[0], 2500.0, epsilon = 1e-9);
        assert_relative_eq!(grid.as_slice()[2], 10000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_flux_quantity_fails() {
        let flux = Quantity::new(vec![1.0], Unit::FLAM);
        assert!(matches!(
            WavelengthGrid::from_quantity(&flux),
            Err(GridError::Unit(UnitError::IncompatibleUnits { .. }))
        ));
    }

    #[test]
    fn test_spacing_helpers() {
        let grid = WavelengthGrid::linear(3000.0, 4000.0, 250.0).unwrap();
        assert_eq!(grid.len(), 5);

        let grid = WavelengthGrid::log_spaced(1000.0, 100000.0, 3).unwrap();
        assert_relative_eq!(grid.as_slice()[1], 10000.0, max_relative = 1e-12);

        assert!(matches!(
            WavelengthGrid::log_spaced(0.0, 1000.0, 3),
            Err(GridError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn test_from_range_in_microns() {
        let range: RangeArg = "0.4:0.6:0.1".parse().unwrap();
        let grid = WavelengthGrid::from_range(&range, Unit::MICRON).unwrap();
        assert_eq!(grid.len(), 3);
        assert_relative_eq!(grid.as_slice()[1], 5000.0, max_relative = 1e-12);
    }
}
