//! Parametric interstellar extinction laws.
//!
//! An extinction law gives A(λ)/A(V), the extinction at wavelength λ
//! relative to the visual band, as a function of the wavenumber
//! x = 1/λ [μm⁻¹] and the shape parameter R(V) = A(V)/E(B−V).
//!
//! # Available laws
//!
//! | name    | reference                          | form                                |
//! |---------|------------------------------------|-------------------------------------|
//! | `ccm89` | Cardelli, Clayton & Mathis (1989)  | piecewise polynomials in x          |
//! | `o94`   | O'Donnell (1994)                   | CCM89 with a refit optical segment  |
//! | `f99`   | Fitzpatrick (1999)                 | FM90 UV + cubic spline through anchors |
//!
//! All three are defined for 2.0 ≤ R(V) ≤ 6.0 and 0.3 ≤ x ≤ 10 μm⁻¹
//! (1000 Å to 3.33 μm). An R(V) outside that range is always rejected with
//! `ParameterOutOfRange`. Wavelengths outside the range are rejected under
//! [`RangePolicy::Strict`] and evaluated by continuing the edge segment's
//! formula under [`RangePolicy::Extrapolate`].
//!
//! # Example
//! ```rust
//! use reddening::extinction::{ExtinctionLaw, RangePolicy};
//! use shared::units::{Quantity, Unit};
//!
//! let law = ExtinctionLaw::Ccm89.build(3.1).unwrap();
//! let wavelengths = Quantity::new(vec![0.44, 0.55], Unit::MICRON);
//! let ratios = law.evaluate(&wavelengths, RangePolicy::Strict).unwrap();
//! assert!(ratios[0] > ratios[1]);
//! ```

pub mod ccm89;
pub mod f99;

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shared::units::{Quantity, Unit, UnitError};
use thiserror::Error;

use crate::algo::SplineError;
use crate::grid::WavelengthGrid;
use crate::photometry::{Extrapolation, SpectralElement, SpectralElementError};

pub use ccm89::PolynomialLaw;
pub use f99::Fitzpatrick99;

/// R(V) range shared by the built-in laws
pub const RV_RANGE: (f64, f64) = (2.0, 6.0);

/// Wavenumber range in μm⁻¹ shared by the built-in laws
pub const WAVENUMBER_RANGE: (f64, f64) = (0.3, 10.0);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtinctionError {
    #[error("ParameterOutOfRange: {parameter} = {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("WavelengthOutOfRange: {wavelength_um} μm is outside the {law} domain [{min_um:.4}, {max_um:.4}] μm")]
    WavelengthOutOfRange {
        law: &'static str,
        wavelength_um: f64,
        min_um: f64,
        max_um: f64,
    },

    #[error("unknown extinction law '{0}' (expected ccm89, o94 or f99)")]
    UnknownLaw(String),

    #[error(transparent)]
    Spline(#[from] SplineError),

    #[error(transparent)]
    Element(#[from] SpectralElementError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl ExtinctionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtinctionError::ParameterOutOfRange { .. } => "ParameterOutOfRange",
            ExtinctionError::WavelengthOutOfRange { .. } => "WavelengthOutOfRange",
            ExtinctionError::Element(err) => err.kind(),
            ExtinctionError::Unit(err) => crate::error::unit_error_kind(err),
            ExtinctionError::UnknownLaw(_) | ExtinctionError::Spline(_) => "InvalidInput",
        }
    }
}

/// What to do with wavelengths outside a law's defined domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    #[default]
    Strict,
    Extrapolate,
}

pub(crate) fn check_parameter(
    parameter: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ExtinctionError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ExtinctionError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// Capability interface of an extinction law bound to a particular R(V).
///
/// Implementors supply the raw A(λ)/A(V) formula in wavenumber; range
/// checking, unit handling and the derived transmission products come from
/// the provided methods.
pub trait ExtinctionCurve: Send + Sync {
    /// Short identifier, e.g. "ccm89"
    fn name(&self) -> &'static str;

    /// The R(V) this curve was built for
    fn rv(&self) -> f64;

    fn rv_range(&self) -> (f64, f64) {
        RV_RANGE
    }

    /// Defined wavenumber domain in μm⁻¹
    fn wavenumber_range(&self) -> (f64, f64) {
        WAVENUMBER_RANGE
    }

    /// Wavelength in Angstroms at which the law is normalized to A(λ)/A(V) = 1
    fn reference_wavelength(&self) -> f64;

    /// A(λ)/A(V) at wavenumber x in μm⁻¹, without any range check
    fn a_over_av(&self, x: f64) -> f64;

    /// A(λ)/A(V) at a single wavelength in Angstroms
    fn at_wavelength(&self, wavelength_aa: f64, policy: RangePolicy) -> Result<f64, ExtinctionError> {
        let (x_min, x_max) = self.wavenumber_range();
        let out_of_range = || ExtinctionError::WavelengthOutOfRange {
            law: self.name(),
            wavelength_um: wavelength_aa / 1e4,
            min_um: 1.0 / x_max,
            max_um: 1.0 / x_min,
        };

        if !(wavelength_aa.is_finite() && wavelength_aa > 0.0) {
            return Err(out_of_range());
        }

        let x = 1e4 / wavelength_aa;
        if !(x_min..=x_max).contains(&x) && policy == RangePolicy::Strict {
            return Err(out_of_range());
        }

        Ok(self.a_over_av(x))
    }

    /// A(λ)/A(V) for each wavelength, in input order
    fn evaluate(&self, wavelengths: &Quantity, policy: RangePolicy) -> Result<Vec<f64>, ExtinctionError> {
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;

        if policy == RangePolicy::Extrapolate {
            let (x_min, x_max) = self.wavenumber_range();
            let outside = angstroms
                .values()
                .iter()
                .filter(|&&aa| !(x_min..=x_max).contains(&(1e4 / aa)))
                .count();
            if outside > 0 {
                warn!(
                    "{}: extrapolating {} of {} wavelengths beyond {:.4}-{:.4} μm",
                    self.name(),
                    outside,
                    angstroms.len(),
                    1.0 / x_max,
                    1.0 / x_min
                );
            }
        }

        angstroms
            .values()
            .iter()
            .map(|&aa| self.at_wavelength(aa, policy))
            .collect()
    }

    /// Fraction of flux retained behind dust with color excess `ebv`:
    /// 10^(-0.4 × R(V) × E(B−V) × A(λ)/A(V))
    fn extinguish(
        &self,
        ebv: f64,
        wavelengths: &Quantity,
        policy: RangePolicy,
    ) -> Result<Vec<f64>, ExtinctionError> {
        check_parameter("Ebv", ebv, (0.0, f64::INFINITY))?;
        let av = self.rv() * ebv;
        Ok(self
            .evaluate(wavelengths, policy)?
            .into_iter()
            .map(|ratio| 10f64.powf(-0.4 * av * ratio))
            .collect())
    }

    /// Transmission curve 10^(-0.4 × A(V) × A(λ)/A(V)) tabulated on `grid`.
    ///
    /// The curve holds its edge values beyond the grid.
    fn reddening_curve(
        &self,
        av: f64,
        grid: &WavelengthGrid,
        policy: RangePolicy,
    ) -> Result<SpectralElement, ExtinctionError> {
        check_parameter("Av", av, (0.0, f64::INFINITY))?;

        let transmission = self
            .evaluate(&grid.to_quantity(), policy)?
            .into_iter()
            .map(|ratio| 10f64.powf(-0.4 * av * ratio))
            .collect();

        debug!(
            "{} reddening curve: Rv={} Av={} on {} samples",
            self.name(),
            self.rv(),
            av,
            grid.len()
        );

        let element =
            SpectralElement::from_table(grid.as_slice().to_vec(), transmission, Extrapolation::Nearest)?;
        Ok(element.with_name(format!("{}(Rv={}, Av={})", self.name(), self.rv(), av)))
    }
}

/// The closed set of built-in extinction laws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtinctionLaw {
    Ccm89,
    O94,
    F99,
}

impl ExtinctionLaw {
    pub const ALL: [ExtinctionLaw; 3] = [ExtinctionLaw::Ccm89, ExtinctionLaw::O94, ExtinctionLaw::F99];

    /// Instantiate the law for a given R(V)
    pub fn build(self, rv: f64) -> Result<Box<dyn ExtinctionCurve>, ExtinctionError> {
        debug!("building {self} extinction law with Rv={rv}");
        let curve: Box<dyn ExtinctionCurve> = match self {
            ExtinctionLaw::Ccm89 => Box::new(PolynomialLaw::ccm89(rv)?),
            ExtinctionLaw::O94 => Box::new(PolynomialLaw::o94(rv)?),
            ExtinctionLaw::F99 => Box::new(Fitzpatrick99::new(rv)?),
        };
        Ok(curve)
    }
}

impl fmt::Display for ExtinctionLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtinctionLaw::Ccm89 => "ccm89",
            ExtinctionLaw::O94 => "o94",
            ExtinctionLaw::F99 => "f99",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ExtinctionLaw {
    type Err = ExtinctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ccm89" | "ccm" | "cardelli" => Ok(ExtinctionLaw::Ccm89),
            "o94" | "odonnell" => Ok(ExtinctionLaw::O94),
            "f99" | "fitzpatrick" => Ok(ExtinctionLaw::F99),
            _ => Err(ExtinctionError::UnknownLaw(s.to_string())),
        }
    }
}

/// A(λ)/A(V) for `law` at R(V) = `rv`
pub fn evaluate(
    law: ExtinctionLaw,
    rv: f64,
    wavelengths: &Quantity,
    policy: RangePolicy,
) -> Result<Vec<f64>, ExtinctionError> {
    law.build(rv)?.evaluate(wavelengths, policy)
}

/// Transmission 10^(-0.4 × R(V) × E(B−V) × A(λ)/A(V)) for `law`
pub fn extinguish(
    law: ExtinctionLaw,
    rv: f64,
    ebv: f64,
    wavelengths: &Quantity,
    policy: RangePolicy,
) -> Result<Vec<f64>, ExtinctionError> {
    law.build(rv)?.extinguish(ebv, wavelengths, policy)
}
