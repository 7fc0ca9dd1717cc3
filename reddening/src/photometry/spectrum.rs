//! Source spectra: flux density as a function of wavelength.
//!
//! A [`SourceSpectrum`] evaluates F_λ in FLAM (erg s⁻¹ cm⁻² Å⁻¹) at any
//! wavelength in Angstroms. Spectra are immutable values; scaling,
//! normalization, reddening and dereddening all return new spectra that
//! share the underlying model through an `Arc`.
//!
//! # Models
//! - **Blackbody**: Planck continuum at a given temperature
//! - **Flat F_ν / flat F_λ**: constant flux density per frequency or wavelength
//! - **Tabulated**: measured or archival fluxes with an extrapolation policy
//! - **Product**: another spectrum multiplied by (or divided by) a spectral element

use std::sync::Arc;

use log::debug;
use shared::algo::{interp, merge_grids};
use shared::units::{fnu_to_flam, Quantity, Temperature, TemperatureExt, Unit, UnitError};
use thiserror::Error;

use super::observation::{Observation, ObserveOptions};
use super::spectral_element::{Extrapolation, SpectralElement, SpectralElementError};
use super::stellar::blackbody_flam;
use super::zero_point::PhotometricSystem;
use crate::grid::{GridError, WavelengthGrid};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("blackbody temperature must be positive and finite, got {0} K")]
    InvalidTemperature(f64),

    #[error("flux scale factor must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("spectrum contains non-finite flux {0}")]
    NonFiniteFlux(f64),

    #[error("wavelength table has {wavelengths} entries but flux table has {fluxes}")]
    LengthMismatch { wavelengths: usize, fluxes: usize },

    #[error("WavelengthOutOfRange: {wavelength} Å is outside the tabulated spectrum [{min}, {max}] Å")]
    OutOfDomain { wavelength: f64, min: f64, max: f64 },

    #[error("DomainMismatch: band '{band}' spans [{}, {}] Å but the spectrum covers only [{}, {}] Å", .needed.0, .needed.1, .available.0, .available.1)]
    DomainMismatch {
        band: String,
        needed: (f64, f64),
        available: (f64, f64),
    },

    #[error("ZeroThroughput: band '{band}' has zero integrated throughput against {against}")]
    ZeroThroughput { band: String, against: String },

    #[error("integration step must be at least {min} Å, got {step}")]
    InvalidStep { step: f64, min: f64 },

    #[error("unknown photometric system '{0}' (expected vega, ab or st)")]
    UnknownSystem(String),

    #[error(transparent)]
    Element(#[from] SpectralElementError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl SpectrumError {
    pub fn kind(&self) -> &'static str {
        match self {
            SpectrumError::OutOfDomain { .. } => "WavelengthOutOfRange",
            SpectrumError::DomainMismatch { .. } => "DomainMismatch",
            SpectrumError::ZeroThroughput { .. } => "ZeroThroughput",
            SpectrumError::Element(err) => err.kind(),
            SpectrumError::Grid(err) => err.kind(),
            SpectrumError::Unit(err) => crate::error::unit_error_kind(err),
            _ => "InvalidInput",
        }
    }
}

/// Whether a spectrum's flux level has been pinned to a magnitude
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Normalization {
    #[default]
    Raw,
    Normalized {
        magnitude: f64,
        band: String,
        system: String,
    },
}

#[derive(Debug)]
enum SpectrumModel {
    Blackbody {
        temperature: Temperature,
    },
    FlatFnu {
        fnu: f64,
    },
    FlatFlam {
        flam: f64,
    },
    Tabulated {
        wavelengths: Vec<f64>,
        flam: Vec<f64>,
        extrapolation: Extrapolation,
    },
    Product {
        base: SourceSpectrum,
        element: SpectralElement,
        inverse: bool,
    },
}

/// Flux density model F_λ(λ) in FLAM
#[derive(Debug, Clone)]
pub struct SourceSpectrum {
    model: Arc<SpectrumModel>,
    scale: f64,
    normalization: Normalization,
}

impl SourceSpectrum {
    fn from_model(model: SpectrumModel) -> Self {
        Self {
            model: Arc::new(model),
            scale: 1.0,
            normalization: Normalization::Raw,
        }
    }

    /// Planck continuum of a solar-radius star at 1 kpc
    pub fn blackbody(temperature_k: f64) -> Result<Self, SpectrumError> {
        Self::from_temperature(Temperature::from_kelvin(temperature_k))
    }

    /// Planck continuum at a temperature given in any unit
    pub fn from_temperature(temperature: Temperature) -> Result<Self, SpectrumError> {
        let kelvin = temperature.as_kelvin();
        if !(kelvin.is_finite() && kelvin > 0.0) {
            return Err(SpectrumError::InvalidTemperature(kelvin));
        }
        Ok(Self::from_model(SpectrumModel::Blackbody { temperature }))
    }

    /// Constant F_ν in erg s⁻¹ cm⁻² Hz⁻¹
    pub fn flat_fnu(fnu: f64) -> Result<Self, SpectrumError> {
        if !fnu.is_finite() {
            return Err(SpectrumError::NonFiniteFlux(fnu));
        }
        Ok(Self::from_model(SpectrumModel::FlatFnu { fnu }))
    }

    /// Constant F_λ in FLAM
    pub fn flat_flam(flam: f64) -> Result<Self, SpectrumError> {
        if !flam.is_finite() {
            return Err(SpectrumError::NonFiniteFlux(flam));
        }
        Ok(Self::from_model(SpectrumModel::FlatFlam { flam }))
    }

    /// Tabulated spectrum from unit-tagged wavelengths and fluxes.
    ///
    /// Fluxes in any supported flux unit are converted to FLAM using the
    /// wavelength of each row. Rows are sorted by wavelength.
    pub fn from_table(
        wavelengths: &Quantity,
        flux: &Quantity,
        extrapolation: Extrapolation,
    ) -> Result<Self, SpectrumError> {
        if wavelengths.len() != flux.len() {
            return Err(SpectrumError::LengthMismatch {
                wavelengths: wavelengths.len(),
                fluxes: flux.len(),
            });
        }
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;
        let flam = flux.to_with_context(Unit::FLAM, Some(&angstroms))?;
        Self::from_flam(angstroms.into_values(), flam.into_values(), extrapolation)
    }

    /// Tabulated spectrum with wavelengths in Angstroms and fluxes in FLAM
    pub fn from_flam(
        wavelengths_aa: Vec<f64>,
        flam: Vec<f64>,
        extrapolation: Extrapolation,
    ) -> Result<Self, SpectrumError> {
        if wavelengths_aa.len() != flam.len() {
            return Err(SpectrumError::LengthMismatch {
                wavelengths: wavelengths_aa.len(),
                fluxes: flam.len(),
            });
        }
        if let Some(&bad) = flam.iter().find(|v| !v.is_finite()) {
            return Err(SpectrumError::NonFiniteFlux(bad));
        }

        let mut rows: Vec<(f64, f64)> = wavelengths_aa.into_iter().zip(flam).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (wavelengths, flam): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();
        let grid = WavelengthGrid::new(wavelengths)?;

        Ok(Self::from_model(SpectrumModel::Tabulated {
            wavelengths: grid.into_vec(),
            flam,
            extrapolation,
        }))
    }

    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    /// Overall multiplicative flux scale relative to the underlying model
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Tabulated wavelength span, `None` for analytic spectra.
    ///
    /// A product is restricted further only by an element that cannot be
    /// evaluated past its own table.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match self.model.as_ref() {
            SpectrumModel::Tabulated { wavelengths, .. } => {
                Some((wavelengths[0], wavelengths[wavelengths.len() - 1]))
            }
            SpectrumModel::Product { base, element, .. } => {
                if element.extrapolation() != Extrapolation::Error {
                    return base.domain();
                }
                let (lower, upper) = element.domain();
                match base.domain() {
                    Some((min, max)) => Some((min.max(lower), max.min(upper))),
                    None => Some((lower, upper)),
                }
            }
            _ => None,
        }
    }

    /// Wavelengths at which the spectrum has structure worth sampling
    pub fn knots(&self) -> Vec<f64> {
        match self.model.as_ref() {
            SpectrumModel::Tabulated { wavelengths, .. } => wavelengths.clone(),
            SpectrumModel::Product { base, element, .. } => merge_grids(&base.knots(), element.knots()),
            _ => Vec::new(),
        }
    }

    /// F_λ in FLAM at a single wavelength in Angstroms
    pub fn at(&self, wavelength_aa: f64) -> Result<f64, SpectrumError> {
        let unscaled = match self.model.as_ref() {
            SpectrumModel::Blackbody { temperature } => {
                blackbody_flam(temperature.as_kelvin(), wavelength_aa)
            }
            SpectrumModel::FlatFnu { fnu } => fnu_to_flam(*fnu, wavelength_aa),
            SpectrumModel::FlatFlam { flam } => *flam,
            SpectrumModel::Tabulated {
                wavelengths,
                flam,
                extrapolation,
            } => tabulated_at(wavelengths, flam, *extrapolation, wavelength_aa)?,
            SpectrumModel::Product {
                base,
                element,
                inverse,
            } => {
                let factor = if *inverse {
                    element.reciprocal_at(wavelength_aa)?
                } else {
                    element.at(wavelength_aa)?
                };
                base.at(wavelength_aa)? * factor
            }
        };
        Ok(self.scale * unscaled)
    }

    /// F_λ in FLAM at many wavelengths in Angstroms
    pub fn evaluate(&self, wavelengths_aa: &[f64]) -> Result<Vec<f64>, SpectrumError> {
        wavelengths_aa.iter().map(|&w| self.at(w)).collect()
    }

    /// Flux density at unit-tagged wavelengths, returned in `unit`
    pub fn evaluate_quantity(&self, wavelengths: &Quantity, unit: Unit) -> Result<Quantity, SpectrumError> {
        let angstroms = wavelengths.to(Unit::ANGSTROM)?;
        let flam = Quantity::new(self.evaluate(angstroms.values())?, Unit::FLAM);
        Ok(flam.to_with_context(unit, Some(&angstroms))?)
    }

    /// Multiply the flux level by `factor`; the result is no longer normalized
    pub fn scaled(&self, factor: f64) -> Result<Self, SpectrumError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SpectrumError::InvalidScale(factor));
        }
        Ok(Self {
            model: Arc::clone(&self.model),
            scale: self.scale * factor,
            normalization: Normalization::Raw,
        })
    }

    /// Rescale so that the synthetic magnitude through `band` equals `target_magnitude`
    pub fn normalize(
        &self,
        target_magnitude: f64,
        band: &SpectralElement,
        system: &PhotometricSystem,
        options: &ObserveOptions,
    ) -> Result<Self, SpectrumError> {
        let observation = Observation::new(self, band, system, options)?;
        let factor = 10f64.powf(-0.4 * (target_magnitude - observation.magnitude()));
        debug!(
            "normalizing to {target_magnitude} mag in {}: observed {:.4}, scale factor {factor:.6e}",
            observation.band(),
            observation.magnitude()
        );

        let mut normalized = self.scaled(factor)?;
        normalized.normalization = Normalization::Normalized {
            magnitude: target_magnitude,
            band: observation.band().to_string(),
            system: system.name().to_string(),
        };
        Ok(normalized)
    }

    /// Multiply the flux pointwise by a transmission curve
    pub fn redden(&self, curve: &SpectralElement) -> Self {
        Self::from_model(SpectrumModel::Product {
            base: self.clone(),
            element: curve.clone(),
            inverse: false,
        })
    }

    /// Divide the flux pointwise by a transmission curve.
    ///
    /// Evaluating the result fails with `ZeroTransmission` wherever the
    /// curve is exactly zero.
    pub fn deredden(&self, curve: &SpectralElement) -> Self {
        Self::from_model(SpectrumModel::Product {
            base: self.clone(),
            element: curve.clone(),
            inverse: true,
        })
    }
}

fn tabulated_at(
    wavelengths: &[f64],
    flam: &[f64],
    extrapolation: Extrapolation,
    wavelength_aa: f64,
) -> Result<f64, SpectrumError> {
    let min = wavelengths[0];
    let max = wavelengths[wavelengths.len() - 1];
    let out_of_domain = SpectrumError::OutOfDomain {
        wavelength: wavelength_aa,
        min,
        max,
    };

    if (min..=max).contains(&wavelength_aa) {
        return interp(wavelength_aa, wavelengths, flam).map_err(|_| out_of_domain);
    }

    match extrapolation {
        Extrapolation::Error => Err(out_of_domain),
        Extrapolation::Zero => Ok(0.0),
        Extrapolation::Nearest if wavelength_aa < min => Ok(flam[0]),
        Extrapolation::Nearest => Ok(flam[flam.len() - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shared::units::CGS;

    fn table() -> SourceSpectrum {
        SourceSpectrum::from_flam(
            vec![5000.0, 4000.0, 6000.0],
            vec![2.0, 1.0, 3.0],
            Extrapolation::Error,
        )
        .unwrap()
    }

    #[test]
    fn test_tabulated_interpolation_and_domain() {
        let spectrum = table();
        assert_eq!(spectrum.domain(), Some((4000.0, 6000.0)));
        assert_relative_eq!(spectrum.at(4500.0).unwrap(), 1.5, epsilon = 1e-12);
        assert!(matches!(
            spectrum.at(7000.0),
            Err(SpectrumError::OutOfDomain { .. })
        ));
        assert_eq!(spectrum.at(7000.0).unwrap_err().kind(), "WavelengthOutOfRange");
    }

    #[test]
    fn test_from_table_converts_units() {
        let wavelengths = Quantity::new(vec![0.5, 0.6], Unit::MICRON);
        let flux = Quantity::new(vec![3631.0, 3631.0], Unit::JANSKY);
        let spectrum = SourceSpectrum::from_table(&wavelengths, &flux, Extrapolation::Zero).unwrap();

        let expected = fnu_to_flam(CGS::AB_ZERO_POINT_FLUX_DENSITY, 5000.0);
        assert_relative_eq!(spectrum.at(5000.0).unwrap(), expected, max_relative = 1e-9);
        assert_eq!(spectrum.at(9000.0).unwrap(), 0.0);
    }

    #[test]
    fn test_from_table_rejects_mismatch() {
        let wavelengths = Quantity::new(vec![5000.0, 6000.0], Unit::ANGSTROM);
        let flux = Quantity::new(vec![1.0], Unit::FLAM);
        assert!(matches!(
            SourceSpectrum::from_table(&wavelengths, &flux, Extrapolation::Zero),
            Err(SpectrumError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_flat_fnu_scales_as_inverse_square() {
        let spectrum = SourceSpectrum::flat_fnu(1e-26).unwrap();
        let ratio = spectrum.at(4000.0).unwrap() / spectrum.at(8000.0).unwrap();
        assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
        assert_eq!(spectrum.domain(), None);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            SourceSpectrum::blackbody(0.0),
            Err(SpectrumError::InvalidTemperature(_))
        ));
        assert!(matches!(
            SourceSpectrum::flat_flam(f64::INFINITY),
            Err(SpectrumError::NonFiniteFlux(_))
        ));
        assert!(matches!(
            table().scaled(-2.0),
            Err(SpectrumError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_blackbody_from_celsius() {
        let from_celsius = SourceSpectrum::from_temperature(Temperature::from_celsius(5526.85)).unwrap();
        let from_kelvin = SourceSpectrum::blackbody(5800.0).unwrap();
        assert_relative_eq!(
            from_celsius.at(5500.0).unwrap(),
            from_kelvin.at(5500.0).unwrap(),
            max_relative = 1e-9
        );
        assert!(matches!(
            SourceSpectrum::from_temperature(Temperature::from_celsius(-300.0)),
            Err(SpectrumError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn test_scaling_does_not_mutate_original() {
        let original = table();
        let doubled = original.scaled(2.0).unwrap();
        assert_relative_eq!(doubled.at(5000.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(original.at(5000.0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_redden_then_deredden_restores_flux() {
        let spectrum = SourceSpectrum::blackbody(8000.0).unwrap();
        let curve = SpectralElement::from_table(
            vec![3000.0, 5000.0, 9000.0],
            vec![0.2, 0.5, 0.9],
            Extrapolation::Nearest,
        )
        .unwrap();

        let restored = spectrum.redden(&curve).deredden(&curve);
        for wavelength in [3500.0, 5500.0, 8000.0] {
            assert_relative_eq!(
                restored.at(wavelength).unwrap(),
                spectrum.at(wavelength).unwrap(),
                max_relative = 1e-12
            );
        }
        assert_eq!(restored.domain(), None);
    }

    #[test]
    fn test_deredden_through_opaque_curve_fails() {
        let spectrum = SourceSpectrum::flat_flam(1.0).unwrap();
        let opaque = SpectralElement::from_table(
            vec![4000.0, 5000.0],
            vec![0.0, 1.0],
            Extrapolation::Nearest,
        )
        .unwrap();
        let dereddened = spectrum.deredden(&opaque);
        let err = dereddened.at(4000.0).unwrap_err();
        assert_eq!(err.kind(), "ZeroTransmission");
        assert!(dereddened.at(4500.0).is_ok());
    }

    #[test]
    fn test_evaluate_quantity_in_fnu() {
        let spectrum = SourceSpectrum::flat_fnu(2e-26).unwrap();
        let wavelengths = Quantity::new(vec![0.5, 2.0], Unit::MICRON);
        let fnu = spectrum.evaluate_quantity(&wavelengths, Unit::FNU).unwrap();
        assert_eq!(fnu.unit(), Unit::FNU);
        assert_relative_eq!(fnu.values()[0], 2e-26, max_relative = 1e-9);
        assert_relative_eq!(fnu.values()[1], 2e-26, max_relative = 1e-9);
    }

    #[test]
    fn test_product_knots_merge() {
        let curve = SpectralElement::from_table(
            vec![4500.0, 5000.0],
            vec![0.5, 0.6],
            Extrapolation::Nearest,
        )
        .unwrap();
        let knots = table().redden(&curve).knots();
        assert_eq!(knots, vec![4000.0, 4500.0, 5000.0, 6000.0]);
    }
}
