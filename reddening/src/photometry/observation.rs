//! Synthetic photometry: a source spectrum observed through a passband.
//!
//! For band transmission W(λ) and flux density F(λ):
//!
//! - effective flux       ⟨F⟩ = ∫ W F dλ / ∫ W dλ
//! - effective wavelength λ_eff = ∫ λ W F dλ / ∫ W F dλ
//! - magnitude            m = −2.5 log₁₀(⟨F⟩ / ⟨F_zp⟩)
//!
//! where F_zp is the reference spectrum of the photometric system. The
//! integrals use the trapezoidal rule on the union of the band's and the
//! spectrum's tabulated wavelengths within the band support, subdivided so
//! that no interval exceeds `max_step_aa`. Under photon-counting weighting
//! W(λ) is replaced by λ·W(λ) throughout.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared::algo::{merge_grids, refine_grid};
use shared::units::flux_to_magnitude;

use super::spectral_element::SpectralElement;
use super::spectrum::{SourceSpectrum, SpectrumError};
use super::zero_point::PhotometricSystem;
use crate::algo::trapezoid;

/// How a spectrum that does not cover the band is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserveMode {
    /// Fail with `DomainMismatch`
    #[default]
    Strict,
    /// Fill gaps with the spectrum's own extrapolation policy
    Extrapolate,
}

/// Detector response convention for the band integrals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Energy-integrating detector (bolometer-like)
    #[default]
    Energy,
    /// Photon-counting detector (CCD-like); weights by λ
    PhotonCounting,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveOptions {
    pub mode: ObserveMode,
    /// Largest integration step in Angstroms
    pub max_step_aa: f64,
    pub weighting: Weighting,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            mode: ObserveMode::Strict,
            max_step_aa: 10.0,
            weighting: Weighting::Energy,
        }
    }
}

impl ObserveOptions {
    /// Smallest accepted integration step, Angstroms
    pub const MIN_STEP_AA: f64 = 0.01;

    pub fn with_mode(mut self, mode: ObserveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject integration steps that would refine band grids without bound
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if self.max_step_aa.is_finite() && self.max_step_aa >= Self::MIN_STEP_AA {
            Ok(())
        } else {
            Err(SpectrumError::InvalidStep {
                step: self.max_step_aa,
                min: Self::MIN_STEP_AA,
            })
        }
    }
}

/// Band-integrated photometry of one spectrum, computed on construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    band: String,
    system: String,
    effective_flux: f64,
    effective_wavelength: f64,
    zero_point_flux: f64,
    magnitude: f64,
}

/// Band integrals ∫W, ∫WF and ∫λWF
struct BandIntegrals {
    throughput: f64,
    flux: f64,
    first_moment: f64,
}

impl Observation {
    pub fn new(
        spectrum: &SourceSpectrum,
        band: &SpectralElement,
        system: &PhotometricSystem,
        options: &ObserveOptions,
    ) -> Result<Self, SpectrumError> {
        let band_name = band.name().unwrap_or("unnamed").to_string();

        let integrals = integrate(spectrum, band, &band_name, options)?;
        if integrals.flux == 0.0 {
            return Err(SpectrumError::ZeroThroughput {
                band: band_name,
                against: "source spectrum".to_string(),
            });
        }
        let effective_flux = integrals.flux / integrals.throughput;
        let effective_wavelength = integrals.first_moment / integrals.flux;

        let zero_point_options = options.with_mode(ObserveMode::Extrapolate);
        let reference = integrate(system.reference(), band, &band_name, &zero_point_options)?;
        if reference.flux == 0.0 {
            return Err(SpectrumError::ZeroThroughput {
                band: band_name,
                against: format!("{} zero point", system.name()),
            });
        }
        let zero_point_flux = reference.flux / reference.throughput;

        let magnitude = flux_to_magnitude(effective_flux, zero_point_flux)?;

        Ok(Self {
            band: band_name,
            system: system.name().to_string(),
            effective_flux,
            effective_wavelength,
            zero_point_flux,
            magnitude,
        })
    }

    pub fn band(&self) -> &str {
        &self.band
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    /// Throughput-weighted mean flux density, FLAM
    pub fn effective_flux(&self) -> f64 {
        self.effective_flux
    }

    /// Flux-weighted mean wavelength, Angstroms
    pub fn effective_wavelength(&self) -> f64 {
        self.effective_wavelength
    }

    /// Effective flux of the zero-point spectrum through the same band, FLAM
    pub fn zero_point_flux(&self) -> f64 {
        self.zero_point_flux
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

fn integrate(
    spectrum: &SourceSpectrum,
    band: &SpectralElement,
    band_name: &str,
    options: &ObserveOptions,
) -> Result<BandIntegrals, SpectrumError> {
    options.validate()?;

    let (lower, upper) = band.support().ok_or_else(|| SpectrumError::ZeroThroughput {
        band: band_name.to_string(),
        against: "its own transmission".to_string(),
    })?;

    if let Some((min, max)) = spectrum.domain() {
        if min > lower || max < upper {
            match options.mode {
                ObserveMode::Strict => {
                    return Err(SpectrumError::DomainMismatch {
                        band: band_name.to_string(),
                        needed: (lower, upper),
                        available: (min, max),
                    })
                }
                ObserveMode::Extrapolate => warn!(
                    "spectrum covers [{min}, {max}] Å but band '{band_name}' needs [{lower}, {upper}] Å; extrapolating"
                ),
            }
        }
    }

    let inside = |w: &f64| (lower..=upper).contains(w);
    let band_knots: Vec<f64> = band.knots().iter().copied().filter(inside).collect();
    let spectrum_knots: Vec<f64> = spectrum.knots().into_iter().filter(inside).collect();
    let grid = refine_grid(&merge_grids(&band_knots, &spectrum_knots), options.max_step_aa);

    let mut weights = band.evaluate(&grid)?;
    if options.weighting == Weighting::PhotonCounting {
        for (weight, &w) in weights.iter_mut().zip(grid.iter()) {
            *weight *= w;
        }
    }
    let flux = spectrum.evaluate(&grid)?;

    let weighted: Vec<f64> = weights.iter().zip(flux.iter()).map(|(&t, &f)| t * f).collect();
    let moment: Vec<f64> = weighted.iter().zip(grid.iter()).map(|(&wf, &w)| wf * w).collect();

    let throughput = trapezoid(&grid, &weights);
    if throughput <= 0.0 {
        return Err(SpectrumError::ZeroThroughput {
            band: band_name.to_string(),
            against: "its own transmission".to_string(),
        });
    }

    debug!(
        "band '{band_name}': integrating over [{lower:.1}, {upper:.1}] Å on {} samples",
        grid.len()
    );

    Ok(BandIntegrals {
        throughput,
        flux: trapezoid(&grid, &weighted),
        first_moment: trapezoid(&grid, &moment),
    })
}

/// Observe one spectrum through many bands in parallel
pub fn observe_all(
    spectrum: &SourceSpectrum,
    bands: &[SpectralElement],
    system: &PhotometricSystem,
    options: &ObserveOptions,
) -> Result<Vec<Observation>, SpectrumError> {
    bands
        .par_iter()
        .map(|band| Observation::new(spectrum, band, system, options))
        .collect()
}
