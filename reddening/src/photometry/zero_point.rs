//! Photometric zero-point systems.
//!
//! A [`PhotometricSystem`] pairs a name with the reference spectrum whose
//! effective flux through a band defines magnitude zero in that band.

use once_cell::sync::Lazy;
use shared::units::{Quantity, CGS};

use super::spectral_element::Extrapolation;
use super::spectrum::{SourceSpectrum, SpectrumError};
use super::stellar::blackbody_flam;

/// Effective temperature of the Vega approximation, K
pub const VEGA_TEMPERATURE_K: f64 = 9602.0;

/// Vega flux density at [`VEGA_REFERENCE_WAVELENGTH_AA`], FLAM
pub const VEGA_REFERENCE_FLAM: f64 = 3.44e-9;

pub const VEGA_REFERENCE_WAVELENGTH_AA: f64 = 5556.0;

static VEGA: Lazy<Result<PhotometricSystem, SpectrumError>> = Lazy::new(|| {
    let scale = VEGA_REFERENCE_FLAM / blackbody_flam(VEGA_TEMPERATURE_K, VEGA_REFERENCE_WAVELENGTH_AA);
    let reference = SourceSpectrum::blackbody(VEGA_TEMPERATURE_K)?.scaled(scale)?;
    Ok(PhotometricSystem::new("vega", reference))
});

/// A named reference spectrum defining magnitude zero
#[derive(Debug, Clone)]
pub struct PhotometricSystem {
    name: String,
    reference: SourceSpectrum,
}

impl PhotometricSystem {
    pub fn new(name: impl Into<String>, reference: SourceSpectrum) -> Self {
        Self {
            name: name.into(),
            reference,
        }
    }

    /// Vega-relative magnitudes, approximating Vega as a 9602 K blackbody
    /// pinned to 3.44×10⁻⁹ FLAM at 5556 Å
    pub fn vega() -> Result<Self, SpectrumError> {
        (*VEGA).clone()
    }

    /// AB magnitudes: a flat F_ν of 3631 Jy
    pub fn ab() -> Result<Self, SpectrumError> {
        Ok(Self::new(
            "ab",
            SourceSpectrum::flat_fnu(CGS::AB_ZERO_POINT_FLUX_DENSITY)?,
        ))
    }

    /// ST magnitudes: a flat F_λ of 3.63×10⁻⁹ FLAM
    pub fn st() -> Result<Self, SpectrumError> {
        Ok(Self::new(
            "st",
            SourceSpectrum::flat_flam(CGS::ST_ZERO_POINT_FLUX_DENSITY)?,
        ))
    }

    /// Look up one of the built-in systems by case-insensitive name
    pub fn by_name(name: &str) -> Result<Self, SpectrumError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "vega" | "vegamag" => Self::vega(),
            "ab" | "abmag" => Self::ab(),
            "st" | "stmag" => Self::st(),
            _ => Err(SpectrumError::UnknownSystem(name.to_string())),
        }
    }

    /// Build a system from a reference spectrum supplied by a loader.
    ///
    /// The table is zero-filled outside its wavelength coverage.
    pub fn from_loader(name: &str, loader: &dyn ZeroPointLoader) -> Result<Self, SpectrumError> {
        let table = loader.load(name)?;
        let reference = SourceSpectrum::from_table(&table.wavelengths, &table.flux, Extrapolation::Zero)?;
        Ok(Self::new(name, reference))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &SourceSpectrum {
        &self.reference
    }
}

/// Reference spectrum table as delivered by a zero-point source
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroPointTable {
    pub wavelengths: Quantity,
    pub flux: Quantity,
}

/// Source of standard-star spectra (a CALSPEC mirror, a local directory, ...)
pub trait ZeroPointLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<ZeroPointTable, SpectrumError>;
}
