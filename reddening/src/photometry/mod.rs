//! Synthetic photometry of reddened spectra.
//!
//! - [`spectral_element`]: passbands and transmission curves
//! - [`spectrum`]: source spectra (blackbody, flat, tabulated, reddened)
//! - [`zero_point`]: photometric systems and their reference spectra
//! - [`observation`]: band-integrated flux, effective wavelength, magnitude
//! - [`color_excess`]: photometric extinction and E(band − reference)

pub mod color_excess;
pub mod filters;
pub mod observation;
pub mod spectral_element;
pub mod spectrum;
pub mod stellar;
pub mod zero_point;

pub use color_excess::{color_excess, extinction, photometric_extinction, PhotometricExtinction};
pub use filters::{passband, passband_list, BuiltinPassbands};
pub use observation::{observe_all, Observation, ObserveMode, ObserveOptions, Weighting};
pub use spectral_element::{
    Extrapolation, PassbandLoader, PassbandTable, SpectralElement, SpectralElementError,
};
pub use spectrum::{Normalization, SourceSpectrum, SpectrumError};
pub use zero_point::{PhotometricSystem, ZeroPointLoader, ZeroPointTable};
