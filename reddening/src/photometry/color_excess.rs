//! Photometric extinction and color excess.
//!
//! The extinction a band actually measures is the magnitude difference
//! between the reddened and the intrinsic spectrum observed through it,
//! not A(λ) at some nominal band wavelength: the band integral weights the
//! extinction curve by the source's own spectral shape.

use log::info;
use rayon::prelude::*;
use serde::Serialize;
use shared::algo::{merge_grids, refine_grid};

use super::observation::{ObserveMode, ObserveOptions, Observation};
use super::spectral_element::SpectralElement;
use super::spectrum::SourceSpectrum;
use super::zero_point::PhotometricSystem;
use crate::extinction::{ExtinctionCurve, RangePolicy};
use crate::grid::WavelengthGrid;

/// A(band) = m(with dust) − m(without dust)
pub fn extinction(with_dust: &Observation, without_dust: &Observation) -> f64 {
    with_dust.magnitude() - without_dust.magnitude()
}

/// E(band − reference) = A(band) − A(reference)
pub fn color_excess(extinction_at_band: f64, extinction_at_reference: f64) -> f64 {
    extinction_at_band - extinction_at_reference
}

/// One band's photometric extinction measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotometricExtinction {
    pub band: String,
    /// Effective wavelength of the reddened spectrum, Angstroms
    pub effective_wavelength_aa: f64,
    /// Effective wavelength of the intrinsic spectrum, Angstroms
    pub intrinsic_effective_wavelength_aa: f64,
    pub extinction: f64,
    pub color_excess: f64,
}

impl From<ObserveMode> for RangePolicy {
    fn from(mode: ObserveMode) -> Self {
        match mode {
            ObserveMode::Strict => RangePolicy::Strict,
            ObserveMode::Extrapolate => RangePolicy::Extrapolate,
        }
    }
}

/// Redden `spectrum` by `av` magnitudes of visual extinction under `law` and
/// measure A and E(band − reference) in every band.
///
/// The reddening curve is tabulated on the union of all band tables,
/// including the reference band, refined to the integration step.
pub fn photometric_extinction(
    spectrum: &SourceSpectrum,
    law: &dyn ExtinctionCurve,
    av: f64,
    bands: &[SpectralElement],
    reference: &SpectralElement,
    system: &PhotometricSystem,
    options: &ObserveOptions,
) -> Result<Vec<PhotometricExtinction>, crate::Error> {
    options.validate()?;

    let knots = bands
        .iter()
        .fold(reference.knots().to_vec(), |acc, band| merge_grids(&acc, band.knots()));
    let grid = WavelengthGrid::new(refine_grid(&knots, options.max_step_aa))?;
    let curve = law.reddening_curve(av, &grid, options.mode.into())?;
    let reddened = spectrum.redden(&curve);

    let measure = |band: &SpectralElement| -> Result<PhotometricExtinction, crate::Error> {
        let with_dust = Observation::new(&reddened, band, system, options)?;
        let without_dust = Observation::new(spectrum, band, system, options)?;
        Ok(PhotometricExtinction {
            band: with_dust.band().to_string(),
            effective_wavelength_aa: with_dust.effective_wavelength(),
            intrinsic_effective_wavelength_aa: without_dust.effective_wavelength(),
            extinction: extinction(&with_dust, &without_dust),
            color_excess: 0.0,
        })
    };

    let reference_row = measure(reference)?;
    info!(
        "{} Av={av}: A({}) = {:.4}",
        law.name(),
        reference_row.band,
        reference_row.extinction
    );

    bands
        .par_iter()
        .map(|band| -> Result<PhotometricExtinction, crate::Error> {
            let mut row = measure(band)?;
            row.color_excess = color_excess(row.extinction, reference_row.extinction);
            Ok(row)
        })
        .collect()
}
