//! Crate-level error type.
//!
//! Every module has its own `thiserror` enum; [`Error`] wraps them so that
//! callers juggling several modules (the CLI, the photometric extinction
//! pipeline) can use a single `?`. [`Error::kind`] reports the failure class
//! by name.

use shared::units::UnitError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::extinction::ExtinctionError;
use crate::grid::GridError;
use crate::io::TableError;
use crate::photometry::{SpectralElementError, SpectrumError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Extinction(#[from] ExtinctionError),

    #[error(transparent)]
    SpectralElement(#[from] SpectralElementError),

    #[error(transparent)]
    Spectrum(#[from] SpectrumError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Failure class, e.g. "WavelengthOutOfRange" or "ZeroThroughput"
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Unit(err) => unit_error_kind(err),
            Error::Grid(err) => err.kind(),
            Error::Extinction(err) => err.kind(),
            Error::SpectralElement(err) => err.kind(),
            Error::Spectrum(err) => err.kind(),
            Error::Table(_) | Error::Config(_) => "InvalidInput",
        }
    }
}

pub(crate) fn unit_error_kind(err: &UnitError) -> &'static str {
    match err {
        UnitError::IncompatibleUnits { .. } => "IncompatibleUnits",
        UnitError::MissingConversionContext { .. } => "MissingConversionContext",
        UnitError::NonPositiveFlux(_) => "NonPositiveFlux",
        _ => "InvalidInput",
    }
}
