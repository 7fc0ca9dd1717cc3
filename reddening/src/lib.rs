//! Interstellar extinction laws and synthetic photometry of reddened spectra.
//!
//! - [`extinction`]: parametric A(λ)/A(V) laws (CCM89, O94, F99)
//! - [`photometry`]: spectral elements, source spectra, band observations
//!   and color excesses
//! - [`grid`]: validated wavelength grids
//! - [`io`], [`config`]: flux tables and CLI configuration

pub mod algo;
pub mod config;
pub mod error;
pub mod extinction;
pub mod grid;
pub mod io;
pub mod photometry;

pub use error::Error;
