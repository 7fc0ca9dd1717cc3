//! Plain-text flux tables.
//!
//! Two numeric columns per row, wavelength then flux, separated by
//! whitespace or commas. Blank lines and lines starting with `#` are
//! skipped; anything after the second column is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use shared::units::{Quantity, Unit};
use thiserror::Error;

use crate::photometry::{Extrapolation, SourceSpectrum, SpectrumError};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read flux table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 'wavelength flux', got '{content}'")]
    Parse { line: usize, content: String },

    #[error("flux table has no data rows")]
    Empty,
}

/// Unit-tagged columns of a flux table
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTable {
    pub wavelengths: Quantity,
    pub flux: Quantity,
}

impl SpectrumTable {
    pub fn into_spectrum(self, extrapolation: Extrapolation) -> Result<SourceSpectrum, SpectrumError> {
        SourceSpectrum::from_table(&self.wavelengths, &self.flux, extrapolation)
    }
}

/// Source of tabulated spectra (archive products, local files, ...)
pub trait SpectrumLoader: Send + Sync {
    fn load(&self, source: &str) -> Result<SpectrumTable, TableError>;
}

/// Parse raw `(wavelength, flux)` rows, in file order
pub fn parse_flux_table<R: Read>(reader: R) -> Result<Vec<(f64, f64)>, TableError> {
    let mut rows = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parse_error = || TableError::Parse {
            line: index + 1,
            content: trimmed.to_string(),
        };

        let mut fields = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|field| !field.is_empty());
        let wavelength = fields
            .next()
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(parse_error)?;
        let flux = fields
            .next()
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(parse_error)?;

        rows.push((wavelength, flux));
    }

    if rows.is_empty() {
        return Err(TableError::Empty);
    }
    Ok(rows)
}

pub fn read_flux_table(path: &Path) -> Result<Vec<(f64, f64)>, TableError> {
    parse_flux_table(File::open(path)?)
}

/// Loads flux tables from files relative to a root directory
#[derive(Debug, Clone)]
pub struct FileSpectrumLoader {
    root: PathBuf,
    wavelength_unit: Unit,
    flux_unit: Unit,
}

impl FileSpectrumLoader {
    pub fn new(root: impl Into<PathBuf>, wavelength_unit: Unit, flux_unit: Unit) -> Self {
        Self {
            root: root.into(),
            wavelength_unit,
            flux_unit,
        }
    }
}

impl SpectrumLoader for FileSpectrumLoader {
    fn load(&self, source: &str) -> Result<SpectrumTable, TableError> {
        let (wavelengths, flux): (Vec<f64>, Vec<f64>) =
            read_flux_table(&self.root.join(source))?.into_iter().unzip();
        Ok(SpectrumTable {
            wavelengths: Quantity::new(wavelengths, self.wavelength_unit),
            flux: Quantity::new(flux, self.flux_unit),
        })
    }
}
