//! Built-in broadband passbands for synthetic photometry.
//!
//! Approximate transmission curves of the standard optical and near-infrared
//! broadband systems:
//!
//! - **U, B, V**: Johnson bands as tabulated by Bessell (1990)
//! - **R, I**: Cousins bands, Bessell (1990)
//! - **J, H, K**: Bessell & Brett (1988) near-infrared bands
//!
//! Optical curves are tabulated in nanometers, near-infrared curves in
//! micrometers, exactly as they are usually quoted; conversion to the
//! internal Angstrom grid happens through the unit layer when the curve is
//! loaded. All curves are zero at both ends and zero-filled outside.
//!
//! # Example
//! ```rust
//! use reddening::photometry::filters::passband;
//!
//! let v = passband("johnson_v").unwrap();
//! assert!((v.at(5300.0).unwrap() - 1.0).abs() < 1e-9);
//! assert_eq!(v.at(8000.0).unwrap(), 0.0);
//! ```

use shared::units::{Quantity, Unit};

use super::spectral_element::{
    PassbandLoader, PassbandTable, SpectralElement, SpectralElementError,
};

/// Johnson U, (nm, transmission)
const JOHNSON_U: &[(f64, f64)] = &[
    (300.0, 0.000),
    (305.0, 0.016),
    (310.0, 0.068),
    (315.0, 0.167),
    (320.0, 0.287),
    (325.0, 0.423),
    (330.0, 0.560),
    (335.0, 0.673),
    (340.0, 0.772),
    (345.0, 0.841),
    (350.0, 0.905),
    (355.0, 0.943),
    (360.0, 0.981),
    (365.0, 0.993),
    (370.0, 1.000),
    (375.0, 0.989),
    (380.0, 0.916),
    (385.0, 0.804),
    (390.0, 0.625),
    (395.0, 0.423),
    (400.0, 0.238),
    (405.0, 0.114),
    (410.0, 0.051),
    (415.0, 0.019),
    (420.0, 0.000),
];

/// Johnson B, (nm, transmission)
const JOHNSON_B: &[(f64, f64)] = &[
    (360.0, 0.000),
    (370.0, 0.030),
    (380.0, 0.134),
    (390.0, 0.567),
    (400.0, 0.920),
    (410.0, 0.978),
    (420.0, 1.000),
    (430.0, 0.978),
    (440.0, 0.935),
    (450.0, 0.853),
    (460.0, 0.740),
    (470.0, 0.640),
    (480.0, 0.536),
    (490.0, 0.424),
    (500.0, 0.325),
    (510.0, 0.235),
    (520.0, 0.150),
    (530.0, 0.095),
    (540.0, 0.043),
    (550.0, 0.009),
    (560.0, 0.000),
];

/// Johnson V, (nm, transmission)
const JOHNSON_V: &[(f64, f64)] = &[
    (470.0, 0.000),
    (480.0, 0.030),
    (490.0, 0.163),
    (500.0, 0.458),
    (510.0, 0.780),
    (520.0, 0.967),
    (530.0, 1.000),
    (540.0, 0.973),
    (550.0, 0.898),
    (560.0, 0.792),
    (570.0, 0.684),
    (580.0, 0.574),
    (590.0, 0.461),
    (600.0, 0.359),
    (610.0, 0.270),
    (620.0, 0.197),
    (630.0, 0.135),
    (640.0, 0.081),
    (650.0, 0.045),
    (660.0, 0.025),
    (670.0, 0.017),
    (680.0, 0.013),
    (690.0, 0.009),
    (700.0, 0.000),
];

/// Cousins R, (nm, transmission)
const COUSINS_R: &[(f64, f64)] = &[
    (550.0, 0.00),
    (560.0, 0.23),
    (570.0, 0.74),
    (580.0, 0.91),
    (590.0, 0.98),
    (600.0, 1.00),
    (610.0, 0.98),
    (620.0, 0.96),
    (630.0, 0.93),
    (640.0, 0.90),
    (650.0, 0.86),
    (660.0, 0.81),
    (670.0, 0.78),
    (680.0, 0.72),
    (690.0, 0.67),
    (700.0, 0.61),
    (710.0, 0.56),
    (720.0, 0.51),
    (730.0, 0.46),
    (740.0, 0.40),
    (750.0, 0.35),
    (800.0, 0.14),
    (850.0, 0.03),
    (900.0, 0.00),
];

/// Cousins I, (nm, transmission)
const COUSINS_I: &[(f64, f64)] = &[
    (700.0, 0.000),
    (710.0, 0.024),
    (720.0, 0.232),
    (730.0, 0.555),
    (740.0, 0.785),
    (750.0, 0.910),
    (760.0, 0.965),
    (770.0, 0.985),
    (780.0, 0.990),
    (790.0, 0.995),
    (800.0, 1.000),
    (810.0, 1.000),
    (820.0, 0.990),
    (830.0, 0.980),
    (840.0, 0.950),
    (850.0, 0.910),
    (860.0, 0.860),
    (870.0, 0.750),
    (880.0, 0.560),
    (890.0, 0.330),
    (900.0, 0.150),
    (910.0, 0.030),
    (920.0, 0.000),
];

/// Bessell & Brett J, (μm, transmission)
const BESSELL_J: &[(f64, f64)] = &[
    (1.04, 0.00),
    (1.06, 0.02),
    (1.08, 0.11),
    (1.10, 0.42),
    (1.12, 0.69),
    (1.14, 0.82),
    (1.16, 0.87),
    (1.18, 0.90),
    (1.20, 0.92),
    (1.22, 0.94),
    (1.24, 0.96),
    (1.26, 0.97),
    (1.28, 0.98),
    (1.30, 0.96),
    (1.32, 0.80),
    (1.34, 0.52),
    (1.36, 0.24),
    (1.38, 0.08),
    (1.40, 0.02),
    (1.42, 0.00),
];

/// Bessell & Brett H, (μm, transmission)
const BESSELL_H: &[(f64, f64)] = &[
    (1.46, 0.00),
    (1.48, 0.15),
    (1.50, 0.44),
    (1.52, 0.86),
    (1.54, 0.94),
    (1.56, 0.98),
    (1.58, 0.98),
    (1.60, 1.00),
    (1.62, 0.98),
    (1.64, 0.97),
    (1.66, 0.96),
    (1.68, 0.96),
    (1.70, 0.97),
    (1.72, 0.96),
    (1.74, 0.90),
    (1.76, 0.76),
    (1.78, 0.41),
    (1.80, 0.13),
    (1.82, 0.00),
];

/// Bessell & Brett K, (μm, transmission)
const BESSELL_K: &[(f64, f64)] = &[
    (1.96, 0.000),
    (1.98, 0.035),
    (2.00, 0.150),
    (2.02, 0.610),
    (2.04, 0.800),
    (2.06, 0.880),
    (2.08, 0.910),
    (2.10, 0.940),
    (2.12, 0.960),
    (2.14, 0.970),
    (2.16, 0.980),
    (2.18, 0.990),
    (2.20, 1.000),
    (2.24, 0.990),
    (2.28, 0.970),
    (2.32, 0.950),
    (2.36, 0.930),
    (2.40, 0.860),
    (2.44, 0.740),
    (2.48, 0.570),
    (2.52, 0.370),
    (2.56, 0.210),
    (2.60, 0.100),
    (2.64, 0.040),
    (2.70, 0.000),
];

/// Names accepted by [`BuiltinPassbands`], blue to red
pub const BUILTIN_PASSBAND_NAMES: &[&str] = &[
    "johnson_u",
    "johnson_b",
    "johnson_v",
    "cousins_r",
    "cousins_i",
    "bessel_j",
    "bessel_h",
    "bessel_k",
];

fn lookup(name: &str) -> Option<(&'static [(f64, f64)], Unit)> {
    let entry = match name {
        "johnson_u" => (JOHNSON_U, Unit::NANOMETER),
        "johnson_b" => (JOHNSON_B, Unit::NANOMETER),
        "johnson_v" => (JOHNSON_V, Unit::NANOMETER),
        "cousins_r" => (COUSINS_R, Unit::NANOMETER),
        "cousins_i" => (COUSINS_I, Unit::NANOMETER),
        "bessel_j" => (BESSELL_J, Unit::MICRON),
        "bessel_h" => (BESSELL_H, Unit::MICRON),
        "bessel_k" => (BESSELL_K, Unit::MICRON),
        _ => return None,
    };
    Some(entry)
}

/// Passband loader backed by the compiled-in tables
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPassbands;

impl PassbandLoader for BuiltinPassbands {
    fn load(&self, name: &str) -> Result<PassbandTable, SpectralElementError> {
        let normalized = name.trim().to_ascii_lowercase();
        let (table, unit) = lookup(&normalized)
            .ok_or_else(|| SpectralElementError::UnknownPassband(name.to_string()))?;

        let (wavelengths, transmission): (Vec<f64>, Vec<f64>) = table.iter().copied().unzip();
        Ok(PassbandTable {
            wavelengths: Quantity::new(wavelengths, unit),
            transmission,
        })
    }
}

/// Load a built-in passband by name
pub fn passband(name: &str) -> Result<SpectralElement, SpectralElementError> {
    SpectralElement::from_filter_name(name, &BuiltinPassbands)
}

/// Parse a comma-separated list of passband names, e.g. `"johnson_b,johnson_v"`
pub fn passband_list(names: &str) -> Result<Vec<SpectralElement>, SpectralElementError> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(passband)
        .collect()
}
