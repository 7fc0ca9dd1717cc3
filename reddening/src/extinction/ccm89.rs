//! Cardelli, Clayton & Mathis (1989) and O'Donnell (1994) extinction laws.
//!
//! Both laws write A(λ)/A(V) = a(x) + b(x)/R(V) with x = 1/λ [μm⁻¹] and
//! piecewise a(x), b(x):
//!
//! - **Infrared** (x < 1.1): power laws in x^1.61
//! - **Optical/NIR** (1.1 ≤ x < 3.3): polynomials in y = x − 1.82
//! - **Ultraviolet** (3.3 ≤ x < 8): linear rise, Drude-like 2175 Å bump,
//!   and a far-UV curvature term above x = 5.9
//! - **Far UV** (x ≥ 8): cubics in x − 8
//!
//! O'Donnell (1994) replaces only the optical polynomials. Because a(0) = 1
//! and b(0) = 0 in both fits, A(λ)/A(V) is exactly 1 at x = 1.82 μm⁻¹
//! (5494.5 Å) for every R(V).

use super::{check_parameter, ExtinctionCurve, ExtinctionError, RV_RANGE};

/// Optical-segment polynomial coefficients in ascending powers of y = x − 1.82
#[derive(Debug)]
pub struct OpticalFit {
    name: &'static str,
    a: &'static [f64],
    b: &'static [f64],
}

pub static CCM89_OPTICAL: OpticalFit = OpticalFit {
    name: "ccm89",
    a: &[
        1.0, 0.17699, -0.50447, -0.02427, 0.72085, 0.01979, -0.77530, 0.32999,
    ],
    b: &[
        0.0, 1.41338, 2.28305, 1.07233, -5.38434, -0.62251, 5.30260, -2.09002,
    ],
};

pub static O94_OPTICAL: OpticalFit = OpticalFit {
    name: "o94",
    a: &[
        1.0, 0.104, -0.609, 0.701, 1.137, -1.718, -0.827, 1.647, -0.505,
    ],
    b: &[
        0.0, 1.952, 2.908, -3.989, -7.985, 11.102, 5.491, -10.805, 3.347,
    ],
};

/// Wavenumber of the V-band normalization point, μm⁻¹
const X_V: f64 = 1.82;

fn horner(coefficients: &[f64], y: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * y + c)
}

/// The a(x), b(x) pair of the Cardelli framework
fn cardelli_ab(x: f64, optical: &OpticalFit) -> (f64, f64) {
    if x < 1.1 {
        let p = x.powf(1.61);
        (0.574 * p, -0.527 * p)
    } else if x < 3.3 {
        let y = x - X_V;
        (horner(optical.a, y), horner(optical.b, y))
    } else if x < 8.0 {
        let (fa, fb) = if x >= 5.9 {
            let y = x - 5.9;
            (
                -0.04473 * y * y - 0.009779 * y * y * y,
                0.2130 * y * y + 0.1207 * y * y * y,
            )
        } else {
            (0.0, 0.0)
        };
        let a = 1.752 - 0.316 * x - 0.104 / ((x - 4.67).powi(2) + 0.341) + fa;
        let b = -3.090 + 1.825 * x + 1.206 / ((x - 4.62).powi(2) + 0.263) + fb;
        (a, b)
    } else {
        let y = x - 8.0;
        let a = -1.073 - 0.628 * y + 0.137 * y * y - 0.070 * y * y * y;
        let b = 13.670 + 4.257 * y - 0.420 * y * y + 0.374 * y * y * y;
        (a, b)
    }
}

/// CCM89-style law: A(λ)/A(V) = a(x) + b(x)/R(V)
#[derive(Debug, Clone, Copy)]
pub struct PolynomialLaw {
    rv: f64,
    optical: &'static OpticalFit,
}

impl PolynomialLaw {
    /// Cardelli, Clayton & Mathis (1989)
    pub fn ccm89(rv: f64) -> Result<Self, ExtinctionError> {
        Self::with_optical_fit(rv, &CCM89_OPTICAL)
    }

    /// O'Donnell (1994) optical coefficients on the CCM89 framework
    pub fn o94(rv: f64) -> Result<Self, ExtinctionError> {
        Self::with_optical_fit(rv, &O94_OPTICAL)
    }

    fn with_optical_fit(rv: f64, optical: &'static OpticalFit) -> Result<Self, ExtinctionError> {
        check_parameter("Rv", rv, RV_RANGE)?;
        Ok(Self { rv, optical })
    }
}

impl ExtinctionCurve for PolynomialLaw {
    fn name(&self) -> &'static str {
        self.optical.name
    }

    fn rv(&self) -> f64 {
        self.rv
    }

    fn reference_wavelength(&self) -> f64 {
        1e4 / X_V
    }

    fn a_over_av(&self, x: f64) -> f64 {
        let (a, b) = cardelli_ab(x, self.optical);
        a + b / self.rv
    }
}
