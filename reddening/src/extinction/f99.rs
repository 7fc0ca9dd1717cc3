//! Fitzpatrick (1999) R(V)-dependent extinction law.
//!
//! Ultraviolet (λ ≤ 2700 Å): the Fitzpatrick & Massa (1990) parametrization
//!
//! E(x−V)/E(B−V) = c1 + c2·x + c3·D(x; x0, γ) + c4·F(x)
//!
//! with the Drude bump D = x² / ((x² − x0²)² + x²γ²) and the far-UV
//! curvature F(x) = 0.5392(x − 5.9)² + 0.05644(x − 5.9)³ for x ≥ 5.9.
//! c1 and c2 follow R(V); c3, c4, x0 and γ are fixed at their average
//! Galactic values.
//!
//! Optical and infrared: a natural cubic spline in x through anchor points
//! at 26500, 12200, 6000, 5470, 4670 and 4110 Å plus x = 0, joined
//! to the UV curve through two anchors at 2700 and 2600 Å.
//!
//! The anchors put A(5470 Å)/A(V) at 1.0016 − 0.05/R(V), so both branches
//! are divided by that value to pin the curve to exactly 1 at the V anchor.

use crate::algo::CubicSpline;

use super::{check_parameter, ExtinctionCurve, ExtinctionError, RV_RANGE};

const C3: f64 = 3.23;
const C4: f64 = 0.41;
const X0: f64 = 4.596;
const GAMMA: f64 = 0.99;

/// Wavenumber above which the FM90 curve is used directly, μm⁻¹
const X_UV_CUTOFF: f64 = 1e4 / 2700.0;

/// Optical/IR spline anchors, Angstroms (x = 0 is added separately)
const OPTICAL_ANCHORS_AA: [f64; 6] = [26500.0, 12200.0, 6000.0, 5470.0, 4670.0, 4110.0];

/// UV anchors that tie the spline to the FM90 curve, Angstroms
const UV_ANCHORS_AA: [f64; 2] = [2700.0, 2600.0];

/// Wavelength in Angstroms of the V-band anchor
const V_ANCHOR_AA: f64 = 5470.0;

#[derive(Debug, Clone)]
pub struct Fitzpatrick99 {
    rv: f64,
    c1: f64,
    c2: f64,
    spline: CubicSpline,
    /// Unnormalized A(λ)/A(V) at the V anchor
    v_anchor: f64,
}

impl Fitzpatrick99 {
    pub fn new(rv: f64) -> Result<Self, ExtinctionError> {
        check_parameter("Rv", rv, RV_RANGE)?;

        let c2 = -0.824 + 4.717 / rv;
        let c1 = 2.030 - 3.007 * c2;

        // A(λ)/E(B−V) at the optical/IR anchors
        let optical = [
            0.265 * rv / 3.1,
            0.829 * rv / 3.1,
            -0.426 + 1.0044 * rv,
            -0.050 + 1.0016 * rv,
            0.701 + 1.0016 * rv,
            1.208 + 1.0032 * rv - 0.00033 * rv * rv,
        ];

        let mut x = vec![0.0];
        let mut y = vec![0.0];
        for (&wavelength, &a_over_ebv) in OPTICAL_ANCHORS_AA.iter().zip(optical.iter()) {
            x.push(1e4 / wavelength);
            y.push(a_over_ebv / rv);
        }
        for &wavelength in &UV_ANCHORS_AA {
            let xi = 1e4 / wavelength;
            x.push(xi);
            y.push(1.0 + fm90(xi, c1, c2) / rv);
        }

        let spline = CubicSpline::new(x, y)?;
        let v_anchor = spline.evaluate(1e4 / V_ANCHOR_AA);
        Ok(Self {
            rv,
            c1,
            c2,
            spline,
            v_anchor,
        })
    }
}

/// FM90 E(x−V)/E(B−V)
fn fm90(x: f64, c1: f64, c2: f64) -> f64 {
    let x2 = x * x;
    let drude = x2 / ((x2 - X0 * X0).powi(2) + x2 * GAMMA * GAMMA);
    let curvature = if x >= 5.9 {
        let y = x - 5.9;
        0.5392 * y * y + 0.05644 * y * y * y
    } else {
        0.0
    };
    c1 + c2 * x + C3 * drude + C4 * curvature
}

impl ExtinctionCurve for Fitzpatrick99 {
    fn name(&self) -> &'static str {
        "f99"
    }

    fn rv(&self) -> f64 {
        self.rv
    }

    fn reference_wavelength(&self) -> f64 {
        V_ANCHOR_AA
    }

    fn a_over_av(&self, x: f64) -> f64 {
        let unnormalized = if x >= X_UV_CUTOFF {
            1.0 + fm90(x, self.c1, self.c2) / self.rv
        } else {
            self.spline.evaluate(x)
        };
        unnormalized / self.v_anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extinction::RangePolicy;
    use approx::assert_relative_eq;

    #[test]
    fn test_v_anchor_value() {
        for rv in [2.0, 3.1, 5.0, 6.0] {
            let law = Fitzpatrick99::new(rv).unwrap();
            assert_relative_eq!(law.v_anchor, 1.0016 - 0.050 / rv, epsilon = 1e-9);
            let value = law.at_wavelength(V_ANCHOR_AA, RangePolicy::Strict).unwrap();
            assert_relative_eq!(value, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_spline_meets_uv_curve() {
        let law = Fitzpatrick99::new(3.1).unwrap();
        let below = law.a_over_av(X_UV_CUTOFF - 1e-9);
        let above = law.a_over_av(X_UV_CUTOFF);
        assert_relative_eq!(below, above, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_at_infinite_wavelength() {
        let law = Fitzpatrick99::new(3.1).unwrap();
        assert_relative_eq!(law.a_over_av(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rv_dependence_in_uv() {
        // Lower R(V) means steeper UV extinction relative to V
        let low = Fitzpatrick99::new(2.5).unwrap();
        let high = Fitzpatrick99::new(5.5).unwrap();
        assert!(low.a_over_av(7.0) > high.a_over_av(7.0));
    }

    #[test]
    fn test_fm90_constants() {
        let law = Fitzpatrick99::new(3.1).unwrap();
        assert_relative_eq!(law.c2, -0.824 + 4.717 / 3.1, epsilon = 1e-12);
        assert_relative_eq!(law.c1, 2.030 - 3.007 * law.c2, epsilon = 1e-12);
    }
}
