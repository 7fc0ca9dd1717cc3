//! Blackbody stellar continua.
//!
//! The Planck law in CGS units, expressed as a flux density per Angstrom
//! (FLAM) as seen from Earth for a star of one solar radius at 1 kpc:
//!
//! F_λ = π B_λ(T) (R☉ / 1 kpc)²
//!
//! with B_λ(T) = 2hc²/λ⁵ / (exp(hc/λkT) − 1). The distance scaling only
//! fixes an arbitrary but physically sized normalization; spectra are
//! usually renormalized to a target magnitude anyway.

use shared::units::CGS;

/// Solar radius in cm
pub const SOLAR_RADIUS_CM: f64 = 6.957e10;

/// One kiloparsec in cm
pub const KILOPARSEC_CM: f64 = 3.085_677_581e21;

/// Planck spectral radiance B_λ(T) in erg s⁻¹ cm⁻² sr⁻¹ Å⁻¹
///
/// Returns 0.0 where the Wien tail underflows.
pub fn planck_radiance(temperature_k: f64, wavelength_aa: f64) -> f64 {
    let wavelength_cm = wavelength_aa / CGS::ANGSTROMS_PER_CM;
    let hc = CGS::PLANCK_CONSTANT * CGS::SPEED_OF_LIGHT;
    let exponent = hc / (wavelength_cm * CGS::BOLTZMANN_CONSTANT * temperature_k);

    // exp_m1 keeps precision in the Rayleigh-Jeans limit
    let denominator = exponent.exp_m1();
    if !denominator.is_finite() {
        return 0.0;
    }

    let per_cm = 2.0 * hc * CGS::SPEED_OF_LIGHT / wavelength_cm.powi(5) / denominator;
    per_cm / CGS::ANGSTROMS_PER_CM
}

/// Blackbody flux density in FLAM for a solar-radius star at 1 kpc
pub fn blackbody_flam(temperature_k: f64, wavelength_aa: f64) -> f64 {
    let dilution = (SOLAR_RADIUS_CM / KILOPARSEC_CM).powi(2);
    std::f64::consts::PI * planck_radiance(temperature_k, wavelength_aa) * dilution
}

/// Wavelength of peak F_λ from Wien's displacement law, in Angstroms
pub fn wien_peak_aa(temperature_k: f64) -> f64 {
    // b = 0.28977719 cm K
    0.289_777_19 / temperature_k * CGS::ANGSTROMS_PER_CM
}
