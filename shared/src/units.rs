//! Unit-tagged quantities for spectral photometry.
//!
//! Numeric arrays travel through the reddening tools together with the unit
//! they are expressed in. Conversions are explicit and fail loudly: there is
//! no implicit rescaling, and flux densities never change between their
//! per-wavelength (Fλ) and per-frequency (Fν) forms without a spectral
//! coordinate to do it with.
//!
//! # Supported dimensions
//!
//! - **Spectral axis**: length (Å, nm, μm, cm, m), frequency (Hz, GHz, THz)
//!   and wavenumber (μm⁻¹). Any spectral unit converts to any other.
//! - **Flux density**: FLAM (erg s⁻¹ cm⁻² Å⁻¹), PHOTLAM
//!   (photons s⁻¹ cm⁻² Å⁻¹), FNU (erg s⁻¹ cm⁻² Hz⁻¹), Jy and mJy.
//! - **Magnitudes**: AB and ST magnitudes, which are flux densities on a
//!   logarithmic scale with a fixed zero point.
//! - **Dimensionless**: transmissions and extinction ratios.
//!
//! Length and frequency scaling is delegated to `uom`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::f64::{Frequency, Length, ThermodynamicTemperature};
use uom::si::frequency::{gigahertz, hertz, terahertz};
use uom::si::length::{angstrom, centimeter, meter, micrometer, nanometer};
use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};

/// Physical constants in CGS units.
pub struct CGS {}

impl CGS {
    /// AB magnitude system zero-point flux density
    /// Units: 3631e-23 erg s⁻¹ cm⁻² Hz⁻¹
    pub const AB_ZERO_POINT_FLUX_DENSITY: f64 = 3631e-23;

    /// ST magnitude system zero-point flux density, 10^(-0.4 × 21.10)
    /// Units: erg s⁻¹ cm⁻² Å⁻¹
    pub const ST_ZERO_POINT_FLUX_DENSITY: f64 = 3.630_780_547_701_003e-9;

    /// 1 Jansky in CGS units
    /// Units: 1e-23 erg s⁻¹ cm⁻² Hz⁻¹
    pub const JANSKY_IN_CGS: f64 = 1e-23;

    /// Planck's constant
    /// Units: 6.62607015e-27 erg⋅s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-27;

    /// Boltzmann's constant
    /// Units: 1.380649e-16 erg K⁻¹
    pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-16;

    /// Speed of light in vacuum
    /// Units: 2.99792458e10 cm/s
    pub const SPEED_OF_LIGHT: f64 = 2.99792458e10;

    /// Angstroms in one centimeter
    pub const ANGSTROMS_PER_CM: f64 = 1e8;
}

/// Type alias for temperature with convenient methods
pub type Temperature = ThermodynamicTemperature;

/// Extension trait for temperature conversions
pub trait TemperatureExt {
    /// Create temperature from degrees Celsius
    fn from_celsius(celsius: f64) -> Self;

    /// Get temperature in degrees Celsius
    fn as_celsius(&self) -> f64;

    /// Create temperature from Kelvin
    fn from_kelvin(kelvin: f64) -> Self;

    /// Get temperature in Kelvin
    fn as_kelvin(&self) -> f64;
}

impl TemperatureExt for Temperature {
    fn from_celsius(celsius: f64) -> Self {
        Temperature::new::<degree_celsius>(celsius)
    }

    fn as_celsius(&self) -> f64 {
        self.get::<degree_celsius>()
    }

    fn from_kelvin(value: f64) -> Self {
        Temperature::new::<kelvin>(value)
    }

    fn as_kelvin(&self) -> f64 {
        self.get::<kelvin>()
    }
}

/// Parse a temperature such as `5800`, `5800K` or `5526.85 C`.
///
/// A bare number is read as Kelvin.
pub fn parse_temperature(s: &str) -> Result<Temperature, UnitError> {
    let trimmed = s.trim();
    let invalid = || UnitError::InvalidTemperature(s.to_string());

    let (number, from_value): (&str, fn(f64) -> Temperature) =
        if let Some(number) = trimmed.strip_suffix("°C").or_else(|| trimmed.strip_suffix(['C', 'c'])) {
            (number, Temperature::from_celsius)
        } else if let Some(number) = trimmed.strip_suffix(['K', 'k']) {
            (number, Temperature::from_kelvin)
        } else {
            (trimmed, Temperature::from_kelvin)
        };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(from_value(value))
}

/// Extension trait for the wavelength scales used in spectrophotometry
pub trait WavelengthExt {
    /// Create a length from Angstroms
    fn from_angstroms(aa: f64) -> Self;

    /// Get length in Angstroms
    fn as_angstroms(&self) -> f64;

    /// Create a length from micrometers
    fn from_micrometers(um: f64) -> Self;

    /// Get length in micrometers
    fn as_micrometers(&self) -> f64;
}

impl WavelengthExt for Length {
    fn from_angstroms(aa: f64) -> Self {
        Length::new::<angstrom>(aa)
    }

    fn as_angstroms(&self) -> f64 {
        self.get::<angstrom>()
    }

    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }
}

/// Errors raised by unit conversions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("IncompatibleUnits: cannot convert {from} to {to}")]
    IncompatibleUnits { from: Unit, to: Unit },

    #[error("MissingConversionContext: converting {from} to {to} requires a wavelength or frequency")]
    MissingConversionContext { from: Unit, to: Unit },

    #[error("conversion context has {found} values but {expected} are required (or exactly 1)")]
    ContextLengthMismatch { expected: usize, found: usize },

    #[error("NonPositiveFlux: flux {0} cannot be expressed as a magnitude")]
    NonPositiveFlux(f64),

    #[error("spectral coordinate {0} must be positive to invert between wavelength and frequency")]
    NonPositiveSpectralValue(f64),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid temperature '{0}' (expected e.g. 5800, 5800K or 5526.85C)")]
    InvalidTemperature(String),
}

/// Length units for wavelengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Angstrom,
    Nanometer,
    Micrometer,
    Centimeter,
    Meter,
}

impl LengthUnit {
    fn to_length(self, value: f64) -> Length {
        match self {
            LengthUnit::Angstrom => Length::new::<angstrom>(value),
            LengthUnit::Nanometer => Length::new::<nanometer>(value),
            LengthUnit::Micrometer => Length::new::<micrometer>(value),
            LengthUnit::Centimeter => Length::new::<centimeter>(value),
            LengthUnit::Meter => Length::new::<meter>(value),
        }
    }

    fn from_length(self, length: Length) -> f64 {
        match self {
            LengthUnit::Angstrom => length.get::<angstrom>(),
            LengthUnit::Nanometer => length.get::<nanometer>(),
            LengthUnit::Micrometer => length.get::<micrometer>(),
            LengthUnit::Centimeter => length.get::<centimeter>(),
            LengthUnit::Meter => length.get::<meter>(),
        }
    }
}

/// Frequency units for spectral coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyUnit {
    Hertz,
    Gigahertz,
    Terahertz,
}

impl FrequencyUnit {
    fn to_frequency(self, value: f64) -> Frequency {
        match self {
            FrequencyUnit::Hertz => Frequency::new::<hertz>(value),
            FrequencyUnit::Gigahertz => Frequency::new::<gigahertz>(value),
            FrequencyUnit::Terahertz => Frequency::new::<terahertz>(value),
        }
    }

    fn from_frequency(self, frequency: Frequency) -> f64 {
        match self {
            FrequencyUnit::Hertz => frequency.get::<hertz>(),
            FrequencyUnit::Gigahertz => frequency.get::<gigahertz>(),
            FrequencyUnit::Terahertz => frequency.get::<terahertz>(),
        }
    }
}

/// Linear flux density units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxDensityUnit {
    /// erg s⁻¹ cm⁻² Å⁻¹
    Flam,
    /// photons s⁻¹ cm⁻² Å⁻¹
    Photlam,
    /// erg s⁻¹ cm⁻² Hz⁻¹
    Fnu,
    /// 1e-23 erg s⁻¹ cm⁻² Hz⁻¹
    Jansky,
    /// 1e-26 erg s⁻¹ cm⁻² Hz⁻¹
    Millijansky,
}

/// Self-defining magnitude systems that behave like flux units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagnitudeUnit {
    /// -2.5 log10(Fν / 3631 Jy)
    #[serde(rename = "ab")]
    AB,
    /// -2.5 log10(Fλ) - 21.10
    #[serde(rename = "st")]
    ST,
}

/// A physical unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Length(LengthUnit),
    Frequency(FrequencyUnit),
    /// Wavenumber in μm⁻¹, the natural axis of extinction laws
    InverseMicron,
    FluxDensity(FluxDensityUnit),
    Magnitude(MagnitudeUnit),
    Dimensionless,
}

impl Unit {
    pub const ANGSTROM: Unit = Unit::Length(LengthUnit::Angstrom);
    pub const NANOMETER: Unit = Unit::Length(LengthUnit::Nanometer);
    pub const MICRON: Unit = Unit::Length(LengthUnit::Micrometer);
    pub const HERTZ: Unit = Unit::Frequency(FrequencyUnit::Hertz);
    pub const FLAM: Unit = Unit::FluxDensity(FluxDensityUnit::Flam);
    pub const PHOTLAM: Unit = Unit::FluxDensity(FluxDensityUnit::Photlam);
    pub const FNU: Unit = Unit::FluxDensity(FluxDensityUnit::Fnu);
    pub const JANSKY: Unit = Unit::FluxDensity(FluxDensityUnit::Jansky);
    pub const AB_MAG: Unit = Unit::Magnitude(MagnitudeUnit::AB);
    pub const ST_MAG: Unit = Unit::Magnitude(MagnitudeUnit::ST);

    /// True for units that locate a point on the spectrum
    pub fn is_spectral_axis(&self) -> bool {
        matches!(
            self,
            Unit::Length(_) | Unit::Frequency(_) | Unit::InverseMicron
        )
    }

    /// True for linear and logarithmic flux density units
    pub fn is_flux(&self) -> bool {
        matches!(self, Unit::FluxDensity(_) | Unit::Magnitude(_))
    }

    fn flux_family(&self) -> Option<FluxFamily> {
        match self {
            Unit::FluxDensity(FluxDensityUnit::Flam) | Unit::Magnitude(MagnitudeUnit::ST) => {
                Some(FluxFamily::PerWavelength)
            }
            Unit::FluxDensity(FluxDensityUnit::Photlam) => Some(FluxFamily::Photon),
            Unit::FluxDensity(FluxDensityUnit::Fnu)
            | Unit::FluxDensity(FluxDensityUnit::Jansky)
            | Unit::FluxDensity(FluxDensityUnit::Millijansky)
            | Unit::Magnitude(MagnitudeUnit::AB) => Some(FluxFamily::PerFrequency),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Length(LengthUnit::Angstrom) => "angstrom",
            Unit::Length(LengthUnit::Nanometer) => "nm",
            Unit::Length(LengthUnit::Micrometer) => "micron",
            Unit::Length(LengthUnit::Centimeter) => "cm",
            Unit::Length(LengthUnit::Meter) => "m",
            Unit::Frequency(FrequencyUnit::Hertz) => "Hz",
            Unit::Frequency(FrequencyUnit::Gigahertz) => "GHz",
            Unit::Frequency(FrequencyUnit::Terahertz) => "THz",
            Unit::InverseMicron => "1/micron",
            Unit::FluxDensity(FluxDensityUnit::Flam) => "FLAM",
            Unit::FluxDensity(FluxDensityUnit::Photlam) => "PHOTLAM",
            Unit::FluxDensity(FluxDensityUnit::Fnu) => "FNU",
            Unit::FluxDensity(FluxDensityUnit::Jansky) => "Jy",
            Unit::FluxDensity(FluxDensityUnit::Millijansky) => "mJy",
            Unit::Magnitude(MagnitudeUnit::AB) => "ABmag",
            Unit::Magnitude(MagnitudeUnit::ST) => "STmag",
            Unit::Dimensionless => "dimensionless",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "angstrom" | "aa" | "a" | "å" => Unit::ANGSTROM,
            "nm" | "nanometer" => Unit::NANOMETER,
            "um" | "micron" | "micrometer" | "μm" | "µm" => Unit::MICRON,
            "cm" | "centimeter" => Unit::Length(LengthUnit::Centimeter),
            "m" | "meter" => Unit::Length(LengthUnit::Meter),
            "hz" => Unit::HERTZ,
            "ghz" => Unit::Frequency(FrequencyUnit::Gigahertz),
            "thz" => Unit::Frequency(FrequencyUnit::Terahertz),
            "1/um" | "1/micron" | "inverse_micron" => Unit::InverseMicron,
            "flam" => Unit::FLAM,
            "photlam" => Unit::PHOTLAM,
            "fnu" => Unit::FNU,
            "jy" | "jansky" => Unit::JANSKY,
            "mjy" | "millijansky" => Unit::FluxDensity(FluxDensityUnit::Millijansky),
            "abmag" => Unit::AB_MAG,
            "stmag" => Unit::ST_MAG,
            "" | "dimensionless" => Unit::Dimensionless,
            _ => return Err(UnitError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FluxFamily {
    PerWavelength,
    PerFrequency,
    Photon,
}

/// A numeric array tagged with a physical unit.
///
/// Quantities are immutable values: every conversion returns a new quantity
/// and leaves the original untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    values: Vec<f64>,
    unit: Unit,
}

impl Quantity {
    /// Tag an array of values with a unit
    pub fn new(values: Vec<f64>, unit: Unit) -> Self {
        Self { values, unit }
    }

    /// Tag a single value with a unit
    pub fn scalar(value: f64, unit: Unit) -> Self {
        Self::new(vec![value], unit)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to another unit that needs no spectral context
    pub fn to(&self, target: Unit) -> Result<Quantity, UnitError> {
        self.to_with_context(target, None)
    }

    /// Convert to another unit, supplying the spectral coordinate of each value.
    ///
    /// `context` must carry a spectral-axis unit and hold either one value
    /// (applied to every element) or exactly one value per element.
    pub fn to_with_context(
        &self,
        target: Unit,
        context: Option<&Quantity>,
    ) -> Result<Quantity, UnitError> {
        let values = convert(&self.values, self.unit, target, context)?;
        Ok(Quantity::new(values, target))
    }
}

/// Convert raw values between units.
///
/// # Errors
/// - `IncompatibleUnits` when the dimensions differ (e.g. length to flux)
/// - `MissingConversionContext` when a flux conversion needs a wavelength
/// - `NonPositiveFlux` when a non-positive flux is asked for as a magnitude
pub fn convert(
    values: &[f64],
    from: Unit,
    to: Unit,
    context: Option<&Quantity>,
) -> Result<Vec<f64>, UnitError> {
    if from == to {
        return Ok(values.to_vec());
    }

    if from.is_spectral_axis() && to.is_spectral_axis() {
        return values
            .iter()
            .map(|&v| spectral_from_angstrom(spectral_to_angstrom(v, from)?, to))
            .collect();
    }

    if from.is_flux() && to.is_flux() {
        return convert_flux(values, from, to, context);
    }

    Err(UnitError::IncompatibleUnits { from, to })
}

fn spectral_to_angstrom(value: f64, unit: Unit) -> Result<f64, UnitError> {
    match unit {
        Unit::Length(lu) => Ok(lu.to_length(value).as_angstroms()),
        Unit::Frequency(fu) => {
            let hz = fu.to_frequency(value).get::<hertz>();
            if hz <= 0.0 {
                return Err(UnitError::NonPositiveSpectralValue(value));
            }
            Ok(CGS::SPEED_OF_LIGHT / hz * CGS::ANGSTROMS_PER_CM)
        }
        Unit::InverseMicron => {
            if value <= 0.0 {
                return Err(UnitError::NonPositiveSpectralValue(value));
            }
            Ok(Length::from_micrometers(1.0 / value).as_angstroms())
        }
        other => Err(UnitError::IncompatibleUnits {
            from: other,
            to: Unit::ANGSTROM,
        }),
    }
}

fn spectral_from_angstrom(value_aa: f64, unit: Unit) -> Result<f64, UnitError> {
    match unit {
        Unit::Length(lu) => Ok(lu.from_length(Length::from_angstroms(value_aa))),
        Unit::Frequency(fu) => {
            if value_aa <= 0.0 {
                return Err(UnitError::NonPositiveSpectralValue(value_aa));
            }
            let hz = CGS::SPEED_OF_LIGHT / (value_aa / CGS::ANGSTROMS_PER_CM);
            Ok(fu.from_frequency(Frequency::new::<hertz>(hz)))
        }
        Unit::InverseMicron => {
            if value_aa <= 0.0 {
                return Err(UnitError::NonPositiveSpectralValue(value_aa));
            }
            Ok(1.0 / Length::from_angstroms(value_aa).as_micrometers())
        }
        other => Err(UnitError::IncompatibleUnits {
            from: Unit::ANGSTROM,
            to: other,
        }),
    }
}

/// Wavelengths in Å for each element, broadcasting a single context value
fn context_angstroms(
    context: Option<&Quantity>,
    count: usize,
    from: Unit,
    to: Unit,
) -> Result<Vec<f64>, UnitError> {
    let context = context.ok_or(UnitError::MissingConversionContext { from, to })?;

    if !context.unit().is_spectral_axis() {
        return Err(UnitError::IncompatibleUnits {
            from: context.unit(),
            to: Unit::ANGSTROM,
        });
    }

    let angstroms = context
        .values()
        .iter()
        .map(|&v| spectral_to_angstrom(v, context.unit()))
        .collect::<Result<Vec<f64>, UnitError>>()?;

    if let Some(&bad) = angstroms.iter().find(|&&aa| aa <= 0.0) {
        return Err(UnitError::NonPositiveSpectralValue(bad));
    }

    match angstroms.len() {
        1 => Ok(vec![angstroms[0]; count]),
        n if n == count => Ok(angstroms),
        n => Err(UnitError::ContextLengthMismatch {
            expected: count,
            found: n,
        }),
    }
}

/// Express a value in the linear canonical unit of its family (FLAM, FNU or PHOTLAM)
fn to_family_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::FluxDensity(FluxDensityUnit::Jansky) => value * CGS::JANSKY_IN_CGS,
        Unit::FluxDensity(FluxDensityUnit::Millijansky) => value * CGS::JANSKY_IN_CGS * 1e-3,
        Unit::Magnitude(MagnitudeUnit::AB) => magnitude_to_flux(value, CGS::AB_ZERO_POINT_FLUX_DENSITY),
        Unit::Magnitude(MagnitudeUnit::ST) => magnitude_to_flux(value, CGS::ST_ZERO_POINT_FLUX_DENSITY),
        _ => value,
    }
}

fn from_family_canonical(value: f64, unit: Unit) -> Result<f64, UnitError> {
    match unit {
        Unit::FluxDensity(FluxDensityUnit::Jansky) => Ok(value / CGS::JANSKY_IN_CGS),
        Unit::FluxDensity(FluxDensityUnit::Millijansky) => Ok(value / (CGS::JANSKY_IN_CGS * 1e-3)),
        Unit::Magnitude(MagnitudeUnit::AB) => {
            flux_to_magnitude(value, CGS::AB_ZERO_POINT_FLUX_DENSITY)
        }
        Unit::Magnitude(MagnitudeUnit::ST) => {
            flux_to_magnitude(value, CGS::ST_ZERO_POINT_FLUX_DENSITY)
        }
        _ => Ok(value),
    }
}

fn convert_flux(
    values: &[f64],
    from: Unit,
    to: Unit,
    context: Option<&Quantity>,
) -> Result<Vec<f64>, UnitError> {
    // Both units are flux units, so both families exist
    let (Some(from_family), Some(to_family)) = (from.flux_family(), to.flux_family()) else {
        return Err(UnitError::IncompatibleUnits { from, to });
    };

    let wavelengths = if from_family == to_family && from_family != FluxFamily::Photon {
        None
    } else {
        Some(context_angstroms(context, values.len(), from, to)?)
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let canonical = to_family_canonical(v, from);
            let flam = match (&wavelengths, from_family) {
                (None, _) => canonical,
                (Some(_), FluxFamily::PerWavelength) => canonical,
                (Some(aa), FluxFamily::PerFrequency) => fnu_to_flam(canonical, aa[i]),
                (Some(aa), FluxFamily::Photon) => photlam_to_flam(canonical, aa[i]),
            };
            let target = match (&wavelengths, to_family) {
                (None, _) => flam,
                (Some(_), FluxFamily::PerWavelength) => flam,
                (Some(aa), FluxFamily::PerFrequency) => flam_to_fnu(flam, aa[i]),
                (Some(aa), FluxFamily::Photon) => flam_to_photlam(flam, aa[i]),
            };
            from_family_canonical(target, to)
        })
        .collect()
}

/// Fλ = Fν c / λ², with Fλ per Å
pub fn fnu_to_flam(fnu: f64, wavelength_aa: f64) -> f64 {
    let wavelength_cm = wavelength_aa / CGS::ANGSTROMS_PER_CM;
    fnu * CGS::SPEED_OF_LIGHT / (wavelength_cm * wavelength_cm) / CGS::ANGSTROMS_PER_CM
}

/// Fν = Fλ λ² / c, with Fλ per Å
pub fn flam_to_fnu(flam: f64, wavelength_aa: f64) -> f64 {
    let wavelength_cm = wavelength_aa / CGS::ANGSTROMS_PER_CM;
    flam * CGS::ANGSTROMS_PER_CM * wavelength_cm * wavelength_cm / CGS::SPEED_OF_LIGHT
}

fn photon_energy_erg(wavelength_aa: f64) -> f64 {
    CGS::PLANCK_CONSTANT * CGS::SPEED_OF_LIGHT / (wavelength_aa / CGS::ANGSTROMS_PER_CM)
}

fn photlam_to_flam(photlam: f64, wavelength_aa: f64) -> f64 {
    photlam * photon_energy_erg(wavelength_aa)
}

fn flam_to_photlam(flam: f64, wavelength_aa: f64) -> f64 {
    flam / photon_energy_erg(wavelength_aa)
}

/// Convert a magnitude to a flux: `flux = zero_flux × 10^(-0.4 × mag)`
pub fn magnitude_to_flux(magnitude: f64, zero_flux: f64) -> f64 {
    zero_flux * 10f64.powf(-0.4 * magnitude)
}

/// Convert a flux to a magnitude: `mag = -2.5 × log10(flux / zero_flux)`
///
/// # Errors
/// `NonPositiveFlux` if either flux is not strictly positive.
pub fn flux_to_magnitude(flux: f64, zero_flux: f64) -> Result<f64, UnitError> {
    if flux.is_nan() || flux <= 0.0 {
        return Err(UnitError::NonPositiveFlux(flux));
    }
    if zero_flux.is_nan() || zero_flux <= 0.0 {
        return Err(UnitError::NonPositiveFlux(zero_flux));
    }
    Ok(-2.5 * (flux / zero_flux).log10())
}
