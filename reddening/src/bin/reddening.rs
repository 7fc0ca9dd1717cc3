//! Command-line front end for extinction laws and photometric extinction.
//!
//! Every subcommand computes all of its rows before printing anything, so a
//! failure part way through never leaves a partial table on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use reddening::config::{CliConfig, ConfigError};
use reddening::extinction::{ExtinctionLaw, RangePolicy};
use reddening::io::{read_flux_table, SpectrumTable};
use reddening::photometry::{
    passband, passband_list, photometric_extinction, Extrapolation, ObserveMode,
    PhotometricSystem, SourceSpectrum, SpectralElement, Weighting,
};
use reddening::Error;
use shared::range_arg::RangeArg;
use shared::units::{parse_temperature, Quantity, Temperature, Unit};

#[derive(Parser, Debug)]
#[command(name = "reddening")]
#[command(about = "Interstellar extinction laws and synthetic photometry")]
#[command(version)]
struct Args {
    /// Wavelength unit of inputs and outputs (angstrom, nm, um, 1/um, Hz, ...)
    #[arg(long, global = true, default_value = "um")]
    unit: Unit,

    /// Evaluate beyond each law's wavelength domain and fill band gaps
    /// from the spectrum's extrapolation policy instead of failing
    #[arg(long, global = true, default_value_t = false)]
    extrapolate: bool,

    /// JSON configuration file (photometric system, reference band, integration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Photometric system: vega, ab or st
    #[arg(long, global = true)]
    system: Option<String>,

    /// Reference band for color excesses
    #[arg(long, global = true)]
    reference: Option<String>,

    /// Largest integration step in Angstroms
    #[arg(long, global = true)]
    max_step: Option<f64>,

    /// Weight band integrals for a photon-counting detector
    #[arg(long, global = true, default_value_t = false)]
    photon_counting: bool,

    /// Print rows as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// A(λ)/A(V) at each wavelength
    Evaluate {
        /// Extinction law: ccm89, o94 or f99
        law: ExtinctionLaw,

        /// Total-to-selective extinction ratio R(V)
        rv: f64,

        /// Wavelengths in --unit
        #[arg(required_unless_present = "range")]
        wavelengths: Vec<f64>,

        /// Wavelength sweep (start:stop:step or start:stop:count:log)
        #[arg(long)]
        range: Option<RangeArg>,
    },

    /// Fraction of flux transmitted through dust at each wavelength
    Extinguish {
        law: ExtinctionLaw,
        rv: f64,

        /// Color excess E(B−V)
        ebv: f64,

        #[arg(required_unless_present = "range")]
        wavelengths: Vec<f64>,

        #[arg(long)]
        range: Option<RangeArg>,
    },

    /// Remove dust extinction from a tabulated spectrum
    Deredden {
        law: ExtinctionLaw,
        rv: f64,
        ebv: f64,

        /// Two-column flux table: wavelength (in --unit) and flux
        table: PathBuf,

        /// Flux unit of the table, also used for output
        #[arg(long, default_value = "flam")]
        flux_unit: Unit,
    },

    /// Band-integrated extinction A and color excess E(band − reference)
    /// of a reddened blackbody
    PhotometricExtinction {
        law: ExtinctionLaw,
        rv: f64,

        /// Visual extinction A(V) in magnitudes
        av: f64,

        /// Blackbody temperature: Kelvin by default, or suffixed K or C
        #[arg(value_parser = parse_temperature, allow_hyphen_values = true)]
        temperature: Temperature,

        /// Comma-separated band names, e.g. johnson_b,johnson_v,bessel_k
        bands: String,

        /// Magnitude in the reference band to normalize the blackbody to
        #[arg(long, default_value_t = 10.0)]
        magnitude: f64,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error[{}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<CliConfig, Error> {
    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    if let Some(system) = &args.system {
        config.system = system.clone();
    }
    if let Some(reference) = &args.reference {
        config.reference_band = reference.clone();
    }
    if let Some(max_step) = args.max_step {
        config.observe.max_step_aa = max_step;
    }
    if args.extrapolate {
        config.observe.mode = ObserveMode::Extrapolate;
    }
    if args.photon_counting {
        config.observe.weighting = Weighting::PhotonCounting;
    }

    debug!("effective configuration: {config:?}");
    Ok(config)
}

/// Explicit wavelengths followed by any sweep points
fn collect_wavelengths(explicit: &[f64], range: &Option<RangeArg>) -> Vec<f64> {
    let mut wavelengths = explicit.to_vec();
    if let Some(range) = range {
        wavelengths.extend(range.values());
    }
    wavelengths
}

fn to_json<T: serde::Serialize>(rows: &T) -> Result<Vec<String>, Error> {
    let json = serde_json::to_string_pretty(rows).map_err(ConfigError::Json)?;
    Ok(vec![json])
}

fn run(args: Args) -> Result<Vec<String>, Error> {
    let config = load_config(&args)?;
    let policy = if args.extrapolate {
        RangePolicy::Extrapolate
    } else {
        RangePolicy::Strict
    };

    match &args.command {
        Command::Evaluate {
            law,
            rv,
            wavelengths,
            range,
        } => {
            let wavelengths = collect_wavelengths(wavelengths, range);
            let values = law
                .build(*rv)?
                .evaluate(&Quantity::new(wavelengths.clone(), args.unit), policy)?;
            format_pairs(&wavelengths, &values, args.json)
        }

        Command::Extinguish {
            law,
            rv,
            ebv,
            wavelengths,
            range,
        } => {
            let wavelengths = collect_wavelengths(wavelengths, range);
            let transmission = law
                .build(*rv)?
                .extinguish(*ebv, &Quantity::new(wavelengths.clone(), args.unit), policy)?;
            format_pairs(&wavelengths, &transmission, args.json)
        }

        Command::Deredden {
            law,
            rv,
            ebv,
            table,
            flux_unit,
        } => {
            let (wavelengths, flux): (Vec<f64>, Vec<f64>) = read_flux_table(table)?.into_iter().unzip();
            let wavelengths = Quantity::new(wavelengths, args.unit);
            let spectrum = SpectrumTable {
                wavelengths: wavelengths.clone(),
                flux: Quantity::new(flux, *flux_unit),
            }
            .into_spectrum(Extrapolation::Error)?;

            let transmission = law.build(*rv)?.extinguish(*ebv, &wavelengths, policy)?;
            let curve = SpectralElement::from_quantity(&wavelengths, transmission, Extrapolation::Nearest)?;
            let dereddened = spectrum
                .deredden(&curve)
                .evaluate_quantity(&wavelengths, *flux_unit)?;

            format_pairs(wavelengths.values(), dereddened.values(), args.json)
        }

        Command::PhotometricExtinction {
            law,
            rv,
            av,
            temperature,
            bands,
            magnitude,
        } => {
            let curve = law.build(*rv)?;
            let system = PhotometricSystem::by_name(&config.system)?;
            let reference = passband(&config.reference_band)?;
            let bands = passband_list(bands)?;

            let spectrum = SourceSpectrum::from_temperature(*temperature)?.normalize(
                *magnitude,
                &reference,
                &system,
                &config.observe,
            )?;

            let rows = photometric_extinction(
                &spectrum,
                curve.as_ref(),
                *av,
                &bands,
                &reference,
                &system,
                &config.observe,
            )?;

            if args.json {
                return to_json(&rows);
            }

            let lengths = Quantity::new(
                rows.iter().map(|row| row.effective_wavelength_aa).collect(),
                Unit::ANGSTROM,
            )
            .to(args.unit)?;
            Ok(rows
                .iter()
                .zip(lengths.values())
                .map(|(row, wavelength)| {
                    format!(
                        "{:<12} {:>12.6} {:>9.4} {:>9.4}",
                        row.band, wavelength, row.extinction, row.color_excess
                    )
                })
                .collect())
        }
    }
}

fn format_pairs(inputs: &[f64], outputs: &[f64], json: bool) -> Result<Vec<String>, Error> {
    if json {
        let rows: Vec<[f64; 2]> = inputs.iter().zip(outputs).map(|(&x, &y)| [x, y]).collect();
        return to_json(&rows);
    }
    Ok(inputs
        .iter()
        .zip(outputs)
        .map(|(x, y)| format!("{x:<12} {y:.6e}"))
        .collect())
}
