//! Flux tables on disk and the command-line tool

mod common;

use std::io::Write;
use std::process::Command;

use approx::assert_relative_eq;
use common::init_logging;
use reddening::io::{read_flux_table, FileSpectrumLoader, SpectrumLoader};
use reddening::photometry::Extrapolation;
use shared::units::{fnu_to_flam, Unit, CGS};
use tempfile::{NamedTempFile, TempDir};

fn reddening_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reddening"))
}

fn write_table(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_loader_converts_jansky_table() {
    init_logging();
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("flat.txt"),
        "# micron  Jy\n0.40, 3631\n0.50, 3631\n0.60, 3631\n",
    )
    .unwrap();

    let loader = FileSpectrumLoader::new(dir.path(), Unit::MICRON, Unit::JANSKY);
    let spectrum = loader
        .load("flat.txt")
        .unwrap()
        .into_spectrum(Extrapolation::Error)
        .unwrap();

    assert_relative_eq!(
        spectrum.at(5000.0).unwrap(),
        fnu_to_flam(CGS::AB_ZERO_POINT_FLUX_DENSITY, 5000.0),
        max_relative = 1e-9
    );
    assert!(spectrum.at(7000.0).is_err());
    assert!(loader.load("missing.txt").is_err());
}

#[test]
fn test_read_flux_table_keeps_file_order() {
    let table = write_table("6000 3e-15\n5000 2e-15\n");
    let rows = read_flux_table(table.path()).unwrap();
    assert_eq!(rows, vec![(6000.0, 3e-15), (5000.0, 2e-15)]);
}

#[test]
fn test_cli_extinguish_prints_one_row_per_wavelength() {
    let output = reddening_cli()
        .args(["extinguish", "ccm89", "3.1", "0.1", "0.44", "0.55", "2.2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let transmission: Vec<f64> = stdout
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap().parse().unwrap())
        .collect();
    assert_eq!(transmission.len(), 3);
    assert!(transmission[0] < transmission[1] && transmission[1] < transmission[2]);
}

#[test]
fn test_cli_range_sweep() {
    let output = reddening_cli()
        .args(["evaluate", "f99", "3.1", "--unit", "angstrom", "--range", "3000:9000:1000"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 7);
}

#[test]
fn test_cli_reports_error_kind_without_partial_rows() {
    let output = reddening_cli()
        .args(["evaluate", "ccm89", "3.1", "0.55", "0.44", "8.0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[WavelengthOutOfRange]"), "{stderr}");

    let output = reddening_cli()
        .args(["extinguish", "f99", "7.5", "0.1", "0.55"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[ParameterOutOfRange]"), "{stderr}");
    assert!(stderr.contains("Rv"), "{stderr}");
}

#[test]
fn test_cli_deredden_table() {
    let table = write_table("# angstrom flam\n4000 1e-15\n5500 1e-15\n8000 1e-15\n");
    let output = reddening_cli()
        .args(["deredden", "o94", "3.1", "0.2", "--unit", "angstrom"])
        .arg(table.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let flux: Vec<f64> = stdout
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap().parse().unwrap())
        .collect();
    assert_eq!(flux.len(), 3);
    // Dereddening brightens blue light the most
    assert!(flux.iter().all(|&f| f > 1e-15));
    assert!(flux[0] > flux[1] && flux[1] > flux[2]);
}

#[test]
fn test_cli_photometric_extinction_json() {
    let output = reddening_cli()
        .args([
            "photometric-extinction",
            "ccm89",
            "3.1",
            "2.0",
            "10000",
            "johnson_b,johnson_v",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["band"], "johnson_b");
    let av = rows[1]["extinction"].as_f64().unwrap();
    assert!((av - 2.0).abs() < 0.1);
    assert_eq!(rows[1]["color_excess"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_cli_config_file_sets_system() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("reddening.json");
    std::fs::write(&config, r#"{"system": "unknown_system"}"#).unwrap();

    let output = reddening_cli()
        .args(["photometric-extinction", "ccm89", "3.1", "1.0", "8000", "johnson_b", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown_system"), "{stderr}");
}

#[test]
fn test_cli_requires_wavelengths_or_range() {
    for args in [
        vec!["evaluate", "ccm89", "3.1"],
        vec!["extinguish", "ccm89", "3.1", "0.1"],
    ] {
        let output = reddening_cli().args(&args).output().unwrap();
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("WAVELENGTHS"), "{stderr}");
    }
}

#[test]
fn test_cli_temperature_accepts_celsius() {
    let extinction_of = |temperature: &str| -> Vec<f64> {
        let output = reddening_cli()
            .args([
                "photometric-extinction",
                "f99",
                "3.1",
                "1.0",
                temperature,
                "johnson_u,johnson_b",
                "--json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success(), "{temperature}");
        let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        rows.as_array()
            .unwrap()
            .iter()
            .map(|row| row["extinction"].as_f64().unwrap())
            .collect()
    };

    let kelvin = extinction_of("10000");
    let celsius = extinction_of("9726.85C");
    for (k, c) in kelvin.iter().zip(celsius.iter()) {
        assert_relative_eq!(*k, *c, epsilon = 1e-6);
    }
    assert_eq!(kelvin, extinction_of("10000K"));

    let output = reddening_cli()
        .args(["photometric-extinction", "f99", "3.1", "1.0", "hot", "johnson_b"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_rejects_tiny_integration_step() {
    let output = reddening_cli()
        .args([
            "photometric-extinction",
            "ccm89",
            "3.1",
            "1.0",
            "8000",
            "bessel_k",
            "--max-step",
            "1e-9",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[InvalidInput]"), "{stderr}");
    assert!(stderr.contains("integration step"), "{stderr}");
}
