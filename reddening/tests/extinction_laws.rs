//! Shape and normalization properties shared by every extinction law

mod common;

use approx::assert_relative_eq;
use common::{init_logging, micron_sweep};
use reddening::extinction::{ExtinctionLaw, RangePolicy};
use reddening::photometry::{Extrapolation, SourceSpectrum, SpectralElement};
use shared::units::{Quantity, Unit};

const RV_SAMPLES: [f64; 4] = [2.0, 3.1, 5.0, 6.0];

/// Largest |ΔA(λ)/A(V)| allowed between laws over 0.33-3 μm
const CROSS_LAW_TOLERANCE: f64 = 0.12;

#[test]
fn test_normalized_at_reference_wavelength() {
    init_logging();
    for law in ExtinctionLaw::ALL {
        for rv in RV_SAMPLES {
            let curve = law.build(rv).unwrap();
            let value = curve
                .at_wavelength(curve.reference_wavelength(), RangePolicy::Strict)
                .unwrap();
            assert!(
                (value - 1.0).abs() <= 1e-12,
                "{law} Rv={rv}: A/A(V) = {value} at the reference wavelength"
            );
        }
    }
}

#[test]
fn test_monotonic_in_optical_and_infrared() {
    init_logging();
    let wavelengths = micron_sweep(0.36, 3.0, 0.01);
    for law in ExtinctionLaw::ALL {
        for rv in RV_SAMPLES {
            let values = law.build(rv).unwrap().evaluate(&wavelengths, RangePolicy::Strict).unwrap();
            for (i, pair) in values.windows(2).enumerate() {
                assert!(
                    pair[1] < pair[0],
                    "{law} Rv={rv} rises at {} μm",
                    wavelengths.values()[i + 1]
                );
            }
        }
    }
}

#[test]
fn test_monotonic_from_atmospheric_cutoff_for_diffuse_ism() {
    let wavelengths = micron_sweep(0.30, 3.0, 0.01);
    for law in ExtinctionLaw::ALL {
        let values = law.build(3.1).unwrap().evaluate(&wavelengths, RangePolicy::Strict).unwrap();
        assert!(values.windows(2).all(|pair| pair[1] < pair[0]), "{law}");
    }
}

#[test]
fn test_ultraviolet_bump_near_2175() {
    let wavelengths = Quantity::new(vec![0.19, 0.2175, 0.25], Unit::MICRON);
    for law in ExtinctionLaw::ALL {
        for rv in RV_SAMPLES {
            let values = law.build(rv).unwrap().evaluate(&wavelengths, RangePolicy::Strict).unwrap();
            assert!(
                values[1] > values[0] && values[1] > values[2],
                "{law} Rv={rv}: no local maximum near 2175 Å ({values:?})"
            );
        }
    }
}

#[test]
fn test_laws_agree_within_tolerance() {
    let wavelengths = micron_sweep(0.33, 3.0, 0.01);
    for rv in RV_SAMPLES {
        let ccm = ExtinctionLaw::Ccm89.build(rv).unwrap().evaluate(&wavelengths, RangePolicy::Strict).unwrap();
        for other in [ExtinctionLaw::O94, ExtinctionLaw::F99] {
            let values = other.build(rv).unwrap().evaluate(&wavelengths, RangePolicy::Strict).unwrap();
            let worst = ccm
                .iter()
                .zip(values.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            assert!(worst < CROSS_LAW_TOLERANCE, "ccm89 vs {other} at Rv={rv}: {worst}");
        }
    }
}

#[test]
fn test_extinguish_then_deredden_restores_flux() {
    init_logging();
    let wavelengths = micron_sweep(0.12, 3.0, 0.02);
    let flux: Vec<f64> = wavelengths
        .values()
        .iter()
        .map(|w| 1e-14 * (1.0 + 0.3 * (7.0 * w).sin()))
        .collect();

    for law in ExtinctionLaw::ALL {
        let transmission = law
            .build(3.1)
            .unwrap()
            .extinguish(0.4, &wavelengths, RangePolicy::Strict)
            .unwrap();
        let reddened_flux: Vec<f64> = flux.iter().zip(&transmission).map(|(f, t)| f * t).collect();

        let curve = SpectralElement::from_quantity(&wavelengths, transmission, Extrapolation::Nearest).unwrap();
        let observed = SourceSpectrum::from_table(
            &wavelengths,
            &Quantity::new(reddened_flux, Unit::FLAM),
            Extrapolation::Error,
        )
        .unwrap();
        let restored = observed
            .deredden(&curve)
            .evaluate_quantity(&wavelengths, Unit::FLAM)
            .unwrap();

        for (r, f) in restored.values().iter().zip(&flux) {
            assert_relative_eq!(*r, *f, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_f99_dereddening_removes_bump_depression() {
    init_logging();
    // Flat intrinsic spectrum across the 2175 Å feature
    let wavelengths = micron_sweep(0.15, 0.35, 0.005);
    let intrinsic = 2e-15;
    let law = ExtinctionLaw::F99.build(5.0).unwrap();
    let transmission = law.extinguish(0.5, &wavelengths, RangePolicy::Strict).unwrap();

    let observed = SourceSpectrum::from_table(
        &wavelengths,
        &Quantity::new(transmission.iter().map(|t| intrinsic * t).collect(), Unit::FLAM),
        Extrapolation::Error,
    )
    .unwrap();

    let probe = Quantity::new(vec![0.19, 0.2175, 0.25], Unit::MICRON);
    let reddened = observed.evaluate_quantity(&probe, Unit::FLAM).unwrap();
    assert!(reddened.values()[1] < reddened.values()[0]);
    assert!(reddened.values()[1] < reddened.values()[2]);

    let curve = SpectralElement::from_quantity(&wavelengths, transmission, Extrapolation::Nearest).unwrap();
    let restored = observed.deredden(&curve).evaluate_quantity(&wavelengths, Unit::FLAM).unwrap();
    for value in restored.values() {
        assert_relative_eq!(*value, intrinsic, max_relative = 1e-9);
    }
}

#[test]
fn test_out_of_domain_requires_opt_in() {
    let far_infrared = Quantity::new(vec![5.0], Unit::MICRON);
    for law in ExtinctionLaw::ALL {
        let curve = law.build(3.1).unwrap();
        let err = curve.extinguish(0.1, &far_infrared, RangePolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), "WavelengthOutOfRange");

        let transmission = curve.extinguish(0.1, &far_infrared, RangePolicy::Extrapolate).unwrap();
        assert!(transmission[0] > 0.9 && transmission[0] <= 1.0);
    }
}
