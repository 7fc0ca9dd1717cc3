use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reddening::extinction::{ExtinctionLaw, RangePolicy};
use reddening::grid::WavelengthGrid;
use reddening::photometry::{
    observe_all, passband, passband_list, photometric_extinction, Extrapolation, Observation,
    ObserveOptions, PhotometricSystem, SourceSpectrum,
};
use shared::units::{Quantity, Unit};

fn bench_extinction_laws(c: &mut Criterion) {
    let grid = WavelengthGrid::log_spaced(1100.0, 30000.0, 4096).unwrap().to_quantity();

    let mut group = c.benchmark_group("evaluate_4096");
    for law in ExtinctionLaw::ALL {
        let curve = law.build(3.1).unwrap();
        group.bench_function(law.to_string(), |b| {
            b.iter(|| curve.evaluate(black_box(&grid), RangePolicy::Strict))
        });
    }
    group.finish();
}

fn bench_observation(c: &mut Criterion) {
    let vega = PhotometricSystem::vega().unwrap();
    let v = passband("johnson_v").unwrap();
    let spectrum = SourceSpectrum::blackbody(10000.0).unwrap();
    let tabulated = {
        let wavelengths = Quantity::new(
            (0..2000).map(|i| 3000.0 + 5.0 * i as f64).collect(),
            Unit::ANGSTROM,
        );
        let flux = spectrum.evaluate_quantity(&wavelengths, Unit::FLAM).unwrap();
        SourceSpectrum::from_table(&wavelengths, &flux, Extrapolation::Error).unwrap()
    };
    let options = ObserveOptions::default();

    let mut group = c.benchmark_group("observe_johnson_v");
    group.bench_function("blackbody", |b| {
        b.iter(|| Observation::new(black_box(&spectrum), &v, &vega, &options))
    });
    group.bench_function("tabulated_2000", |b| {
        b.iter(|| Observation::new(black_box(&tabulated), &v, &vega, &options))
    });
    group.finish();
}

fn bench_photometric_extinction(c: &mut Criterion) {
    let vega = PhotometricSystem::vega().unwrap();
    let v = passband("johnson_v").unwrap();
    let bands = passband_list(
        "johnson_u,johnson_b,johnson_v,cousins_r,cousins_i,bessel_j,bessel_h,bessel_k",
    )
    .unwrap();
    let spectrum = SourceSpectrum::blackbody(10000.0).unwrap();
    let law = ExtinctionLaw::F99.build(3.1).unwrap();
    let options = ObserveOptions::default();

    c.bench_function("observe_all_8_bands", |b| {
        b.iter(|| observe_all(black_box(&spectrum), &bands, &vega, &options))
    });
    c.bench_function("photometric_extinction_8_bands", |b| {
        b.iter(|| {
            photometric_extinction(
                black_box(&spectrum),
                law.as_ref(),
                black_box(2.0),
                &bands,
                &v,
                &vega,
                &options,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_extinction_laws,
    bench_observation,
    bench_photometric_extinction,
);
criterion_main!(benches);
