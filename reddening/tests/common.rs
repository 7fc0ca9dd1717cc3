//! Helpers shared by the integration tests

#![allow(dead_code)]

use shared::units::{Quantity, Unit};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Evenly spaced wavelengths in microns, inclusive of both ends
pub fn micron_sweep(start: f64, stop: f64, step: f64) -> Quantity {
    let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
    let values = (0..count).map(|i| start + step * i as f64).collect();
    Quantity::new(values, Unit::MICRON)
}
