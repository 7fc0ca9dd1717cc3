//! Numeric helpers for tabulated functions of wavelength.

pub mod misc;

pub use misc::{interp, merge_grids, refine_grid, InterpError};
