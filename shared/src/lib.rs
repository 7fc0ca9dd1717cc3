//! Shared components and utilities for the reddening workspace.
//!
//! This crate contains the unit-tagged quantity layer and small numeric
//! helpers that carry no photometric knowledge, so that the numerical core
//! and its command line front end agree on units and grids.

pub mod algo;
pub mod range_arg;
pub mod units;
