//! Interpolation and grid utilities for tabulated spectral data.
//!
//! This module provides the small amount of numerical plumbing every
//! tabulated spectral function needs:
//!
//! - **Linear interpolation**: Binary-search lookup with strict bounds checking
//! - **Grid union**: Merging the sample points of two tabulated functions
//! - **Grid refinement**: Subdividing coarse intervals before integration
//!
//! None of these functions silently extrapolate. Callers decide what happens
//! outside a table by inspecting the returned error.

use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 1 point")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be sorted in ascending order")]
    UnsortedData,
}

/// Performs linear interpolation on 1D data using binary search.
///
/// The interval containing `x` is located in O(log n) and the value is
/// computed as y = y₁ + t(y₂ - y₁) with t = (x - x₁)/(x₂ - x₁).
///
/// A single-point table is accepted and only answers queries at exactly
/// that point.
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `xs` - Array of x-coordinates (strictly ascending)
/// * `ys` - Array of corresponding y-values (must match length of xs)
///
/// # Errors
///
/// * `OutOfBounds` - x is outside [xs[0], xs[n-1]]
/// * `InsufficientData` - xs is empty
/// * `MismatchedLengths` - xs and ys have different lengths
/// * `UnsortedData` - xs values are not strictly ascending
///
/// # Examples
///
/// ```rust
/// use shared::algo::misc::interp;
///
/// let xs = vec![4000.0, 5000.0, 6000.0];
/// let ys = vec![0.0, 1.0, 0.5];
///
/// assert_eq!(interp(4500.0, &xs, &ys).unwrap(), 0.5);
/// assert_eq!(interp(6000.0, &xs, &ys).unwrap(), 0.5);
/// assert!(interp(7000.0, &xs, &ys).is_err());
/// ```
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }

    if xs.is_empty() {
        return Err(InterpError::InsufficientData);
    }

    if xs.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(InterpError::UnsortedData);
    }

    let min_x = xs[0];
    let max_x = xs[xs.len() - 1];

    if !(min_x..=max_x).contains(&x) {
        return Err(InterpError::OutOfBounds(x, min_x, max_x));
    }

    // Partition point is the first sample strictly greater than x
    let idx = xs.partition_point(|&probe| probe <= x);
    if idx == 0 {
        return Ok(ys[0]);
    }
    if xs[idx - 1] == x || idx == xs.len() {
        return Ok(ys[idx - 1]);
    }

    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);

    let t = (x - x1) / (x2 - x1);
    Ok(y1 + t * (y2 - y1))
}

/// Merge two ascending grids into one ascending grid without duplicates.
///
/// Values closer than a relative 1e-12 are treated as the same sample so
/// that unit round trips do not create zero-width intervals.
pub fn merge_grids(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut merged: Vec<f64> = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&va), Some(&vb)) if va <= vb => {
                i += 1;
                va
            }
            (Some(_), Some(&vb)) => {
                j += 1;
                vb
            }
            (Some(&va), None) => {
                i += 1;
                va
            }
            (None, Some(&vb)) => {
                j += 1;
                vb
            }
            (None, None) => break,
        };

        match merged.last() {
            Some(&last) if (next - last).abs() <= 1e-12 * next.abs().max(last.abs()) => {}
            _ => merged.push(next),
        }
    }

    merged
}

/// Subdivide every interval of an ascending grid so none exceeds `max_step`.
///
/// Original samples are always kept; inserted samples are evenly spaced
/// within each interval. A non-positive or non-finite `max_step` returns
/// the grid unchanged.
pub fn refine_grid(grid: &[f64], max_step: f64) -> Vec<f64> {
    if grid.len() < 2 || !(max_step.is_finite() && max_step > 0.0) {
        return grid.to_vec();
    }

    let mut refined = Vec::with_capacity(grid.len());
    for pair in grid.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let pieces = ((hi - lo) / max_step).ceil().max(1.0) as usize;
        let step = (hi - lo) / pieces as f64;
        refined.extend((0..pieces).map(|k| lo + step * k as f64));
    }
    refined.push(grid[grid.len() - 1]);

    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        let ys = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(interp(2.0, &xs, &ys).unwrap(), 20.0);
        assert_eq!(interp(1.0, &xs, &ys).unwrap(), 10.0);
        assert_eq!(interp(4.0, &xs, &ys).unwrap(), 40.0);
    }

    #[test]
    fn test_linear_interpolation() {
        let xs = vec![1.0, 2.0, 3.0];
        let ys = vec![10.0, 20.0, 30.0];
        assert_eq!(interp(1.5, &xs, &ys).unwrap(), 15.0);
        assert_eq!(interp(2.5, &xs, &ys).unwrap(), 25.0);
    }

    #[test]
    fn test_single_point_table() {
        let xs = vec![5500.0];
        let ys = vec![0.7];
        assert_eq!(interp(5500.0, &xs, &ys).unwrap(), 0.7);
        assert!(matches!(
            interp(5501.0, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
    }

    #[test]
    fn test_out_of_bounds() {
        let xs = vec![1.0, 2.0, 3.0];
        let ys = vec![10.0, 20.0, 30.0];
        assert!(matches!(
            interp(0.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
        assert!(matches!(
            interp(3.5, &xs, &ys),
            Err(InterpError::OutOfBounds(_, _, _))
        ));
    }

    #[test]
    fn test_mismatched_lengths() {
        let xs = vec![1.0, 2.0, 3.0];
        let ys = vec![10.0, 20.0];
        assert!(matches!(
            interp(1.5, &xs, &ys),
            Err(InterpError::MismatchedLengths)
        ));
    }

    #[test]
    fn test_unsorted_data() {
        let xs = vec![2.0, 1.0, 3.0];
        let ys = vec![20.0, 10.0, 30.0];
        assert!(matches!(
            interp(1.5, &xs, &ys),
            Err(InterpError::UnsortedData)
        ));
    }

    #[test]
    fn test_merge_grids() {
        let a = vec![1.0, 3.0, 5.0];
        let b = vec![2.0, 3.0, 6.0];
        assert_eq!(merge_grids(&a, &b), vec![1.0, 2.0, 3.0, 5.0, 6.0]);
        assert_eq!(merge_grids(&a, &[]), a);
    }

    #[test]
    fn test_refine_grid() {
        let grid = vec![0.0, 10.0, 12.0];
        let refined = refine_grid(&grid, 4.0);
        assert_eq!(refined.len(), 5);
        assert_eq!(refined[0], 0.0);
        assert!((refined[1] - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(refined[3], 10.0);
        assert_eq!(refined[4], 12.0);

        // Degenerate steps leave the grid alone
        assert_eq!(refine_grid(&grid, 0.0), grid);
    }
}
