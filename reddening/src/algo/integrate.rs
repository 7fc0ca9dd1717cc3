//! Trapezoidal integration over non-uniform sample grids.

/// Integrate tabulated samples with the trapezoidal rule.
///
/// `xs` may be unevenly spaced; each interval contributes its own width.
/// Fewer than two samples integrate to zero.
///
/// # Arguments
/// * `xs` - Sample positions in ascending order
/// * `ys` - Function values at each sample (same length as `xs`)
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());

    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_function_is_exact() {
        let xs = vec![0.0, 0.5, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        // ∫0^3 (2x + 1) dx = 12
        assert_relative_eq!(trapezoid(&xs, &ys), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fine_grid_converges() {
        let xs: Vec<f64> = (0..=1000).map(|i| i as f64 * std::f64::consts::PI / 1000.0).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
        assert_relative_eq!(trapezoid(&xs, &ys), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[1.0], &[5.0]), 0.0);
    }
}
