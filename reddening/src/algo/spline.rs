use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplineError {
    #[error("X and Y vectors must have same length")]
    MismatchedLengths,
    #[error("Need at least 2 points for interpolation")]
    InsufficientData,
    #[error("X values must be sorted in strictly ascending order")]
    UnsortedData,
}

/// Natural cubic spline through a set of anchor points
///
/// Piecewise cubic polynomials between adjacent anchors with continuous first
/// and second derivatives, and zero second derivative at both ends. Each
/// segment has the form:
///
/// S(x) = a + b(x-xi) + c(x-xi)² + d(x-xi)³
///
/// Used for extinction laws that are defined by anchor points in wavenumber
/// rather than by closed-form polynomials.
///
/// # Examples
///
/// ```rust
/// use reddening::algo::spline::CubicSpline;
///
/// let x = vec![0.0, 1.0, 2.0, 3.0];
/// let y = vec![0.0, 1.0, 4.0, 9.0];
/// let spline = CubicSpline::new(x, y).unwrap();
///
/// let interpolated = spline.evaluate(1.5);
/// assert!(interpolated > 1.0 && interpolated < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    coeffs: Vec<[f64; 4]>, // a, b, c, d coefficients for each segment
}

impl CubicSpline {
    /// Create a new natural cubic spline from anchor points
    ///
    /// # Arguments
    /// * `x` - X coordinates (strictly ascending)
    /// * `y` - Y coordinates corresponding to x values
    ///
    /// # Errors
    /// Mismatched lengths, fewer than 2 points, or x not strictly ascending.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SplineError> {
        if x.len() != y.len() {
            return Err(SplineError::MismatchedLengths);
        }
        if x.len() < 2 {
            return Err(SplineError::InsufficientData);
        }
        if x.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(SplineError::UnsortedData);
        }

        let coeffs = Self::compute_coefficients(&x, &y);
        Ok(CubicSpline { x, coeffs })
    }

    /// Solve the tridiagonal system (Thomas algorithm) for natural boundary conditions
    fn compute_coefficients(x: &[f64], y: &[f64]) -> Vec<[f64; 4]> {
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();

        let mut alpha = vec![0.0; n - 1];
        for i in 1..n - 1 {
            alpha[i] = (3.0 / h[i]) * (y[i + 1] - y[i]) - (3.0 / h[i - 1]) * (y[i] - y[i - 1]);
        }

        let mut l = vec![1.0; n];
        let mut mu = vec![0.0; n];
        let mut z = vec![0.0; n];

        for i in 1..n - 1 {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        let mut c = vec![0.0; n];
        let mut coeffs = vec![[0.0; 4]; n - 1];

        // Back substitution
        for j in (0..n - 1).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            let b = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            let d = (c[j + 1] - c[j]) / (3.0 * h[j]);
            coeffs[j] = [y[j], b, c[j], d];
        }

        coeffs
    }

    /// Span of the anchor points
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate the spline at a given x value
    ///
    /// Outside the anchor range the end segment's cubic is continued, so
    /// callers that need a hard domain must check `domain()` first.
    pub fn evaluate(&self, x: f64) -> f64 {
        let segment = self.find_segment(x);
        let dx = x - self.x[segment];
        let [a, b, c, d] = self.coeffs[segment];

        // Horner form of a + b*dx + c*dx^2 + d*dx^3
        a + dx * (b + dx * (c + dx * d))
    }

    /// Index of the left anchor of the segment containing x, clamped to the end segments
    fn find_segment(&self, x: f64) -> usize {
        let idx = self.x.partition_point(|&probe| probe <= x);
        idx.saturating_sub(1).min(self.coeffs.len() - 1)
    }
}
