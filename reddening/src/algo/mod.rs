pub mod integrate;
pub mod spline;

pub use integrate::trapezoid;
pub use spline::{CubicSpline, SplineError};
