//! Numerical building blocks shared by the pricers and the implied volatility solver:
//! standard normal distribution primitives, Gauss-Laguerre quadrature and a
//! Newton-Raphson root finder.

pub mod distributions;
pub mod newton;
pub mod quadrature;

pub use distributions::{erfcx, norm_cdf, norm_pdf, norm_quantile};
pub use newton::NewtonRaphson;
pub use quadrature::GaussLaguerre;

/// π
pub const PI: f64 = std::f64::consts::PI;
/// √(2π)
pub const SQRT_TWO_PI: f64 = 2.506_628_274_631_000_5;
/// 1/√2
pub const ONE_OVER_SQRT_TWO: f64 = std::f64::consts::FRAC_1_SQRT_2;
/// 1/√(2π)
pub const ONE_OVER_SQRT_TWO_PI: f64 = 0.398_942_280_401_432_7;
