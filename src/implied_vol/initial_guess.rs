//! Initial guess for the normalized implied volatility.
//!
//! The out-of-the-money call price `b(s)` at fixed `x ≤ 0` is split into four bands by
//! the reference volatilities `σ_l < σ_c < σ_u`. In the two central bands `s(b)` itself
//! is interpolated by a rational cubic. In the outer bands the price is first mapped
//! through a transform that makes it nearly linear in the volatility's asymptotic
//! variable, interpolated there, and mapped back.

use std::f64::consts::PI;

use crate::implied_vol::rational_cubic::RationalCubic;
use crate::math::{norm_cdf, norm_pdf, norm_quantile};
use crate::models::black::{call_price, vega};
use crate::models::utils::normalized_intrinsic_value;

/// Low-volatility transform `f(b) = 2π|x|·Φ(z)³ / (3√3)`, `z = −|x|/(√3·s)`.
pub mod left_asymptotic {
    use super::*;

    fn z(x: f64, s: f64) -> f64 {
        -x.abs() / (3f64.sqrt() * s)
    }

    pub fn value(x: f64, s: f64) -> f64 {
        let c = norm_cdf(z(x, s));
        2.0 * PI * c * c * c * x.abs() / (3.0 * 3f64.sqrt())
    }

    /// `df/db`
    pub fn first_derivative(x: f64, s: f64) -> f64 {
        let z = z(x, s);
        let c = norm_cdf(z);
        2.0 * PI * z * z * c * c * (z * z + s * s / 8.0).exp()
    }

    /// `d²f/db²`
    pub fn second_derivative(x: f64, s: f64) -> f64 {
        let z = z(x, s);
        let c = norm_cdf(z);
        let p = norm_pdf(z);
        let s2 = s * s;
        let scale = (PI / 6.0) * (z * z / (s2 * s)) * c * (2.0 * z * z + s2 / 4.0).exp();
        scale * (8.0 * 3f64.sqrt() * s * x.abs() + (3.0 * s2 * (s2 - 8.0) - 8.0 * x * x) * c / p)
    }

    /// Inverse of [`value`]: the volatility whose transformed price is `f`.
    pub fn volatility(x: f64, f: f64) -> f64 {
        let a = f / (2.0 * PI * x.abs());
        (x / (3f64.sqrt() * norm_quantile(3f64.sqrt() * a.powf(1.0 / 3.0)))).abs()
    }
}

/// High-volatility transform `f(b) = Φ(−s/2)`.
pub mod right_asymptotic {
    use super::*;

    pub fn value(s: f64) -> f64 {
        norm_cdf(-0.5 * s)
    }

    /// `df/db`
    pub fn first_derivative(x: f64, s: f64) -> f64 {
        if x.abs() < f64::MIN_POSITIVE {
            return -0.5;
        }
        -0.5 * (0.5 * x * x / (s * s)).exp()
    }

    /// `d²f/db²`
    pub fn second_derivative(x: f64, s: f64) -> f64 {
        if x.abs() < f64::MIN_POSITIVE {
            return 0.0;
        }
        let s2 = s * s;
        (s2 / 8.0 + x * x / s2).exp() * (PI / 2.0).sqrt() * x * x / (s2 * s)
    }

    /// Inverse of [`value`].
    pub fn volatility(f: f64) -> f64 {
        -2.0 * norm_quantile(f)
    }
}

/// Reduced inputs and reference points shared by the initial guess and the Newton stage.
///
/// `x` and `beta` always describe an out-of-the-money call (`x ≤ 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialData {
    /// Reduced normalized price
    pub beta: f64,
    /// Reduced log-moneyness
    pub x: f64,
    /// Upper price bound `e^{x/2}`
    pub b_max: f64,
    pub sigma_l: f64,
    pub sigma_c: f64,
    pub sigma_u: f64,
    pub b_l: f64,
    pub b_c: f64,
    pub b_u: f64,
    /// Vega at `σ_c`
    pub v_c: f64,
}

impl InitialData {
    pub fn new(beta: f64, x: f64, is_call: bool) -> Self {
        let (beta, is_call) = if x * (if is_call { 1.0 } else { -1.0 }) > 0.0 {
            let reduced = (beta - normalized_intrinsic_value(x, is_call)).max(0.0);
            (reduced.abs(), !is_call)
        } else {
            (beta, is_call)
        };
        let x = if is_call { x } else { -x };

        let b_max = (0.5 * x).exp();
        let sigma_c = (2.0 * x.abs()).sqrt();
        let b_c = call_price(x, sigma_c);
        let v_c = vega(x, sigma_c);

        let (sigma_u, sigma_l) = if v_c > f64::MIN_POSITIVE {
            (sigma_c + (b_max - b_c) / v_c, sigma_c - b_c / v_c)
        } else {
            (sigma_c, sigma_c)
        };

        Self {
            beta,
            x,
            b_max,
            sigma_l,
            sigma_c,
            sigma_u,
            b_l: call_price(x, sigma_l),
            b_c,
            b_u: call_price(x, sigma_u),
            v_c,
        }
    }

    /// Rational cubic estimate of the volatility matching `self.beta`.
    pub fn initial_guess(&self) -> f64 {
        let Self { beta, x, .. } = *self;

        if beta < self.b_l {
            let f_l = left_asymptotic::value(x, self.sigma_l);
            let df_l = left_asymptotic::first_derivative(x, self.sigma_l);
            let ddf_l = left_asymptotic::second_derivative(x, self.sigma_l);
            let segment = RationalCubic::new(0.0, self.b_l, 0.0, f_l, 1.0, df_l);
            let r = segment.convex_shape_from_right_curvature(ddf_l, true);
            left_asymptotic::volatility(x, segment.interpolate(beta, r))
        } else if beta <= self.b_c {
            let segment = RationalCubic::new(
                self.b_l,
                self.b_c,
                self.sigma_l,
                self.sigma_c,
                1.0 / vega(x, self.sigma_l),
                1.0 / self.v_c,
            );
            let r = segment.convex_shape_from_right_curvature(0.0, false);
            segment.interpolate(beta, r)
        } else if beta <= self.b_u {
            let segment = RationalCubic::new(
                self.b_c,
                self.b_u,
                self.sigma_c,
                self.sigma_u,
                1.0 / self.v_c,
                1.0 / vega(x, self.sigma_u),
            );
            let r = segment.convex_shape_from_left_curvature(0.0, false);
            segment.interpolate(beta, r)
        } else {
            let f_u = right_asymptotic::value(self.sigma_u);
            let df_u = right_asymptotic::first_derivative(x, self.sigma_u);
            let ddf_u = right_asymptotic::second_derivative(x, self.sigma_u);
            let segment = RationalCubic::new(self.b_u, self.b_max, f_u, 0.0, df_u, -0.5);
            let r = segment.convex_shape_from_left_curvature(ddf_u, true);
            right_asymptotic::volatility(segment.interpolate(beta, r))
        }
    }
}

/// Initial guess for the normalized volatility of a call or put priced at `beta`.
pub fn initial_guess(beta: f64, x: f64, is_call: bool) -> f64 {
    InitialData::new(beta, x, is_call).initial_guess()
}
