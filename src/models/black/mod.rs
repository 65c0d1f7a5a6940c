//! Normalized, undiscounted Black-76 pricing.
//!
//! Prices are expressed in terms of log-moneyness `x = ln(F/K)` and total volatility
//! `s = σ√T`, divided by `√(F·K)`. Multiply by `√(F·K)` and a discount factor to get a
//! market price. Out-of-the-money calls (`x ≤ 0`) are evaluated directly through one of
//! four [`Region`]s; every other case is reduced to it through the intrinsic value.

pub mod regions;

use num_complex::Complex64;

use crate::math::{GaussLaguerre, ONE_OVER_SQRT_TWO_PI};
use crate::models::lewis::lewis_undiscounted_price;
use crate::models::traits::CharacteristicFunction;
use crate::models::utils::{log_moneyness, normalized_intrinsic_value};

pub use regions::Region;

/// Normalized call price.
pub fn call_price(x: f64, s: f64) -> f64 {
    if x > 0.0 {
        return normalized_intrinsic_value(x, true) + call_price(-x, s);
    }
    if s <= 0.0 {
        return normalized_intrinsic_value(x, true);
    }
    Region::classify(x, s).call_price(x / s, 0.5 * s)
}

/// Normalized call or put price; `s ≤ 0` yields the intrinsic value.
pub fn price(x: f64, s: f64, is_call: bool) -> f64 {
    if s <= 0.0 {
        return normalized_intrinsic_value(x, is_call);
    }
    // put(x) = call(-x) in normalized units
    let x = if is_call { x } else { -x };
    call_price(x, s)
}

/// ∂price/∂s.
pub fn vega(x: f64, s: f64) -> f64 {
    if s <= 0.0 {
        return 0.0;
    }
    ONE_OVER_SQRT_TWO_PI * (-0.5 * (x * x / (s * s) + 0.25 * s * s)).exp()
}

/// Vega scaled second derivative, `(x/s³ − 1/8)·vega`.
pub fn volga(x: f64, s: f64) -> f64 {
    if s <= 0.0 {
        return 0.0;
    }
    (x / (s * s * s) - 0.125) * vega(x, s)
}

/// Black characteristic function of `ln(F_T/F_0)` with total volatility `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackCharacteristicFunction {
    pub normalized_sigma: f64,
}

impl CharacteristicFunction for BlackCharacteristicFunction {
    fn evaluate(&self, u: Complex64) -> Complex64 {
        let s2 = self.normalized_sigma * self.normalized_sigma;
        (-0.5 * u * (u + Complex64::i()) * s2).exp()
    }
}

/// Normalized Black price computed through the Lewis integral instead of the closed form.
pub fn lewis_price(x: f64, s: f64, is_call: bool, quadrature: &GaussLaguerre) -> f64 {
    let cf = BlackCharacteristicFunction {
        normalized_sigma: s,
    };
    lewis_undiscounted_price(x, is_call, &cf, quadrature)
}

/// Undiscounted Black-76 price in market units.
pub fn black_price(forward: f64, strike: f64, t: f64, sigma: f64, is_call: bool) -> f64 {
    let x = log_moneyness(forward, strike);
    let s = sigma * t.max(0.0).sqrt();
    (forward * strike).sqrt() * price(x, s, is_call)
}

#[cfg(test)]
mod tests {
    use super::regions::*;
    use super::*;

    #[test]
    fn test_region_classification() {
        assert_eq!(Region::classify(-12.0, 0.5), Region::AsymptoticExpansion);
        assert_eq!(Region::classify(-1.0, 0.2), Region::SmallVariance);
        assert_eq!(Region::classify(-0.1, 2.0), Region::Direct);
        assert_eq!(Region::classify(-2.0, 1.0), Region::ScaledComplementary);
    }

    #[test]
    fn test_overlapping_regions_agree() {
        let rel = |a: f64, b: f64| (a - b).abs() / b.abs();
        assert!(rel(direct(-1.0, 0.5), scaled_complementary(-1.0, 0.5)) < 1e-13);
        assert!(rel(small_variance_expansion(-0.5, 0.2), direct(-0.5, 0.2)) < 1e-13);
        assert!(rel(asymptotic_expansion(-12.0, 0.3), scaled_complementary(-12.0, 0.3)) < 1e-12);
        assert!(rel(small_variance_expansion(-2.0, 0.05), scaled_complementary(-2.0, 0.05)) < 1e-12);
    }

    #[test]
    fn test_volga_scaling() {
        let s = 0.7;
        assert!((volga(0.0, s) + 0.125 * vega(0.0, s)).abs() < 1e-16);
        let x = -0.4;
        let expected = (x / (s * s * s) - 0.125) * vega(x, s);
        assert!((volga(x, s) - expected).abs() < 1e-16);
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let (x, s, h) = (-0.4, 0.7, 1e-6);
        let fd = (price(x, s + h, true) - price(x, s - h, true)) / (2.0 * h);
        assert!((vega(x, s) - fd).abs() < 1e-8);
    }

    #[test]
    fn test_degenerate_volatility() {
        assert_eq!(vega(-0.3, 0.0), 0.0);
        assert_eq!(volga(-0.3, -1.0), 0.0);
        assert_eq!(price(-0.3, -1.0, true), 0.0);
    }
}
