//! Newton refinement of the initial guess and the public inversion entry points.

use tracing::debug;

use crate::config::SolverConfig;
use crate::implied_vol::initial_guess::InitialData;
use crate::math::NewtonRaphson;
use crate::models::black::{call_price, vega};
use crate::models::utils::{log_moneyness, normalized_intrinsic_value, put_call_flag};

/// Price band of the reduced out-of-the-money call, selecting the Newton objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// `β < b_l`: match `ln(1/b)`, which is close to linear in `1/s`
    Lower,
    /// `β ≤ max(b_u, b_max/2)`: match the price itself
    Central,
    /// Otherwise: match `ln(b_max − b)`
    Upper,
}

impl PriceBand {
    pub fn classify(data: &InitialData) -> Self {
        if data.beta < data.b_l {
            PriceBand::Lower
        } else if data.beta <= data.b_u.max(0.5 * data.b_max) {
            PriceBand::Central
        } else {
            PriceBand::Upper
        }
    }
}

/// Newton objective `g(s)` and its derivative for one reduced price.
#[derive(Debug, Clone, Copy)]
struct NewtonTarget {
    band: PriceBand,
    beta: f64,
    x: f64,
    b_max: f64,
}

impl NewtonTarget {
    fn new(data: &InitialData) -> Self {
        Self {
            band: PriceBand::classify(data),
            beta: data.beta,
            x: data.x,
            b_max: data.b_max,
        }
    }

    fn value(&self, s: f64) -> f64 {
        let b = call_price(self.x, s);
        match self.band {
            PriceBand::Lower => (1.0 / b).ln() - (1.0 / self.beta).ln(),
            PriceBand::Central => b - self.beta,
            PriceBand::Upper => ((self.b_max - self.beta) / (self.b_max - b)).ln(),
        }
    }

    fn derivative(&self, s: f64) -> f64 {
        let v = vega(self.x, s);
        match self.band {
            PriceBand::Lower => -v / call_price(self.x, s),
            PriceBand::Central => v,
            PriceBand::Upper => v / (self.b_max - call_price(self.x, s)),
        }
    }
}

fn refine(data: &InitialData, guess: f64, config: &SolverConfig) -> f64 {
    let target = NewtonTarget::new(data);
    let solver = NewtonRaphson::new(guess)
        .with_tolerance(config.tolerance)
        .with_max_iterations(config.max_iterations);

    match solver.solve(|s| target.value(s), |s| target.derivative(s)) {
        Ok(s) => s,
        Err(e) => {
            debug!(
                beta = data.beta,
                x = data.x,
                band = ?target.band,
                error = %e,
                "implied volatility did not converge"
            );
            f64::NAN
        }
    }
}

/// Initial guess followed by Newton refinement, without the input domain checks.
///
/// Returns `0` when the reduced price is not positive and NaN when Newton fails.
pub fn newton_normalized_vol(beta: f64, x: f64, is_call: bool, config: &SolverConfig) -> f64 {
    let data = InitialData::new(beta, x, is_call);
    if data.beta <= 0.0 {
        return 0.0;
    }
    refine(&data, data.initial_guess(), config)
}

/// Normalized volatility `s = σ√T` reproducing the normalized price `beta`.
pub fn implied_normalized_vol(beta: f64, x: f64, is_call: bool) -> f64 {
    implied_normalized_vol_with_config(beta, x, is_call, &SolverConfig::default())
}

/// [`implied_normalized_vol`] with explicit solver settings.
///
/// NaN when `beta` is negative, below the intrinsic value or at/above the forward-side
/// bound `e^{±x/2}`, when the vega at the initial guess is below `config.min_vega`, or when
/// Newton fails. A price equal to the intrinsic value yields `0`.
pub fn implied_normalized_vol_with_config(
    beta: f64,
    x: f64,
    is_call: bool,
    config: &SolverConfig,
) -> f64 {
    if beta.is_nan() || beta < 0.0 {
        debug!(beta, x, "negative or NaN price has no implied volatility");
        return f64::NAN;
    }
    let intrinsic = normalized_intrinsic_value(x, is_call);
    let upper_bound = (0.5 * put_call_flag(is_call) * x).exp();
    if beta < intrinsic || beta >= upper_bound {
        debug!(
            beta,
            x, intrinsic, upper_bound, "price outside the no-arbitrage bounds"
        );
        return f64::NAN;
    }

    let data = InitialData::new(beta, x, is_call);
    if data.beta <= 0.0 {
        return 0.0;
    }

    let guess = data.initial_guess();
    let vega_at_guess = vega(data.x, guess);
    if !(vega_at_guess.abs() >= config.min_vega) {
        debug!(
            beta,
            x,
            guess,
            vega = vega_at_guess,
            "vega at the initial guess too small, inversion is ill-conditioned"
        );
        return f64::NAN;
    }

    refine(&data, guess, config)
}

/// Annualized Black volatility from an undiscounted market price.
pub fn black_implied_volatility(
    undiscounted_price: f64,
    forward: f64,
    strike: f64,
    t: f64,
    is_call: bool,
) -> f64 {
    black_implied_volatility_with_config(
        undiscounted_price,
        forward,
        strike,
        t,
        is_call,
        &SolverConfig::default(),
    )
}

/// [`black_implied_volatility`] with explicit solver settings.
pub fn black_implied_volatility_with_config(
    undiscounted_price: f64,
    forward: f64,
    strike: f64,
    t: f64,
    is_call: bool,
    config: &SolverConfig,
) -> f64 {
    if !(undiscounted_price >= 0.0) || !(t > 0.0) || !(forward > 0.0) || !(strike > 0.0) {
        return f64::NAN;
    }
    let beta = undiscounted_price / (forward * strike).sqrt();
    let x = log_moneyness(forward, strike);
    annualize(
        implied_normalized_vol_with_config(beta, x, is_call, config),
        t,
    )
}

/// `σ = s/√t`; non-positive or NaN normalized volatilities map to NaN.
pub(crate) fn annualize(s: f64, t: f64) -> f64 {
    if s > 0.0 && t > 0.0 {
        s / t.sqrt()
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black::price;

    #[test]
    fn test_band_classification() {
        let x = -0.8;
        let lower = InitialData::new(call_price(x, 0.3), x, true);
        let central = InitialData::new(call_price(x, 1.2), x, true);
        let upper = InitialData::new(call_price(x, 6.0), x, true);
        assert_eq!(PriceBand::classify(&lower), PriceBand::Lower);
        assert_eq!(PriceBand::classify(&central), PriceBand::Central);
        assert_eq!(PriceBand::classify(&upper), PriceBand::Upper);

        let config = SolverConfig::default();
        for (data, s) in [(lower, 0.3), (central, 1.2), (upper, 6.0)] {
            let recovered = newton_normalized_vol(data.beta, x, true, &config);
            assert!((recovered - s).abs() < 1e-12, "s={} got {}", s, recovered);
        }
    }

    #[test]
    fn test_upper_band_converges_at_price_noise_floor() {
        let config = SolverConfig {
            min_vega: 0.0,
            ..SolverConfig::default()
        };
        for (x, s, is_call) in [(0.25, 6.91, true), (-1.8, 6.83, true), (0.25, 6.91, false)] {
            let beta = price(x, s, is_call);
            let data = InitialData::new(beta, x, is_call);
            assert_eq!(PriceBand::classify(&data), PriceBand::Upper);
            let recovered = newton_normalized_vol(beta, x, is_call, &config);
            assert!(
                (recovered - s).abs() < 1e-9,
                "x={} s={} call={} got {}",
                x,
                s,
                is_call,
                recovered
            );
        }
    }

    #[test]
    fn test_recovers_volatility_across_moneyness() {
        let config = SolverConfig::default();
        for &x in &[-1.5, -0.8, 0.0, 0.8] {
            for &s in &[0.5, 1.2, 3.0] {
                for is_call in [true, false] {
                    let beta = price(x, s, is_call);
                    let recovered = implied_normalized_vol_with_config(beta, x, is_call, &config);
                    assert!(
                        (recovered - s).abs() < 1e-10,
                        "x={} s={} call={} got {}",
                        x,
                        s,
                        is_call,
                        recovered
                    );
                }
            }
        }
    }

    #[test]
    fn test_domain_edges() {
        assert!(implied_normalized_vol(-1e-3, -0.5, true).is_nan());
        assert!(implied_normalized_vol(f64::NAN, -0.5, true).is_nan());
        assert_eq!(implied_normalized_vol(0.0, -0.5, true), 0.0);
        // at the upper bound e^{x/2}
        assert!(implied_normalized_vol((-0.25f64).exp(), -0.5, true).is_nan());
        // below intrinsic
        let intrinsic = normalized_intrinsic_value(0.5, true);
        assert!(implied_normalized_vol(0.5 * intrinsic, 0.5, true).is_nan());
        assert_eq!(implied_normalized_vol(intrinsic, 0.5, true), 0.0);
    }

    #[test]
    fn test_min_vega_guard() {
        // deep out of the money at tiny volatility: vega at the guess is far below 1e-5
        let beta = call_price(-3.0, 0.2);
        assert!(beta > 0.0);
        assert!(implied_normalized_vol(beta, -3.0, true).is_nan());

        let unguarded = SolverConfig {
            min_vega: 0.0,
            ..SolverConfig::default()
        };
        let s = implied_normalized_vol_with_config(beta, -3.0, true, &unguarded);
        assert!((s - 0.2).abs() < 1e-8);
    }

    #[test]
    fn test_market_level_inversion() {
        let (forward, strike, t, sigma): (f64, f64, f64, f64) = (100.0, 90.0, 1.5, 0.25);
        let s = sigma * t.sqrt();
        let market = (forward * strike).sqrt() * price(log_moneyness(forward, strike), s, false);
        let recovered = black_implied_volatility(market, forward, strike, t, false);
        assert!((recovered - sigma).abs() < 1e-10);

        assert!(black_implied_volatility(-1.0, forward, strike, t, true).is_nan());
        assert!(black_implied_volatility(market, forward, strike, 0.0, false).is_nan());
        assert!(black_implied_volatility(0.0, forward, strike, t, false).is_nan());
    }
}
