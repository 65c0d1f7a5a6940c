pub mod heston_model;

use crate::implied_vol::implied_normalized_vol;
use crate::implied_vol::solver::annualize;
use crate::math::GaussLaguerre;
use crate::models::lewis::lewis_undiscounted_price;
use crate::models::utils::log_moneyness;

pub use heston_model::{characteristic_function, HestonCharacteristicFunction, HestonParams};

/// Normalized undiscounted Heston price at log-moneyness `x` and maturity `t`.
pub fn undiscounted_lewis_price(
    x: f64,
    t: f64,
    params: &HestonParams,
    is_call: bool,
    quadrature: &GaussLaguerre,
) -> f64 {
    let cf = HestonCharacteristicFunction::new(*params, t);
    lewis_undiscounted_price(x, is_call, &cf, quadrature)
}

/// Annualized Black volatility of the Heston call at `x`; NaN for `t ≤ 0` or when the
/// Heston price cannot be inverted.
pub fn implied_volatility(
    x: f64,
    t: f64,
    params: &HestonParams,
    quadrature: &GaussLaguerre,
) -> f64 {
    if !(t > 0.0) {
        return f64::NAN;
    }
    let beta = undiscounted_lewis_price(x, t, params, true, quadrature);
    annualize(implied_normalized_vol(beta, x, true), t)
}

/// Undiscounted Heston price in market units.
pub fn heston_price(
    forward: f64,
    strike: f64,
    t: f64,
    params: &HestonParams,
    is_call: bool,
    quadrature: &GaussLaguerre,
) -> f64 {
    let x = log_moneyness(forward, strike);
    (forward * strike).sqrt() * undiscounted_lewis_price(x, t, params, is_call, quadrature)
}
