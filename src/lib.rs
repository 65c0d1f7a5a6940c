//! # Normvol-Lib: Normalized Black Pricing, Heston Fourier Pricing and Implied Volatility
//!
//! `normvol-lib` prices European options in normalized Black-76 coordinates and inverts
//! prices back to implied volatilities to machine precision.
//!
//! ## Core Features
//!
//! - **Black Pricer**: four-region evaluation of the normalized Black call, accurate from
//!   deep out-of-the-money wings to very large total variance
//! - **Lewis Pricer**: Fourier pricing from any characteristic function with
//!   Gauss-Laguerre quadrature
//! - **Heston Model**: characteristic function in the "little trap" form
//! - **Implied Volatility**: rational cubic initial guess refined by Newton on a
//!   band-dependent objective
//!
//! ## Normalized Units
//!
//! With forward `F`, strike `K` and maturity `T`, the pricers take `x = ln(F/K)` and
//! `s = σ√T` and return the undiscounted price divided by `√(F·K)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use normvol_lib::{black_implied_volatility, black_price};
//!
//! let (forward, strike, t, sigma) = (100.0, 95.0, 0.5, 0.3);
//! let price = black_price(forward, strike, t, sigma, true);
//! let iv = black_implied_volatility(price, forward, strike, t, true);
//! assert!((iv - sigma).abs() < 1e-12);
//! ```
//!
//! ```rust
//! use normvol_lib::{default_configs, heston_price, HestonParams};
//!
//! let params = HestonParams::new(1.5, 0.04, 0.5, -0.6, 0.04)?;
//! let quadrature = default_configs::production().build_quadrature()?;
//! let price = heston_price(100.0, 110.0, 1.0, &params, true, &quadrature);
//! assert!(price > 0.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Configuration Presets
//!
//! - `production()`: 64 quadrature nodes, tight Newton tolerance
//! - `fast()`: 32 quadrature nodes, shorter iteration cap
//! - `research()`: 96 quadrature nodes

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod implied_vol;
pub mod math;
pub mod models;

// ================================================================================================
// IMPORTS
// ================================================================================================

use std::cmp::Ordering;

use tracing::debug;

use implied_vol::solver::annualize;
use models::utils::log_moneyness;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Configuration
pub use config::{PricingConfig, QuadratureConfig, SolverConfig};

// Numerical building blocks
pub use math::{erfcx, norm_cdf, norm_pdf, norm_quantile, GaussLaguerre, NewtonRaphson};

// Pricers
pub use models::black::{black_price, BlackCharacteristicFunction, Region};
pub use models::heston::{heston_price, HestonCharacteristicFunction, HestonParams};
pub use models::lewis::lewis_undiscounted_price;
pub use models::traits::CharacteristicFunction;
pub use models::utils::OptionType;

// Implied volatility
pub use implied_vol::{
    black_implied_volatility, black_implied_volatility_with_config, implied_normalized_vol,
    implied_normalized_vol_with_config, ImpliedVolResult, OptionQuote,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured pricing settings for common use cases.
///
/// # Available Configurations
///
/// - [`production()`]: Default accuracy
/// - [`fast()`]: Interactive use
/// - [`research()`]: Long-dated or strongly skewed Heston slices
pub mod default_configs {
    use crate::config::PricingConfig;

    /// Default configuration.
    ///
    /// **Characteristics:**
    /// - Quadrature order: 64
    /// - Newton tolerance: 1e-20, at most 100 iterations
    /// - Minimum vega at the initial guess: 1e-5
    ///
    /// # Example
    ///
    /// ```rust
    /// use normvol_lib::default_configs;
    ///
    /// let config = default_configs::production();
    /// assert_eq!(config.quadrature.order, 64);
    /// ```
    pub fn production() -> PricingConfig {
        PricingConfig::production()
    }

    /// Cheaper configuration for interactive use.
    ///
    /// **Characteristics:**
    /// - Quadrature order: 32
    /// - At most 50 Newton iterations
    pub fn fast() -> PricingConfig {
        PricingConfig::fast()
    }

    /// Denser quadrature.
    ///
    /// **Characteristics:**
    /// - Quadrature order: 96
    pub fn research() -> PricingConfig {
        PricingConfig::research()
    }
}

/// Invert a set of undiscounted option quotes to Black implied volatilities.
///
/// Each quote is inverted independently with `config.solver`. Quotes that cannot be
/// inverted (price outside the no-arbitrage bounds, non-positive maturity, vega too
/// small at the initial guess, Newton failure) get a NaN `implied_vol` instead of
/// aborting the batch.
///
/// # Returns
///
/// One [`ImpliedVolResult`] per quote, sorted by strike in ascending order.
///
/// # Example
///
/// ```rust
/// use normvol_lib::{black_price, default_configs, implied_vols_for_quotes, OptionQuote, OptionType};
///
/// let quotes: Vec<OptionQuote> = [110.0, 90.0, 100.0]
///     .iter()
///     .map(|&strike| OptionQuote {
///         option_type: OptionType::Call,
///         strike,
///         forward: 100.0,
///         years_to_exp: 0.25,
///         undiscounted_price: black_price(100.0, strike, 0.25, 0.4, true),
///     })
///     .collect();
///
/// let results = implied_vols_for_quotes(&quotes, &default_configs::fast());
/// assert_eq!(results[0].strike, 90.0);
/// assert!(results.iter().all(|r| (r.implied_vol - 0.4).abs() < 1e-10));
/// ```
pub fn implied_vols_for_quotes(
    quotes: &[OptionQuote],
    config: &PricingConfig,
) -> Vec<ImpliedVolResult> {
    let mut results = Vec::with_capacity(quotes.len());

    for quote in quotes {
        let x = log_moneyness(quote.forward, quote.strike);
        let normalized_vol = if quote.years_to_exp > 0.0 && quote.forward > 0.0 && quote.strike > 0.0
        {
            let beta = quote.undiscounted_price / (quote.forward * quote.strike).sqrt();
            implied_normalized_vol_with_config(beta, x, quote.option_type.is_call(), &config.solver)
        } else {
            f64::NAN
        };
        let implied_vol = annualize(normalized_vol, quote.years_to_exp);
        if implied_vol.is_nan() {
            debug!(
                strike = quote.strike,
                option_type = %quote.option_type,
                price = quote.undiscounted_price,
                "quote could not be inverted"
            );
        }

        results.push(ImpliedVolResult {
            option_type: quote.option_type,
            strike: quote.strike,
            forward: quote.forward,
            years_to_exp: quote.years_to_exp,
            log_moneyness: x,
            normalized_vol,
            implied_vol,
        });
    }

    results.sort_by(|a, b| a.strike.partial_cmp(&b.strike).unwrap_or(Ordering::Equal));
    results
}
