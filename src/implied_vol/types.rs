use crate::models::utils::OptionType;

/// Undiscounted option quote to invert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    pub option_type: OptionType,
    pub strike: f64,
    pub forward: f64,
    pub years_to_exp: f64,
    pub undiscounted_price: f64,
}

/// Implied volatility of one quote
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolResult {
    pub option_type: OptionType,
    pub strike: f64,
    pub forward: f64,
    pub years_to_exp: f64,
    /// Log-moneyness ln(F/K)
    pub log_moneyness: f64,
    /// Total volatility σ√T
    pub normalized_vol: f64,
    /// Annualized Black volatility; NaN when the quote cannot be inverted
    pub implied_vol: f64,
}
