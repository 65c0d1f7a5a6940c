#![allow(dead_code)] // each test binary uses a different subset

use normvol_lib::{GaussLaguerre, HestonParams, OptionType, PricingConfig};
use serde::Deserialize;

/// CSV row of the Black reference prices
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "option_type")]
    option_type: String,
    #[serde(rename = "forward")]
    forward: f64,
    #[serde(rename = "strike")]
    strike: f64,
    #[serde(rename = "years_to_exp")]
    years_to_exp: f64,
    #[serde(rename = "sigma")]
    sigma: f64,
    #[serde(rename = "price")]
    price: f64,
}

/// Black-76 reference case with an undiscounted price computed in extended precision
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCase {
    pub option_type: OptionType,
    pub forward: f64,
    pub strike: f64,
    pub years_to_exp: f64,
    pub sigma: f64,
    pub price: f64,
}

impl ReferenceCase {
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }
}

pub const REFERENCE_DATA_PATH: &str = "tests/data/black_reference.csv";

/// Load the Black reference prices
pub fn load_reference_cases(file_path: &str) -> Result<Vec<ReferenceCase>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let mut cases = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        cases.push(ReferenceCase {
            option_type: row.option_type.parse()?,
            forward: row.forward,
            strike: row.strike,
            years_to_exp: row.years_to_exp,
            sigma: row.sigma,
            price: row.price,
        });
    }

    Ok(cases)
}

/// Relative difference, falling back to absolute near zero
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    (actual - expected).abs() / scale
}

/// `(forward, log-moneyness)` of a spot setup with continuous rates
pub fn forward_setup(spot: f64, strike: f64, r: f64, q: f64, t: f64) -> (f64, f64) {
    let forward = spot * ((r - q) * t).exp();
    (forward, (forward / strike).ln())
}

/// Quadrature of the default configuration
pub fn default_quadrature() -> GaussLaguerre {
    PricingConfig::production()
        .build_quadrature()
        .expect("default quadrature must build")
}

/// Heston parameters with Feller satisfied, used across the Heston tests
pub fn standard_heston_params() -> HestonParams {
    HestonParams::new(2.0, 0.05, 0.3, 0.45, 0.05).expect("valid Heston parameters")
}

/// Heston parameters with a pronounced negative skew
pub fn skewed_heston_params() -> HestonParams {
    HestonParams::new(1.5, 0.04, 0.5, -0.6, 0.04).expect("valid Heston parameters")
}

/// Install a tracing subscriber honoring RUST_LOG; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
