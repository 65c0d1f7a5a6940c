// demos/heston_smile_demo.rs

//! Heston prices and the Black implied volatility smile they produce
//!
//! Loads the pricing configuration from TOML, prices a strike strip with the Lewis
//! formula and inverts every call to a Black volatility.

use anyhow::Result;
use normvol_lib::models::heston::{implied_volatility, undiscounted_lewis_price};
use normvol_lib::{heston_price, HestonParams, PricingConfig};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[solver]
tolerance = 1e-20
max_iterations = 100

[quadrature]
order = 96
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Heston Smile Demo");
    println!("=================");

    let config = PricingConfig::from_toml_str(CONFIG)?;
    let quadrature = config.build_quadrature()?;
    println!("Quadrature nodes: {}", quadrature.order());

    // Feller is violated on purpose: 2κθ = 0.12 < η² = 0.25
    let params = HestonParams::new(1.5, 0.04, 0.5, -0.6, 0.04)?;
    println!(
        "κ={} θ={} η={} ρ={} v0={}  (Feller satisfied: {})",
        params.kappa,
        params.theta,
        params.eta,
        params.rho,
        params.v0,
        params.is_feller_condition_satisfied()
    );

    let forward: f64 = 100.0;
    for t in [0.25, 1.0, 3.0] {
        println!("\nT = {t}");
        println!("  {:>7} {:>12} {:>12} {:>10}", "strike", "call", "put", "black iv");
        for strike in [70.0, 85.0, 100.0, 115.0, 130.0] {
            let x = (forward / strike).ln();
            let call = heston_price(forward, strike, t, &params, true, &quadrature);
            let put = (forward * strike).sqrt()
                * undiscounted_lewis_price(x, t, &params, false, &quadrature);
            let iv = implied_volatility(x, t, &params, &quadrature);
            println!("  {:>7.1} {:>12.6} {:>12.6} {:>10.6}", strike, call, put, iv);
        }
    }

    Ok(())
}
