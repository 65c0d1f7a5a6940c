// demos/pricing_demo.rs

//! Black-76 pricing and implied volatility inversion
//!
//! This example shows how to:
//! 1. Price calls and puts in market units and in normalized coordinates
//! 2. See which evaluation region handles each strike
//! 3. Invert a strip of quotes back to implied volatilities
//!
//! Run with `RUST_LOG=debug` to see why a quote could not be inverted.

use anyhow::Result;
use normvol_lib::models::black::{lewis_price, price};
use normvol_lib::{
    black_price, default_configs, implied_vols_for_quotes, OptionQuote, OptionType, Region,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Black-76 Pricing and Implied Volatility Demo");
    println!("============================================");

    let (spot, r, q, t): (f64, f64, f64, f64) = (100.0, 0.05, 0.02, 2.0);
    let forward = spot * ((r - q) * t).exp();
    let discount = (-r * t).exp();
    let sigma = 0.2;

    println!("\nStep 1: Pricing at S={spot}, r={r}, q={q}, T={t}, σ={sigma}");
    for strike in [80.0, 100.0, 120.0] {
        let call = discount * black_price(forward, strike, t, sigma, true);
        let put = discount * black_price(forward, strike, t, sigma, false);
        println!("  K={:>6.1}  call={:>9.5}  put={:>9.5}", strike, call, put);
    }

    println!("\nStep 2: Normalized prices and evaluation regions");
    let config = default_configs::production();
    let quadrature = config.build_quadrature()?;
    for (x, s) in [(-6.0, 0.3), (-0.1, 0.2), (0.0, 3.0), (-2.3, 1.2)] {
        let closed = price(x, s, true);
        let fourier = lewis_price(x, s, true, &quadrature);
        println!(
            "  x={:>5.2} s={:>4.2}  {:<20}  closed={:.6e}  lewis={:.6e}",
            x,
            s,
            format!("{:?}", Region::classify(x, s)),
            closed,
            fourier
        );
    }

    println!("\nStep 3: Inverting a quote strip");
    let smile = |strike: f64| 0.2 - 0.1 * (strike / forward).ln() + 0.4 * (strike / forward).ln().powi(2);
    let mut quotes: Vec<OptionQuote> = [60.0, 80.0, 95.0, 105.0, 120.0, 150.0]
        .iter()
        .map(|&strike| {
            let option_type = if strike < forward {
                OptionType::Put
            } else {
                OptionType::Call
            };
            OptionQuote {
                option_type,
                strike,
                forward,
                years_to_exp: t,
                undiscounted_price: black_price(forward, strike, t, smile(strike), option_type.is_call()),
            }
        })
        .collect();
    // below intrinsic: reported as NaN
    quotes.push(OptionQuote {
        option_type: OptionType::Call,
        strike: 90.0,
        forward,
        years_to_exp: t,
        undiscounted_price: 1.0,
    });

    for result in implied_vols_for_quotes(&quotes, &config) {
        println!(
            "  {:<4} K={:>6.1}  x={:>7.4}  iv={:>8.5}  expected={:>8.5}",
            result.option_type,
            result.strike,
            result.log_moneyness,
            result.implied_vol,
            smile(result.strike)
        );
    }

    Ok(())
}
