mod test_utils;

use normvol_lib::default_configs;
use normvol_lib::models::black::price;
use normvol_lib::models::heston::{implied_volatility, undiscounted_lewis_price};
use normvol_lib::{heston_price, GaussLaguerre, HestonParams};
use test_utils::{
    default_quadrature, forward_setup, init_tracing, skewed_heston_params, standard_heston_params,
};

/// Discounted Heston call for S=100, K=100, r=5%, q=1%, T=1.5
#[test]
fn test_heston_concrete_price() {
    init_tracing();
    let quadrature = GaussLaguerre::new(64).expect("Failed to build quadrature");
    let params = standard_heston_params();
    let (r, t) = (0.05, 1.5);
    let (forward, x) = forward_setup(100.0, 100.0, r, 0.01, t);

    let normalized = undiscounted_lewis_price(x, t, &params, true, &quadrature);
    let call = (forward * 100.0).sqrt() * normalized * (-r * t).exp();
    println!("Heston call = {:.6}", call);

    assert!((call - 13.2561).abs() < 1e-4);
}

#[test]
fn test_market_level_price_matches_normalized() {
    let quadrature = default_quadrature();
    let params = standard_heston_params();
    let (forward, strike, t): (f64, f64, f64) = (104.0, 95.0, 0.8);
    let x = (forward / strike).ln();

    for is_call in [true, false] {
        let market = heston_price(forward, strike, t, &params, is_call, &quadrature);
        let normalized = undiscounted_lewis_price(x, t, &params, is_call, &quadrature);
        assert!((market - (forward * strike).sqrt() * normalized).abs() < 1e-12);
    }
}

/// Vanishing vol-of-vol with v0 = θ collapses Heston onto Black with σ = √θ
#[test]
fn test_heston_reduces_to_black() {
    let quadrature = default_quadrature();
    let params = HestonParams::new(2.0, 0.04, 1e-3, -0.5, 0.04).expect("valid parameters");
    let t: f64 = 1.0;
    let s = 0.2 * t.sqrt();

    for &x in &[-0.3, 0.0, 0.2] {
        let heston = undiscounted_lewis_price(x, t, &params, true, &quadrature);
        let black = price(x, s, true);
        assert!(
            (heston - black).abs() < 1e-4,
            "x={}: heston={} black={}",
            x,
            heston,
            black
        );
    }
}

#[test]
fn test_put_call_parity() {
    let quadrature = default_quadrature();
    let params = skewed_heston_params();
    for &x in &[-0.4, -0.1, 0.0, 0.25] {
        let call = undiscounted_lewis_price(x, 1.2, &params, true, &quadrature);
        let put = undiscounted_lewis_price(x, 1.2, &params, false, &quadrature);
        let parity = (0.5 * x).exp() - (-0.5 * x).exp();
        assert!((call - put - parity).abs() < 1e-14);
        assert!(put > 0.0);
    }
}

#[test]
fn test_call_prices_decrease_with_strike() {
    let quadrature = default_quadrature();
    let params = skewed_heston_params();
    let strikes = [80.0, 100.0, 110.0, 130.0];
    let prices: Vec<f64> = strikes
        .iter()
        .map(|&k| heston_price(100.0, k, 1.0, &params, true, &quadrature))
        .collect();

    for pair in prices.windows(2) {
        assert!(pair[0] > pair[1], "prices not decreasing: {:?}", prices);
    }
    assert!(prices[0] > 20.0, "deep ITM call must exceed intrinsic");
}

#[test]
fn test_quadrature_presets_agree() {
    let params = skewed_heston_params();
    let production = default_configs::production().build_quadrature().unwrap();
    let research = default_configs::research().build_quadrature().unwrap();

    for &strike in &[80.0, 100.0, 110.0, 130.0] {
        let a = heston_price(100.0, strike, 1.0, &params, true, &production);
        let b = heston_price(100.0, strike, 1.0, &params, true, &research);
        assert!((a - b).abs() < 1e-3, "K={}: {} vs {}", strike, a, b);
    }
}

#[test]
fn test_heston_implied_volatility() {
    let quadrature = default_quadrature();
    let flat = HestonParams::new(2.0, 0.04, 1e-3, -0.5, 0.04).expect("valid parameters");
    let iv = implied_volatility(0.1, 1.0, &flat, &quadrature);
    assert!((iv - 0.2).abs() < 1e-3, "iv={}", iv);

    // negative correlation produces a downward sloping smile
    let skewed = skewed_heston_params();
    let low_strike = implied_volatility(0.2, 1.0, &skewed, &quadrature);
    let high_strike = implied_volatility(-0.2, 1.0, &skewed, &quadrature);
    assert!(low_strike > high_strike, "{} <= {}", low_strike, high_strike);

    assert!(implied_volatility(0.1, 0.0, &flat, &quadrature).is_nan());
}

#[test]
fn test_feller_condition() {
    assert!(standard_heston_params().is_feller_condition_satisfied());
    let violating = HestonParams::new(0.5, 0.02, 0.5, -0.7, 0.04).expect("Feller is not enforced");
    assert!(!violating.is_feller_condition_satisfied());
    assert!(violating.validate().is_ok());
}

#[test]
fn test_invalid_params_rejected() {
    assert!(HestonParams::new(-1.0, 0.04, 0.5, -0.6, 0.04).is_err());
    assert!(HestonParams::new(1.5, 0.04, 0.5, -1.01, 0.04).is_err());
    assert!(HestonParams::new(1.5, f64::INFINITY, 0.5, -0.6, 0.04).is_err());
}
