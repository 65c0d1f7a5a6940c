// src/models/heston/heston_model.rs

//! Heston (1993) stochastic volatility model
//!
//! The variance follows a CIR process:
//!
//! dF/F = √v dW₁
//! dv = κ(θ − v) dt + η √v dW₂,   d⟨W₁, W₂⟩ = ρ dt
//!
//! where the parameters are:
//! - κ: mean-reversion speed of the variance
//! - θ: long-run variance
//! - η: volatility of variance
//! - ρ: correlation between the forward and its variance
//! - v₀: initial variance
//!
//! The characteristic function is written in the "little Heston trap" form
//! (Albrecher et al., 2007), with `g = (β − d)/(β + d)`, which stays on the principal
//! branch of the complex logarithm for long maturities.

use anyhow::{anyhow, Result};
use num_complex::Complex64;
use tracing::debug;

use crate::models::traits::CharacteristicFunction;

/// Parameters of the Heston model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Mean-reversion speed (κ > 0)
    pub kappa: f64,
    /// Long-run variance (θ ≥ 0)
    pub theta: f64,
    /// Volatility of variance (η > 0)
    pub eta: f64,
    /// Spot/variance correlation (ρ ∈ [-1, 1])
    pub rho: f64,
    /// Initial variance (v₀ ≥ 0)
    pub v0: f64,
}

/// Helper function to validate Heston parameters.
fn validate_heston_params(kappa: f64, theta: f64, eta: f64, rho: f64, v0: f64) -> Result<()> {
    if !(kappa > 0.0 && kappa.is_finite()) {
        return Err(anyhow!(
            "HestonParams validation: kappa (kappa={}) must be > 0 and finite",
            kappa
        ));
    }
    if !(theta >= 0.0 && theta.is_finite()) {
        return Err(anyhow!(
            "HestonParams validation: theta (theta={}) must be >= 0 and finite",
            theta
        ));
    }
    if !(eta > 0.0 && eta.is_finite()) {
        return Err(anyhow!(
            "HestonParams validation: eta (eta={}) must be > 0 and finite",
            eta
        ));
    }
    if !(-1.0..=1.0).contains(&rho) {
        return Err(anyhow!(
            "HestonParams validation: rho (rho={}) must be in [-1, 1]",
            rho
        ));
    }
    if !(v0 >= 0.0 && v0.is_finite()) {
        return Err(anyhow!(
            "HestonParams validation: v0 (v0={}) must be >= 0 and finite",
            v0
        ));
    }
    Ok(())
}

impl HestonParams {
    /// Creates new Heston parameters with validation.
    ///
    /// A violated Feller condition is reported at debug level but accepted.
    pub fn new(kappa: f64, theta: f64, eta: f64, rho: f64, v0: f64) -> Result<Self> {
        validate_heston_params(kappa, theta, eta, rho, v0)?;

        let params = Self {
            kappa,
            theta,
            eta,
            rho,
            v0,
        };
        if !params.is_feller_condition_satisfied() {
            debug!(
                kappa,
                theta, eta, "Feller condition 2κθ > η² violated; variance can reach zero"
            );
        }
        Ok(params)
    }

    /// Validates the current parameter set.
    pub fn validate(&self) -> Result<()> {
        validate_heston_params(self.kappa, self.theta, self.eta, self.rho, self.v0)
    }

    /// `2κθ > η²`: the variance process stays strictly positive.
    pub fn is_feller_condition_satisfied(&self) -> bool {
        2.0 * self.kappa * self.theta > self.eta * self.eta
    }
}

/// Characteristic function of `ln(F_T/F_0)` under Heston at maturity `t`.
pub fn characteristic_function(u: Complex64, t: f64, params: &HestonParams) -> Complex64 {
    let i = Complex64::i();
    let HestonParams {
        kappa,
        theta,
        eta,
        rho,
        v0,
    } = *params;
    let eta2 = eta * eta;

    let beta = kappa - rho * eta * i * u;
    let d = (beta * beta + eta2 * (i * u + u * u)).sqrt();
    let g = (beta - d) / (beta + d);
    let exp_dt = (-d * t).exp();

    let big_d = (beta - d) * (1.0 - exp_dt) / (eta2 * (1.0 - g * exp_dt));
    let big_c = kappa * (t * (beta - d) - 2.0 * ((1.0 - g * exp_dt) / (1.0 - g)).ln()) / eta2;

    (big_c * theta + big_d * v0).exp()
}

/// Heston characteristic function bound to a maturity, for the Lewis pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonCharacteristicFunction {
    pub params: HestonParams,
    pub t: f64,
}

impl HestonCharacteristicFunction {
    pub fn new(params: HestonParams, t: f64) -> Self {
        Self { params, t }
    }
}

impl CharacteristicFunction for HestonCharacteristicFunction {
    fn evaluate(&self, u: Complex64) -> Complex64 {
        characteristic_function(u, self.t, &self.params)
    }
}
