use anyhow::{bail, Result};

use crate::math::GaussLaguerre;

/// Newton refinement settings of the implied volatility solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Residual/step tolerance of the Newton iteration
    pub tolerance: f64,
    /// Iteration cap; exceeding it yields NaN
    pub max_iterations: usize,
    /// Smallest vega at the initial guess for which inversion is attempted
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            min_vega: default_min_vega(),
        }
    }
}

/// Gauss-Laguerre settings for the Lewis pricer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadratureConfig {
    /// Number of quadrature nodes
    pub order: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            order: default_quadrature_order(),
        }
    }
}

/// Main configuration struct for pricing and inversion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PricingConfig {
    pub solver: SolverConfig,
    pub quadrature: QuadratureConfig,
}

impl PricingConfig {
    /// Default settings: 64 quadrature nodes, 1e-20 Newton tolerance, 100 iterations
    pub fn production() -> Self {
        Self::default()
    }

    /// Cheaper quadrature and a shorter iteration cap for interactive use
    pub fn fast() -> Self {
        Self {
            solver: SolverConfig {
                max_iterations: 50,
                ..SolverConfig::default()
            },
            quadrature: QuadratureConfig { order: 32 },
        }
    }

    /// Denser quadrature for long-dated or strongly skewed Heston slices
    pub fn research() -> Self {
        Self {
            solver: SolverConfig::default(),
            quadrature: QuadratureConfig { order: 96 },
        }
    }

    /// Parses a TOML document; missing fields fall back to the defaults.
    ///
    /// ```toml
    /// [solver]
    /// max_iterations = 50
    ///
    /// [quadrature]
    /// order = 32
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.solver.tolerance > 0.0 && self.solver.tolerance.is_finite()) {
            bail!(
                "Solver tolerance must be > 0 and finite, got {}",
                self.solver.tolerance
            );
        }
        if self.solver.max_iterations == 0 {
            bail!("Solver max_iterations must be positive");
        }
        if !(self.solver.min_vega >= 0.0 && self.solver.min_vega.is_finite()) {
            bail!(
                "Solver min_vega must be >= 0 and finite, got {}",
                self.solver.min_vega
            );
        }
        if self.quadrature.order == 0 {
            bail!("Quadrature order must be positive");
        }
        Ok(())
    }

    /// Builds the Gauss-Laguerre rule described by `quadrature`.
    pub fn build_quadrature(&self) -> Result<GaussLaguerre> {
        GaussLaguerre::new(self.quadrature.order)
    }
}

fn default_tolerance() -> f64 {
    1e-20
}

fn default_max_iterations() -> usize {
    100
}

fn default_min_vega() -> f64 {
    1e-5
}

fn default_quadrature_order() -> usize {
    64
}
