//! Newton-Raphson root finding on top of the `roots` crate.
//!
//! `roots` drives the iteration; [`NewtonConvergency`] decides when to stop. Besides the
//! absolute residual/step tolerance it accepts a step that has shrunk to the
//! floating-point resolution of the iterate, and a tiny step that no longer shrinks.
//! A tolerance such as `1e-20` cannot be met by a step on an O(1) double, and near the
//! noise floor of `f` the iterate bounces instead of converging.

use anyhow::{anyhow, Result};
use roots::{find_root_newton_raphson, Convergency};
use tracing::trace;

/// Steps within this many ULPs of the iterate count as converged.
const STALL_ULPS: f64 = 4096.0;

/// Relative step size below which a step that failed to halve counts as converged.
const NOISE_FLOOR: f64 = 1e-10;

/// Generic Newton-Raphson solver with a configurable tolerance and iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphson {
    initial_guess: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl NewtonRaphson {
    pub fn new(initial_guess: f64) -> Self {
        Self {
            initial_guess,
            tolerance: 1e-12,
            max_iterations: 50,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Finds a root of `f` given its derivative `df`.
    ///
    /// # Errors
    ///
    /// Fails when the iteration cap is reached, the derivative vanishes, or the
    /// initial guess is not finite. The last iterate is never returned on failure.
    pub fn solve<F, D>(&self, f: F, df: D) -> Result<f64>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        if !self.initial_guess.is_finite() {
            return Err(anyhow!(
                "Newton-Raphson initial guess must be finite, got {}",
                self.initial_guess
            ));
        }

        let mut convergency = NewtonConvergency {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            iterations: 0,
            last_step: f64::INFINITY,
        };

        let root = find_root_newton_raphson(self.initial_guess, &f, &df, &mut convergency)
            .map_err(|e| {
                anyhow!(
                    "Newton-Raphson failed from x0={} after {} iterations: {:?}",
                    self.initial_guess,
                    convergency.iterations,
                    e
                )
            })?;

        if !root.is_finite() {
            return Err(anyhow!("Newton-Raphson produced a non-finite root"));
        }
        trace!(
            root,
            iterations = convergency.iterations,
            "Newton-Raphson converged"
        );
        Ok(root)
    }
}

struct NewtonConvergency {
    tolerance: f64,
    max_iterations: usize,
    iterations: usize,
    last_step: f64,
}

impl Convergency<f64> for NewtonConvergency {
    fn is_root_found(&mut self, y: f64) -> bool {
        y.abs() < self.tolerance
    }

    fn is_converged(&mut self, x1: f64, x2: f64) -> bool {
        let step = (x1 - x2).abs();
        let scale = x2.abs().max(1.0);
        let bouncing = step > 0.5 * self.last_step && step <= NOISE_FLOOR * scale;
        self.last_step = step;
        step < self.tolerance || step <= STALL_ULPS * f64::EPSILON * scale || bouncing
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        self.iterations = iter;
        iter >= self.max_iterations
    }
}
