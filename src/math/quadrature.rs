//! Gauss-Laguerre quadrature for integrals of the form ∫₀^∞ e^{-u} f(u) du.
//!
//! Nodes are the roots of the Laguerre polynomial `L_n`, located by Newton iteration on
//! the three-term recurrence starting from the classical asymptotic guesses
//! (Stroud & Secrest). Weights are `-1 / (n · L'_n(x_i) · L_{n-1}(x_i))`.

use anyhow::{anyhow, bail, Result};
use tracing::debug;

/// Relative step below which a node is considered converged.
const NODE_TOLERANCE: f64 = 1e-13;
/// Relative step below which a step that failed to halve also counts as converged.
const NODE_NOISE_FLOOR: f64 = 1e-10;
const MAX_NODE_ITERATIONS: usize = 100;

/// Immutable node/weight table of an `order`-point Gauss-Laguerre rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLaguerre {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLaguerre {
    /// Builds the rule of the given order.
    ///
    /// # Errors
    ///
    /// Fails when `order` is zero or a node does not converge.
    pub fn new(order: usize) -> Result<Self> {
        if order == 0 {
            bail!("Gauss-Laguerre order must be positive, got 0");
        }

        let n = order as f64;
        let mut nodes = vec![0.0; order];
        let mut weights = vec![0.0; order];
        let mut z = 0.0;

        for i in 0..order {
            z = match i {
                0 => 3.0 / (1.0 + 2.4 * n),
                1 => z + 15.0 / (1.0 + 2.5 * n),
                _ => {
                    let ai = (i - 1) as f64;
                    z + ((1.0 + 2.55 * ai) / (1.9 * ai)) * (z - nodes[i - 2])
                }
            };

            let mut converged = false;
            let mut derivative = 0.0;
            let mut previous = 0.0;
            let mut last_step = f64::INFINITY;
            for _ in 0..MAX_NODE_ITERATIONS {
                let (value, prev) = laguerre(order, z);
                derivative = n * (value - prev) / z;
                previous = prev;
                let step = value / derivative;
                z -= step;
                let step = step.abs();
                // low nodes of high orders bounce in the recurrence's rounding
                let bouncing = step > 0.5 * last_step && step <= NODE_NOISE_FLOOR * z.abs();
                if step <= NODE_TOLERANCE * z.abs() || bouncing {
                    converged = true;
                    break;
                }
                last_step = step;
            }
            if !converged || !z.is_finite() {
                return Err(anyhow!(
                    "Gauss-Laguerre node {} of order {} did not converge (z={})",
                    i,
                    order,
                    z
                ));
            }

            nodes[i] = z;
            weights[i] = -1.0 / (derivative * n * previous);
        }

        debug!(
            order,
            largest_node = nodes[order - 1],
            "built Gauss-Laguerre quadrature"
        );

        Ok(Self { nodes, weights })
    }

    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Weights of the rule; they already contain the `e^{-u}` factor.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterates over `(node, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }

    /// Approximates ∫₀^∞ e^{-u} f(u) du.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.iter().map(|(u, w)| w * f(u)).sum()
    }
}

/// Returns `(L_n(z), L_{n-1}(z))`.
fn laguerre(order: usize, z: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 1..=order {
        let p3 = p2;
        p2 = p1;
        let jf = j as f64;
        p1 = ((2.0 * jf - 1.0 - z) * p2 - (jf - 1.0) * p3) / jf;
    }
    (p1, p2)
}
