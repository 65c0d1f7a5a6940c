//! Lewis (2000) Fourier representation of a European option price.
//!
//! For any model whose characteristic function `φ` of `ln(F_T/F_0)` is known:
//!
//! ```text
//! call(x) = e^{x/2} − (1/π) ∫₀^∞ Re[e^{iux} φ(u − i/2)] / (u² + 1/4) du
//! ```
//!
//! in the same normalized units as [`crate::models::black`]. The integral is evaluated
//! with Gauss-Laguerre quadrature: the rule's weights carry `e^{-u}`, so each summand is
//! multiplied by `e^{u}` to undo it.

use num_complex::Complex64;

use crate::math::{GaussLaguerre, PI};
use crate::models::traits::CharacteristicFunction;

/// Weights below this contribute nothing; `e^{u}` at their node would overflow.
const MIN_WEIGHT: f64 = 1e-20;

/// Normalized undiscounted price of a call or put from a characteristic function.
pub fn lewis_undiscounted_price<C>(
    x: f64,
    is_call: bool,
    cf: &C,
    quadrature: &GaussLaguerre,
) -> f64
where
    C: CharacteristicFunction + ?Sized,
{
    let shift = Complex64::new(0.0, -0.5);

    let sum: f64 = quadrature
        .iter()
        .map(|(u, w)| {
            if w.abs() < MIN_WEIGHT {
                return 0.0;
            }
            let integrand = (Complex64::new(0.0, u * x)).exp() * cf.evaluate(u + shift);
            let re = integrand.re;
            if re.abs() < f64::MIN_POSITIVE || !re.is_finite() {
                return 0.0;
            }
            w * u.exp() * re / (u * u + 0.25)
        })
        .sum();

    let forward = (0.5 * x).exp();
    let call = forward - sum / PI;
    if is_call {
        call
    } else {
        // parity: call − put = e^{x/2} − e^{-x/2}
        call - (forward - 1.0 / forward)
    }
}
