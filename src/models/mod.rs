pub mod black;
pub mod heston;
pub mod lewis;

/// Common traits used by the Fourier pricers
pub mod traits {
    use num_complex::Complex64;

    /// Characteristic function of the terminal log-price, `φ(u) = E[e^{iu·ln(F_T/F_0)}]`.
    ///
    /// Implemented by the model-specific structs and, through the blanket impl, by any
    /// `Fn(Complex64) -> Complex64` closure. Pricers take it as a generic parameter so
    /// the call at every quadrature node is statically dispatched.
    pub trait CharacteristicFunction {
        fn evaluate(&self, u: Complex64) -> Complex64;
    }

    impl<F> CharacteristicFunction for F
    where
        F: Fn(Complex64) -> Complex64,
    {
        fn evaluate(&self, u: Complex64) -> Complex64 {
            self(u)
        }
    }
}

/// Utility functions shared by the pricers and the implied volatility solver
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::fmt;
    use std::str::FromStr;

    /// Calculate log-moneyness: ln(F/K)
    pub fn log_moneyness(forward: f64, strike: f64) -> f64 {
        (forward / strike).ln()
    }

    /// `+1` for a call, `-1` for a put.
    #[inline]
    pub fn put_call_flag(is_call: bool) -> f64 {
        if is_call {
            1.0
        } else {
            -1.0
        }
    }

    /// Intrinsic value in normalized units, `max(θ·(e^{x/2} − e^{-x/2}), 0)`.
    #[inline]
    pub fn normalized_intrinsic_value(x: f64, is_call: bool) -> f64 {
        let flag = put_call_flag(is_call);
        if flag * x <= 0.0 {
            return 0.0;
        }
        let bm = (0.5 * x).exp();
        (flag * (bm - 1.0 / bm)).max(0.0)
    }

    /// European option type
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
    pub enum OptionType {
        Call,
        Put,
    }

    impl OptionType {
        pub fn is_call(self) -> bool {
            matches!(self, OptionType::Call)
        }

        pub fn flag(self) -> f64 {
            put_call_flag(self.is_call())
        }
    }

    impl FromStr for OptionType {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim().to_lowercase().as_str() {
                "call" | "c" => Ok(OptionType::Call),
                "put" | "p" => Ok(OptionType::Put),
                other => Err(anyhow!("Invalid option type: {}", other)),
            }
        }
    }

    impl fmt::Display for OptionType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.pad(match self {
                OptionType::Call => "call",
                OptionType::Put => "put",
            })
        }
    }
}
