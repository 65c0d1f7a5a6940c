//! Implied volatility inversion of normalized Black prices.
//!
//! A rational cubic initial guess (see [`initial_guess`]) lands close enough for a few
//! Newton steps on a band-dependent objective (see [`solver`]) to reach machine precision.

pub mod initial_guess;
pub mod rational_cubic;
pub mod solver;
pub mod types;

pub use initial_guess::{initial_guess, InitialData};
pub use rational_cubic::{rational_cubic_interpolate, RationalCubic, MAX_R, MIN_R};
pub use solver::{
    black_implied_volatility, black_implied_volatility_with_config, implied_normalized_vol,
    implied_normalized_vol_with_config, newton_normalized_vol, PriceBand,
};
pub use types::{ImpliedVolResult, OptionQuote};
