//! # optcalc
//!
//! Options analytics engine: closed-form European pricing and Greeks,
//! implied volatility, Monte Carlo Asian options and portfolio risk.
//!
//! ## Architecture
//!
//! - **`distribution`** — Standard normal CDF/PDF
//! - **`pricing`** — Black-Scholes prices and Greeks
//! - **`implied`** — Implied volatility (Newton-Raphson with bisection fallback)
//! - **`monte_carlo`** — Arithmetic-average Asian options by simulation
//! - **`portfolio`** — Quantity-weighted Greeks and value across positions
//! - **`engine`** — [`OptionsEngine`], the single interface hosts call
//!
//! ## Design
//!
//! - **Pure functions over value types.** No operation mutates shared state;
//!   identical inputs give identical outputs. The simulator is reproducible
//!   bit-for-bit when seeded.
//! - **No panics.** Every fallible operation returns [`Result`]. Invalid
//!   inputs are reported as [`OptionsError::InvalidParameter`] naming the
//!   field, never clamped or propagated as NaN.
//! - **Greeks follow the requested side.** [`PricingResult`] always carries
//!   both prices; delta, theta and rho describe the contract's
//!   [`OptionType`]. Theta is per year.
//! - **Thread-safe.** [`OptionsEngine`] requires `Send + Sync`. With the
//!   `parallel` feature the simulator partitions paths across rayon workers
//!   without changing seeded results.

pub mod conventions;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod implied;
pub mod monte_carlo;
pub mod payoff;
pub mod portfolio;
pub mod pricing;
pub mod types;
mod validate;

#[doc(inline)]
pub use engine::{BlackScholesEngine, OptionsEngine};
#[doc(inline)]
pub use error::{OptionsError, Result};
#[doc(inline)]
pub use implied::{solve_implied_volatility, ImpliedVolSolver, SolverConfig};
#[doc(inline)]
pub use monte_carlo::{simulate_asian_option, MonteCarloEstimate, SimulationConfig};
#[doc(inline)]
pub use portfolio::{analyze_portfolio, MarkMode};
#[doc(inline)]
pub use pricing::price_and_greeks;
#[doc(inline)]
pub use types::{
    ContractSpec, MarketState, OptionType, PortfolioGreeks, Position, PricingResult, VanillaTerms, Vol,
};
