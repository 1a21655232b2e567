//! Implied volatility extraction from option prices.
//!
//! - [`ImpliedVolSolver`] — Newton-Raphson on the Black-Scholes price with a
//!   bisection fallback, configured by [`SolverConfig`]
//! - [`solve_implied_volatility`] — one-shot solve with the default config

pub mod solver;

pub use solver::{solve_implied_volatility, ImpliedVolSolver, SolverConfig};
