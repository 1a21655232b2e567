//! Monte Carlo pricing of path-dependent options.
//!
//! - [`simulate_asian_option`] — arithmetic-average Asian call/put price
//! - [`simulate_asian_option_with_error`] — same, with standard error
//! - [`SimulationConfig`] — path/step counts and optional seed

pub mod asian;
pub mod config;
mod rng;

pub use asian::{simulate_asian_option, simulate_asian_option_with_error, MonteCarloEstimate};
pub use config::SimulationConfig;
pub use rng::PATHS_PER_STREAM;
