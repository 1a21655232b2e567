//! Arithmetic-average Asian options by Monte Carlo.
//!
//! Paths follow risk-neutral geometric Brownian motion on a uniform grid of
//! `num_steps` monitoring dates:
//!
//! ```text
//! S(t+Δt) = S(t) · exp((r − σ²/2)·Δt + σ·√Δt·Z),   Z ~ N(0, 1),   Δt = T / num_steps
//! ```
//!
//! The average is taken over the `num_steps` simulated prices (the initial
//! spot is not a monitoring date). Payoffs are discounted by `e^(−rT)`.
//!
//! Paths are simulated in blocks of [`PATHS_PER_STREAM`], one generator
//! stream per block. Per-block payoff moments are merged in block order, so
//! a seeded run gives the same bits whatever the thread count and whether or
//! not the `parallel` feature is enabled.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::conventions::discount_factor;
use crate::error::Result;
use crate::monte_carlo::config::SimulationConfig;
use crate::monte_carlo::rng::{stream_rngs, BoxMuller, PATHS_PER_STREAM};
use crate::payoff;
use crate::types::{ContractSpec, MarketState, OptionType};

/// Price estimate with its Monte Carlo standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloEstimate {
    /// Mean discounted payoff.
    pub price: f64,
    /// Standard error of `price` (sample standard deviation / √paths).
    pub std_error: f64,
    pub num_paths: usize,
}

/// Price an arithmetic-average Asian option.
///
/// # Errors
/// Returns [`OptionsError::InvalidParameter`](crate::OptionsError::InvalidParameter)
/// for invalid market or contract fields, or a zero `num_paths` / `num_steps`.
///
/// # Examples
/// ```
/// use optcalc::monte_carlo::{simulate_asian_option, SimulationConfig};
/// use optcalc::types::{ContractSpec, MarketState};
///
/// let market = MarketState::new(100.0, 0.05).unwrap();
/// let contract = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
/// let config = SimulationConfig::new(2_000, 12).with_seed(7);
/// let a = simulate_asian_option(&market, &contract, &config).unwrap();
/// let b = simulate_asian_option(&market, &contract, &config).unwrap();
/// assert_eq!(a.to_bits(), b.to_bits());
/// ```
pub fn simulate_asian_option(
    market: &MarketState,
    contract: &ContractSpec,
    config: &SimulationConfig,
) -> Result<f64> {
    simulate_asian_option_with_error(market, contract, config).map(|e| e.price)
}

/// Price an arithmetic-average Asian option and report the standard error.
///
/// # Errors
/// Same as [`simulate_asian_option`].
pub fn simulate_asian_option_with_error(
    market: &MarketState,
    contract: &ContractSpec,
    config: &SimulationConfig,
) -> Result<MonteCarloEstimate> {
    market.validate()?;
    contract.validate()?;
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);

    #[cfg(feature = "logging")]
    tracing::debug!(
        num_paths = config.num_paths,
        num_steps = config.num_steps,
        seed,
        seeded = config.seed.is_some(),
        "asian simulation started"
    );

    let grid = PathGrid::new(market, contract, config.num_steps);
    let num_streams = config.num_paths.div_ceil(PATHS_PER_STREAM);
    let block_len = |block: usize| PATHS_PER_STREAM.min(config.num_paths - block * PATHS_PER_STREAM);

    let streams = stream_rngs(seed, num_streams);

    #[cfg(feature = "parallel")]
    let blocks: Vec<PayoffMoments> = streams
        .into_par_iter()
        .enumerate()
        .map(|(block, rng)| grid.simulate_block(rng, block_len(block)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let blocks: Vec<PayoffMoments> = streams
        .into_iter()
        .enumerate()
        .map(|(block, rng)| grid.simulate_block(rng, block_len(block)))
        .collect();

    // Merged in block order so the result does not depend on scheduling.
    let total = blocks
        .iter()
        .fold(PayoffMoments::default(), |acc, b| acc.merge(b));

    let n = config.num_paths as f64;
    let df = discount_factor(market.risk_free_rate, contract.time_to_expiry);

    let estimate = MonteCarloEstimate {
        price: df * total.mean,
        std_error: df * (total.sample_variance() / n).sqrt(),
        num_paths: config.num_paths,
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        price = estimate.price,
        std_error = estimate.std_error,
        "asian simulation complete"
    );

    Ok(estimate)
}

/// Running mean and sum of squared deviations of undiscounted payoffs.
///
/// Accumulated with Welford's update and merged with Chan's pairwise
/// formula, so the variance never comes from subtracting two large,
/// nearly equal sums.
#[derive(Debug, Clone, Copy, Default)]
struct PayoffMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl PayoffMoments {
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn merge(self, other: &Self) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return *other;
        }
        let count = self.count + other.count;
        let (na, nb, n) = (self.count as f64, other.count as f64, count as f64);
        let delta = other.mean - self.mean;
        Self {
            count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
        }
    }

    /// Unbiased sample variance; zero for fewer than two observations.
    fn sample_variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f64
        } else {
            0.0
        }
    }
}

/// Per-step constants shared by every path.
struct PathGrid {
    spot: f64,
    strike: f64,
    option_type: OptionType,
    num_steps: usize,
    drift: f64,
    diffusion: f64,
}

impl PathGrid {
    fn new(market: &MarketState, contract: &ContractSpec, num_steps: usize) -> Self {
        let sigma = contract.volatility;
        let dt = contract.time_to_expiry / num_steps as f64;
        Self {
            spot: market.spot,
            strike: contract.strike,
            option_type: contract.option_type,
            num_steps,
            drift: (market.risk_free_rate - 0.5 * sigma * sigma) * dt,
            diffusion: sigma * dt.sqrt(),
        }
    }

    fn simulate_block<R: rand::Rng>(&self, rng: R, paths: usize) -> PayoffMoments {
        let mut normals = BoxMuller::new(rng);
        let mut block = PayoffMoments::default();
        for _ in 0..paths {
            let mut price = self.spot;
            let mut running = 0.0;
            for _ in 0..self.num_steps {
                price *= (self.drift + self.diffusion * normals.sample()).exp();
                running += price;
            }
            let average = running / self.num_steps as f64;
            let payoff = payoff::vanilla(self.option_type, average, self.strike);
            block.push(payoff);
        }
        block
    }
}
