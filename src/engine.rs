//! The engine's call surface as a single capability interface.
//!
//! Hosts program against [`OptionsEngine`]; [`BlackScholesEngine`] is the
//! production implementation backed by this crate's pricer, solver,
//! simulator and aggregator.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::implied::{ImpliedVolSolver, SolverConfig};
use crate::monte_carlo::{self, SimulationConfig};
use crate::portfolio::{self, MarkMode};
use crate::pricing;
use crate::types::{ContractSpec, MarketState, PortfolioGreeks, Position, PricingResult, VanillaTerms, Vol};

/// Options analytics operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; every operation is a pure function
/// of its inputs and may be called concurrently without locking.
pub trait OptionsEngine: Send + Sync {
    /// Closed-form European price and Greeks.
    fn price_and_greeks(&self, market: &MarketState, contract: &ContractSpec) -> Result<PricingResult>;

    /// Volatility that reproduces `market_price` for `terms`.
    fn solve_implied_volatility(
        &self,
        market: &MarketState,
        terms: &VanillaTerms,
        market_price: f64,
    ) -> Result<Vol>;

    /// Quantity-weighted Greeks and value across `positions`.
    fn analyze_portfolio(&self, market: &MarketState, positions: &[Position]) -> Result<PortfolioGreeks>;

    /// Monte Carlo price of an arithmetic-average Asian option.
    fn simulate_asian_option(
        &self,
        market: &MarketState,
        contract: &ContractSpec,
        config: &SimulationConfig,
    ) -> Result<f64>;
}

/// Production [`OptionsEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlackScholesEngine {
    solver: ImpliedVolSolver,
    mark_mode: MarkMode,
}

impl BlackScholesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom implied-vol solver configuration.
    pub fn solver_config(mut self, config: SolverConfig) -> Self {
        self.solver = ImpliedVolSolver::new(config);
        self
    }

    /// Choose how portfolio positions are marked.
    pub fn mark_mode(mut self, mode: MarkMode) -> Self {
        self.mark_mode = mode;
        self
    }

    pub fn solver(&self) -> &ImpliedVolSolver {
        &self.solver
    }
}

impl OptionsEngine for BlackScholesEngine {
    fn price_and_greeks(&self, market: &MarketState, contract: &ContractSpec) -> Result<PricingResult> {
        pricing::price_and_greeks(market, contract)
    }

    fn solve_implied_volatility(
        &self,
        market: &MarketState,
        terms: &VanillaTerms,
        market_price: f64,
    ) -> Result<Vol> {
        self.solver.solve(market, terms, market_price)
    }

    fn analyze_portfolio(&self, market: &MarketState, positions: &[Position]) -> Result<PortfolioGreeks> {
        portfolio::analyze_portfolio_with(market, positions, self.mark_mode, &self.solver)
    }

    fn simulate_asian_option(
        &self,
        market: &MarketState,
        contract: &ContractSpec,
        config: &SimulationConfig,
    ) -> Result<f64> {
        monte_carlo::simulate_asian_option(market, contract, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionType;
    use approx::assert_abs_diff_eq;

    #[test]
    fn engine_is_object_safe_and_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlackScholesEngine>();
        let engine: Box<dyn OptionsEngine> = Box::new(BlackScholesEngine::new());
        let market = MarketState::new(100.0, 0.05).unwrap();
        let contract = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
        let r = engine.price_and_greeks(&market, &contract).unwrap();
        assert_abs_diff_eq!(r.call_price, 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn custom_solver_config_is_used() {
        let engine = BlackScholesEngine::new().solver_config(SolverConfig::default().max_iterations(1));
        let market = MarketState::new(100.0, 0.05).unwrap();
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        assert!(engine.solve_implied_volatility(&market, &terms, 30.0).is_err());
        assert_eq!(engine.solver().config().max_iterations, 1);
    }

    #[test]
    fn implied_mark_mode_values_at_market() {
        let engine = BlackScholesEngine::new().mark_mode(MarkMode::Implied);
        let market = MarketState::new(100.0, 0.05).unwrap();
        let contract = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
        let totals = engine
            .analyze_portfolio(&market, &[Position::new(4.0, contract, 12.0)])
            .unwrap();
        assert_abs_diff_eq!(totals.portfolio_value, 48.0, epsilon = 1e-12);
    }
}
