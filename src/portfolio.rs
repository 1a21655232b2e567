//! Portfolio-level risk aggregation.
//!
//! Each position is priced with the closed-form pricer against the shared
//! market state; its Greeks and value are scaled by the signed quantity and
//! summed in input order, so repeated runs give identical totals.
//!
//! Two marking modes are supported:
//!
//! - [`MarkMode::Model`] prices at the contract's volatility and values each
//!   position at the model price of its side.
//! - [`MarkMode::Implied`] first solves each position's implied volatility
//!   from its observed `market_price`, computes Greeks at that volatility and
//!   values the position at `market_price`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::implied::ImpliedVolSolver;
use crate::pricing::price_and_greeks;
use crate::types::{MarketState, PortfolioGreeks, Position, PricingResult};
use crate::validate::validate_finite;

/// How positions are marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkMode {
    /// Contract volatility, mark-to-model value.
    #[default]
    Model,
    /// Volatility implied from each position's market price, mark-to-market value.
    Implied,
}

/// Risk of a single position before quantity scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRisk {
    /// Volatility the Greeks were computed at.
    pub volatility: f64,
    /// Per-contract price and Greeks for the position's side.
    pub greeks: PricingResult,
    /// Per-contract value used for `portfolio_value`.
    pub unit_value: f64,
    pub quantity: f64,
}

/// Aggregate Greeks and mark-to-model value with [`MarkMode::Model`].
///
/// # Errors
/// Returns the pricer's error for an invalid market state, or
/// [`OptionsError::Position`](crate::OptionsError::Position) carrying the
/// index of the first position that fails validation.
///
/// # Examples
/// ```
/// use optcalc::portfolio::analyze_portfolio;
/// use optcalc::types::{ContractSpec, MarketState, Position};
///
/// let market = MarketState::new(100.0, 0.05).unwrap();
/// let call = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
/// let book = [Position::new(1.0, call, 10.45), Position::new(-1.0, call, 10.45)];
/// let totals = analyze_portfolio(&market, &book).unwrap();
/// assert!(totals.total_delta.abs() < 1e-12);
/// ```
pub fn analyze_portfolio(market: &MarketState, positions: &[Position]) -> Result<PortfolioGreeks> {
    analyze_portfolio_with(market, positions, MarkMode::Model, &ImpliedVolSolver::default())
}

/// Aggregate Greeks and value using the given marking mode.
///
/// `solver` is only consulted in [`MarkMode::Implied`].
///
/// # Errors
/// As [`analyze_portfolio`]; in implied mode solver failures are also
/// reported with the position index.
pub fn analyze_portfolio_with(
    market: &MarketState,
    positions: &[Position],
    mode: MarkMode,
    solver: &ImpliedVolSolver,
) -> Result<PortfolioGreeks> {
    #[cfg(feature = "logging")]
    tracing::debug!(n_positions = positions.len(), ?mode, "portfolio analysis started");

    let totals = position_risks(market, positions, mode, solver)?
        .iter()
        .fold(PortfolioGreeks::default(), |mut acc, risk| {
            acc.accumulate(risk.quantity, &risk.greeks, risk.unit_value);
            acc
        });

    #[cfg(feature = "logging")]
    tracing::debug!(
        total_delta = totals.total_delta,
        portfolio_value = totals.portfolio_value,
        "portfolio analysis complete"
    );

    Ok(totals)
}

/// Per-position risk in input order.
///
/// # Errors
/// As [`analyze_portfolio_with`].
pub fn position_risks(
    market: &MarketState,
    positions: &[Position],
    mode: MarkMode,
    solver: &ImpliedVolSolver,
) -> Result<Vec<PositionRisk>> {
    market.validate()?;
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| {
            mark_position(market, position, mode, solver).map_err(|e| e.at_position(index))
        })
        .collect()
}

fn mark_position(
    market: &MarketState,
    position: &Position,
    mode: MarkMode,
    solver: &ImpliedVolSolver,
) -> Result<PositionRisk> {
    validate_finite(position.quantity, "quantity")?;
    match mode {
        MarkMode::Model => {
            let greeks = price_and_greeks(market, &position.contract)?;
            Ok(PositionRisk {
                volatility: position.contract.volatility,
                unit_value: greeks.price(),
                greeks,
                quantity: position.quantity,
            })
        }
        MarkMode::Implied => {
            let terms = position.contract.terms();
            let vol = solver.solve(market, &terms, position.market_price)?;
            let greeks = price_and_greeks(market, &terms.with_volatility(vol.0))?;
            Ok(PositionRisk {
                volatility: vol.0,
                greeks,
                unit_value: position.market_price,
                quantity: position.quantity,
            })
        }
    }
}
