use optcalc::portfolio::{analyze_portfolio_with, MarkMode};
use optcalc::types::{ContractSpec, MarketState, OptionType, PortfolioGreeks, Position};
use optcalc::ImpliedVolSolver;
use wasm_bindgen::prelude::*;

use crate::error::{json_err, to_js_err};

/// Doubles per position in the flat layout:
/// `quantity, strike, time_to_expiry, volatility, is_call (1 or 0), market_price`.
pub const POSITION_STRIDE: usize = 6;

#[wasm_bindgen]
pub struct WasmPortfolioGreeks {
    inner: PortfolioGreeks,
}

#[wasm_bindgen]
impl WasmPortfolioGreeks {
    #[wasm_bindgen(getter)]
    pub fn total_delta(&self) -> f64 {
        self.inner.total_delta
    }

    #[wasm_bindgen(getter)]
    pub fn total_gamma(&self) -> f64 {
        self.inner.total_gamma
    }

    #[wasm_bindgen(getter)]
    pub fn total_theta(&self) -> f64 {
        self.inner.total_theta
    }

    #[wasm_bindgen(getter)]
    pub fn total_vega(&self) -> f64 {
        self.inner.total_vega
    }

    #[wasm_bindgen(getter)]
    pub fn total_rho(&self) -> f64 {
        self.inner.total_rho
    }

    #[wasm_bindgen(getter)]
    pub fn portfolio_value(&self) -> f64 {
        self.inner.portfolio_value
    }

    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn positions_from_flat(flat: &[f64]) -> Result<Vec<Position>, JsValue> {
    if !flat.len().is_multiple_of(POSITION_STRIDE) {
        return Err(JsValue::from_str(
            "InvalidParameter: positions must have length divisible by 6 \
             (quantity, strike, time_to_expiry, volatility, is_call, market_price)",
        ));
    }
    Ok(flat
        .chunks(POSITION_STRIDE)
        .map(|c| {
            let option_type = OptionType::from_is_call(c[4] != 0.0);
            let contract = ContractSpec {
                strike: c[1],
                time_to_expiry: c[2],
                volatility: c[3],
                option_type,
            };
            Position::new(c[0], contract, c[5])
        })
        .collect())
}

fn mark_mode(implied: bool) -> MarkMode {
    if implied {
        MarkMode::Implied
    } else {
        MarkMode::Model
    }
}

/// Aggregate Greeks for positions packed as [`POSITION_STRIDE`] doubles each.
///
/// With `mark_implied`, each position's volatility is solved from its market
/// price and the position is valued at that price.
#[wasm_bindgen]
pub fn analyze_portfolio(
    spot: f64,
    risk_free_rate: f64,
    positions_flat: Vec<f64>,
    mark_implied: bool,
) -> Result<WasmPortfolioGreeks, JsValue> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_js_err)?;
    let positions = positions_from_flat(&positions_flat)?;
    analyze_portfolio_with(
        &market,
        &positions,
        mark_mode(mark_implied),
        &ImpliedVolSolver::default(),
    )
    .map(|inner| WasmPortfolioGreeks { inner })
    .map_err(to_js_err)
}

/// Same as [`analyze_portfolio`] with positions given as a JSON array of
/// `Position` objects.
#[wasm_bindgen]
pub fn analyze_portfolio_json(
    spot: f64,
    risk_free_rate: f64,
    positions_json: &str,
    mark_implied: bool,
) -> Result<WasmPortfolioGreeks, JsValue> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_js_err)?;
    let positions: Vec<Position> = serde_json::from_str(positions_json).map_err(json_err)?;
    analyze_portfolio_with(
        &market,
        &positions,
        mark_mode(mark_implied),
        &ImpliedVolSolver::default(),
    )
    .map(|inner| WasmPortfolioGreeks { inner })
    .map_err(to_js_err)
}
