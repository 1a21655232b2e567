use optcalc::types::{ContractSpec, MarketState, OptionType};
use optcalc::{OptionsError, SimulationConfig};
use wasm_bindgen::prelude::*;

use crate::error::to_js_err;

/// JS numbers carry seeds; only non-negative integers up to 2^53 are exact.
fn seed_from_js(seed: Option<f64>) -> Result<Option<u64>, OptionsError> {
    match seed {
        None => Ok(None),
        Some(s) if s.is_finite() && s >= 0.0 && s.fract() == 0.0 && s <= 9_007_199_254_740_992.0 => {
            Ok(Some(s as u64))
        }
        Some(s) => Err(OptionsError::InvalidParameter {
            parameter: "seed",
            value: s,
            reason: "must be a non-negative integer no greater than 2^53",
        }),
    }
}

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn simulate_asian_option(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    num_paths: i32,
    num_steps: i32,
    is_call: bool,
    seed: Option<f64>,
) -> Result<f64, JsValue> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_js_err)?;
    let contract = ContractSpec::new(
        strike,
        time_to_expiry,
        volatility,
        OptionType::from_is_call(is_call),
    )
    .map_err(to_js_err)?;
    let seed = seed_from_js(seed).map_err(to_js_err)?;
    let config = SimulationConfig::from_signed(i64::from(num_paths), i64::from(num_steps), seed)
        .map_err(to_js_err)?;
    optcalc::simulate_asian_option(&market, &contract, &config).map_err(to_js_err)
}
