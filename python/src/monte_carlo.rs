use optcalc::types::{ContractSpec, MarketState, OptionType};
use optcalc::SimulationConfig;
use pyo3::prelude::*;

use crate::error::to_py_err;

#[pyfunction]
#[pyo3(signature = (spot, strike, time_to_expiry, risk_free_rate, volatility, num_paths=100_000, num_steps=252, is_call=true, seed=None))]
#[allow(clippy::too_many_arguments)]
pub fn simulate_asian_option(
    py: Python<'_>,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    num_paths: i64,
    num_steps: i64,
    is_call: bool,
    seed: Option<u64>,
) -> PyResult<f64> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_py_err)?;
    let contract = ContractSpec::new(
        strike,
        time_to_expiry,
        volatility,
        OptionType::from_is_call(is_call),
    )
    .map_err(to_py_err)?;
    let config = SimulationConfig::from_signed(num_paths, num_steps, seed).map_err(to_py_err)?;
    py.allow_threads(|| optcalc::simulate_asian_option(&market, &contract, &config))
        .map_err(to_py_err)
}
