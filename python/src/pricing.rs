use optcalc::types::{ContractSpec, MarketState, OptionType, PricingResult, VanillaTerms};
use pyo3::prelude::*;

use crate::error::to_py_err;

#[pyclass(frozen, name = "PricingResult")]
pub struct PyPricingResult {
    #[pyo3(get)]
    call_price: f64,
    #[pyo3(get)]
    put_price: f64,
    #[pyo3(get)]
    delta: f64,
    #[pyo3(get)]
    gamma: f64,
    #[pyo3(get)]
    theta: f64,
    #[pyo3(get)]
    vega: f64,
    #[pyo3(get)]
    rho: f64,
    #[pyo3(get)]
    is_call: bool,
}

impl From<PricingResult> for PyPricingResult {
    fn from(r: PricingResult) -> Self {
        Self {
            call_price: r.call_price,
            put_price: r.put_price,
            delta: r.delta,
            gamma: r.gamma,
            theta: r.theta,
            vega: r.vega,
            rho: r.rho,
            is_call: r.option_type.is_call(),
        }
    }
}

#[pymethods]
impl PyPricingResult {
    fn __repr__(&self) -> String {
        format!(
            "PricingResult(call_price={}, put_price={}, delta={}, gamma={}, theta={}, vega={}, rho={}, is_call={})",
            self.call_price,
            self.put_price,
            self.delta,
            self.gamma,
            self.theta,
            self.vega,
            self.rho,
            self.is_call
        )
    }
}

#[pyfunction]
#[pyo3(signature = (spot, strike, time_to_expiry, risk_free_rate, volatility, is_call=true))]
pub fn price_and_greeks(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    is_call: bool,
) -> PyResult<PyPricingResult> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_py_err)?;
    let contract = ContractSpec::new(
        strike,
        time_to_expiry,
        volatility,
        OptionType::from_is_call(is_call),
    )
    .map_err(to_py_err)?;
    optcalc::price_and_greeks(&market, &contract)
        .map(PyPricingResult::from)
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (spot, strike, time_to_expiry, risk_free_rate, market_price, is_call=true))]
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    market_price: f64,
    is_call: bool,
) -> PyResult<f64> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_py_err)?;
    let terms = VanillaTerms::new(strike, time_to_expiry, OptionType::from_is_call(is_call))
        .map_err(to_py_err)?;
    optcalc::solve_implied_volatility(&market, &terms, market_price)
        .map(|v| v.0)
        .map_err(to_py_err)
}
