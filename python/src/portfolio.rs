use optcalc::portfolio::{analyze_portfolio_with, MarkMode};
use optcalc::types::{ContractSpec, MarketState, OptionType, PortfolioGreeks, Position};
use optcalc::ImpliedVolSolver;
use pyo3::prelude::*;

use crate::error::to_py_err;

#[pyclass(frozen, name = "Position")]
pub struct PyPosition {
    pub(crate) inner: Position,
}

#[pymethods]
impl PyPosition {
    #[new]
    #[pyo3(signature = (quantity, strike, time_to_expiry, volatility, is_call=true, market_price=0.0))]
    fn new(
        quantity: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        is_call: bool,
        market_price: f64,
    ) -> Self {
        let contract = ContractSpec {
            strike,
            time_to_expiry,
            volatility,
            option_type: OptionType::from_is_call(is_call),
        };
        Self {
            inner: Position::new(quantity, contract, market_price),
        }
    }

    #[getter]
    fn quantity(&self) -> f64 {
        self.inner.quantity
    }

    #[getter]
    fn strike(&self) -> f64 {
        self.inner.contract.strike
    }

    #[getter]
    fn is_call(&self) -> bool {
        self.inner.contract.option_type.is_call()
    }

    #[getter]
    fn market_price(&self) -> f64 {
        self.inner.market_price
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }
}

#[pyclass(frozen, name = "PortfolioGreeks")]
pub struct PyPortfolioGreeks {
    #[pyo3(get)]
    total_delta: f64,
    #[pyo3(get)]
    total_gamma: f64,
    #[pyo3(get)]
    total_theta: f64,
    #[pyo3(get)]
    total_vega: f64,
    #[pyo3(get)]
    total_rho: f64,
    #[pyo3(get)]
    portfolio_value: f64,
}

impl From<PortfolioGreeks> for PyPortfolioGreeks {
    fn from(g: PortfolioGreeks) -> Self {
        Self {
            total_delta: g.total_delta,
            total_gamma: g.total_gamma,
            total_theta: g.total_theta,
            total_vega: g.total_vega,
            total_rho: g.total_rho,
            portfolio_value: g.portfolio_value,
        }
    }
}

#[pyfunction]
#[pyo3(signature = (spot, risk_free_rate, positions, mark_implied=false))]
pub fn analyze_portfolio(
    spot: f64,
    risk_free_rate: f64,
    positions: Vec<PyRef<'_, PyPosition>>,
    mark_implied: bool,
) -> PyResult<PyPortfolioGreeks> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_py_err)?;
    let positions: Vec<Position> = positions.iter().map(|p| p.inner).collect();
    let mode = if mark_implied {
        MarkMode::Implied
    } else {
        MarkMode::Model
    };
    analyze_portfolio_with(&market, &positions, mode, &ImpliedVolSolver::default())
        .map(PyPortfolioGreeks::from)
        .map_err(to_py_err)
}
