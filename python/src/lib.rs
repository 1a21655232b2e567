use pyo3::prelude::*;

mod error;
mod monte_carlo;
mod portfolio;
mod pricing;

use portfolio::*;
use pricing::*;

#[pymodule]
fn _optcalc(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPricingResult>()?;
    m.add_class::<PyPosition>()?;
    m.add_class::<PyPortfolioGreeks>()?;
    m.add_function(wrap_pyfunction!(pricing::price_and_greeks, m)?)?;
    m.add_function(wrap_pyfunction!(pricing::implied_volatility, m)?)?;
    m.add_function(wrap_pyfunction!(portfolio::analyze_portfolio, m)?)?;
    m.add_function(wrap_pyfunction!(monte_carlo::simulate_asian_option, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
