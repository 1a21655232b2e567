use wasm_bindgen::prelude::*;

mod error;
mod monte_carlo;
mod portfolio;
mod pricing;

pub use monte_carlo::simulate_asian_option;
pub use portfolio::{analyze_portfolio, analyze_portfolio_json, WasmPortfolioGreeks, POSITION_STRIDE};
pub use pricing::{implied_volatility, price_and_greeks, WasmPricingResult};

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
