use optcalc::types::{ContractSpec, MarketState, OptionType, PricingResult, VanillaTerms};
use wasm_bindgen::prelude::*;

use crate::error::to_js_err;

/// Pricer output, exposed field-by-field in declaration order.
#[wasm_bindgen]
pub struct WasmPricingResult {
    inner: PricingResult,
}

impl From<PricingResult> for WasmPricingResult {
    fn from(inner: PricingResult) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen]
impl WasmPricingResult {
    #[wasm_bindgen(getter)]
    pub fn call_price(&self) -> f64 {
        self.inner.call_price
    }

    #[wasm_bindgen(getter)]
    pub fn put_price(&self) -> f64 {
        self.inner.put_price
    }

    #[wasm_bindgen(getter)]
    pub fn delta(&self) -> f64 {
        self.inner.delta
    }

    #[wasm_bindgen(getter)]
    pub fn gamma(&self) -> f64 {
        self.inner.gamma
    }

    #[wasm_bindgen(getter)]
    pub fn theta(&self) -> f64 {
        self.inner.theta
    }

    #[wasm_bindgen(getter)]
    pub fn vega(&self) -> f64 {
        self.inner.vega
    }

    #[wasm_bindgen(getter)]
    pub fn rho(&self) -> f64 {
        self.inner.rho
    }

    #[wasm_bindgen(getter)]
    pub fn is_call(&self) -> bool {
        self.inner.option_type.is_call()
    }

    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub fn price_and_greeks(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    is_call: bool,
) -> Result<WasmPricingResult, JsValue> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_js_err)?;
    let contract = ContractSpec::new(
        strike,
        time_to_expiry,
        volatility,
        OptionType::from_is_call(is_call),
    )
    .map_err(to_js_err)?;
    optcalc::price_and_greeks(&market, &contract)
        .map(WasmPricingResult::from)
        .map_err(to_js_err)
}

#[wasm_bindgen]
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    market_price: f64,
    is_call: bool,
) -> Result<f64, JsValue> {
    let market = MarketState::new(spot, risk_free_rate).map_err(to_js_err)?;
    let terms = VanillaTerms::new(strike, time_to_expiry, OptionType::from_is_call(is_call))
        .map_err(to_js_err)?;
    optcalc::solve_implied_volatility(&market, &terms, market_price)
        .map(|v| v.0)
        .map_err(to_js_err)
}
