//! Closed-form Black-Scholes price and Greeks for European options.
//!
//! # Formulas
//! ```text
//! F  = S·e^(rT)
//! d1 = σ√T/2 + ln(F/K) / (σ·√T)               d2 = d1 − σ·√T
//! C  = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! P  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
//!
//!            call                                put
//! delta      Φ(d1)                               Φ(d1) − 1
//! gamma      φ(d1) / (S·σ·√T)                    same
//! theta      −S·φ(d1)·σ/(2√T) − rK·e^(−rT)·Φ(d2)  −S·φ(d1)·σ/(2√T) + rK·e^(−rT)·Φ(−d2)
//! vega       S·φ(d1)·√T                          same
//! rho        K·T·e^(−rT)·Φ(d2)                   −K·T·e^(−rT)·Φ(−d2)
//! ```
//!
//! Theta is per year. Vega and rho are per unit (1.00) change in σ and r.

use crate::conventions::{discount_factor, forward_price, log_moneyness, moneyness};
use crate::distribution::{normal_cdf, normal_pdf};
use crate::error::Result;
use crate::types::{ContractSpec, MarketState, OptionType, PricingResult};

/// Price a European option and compute its Greeks.
///
/// Greeks follow the side requested by `contract.option_type`; both the call
/// and put prices are always returned.
///
/// A zero volatility is priced as the deterministic limit: discounted
/// intrinsic value, step-function delta, and zero gamma and vega.
///
/// # Errors
/// Returns [`OptionsError::InvalidParameter`](crate::OptionsError::InvalidParameter)
/// naming `spot`, `risk_free_rate`, `strike`, `time_to_expiry` or `volatility`.
///
/// # Examples
/// ```
/// use optcalc::pricing::price_and_greeks;
/// use optcalc::types::{ContractSpec, MarketState};
///
/// let market = MarketState::new(100.0, 0.05).unwrap();
/// let contract = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
/// let r = price_and_greeks(&market, &contract).unwrap();
/// assert!((r.call_price - 10.4506).abs() < 1e-3);
/// ```
pub fn price_and_greeks(market: &MarketState, contract: &ContractSpec) -> Result<PricingResult> {
    market.validate()?;
    contract.validate()?;

    let s = market.spot;
    let r = market.risk_free_rate;
    let k = contract.strike;
    let t = contract.time_to_expiry;
    let sigma = contract.volatility;

    let sqrt_t = t.sqrt();
    let sig_sqrt_t = sigma * sqrt_t;
    let df = discount_factor(r, t);

    if sig_sqrt_t == 0.0 {
        return Ok(zero_vol_limit(s, k, t, r, df, contract.option_type));
    }

    // Split so σ√T never gets squared.
    let d1 = 0.5 * sig_sqrt_t - log_moneyness(k, forward_price(s, r, t)) / sig_sqrt_t;
    let d2 = d1 - sig_sqrt_t;

    let nd1 = normal_cdf(d1);
    let nd2 = normal_cdf(d2);
    let n_minus_d1 = normal_cdf(-d1);
    let n_minus_d2 = normal_cdf(-d2);
    let pdf_d1 = normal_pdf(d1);

    let call_price = s * nd1 - k * df * nd2;
    let put_price = k * df * n_minus_d2 - s * n_minus_d1;

    let gamma = pdf_d1 / (s * sig_sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;
    let decay = -(s * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let (delta, theta, rho) = match contract.option_type {
        OptionType::Call => (nd1, decay - r * k * df * nd2, k * t * df * nd2),
        OptionType::Put => (
            nd1 - 1.0,
            decay + r * k * df * n_minus_d2,
            -k * t * df * n_minus_d2,
        ),
    };

    Ok(PricingResult {
        call_price,
        put_price,
        delta,
        gamma,
        theta,
        vega,
        rho,
        option_type: contract.option_type,
    })
}

/// Price of the requested side only.
///
/// # Errors
/// Same as [`price_and_greeks`].
pub fn price(market: &MarketState, contract: &ContractSpec) -> Result<f64> {
    price_and_greeks(market, contract).map(|r| r.price())
}

/// σ·√T = 0: the underlying grows deterministically to the forward, so
/// `Φ(d1) = Φ(d2)` collapse to a step at `K = F`.
fn zero_vol_limit(
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    df: f64,
    option_type: OptionType,
) -> PricingResult {
    let m = moneyness(k, forward_price(s, r, t));
    let step = if m < 1.0 {
        1.0
    } else if m > 1.0 {
        0.0
    } else {
        0.5
    };

    let call_price = (s - k * df).max(0.0);
    let put_price = (k * df - s).max(0.0);

    let (delta, theta, rho) = match option_type {
        OptionType::Call => (step, -r * k * df * step, k * t * df * step),
        OptionType::Put => (
            step - 1.0,
            r * k * df * (1.0 - step),
            -k * t * df * (1.0 - step),
        ),
    };

    PricingResult {
        call_price,
        put_price,
        delta,
        gamma: 0.0,
        theta,
        vega: 0.0,
        rho,
        option_type,
    }
}
