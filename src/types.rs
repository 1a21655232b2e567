//! Core domain types for option pricing.
//!
//! All entities are plain value types: no identity, no interior mutability.
//! Constructors validate the invariants of the pricing domain; the structs
//! also keep public fields so hosts can build them field-by-field, in which
//! case validation happens when an operation consumes them.
//!
//! # Why no `Eq` or `Ord`?
//! These types hold `f64`, which does not implement `Eq` or `Ord` because
//! `NaN` breaks total ordering. We derive `PartialEq` only.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Implied or input volatility `σ`, annualized standard deviation.
///
/// # Examples
/// ```
/// use optcalc::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.0, 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl OptionType {
    /// Map the host-side `is_call` flag to an option type.
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

/// Market observables shared by every contract on one underlying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Spot price `S` of the underlying (> 0).
    pub spot: f64,
    /// Risk-free rate `r`, annualized and continuously compounded.
    pub risk_free_rate: f64,
}

impl MarketState {
    /// Create a validated market state.
    ///
    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`](crate::OptionsError::InvalidParameter)
    /// if `spot` is not positive or `risk_free_rate` is not finite.
    pub fn new(spot: f64, risk_free_rate: f64) -> Result<Self> {
        let market = Self {
            spot,
            risk_free_rate,
        };
        market.validate()?;
        Ok(market)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_positive(self.spot, "spot")?;
        validate_finite(self.risk_free_rate, "risk_free_rate")?;
        Ok(())
    }
}

/// Contract terms without a volatility: what the implied-vol solver inverts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaTerms {
    /// Strike price `K` (> 0).
    pub strike: f64,
    /// Time to expiry `T` in years (> 0).
    pub time_to_expiry: f64,
    pub option_type: OptionType,
}

impl VanillaTerms {
    /// Create validated contract terms.
    ///
    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`](crate::OptionsError::InvalidParameter)
    /// naming `strike` or `time_to_expiry`.
    pub fn new(strike: f64, time_to_expiry: f64, option_type: OptionType) -> Result<Self> {
        let terms = Self {
            strike,
            time_to_expiry,
            option_type,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Attach a volatility, producing a priceable contract.
    pub fn with_volatility(self, volatility: f64) -> ContractSpec {
        ContractSpec {
            strike: self.strike,
            time_to_expiry: self.time_to_expiry,
            volatility,
            option_type: self.option_type,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_positive(self.strike, "strike")?;
        validate_positive(self.time_to_expiry, "time_to_expiry")?;
        Ok(())
    }
}

/// Terms of one European (or, for the simulator, Asian) option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractSpec {
    /// Strike price `K` (> 0).
    pub strike: f64,
    /// Time to expiry `T` in years (> 0).
    pub time_to_expiry: f64,
    /// Annualized volatility `σ` (>= 0).
    pub volatility: f64,
    pub option_type: OptionType,
}

impl ContractSpec {
    /// Create a validated contract.
    ///
    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`](crate::OptionsError::InvalidParameter)
    /// naming the first field that fails: `strike`, `time_to_expiry`, `volatility`.
    pub fn new(
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self> {
        let contract = Self {
            strike,
            time_to_expiry,
            volatility,
            option_type,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Shorthand for a call contract.
    pub fn call(strike: f64, time_to_expiry: f64, volatility: f64) -> Result<Self> {
        Self::new(strike, time_to_expiry, volatility, OptionType::Call)
    }

    /// Shorthand for a put contract.
    pub fn put(strike: f64, time_to_expiry: f64, volatility: f64) -> Result<Self> {
        Self::new(strike, time_to_expiry, volatility, OptionType::Put)
    }

    /// The contract without its volatility.
    pub fn terms(&self) -> VanillaTerms {
        VanillaTerms {
            strike: self.strike,
            time_to_expiry: self.time_to_expiry,
            option_type: self.option_type,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.terms().validate()?;
        validate_non_negative(self.volatility, "volatility")?;
        Ok(())
    }
}

/// Output of the closed-form pricer.
///
/// Both prices are always populated. `delta`, `theta` and `rho` describe the
/// side named by `option_type`; `gamma` and `vega` are identical for calls and
/// puts. `theta` is per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
    /// Side the directional Greeks describe.
    pub option_type: OptionType,
}

impl PricingResult {
    /// Price of the requested side.
    pub fn price(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }
}

/// A signed holding of one contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Number of contracts; negative for a short position.
    pub quantity: f64,
    pub contract: ContractSpec,
    /// Observed market price per contract, used by implied-vol marking.
    pub market_price: f64,
}

impl Position {
    pub fn new(quantity: f64, contract: ContractSpec, market_price: f64) -> Self {
        Self {
            quantity,
            contract,
            market_price,
        }
    }
}

/// Quantity-weighted sums of Greeks and value across a portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    pub total_delta: f64,
    pub total_gamma: f64,
    pub total_theta: f64,
    pub total_vega: f64,
    pub total_rho: f64,
    pub portfolio_value: f64,
}

impl PortfolioGreeks {
    /// Accumulate one priced position scaled by `quantity`, valued at `unit_value`.
    pub(crate) fn accumulate(&mut self, quantity: f64, greeks: &PricingResult, unit_value: f64) {
        self.total_delta += quantity * greeks.delta;
        self.total_gamma += quantity * greeks.gamma;
        self.total_theta += quantity * greeks.theta;
        self.total_vega += quantity * greeks.vega;
        self.total_rho += quantity * greeks.rho;
        self.portfolio_value += quantity * unit_value;
    }
}
