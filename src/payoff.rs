//! Option payoffs at expiry.
//!
//! Vanilla payoffs drive the Monte Carlo engine (applied to the path
//! average for Asian options). Spread payoffs combine vanilla calls:
//!
//! ```text
//! bull spread       C(K₁) − C(K₂)              K₁ < K₂
//! butterfly spread  C(K₁) − 2·C(K₂) + C(K₃)    K₁ < K₂ < K₃
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, Result};
use crate::types::OptionType;
use crate::validate::validate_positive;

/// Vanilla payoff: `max(S − K, 0)` for a call, `max(K − S, 0)` for a put.
#[inline]
pub fn vanilla(option_type: OptionType, underlying: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (underlying - strike).max(0.0),
        OptionType::Put => (strike - underlying).max(0.0),
    }
}

/// A payoff profile evaluated at expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payoff {
    Call { strike: f64 },
    Put { strike: f64 },
    /// Long the lower-strike call, short the upper-strike call.
    BullSpread { lower: f64, upper: f64 },
    /// Long the wings, short two calls at the body.
    ButterflySpread { low: f64, mid: f64, high: f64 },
}

impl Payoff {
    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`] if `strike` is not positive.
    pub fn call(strike: f64) -> Result<Self> {
        validate_positive(strike, "strike")?;
        Ok(Payoff::Call { strike })
    }

    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`] if `strike` is not positive.
    pub fn put(strike: f64) -> Result<Self> {
        validate_positive(strike, "strike")?;
        Ok(Payoff::Put { strike })
    }

    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`] unless `0 < lower < upper`.
    pub fn bull_spread(lower: f64, upper: f64) -> Result<Self> {
        validate_positive(lower, "lower")?;
        validate_positive(upper, "upper")?;
        require_increasing(lower, upper, "upper")?;
        Ok(Payoff::BullSpread { lower, upper })
    }

    /// # Errors
    /// Returns [`OptionsError::InvalidParameter`] unless `0 < low < mid < high`.
    pub fn butterfly_spread(low: f64, mid: f64, high: f64) -> Result<Self> {
        validate_positive(low, "low")?;
        validate_positive(mid, "mid")?;
        validate_positive(high, "high")?;
        require_increasing(low, mid, "mid")?;
        require_increasing(mid, high, "high")?;
        Ok(Payoff::ButterflySpread { low, mid, high })
    }

    /// Payoff when the underlying settles at `spot`.
    pub fn value(&self, spot: f64) -> f64 {
        match *self {
            Payoff::Call { strike } => vanilla(OptionType::Call, spot, strike),
            Payoff::Put { strike } => vanilla(OptionType::Put, spot, strike),
            Payoff::BullSpread { lower, upper } => {
                vanilla(OptionType::Call, spot, lower) - vanilla(OptionType::Call, spot, upper)
            }
            Payoff::ButterflySpread { low, mid, high } => {
                vanilla(OptionType::Call, spot, low) - 2.0 * vanilla(OptionType::Call, spot, mid)
                    + vanilla(OptionType::Call, spot, high)
            }
        }
    }

    /// Evaluate the payoff over a grid of settlement prices.
    pub fn profile(&self, spots: &[f64]) -> Vec<f64> {
        spots.iter().map(|&s| self.value(s)).collect()
    }
}

fn require_increasing(below: f64, above: f64, name: &'static str) -> Result<()> {
    if above <= below {
        return Err(OptionsError::InvalidParameter {
            parameter: name,
            value: above,
            reason: "strikes must be strictly increasing",
        });
    }
    Ok(())
}
