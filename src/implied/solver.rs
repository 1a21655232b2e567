//! Black-Scholes implied volatility via safeguarded Newton-Raphson.
//!
//! Newton steps use vega from the closed-form pricer as the derivative. The
//! solver keeps a bracket `[lo, hi]` around the root, tightened after every
//! evaluation (the price is increasing in σ). When vega is too small for a
//! safe Newton step, or the step would leave the bracket, it bisects instead.
//! Deep in/out-of-the-money and near-expiry contracts are the usual cases.
//!
//! A small price residual alone does not pin down σ when vega is small, so
//! convergence also requires the volatility itself to be resolved: either the
//! Newton correction `residual / vega` or the bracket width must be below
//! `vol_tolerance`.

use serde::{Deserialize, Serialize};

use crate::conventions::discount_factor;
use crate::error::{OptionsError, Result};
use crate::pricing::price_and_greeks;
use crate::types::{MarketState, OptionType, VanillaTerms, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Tuning for [`ImpliedVolSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Newton seed σ₀.
    pub initial_vol: f64,
    /// Convergence threshold on `|model_price − market_price|`.
    pub tolerance: f64,
    /// Convergence threshold on the volatility: the Newton correction or the
    /// bracket width must fall below it.
    pub vol_tolerance: f64,
    /// Hard cap on pricer evaluations.
    pub max_iterations: usize,
    /// Below this vega the solver bisects instead of taking a Newton step.
    pub min_vega: f64,
    /// Lower end of the volatility search range.
    pub vol_lower: f64,
    /// Upper end of the volatility search range.
    pub vol_upper: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_vol: 0.3,
            tolerance: 1e-6,
            vol_tolerance: 1e-8,
            max_iterations: 100,
            min_vega: 1e-8,
            vol_lower: 1e-6,
            vol_upper: 5.0,
        }
    }
}

impl SolverConfig {
    pub fn initial_vol(mut self, initial_vol: f64) -> Self {
        self.initial_vol = initial_vol;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn vol_tolerance(mut self, vol_tolerance: f64) -> Self {
        self.vol_tolerance = vol_tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn min_vega(mut self, min_vega: f64) -> Self {
        self.min_vega = min_vega;
        self
    }

    /// Set the volatility search range `[lower, upper]`.
    pub fn vol_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.vol_lower = lower;
        self.vol_upper = upper;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_positive(self.initial_vol, "initial_vol")?;
        validate_positive(self.tolerance, "tolerance")?;
        validate_positive(self.vol_tolerance, "vol_tolerance")?;
        validate_non_negative(self.min_vega, "min_vega")?;
        validate_positive(self.vol_lower, "vol_lower")?;
        validate_positive(self.vol_upper, "vol_upper")?;
        if self.vol_upper <= self.vol_lower {
            return Err(OptionsError::InvalidParameter {
                parameter: "vol_upper",
                value: self.vol_upper,
                reason: "must exceed vol_lower",
            });
        }
        if self.max_iterations == 0 {
            return Err(OptionsError::InvalidParameter {
                parameter: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Inverts the Black-Scholes price to a volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolSolver {
    config: SolverConfig,
}

impl ImpliedVolSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the volatility at which the model price of `terms` equals
    /// `market_price`.
    ///
    /// # Errors
    /// - [`OptionsError::InvalidParameter`] for invalid market, terms or
    ///   config, or a `market_price` outside the no-arbitrage interval
    ///   (discounted intrinsic, `S` for calls / `K·e^(−rT)` for puts).
    /// - [`OptionsError::NoConvergence`] when the iteration cap is reached,
    ///   carrying the last estimate and its residual.
    pub fn solve(&self, market: &MarketState, terms: &VanillaTerms, market_price: f64) -> Result<Vol> {
        market.validate()?;
        terms.validate()?;
        self.config.validate()?;
        validate_finite(market_price, "market_price")?;
        check_price_bounds(market, terms, market_price)?;

        let cfg = &self.config;

        #[cfg(feature = "logging")]
        tracing::debug!(
            strike = terms.strike,
            expiry = terms.time_to_expiry,
            market_price,
            "implied vol solve started"
        );

        let mut lo = cfg.vol_lower;
        let mut hi = cfg.vol_upper;
        let mut sigma = cfg.initial_vol.clamp(lo, hi);
        let mut last_sigma = sigma;
        let mut residual = f64::NAN;

        for _iteration in 1..=cfg.max_iterations {
            let greeks = price_and_greeks(market, &terms.with_volatility(sigma))?;
            residual = greeks.price() - market_price;
            last_sigma = sigma;

            let usable_vega = greeks.vega > cfg.min_vega;
            let vol_resolved = residual == 0.0
                || hi - lo < cfg.vol_tolerance
                || (usable_vega && (residual / greeks.vega).abs() < cfg.vol_tolerance);

            if residual.abs() < cfg.tolerance && vol_resolved {
                #[cfg(feature = "logging")]
                tracing::debug!(
                    vol = sigma,
                    residual,
                    iterations = _iteration,
                    "implied vol converged"
                );
                return Ok(Vol(sigma));
            }

            if residual > 0.0 {
                hi = sigma;
            } else {
                lo = sigma;
            }

            let newton = usable_vega.then(|| sigma - residual / greeks.vega);
            sigma = match newton {
                Some(next) if next > lo && next < hi => next,
                _ => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(vol = sigma, vega = greeks.vega, lo, hi, "bisection step");
                    0.5 * (lo + hi)
                }
            };
        }

        Err(OptionsError::NoConvergence {
            last_estimate: last_sigma,
            residual,
            iterations: cfg.max_iterations,
        })
    }
}

/// Solve implied volatility with the default [`SolverConfig`].
///
/// # Errors
/// See [`ImpliedVolSolver::solve`].
///
/// # Examples
/// ```
/// use optcalc::implied::solve_implied_volatility;
/// use optcalc::types::{MarketState, OptionType, VanillaTerms};
///
/// let market = MarketState::new(100.0, 0.05).unwrap();
/// let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
/// let vol = solve_implied_volatility(&market, &terms, 10.4506).unwrap();
/// assert!((vol.0 - 0.20).abs() < 1e-4);
/// ```
pub fn solve_implied_volatility(
    market: &MarketState,
    terms: &VanillaTerms,
    market_price: f64,
) -> Result<Vol> {
    ImpliedVolSolver::default().solve(market, terms, market_price)
}

fn check_price_bounds(market: &MarketState, terms: &VanillaTerms, market_price: f64) -> Result<()> {
    let pv_strike = terms.strike * discount_factor(market.risk_free_rate, terms.time_to_expiry);
    let (lower, upper) = match terms.option_type {
        OptionType::Call => ((market.spot - pv_strike).max(0.0), market.spot),
        OptionType::Put => ((pv_strike - market.spot).max(0.0), pv_strike),
    };
    if market_price <= lower || market_price >= upper {
        return Err(OptionsError::InvalidParameter {
            parameter: "market_price",
            value: market_price,
            reason: "must lie strictly between discounted intrinsic value and the upper no-arbitrage bound",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContractSpec;
    use approx::assert_abs_diff_eq;

    fn market() -> MarketState {
        MarketState::new(100.0, 0.05).unwrap()
    }

    fn model_price(strike: f64, expiry: f64, vol: f64, option_type: OptionType) -> f64 {
        let contract = ContractSpec::new(strike, expiry, vol, option_type).unwrap();
        crate::pricing::price(&market(), &contract).unwrap()
    }

    #[test]
    fn recovers_atm_call_vol() {
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        let price = model_price(100.0, 1.0, 0.2, OptionType::Call);
        let vol = solve_implied_volatility(&market(), &terms, price).unwrap();
        assert_abs_diff_eq!(vol.0, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn recovers_put_vol_across_strikes() {
        for (k, sigma) in [(70.0, 0.45), (95.0, 0.25), (130.0, 0.6)] {
            let terms = VanillaTerms::new(k, 0.5, OptionType::Put).unwrap();
            let price = model_price(k, 0.5, sigma, OptionType::Put);
            let vol = solve_implied_volatility(&market(), &terms, price).unwrap();
            assert_abs_diff_eq!(vol.0, sigma, epsilon = 1e-4);
        }
    }

    #[test]
    fn deep_otm_short_dated_uses_bisection_and_converges() {
        // Vega at the 0.3 seed is negligible, so the first steps bisect.
        let terms = VanillaTerms::new(160.0, 0.05, OptionType::Call).unwrap();
        let price = model_price(160.0, 0.05, 1.8, OptionType::Call);
        let vol = solve_implied_volatility(&market(), &terms, price).unwrap();
        assert_abs_diff_eq!(vol.0, 1.8, epsilon = 1e-6);
    }

    #[test]
    fn low_vega_contracts_recover_volatility() {
        // (strike, expiry, σ, side): vega between 5e-13 and 3e-3, where a
        // 1e-6 price match alone leaves σ off by up to 0.1.
        let cases = [
            (50.0, 3.0, 0.1, OptionType::Call),
            (50.0, 0.05, 0.8, OptionType::Put),
            (70.0, 0.01, 0.8, OptionType::Call),
            (50.0, 0.05, 0.4, OptionType::Put),
            (80.0, 0.01, 0.4, OptionType::Call),
            (50.0, 0.01, 1.5, OptionType::Call),
        ];
        for (k, t, sigma, side) in cases {
            let terms = VanillaTerms::new(k, t, side).unwrap();
            let price = model_price(k, t, sigma, side);
            let vol = solve_implied_volatility(&market(), &terms, price).unwrap();
            assert!(
                (vol.0 - sigma).abs() < 1e-6,
                "K={k} T={t} σ={sigma} {side:?}: solved {}",
                vol.0
            );
        }
    }

    #[test]
    fn seed_within_price_tolerance_is_not_accepted() {
        // At σ = 0.3 the model price already matches to 1e-6, but σ is 0.4.
        let terms = VanillaTerms::new(50.0, 0.05, OptionType::Put).unwrap();
        let price = model_price(50.0, 0.05, 0.4, OptionType::Put);
        assert!((model_price(50.0, 0.05, 0.3, OptionType::Put) - price).abs() < 1e-6);
        let vol = solve_implied_volatility(&market(), &terms, price).unwrap();
        assert_abs_diff_eq!(vol.0, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn price_above_upper_bound_rejected() {
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        let err = solve_implied_volatility(&market(), &terms, 100.5).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::InvalidParameter {
                parameter: "market_price",
                ..
            }
        ));
    }

    #[test]
    fn price_below_intrinsic_rejected() {
        let terms = VanillaTerms::new(80.0, 1.0, OptionType::Call).unwrap();
        assert!(solve_implied_volatility(&market(), &terms, 20.0).is_err());
    }

    #[test]
    fn iteration_cap_reports_no_convergence() {
        let solver = ImpliedVolSolver::new(SolverConfig::default().max_iterations(1));
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        let price = model_price(100.0, 1.0, 0.8, OptionType::Call);
        match solver.solve(&market(), &terms, price) {
            Err(OptionsError::NoConvergence {
                last_estimate,
                residual,
                iterations,
            }) => {
                assert_eq!(iterations, 1);
                assert_eq!(last_estimate, 0.3);
                assert!(residual < 0.0, "seed 0.3 should underprice a 0.8 vol option");
            }
            other => panic!("expected NoConvergence, got {other:?}"),
        }
    }

    #[test]
    fn root_outside_search_range_is_no_convergence() {
        let solver = ImpliedVolSolver::new(SolverConfig::default().vol_bounds(0.01, 0.5));
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        let price = model_price(100.0, 1.0, 0.9, OptionType::Call);
        assert!(matches!(
            solver.solve(&market(), &terms, price),
            Err(OptionsError::NoConvergence { .. })
        ));
    }

    #[test]
    fn non_positive_vol_tolerance_rejected() {
        let solver = ImpliedVolSolver::new(SolverConfig::default().vol_tolerance(0.0));
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        assert!(matches!(
            solver.solve(&market(), &terms, 10.0),
            Err(OptionsError::InvalidParameter {
                parameter: "vol_tolerance",
                ..
            })
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let solver = ImpliedVolSolver::new(SolverConfig::default().vol_bounds(1.0, 0.5));
        let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call).unwrap();
        assert!(matches!(
            solver.solve(&market(), &terms, 10.0),
            Err(OptionsError::InvalidParameter {
                parameter: "vol_upper",
                ..
            })
        ));
    }
}
