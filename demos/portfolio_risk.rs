//! Aggregate Greeks across a book of option positions.
//!
//! Shows how to:
//!   - Mark a book at model volatilities
//!   - Mark the same book from observed prices (implied volatility)
//!   - Inspect per-position risk
//!
//! Run with: `cargo run --example portfolio_risk`

use optcalc::portfolio::position_risks;
use optcalc::{
    BlackScholesEngine, ContractSpec, ImpliedVolSolver, MarkMode, MarketState, OptionsEngine, Position,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let market = MarketState::new(100.0, 0.05)?;

    // Long ATM calls, short OTM puts, a few short-dated wings.
    let book = vec![
        Position::new(10.0, ContractSpec::call(100.0, 1.0, 0.20)?, 10.80),
        Position::new(-5.0, ContractSpec::put(95.0, 0.5, 0.25)?, 3.40),
        Position::new(20.0, ContractSpec::call(115.0, 0.25, 0.30)?, 0.45),
    ];

    // ---------------------------------------------------------------
    // 1. Per-position risk
    // ---------------------------------------------------------------

    let risks = position_risks(&market, &book, MarkMode::Model, &ImpliedVolSolver::default())?;
    println!("{:>4} {:>8} {:>8} {:>10} {:>10} {:>10}", "#", "Qty", "Vol", "Value", "Delta", "Vega");
    println!("{}", "-".repeat(56));
    for (i, r) in risks.iter().enumerate() {
        println!(
            "{i:>4} {:>8.1} {:>8.4} {:>10.4} {:>10.4} {:>10.4}",
            r.quantity, r.volatility, r.unit_value, r.greeks.delta, r.greeks.vega
        );
    }

    // ---------------------------------------------------------------
    // 2. Totals under both marking modes
    // ---------------------------------------------------------------

    for mode in [MarkMode::Model, MarkMode::Implied] {
        let engine = BlackScholesEngine::new().mark_mode(mode);
        let totals = engine.analyze_portfolio(&market, &book)?;
        println!("\n{mode:?} marking");
        println!("  value: {:>12.4}", totals.portfolio_value);
        println!("  delta: {:>12.4}", totals.total_delta);
        println!("  gamma: {:>12.6}", totals.total_gamma);
        println!("  vega:  {:>12.4}", totals.total_vega);
        println!("  theta: {:>12.4}", totals.total_theta);
        println!("  rho:   {:>12.4}", totals.total_rho);
    }

    Ok(())
}
