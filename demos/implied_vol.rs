//! Recover implied volatility from observed option prices.
//!
//! Shows how to:
//!   - Solve for σ with the default solver
//!   - Tune the solver and handle non-convergence
//!   - Reject prices outside no-arbitrage bounds
//!
//! Run with: `cargo run --example implied_vol`

use optcalc::{
    price_and_greeks, ContractSpec, ImpliedVolSolver, MarketState, OptionType, OptionsError, SolverConfig,
    VanillaTerms,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let market = MarketState::new(100.0, 0.05)?;
    let solver = ImpliedVolSolver::default();

    // ---------------------------------------------------------------
    // 1. Round trip across strikes
    // ---------------------------------------------------------------

    println!("--- Implied vol across strikes (T = 0.5y, σ = 25%) ---\n");
    println!("{:>8} {:>6} {:>12} {:>12} {:>14}", "Strike", "Side", "Price", "IV", "Reprice err");
    println!("{}", "-".repeat(56));

    for k in [70.0, 85.0, 100.0, 115.0, 130.0] {
        let side = if k < 100.0 { OptionType::Put } else { OptionType::Call };
        let contract = ContractSpec::new(k, 0.5, 0.25, side)?;
        let price = price_and_greeks(&market, &contract)?.price();
        let iv = solver.solve(&market, &contract.terms(), price)?;
        let reprice = price_and_greeks(&market, &contract.terms().with_volatility(iv.0))?.price();
        println!(
            "{k:>8.0} {:>6} {price:>12.6} {:>11.6}% {:>14.2e}",
            format!("{side:?}"),
            iv.0 * 100.0,
            (price - reprice).abs()
        );
    }

    // ---------------------------------------------------------------
    // 2. Tight iteration budget
    // ---------------------------------------------------------------

    let terms = VanillaTerms::new(100.0, 1.0, OptionType::Call)?;
    let capped = ImpliedVolSolver::new(SolverConfig::default().max_iterations(2));
    match capped.solve(&market, &terms, 40.0) {
        Err(OptionsError::NoConvergence {
            last_estimate,
            residual,
            iterations,
        }) => println!(
            "\nNo convergence after {iterations} iterations: last σ = {last_estimate:.4}, residual = {residual:.4}"
        ),
        other => println!("\nUnexpected result: {other:?}"),
    }

    // ---------------------------------------------------------------
    // 3. Price above the no-arbitrage ceiling
    // ---------------------------------------------------------------

    if let Err(e) = solver.solve(&market, &terms, 101.0) {
        println!("Rejected price 101.0 for a call on spot 100: {e}");
    }

    Ok(())
}
