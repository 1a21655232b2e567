//! Price European options with Black-Scholes and inspect the Greeks.
//!
//! Shows how to:
//!   - Price a call and a put from one market state
//!   - Read side-specific Greeks (theta per year and per day)
//!   - Check put-call parity
//!   - Plot spread payoffs at expiry
//!
//! Run with: `cargo run --example price_option`

use optcalc::conventions::{discount_factor, theta_per_day};
use optcalc::payoff::Payoff;
use optcalc::{price_and_greeks, ContractSpec, MarketState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let market = MarketState::new(100.0, 0.05)?;
    let strike = 100.0;
    let expiry = 1.0;
    let vol = 0.20;

    // ---------------------------------------------------------------
    // 1. Call and put
    // ---------------------------------------------------------------

    let call = price_and_greeks(&market, &ContractSpec::call(strike, expiry, vol)?)?;
    let put = price_and_greeks(&market, &ContractSpec::put(strike, expiry, vol)?)?;

    println!("Black-Scholes S={} K={strike} T={expiry}y r={} σ={vol}", market.spot, market.risk_free_rate);
    println!();
    println!("{:>10} {:>12} {:>12}", "", "Call", "Put");
    println!("{}", "-".repeat(36));
    println!("{:>10} {:>12.4} {:>12.4}", "price", call.call_price, put.put_price);
    println!("{:>10} {:>12.4} {:>12.4}", "delta", call.delta, put.delta);
    println!("{:>10} {:>12.6} {:>12.6}", "gamma", call.gamma, put.gamma);
    println!("{:>10} {:>12.4} {:>12.4}", "vega", call.vega, put.vega);
    println!("{:>10} {:>12.4} {:>12.4}", "theta/yr", call.theta, put.theta);
    println!(
        "{:>10} {:>12.6} {:>12.6}",
        "theta/day",
        theta_per_day(call.theta),
        theta_per_day(put.theta)
    );
    println!("{:>10} {:>12.4} {:>12.4}", "rho", call.rho, put.rho);

    // ---------------------------------------------------------------
    // 2. Put-call parity
    // ---------------------------------------------------------------

    let parity = market.spot - strike * discount_factor(market.risk_free_rate, expiry);
    println!(
        "\nPut-call parity: C - P = {:.6}, S - Ke^(-rT) = {parity:.6}",
        call.call_price - call.put_price
    );

    // ---------------------------------------------------------------
    // 3. Spread payoffs at expiry
    // ---------------------------------------------------------------

    let bull = Payoff::bull_spread(95.0, 105.0)?;
    let fly = Payoff::butterfly_spread(90.0, 100.0, 110.0)?;
    let spots = [85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0];

    println!("\n--- Payoff at expiry ---\n");
    println!("{:>8} {:>12} {:>12}", "S_T", "Bull 95/105", "Fly 90/100/110");
    println!("{}", "-".repeat(36));
    for (s, (b, f)) in spots.iter().zip(bull.profile(&spots).into_iter().zip(fly.profile(&spots))) {
        println!("{s:>8.0} {b:>12.2} {f:>12.2}");
    }

    Ok(())
}
