use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use optcalc::implied::ImpliedVolSolver;
use optcalc::portfolio::analyze_portfolio_with;
use optcalc::{
    analyze_portfolio, price_and_greeks, solve_implied_volatility, ContractSpec, MarkMode, MarketState,
    OptionType, Position,
};

/// Synthetic book of alternating calls and puts across a strike/expiry grid.
fn generate_book(market: &MarketState, n_positions: usize) -> Vec<Position> {
    (0..n_positions)
        .map(|i| {
            let strike = 80.0 + 40.0 * (i % 21) as f64 / 20.0;
            let expiry = 0.1 + 0.25 * (i % 8) as f64;
            let side = if i % 2 == 0 { OptionType::Call } else { OptionType::Put };
            let contract = ContractSpec::new(strike, expiry, 0.25, side).expect("benchmark contract should be valid");
            let observed = price_and_greeks(market, &contract.terms().with_volatility(0.22))
                .expect("benchmark pricing should succeed")
                .price();
            let quantity = if i % 3 == 0 { -5.0 } else { 10.0 };
            Position::new(quantity, contract, observed)
        })
        .collect()
}

fn closed_form_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("closed_form");
    let market = MarketState::new(100.0, 0.05).expect("benchmark market should be valid");

    let atm = ContractSpec::call(100.0, 1.0, 0.2).expect("benchmark contract should be valid");
    group.bench_function("price_and_greeks_atm", |b| {
        b.iter(|| price_and_greeks(black_box(&market), black_box(&atm)).unwrap());
    });

    let strikes: Vec<f64> = (0..100).map(|i| 50.0 + i as f64).collect();
    group.bench_function("price_and_greeks_100_strikes", |b| {
        b.iter(|| {
            strikes
                .iter()
                .map(|&k| {
                    let c = ContractSpec::put(k, 0.5, 0.3).unwrap();
                    price_and_greeks(&market, &c).unwrap().put_price
                })
                .sum::<f64>()
        });
    });

    group.finish();
}

fn implied_vol_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_vol");
    let market = MarketState::new(100.0, 0.05).expect("benchmark market should be valid");

    // Newton path: ATM, vega well away from zero.
    let atm = ContractSpec::call(100.0, 1.0, 0.2).unwrap();
    let atm_price = price_and_greeks(&market, &atm).unwrap().call_price;
    group.bench_function("atm_newton", |b| {
        b.iter(|| solve_implied_volatility(black_box(&market), black_box(&atm.terms()), black_box(atm_price)).unwrap());
    });

    // Bisection-heavy path: deep OTM, short dated, high vol.
    let wing = ContractSpec::call(160.0, 0.05, 1.8).unwrap();
    let wing_price = price_and_greeks(&market, &wing).unwrap().call_price;
    group.bench_function("deep_otm_bisection", |b| {
        b.iter(|| {
            solve_implied_volatility(black_box(&market), black_box(&wing.terms()), black_box(wing_price)).unwrap()
        });
    });

    group.finish();
}

fn portfolio_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio");
    let market = MarketState::new(100.0, 0.05).expect("benchmark market should be valid");
    let solver = ImpliedVolSolver::default();

    for n in [10, 100, 1_000] {
        let book = generate_book(&market, n);
        group.bench_with_input(BenchmarkId::new("model", n), &book, |b, book| {
            b.iter(|| analyze_portfolio(black_box(&market), black_box(book)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("implied", n), &book, |b, book| {
            b.iter(|| {
                analyze_portfolio_with(black_box(&market), black_box(book), MarkMode::Implied, &solver).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    closed_form_benchmarks,
    implied_vol_benchmarks,
    portfolio_benchmarks
);
criterion_main!(benches);
