use wasm_bindgen_test::*;

use optcalc_wasm::*;

// ── Pricing ──

#[wasm_bindgen_test]
fn price_textbook_call() {
    let r = price_and_greeks(100.0, 100.0, 1.0, 0.05, 0.2, true).unwrap();
    assert!((r.call_price() - 10.4506).abs() < 1e-4, "call={}", r.call_price());
    assert!((r.put_price() - 5.5735).abs() < 1e-4, "put={}", r.put_price());
    assert!((r.delta() - 0.6368).abs() < 1e-4);
    assert!(r.gamma() > 0.0 && r.vega() > 0.0);
    assert!(r.is_call());
}

#[wasm_bindgen_test]
fn put_greeks_reflect_put_side() {
    let r = price_and_greeks(100.0, 100.0, 1.0, 0.05, 0.2, false).unwrap();
    assert!((r.delta() - (0.6368 - 1.0)).abs() < 1e-4);
    assert!(r.rho() < 0.0);
    assert!(!r.is_call());
}

#[wasm_bindgen_test]
fn invalid_inputs_rejected() {
    assert!(price_and_greeks(100.0, 100.0, 0.0, 0.05, 0.2, true).is_err());
    assert!(price_and_greeks(-1.0, 100.0, 1.0, 0.05, 0.2, true).is_err());
    assert!(price_and_greeks(100.0, 0.0, 1.0, 0.05, 0.2, true).is_err());
    assert!(price_and_greeks(100.0, 100.0, 1.0, 0.05, -0.2, true).is_err());
    assert!(price_and_greeks(100.0, 100.0, 1.0, f64::NAN, 0.2, true).is_err());
}

#[wasm_bindgen_test]
fn error_carries_kind_tag() {
    let err = price_and_greeks(100.0, 100.0, 0.0, 0.05, 0.2, true).err().unwrap();
    let msg = err.as_string().unwrap();
    assert!(msg.starts_with("InvalidParameter:"), "msg={msg}");
    assert!(msg.contains("time_to_expiry"), "msg={msg}");
}

#[wasm_bindgen_test]
fn pricing_result_json() {
    let r = price_and_greeks(100.0, 100.0, 1.0, 0.05, 0.2, true).unwrap();
    let json = r.to_json().unwrap();
    assert!(json.contains("call_price"));
    assert!(json.contains("\"option_type\":\"Call\""));
}

// ── Implied volatility ──

#[wasm_bindgen_test]
fn implied_vol_round_trip() {
    let r = price_and_greeks(100.0, 110.0, 0.5, 0.03, 0.35, true).unwrap();
    let iv = implied_volatility(100.0, 110.0, 0.5, 0.03, r.call_price(), true).unwrap();
    assert!((iv - 0.35).abs() < 1e-4, "iv={iv}");
}

#[wasm_bindgen_test]
fn implied_vol_rejects_arbitrage_price() {
    assert!(implied_volatility(100.0, 100.0, 1.0, 0.05, 120.0, true).is_err());
}

// ── Portfolio ──

#[wasm_bindgen_test]
fn portfolio_long_short_cancels() {
    let flat = vec![
        2.0, 100.0, 1.0, 0.2, 1.0, 10.0, //
        -2.0, 100.0, 1.0, 0.2, 1.0, 10.0,
    ];
    let g = analyze_portfolio(100.0, 0.05, flat, false).unwrap();
    assert!(g.total_delta().abs() < 1e-12);
    assert!(g.portfolio_value().abs() < 1e-12);
}

#[wasm_bindgen_test]
fn portfolio_bad_layout_rejected() {
    assert!(analyze_portfolio(100.0, 0.05, vec![1.0, 100.0, 1.0], false).is_err());
}

#[wasm_bindgen_test]
fn portfolio_json_matches_flat() {
    let json = r#"[{"quantity":1.0,"contract":{"strike":100.0,"time_to_expiry":1.0,"volatility":0.2,"option_type":"Put"},"market_price":5.5}]"#;
    let from_json = analyze_portfolio_json(100.0, 0.05, json, false).unwrap();
    let from_flat = analyze_portfolio(100.0, 0.05, vec![1.0, 100.0, 1.0, 0.2, 0.0, 5.5], false).unwrap();
    assert_eq!(from_json.total_delta(), from_flat.total_delta());
    assert_eq!(from_json.portfolio_value(), from_flat.portfolio_value());
}

#[wasm_bindgen_test]
fn portfolio_implied_marking_uses_market_price() {
    let g = analyze_portfolio(100.0, 0.05, vec![3.0, 100.0, 1.0, 0.9, 1.0, 11.0], true).unwrap();
    assert!((g.portfolio_value() - 33.0).abs() < 1e-12);
}

// ── Monte Carlo ──

#[wasm_bindgen_test]
fn asian_seeded_is_reproducible() {
    let a = simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 2_000, 12, true, Some(42.0)).unwrap();
    let b = simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 2_000, 12, true, Some(42.0)).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
    assert!(a > 0.0 && a < 10.4506);
}

#[wasm_bindgen_test]
fn asian_unseeded_runs() {
    let p = simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 500, 12, false, None).unwrap();
    assert!(p >= 0.0);
}

#[wasm_bindgen_test]
fn asian_invalid_counts_rejected() {
    assert!(simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 0, 12, true, None).is_err());
    assert!(simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 100, -3, true, None).is_err());
    assert!(simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 100, 12, true, Some(-1.0)).is_err());
    assert!(simulate_asian_option(100.0, 100.0, 1.0, 0.05, 0.2, 100, 12, true, Some(1.5)).is_err());
}

// ── Version ──

#[wasm_bindgen_test]
fn version_is_semver() {
    let v = version();
    assert_eq!(v.split('.').count(), 3, "version={v}");
}
