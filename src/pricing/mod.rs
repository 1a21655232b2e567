//! Closed-form pricing.
//!
//! - [`price_and_greeks`] — European call/put prices and the five Greeks
//! - [`price`] — requested-side price only

pub mod black_scholes;

pub use black_scholes::{price, price_and_greeks};
