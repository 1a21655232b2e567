//! Market conventions: forwards, discounting, moneyness and theta units.
//!
//! Rates are continuously compounded and times are in years throughout the
//! crate. Theta is reported per year; [`theta_per_day`] converts using a
//! 365-day calendar year.

/// Calendar days per year used for per-day theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compute forward price from spot: F = S · exp(r · T).
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Continuously compounded discount factor exp(−r · T).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Convert a strike to log-moneyness: k = ln(K / F).
pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
    (strike / forward).ln()
}

/// Convert a strike to simple moneyness: m = K / F.
pub fn moneyness(strike: f64, forward: f64) -> f64 {
    strike / forward
}

/// Convert an annual theta to theta per calendar day.
pub fn theta_per_day(theta_per_year: f64) -> f64 {
    theta_per_year / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_and_discount_are_reciprocal() {
        let f = forward_price(100.0, 0.05, 2.0);
        assert_abs_diff_eq!(f * discount_factor(0.05, 2.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn atm_forward_has_zero_log_moneyness() {
        let f = forward_price(100.0, 0.03, 0.5);
        assert_abs_diff_eq!(log_moneyness(f, f), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(moneyness(f, f), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn theta_per_day_divides_by_calendar_year() {
        assert_abs_diff_eq!(theta_per_day(-365.0), -1.0, epsilon = 1e-15);
    }
}
