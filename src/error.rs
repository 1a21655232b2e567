//! Error types for the optcalc engine.
//!
//! Every fallible operation returns `Result<T, OptionsError>`. Errors are
//! values: callers can always tell "got a price" from "got an error" without
//! inspecting the number for NaN or sign.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Errors produced by the pricer, solver, simulator and portfolio analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OptionsError {
    /// An input lies outside the domain of the operation.
    #[error("invalid parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending field (e.g. `"time_to_expiry"`).
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value was required to satisfy.
        reason: &'static str,
    },

    /// The implied volatility solver exhausted its iteration budget.
    #[error(
        "implied volatility did not converge after {iterations} iterations \
         (last estimate {last_estimate}, residual {residual})"
    )]
    NoConvergence {
        /// Volatility estimate at the final iteration.
        last_estimate: f64,
        /// `model_price - market_price` at `last_estimate`.
        residual: f64,
        /// Number of iterations performed.
        iterations: usize,
    },

    /// Pricing a portfolio position failed.
    #[error("position {index}: {source}")]
    Position {
        /// Zero-based index of the position in the input sequence.
        index: usize,
        #[source]
        source: Box<OptionsError>,
    },
}

impl OptionsError {
    /// Tag naming the error kind, stable across releases.
    ///
    /// Position wrappers report the tag of the underlying error.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionsError::InvalidParameter { .. } => "InvalidParameter",
            OptionsError::NoConvergence { .. } => "NoConvergence",
            OptionsError::Position { source, .. } => source.kind(),
        }
    }

    /// Strip any position wrapper, returning the underlying error.
    pub fn root(&self) -> &OptionsError {
        match self {
            OptionsError::Position { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn at_position(self, index: usize) -> Self {
        OptionsError::Position {
            index,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_fields_accessible() {
        let err = OptionsError::InvalidParameter {
            parameter: "time_to_expiry",
            value: 0.0,
            reason: "must be positive and finite",
        };
        match &err {
            OptionsError::InvalidParameter {
                parameter, value, ..
            } => {
                assert_eq!(*parameter, "time_to_expiry");
                assert_eq!(*value, 0.0);
            }
            _ => panic!("wrong variant"),
        }
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn no_convergence_reports_diagnostics() {
        let err = OptionsError::NoConvergence {
            last_estimate: 0.42,
            residual: 1e-3,
            iterations: 100,
        };
        let display = format!("{err}");
        assert!(display.contains("100 iterations"));
        assert!(display.contains("0.42"));
        assert_eq!(err.kind(), "NoConvergence");
    }

    #[test]
    fn position_wrapper_keeps_inner_kind() {
        let inner = OptionsError::InvalidParameter {
            parameter: "strike",
            value: -5.0,
            reason: "must be positive and finite",
        };
        let err = inner.clone().at_position(3);
        assert_eq!(err.kind(), "InvalidParameter");
        assert_eq!(err.root(), &inner);
        let display = format!("{err}");
        assert!(display.starts_with("position 3:"));
        assert!(display.contains("strike"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OptionsError>();
    }
}
