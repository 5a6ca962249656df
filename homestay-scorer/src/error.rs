//! Error types raised while configuring the scorers.

use thiserror::Error;

/// Errors raised when weights or policy constants are unusable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    /// A weight or policy value was NaN or infinite.
    #[error("{component} must be finite")]
    NonFinite {
        /// Name of the offending component.
        component: &'static str,
    },
    /// A weight or policy value was negative.
    #[error("{component} must not be negative (got {value})")]
    Negative {
        /// Name of the offending component.
        component: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// Weights did not add up to one.
    #[error("weights must sum to 1.0 (got {total})")]
    UnbalancedWeights {
        /// Sum of the supplied weights.
        total: f64,
    },
    /// A policy score fell outside `0.0..=1.0`.
    #[error("{component} must lie within 0.0..=1.0 (got {value})")]
    OutOfUnitRange {
        /// Name of the offending component.
        component: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// A policy divisor was zero or negative.
    #[error("{component} must be positive")]
    NonPositive {
        /// Name of the offending component.
        component: &'static str,
    },
}
