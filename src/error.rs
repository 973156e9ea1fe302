//! Error type shared by the incubator, the pool and the strategy contracts.

/// Errors raised by the incubation core.
///
/// A stalled round (no action with positive interest) is *not* an error:
/// it is reported through [`Incubator::has_evolved`](crate::incubator::Incubator::has_evolved).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncubatorError {
    /// The minimum population size exceeds the (bounded) maximum.
    ///
    /// Raised synchronously by the size setters and by
    /// [`IncubatorConfig::validate`](crate::incubator::IncubatorConfig::validate).
    /// Sizes are never clamped silently.
    #[error("min size {min} exceeds max size {max}")]
    InvalidSizeBounds { min: usize, max: usize },

    /// A strategy broke its contract: a competition could not order two
    /// candidates, or an operator declared applicable produced nothing.
    ///
    /// Operators are assumed total on their declared domain, so the round
    /// is aborted and the error is handed to the caller without retry.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl IncubatorError {
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IncubatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bounds_message() {
        let err = IncubatorError::InvalidSizeBounds { min: 5, max: 3 };
        assert_eq!(err.to_string(), "min size 5 exceeds max size 3");
    }

    #[test]
    fn test_contract_message() {
        let err = IncubatorError::contract("mutator `swap` produced no neighbor");
        assert_eq!(
            err.to_string(),
            "contract violation: mutator `swap` produced no neighbor"
        );
    }
}
