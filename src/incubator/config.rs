//! Incubator configuration.

use crate::competition::TiePolicy;
use crate::error::{IncubatorError, Result};

/// Configuration for an [`Incubator`](super::Incubator).
///
/// # Population bounds
///
/// `min_size` is a diversification floor: while the population is smaller,
/// explorators are always fully attractive. `max_size` caps the population;
/// exploring at the cap evicts the worst trajectory first. `0` disables
/// either bound.
///
/// # Examples
///
/// ```
/// use u_incubator::competition::TiePolicy;
/// use u_incubator::incubator::IncubatorConfig;
///
/// let config = IncubatorConfig::default()
///     .with_min_size(2)
///     .with_max_size(5)
///     .with_tie_policy(TiePolicy::Random)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncubatorConfig {
    /// Diversification floor (0 = none).
    pub min_size: usize,

    /// Population cap (0 = unbounded).
    pub max_size: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// How ties between candidates are broken.
    pub tie_policy: TiePolicy,
}

impl Default for IncubatorConfig {
    fn default() -> Self {
        Self {
            min_size: 0,
            max_size: 0,
            seed: None,
            tie_policy: TiePolicy::KeepFirst,
        }
    }
}

impl IncubatorConfig {
    pub fn with_min_size(mut self, n: usize) -> Self {
        self.min_size = n;
        self
    }

    pub fn with_max_size(mut self, n: usize) -> Self {
        self.max_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        check_bounds(self.min_size, self.max_size)
    }
}

/// `min <= max` unless `max` is unbounded.
pub(super) fn check_bounds(min: usize, max: usize) -> Result<()> {
    if max != 0 && min > max {
        return Err(IncubatorError::InvalidSizeBounds { min, max });
    }
    Ok(())
}
