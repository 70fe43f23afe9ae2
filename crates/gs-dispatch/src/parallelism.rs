//! Concurrency limits for the exploration and optimization phases.

use gs_types::DispatchError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::settings::DEFAULT_BAYESIAN_PARALLELISM;

/// Override value that removes every concurrency limit.
pub const NO_PARALLELISM_LIMIT: i64 = -1;

/// Resolved per-phase concurrency limits; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelismLimits {
    pub exploration: Option<i64>,
    pub optimization: Option<i64>,
}

/// User-facing parallelism directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismPolicy {
    pub max_parallelism_override: Option<i64>,
    pub max_parallelism_cap: Option<i64>,
    pub enforce_sequential: bool,
    pub default_bayesian_parallelism: i64,
}

impl ParallelismPolicy {
    pub fn new(override_value: Option<i64>, cap: Option<i64>, enforce_sequential: bool) -> Self {
        Self {
            max_parallelism_override: override_value,
            max_parallelism_cap: cap,
            enforce_sequential,
            default_bayesian_parallelism: DEFAULT_BAYESIAN_PARALLELISM,
        }
    }

    pub fn with_default_bayesian_parallelism(mut self, n: i64) -> Self {
        self.default_bayesian_parallelism = n;
        self
    }

    /// Reconcile override, cap and defaults into concrete limits.
    ///
    /// Fails if both an override and a cap are given.
    pub fn resolve(&self) -> Result<ParallelismLimits, DispatchError> {
        if let (Some(override_value), Some(cap)) =
            (self.max_parallelism_override, self.max_parallelism_cap)
        {
            return Err(DispatchError::ConflictingParallelism { override_value, cap });
        }

        if !self.enforce_sequential
            && (self.max_parallelism_override.is_some() || self.max_parallelism_cap.is_some())
        {
            info!(
                "Sequential optimization is not enforced, but the max parallelism override or \
                 cap still limits concurrency."
            );
        }

        let limits = match (self.max_parallelism_override, self.max_parallelism_cap) {
            (Some(NO_PARALLELISM_LIMIT), _) => ParallelismLimits::default(),
            (Some(n), _) => ParallelismLimits {
                exploration: Some(n),
                optimization: Some(n),
            },
            (None, Some(cap)) => ParallelismLimits {
                exploration: Some(cap),
                optimization: Some(cap.min(self.default_bayesian_parallelism)),
            },
            (None, None) if !self.enforce_sequential => ParallelismLimits::default(),
            (None, None) => ParallelismLimits {
                exploration: None,
                optimization: Some(self.default_bayesian_parallelism),
            },
        };

        Ok(limits)
    }
}

/// Shorthand for [`ParallelismPolicy::resolve`] with the default concurrency ceiling.
pub fn resolve_parallelism(
    override_value: Option<i64>,
    cap: Option<i64>,
    enforce_sequential: bool,
) -> Result<ParallelismLimits, DispatchError> {
    ParallelismPolicy::new(override_value, cap, enforce_sequential).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_and_cap_conflict() {
        for enforce in [true, false] {
            let err = resolve_parallelism(Some(4), Some(2), enforce).unwrap_err();
            assert_eq!(
                err,
                DispatchError::ConflictingParallelism {
                    override_value: 4,
                    cap: 2
                }
            );
        }
        // -1 is still an explicit override.
        assert!(resolve_parallelism(Some(-1), Some(2), true).is_err());
    }

    #[test]
    fn minus_one_override_removes_limits() {
        let limits = resolve_parallelism(Some(-1), None, true).unwrap();
        assert_eq!(limits, ParallelismLimits::default());
    }

    #[test]
    fn override_applies_to_both_phases() {
        for enforce in [true, false] {
            let limits = resolve_parallelism(Some(7), None, enforce).unwrap();
            assert_eq!(limits.exploration, Some(7));
            assert_eq!(limits.optimization, Some(7));
        }
    }

    #[test]
    fn cap_bounds_optimization_by_default() {
        let limits = resolve_parallelism(None, Some(10), true).unwrap();
        assert_eq!(limits.exploration, Some(10));
        assert_eq!(limits.optimization, Some(3));

        let limits = resolve_parallelism(None, Some(2), false).unwrap();
        assert_eq!(limits.exploration, Some(2));
        assert_eq!(limits.optimization, Some(2));
    }

    #[test]
    fn unenforced_without_directives_is_unbounded() {
        let limits = resolve_parallelism(None, None, false).unwrap();
        assert_eq!(limits, ParallelismLimits::default());
    }

    #[test]
    fn enforced_without_directives_uses_default_ceiling() {
        let limits = resolve_parallelism(None, None, true).unwrap();
        assert_eq!(limits.exploration, None);
        assert_eq!(limits.optimization, Some(3));
    }

    #[test]
    fn default_ceiling_is_injectable() {
        let policy = ParallelismPolicy::new(None, None, true).with_default_bayesian_parallelism(8);
        assert_eq!(policy.resolve().unwrap().optimization, Some(8));

        let capped =
            ParallelismPolicy::new(None, Some(5), true).with_default_bayesian_parallelism(8);
        assert_eq!(capped.resolve().unwrap().optimization, Some(5));
    }
}
