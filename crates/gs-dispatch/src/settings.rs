//! The settings bundle consumed by the strategy assembler.

use gs_types::{Experiment, ExperimentId, OptimizationConfig};
use serde::{Deserialize, Serialize};

use crate::model::WinsorizationLimits;

/// Above this many categorical combinations a categorical kernel is not worth fitting.
pub const MAX_DISCRETE_COMBINATIONS: i64 = 65;

/// Concurrency ceiling for model-based phases.
pub const DEFAULT_BAYESIAN_PARALLELISM: i64 = 3;

/// Lower bound on the default number of initialization trials for 1-arm trials.
pub const MIN_INITIALIZATION_TRIALS: i64 = 5;

/// Thresholds the heuristic and the parallelism resolver fall back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchDefaults {
    pub max_discrete_combinations: i64,
    pub default_bayesian_parallelism: i64,
    pub min_initialization_trials: i64,
}

impl Default for DispatchDefaults {
    fn default() -> Self {
        Self {
            max_discrete_combinations: MAX_DISCRETE_COMBINATIONS,
            default_bayesian_parallelism: DEFAULT_BAYESIAN_PARALLELISM,
            min_initialization_trials: MIN_INITIALIZATION_TRIALS,
        }
    }
}

/// Everything that steers which strategy gets built and how it is staged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Total number of trials in the optimization, if known in advance.
    pub trial_budget: Option<i64>,

    /// Suppress regeneration of already generated trials.
    pub dedup_trials: bool,

    /// Clip outcomes to `winsorization_limits` before fitting. Both must be
    /// set together.
    pub winsorize: bool,
    pub winsorization_limits: Option<WinsorizationLimits>,

    /// Trials are batches of arms rather than single arms.
    pub use_batch_trials: bool,

    /// Explicit exploration budget; estimated from the search space when unset.
    pub num_initialization_trials: Option<i64>,

    /// Never suggest a model; sample quasi-randomly throughout.
    pub disable_model: bool,

    /// Seed for the quasi-random sampler.
    pub random_seed: Option<u64>,

    pub optimization_config: Option<OptimizationConfig>,

    /// Prefer fully Bayesian (SAAS) models where the heuristic allows.
    pub use_fully_bayesian: bool,

    /// Replaces every phase's concurrency limit; `-1` removes all limits.
    pub max_parallelism_override: Option<i64>,

    /// Upper bound on every phase's concurrency limit. Exclusive with the override.
    pub max_parallelism_cap: Option<i64>,

    /// Require observations before advancing phases, and limit concurrency of
    /// model-based phases.
    pub enforce_sequential: bool,

    /// Experiment the returned strategy gets associated with.
    pub experiment: Option<ExperimentId>,

    pub defaults: DispatchDefaults,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            trial_budget: None,
            dedup_trials: false,
            winsorize: false,
            winsorization_limits: None,
            use_batch_trials: false,
            num_initialization_trials: None,
            disable_model: false,
            random_seed: None,
            optimization_config: None,
            use_fully_bayesian: false,
            max_parallelism_override: None,
            max_parallelism_cap: None,
            enforce_sequential: true,
            experiment: None,
            defaults: DispatchDefaults::default(),
        }
    }
}

impl DispatchSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trial_budget(mut self, n: i64) -> Self {
        self.trial_budget = Some(n);
        self
    }

    pub fn with_dedup_trials(mut self, dedup: bool) -> Self {
        self.dedup_trials = dedup;
        self
    }

    pub fn with_winsorization(mut self, limits: WinsorizationLimits) -> Self {
        self.winsorize = true;
        self.winsorization_limits = Some(limits);
        self
    }

    pub fn with_batch_trials(mut self, batched: bool) -> Self {
        self.use_batch_trials = batched;
        self
    }

    pub fn with_initialization_trials(mut self, n: i64) -> Self {
        self.num_initialization_trials = Some(n);
        self
    }

    pub fn with_model_disabled(mut self, disabled: bool) -> Self {
        self.disable_model = disabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_optimization_config(mut self, config: OptimizationConfig) -> Self {
        self.optimization_config = Some(config);
        self
    }

    pub fn with_fully_bayesian(mut self, fully_bayesian: bool) -> Self {
        self.use_fully_bayesian = fully_bayesian;
        self
    }

    pub fn with_parallelism_override(mut self, n: i64) -> Self {
        self.max_parallelism_override = Some(n);
        self
    }

    pub fn with_parallelism_cap(mut self, n: i64) -> Self {
        self.max_parallelism_cap = Some(n);
        self
    }

    pub fn with_enforce_sequential(mut self, enforce: bool) -> Self {
        self.enforce_sequential = enforce;
        self
    }

    /// Associate the strategy with `experiment` by id. Nothing else is read
    /// from the experiment.
    pub fn with_experiment(self, experiment: &Experiment) -> Self {
        self.with_experiment_id(experiment.id)
    }

    pub fn with_experiment_id(mut self, id: ExperimentId) -> Self {
        self.experiment = Some(id);
        self
    }

    pub fn with_defaults(mut self, defaults: DispatchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn is_multi_objective(&self) -> bool {
        self.optimization_config
            .as_ref()
            .is_some_and(OptimizationConfig::is_multi_objective)
    }
}
