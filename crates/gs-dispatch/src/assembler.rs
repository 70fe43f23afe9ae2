//! Assembles generation phases into a strategy.

use gs_types::{DispatchError, GsResult, SearchSpace};
use tracing::info;

use crate::analyzer::summarize;
use crate::heuristic::{suggest_model, HeuristicInput};
use crate::model::{ModelOptions, ModelVariant, WinsorizationLimits};
use crate::parallelism::ParallelismPolicy;
use crate::settings::DispatchSettings;
use crate::strategy::{
    default_min_observations, GenerationPhase, GenerationStrategy, UNBOUNDED_TRIALS,
};

/// Options for a quasi-random exploration phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuasiRandomPhase {
    pub trial_budget: i64,
    /// Explicit minimum observations; `None` or `0` means `ceil(trial_budget / 2)`.
    pub min_observations: Option<i64>,
    pub enforce_budget: bool,
    pub max_concurrency: Option<i64>,
    pub seed: Option<u64>,
    pub dedup_trials: bool,
}

impl Default for QuasiRandomPhase {
    fn default() -> Self {
        Self {
            trial_budget: UNBOUNDED_TRIALS,
            min_observations: None,
            enforce_budget: true,
            max_concurrency: None,
            seed: None,
            dedup_trials: false,
        }
    }
}

impl QuasiRandomPhase {
    pub fn build(self) -> GenerationPhase {
        GenerationPhase {
            model_variant: ModelVariant::QuasiRandom,
            trial_budget: self.trial_budget,
            min_observations_before_advance: min_observations(
                self.min_observations,
                self.trial_budget,
            ),
            enforce_budget: self.enforce_budget,
            max_concurrency: self.max_concurrency,
            extra_config: Some(ModelOptions::quasi_random(self.seed)),
            dedup_trials: self.dedup_trials,
        }
    }
}

/// Options for a model-based optimization phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPhase {
    pub model_variant: ModelVariant,
    pub trial_budget: i64,
    pub min_observations: Option<i64>,
    pub enforce_budget: bool,
    pub max_concurrency: Option<i64>,
    pub winsorize: bool,
    pub winsorization_limits: Option<WinsorizationLimits>,
    pub dedup_trials: bool,
}

impl ModelPhase {
    pub fn new(model_variant: ModelVariant) -> Self {
        Self {
            model_variant,
            trial_budget: UNBOUNDED_TRIALS,
            min_observations: None,
            enforce_budget: true,
            max_concurrency: None,
            winsorize: false,
            winsorization_limits: None,
            dedup_trials: false,
        }
    }

    pub fn build(self) -> Result<GenerationPhase, DispatchError> {
        let limits = check_winsorization(self.winsorize, self.winsorization_limits)?;
        Ok(GenerationPhase {
            model_variant: self.model_variant,
            trial_budget: self.trial_budget,
            min_observations_before_advance: min_observations(
                self.min_observations,
                self.trial_budget,
            ),
            enforce_budget: self.enforce_budget,
            max_concurrency: self.max_concurrency,
            extra_config: limits.map(ModelOptions::winsorized),
            dedup_trials: self.dedup_trials,
        })
    }
}

fn min_observations(explicit: Option<i64>, trial_budget: i64) -> i64 {
    match explicit {
        Some(n) if n != 0 => n,
        _ => default_min_observations(trial_budget),
    }
}

/// Winsorization needs both the flag and the limits, or neither.
///
/// Returns the limits to apply, if any.
pub fn check_winsorization(
    winsorize: bool,
    limits: Option<WinsorizationLimits>,
) -> Result<Option<WinsorizationLimits>, DispatchError> {
    match (winsorize, limits) {
        (true, Some(limits)) => Ok(Some(limits)),
        (false, None) => Ok(None),
        (winsorize, limits) => Err(DispatchError::InconsistentWinsorization {
            winsorize,
            limits_provided: limits.is_some(),
        }),
    }
}

/// Number of quasi-random trials before the model takes over, when not given.
fn estimate_initialization_trials(search_space: &SearchSpace, settings: &DispatchSettings) -> i64 {
    if settings.use_batch_trials {
        1
    } else {
        let declared = i64::try_from(search_space.len()).unwrap_or(i64::MAX);
        declared.max(settings.defaults.min_initialization_trials)
    }
}

/// Select and stage a generation strategy for `search_space`.
///
/// Configuration conflicts are reported before any phase is built.
pub fn build(
    search_space: &SearchSpace,
    settings: &DispatchSettings,
) -> GsResult<GenerationStrategy> {
    check_winsorization(settings.winsorize, settings.winsorization_limits)?;

    let summary = summarize(search_space);
    let input = HeuristicInput::new(
        summary,
        settings.trial_budget,
        settings.is_multi_objective(),
        settings.use_fully_bayesian,
    )
    .with_max_discrete_combinations(settings.defaults.max_discrete_combinations);
    let suggested = suggest_model(&input);

    let mut strategy = match suggested {
        Some(model_variant) if !settings.disable_model => {
            let limits = ParallelismPolicy::new(
                settings.max_parallelism_override,
                settings.max_parallelism_cap,
                settings.enforce_sequential,
            )
            .with_default_bayesian_parallelism(settings.defaults.default_bayesian_parallelism)
            .resolve()?;

            let num_initialization_trials = settings
                .num_initialization_trials
                .unwrap_or_else(|| estimate_initialization_trials(search_space, settings));

            let exploration = QuasiRandomPhase {
                trial_budget: num_initialization_trials,
                min_observations: None,
                enforce_budget: settings.enforce_sequential,
                max_concurrency: limits.exploration,
                seed: settings.random_seed,
                dedup_trials: settings.dedup_trials,
            }
            .build();

            let optimization = ModelPhase {
                max_concurrency: limits.optimization,
                winsorize: settings.winsorize,
                winsorization_limits: settings.winsorization_limits,
                dedup_trials: settings.dedup_trials,
                ..ModelPhase::new(model_variant)
            }
            .build()?;

            let strategy = GenerationStrategy::new(vec![exploration, optimization]);
            info!(
                "Using Bayesian optimization generation strategy: {strategy}. Iterations after \
                 {num_initialization_trials} will take longer to generate due to model fitting."
            );
            strategy
        }
        _ => {
            let sampling = QuasiRandomPhase {
                seed: settings.random_seed,
                dedup_trials: settings.dedup_trials,
                ..QuasiRandomPhase::default()
            }
            .build();
            info!("Using Sobol generation strategy.");
            GenerationStrategy::new(vec![sampling])
        }
    };

    if let Some(experiment) = settings.experiment {
        strategy.attach_experiment(experiment);
    }

    Ok(strategy)
}
