//! Generation phases and the strategy that orders them.

use gs_types::ExperimentId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{ModelOptions, ModelVariant};

/// Trial budget value meaning "no limit".
pub const UNBOUNDED_TRIALS: i64 = -1;

/// One stage of a staged optimization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPhase {
    pub model_variant: ModelVariant,
    /// Number of trials to generate in this phase; [`UNBOUNDED_TRIALS`] for no limit.
    pub trial_budget: i64,
    /// Completed observations required before moving on to the next phase.
    pub min_observations_before_advance: i64,
    /// Whether the phase stops generating once `trial_budget` is reached.
    pub enforce_budget: bool,
    /// Maximum trials running at once; `None` means unbounded.
    pub max_concurrency: Option<i64>,
    pub extra_config: Option<ModelOptions>,
    pub dedup_trials: bool,
}

impl GenerationPhase {
    pub fn is_unbounded(&self) -> bool {
        self.trial_budget == UNBOUNDED_TRIALS
    }
}

/// `ceil(trial_budget / 2)`, so a budget of -1 yields 0.
pub fn default_min_observations(trial_budget: i64) -> i64 {
    trial_budget.div_euclid(2) + trial_budget.rem_euclid(2)
}

/// An ordered sequence of generation phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStrategy {
    pub phases: Vec<GenerationPhase>,
    /// Experiment this strategy has been associated with, by id only.
    pub experiment: Option<ExperimentId>,
}

impl GenerationStrategy {
    pub fn new(phases: Vec<GenerationPhase>) -> Self {
        Self {
            phases,
            experiment: None,
        }
    }

    /// Phase generator names joined with `+`, e.g. `Sobol+GPEI`.
    pub fn name(&self) -> String {
        self.phases
            .iter()
            .map(|phase| phase.model_variant.name())
            .collect::<Vec<_>>()
            .join("+")
    }

    pub fn attach_experiment(&mut self, experiment: ExperimentId) {
        self.experiment = Some(experiment);
    }

    /// The model-based variant this strategy eventually hands over to, if any.
    pub fn model_variant(&self) -> Option<ModelVariant> {
        self.phases
            .iter()
            .map(|phase| phase.model_variant)
            .find(ModelVariant::is_model_based)
    }
}

impl fmt::Display for GenerationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationStrategy(name='{}', phases=[", self.name())?;
        for (i, phase) in self.phases.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} for ", phase.model_variant)?;
            if phase.is_unbounded() {
                f.write_str("subsequent trials")?;
            } else {
                write!(f, "{} trials", phase.trial_budget)?;
            }
        }
        f.write_str("])")
    }
}
