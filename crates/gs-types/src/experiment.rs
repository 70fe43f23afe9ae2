//! Objectives, optimization configs and experiment identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::search::SearchSpace;

/// Unique experiment identifier.
pub type ExperimentId = Uuid;

/// Whether we are maximizing or minimizing an objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveDirection {
    #[default]
    Maximize,
    Minimize,
}

/// A single metric being optimized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub metric: String,
    #[serde(default)]
    pub direction: ObjectiveDirection,
}

impl Objective {
    pub fn new(metric: impl Into<String>, direction: ObjectiveDirection) -> Self {
        Self {
            metric: metric.into(),
            direction,
        }
    }
}

/// What an experiment is optimizing for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    pub objectives: Vec<Objective>,
}

impl OptimizationConfig {
    pub fn single(metric: impl Into<String>, direction: ObjectiveDirection) -> Self {
        Self {
            objectives: vec![Objective::new(metric, direction)],
        }
    }

    pub fn with_objective(
        mut self,
        metric: impl Into<String>,
        direction: ObjectiveDirection,
    ) -> Self {
        self.objectives.push(Objective::new(metric, direction));
        self
    }

    /// True when more than one objective is optimized simultaneously.
    pub fn is_multi_objective(&self) -> bool {
        self.objectives.len() > 1
    }
}

/// An experiment a generation strategy can be associated with.
///
/// Strategies only ever hold the [`ExperimentId`]; the experiment itself stays
/// with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub search_space: SearchSpace,
    pub optimization_config: Option<OptimizationConfig>,
}

impl Experiment {
    pub fn new(name: impl Into<String>, search_space: SearchSpace) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            search_space,
            optimization_config: None,
        }
    }

    pub fn with_optimization_config(mut self, config: OptimizationConfig) -> Self {
        self.optimization_config = Some(config);
        self
    }

    pub fn is_multi_objective(&self) -> bool {
        self.optimization_config
            .as_ref()
            .is_some_and(OptimizationConfig::is_multi_objective)
    }
}
