//! Model selection: which optimizer family fits a search space.
//!
//! The decision is an ordered table of guarded rules. The first rule whose
//! guard holds decides the outcome; the last rule always applies.

use tracing::{info, warn};

use crate::analyzer::SpaceSummary;
use crate::model::ModelVariant;
use crate::settings::MAX_DISCRETE_COMBINATIONS;

/// Everything the heuristic looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicInput {
    pub summary: SpaceSummary,
    pub trial_budget: Option<i64>,
    pub is_multi_objective: bool,
    pub use_fully_bayesian: bool,
    pub max_discrete_combinations: i64,
}

impl HeuristicInput {
    pub fn new(
        summary: SpaceSummary,
        trial_budget: Option<i64>,
        is_multi_objective: bool,
        use_fully_bayesian: bool,
    ) -> Self {
        Self {
            summary,
            trial_budget,
            is_multi_objective,
            use_fully_bayesian,
            max_discrete_combinations: MAX_DISCRETE_COMBINATIONS,
        }
    }

    pub fn with_max_discrete_combinations(mut self, ceiling: i64) -> Self {
        self.max_discrete_combinations = ceiling;
        self
    }
}

/// A single guarded step of the decision procedure.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&HeuristicInput) -> bool,
    pub outcome: fn(&HeuristicInput) -> Option<ModelVariant>,
    /// Why the rule fired, for the advisory log.
    pub reason: fn(&HeuristicInput) -> String,
}

impl Rule {
    /// Evaluate the rule, returning `Some(outcome)` if its guard holds.
    pub fn evaluate(&self, input: &HeuristicInput) -> Option<Option<ModelVariant>> {
        (self.applies)(input).then(|| (self.outcome)(input))
    }
}

/// Rules in evaluation order.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "enumerable_space",
        applies: space_is_enumerable,
        outcome: |_| None,
        reason: |_| {
            "Using Sobol since the search space can be enumerated within the trial budget."
                .to_string()
        },
    },
    Rule {
        name: "continuous_dominant",
        applies: continuous_dominates,
        outcome: |input| Some(kernel_model(input)),
        reason: |_| {
            "Using Bayesian optimization since there are more continuous parameters than there \
             are categories for the unordered categorical parameters."
                .to_string()
        },
    },
    Rule {
        name: "bounded_categorical",
        applies: categorical_kernel_is_tractable,
        outcome: |_| Some(ModelVariant::MixedContinuousCategorical),
        reason: |_| {
            "Using Bayesian optimization with a categorical kernel for improved performance with \
             a large number of unordered categorical parameters."
                .to_string()
        },
    },
    Rule {
        name: "fallback",
        applies: |_| true,
        outcome: |_| None,
        reason: |input| {
            format!(
                "Using Sobol since there are more than {} combinations for the categorical \
                 parameters. Consider removing a few categorical parameters for improved \
                 performance. If possible, turn all ordered categorical variables into range \
                 parameters.",
                input.max_discrete_combinations
            )
        },
    },
];

fn space_is_enumerable(input: &HeuristicInput) -> bool {
    match input.trial_budget {
        Some(budget) => {
            input.summary.all_integer_ranges
                && input.summary.num_enumerable_points <= i128::from(budget)
        }
        None => false,
    }
}

fn continuous_dominates(input: &HeuristicInput) -> bool {
    input.summary.num_continuous > input.summary.num_discrete_choice_values
}

fn categorical_kernel_is_tractable(input: &HeuristicInput) -> bool {
    !input.is_multi_objective
        && input.summary.num_discrete_combinations <= i128::from(input.max_discrete_combinations)
}

fn kernel_model(input: &HeuristicInput) -> ModelVariant {
    match (input.is_multi_objective, input.use_fully_bayesian) {
        (true, true) => ModelVariant::FullyBayesianMultiObjective,
        (true, false) => ModelVariant::MultiObjective,
        (false, true) => ModelVariant::FullyBayesianSingleObjective,
        (false, false) => ModelVariant::StandardGP,
    }
}

fn supports_fully_bayesian(variant: Option<ModelVariant>) -> bool {
    matches!(
        variant,
        Some(ModelVariant::FullyBayesianSingleObjective | ModelVariant::FullyBayesianMultiObjective)
    )
}

/// The first rule whose guard holds, with its outcome.
pub fn decide(input: &HeuristicInput) -> (&'static Rule, Option<ModelVariant>) {
    for rule in RULES.iter() {
        if let Some(outcome) = rule.evaluate(input) {
            return (rule, outcome);
        }
    }
    unreachable!("the fallback rule always applies")
}

/// Suggest a model for the summarized search space; `None` means quasi-random
/// sampling throughout.
///
/// Logs which rule fired, and warns when a fully Bayesian model was requested
/// but the outcome cannot honour it.
pub fn suggest_model(input: &HeuristicInput) -> Option<ModelVariant> {
    let (rule, outcome) = decide(input);
    info!(rule = rule.name, "{}", (rule.reason)(input));

    if input.use_fully_bayesian && !supports_fully_bayesian(outcome) {
        let strategy = match outcome {
            Some(variant) => variant.name(),
            None => "pure-sampling",
        };
        warn!(
            "Fully Bayesian modeling is incompatible with the {strategy} generation strategy; \
             disregarding `use_fully_bayesian = true`."
        );
    }

    outcome
}
