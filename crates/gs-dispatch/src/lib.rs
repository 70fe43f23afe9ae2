//! # gs-dispatch
//!
//! Model selection and generation strategy assembly for sequential black-box
//! optimization.
//!
//! A search space is summarized, a model family is chosen from the summary,
//! concurrency limits are resolved, and the result is staged into one or two
//! generation phases: quasi-random exploration, optionally followed by a
//! model-based optimization phase.

pub mod analyzer;
pub mod assembler;
pub mod heuristic;
pub mod model;
pub mod parallelism;
pub mod request;
pub mod settings;
pub mod strategy;

pub use analyzer::{summarize, SpaceSummary};
pub use assembler::{build, check_winsorization, ModelPhase, QuasiRandomPhase};
pub use heuristic::{decide, suggest_model, HeuristicInput, Rule, RULES};
pub use model::{
    ModelOptions, ModelVariant, Transform, WinsorizationLimits, CONTINUOUS_INPUT_TRANSFORMS,
    OUTCOME_TRANSFORMS,
};
pub use parallelism::{
    resolve_parallelism, ParallelismLimits, ParallelismPolicy, NO_PARALLELISM_LIMIT,
};
pub use request::DispatchRequest;
pub use settings::{
    DispatchDefaults, DispatchSettings, DEFAULT_BAYESIAN_PARALLELISM, MAX_DISCRETE_COMBINATIONS,
    MIN_INITIALIZATION_TRIALS,
};
pub use strategy::{
    default_min_observations, GenerationPhase, GenerationStrategy, UNBOUNDED_TRIALS,
};

use gs_types::{GsResult, SearchSpace};

/// Select an appropriate generation strategy for `search_space` under `settings`.
pub fn choose_generation_strategy(
    search_space: &SearchSpace,
    settings: &DispatchSettings,
) -> GsResult<GenerationStrategy> {
    assembler::build(search_space, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_types::{Experiment, ObjectiveDirection, OptimizationConfig};
    use serde_json::json;

    fn moo_config() -> OptimizationConfig {
        OptimizationConfig::single("accuracy", ObjectiveDirection::Maximize)
            .with_objective("latency_ms", ObjectiveDirection::Minimize)
    }

    fn suggest(space: &SearchSpace, settings: &DispatchSettings) -> Option<ModelVariant> {
        let input = HeuristicInput::new(
            summarize(space),
            settings.trial_budget,
            settings.is_multi_objective(),
            settings.use_fully_bayesian,
        );
        suggest_model(&input)
    }

    #[test]
    fn scenario_enumerable_integer_space() {
        let space = SearchSpace::new()
            .add_int("a", 0, 10)
            .add_int("b", 0, 10)
            .add_int("c", 0, 10);
        let settings = DispatchSettings::new().with_trial_budget(2000);

        assert_eq!(summarize(&space).num_enumerable_points, 1000);
        assert_eq!(suggest(&space, &settings), None);

        let strategy = choose_generation_strategy(&space, &settings).unwrap();
        assert_eq!(strategy.phases.len(), 1);
        assert_eq!(strategy.name(), "Sobol");
    }

    #[test]
    fn scenario_continuous_dominant_single_objective() {
        let space = SearchSpace::new()
            .add_float("x1", 0.0, 1.0)
            .add_float("x2", 0.0, 1.0)
            .add_float("x3", 0.0, 1.0)
            .add_float("x4", 0.0, 1.0)
            .add_float("x5", 0.0, 1.0)
            .add_choice("flag", vec![json!(true), json!(false)]);
        let settings = DispatchSettings::new();

        assert_eq!(suggest(&space, &settings), Some(ModelVariant::StandardGP));

        let strategy = choose_generation_strategy(&space, &settings).unwrap();
        assert_eq!(strategy.phases.len(), 2);
        assert_eq!(strategy.phases[0].trial_budget, 6);
        assert_eq!(strategy.phases[1].trial_budget, -1);
        assert_eq!(strategy.phases[1].model_variant, ModelVariant::StandardGP);
    }

    #[test]
    fn scenario_categorical_blow_up_falls_back() {
        let three = || vec![json!("a"), json!("b"), json!("c")];
        let space = SearchSpace::new()
            .add_choice("c1", three())
            .add_choice("c2", three())
            .add_choice("c3", three())
            .add_choice("c4", three());

        assert_eq!(summarize(&space).num_discrete_combinations, 81);
        for fully_bayesian in [false, true] {
            let settings = DispatchSettings::new().with_fully_bayesian(fully_bayesian);
            assert_eq!(suggest(&space, &settings), None);
            let strategy = choose_generation_strategy(&space, &settings).unwrap();
            assert_eq!(strategy.phases.len(), 1);
        }
    }

    #[test]
    fn scenario_fully_bayesian_multi_objective() {
        let space = SearchSpace::new()
            .add_float("lr", 1e-4, 1e-1)
            .add_float("dropout", 0.0, 0.5)
            .add_choice("opt", vec![json!("adam")]);
        let settings = DispatchSettings::new()
            .with_optimization_config(moo_config())
            .with_fully_bayesian(true);

        assert_eq!(
            suggest(&space, &settings),
            Some(ModelVariant::FullyBayesianMultiObjective)
        );
        let strategy = choose_generation_strategy(&space, &settings).unwrap();
        assert_eq!(strategy.name(), "Sobol+FullyBayesianMOO");
    }

    #[test]
    fn small_categorical_space_uses_mixed_kernel() {
        let space = SearchSpace::new()
            .add_choice("opt", vec![json!("adam"), json!("sgd")])
            .add_choice("act", vec![json!("relu"), json!("gelu"), json!("tanh")])
            .add_float("lr", 1e-4, 1e-1);
        let strategy = choose_generation_strategy(&space, &DispatchSettings::new()).unwrap();
        assert_eq!(
            strategy.model_variant(),
            Some(ModelVariant::MixedContinuousCategorical)
        );
    }

    #[test]
    fn experiment_is_attached_by_id() {
        let space = SearchSpace::new().add_float("x", 0.0, 1.0);
        let experiment = Experiment::new("quadratic", space.clone());
        let settings = DispatchSettings::new().with_experiment(&experiment);

        let strategy = choose_generation_strategy(&space, &settings).unwrap();
        assert_eq!(strategy.experiment, Some(experiment.id));

        let detached = choose_generation_strategy(&space, &DispatchSettings::new()).unwrap();
        assert_eq!(detached.experiment, None);
    }

    #[test]
    fn attached_experiment_does_not_change_model_choice() {
        let space = SearchSpace::new().add_float("x", 0.0, 1.0);
        let experiment =
            Experiment::new("quadratic", space.clone()).with_optimization_config(moo_config());

        let settings = DispatchSettings::new().with_experiment(&experiment);
        assert!(!settings.is_multi_objective());

        let attached = choose_generation_strategy(&space, &settings).unwrap();
        let plain = choose_generation_strategy(&space, &DispatchSettings::new()).unwrap();

        assert_eq!(attached.model_variant(), plain.model_variant());
        assert_eq!(attached.name(), "Sobol+GPEI");
        assert_eq!(attached.phases, plain.phases);
    }

    #[test]
    fn empty_space_still_gets_a_strategy() {
        // 0 continuous vs 0 choice values: not continuous-dominant; 1 combination.
        let strategy =
            choose_generation_strategy(&SearchSpace::new(), &DispatchSettings::new()).unwrap();
        assert_eq!(
            strategy.model_variant(),
            Some(ModelVariant::MixedContinuousCategorical)
        );
        assert_eq!(strategy.phases[0].trial_budget, 5);
    }

    #[test]
    fn concurrent_callers_get_identical_strategies() {
        let space = SearchSpace::new()
            .add_float("x", 0.0, 1.0)
            .add_int("n", 1, 20)
            .add_choice("mode", vec![json!("fast"), json!("slow")]);
        let settings = DispatchSettings::new().with_parallelism_cap(8).with_seed(5);
        let expected = choose_generation_strategy(&space, &settings).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let space = space.clone();
                let settings = settings.clone();
                std::thread::spawn(move || choose_generation_strategy(&space, &settings).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
