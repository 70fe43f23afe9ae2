//! Generator identifiers and the per-phase payload handed to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The generators a phase can be driven by.
///
/// The heuristic only ever suggests the five model-based variants; a `None`
/// suggestion means [`ModelVariant::QuasiRandom`] sampling throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Sobol low-discrepancy sequence; no fitted model.
    QuasiRandom,
    /// Gaussian process with expected improvement.
    #[serde(rename = "standard_gp")]
    StandardGP,
    /// Gaussian process under a fully Bayesian (SAAS) prior.
    FullyBayesianSingleObjective,
    /// Multi-objective Gaussian process.
    MultiObjective,
    /// Multi-objective Gaussian process under a fully Bayesian prior.
    FullyBayesianMultiObjective,
    /// Gaussian process with a categorical kernel for mixed spaces.
    MixedContinuousCategorical,
}

impl ModelVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuasiRandom => "Sobol",
            Self::StandardGP => "GPEI",
            Self::FullyBayesianSingleObjective => "FullyBayesian",
            Self::MultiObjective => "MOO",
            Self::FullyBayesianMultiObjective => "FullyBayesianMOO",
            Self::MixedContinuousCategorical => "BO_MIXED",
        }
    }

    /// Whether this variant fits a surrogate model.
    pub fn is_model_based(&self) -> bool {
        !matches!(self, Self::QuasiRandom)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data transforms applied before a model is fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transform {
    Winsorize,
    RemoveFixed,
    OrderedChoiceEncode,
    OneHot,
    IntToFloat,
    Log,
    Logit,
    UnitX,
    Derelativize,
    StandardizeY,
}

/// Transforms over the inputs of continuous-relaxation models.
pub const CONTINUOUS_INPUT_TRANSFORMS: [Transform; 7] = [
    Transform::RemoveFixed,
    Transform::OrderedChoiceEncode,
    Transform::OneHot,
    Transform::IntToFloat,
    Transform::Log,
    Transform::Logit,
    Transform::UnitX,
];

/// Transforms over observed outcomes.
pub const OUTCOME_TRANSFORMS: [Transform; 2] = [Transform::Derelativize, Transform::StandardizeY];

/// Percentile bounds for clipping outcomes before fitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WinsorizationLimits {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl WinsorizationLimits {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }
}

/// Extra configuration passed to the generator of a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelOptions {
    QuasiRandom {
        deduplicate: bool,
        seed: Option<u64>,
    },
    Transforms {
        transforms: Vec<Transform>,
        winsorization: WinsorizationLimits,
    },
}

impl ModelOptions {
    pub fn quasi_random(seed: Option<u64>) -> Self {
        Self::QuasiRandom {
            deduplicate: true,
            seed,
        }
    }

    /// Winsorization followed by the standard input and outcome transforms.
    pub fn winsorized(limits: WinsorizationLimits) -> Self {
        let transforms = std::iter::once(Transform::Winsorize)
            .chain(CONTINUOUS_INPUT_TRANSFORMS)
            .chain(OUTCOME_TRANSFORMS)
            .collect();
        Self::Transforms {
            transforms,
            winsorization: limits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winsorize_is_prepended() {
        let options = ModelOptions::winsorized(WinsorizationLimits::new(None, Some(0.2)));
        match options {
            ModelOptions::Transforms {
                transforms,
                winsorization,
            } => {
                assert_eq!(transforms.len(), 10);
                assert_eq!(transforms[0], Transform::Winsorize);
                assert_eq!(transforms[1..8], CONTINUOUS_INPUT_TRANSFORMS);
                assert_eq!(transforms[8..], OUTCOME_TRANSFORMS);
                assert_eq!(winsorization.upper, Some(0.2));
                assert_eq!(winsorization.lower, None);
            }
            other => panic!("unexpected options: {other:?}"),
        }
    }

    #[test]
    fn quasi_random_options_always_deduplicate() {
        assert_eq!(
            ModelOptions::quasi_random(Some(42)),
            ModelOptions::QuasiRandom {
                deduplicate: true,
                seed: Some(42)
            }
        );
    }

    #[test]
    fn only_sobol_is_model_free() {
        assert!(!ModelVariant::QuasiRandom.is_model_based());
        assert!(ModelVariant::StandardGP.is_model_based());
        assert!(ModelVariant::MixedContinuousCategorical.is_model_based());
    }

    #[test]
    fn display_uses_short_names() {
        assert_eq!(ModelVariant::StandardGP.to_string(), "GPEI");
        assert_eq!(ModelVariant::FullyBayesianMultiObjective.to_string(), "FullyBayesianMOO");
    }
}
