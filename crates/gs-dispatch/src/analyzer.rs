//! Reduces a search space to the statistics the model heuristic reads.

use gs_types::{Parameter, SearchSpace};
use serde::{Deserialize, Serialize};

/// Summary statistics over a search space.
///
/// Products use saturating arithmetic; any space large enough to saturate is
/// far beyond every realistic trial budget or combination ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummary {
    /// Number of range parameters, integer-typed or not.
    pub num_continuous: usize,
    /// Sum of the value counts of all choice parameters.
    pub num_discrete_choice_values: usize,
    /// Product of the value counts of all choice parameters.
    pub num_discrete_combinations: i128,
    /// Product of choice value counts and integer range widths.
    pub num_enumerable_points: i128,
    pub all_integer_ranges: bool,
}

impl Default for SpaceSummary {
    fn default() -> Self {
        Self {
            num_continuous: 0,
            num_discrete_choice_values: 0,
            num_discrete_combinations: 1,
            num_enumerable_points: 1,
            all_integer_ranges: true,
        }
    }
}

/// Walk every parameter once and accumulate a [`SpaceSummary`].
///
/// Integer ranges contribute `upper - lower` points (truncated toward zero),
/// not the inclusive count. Fixed parameters contribute nothing.
pub fn summarize(search_space: &SearchSpace) -> SpaceSummary {
    let mut summary = SpaceSummary::default();

    for parameter in search_space.parameters.values() {
        match parameter {
            Parameter::Choice { values } => {
                let count = values.len();
                summary.num_discrete_choice_values += count;
                summary.num_discrete_combinations =
                    summary.num_discrete_combinations.saturating_mul(count as i128);
                summary.num_enumerable_points =
                    summary.num_enumerable_points.saturating_mul(count as i128);
            }
            Parameter::Range {
                lower,
                upper,
                is_integer,
            } => {
                summary.num_continuous += 1;
                if *is_integer {
                    let width = (upper - lower) as i128;
                    summary.num_enumerable_points =
                        summary.num_enumerable_points.saturating_mul(width);
                } else {
                    summary.all_integer_ranges = false;
                }
            }
            Parameter::Fixed { .. } => {}
        }
    }

    summary
}
