//! Search space definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::errors::GsResult;
use crate::validation_error;

/// Describes the values a single parameter may take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parameter {
    /// Numeric range [lower, upper]. Integer-typed ranges only take whole values.
    Range {
        lower: f64,
        upper: f64,
        #[serde(default)]
        is_integer: bool,
    },
    /// Unordered categorical choices.
    Choice { values: Vec<serde_json::Value> },
    /// A parameter pinned to a single value.
    Fixed { value: serde_json::Value },
}

impl Parameter {
    pub fn int_range(lower: i64, upper: i64) -> Self {
        Self::Range {
            lower: lower as f64,
            upper: upper as f64,
            is_integer: true,
        }
    }

    pub fn float_range(lower: f64, upper: f64) -> Self {
        Self::Range {
            lower,
            upper,
            is_integer: false,
        }
    }

    pub fn choice(values: Vec<serde_json::Value>) -> Self {
        Self::Choice { values }
    }

    pub fn fixed(value: serde_json::Value) -> Self {
        Self::Fixed { value }
    }
}

/// The full search space: parameter name to parameter definition.
///
/// Names are unique; adding a parameter under an existing name replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchSpace {
    pub parameters: BTreeMap<String, Parameter>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self {
            parameters: BTreeMap::new(),
        }
    }

    pub fn add(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    pub fn add_float(self, name: impl Into<String>, lower: f64, upper: f64) -> Self {
        self.add(name, Parameter::float_range(lower, upper))
    }

    pub fn add_int(self, name: impl Into<String>, lower: i64, upper: i64) -> Self {
        self.add(name, Parameter::int_range(lower, upper))
    }

    pub fn add_choice(self, name: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        self.add(name, Parameter::choice(values))
    }

    pub fn add_fixed(self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.add(name, Parameter::fixed(value))
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    /// Check that every choice parameter lists at least one value and no value twice.
    ///
    /// Bounds of range parameters are not inspected.
    pub fn validate(&self) -> GsResult<()> {
        for (name, parameter) in &self.parameters {
            if let Parameter::Choice { values } = parameter {
                if values.is_empty() {
                    return Err(validation_error!(
                        "choice parameter `{name}` must list at least one value"
                    ));
                }
                let mut seen = HashSet::with_capacity(values.len());
                for value in values {
                    // serde_json::Value is not Hash; its canonical text form is.
                    if !seen.insert(value.to_string()) {
                        return Err(validation_error!(
                            "choice parameter `{name}` lists value {value} more than once"
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
