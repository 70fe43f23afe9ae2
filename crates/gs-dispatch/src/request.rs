//! JSON dispatch requests as read by the `gs-dispatch` binary.

use std::io::Read;
use std::path::Path;

use gs_types::{GsResult, SearchSpace};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::settings::DispatchSettings;
use crate::strategy::GenerationStrategy;

/// A strategy request: the search space plus optional settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub search_space: SearchSpace,
    #[serde(default)]
    pub settings: DispatchSettings,
}

impl DispatchRequest {
    pub fn new(search_space: SearchSpace, settings: DispatchSettings) -> Self {
        Self {
            search_space,
            settings,
        }
    }

    pub fn from_json(raw: &str) -> GsResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a request from `path`, or from `reader` when no path (or `-`) is given.
    pub fn read(path: Option<&Path>, mut reader: impl Read) -> GsResult<Self> {
        let raw = match path {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
            _ => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer)?;
                buffer
            }
        };
        Self::from_json(&raw)
    }

    /// Validate the search space, then build its strategy.
    pub fn dispatch(&self) -> GsResult<GenerationStrategy> {
        self.search_space.validate()?;
        info!(
            "Choosing a generation strategy for {} parameters",
            self.search_space.len()
        );
        crate::assembler::build(&self.search_space, &self.settings)
    }
}
