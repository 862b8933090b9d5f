use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{AppResult, ExecutorConfiguration};

/// Optional settings read from a YAML file. Command line flags take
/// precedence over anything set here.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub max_steps: Option<usize>,
    pub continue_on_failure: Option<bool>,
    pub verbose: Option<bool>,
}

impl Config {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML from {}", path.display()))
    }

    /// Values of `other` win over the values of `self`.
    pub fn merge(self, other: Config) -> Config {
        Config {
            max_steps: other.max_steps.or(self.max_steps),
            continue_on_failure: other.continue_on_failure.or(self.continue_on_failure),
            verbose: other.verbose.or(self.verbose),
        }
    }

    pub fn executor_configuration(&self) -> ExecutorConfiguration {
        let default = ExecutorConfiguration::default();

        ExecutorConfiguration {
            stop_on_failure: !self.continue_on_failure.unwrap_or(!default.stop_on_failure),
            max_steps: self.max_steps.unwrap_or(default.max_steps),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}
