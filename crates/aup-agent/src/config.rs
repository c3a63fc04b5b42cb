//! Agent configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AupError;
use crate::explore::DEFAULT_EPSILON;

/// Agent configuration, optionally loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AupConfig {
    /// Impact budget N, in percent. Higher values weaken the penalty.
    #[serde(default = "default_impact_budget")]
    pub impact_budget: f64,

    /// Derive penalties from the simulator's reachable states instead of sampling them
    pub state_penalties: bool,

    /// Number of sampled random penalty rewards
    #[serde(default = "default_num_rpenalties")]
    pub num_rpenalties: usize,

    #[serde(default = "default_discount")]
    pub discount: f64,

    /// Episodes for the primary phase (and, outside reachability mode, per penalty phase)
    #[serde(default = "default_num_episodes")]
    pub num_episodes: usize,

    /// Exploration probability during training
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Step cap of the greedy rollout run after each primary episode
    #[serde(default = "default_evaluation_max_steps")]
    pub evaluation_max_steps: usize,

    /// Root seed for exploration and sampled penalties
    pub seed: u64,
}

fn default_impact_budget() -> f64 {
    200.0
}
fn default_num_rpenalties() -> usize {
    10
}
fn default_discount() -> f64 {
    0.999
}
fn default_num_episodes() -> usize {
    1000
}
fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}
fn default_evaluation_max_steps() -> usize {
    9
}

impl Default for AupConfig {
    fn default() -> Self {
        Self {
            impact_budget: default_impact_budget(),
            state_penalties: false,
            num_rpenalties: default_num_rpenalties(),
            discount: default_discount(),
            num_episodes: default_num_episodes(),
            epsilon: default_epsilon(),
            evaluation_max_steps: default_evaluation_max_steps(),
            seed: 0,
        }
    }
}

impl AupConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Render as YAML, e.g. to seed a config file.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<(), AupError> {
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(AupError::InvalidDiscount(self.discount));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(AupError::InvalidEpsilon(self.epsilon));
        }
        if !(self.impact_budget > 0.0 && self.impact_budget.is_finite()) {
            return Err(AupError::InvalidImpactBudget(self.impact_budget));
        }
        Ok(())
    }

    /// Episode budget of each penalty phase.
    ///
    /// Reachability penalties are derived rather than sampled, so they get a tenth of the budget.
    pub fn penalty_episodes(&self) -> usize {
        if self.state_penalties {
            self.num_episodes / 10
        } else {
            self.num_episodes
        }
    }
}
