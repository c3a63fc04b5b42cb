use std::collections::HashMap;

use crate::StateKey;

/// Fixed state-to-reward mapping produced by a simulator's reachability analysis.
///
/// States missing from the mapping yield zero reward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedReward {
    rewards: HashMap<StateKey, f64>,
}

impl DerivedReward {
    pub fn new(rewards: HashMap<StateKey, f64>) -> Self {
        Self { rewards }
    }

    /// Reward of `value` in `state` and zero everywhere else.
    pub fn indicator(state: StateKey, value: f64) -> Self {
        let mut rewards = HashMap::with_capacity(1);
        rewards.insert(state, value);
        Self { rewards }
    }

    pub fn reward(&self, state: &StateKey) -> f64 {
        self.rewards.get(state).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}
