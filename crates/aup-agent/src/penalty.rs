use std::collections::HashMap;

use aup_core::{derive_seed, DerivedReward, DeterministicRng, SplitMix64, StateKey};

/// Seed stream reserved for sampled penalty rewards.
pub(crate) const PENALTY_STREAM: u64 = 1;

/// Random reward in `[0, 1)` per state, drawn on first query and memoized.
#[derive(Debug, Clone)]
pub struct SampledReward {
    values: HashMap<StateKey, f64>,
    rng: SplitMix64,
}

impl SampledReward {
    pub fn new(seed: u64) -> Self {
        Self {
            values: HashMap::new(),
            rng: SplitMix64::new(seed),
        }
    }

    pub fn reward(&mut self, state: &StateKey) -> f64 {
        if let Some(value) = self.values.get(state) {
            return *value;
        }
        let value = self.rng.next_f64_unit();
        self.values.insert(state.clone(), value);
        value
    }

    /// Number of states sampled so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Auxiliary reward whose attainability the agent preserves.
#[derive(Debug, Clone)]
pub enum PenaltyFunction {
    Sampled(SampledReward),
    Derived(DerivedReward),
}

impl PenaltyFunction {
    pub fn reward(&mut self, state: &StateKey) -> f64 {
        match self {
            PenaltyFunction::Sampled(sampled) => sampled.reward(state),
            PenaltyFunction::Derived(derived) => derived.reward(state),
        }
    }
}

/// `count` independent sampled rewards, each on its own seed stream.
pub fn sampled_penalties(count: usize, root_seed: u64) -> Vec<PenaltyFunction> {
    (0..count as u64)
        .map(|i| {
            let seed = derive_seed(root_seed, PENALTY_STREAM, i);
            PenaltyFunction::Sampled(SampledReward::new(seed))
        })
        .collect()
}
