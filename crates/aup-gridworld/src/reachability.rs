use std::collections::{HashSet, VecDeque};

use aup_core::DerivedReward;

use crate::actions::GridAction;
use crate::vase::{GridState, VaseWorld};

/// Reward paid for occupying a state under its reachability indicator.
pub const REACHABILITY_REWARD: f64 = 1.0;

/// Breadth-first enumeration of states reachable from the start. Terminal states are included
/// but not expanded.
pub(crate) fn reachable_states(world: &VaseWorld) -> Vec<GridState> {
    let start = world.initial_state();
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    let mut order = vec![start];

    while let Some(state) = queue.pop_front() {
        if world.is_terminal(&state) {
            continue;
        }
        for action in GridAction::ALL {
            let (next, _) = world.transition(&state, action);
            if seen.insert(next.clone()) {
                order.push(next.clone());
                queue.push_back(next);
            }
        }
    }
    order
}

/// One indicator reward per reachable state: preserving the ability to reach every state is
/// what relative-reachability penalties measure.
pub fn derive_possible_rewards(world: &VaseWorld) -> Vec<DerivedReward> {
    let rewards: Vec<DerivedReward> = reachable_states(world)
        .iter()
        .map(|state| DerivedReward::indicator(world.render(state).key(), REACHABILITY_REWARD))
        .collect();
    tracing::debug!(states = rewards.len(), "Derived reachability rewards");
    rewards
}
