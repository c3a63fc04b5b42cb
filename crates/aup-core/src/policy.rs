use crate::{Action, Observation, Simulator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A deterministic mapping from observations to actions.
pub trait Policy {
    fn act(&self, observation: &Observation) -> Action;
}

impl<F> Policy for F
where
    F: Fn(&Observation) -> Action,
{
    fn act(&self, observation: &Observation) -> Action {
        self(observation)
    }
}

/// Result of one noiseless rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeOutcome {
    /// Sum of observed rewards; missing rewards count as zero.
    pub ret: f64,
    pub steps: usize,
    /// `Simulator::performance` once the rollout stops.
    pub performance: f64,
}

/// Roll out `policy` from a fresh reset until the episode ends or `max_steps` actions were taken.
pub fn run_episode<P, S>(policy: &P, env: &mut S, max_steps: usize) -> EpisodeOutcome
where
    P: Policy + ?Sized,
    S: Simulator + ?Sized,
{
    let mut time_step = env.reset();
    let mut ret = 0.0;
    let mut steps = 0;

    while steps < max_steps && !time_step.last() {
        let action = policy.act(&time_step.observation);
        time_step = env.step(action);
        ret += time_step.reward_or_zero();
        steps += 1;
    }

    EpisodeOutcome {
        ret,
        steps,
        performance: env.performance(),
    }
}
