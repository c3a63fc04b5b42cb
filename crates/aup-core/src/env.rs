use crate::{Action, Board, DerivedReward};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete action range declared by a simulator: actions are `0..=maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionSpec {
    pub maximum: Action,
}

impl ActionSpec {
    pub fn num_actions(self) -> usize {
        self.maximum + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepType {
    First,
    Mid,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeStep {
    pub step_type: StepType,
    /// `None` on the first time-step of an episode.
    pub reward: Option<f64>,
    pub observation: Observation,
}

impl TimeStep {
    pub fn first(board: Board) -> Self {
        Self {
            step_type: StepType::First,
            reward: None,
            observation: Observation { board },
        }
    }

    pub fn transition(board: Board, reward: f64) -> Self {
        Self {
            step_type: StepType::Mid,
            reward: Some(reward),
            observation: Observation { board },
        }
    }

    pub fn termination(board: Board, reward: f64) -> Self {
        Self {
            step_type: StepType::Last,
            reward: Some(reward),
            observation: Observation { board },
        }
    }

    pub fn last(&self) -> bool {
        self.step_type == StepType::Last
    }

    pub fn reward_or_zero(&self) -> f64 {
        self.reward.unwrap_or(0.0)
    }
}

/// Episodic, synchronous simulator driven by the agent.
///
/// `step` after a `Last` time-step is unspecified; the agent always calls `reset` first.
pub trait Simulator {
    fn action_spec(&self) -> ActionSpec;

    fn reset(&mut self) -> TimeStep;

    fn step(&mut self, action: Action) -> TimeStep;

    /// Upper bound of attainable reward, used to clip reachability estimates.
    fn goal_reward(&self) -> f64;

    /// The action that leaves the world unchanged.
    fn noop_action(&self) -> Action;

    /// Task-specific performance of the most recent episode (may include hidden penalties).
    fn performance(&self) -> f64;

    /// One reward function per attainable state, for reachability-style penalties.
    ///
    /// Simulators that cannot enumerate their state space return `None`.
    fn derive_possible_rewards(&mut self) -> Option<Vec<DerivedReward>> {
        None
    }
}
