//! Deterministic primitives for tabular attainable-utility agents.
//!
//! This crate holds the pieces that are independent of the learning rule: the simulator contract,
//! hashable state keys, lazily-initialized value tables and a small seedable RNG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod env;
pub mod policy;
pub mod reward;
pub mod rng;
pub mod state;
pub mod table;

pub use env::{ActionSpec, Observation, Simulator, StepType, TimeStep};
pub use policy::{run_episode, EpisodeOutcome, Policy};
pub use reward::DerivedReward;
pub use rng::{derive_seed, DeterministicRng, SplitMix64};
pub use state::{Board, StateKey};
pub use table::{argmax, ValueTable};

/// Discrete action index in `[0, num_actions)`.
pub type Action = usize;
