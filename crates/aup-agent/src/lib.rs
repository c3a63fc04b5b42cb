//! Tabular attainable utility preservation (AUP).
//!
//! The agent first learns one Q-table per auxiliary penalty reward, then learns its primary
//! Q-table on the environment reward minus an impact penalty: the L1 shift in attainable penalty
//! value caused by an action, relative to doing nothing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod error;
pub mod explore;
pub mod penalty;
pub mod performance;

pub use agent::{AupAgent, Objective, IMPACT_UNIT_UNDEFINED_PENALTY, LEARNING_RATE};
pub use config::AupConfig;
pub use error::AupError;
pub use explore::epsilon_greedy;
pub use penalty::{sampled_penalties, PenaltyFunction, SampledReward};
pub use performance::TrainingPerformance;
