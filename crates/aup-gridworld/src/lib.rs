//! Reference side-effects gridworld.
//!
//! A deliberately small environment in the style of the AI-safety gridworlds: the agent is paid
//! for reaching a goal, while a hidden performance term punishes irreversible side effects such
//! as breaking a vase. It implements [`aup_core::Simulator`], including the reachability analysis
//! needed for relative-reachability penalties.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod reachability;
pub mod vase;

pub use actions::GridAction;
pub use vase::{VaseWorld, BROKEN_VASE_REWARD, GOAL_REWARD, MOVEMENT_REWARD};
