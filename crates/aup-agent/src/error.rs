use aup_core::Action;

/// Configuration rejected before any training starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AupError {
    #[error("discount must be in (0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("epsilon must be in [0, 1], got {0}")]
    InvalidEpsilon(f64),

    #[error("impact budget must be a positive percentage, got {0}")]
    InvalidImpactBudget(f64),

    #[error("no-op action {noop} is outside the action range 0..{num_actions}")]
    NoopOutOfRange { noop: Action, num_actions: usize },

    #[error("simulator cannot derive possible rewards for state penalties")]
    ReachabilityUnavailable,
}
