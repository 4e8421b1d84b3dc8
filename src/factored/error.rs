use thiserror::Error;

/// Errors raised when a joint action does not fit its action space.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoredError {
    #[error("Joint action has {found} entries but the action space has {expected} agents")]
    ActionLength { expected: usize, found: usize },

    #[error("Agent {agent} chose action {action}, but only {size} actions are available")]
    ActionOutOfRange {
        agent: usize,
        action: usize,
        size: usize,
    },

    #[error("Action space must contain at least one agent")]
    EmptyActionSpace,

    #[error("Agent {agent} has no available actions")]
    EmptyActionAlphabet { agent: usize },
}
