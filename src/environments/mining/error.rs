use thiserror::Error;

use crate::factored::FactoredError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MiningError {
    #[error("Got {found} worker counts for {villages} villages")]
    WorkersLength { villages: usize, found: usize },

    #[error("Got {found} productivities, but the action space implies {mines} mines")]
    ProductivityLength { mines: usize, found: usize },

    #[error("Mine {mine} has invalid productivity {value}")]
    InvalidProductivity { mine: usize, value: f64 },

    #[error("Mine {mine} can receive {workers} workers, more than a u32 holds")]
    WorkforceOverflow { mine: usize, workers: u64 },

    #[error("Output bound is not finite once mine {mine} holds {workers} workers")]
    UnboundedOutput { mine: usize, workers: u32 },

    #[error("Invalid mining configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Action(#[from] FactoredError),
}
