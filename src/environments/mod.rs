//! Benchmark factored bandit environments.

pub mod mining;

pub use mining::{make_mining_parameters, MiningBandit, MiningConfig, MiningError};
