//! minebandit - factored multi-agent bandit benchmarks
//!
//! Ground-truth problem instances for algorithms that learn to coordinate
//! agents whose joint reward decomposes into local terms. The main
//! environment is the [`MiningBandit`]: villages send workers to mines,
//! and each mine yields a Bernoulli reward driven by its hidden output.

pub mod environments;
pub mod evaluation;
pub mod factored;

pub use environments::mining::{
    make_mining_parameters, make_mining_parameters_with, MiningBandit, MiningConfig, MiningError,
    MiningParameters,
};
pub use factored::{Action, ActionSpace, FactoredBandit, PartialKeys, QFunctionRule, Rewards};
