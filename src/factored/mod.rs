//! Factored bandit primitives.
//!
//! A factored bandit has one agent per decision variable and a reward that
//! decomposes into local terms, each depending on a small group of agents.
//! This module holds the types shared by every such environment: action
//! spaces, partial actions, local reward rules and the [`FactoredBandit`]
//! trait that test harnesses program against.

pub mod action;
pub mod error;
pub mod rule;

pub use action::{
    joint_action_count, validate_action, validate_space, Action, ActionSpace,
    PartialAction, PartialActionEnumerator, PartialKeys,
};
pub use error::FactoredError;
pub use rule::{rules_value, QFunctionRule};

/// Observed reward vector, one entry per local reward function.
pub type Rewards = Vec<f64>;

/// A stochastic factored bandit with a known ground truth.
///
/// # Associated Types
///
/// * `Error` - Error type returned for malformed joint actions
pub trait FactoredBandit {
    type Error: From<FactoredError>;

    /// Number of local actions for each agent.
    fn action_space(&self) -> &[usize];

    /// For each local reward function, the agents it depends on.
    fn groups(&self) -> &[PartialKeys];

    /// Samples one reward per local reward function for `action`.
    ///
    /// The returned slice is only valid until the next call.
    fn sample_r(&mut self, action: &[usize]) -> Result<&[f64], Self::Error>;

    /// Deterministic regret of `action` against the optimum.
    fn regret(&self, action: &[usize]) -> Result<f64, Self::Error>;

    /// A joint action with zero regret.
    fn optimal_action(&self) -> &[usize];
}
