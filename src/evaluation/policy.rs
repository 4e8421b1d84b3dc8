//! Baseline joint-action policies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::factored::Action;

/// Chooses a joint action every round.
pub trait Policy {
    /// Selects one local action per agent of `action_space`.
    fn select_action(&mut self, action_space: &[usize]) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}

/// Uniformly random joint actions.
///
/// Every agent independently draws from its own alphabet. Seeded, so runs
/// are reproducible.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, action_space: &[usize]) -> Action {
        action_space
            .iter()
            .map(|&size| self.rng.gen_range(0..size))
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Always plays the same joint action.
///
/// Given the optimal action it acts as an oracle upper bound.
#[derive(Debug, Clone)]
pub struct FixedPolicy {
    action: Action,
}

impl FixedPolicy {
    pub fn new(action: Action) -> Self {
        Self { action }
    }
}

impl Policy for FixedPolicy {
    fn select_action(&mut self, _action_space: &[usize]) -> Action {
        self.action.clone()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
