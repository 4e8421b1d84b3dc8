//! The mining factored bandit.
//!
//! Villages each send all of their workers to one mine. Village `i` can
//! reach mines `i .. i + A[i]`, so its local action `k` means "send the
//! workers to mine `i + k`". A mine produces `productivity × 1.03^workers`
//! minerals, or nothing when idle.
//!
//! Deterministic outputs would make the optimum trivial to find, so each
//! mine's output is divided by the best attainable total and used as the
//! parameter of a Bernoulli draw. On average the optimal joint action
//! earns a total reward of 1, though a single draw may exceed it.
//!
//! # Module Structure
//!
//! - [`connectivity`] - Village-to-mine reach and per-mine village groups
//! - [`production`] - Mineral output of a mine
//! - `optimizer` - Exact arg-max over joint actions
//! - `rules` - Deterministic per-mine reward rules
//! - [`parameters`] - Random instance generation
//! - [`config`] - Sampling ranges for random instances
//! - [`graph`] - Village–mine coordination graph

pub mod config;
pub mod connectivity;
pub mod error;
pub mod graph;
mod optimizer;
pub mod parameters;
pub mod production;
mod rules;

#[cfg(test)]
mod tests;

use petgraph::graph::UnGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::factored::{
    validate_action, validate_space, Action, ActionSpace, FactoredBandit, PartialKeys,
    QFunctionRule, Rewards,
};

pub use config::MiningConfig;
pub use error::MiningError;
pub use graph::CoordinationNode;
pub use parameters::{make_mining_parameters, make_mining_parameters_with, MiningParameters};
pub use production::{mine_output, PRODUCTION_BASE};

/// The mining bandit environment.
///
/// The instance (action space, workers, productivities) is fixed at
/// construction, when the optimal joint action and the normalization
/// constant are computed. Afterwards, only [`sample_r`](Self::sample_r)
/// mutates the environment: it advances the private random engine and
/// overwrites the reward buffer it returns.
///
/// # Example
///
/// ```
/// use minebandit::environments::mining::{make_mining_parameters, MiningBandit};
///
/// let params = make_mining_parameters(42);
/// let mut bandit = MiningBandit::from_parameters(params, 7).unwrap();
///
/// let best = bandit.optimal_action().to_vec();
/// assert_eq!(bandit.regret(&best).unwrap(), 0.0);
///
/// let rewards = bandit.sample_r(&best).unwrap();
/// assert!(rewards.iter().all(|&r| r == 0.0 || r == 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct MiningBandit {
    action_space: ActionSpace,
    workers_per_village: Vec<u32>,
    productivity_per_mine: Vec<f64>,

    optimal: Action,
    reward_norm: f64,

    villages_per_mine: Vec<PartialKeys>,

    /// Scratch buffer returned by `sample_r`.
    rewards: Rewards,
    rng: StdRng,
}

impl MiningBandit {
    /// Builds a bandit and solves it.
    ///
    /// # Arguments
    ///
    /// * `action_space` - Reachable mines per village
    /// * `workers_per_village` - Workers each village sends
    /// * `productivity_per_mine` - Hidden productivity factor of each mine
    /// * `seed` - Seed of the engine used by [`sample_r`](Self::sample_r)
    ///
    /// # Errors
    ///
    /// Fails if the action space is empty or has a village without mines,
    /// if the vector lengths disagree with the villages and mines the
    /// action space implies, or if a productivity is negative or not finite.
    /// Also fails if the villages reaching some mine can send it more
    /// workers than a `u32` holds, or enough to make its output infinite.
    pub fn new(
        action_space: ActionSpace,
        workers_per_village: Vec<u32>,
        productivity_per_mine: Vec<f64>,
        seed: u64,
    ) -> Result<Self, MiningError> {
        validate_space(&action_space)?;
        if workers_per_village.len() != action_space.len() {
            return Err(MiningError::WorkersLength {
                villages: action_space.len(),
                found: workers_per_village.len(),
            });
        }
        let mines = connectivity::implied_mines(&action_space);
        if productivity_per_mine.len() != mines {
            return Err(MiningError::ProductivityLength {
                mines,
                found: productivity_per_mine.len(),
            });
        }
        if let Some((mine, &value)) = productivity_per_mine
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(MiningError::InvalidProductivity { mine, value });
        }

        let villages_per_mine = connectivity::villages_per_mine(&action_space, mines);
        check_workforce(
            &villages_per_mine,
            &workers_per_village,
            &productivity_per_mine,
        )?;
        let optimum =
            optimizer::maximize(&action_space, &workers_per_village, &productivity_per_mine);

        let mut bandit = Self {
            action_space,
            workers_per_village,
            productivity_per_mine,
            optimal: optimum.action,
            reward_norm: 0.0,
            villages_per_mine,
            rewards: vec![0.0; mines],
            rng: StdRng::seed_from_u64(seed),
        };
        // Recomputed through the regret path so the optimum has zero regret.
        bandit.reward_norm = bandit.total_output(&bandit.optimal);

        tracing::debug!(
            villages = bandit.villages(),
            mines,
            reward_norm = bandit.reward_norm,
            dp_value = optimum.value,
            peak_states = optimum.peak_states,
            "solved mining bandit"
        );
        Ok(bandit)
    }

    /// Builds a bandit from generated parameters.
    pub fn from_parameters(params: MiningParameters, seed: u64) -> Result<Self, MiningError> {
        let (action_space, workers, productivity) = params.into_parts();
        Self::new(action_space, workers, productivity, seed)
    }

    /// Samples one Bernoulli reward per mine for the joint action.
    ///
    /// Each mine succeeds with probability `output / reward_norm`. The
    /// ratio is not clamped: a probability of 1 or more always succeeds.
    /// If every mine is worthless the norm is zero and nothing succeeds.
    /// The returned buffer is overwritten by the next call.
    pub fn sample_r(&mut self, action: &[usize]) -> Result<&Rewards, MiningError> {
        validate_action(&self.action_space, action)?;
        let workers = self.workers_per_mine(action);

        for (mine, slot) in self.rewards.iter_mut().enumerate() {
            let output = mine_output(self.productivity_per_mine[mine], workers[mine]);
            let p = if self.reward_norm > 0.0 {
                output / self.reward_norm
            } else {
                0.0
            };
            // Draws lie in [0, 1): p == 0 never succeeds, p >= 1 always does.
            *slot = if self.rng.gen::<f64>() < p { 1.0 } else { 0.0 };
        }

        tracing::trace!(?action, rewards = ?self.rewards, "sampled mining rewards");
        Ok(&self.rewards)
    }

    /// Deterministic regret of the joint action.
    ///
    /// Never touches the random engine or the reward buffer.
    pub fn regret(&self, action: &[usize]) -> Result<f64, MiningError> {
        validate_action(&self.action_space, action)?;
        Ok(self.reward_norm - self.total_output(action))
    }

    /// Deterministic total output of the joint action.
    pub fn expected_output(&self, action: &[usize]) -> Result<f64, MiningError> {
        validate_action(&self.action_space, action)?;
        Ok(self.total_output(action))
    }

    /// The stored optimal joint action.
    pub fn optimal_action(&self) -> &Action {
        &self.optimal
    }

    /// Total output of the optimal joint action.
    pub fn reward_norm(&self) -> f64 {
        self.reward_norm
    }

    /// Number of local actions of each village.
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// For each mine, the villages that can send workers to it.
    pub fn groups(&self) -> &[PartialKeys] {
        &self.villages_per_mine
    }

    /// Workers each village sends to its chosen mine.
    pub fn workers_per_village(&self) -> &[u32] {
        &self.workers_per_village
    }

    /// Hidden productivity factor of each mine.
    pub fn productivity_per_mine(&self) -> &[f64] {
        &self.productivity_per_mine
    }

    /// Number of villages (agents).
    pub fn villages(&self) -> usize {
        self.action_space.len()
    }

    /// Number of mines (local reward functions).
    pub fn mines(&self) -> usize {
        self.productivity_per_mine.len()
    }

    /// The true, noise-free reward structure as local rules.
    ///
    /// Maximizing the sum of matched rules is equivalent to finding the
    /// optimal action of the bandit. Values are raw outputs, not
    /// normalized.
    pub fn deterministic_rules(&self) -> Vec<QFunctionRule> {
        rules::deterministic_rules(
            &self.action_space,
            &self.villages_per_mine,
            &self.workers_per_village,
            &self.productivity_per_mine,
        )
    }

    /// The village–mine coordination graph.
    pub fn coordination_graph(&self) -> UnGraph<CoordinationNode, ()> {
        graph::coordination_graph(self.villages(), &self.villages_per_mine)
    }

    fn workers_per_mine(&self, action: &[usize]) -> Vec<u32> {
        production::assign_workers(action, &self.workers_per_village, self.mines())
    }

    fn total_output(&self, action: &[usize]) -> f64 {
        production::total_output(&self.productivity_per_mine, &self.workers_per_mine(action))
    }
}

/// Rejects instances where a mine could hold more workers than a `u32`
/// counts, or where outputs could add up to infinity.
///
/// The bound per mine is the workforce of every village reaching it, so
/// every per-mine total and every total output computed later fits.
fn check_workforce(
    groups: &[PartialKeys],
    workers_per_village: &[u32],
    productivity_per_mine: &[f64],
) -> Result<(), MiningError> {
    let mut output_bound = 0.0_f64;
    for (mine, (group, &productivity)) in groups.iter().zip(productivity_per_mine).enumerate() {
        let total: u64 = group
            .iter()
            .map(|&village| u64::from(workers_per_village[village]))
            .sum();
        let workers = u32::try_from(total)
            .map_err(|_| MiningError::WorkforceOverflow { mine, workers: total })?;
        output_bound += mine_output(productivity, workers);
        if !output_bound.is_finite() {
            return Err(MiningError::UnboundedOutput { mine, workers });
        }
    }
    Ok(())
}

impl FactoredBandit for MiningBandit {
    type Error = MiningError;

    fn action_space(&self) -> &[usize] {
        &self.action_space
    }

    fn groups(&self) -> &[PartialKeys] {
        &self.villages_per_mine
    }

    fn sample_r(&mut self, action: &[usize]) -> Result<&[f64], MiningError> {
        MiningBandit::sample_r(self, action).map(Vec::as_slice)
    }

    fn regret(&self, action: &[usize]) -> Result<f64, MiningError> {
        MiningBandit::regret(self, action)
    }

    fn optimal_action(&self) -> &[usize] {
        &self.optimal
    }
}
