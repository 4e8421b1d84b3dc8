//! Regret bookkeeping over repeated bandit rounds.

use std::fmt;

use super::policy::Policy;
use crate::factored::{validate_action, FactoredBandit};

/// Aggregated results of running a policy against a bandit.
#[derive(Debug, Clone, PartialEq)]
pub struct RegretMetrics {
    /// Number of rounds played.
    pub rounds: usize,
    /// Sum of per-round deterministic regret.
    pub cumulative_regret: f64,
    /// Mean per-round deterministic regret.
    pub mean_regret: f64,
    /// Mean total sampled reward per round.
    pub mean_reward: f64,
    /// Per-round cumulative regret, for plotting.
    pub regret_curve: Vec<f64>,
}

impl RegretMetrics {
    /// Plays `rounds` rounds of `policy` against `bandit`.
    ///
    /// Each round the policy picks a joint action, the bandit samples
    /// rewards for it and its deterministic regret is recorded.
    ///
    /// # Errors
    ///
    /// Fails on the first action that does not fit the bandit's action
    /// space, before the bandit sees it, or with any error of the bandit.
    pub fn evaluate<B: FactoredBandit>(
        bandit: &mut B,
        policy: &mut dyn Policy,
        rounds: usize,
    ) -> Result<Self, B::Error> {
        let space = bandit.action_space().to_vec();
        let mut cumulative_regret = 0.0;
        let mut total_reward = 0.0;
        let mut regret_curve = Vec::with_capacity(rounds);

        for _ in 0..rounds {
            let action = policy.select_action(&space);
            validate_action(&space, &action)?;
            cumulative_regret += bandit.regret(&action)?;
            total_reward += bandit.sample_r(&action)?.iter().sum::<f64>();
            regret_curve.push(cumulative_regret);
        }

        let n = rounds.max(1) as f64;
        tracing::debug!(
            policy = policy.name(),
            rounds,
            cumulative_regret,
            "evaluation finished"
        );
        Ok(Self {
            rounds,
            cumulative_regret,
            mean_regret: cumulative_regret / n,
            mean_reward: total_reward / n,
            regret_curve,
        })
    }
}

impl fmt::Display for RegretMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Regret Metrics ({} rounds) ===", self.rounds)?;
        writeln!(f, "  Cumulative regret:  {:.4}", self.cumulative_regret)?;
        writeln!(f, "  Mean regret:        {:.4}", self.mean_regret)?;
        writeln!(f, "  Mean reward:        {:.4}", self.mean_reward)
    }
}
