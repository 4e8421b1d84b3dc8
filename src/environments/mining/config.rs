//! Sampling ranges for random mining instances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::MiningError;

/// Configuration for [`make_mining_parameters_with`](super::make_mining_parameters_with).
///
/// All ranges are inclusive. The defaults reproduce the benchmark
/// distribution: 5–15 villages, three more mines than villages, 1–5
/// workers per village, 2–4 reachable mines per village (the last village
/// always reaching 4), and productivities in `[0, 0.5]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiningConfig {
    // --- Layout ---
    /// Range of the number of villages.
    pub villages: (usize, usize),
    /// How many more mines than villages an instance has.
    pub extra_mines: usize,
    /// Range of reachable mines per village.
    pub mines_per_village: (usize, usize),
    /// Reachable mines of the last village; fixes the mine count.
    pub last_village_mines: usize,

    // --- Village and mine attributes ---
    /// Range of workers per village.
    pub workers: (u32, u32),
    /// Range of mine productivity.
    pub productivity: (f64, f64),
}

impl MiningConfig {
    /// Checks that every range is well formed and that no village can
    /// reach past the last mine.
    pub fn validate(&self) -> Result<(), MiningError> {
        let invalid = |msg: String| Err(MiningError::InvalidConfig(msg));

        if self.villages.0 == 0 || self.villages.0 > self.villages.1 {
            return invalid(format!("village range {:?}", self.villages));
        }
        if self.mines_per_village.0 == 0 || self.mines_per_village.0 > self.mines_per_village.1 {
            return invalid(format!(
                "mines per village range {:?}",
                self.mines_per_village
            ));
        }
        if self.workers.0 > self.workers.1 {
            return invalid(format!("workers range {:?}", self.workers));
        }
        let (lo, hi) = self.productivity;
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || lo > hi {
            return invalid(format!("productivity range {:?}", self.productivity));
        }
        // Village i of V reaches up to mine i + reach - 1 <= V - 1 + extra.
        if self.last_village_mines != self.extra_mines + 1 {
            return invalid(format!(
                "last village reaches {} mines but there are {} extra mines",
                self.last_village_mines, self.extra_mines
            ));
        }
        if self.mines_per_village.1 > self.extra_mines + 1 {
            return invalid(format!(
                "villages may reach {} mines, more than {} extra mines allow",
                self.mines_per_village.1, self.extra_mines
            ));
        }
        Ok(())
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            villages: (5, 15),
            extra_mines: 3,
            mines_per_village: (2, 4),
            last_village_mines: 4,
            workers: (1, 5),
            productivity: (0.0, 0.5),
        }
    }
}
