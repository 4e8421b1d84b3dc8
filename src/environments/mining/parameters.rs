//! Random mining instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::MiningConfig;
use super::error::MiningError;
use crate::factored::ActionSpace;

/// Constructor inputs of a [`MiningBandit`](super::MiningBandit).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiningParameters {
    /// Reachable mines per village.
    pub action_space: ActionSpace,
    /// Workers sent by each village.
    pub workers_per_village: Vec<u32>,
    /// Hidden productivity of each mine.
    pub productivity_per_mine: Vec<f64>,
}

impl MiningParameters {
    pub fn villages(&self) -> usize {
        self.action_space.len()
    }

    pub fn mines(&self) -> usize {
        self.productivity_per_mine.len()
    }

    /// Splits into `(action_space, workers_per_village, productivity_per_mine)`.
    pub fn into_parts(self) -> (ActionSpace, Vec<u32>, Vec<f64>) {
        (
            self.action_space,
            self.workers_per_village,
            self.productivity_per_mine,
        )
    }
}

/// Generates a random instance from the default benchmark distribution.
///
/// Identical seeds always give identical parameters.
pub fn make_mining_parameters(seed: u64) -> MiningParameters {
    let config = MiningConfig::default();
    sample_parameters(&config, &mut StdRng::seed_from_u64(seed))
}

/// Generates a random instance from a custom distribution.
///
/// Values are drawn in a fixed order: the village count, then per village
/// its workers followed by its reachable mine count, then one productivity
/// per mine. The last village's reach is overwritten afterwards, so it
/// still consumes a draw.
pub fn make_mining_parameters_with(
    config: &MiningConfig,
    seed: u64,
) -> Result<MiningParameters, MiningError> {
    config.validate()?;
    Ok(sample_parameters(config, &mut StdRng::seed_from_u64(seed)))
}

fn sample_parameters<R: Rng>(config: &MiningConfig, rng: &mut R) -> MiningParameters {
    let villages = rng.gen_range(config.villages.0..=config.villages.1);
    let mines = villages + config.extra_mines;

    let mut action_space = Vec::with_capacity(villages);
    let mut workers_per_village = Vec::with_capacity(villages);
    for _ in 0..villages {
        workers_per_village.push(rng.gen_range(config.workers.0..=config.workers.1));
        action_space.push(rng.gen_range(config.mines_per_village.0..=config.mines_per_village.1));
    }
    if let Some(last) = action_space.last_mut() {
        *last = config.last_village_mines;
    }

    let (lo, hi) = config.productivity;
    let productivity_per_mine = (0..mines).map(|_| rng.gen_range(lo..=hi)).collect();

    tracing::debug!(villages, mines, "sampled mining parameters");

    MiningParameters {
        action_space,
        workers_per_village,
        productivity_per_mine,
    }
}
