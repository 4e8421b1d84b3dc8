//! Joint and partial actions over a factored action space.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::FactoredError;

/// Number of local actions available to each agent.
pub type ActionSpace = Vec<usize>;

/// One local action per agent.
pub type Action = Vec<usize>;

/// Ascending list of agent indices.
pub type PartialKeys = Vec<usize>;

/// Checks that `action` assigns every agent of `space` a valid local action.
pub fn validate_action(space: &[usize], action: &[usize]) -> Result<(), FactoredError> {
    if action.len() != space.len() {
        return Err(FactoredError::ActionLength {
            expected: space.len(),
            found: action.len(),
        });
    }
    for (agent, (&a, &size)) in action.iter().zip(space).enumerate() {
        if a >= size {
            return Err(FactoredError::ActionOutOfRange {
                agent,
                action: a,
                size,
            });
        }
    }
    Ok(())
}

/// Checks that an action space is non-empty and that no agent is left
/// without actions.
pub fn validate_space(space: &[usize]) -> Result<(), FactoredError> {
    if space.is_empty() {
        return Err(FactoredError::EmptyActionSpace);
    }
    match space.iter().position(|&size| size == 0) {
        Some(agent) => Err(FactoredError::EmptyActionAlphabet { agent }),
        None => Ok(()),
    }
}

/// Number of joint actions in `space`, or `None` on overflow.
pub fn joint_action_count(space: &[usize]) -> Option<usize> {
    space
        .iter()
        .try_fold(1usize, |acc, &size| acc.checked_mul(size))
}

/// An assignment of local actions to a subset of agents.
///
/// `keys` and `values` are parallel: agent `keys[i]` takes action `values[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialAction {
    pub keys: PartialKeys,
    pub values: Vec<usize>,
}

impl PartialAction {
    /// Creates a partial action from parallel key/value vectors.
    pub fn new(keys: PartialKeys, values: Vec<usize>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    /// Number of agents this partial action constrains.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Local action for `agent`, if this partial action covers it.
    pub fn get(&self, agent: usize) -> Option<usize> {
        self.keys
            .binary_search(&agent)
            .ok()
            .map(|i| self.values[i])
    }

    /// Iterates `(agent, action)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns true if the joint action agrees with every constrained agent.
    pub fn matches(&self, action: &[usize]) -> bool {
        self.iter()
            .all(|(agent, value)| action.get(agent) == Some(&value))
    }
}

/// Enumerates every partial action over a fixed key set.
///
/// Works as an odometer: the first key varies fastest, each key ranges
/// over its own alphabet in `space`. An empty key set yields exactly one
/// (empty) partial action.
#[derive(Debug, Clone)]
pub struct PartialActionEnumerator {
    keys: PartialKeys,
    sizes: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl PartialActionEnumerator {
    /// Creates an enumerator over `keys`, taking alphabet sizes from `space`.
    ///
    /// # Panics
    ///
    /// Panics if a key is not an agent of `space`.
    pub fn new(space: &[usize], keys: &[usize]) -> Self {
        let sizes: Vec<usize> = keys.iter().map(|&k| space[k]).collect();
        let done = sizes.iter().any(|&s| s == 0);
        Self {
            keys: keys.to_vec(),
            current: vec![0; keys.len()],
            sizes,
            done,
        }
    }

    /// Total number of partial actions this enumerator yields.
    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }
}

impl Iterator for PartialActionEnumerator {
    type Item = PartialAction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = PartialAction::new(self.keys.clone(), self.current.clone());

        // Advance the odometer; finishing the last digit ends the sequence.
        self.done = true;
        for (digit, &size) in self.current.iter_mut().zip(&self.sizes) {
            *digit += 1;
            if *digit < size {
                self.done = false;
                break;
            }
            *digit = 0;
        }
        Some(item)
    }
}
