//! Deterministic per-mine reward rules.

use super::production::mine_output;
use crate::factored::{PartialActionEnumerator, PartialKeys, QFunctionRule};

/// Builds one rule per local configuration of each mine's village group.
///
/// For mine `m`, every combination of local actions of the villages in
/// `groups[m]` is emitted together with the output of mine `m` under it.
/// Rules are ordered by mine, a joint action therefore matches exactly one
/// rule per mine and summing matched rules gives its total output.
pub(crate) fn deterministic_rules(
    space: &[usize],
    groups: &[PartialKeys],
    workers_per_village: &[u32],
    productivity_per_mine: &[f64],
) -> Vec<QFunctionRule> {
    let capacity = groups
        .iter()
        .map(|g| g.iter().map(|&v| space[v]).product::<usize>())
        .sum();
    let mut rules = Vec::with_capacity(capacity);

    for (mine, group) in groups.iter().enumerate() {
        for partial in PartialActionEnumerator::new(space, group) {
            let workers: u32 = partial
                .iter()
                .filter(|&(village, local)| village + local == mine)
                .map(|(village, _)| workers_per_village[village])
                .sum();
            let value = mine_output(productivity_per_mine[mine], workers);
            rules.push(QFunctionRule::new(partial, value));
        }
    }
    rules
}
