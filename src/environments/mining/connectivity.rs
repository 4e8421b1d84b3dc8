//! Village-to-mine connectivity.
//!
//! Village `i` with `A[i]` local actions reaches the contiguous mine range
//! `i .. i + A[i]`. Mine `m` is therefore only fed by villages in the
//! bounded window `m + 1 - max(A) ..= m`, which is what makes the reward
//! decompose per mine.

use crate::factored::PartialKeys;

/// Number of mines reachable by the villages of `space`.
///
/// This is one past the furthest mine index any village can reach,
/// saturating at `usize::MAX`.
pub fn implied_mines(space: &[usize]) -> usize {
    space
        .iter()
        .enumerate()
        .map(|(village, &reach)| village.saturating_add(reach))
        .max()
        .unwrap_or(0)
}

/// For each of `mines` mines, the ascending list of villages reaching it.
///
/// Mines beyond the reach of every village get an empty group.
pub fn villages_per_mine(space: &[usize], mines: usize) -> Vec<PartialKeys> {
    let mut groups = vec![PartialKeys::new(); mines];
    for (village, &reach) in space.iter().enumerate() {
        for mine in village..village + reach {
            groups[mine].push(village);
        }
    }
    groups
}

/// Exclusive upper bound of the mines reachable by villages `0..=village`.
///
/// Mines in `village + 1 .. frontier(village)` are still open once
/// `village` has chosen: later villages may add workers to them.
pub(crate) fn frontiers(space: &[usize]) -> Vec<usize> {
    let mut frontier = 0;
    space
        .iter()
        .enumerate()
        .map(|(village, &reach)| {
            frontier = frontier.max(village + reach);
            frontier
        })
        .collect()
}
