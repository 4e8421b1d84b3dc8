//! Exact maximization of total mineral output.
//!
//! Villages are processed in index order. Once village `i` has chosen, no
//! later village can reach mine `i`, so that mine's output is final. The
//! sweep therefore only carries the worker totals of mines that processed
//! villages reach but that are not final yet: at most `max(A) - 1` mines.
//!
//! Prefixes that lead to the same open totals have the same best future,
//! so only the best prefix per state is kept. Equal values keep the
//! lexicographically smallest prefix, which makes the final pick the first
//! optimal joint action in increasing-action-index order.

use std::collections::BTreeMap;

use super::connectivity::frontiers;
use super::production::mine_output;
use crate::factored::Action;

/// Best joint action found by [`maximize`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Optimum {
    pub action: Action,
    pub value: f64,
    /// Largest number of DP states alive at once.
    pub peak_states: usize,
}

#[derive(Debug, Clone)]
struct Prefix {
    value: f64,
    action: Action,
}

impl Prefix {
    fn beats(&self, other: &Prefix) -> bool {
        self.value > other.value || (self.value == other.value && self.action < other.action)
    }
}

/// Keeps `candidate` under `state` unless a better prefix is already there.
fn relax(layer: &mut BTreeMap<Vec<u32>, Prefix>, state: Vec<u32>, candidate: Prefix) {
    match layer.get_mut(&state) {
        Some(current) if !candidate.beats(current) => {}
        Some(current) => *current = candidate,
        None => {
            layer.insert(state, candidate);
        }
    }
}

/// Finds the joint action maximizing total output.
///
/// Inputs must be consistent: one worker count per village, every action
/// in `space` reaching a mine below `productivity_per_mine.len()`.
pub(crate) fn maximize(
    space: &[usize],
    workers_per_village: &[u32],
    productivity_per_mine: &[f64],
) -> Optimum {
    let frontier = frontiers(space);

    // Key: worker totals of mines `village..frontier[village - 1]`.
    let mut layer: BTreeMap<Vec<u32>, Prefix> = BTreeMap::new();
    layer.insert(
        Vec::new(),
        Prefix {
            value: 0.0,
            action: Action::new(),
        },
    );
    let mut peak_states = 1;

    for (village, &reach) in space.iter().enumerate() {
        let open = frontier[village] - village;
        let closed = productivity_per_mine[village];
        let mut next: BTreeMap<Vec<u32>, Prefix> = BTreeMap::new();

        for (state, prefix) in &layer {
            for local in 0..reach {
                let mut totals = state.clone();
                totals.resize(open, 0);
                totals[local] += workers_per_village[village];

                let mut action = prefix.action.clone();
                action.push(local);
                let candidate = Prefix {
                    value: prefix.value + mine_output(closed, totals[0]),
                    action,
                };
                totals.remove(0);
                relax(&mut next, totals, candidate);
            }
        }

        peak_states = peak_states.max(next.len());
        layer = next;
    }

    // Remaining open mines follow the last village; anything past them is idle.
    let first_open = space.len();
    let mut best: Option<Prefix> = None;
    for (state, prefix) in layer {
        // Added one mine at a time, in mine order, like `total_output`.
        let value = state
            .iter()
            .enumerate()
            .fold(prefix.value, |acc, (offset, &w)| {
                acc + mine_output(productivity_per_mine[first_open + offset], w)
            });
        let candidate = Prefix {
            value,
            action: prefix.action,
        };
        if best.as_ref().map_or(true, |b| candidate.beats(b)) {
            best = Some(candidate);
        }
    }

    let best = best.unwrap_or(Prefix {
        value: 0.0,
        action: Action::new(),
    });
    Optimum {
        action: best.action,
        value: best.value,
        peak_states,
    }
}
