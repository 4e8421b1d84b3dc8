//! Mineral output of a single mine.

/// Growth factor applied per assigned worker.
pub const PRODUCTION_BASE: f64 = 1.03;

/// Minerals produced by a mine with the given productivity and workforce.
///
/// An idle or worthless mine produces nothing; otherwise output is
/// `productivity × 1.03^workers`. Large workforces grow past `f64::MAX`
/// and give infinity.
pub fn mine_output(productivity: f64, workers: u32) -> f64 {
    if workers == 0 || productivity == 0.0 {
        return 0.0;
    }
    productivity * PRODUCTION_BASE.powf(f64::from(workers))
}

/// Per-mine worker totals for a joint action.
///
/// Village `i` taking local action `k` sends its workers to mine `i + k`.
/// The action must already be validated against an action space whose
/// reach fits inside `mines`.
pub fn assign_workers(action: &[usize], workers_per_village: &[u32], mines: usize) -> Vec<u32> {
    let mut totals = vec![0u32; mines];
    for (village, (&a, &w)) in action.iter().zip(workers_per_village).enumerate() {
        totals[village + a] += w;
    }
    totals
}

/// Sum of every mine's output for the given worker totals.
pub fn total_output(productivity_per_mine: &[f64], workers_per_mine: &[u32]) -> f64 {
    productivity_per_mine
        .iter()
        .zip(workers_per_mine)
        .map(|(&p, &w)| mine_output(p, w))
        .sum()
}
