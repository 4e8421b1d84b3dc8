//! Behavioral test suite for the mining bandit.

use super::*;
use crate::factored::{joint_action_count, rules_value, FactoredError};

/// Every joint action of `space`, first village varying fastest.
fn all_actions(space: &[usize]) -> Vec<Action> {
    let keys: Vec<usize> = (0..space.len()).collect();
    crate::factored::PartialActionEnumerator::new(space, &keys)
        .map(|pa| pa.values)
        .collect()
}

/// Maximum total output by exhaustive search.
fn brute_force_max(bandit: &MiningBandit) -> f64 {
    all_actions(bandit.action_space())
        .iter()
        .map(|a| bandit.expected_output(a).unwrap())
        .fold(f64::NEG_INFINITY, f64::max)
}

fn two_village_bandit() -> MiningBandit {
    MiningBandit::new(vec![4, 4], vec![3, 2], vec![0.1; 5], 1).unwrap()
}

/// Generated instance shrunk so exhaustive search stays cheap.
fn small_bandit(seed: u64) -> MiningBandit {
    let config = MiningConfig {
        villages: (3, 6),
        ..MiningConfig::default()
    };
    let params = make_mining_parameters_with(&config, seed).unwrap();
    MiningBandit::from_parameters(params, seed).unwrap()
}

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn groups_of_two_village_instance() {
        let bandit = two_village_bandit();
        let groups = bandit.groups();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[0], vec![0]);
        assert_eq!(groups[1], vec![0, 1]);
        assert_eq!(groups[4], vec![1]);
    }

    #[test]
    fn accessors_expose_instance() {
        let bandit = two_village_bandit();
        assert_eq!(bandit.action_space(), &vec![4, 4]);
        assert_eq!(bandit.villages(), 2);
        assert_eq!(bandit.mines(), 5);
        assert_eq!(bandit.workers_per_village(), &[3, 2]);
        assert_eq!(bandit.productivity_per_mine().len(), 5);
    }

    #[test]
    fn workers_length_mismatch_rejected() {
        let result = MiningBandit::new(vec![4, 4], vec![3], vec![0.1; 5], 0);
        assert_eq!(
            result.unwrap_err(),
            MiningError::WorkersLength {
                villages: 2,
                found: 1
            }
        );
    }

    #[test]
    fn productivity_length_mismatch_rejected() {
        let result = MiningBandit::new(vec![4, 4], vec![3, 2], vec![0.1; 4], 0);
        assert_eq!(
            result.unwrap_err(),
            MiningError::ProductivityLength { mines: 5, found: 4 }
        );
    }

    #[test]
    fn empty_action_space_rejected() {
        let result = MiningBandit::new(vec![], vec![], vec![], 0);
        assert!(matches!(
            result,
            Err(MiningError::Action(FactoredError::EmptyActionSpace))
        ));
    }

    #[test]
    fn village_without_mines_rejected() {
        let result = MiningBandit::new(vec![0, 4], vec![1, 1], vec![0.1; 5], 0);
        assert!(matches!(
            result,
            Err(MiningError::Action(FactoredError::EmptyActionAlphabet {
                agent: 0
            }))
        ));
    }

    #[test]
    fn negative_productivity_rejected() {
        let result = MiningBandit::new(vec![4], vec![1], vec![0.1, -0.2, 0.1, 0.1], 0);
        assert!(matches!(
            result,
            Err(MiningError::InvalidProductivity { mine: 1, .. })
        ));
    }

    #[test]
    fn workforce_beyond_u32_rejected() {
        let productivity = vec![0.0, 0.1, 0.1, 0.1, 0.1];
        let result = MiningBandit::new(vec![2, 4], vec![u32::MAX, 1], productivity, 0);
        assert_eq!(
            result.unwrap_err(),
            MiningError::WorkforceOverflow {
                mine: 1,
                workers: u64::from(u32::MAX) + 1
            }
        );
        // Same layout with a productive first mine fails there instead.
        let result = MiningBandit::new(vec![2, 4], vec![u32::MAX, 1], vec![0.1; 5], 0);
        assert!(result.is_err());
    }

    #[test]
    fn infinite_mine_output_rejected() {
        let result = MiningBandit::new(vec![1, 4], vec![u32::MAX, 0], vec![0.1; 5], 0);
        assert!(matches!(
            result,
            Err(MiningError::UnboundedOutput { mine: 0, .. })
        ));
    }

    #[test]
    fn idle_worthless_mines_accept_huge_workforce() {
        let result = MiningBandit::new(vec![1], vec![u32::MAX], vec![0.0], 0);
        let bandit = result.unwrap();
        assert_eq!(bandit.reward_norm(), 0.0);
    }

    #[test]
    fn infinite_total_output_rejected() {
        let result = MiningBandit::new(vec![2, 1], vec![1, 1], vec![1e308, 1e308], 0);
        assert!(matches!(
            result,
            Err(MiningError::UnboundedOutput { mine: 1, workers: 2 })
        ));
    }

    #[test]
    fn oversized_reach_is_a_length_error() {
        let result = MiningBandit::new(vec![2, usize::MAX], vec![1, 1], vec![0.1; 3], 0);
        assert_eq!(
            result.unwrap_err(),
            MiningError::ProductivityLength {
                mines: usize::MAX,
                found: 3
            }
        );
    }

    #[test]
    fn generated_instances_construct() {
        for seed in 0..20 {
            let params = make_mining_parameters(seed);
            let villages = params.villages();
            let bandit = MiningBandit::from_parameters(params, seed).unwrap();
            assert_eq!(bandit.mines(), villages + 3);
            assert_eq!(bandit.optimal_action().len(), villages);
        }
    }
}

#[cfg(test)]
mod optimum {
    use super::*;

    #[test]
    fn optimum_matches_exhaustive_search() {
        for seed in 0..25 {
            let bandit = small_bandit(seed);
            let best = brute_force_max(&bandit);
            assert!(
                (bandit.reward_norm() - best).abs() < 1e-12,
                "seed {}: dp {} vs brute force {}",
                seed,
                bandit.reward_norm(),
                best
            );
        }
    }

    #[test]
    fn optimal_action_has_zero_regret() {
        for seed in 0..20 {
            let bandit = MiningBandit::from_parameters(make_mining_parameters(seed), 0).unwrap();
            let optimal = bandit.optimal_action().clone();
            assert_eq!(bandit.regret(&optimal).unwrap(), 0.0);
        }
    }

    #[test]
    fn optimal_action_is_first_among_ties() {
        for seed in 0..25 {
            let bandit = small_bandit(seed);
            let norm = bandit.reward_norm();
            let mut first_best: Option<Action> = None;
            for action in all_actions(bandit.action_space()) {
                if bandit.expected_output(&action).unwrap() == norm {
                    first_best = match first_best {
                        Some(b) if b <= action => Some(b),
                        _ => Some(action),
                    };
                }
            }
            assert_eq!(Some(bandit.optimal_action().clone()), first_best);
        }
    }

    #[test]
    fn uniform_mines_tie_on_first_action() {
        let bandit = MiningBandit::new(vec![4], vec![2], vec![0.3; 4], 0).unwrap();
        assert_eq!(bandit.optimal_action(), &vec![0]);
    }

    #[test]
    fn reward_norm_is_positive_with_productive_mines() {
        let bandit = two_village_bandit();
        assert!(bandit.reward_norm() > 0.0);
    }
}

#[cfg(test)]
mod regret {
    use super::*;

    #[test]
    fn regret_is_never_negative() {
        for seed in 0..15 {
            let bandit = small_bandit(seed);
            for action in all_actions(bandit.action_space()) {
                assert!(bandit.regret(&action).unwrap() >= 0.0);
            }
        }
    }

    #[test]
    fn regret_is_gap_to_norm() {
        let bandit = two_village_bandit();
        // both villages at mine 1: 5 workers
        let pooled = bandit.regret(&[1, 0]).unwrap();
        let expected = bandit.reward_norm() - 0.1 * 1.03f64.powi(5);
        assert!((pooled - expected).abs() < 1e-12);
    }

    #[test]
    fn regret_rejects_out_of_range_action() {
        let bandit = two_village_bandit();
        assert_eq!(
            bandit.regret(&[4, 0]),
            Err(MiningError::Action(FactoredError::ActionOutOfRange {
                agent: 0,
                action: 4,
                size: 4
            }))
        );
    }

    #[test]
    fn regret_rejects_short_action() {
        let bandit = two_village_bandit();
        assert!(bandit.regret(&[0]).is_err());
    }

    #[test]
    fn regret_does_not_disturb_sampling() {
        let mut a = MiningBandit::from_parameters(make_mining_parameters(4), 99).unwrap();
        let mut b = a.clone();
        let action = vec![0; a.villages()];
        for _ in 0..10 {
            a.regret(&action).unwrap();
        }
        for _ in 0..10 {
            assert_eq!(a.sample_r(&action).unwrap(), b.sample_r(&action).unwrap());
        }
    }
}

#[cfg(test)]
mod sampling {
    use super::*;

    #[test]
    fn samples_are_binary_per_mine() {
        let mut bandit = MiningBandit::from_parameters(make_mining_parameters(2), 5).unwrap();
        let mines = bandit.mines();
        let action = bandit.optimal_action().clone();
        for _ in 0..50 {
            let rewards = bandit.sample_r(&action).unwrap();
            assert_eq!(rewards.len(), mines);
            assert!(rewards.iter().all(|&r| r == 0.0 || r == 1.0));
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let params = make_mining_parameters(8);
        let mut a = MiningBandit::from_parameters(params.clone(), 1234).unwrap();
        let mut b = MiningBandit::from_parameters(params, 1234).unwrap();
        let action = a.optimal_action().clone();
        for _ in 0..100 {
            let ra = a.sample_r(&action).unwrap().clone();
            let rb = b.sample_r(&action).unwrap();
            assert_eq!(&ra, rb);
        }
    }

    #[test]
    fn idle_mines_never_reward() {
        let mut bandit = two_village_bandit();
        // village 0 -> mine 0, village 1 -> mine 4
        for _ in 0..200 {
            let rewards = bandit.sample_r(&[0, 3]).unwrap();
            assert_eq!(rewards[1], 0.0);
            assert_eq!(rewards[2], 0.0);
            assert_eq!(rewards[3], 0.0);
        }
    }

    #[test]
    fn lone_active_mine_at_optimum_always_rewards() {
        // One village: its best mine carries the whole norm, so p == 1.
        let mut bandit = MiningBandit::new(vec![4], vec![3], vec![0.1, 0.4, 0.2, 0.3], 0).unwrap();
        for _ in 0..100 {
            assert_eq!(bandit.sample_r(&[1]).unwrap(), &vec![0.0, 1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn mean_reward_of_optimum_is_one() {
        let mut bandit = small_bandit(3);
        let action = bandit.optimal_action().clone();
        let rounds = 20_000;
        let total: f64 = (0..rounds)
            .map(|_| bandit.sample_r(&action).unwrap().iter().sum::<f64>())
            .sum();
        let mean = total / rounds as f64;
        assert!((mean - 1.0).abs() < 0.05, "mean optimal reward {}", mean);
    }

    #[test]
    fn sample_rejects_invalid_action() {
        let mut bandit = two_village_bandit();
        assert!(matches!(
            bandit.sample_r(&[0, 4]),
            Err(MiningError::Action(FactoredError::ActionOutOfRange { agent: 1, .. }))
        ));
    }

    #[test]
    fn worthless_mines_never_reward() {
        let mut bandit = MiningBandit::new(vec![2, 4], vec![1, 1], vec![0.0; 5], 0).unwrap();
        assert_eq!(bandit.reward_norm(), 0.0);
        assert!(bandit.sample_r(&[0, 0]).unwrap().iter().all(|&r| r == 0.0));
    }
}

#[cfg(test)]
mod rule_export {
    use super::*;

    #[test]
    fn rules_reproduce_total_output() {
        for seed in 0..10 {
            let bandit = small_bandit(seed);
            let rules = bandit.deterministic_rules();
            for action in all_actions(bandit.action_space()) {
                let from_rules = rules_value(&rules, &action);
                let from_regret = bandit.reward_norm() - bandit.regret(&action).unwrap();
                assert!(
                    (from_rules - from_regret).abs() < 1e-12,
                    "seed {} action {:?}",
                    seed,
                    action
                );
            }
        }
    }

    #[test]
    fn each_action_matches_one_rule_per_mine() {
        let bandit = small_bandit(1);
        let rules = bandit.deterministic_rules();
        let action = bandit.optimal_action().clone();
        let matched = rules.iter().filter(|r| r.action.matches(&action)).count();
        assert_eq!(matched, bandit.mines());
    }

    #[test]
    fn rules_are_keyed_by_mine_groups() {
        let bandit = two_village_bandit();
        let rules = bandit.deterministic_rules();
        let expected: usize = bandit
            .groups()
            .iter()
            .map(|g| {
                let sizes: Vec<usize> = g.iter().map(|&v| bandit.action_space()[v]).collect();
                joint_action_count(&sizes).unwrap()
            })
            .sum();
        assert_eq!(rules.len(), expected);
        assert!(rules
            .iter()
            .all(|r| bandit.groups().contains(&r.action.keys)));
    }

    #[test]
    fn rules_maximum_is_reward_norm() {
        let bandit = small_bandit(6);
        let rules = bandit.deterministic_rules();
        let best = all_actions(bandit.action_space())
            .iter()
            .map(|a| rules_value(&rules, a))
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((best - bandit.reward_norm()).abs() < 1e-12);
    }
}

#[cfg(test)]
mod trait_impl {
    use super::*;

    fn regret_via_trait<B: FactoredBandit>(bandit: &B) -> f64 {
        let best = bandit.optimal_action().to_vec();
        bandit.regret(&best).unwrap_or(f64::NAN)
    }

    #[test]
    fn trait_agrees_with_inherent_methods() {
        let mut bandit = two_village_bandit();
        assert_eq!(regret_via_trait(&bandit), 0.0);
        assert_eq!(
            FactoredBandit::groups(&bandit),
            MiningBandit::groups(&bandit)
        );
        let len = FactoredBandit::sample_r(&mut bandit, &[0, 0]).unwrap().len();
        assert_eq!(len, 5);
    }

    #[test]
    fn coordination_graph_mirrors_groups() {
        let bandit = small_bandit(2);
        let graph = bandit.coordination_graph();
        let edges: usize = bandit.groups().iter().map(Vec::len).sum();
        assert_eq!(graph.node_count(), bandit.villages() + bandit.mines());
        assert_eq!(graph.edge_count(), edges);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn parameters_roundtrip_through_json() {
        let params = make_mining_parameters(21);
        let json = serde_json::to_string(&params).unwrap();
        let restored: MiningParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn rules_serialize_with_keys_and_values() {
        let bandit = two_village_bandit();
        let rule = &bandit.deterministic_rules()[0];
        let json = serde_json::to_value(rule).unwrap();
        assert_eq!(json["action"]["keys"], serde_json::json!([0]));
        assert_eq!(json["action"]["values"], serde_json::json!([0]));
    }
}
