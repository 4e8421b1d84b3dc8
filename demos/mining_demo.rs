// Demonstration: solve a random mining bandit and score baseline policies.
//
// Run from this repo root:
//   RUST_LOG=debug cargo run --example mining_demo -- --seed 42 --rounds 1000

use std::env;

use minebandit::evaluation::{FixedPolicy, Policy, RandomPolicy, RegretMetrics};
use minebandit::{make_mining_parameters, MiningBandit};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args: Vec<String> = env::args().collect();
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let rounds: usize = arg_value(&args, "--rounds")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let params = make_mining_parameters(seed);
    println!(
        "Instance: {} villages, {} mines",
        params.villages(),
        params.mines()
    );
    println!("Workers per village: {:?}", params.workers_per_village);

    let bandit = MiningBandit::from_parameters(params, seed)?;
    println!("Optimal action: {:?}", bandit.optimal_action());
    println!("Optimal output: {:.4}", bandit.reward_norm());
    println!("Rules exported: {}", bandit.deterministic_rules().len());

    let mut policies: Vec<Box<dyn Policy>> = vec![
        Box::new(RandomPolicy::new(seed)),
        Box::new(FixedPolicy::new(bandit.optimal_action().clone())),
    ];
    for policy in policies.iter_mut() {
        let mut env = bandit.clone();
        let metrics = RegretMetrics::evaluate(&mut env, policy.as_mut(), rounds)?;
        println!("Policy: {}", policy.name());
        println!("{}", metrics);
    }
    Ok(())
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
