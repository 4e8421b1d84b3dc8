//! Harness for scoring joint-action policies by regret.

pub mod metrics;
pub mod policy;

pub use metrics::RegretMetrics;
pub use policy::{FixedPolicy, Policy, RandomPolicy};
