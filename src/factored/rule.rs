//! Local reward rules for coordination-graph maximizers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::action::PartialAction;

/// A value attached to one partial joint action.
///
/// A set of rules describes a factored reward: the value of a joint action
/// is the sum of the values of every rule whose partial action it matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QFunctionRule {
    pub action: PartialAction,
    pub value: f64,
}

impl QFunctionRule {
    pub fn new(action: PartialAction, value: f64) -> Self {
        Self { action, value }
    }
}

/// Sums the values of all rules matched by `action`.
pub fn rules_value(rules: &[QFunctionRule], action: &[usize]) -> f64 {
    rules
        .iter()
        .filter(|rule| rule.action.matches(action))
        .map(|rule| rule.value)
        .sum()
}
