//! Rule evaluation with min conjunction and min (clipping) implication.

use serde::Serialize;

use crate::fuzzify::FuzzifiedInputs;
use crate::membership::MembershipFunction;
use crate::rules::{Rule, RuleBase};
use crate::variable::{OutputVariable, Registry};

/// One consequent of a fired rule: an output term clipped at the rule's
/// firing strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedOutput {
    pub variable: OutputVariable,
    pub term: String,
    pub function: MembershipFunction,
    pub clipping_level: f64,
}

impl ClippedOutput {
    /// `min(mf(x), clipping_level)`
    #[inline]
    pub fn degree_at(&self, x: f64) -> f64 {
        self.function.evaluate(x).min(self.clipping_level)
    }
}

/// A rule whose firing strength is strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiredRule {
    pub rule: Rule,
    pub firing_strength: f64,
    pub outputs: Vec<ClippedOutput>,
}

/// Minimum antecedent degree of `rule`.
///
/// A condition naming a term the inputs do not carry contributes 0, as does
/// a rule without conditions.
pub fn firing_strength(rule: &Rule, inputs: &FuzzifiedInputs) -> f64 {
    if rule.antecedents.is_empty() {
        return 0.0;
    }
    rule.antecedents
        .iter()
        .map(|c| inputs.degree(c.variable, &c.term).unwrap_or(0.0))
        .fold(1.0, f64::min)
}

/// Evaluate every rule in order and keep those that fire.
///
/// Strengths of 0 (or NaN) drop the rule. Each retained rule carries one
/// [`ClippedOutput`] per consequent, in consequent order.
pub fn evaluate_rules(
    rules: &RuleBase,
    registry: &Registry,
    inputs: &FuzzifiedInputs,
) -> Vec<FiredRule> {
    let mut fired = Vec::new();

    for rule in rules {
        let strength = firing_strength(rule, inputs);
        if strength.is_nan() || strength <= 0.0 {
            continue;
        }

        let outputs = rule
            .consequents
            .iter()
            .filter_map(|a| {
                registry
                    .output(a.variable)
                    .term(&a.term)
                    .map(|term| ClippedOutput {
                        variable: a.variable,
                        term: a.term.clone(),
                        function: term.function,
                        clipping_level: strength,
                    })
            })
            .collect();

        tracing::trace!(rule = rule.id, strength, "rule fired");
        fired.push(FiredRule {
            rule: rule.clone(),
            firing_strength: strength,
            outputs,
        });
    }

    fired
}
