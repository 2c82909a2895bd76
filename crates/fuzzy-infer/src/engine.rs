//! Knowledge base and the inference pipeline.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::aggregate::{aggregate, AggregatedOutput};
use crate::builtin;
use crate::error::KnowledgeBaseError;
use crate::fuzzify::{fuzzify, FuzzifiedInputs};
use crate::inference::{evaluate_rules, FiredRule};
use crate::metrics::{EnhancementParameters, ImageMetrics};
use crate::rules::{Rule, RuleBase};
use crate::variable::{LinguisticVariable, Registry};

/// Variables and rules, validated against each other.
///
/// Immutable once built. Serializes to and from a
/// [`KnowledgeBaseDefinition`]; deserialization runs the same validation as
/// [`KnowledgeBase::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KnowledgeBaseDefinition", into = "KnowledgeBaseDefinition")]
pub struct KnowledgeBase {
    registry: Registry,
    rules: RuleBase,
}

/// Unvalidated knowledge base as it appears in YAML or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseDefinition {
    pub inputs: Vec<LinguisticVariable>,
    pub outputs: Vec<LinguisticVariable>,
    pub rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// Cross-check every rule term against the registry.
    pub fn new(registry: Registry, rules: RuleBase) -> Result<Self, KnowledgeBaseError> {
        for rule in &rules {
            for c in &rule.antecedents {
                if registry.input(c.variable).term(&c.term).is_none() {
                    return Err(KnowledgeBaseError::UnknownTerm {
                        rule: rule.id,
                        variable: c.variable.name(),
                        term: c.term.clone(),
                    });
                }
            }
            for a in &rule.consequents {
                if registry.output(a.variable).term(&a.term).is_none() {
                    return Err(KnowledgeBaseError::UnknownTerm {
                        rule: rule.id,
                        variable: a.variable.name(),
                        term: a.term.clone(),
                    });
                }
            }
        }
        Ok(Self { registry, rules })
    }

    /// The built-in knowledge base, validated on first use.
    pub fn standard() -> &'static KnowledgeBase {
        static STANDARD: OnceLock<KnowledgeBase> = OnceLock::new();
        STANDARD.get_or_init(|| {
            KnowledgeBase::try_from(KnowledgeBaseDefinition::builtin())
                .expect("built-in knowledge base is valid")
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Run fuzzify, rule evaluation, aggregation and defuzzification.
    ///
    /// Total: every metric value is accepted, and any parameter no fired
    /// rule addresses keeps its neutral default.
    pub fn infer(&self, metrics: &ImageMetrics) -> InferenceResult {
        let fuzzified_inputs = fuzzify(&self.registry, metrics);
        let fired_rules = evaluate_rules(&self.rules, &self.registry, &fuzzified_inputs);
        let aggregated_outputs = aggregate(&self.registry, &fired_rules);

        let mut parameters = EnhancementParameters::default();
        for output in aggregated_outputs.iter().filter(|o| !o.is_empty()) {
            parameters.set(output.variable, output.centroid());
        }

        tracing::debug!(
            brightness = metrics.brightness,
            contrast = metrics.contrast,
            sharpness = metrics.sharpness,
            noise = metrics.noise,
            fired = fired_rules.len(),
            brightness_adj = parameters.brightness_adj,
            contrast_adj = parameters.contrast_adj,
            sharpen = parameters.sharpen,
            denoise = parameters.denoise,
            "inference complete"
        );

        InferenceResult {
            fuzzified_inputs,
            fired_rules,
            aggregated_outputs,
            parameters,
        }
    }
}

impl KnowledgeBaseDefinition {
    /// Definition of the built-in knowledge base.
    pub fn builtin() -> Self {
        Self {
            inputs: builtin::input_variables(),
            outputs: builtin::output_variables(),
            rules: builtin::rules(),
        }
    }
}

impl TryFrom<KnowledgeBaseDefinition> for KnowledgeBase {
    type Error = KnowledgeBaseError;

    fn try_from(def: KnowledgeBaseDefinition) -> Result<Self, Self::Error> {
        let registry = Registry::new(def.inputs, def.outputs)?;
        let rules = RuleBase::new(def.rules)?;
        KnowledgeBase::new(registry, rules)
    }
}

impl From<KnowledgeBase> for KnowledgeBaseDefinition {
    fn from(kb: KnowledgeBase) -> Self {
        let (inputs, outputs) = kb.registry.into_parts();
        Self {
            inputs,
            outputs,
            rules: kb.rules.into_vec(),
        }
    }
}

/// Everything computed for one set of metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub fuzzified_inputs: FuzzifiedInputs,
    pub fired_rules: Vec<FiredRule>,
    pub aggregated_outputs: Vec<AggregatedOutput>,
    pub parameters: EnhancementParameters,
}

impl InferenceResult {
    /// Ids of the fired rules, in rule order.
    pub fn fired_rule_ids(&self) -> Vec<u32> {
        self.fired_rules.iter().map(|f| f.rule.id).collect()
    }
}

/// Infer enhancement parameters with the built-in knowledge base.
pub fn infer(metrics: &ImageMetrics) -> InferenceResult {
    KnowledgeBase::standard().infer(metrics)
}
