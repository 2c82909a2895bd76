//! fuzzy-infer: Mamdani fuzzy inference of image enhancement parameters
//!
//! Four crisp image metrics go in; four crisp enhancement parameters come
//! out. In between sits a classic Mamdani pipeline over a static knowledge
//! base of linguistic variables and 50 conjunctive rules.
//!
//! # Quick Start
//!
//! ```
//! use fuzzy_infer::{infer, ImageMetrics};
//!
//! let result = infer(&ImageMetrics::new(127.0, 50.0, 70.0, 10.0));
//!
//! assert_eq!(result.fired_rule_ids(), vec![5, 13, 27, 30, 39]);
//! assert!(result.parameters.brightness_adj.abs() < 1e-9);
//! ```
//!
//! # Pipeline
//!
//! 1. **Fuzzify** ([`fuzzify()`]): every term of every input variable is
//!    evaluated against its metric.
//! 2. **Evaluate rules** ([`evaluate_rules()`]): a rule's firing strength is
//!    the minimum of its antecedent degrees (min conjunction). Rules with
//!    strength 0 are dropped; the rest clip each consequent term at their
//!    strength (min implication).
//! 3. **Aggregate** ([`aggregate()`]): each output universe is sampled at 101
//!    evenly spaced points and the clipped terms are combined by pointwise
//!    maximum.
//! 4. **Defuzzify** ([`defuzzify_centroid()`]): the centroid of each
//!    non-empty curve becomes the crisp parameter. Outputs no fired rule
//!    addresses keep their neutral default (`contrastAdj` 1, others 0).
//!
//! # Knowledge Bases
//!
//! [`KnowledgeBase::standard`] is the built-in base. Alternatives can be
//! deserialized from YAML or JSON; they are validated once on load and
//! rejected with a [`KnowledgeBaseError`] if any rule names a variable or term
//! that does not exist, or any membership function is malformed. Inference
//! itself cannot fail.
//!
//! ```
//! use fuzzy_infer::{KnowledgeBase, KnowledgeBaseDefinition};
//!
//! let mut def = KnowledgeBaseDefinition::builtin();
//! def.rules.retain(|r| r.id <= 10);
//!
//! let kb = KnowledgeBase::try_from(def).unwrap();
//! assert_eq!(kb.rules().len(), 10);
//! ```
//!
//! # Membership Shapes
//!
//! Triangular `[a, b, c]` and trapezoidal `[a, b, c, d]` functions are
//! supported. A trapezoid whose outer and inner points coincide (`a == b` or
//! `c == d`) is a shoulder: the plateau is tested first, so the universe
//! edge itself has degree 1.

pub mod aggregate;
pub mod builtin;
pub mod engine;
pub mod error;
pub mod explain;
pub mod fuzzify;
pub mod inference;
pub mod membership;
pub mod metrics;
pub mod rules;
pub mod variable;


pub use aggregate::{aggregate, defuzzify_centroid, AggregatedOutput, Sample, SAMPLE_INTERVALS};
pub use engine::{infer, InferenceResult, KnowledgeBase, KnowledgeBaseDefinition};
pub use error::KnowledgeBaseError;
pub use explain::{interpret, recommended_actions, rule_activations, RuleActivation};
pub use fuzzify::{fuzzify, FuzzifiedInputs, FuzzifiedVariable, TermDegree};
pub use inference::{evaluate_rules, firing_strength, ClippedOutput, FiredRule};
pub use membership::MembershipFunction;
pub use metrics::{EnhancementParameters, ImageMetrics};
pub use rules::{Assignment, Condition, Rule, RuleBase};
pub use variable::{
    InputVariable, LinguisticVariable, OutputVariable, Registry, Term, Universe,
};
