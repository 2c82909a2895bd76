//! Conjunctive IF/THEN rules.

use serde::{Deserialize, Serialize};

use crate::error::KnowledgeBaseError;
use crate::variable::{InputVariable, OutputVariable};

/// Antecedent condition: `variable IS term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub variable: InputVariable,
    pub term: String,
}

/// Consequent assignment: `variable IS term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub variable: OutputVariable,
    pub term: String,
}

/// `IF c1 AND c2 ... THEN a1, a2 ...`
///
/// Serialized with `if`/`then` keys:
///
/// ```yaml
/// id: 5
/// if:
///   - { variable: brightness, term: Normal }
///   - { variable: contrast, term: Medium }
/// then:
///   - { variable: brightnessAdj, term: NoChange }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: u32,
    #[serde(rename = "if")]
    pub antecedents: Vec<Condition>,
    #[serde(rename = "then")]
    pub consequents: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    /// Human-readable label: the description, or `Rule <id>`.
    pub fn label(&self) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => format!("Rule {}", self.id),
        }
    }

    /// Whether any consequent targets `variable`.
    pub fn targets(&self, variable: OutputVariable) -> bool {
        self.consequents.iter().any(|a| a.variable == variable)
    }
}

/// Rules ordered by id, ids unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Validate structural constraints and sort by id.
    ///
    /// Term names are checked against a registry separately, by
    /// [`KnowledgeBase::new`](crate::KnowledgeBase::new).
    pub fn new(mut rules: Vec<Rule>) -> Result<Self, KnowledgeBaseError> {
        rules.sort_by_key(|r| r.id);
        for (i, rule) in rules.iter().enumerate() {
            if i > 0 && rules[i - 1].id == rule.id {
                return Err(KnowledgeBaseError::DuplicateRuleId { id: rule.id });
            }
            if rule.antecedents.is_empty() || rule.consequents.is_empty() {
                return Err(KnowledgeBaseError::EmptyRule { id: rule.id });
            }
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Rule> {
        self.rules
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.rules[i])
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn into_vec(self) -> Vec<Rule> {
        self.rules
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
