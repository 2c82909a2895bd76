//! Load-time validation errors for knowledge bases.
//!
//! Inference itself never fails; everything that can go wrong is caught when
//! a [`Registry`](crate::Registry), [`RuleBase`](crate::RuleBase) or
//! [`KnowledgeBase`](crate::KnowledgeBase) is constructed.

use std::fmt;

/// Error raised while assembling or deserializing a knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeBaseError {
    /// A variable name that is neither a known input nor a known output
    UnknownVariable {
        /// Offending name
        name: String,
    },
    /// A required variable was not defined
    MissingVariable {
        /// Expected variable name
        name: &'static str,
    },
    /// A variable was defined more than once
    DuplicateVariable {
        /// Variable name
        name: String,
    },
    /// Universe bounds are not finite or not increasing
    InvalidUniverse {
        /// Variable name
        variable: String,
    },
    /// A variable has no terms
    EmptyVariable {
        /// Variable name
        variable: String,
    },
    /// Two terms of one variable share a name
    DuplicateTerm {
        /// Variable name
        variable: String,
        /// Term name
        term: String,
    },
    /// A membership function failed validation
    InvalidMembership {
        /// Variable name
        variable: String,
        /// Term name
        term: String,
        /// What is wrong with the control points
        reason: &'static str,
    },
    /// Two rules share an id
    DuplicateRuleId {
        /// Rule id
        id: u32,
    },
    /// A rule has no antecedents or no consequents
    EmptyRule {
        /// Rule id
        id: u32,
    },
    /// A rule references a term its variable does not define
    UnknownTerm {
        /// Rule id
        rule: u32,
        /// Variable name
        variable: &'static str,
        /// Term name
        term: String,
    },
}

impl fmt::Display for KnowledgeBaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeBaseError::UnknownVariable { name } => {
                write!(f, "unknown linguistic variable '{}'", name)
            }
            KnowledgeBaseError::MissingVariable { name } => {
                write!(f, "linguistic variable '{}' is not defined", name)
            }
            KnowledgeBaseError::DuplicateVariable { name } => {
                write!(f, "linguistic variable '{}' is defined more than once", name)
            }
            KnowledgeBaseError::InvalidUniverse { variable } => {
                write!(
                    f,
                    "universe of '{}' must be finite with min < max",
                    variable
                )
            }
            KnowledgeBaseError::EmptyVariable { variable } => {
                write!(f, "linguistic variable '{}' has no terms", variable)
            }
            KnowledgeBaseError::DuplicateTerm { variable, term } => {
                write!(f, "term '{}' is defined twice in '{}'", term, variable)
            }
            KnowledgeBaseError::InvalidMembership {
                variable,
                term,
                reason,
            } => {
                write!(
                    f,
                    "invalid membership function for {}.{}: {}",
                    variable, term, reason
                )
            }
            KnowledgeBaseError::DuplicateRuleId { id } => {
                write!(f, "rule id {} is used more than once", id)
            }
            KnowledgeBaseError::EmptyRule { id } => {
                write!(f, "rule {} needs at least one condition and one consequent", id)
            }
            KnowledgeBaseError::UnknownTerm {
                rule,
                variable,
                term,
            } => {
                write!(
                    f,
                    "rule {} references unknown term '{}' of '{}'",
                    rule, term, variable
                )
            }
        }
    }
}

impl std::error::Error for KnowledgeBaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_term() {
        let err = KnowledgeBaseError::UnknownTerm {
            rule: 7,
            variable: "contrast",
            term: "Extreme".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule 7 references unknown term 'Extreme' of 'contrast'"
        );
    }

    #[test]
    fn test_display_invalid_membership() {
        let err = KnowledgeBaseError::InvalidMembership {
            variable: "noise".to_string(),
            term: "Heavy".to_string(),
            reason: "control points must be in ascending order",
        };
        assert_eq!(
            err.to_string(),
            "invalid membership function for noise.Heavy: control points must be in ascending order"
        );
    }

    #[test]
    fn test_display_missing_variable() {
        let err = KnowledgeBaseError::MissingVariable { name: "sharpen" };
        assert_eq!(err.to_string(), "linguistic variable 'sharpen' is not defined");
    }
}
