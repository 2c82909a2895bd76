//! Fuzzification: crisp metrics to term degrees.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::metrics::ImageMetrics;
use crate::variable::{InputVariable, Registry};

/// Degree to which a crisp value belongs to one term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDegree {
    pub term: String,
    pub degree: f64,
}

/// Degrees for every term of one input variable, in registry term order.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzifiedVariable {
    pub variable: InputVariable,
    pub degrees: Vec<TermDegree>,
}

impl FuzzifiedVariable {
    pub fn degree(&self, term: &str) -> Option<f64> {
        self.degrees
            .iter()
            .find(|d| d.term == term)
            .map(|d| d.degree)
    }

    /// Term with the highest degree; ties go to the earlier term.
    pub fn dominant(&self) -> Option<&TermDegree> {
        self.degrees
            .iter()
            .fold(None, |best: Option<&TermDegree>, d| match best {
                Some(b) if b.degree >= d.degree => Some(b),
                _ => Some(d),
            })
    }
}

/// Term degrees for all input variables.
///
/// Serializes as a nested map in registry order:
/// `{"brightness": {"VeryDark": 0.0, ...}, ...}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuzzifiedInputs {
    pub variables: Vec<FuzzifiedVariable>,
}

impl FuzzifiedInputs {
    pub fn variable(&self, variable: InputVariable) -> Option<&FuzzifiedVariable> {
        self.variables.iter().find(|v| v.variable == variable)
    }

    /// Degree of `term` for `variable`, or `None` if either is absent.
    pub fn degree(&self, variable: InputVariable, term: &str) -> Option<f64> {
        self.variable(variable).and_then(|v| v.degree(term))
    }
}

impl Serialize for FuzzifiedInputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Terms<'a>(&'a [TermDegree]);

        impl Serialize for Terms<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for d in self.0 {
                    map.serialize_entry(&d.term, &d.degree)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.variables.len()))?;
        for v in &self.variables {
            map.serialize_entry(&v.variable, &Terms(&v.degrees))?;
        }
        map.end()
    }
}

/// Evaluate every term of every input variable against its metric.
pub fn fuzzify(registry: &Registry, metrics: &ImageMetrics) -> FuzzifiedInputs {
    let variables = InputVariable::ALL
        .iter()
        .map(|&variable| {
            let x = metrics.get(variable);
            let degrees = registry
                .input(variable)
                .terms
                .iter()
                .map(|term| TermDegree {
                    term: term.name.clone(),
                    degree: term.function.evaluate(x),
                })
                .collect();
            FuzzifiedVariable { variable, degrees }
        })
        .collect();

    FuzzifiedInputs { variables }
}
