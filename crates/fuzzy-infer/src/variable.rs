//! Linguistic variables and the registry that holds them.
//!
//! The set of variables is closed: four inputs ([`InputVariable`]) measured
//! from the image and four outputs ([`OutputVariable`]) that become
//! enhancement parameters. What is configurable is each variable's universe
//! and its terms, which the [`Registry`] validates once at load time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::KnowledgeBaseError;
use crate::membership::MembershipFunction;

/// Measured image quality metric driving inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputVariable {
    Brightness,
    Contrast,
    Sharpness,
    Noise,
}

impl InputVariable {
    /// All inputs in registry order.
    pub const ALL: [InputVariable; 4] = [
        InputVariable::Brightness,
        InputVariable::Contrast,
        InputVariable::Sharpness,
        InputVariable::Noise,
    ];

    /// Name used in knowledge base files and JSON.
    pub fn name(self) -> &'static str {
        match self {
            InputVariable::Brightness => "brightness",
            InputVariable::Contrast => "contrast",
            InputVariable::Sharpness => "sharpness",
            InputVariable::Noise => "noise",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enhancement parameter produced by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputVariable {
    BrightnessAdj,
    ContrastAdj,
    Sharpen,
    Denoise,
}

impl OutputVariable {
    /// All outputs in registry order.
    pub const ALL: [OutputVariable; 4] = [
        OutputVariable::BrightnessAdj,
        OutputVariable::ContrastAdj,
        OutputVariable::Sharpen,
        OutputVariable::Denoise,
    ];

    /// Name used in knowledge base files and JSON.
    pub fn name(self) -> &'static str {
        match self {
            OutputVariable::BrightnessAdj => "brightnessAdj",
            OutputVariable::ContrastAdj => "contrastAdj",
            OutputVariable::Sharpen => "sharpen",
            OutputVariable::Denoise => "denoise",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Neutral value used when no fired rule addresses this variable.
    ///
    /// Contrast is a multiplier, so its neutral value is 1 rather than 0.
    pub fn default_value(self) -> f64 {
        match self {
            OutputVariable::ContrastAdj => 1.0,
            OutputVariable::BrightnessAdj | OutputVariable::Sharpen | OutputVariable::Denoise => {
                0.0
            }
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OutputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric domain `[min, max]` of a linguistic variable.
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Universe {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the domain.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `intervals + 1` evenly spaced points covering both endpoints.
    ///
    /// Points are computed by index (`min + i * span / intervals`), never by
    /// accumulating a step, so the count is exact and the last point is
    /// `max` itself.
    pub fn grid(&self, intervals: usize) -> impl Iterator<Item = f64> {
        let Universe { min, max } = *self;
        let span = max - min;
        let n = intervals.max(1);
        (0..=n).map(move |i| {
            if i == n {
                max
            } else {
                min + (i as f64) * span / (n as f64)
            }
        })
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

impl From<[f64; 2]> for Universe {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Universe> for [f64; 2] {
    fn from(universe: Universe) -> Self {
        [universe.min, universe.max]
    }
}

/// Named fuzzy category of a variable, e.g. `Dark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub function: MembershipFunction,
}

impl Term {
    pub fn new(name: impl Into<String>, function: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

/// A variable's universe together with its ordered terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    pub name: String,
    pub universe: Universe,
    pub terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            universe,
            terms,
        }
    }

    /// Look up a term by name.
    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    fn validate(&self) -> Result<(), KnowledgeBaseError> {
        let Universe { min, max } = self.universe;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(KnowledgeBaseError::InvalidUniverse {
                variable: self.name.clone(),
            });
        }
        if self.terms.is_empty() {
            return Err(KnowledgeBaseError::EmptyVariable {
                variable: self.name.clone(),
            });
        }
        for (i, term) in self.terms.iter().enumerate() {
            if self.terms[..i].iter().any(|t| t.name == term.name) {
                return Err(KnowledgeBaseError::DuplicateTerm {
                    variable: self.name.clone(),
                    term: term.name.clone(),
                });
            }
            term.function
                .validate()
                .map_err(|reason| KnowledgeBaseError::InvalidMembership {
                    variable: self.name.clone(),
                    term: term.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}

/// Exactly one linguistic variable per [`InputVariable`] and
/// [`OutputVariable`], stored in enum order.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    inputs: Vec<LinguisticVariable>,
    outputs: Vec<LinguisticVariable>,
}

impl Registry {
    /// Validate and index variable definitions.
    ///
    /// Definitions may arrive in any order; they are matched to the closed
    /// variable sets by name.
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        outputs: Vec<LinguisticVariable>,
    ) -> Result<Self, KnowledgeBaseError> {
        let inputs = place(inputs, &InputVariable::ALL.map(InputVariable::name))?;
        let outputs = place(outputs, &OutputVariable::ALL.map(OutputVariable::name))?;
        Ok(Self { inputs, outputs })
    }

    #[inline]
    pub fn input(&self, variable: InputVariable) -> &LinguisticVariable {
        &self.inputs[variable.index()]
    }

    #[inline]
    pub fn output(&self, variable: OutputVariable) -> &LinguisticVariable {
        &self.outputs[variable.index()]
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[LinguisticVariable] {
        &self.outputs
    }

    pub(crate) fn into_parts(self) -> (Vec<LinguisticVariable>, Vec<LinguisticVariable>) {
        (self.inputs, self.outputs)
    }
}

/// Order `defs` to match `names`, rejecting unknown, duplicate and missing
/// variables.
fn place(
    defs: Vec<LinguisticVariable>,
    names: &[&'static str],
) -> Result<Vec<LinguisticVariable>, KnowledgeBaseError> {
    let mut slots: Vec<Option<LinguisticVariable>> = vec![None; names.len()];

    for def in defs {
        let Some(index) = names.iter().position(|n| *n == def.name) else {
            return Err(KnowledgeBaseError::UnknownVariable { name: def.name });
        };
        if slots[index].is_some() {
            return Err(KnowledgeBaseError::DuplicateVariable { name: def.name });
        }
        def.validate()?;
        slots[index] = Some(def);
    }

    slots
        .into_iter()
        .zip(names)
        .map(|(slot, &name)| slot.ok_or(KnowledgeBaseError::MissingVariable { name }))
        .collect()
}
