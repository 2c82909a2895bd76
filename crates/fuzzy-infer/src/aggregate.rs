//! Max aggregation of clipped outputs and centroid defuzzification.
//!
//! Each output variable's universe is sampled at [`SAMPLE_INTERVALS`] + 1
//! evenly spaced points. At every point the aggregated degree is the maximum
//! over all clipped outputs targeting that variable of
//! `min(mf(x), clipping_level)`. The crisp value is the centroid of the
//! sampled curve.

use serde::Serialize;

use crate::inference::{ClippedOutput, FiredRule};
use crate::variable::{OutputVariable, Registry};

/// Sampling resolution: 100 intervals, 101 points.
pub const SAMPLE_INTERVALS: usize = 100;

/// One point of an aggregated curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub degree: f64,
}

/// Aggregated membership curve of one output variable.
///
/// `samples` is empty when no fired rule addressed the variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedOutput {
    pub variable: OutputVariable,
    pub samples: Vec<Sample>,
}

impl AggregatedOutput {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn centroid(&self) -> f64 {
        defuzzify_centroid(&self.samples)
    }

    /// Highest degree anywhere on the curve.
    pub fn height(&self) -> f64 {
        self.samples.iter().map(|s| s.degree).fold(0.0, f64::max)
    }
}

/// Build one curve per output variable, in output order.
pub fn aggregate(registry: &Registry, fired: &[FiredRule]) -> Vec<AggregatedOutput> {
    OutputVariable::ALL
        .iter()
        .map(|&variable| {
            let clipped: Vec<&ClippedOutput> = fired
                .iter()
                .flat_map(|f| f.outputs.iter())
                .filter(|o| o.variable == variable)
                .collect();

            if clipped.is_empty() {
                return AggregatedOutput {
                    variable,
                    samples: Vec::new(),
                };
            }

            let samples = registry
                .output(variable)
                .universe
                .grid(SAMPLE_INTERVALS)
                .map(|x| Sample {
                    x,
                    degree: clipped.iter().map(|o| o.degree_at(x)).fold(0.0, f64::max),
                })
                .collect();

            AggregatedOutput { variable, samples }
        })
        .collect()
}

/// Centroid `Σ(x·μ) / Σμ` of a sampled curve.
///
/// An empty curve, or one whose degrees sum to 0, yields exactly 0.
pub fn defuzzify_centroid(samples: &[Sample]) -> f64 {
    let (numerator, denominator) = samples
        .iter()
        .fold((0.0, 0.0), |(num, den), s| (num + s.x * s.degree, den + s.degree));

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
