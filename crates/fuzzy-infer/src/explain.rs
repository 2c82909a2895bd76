//! Human-readable diagnostics over an [`InferenceResult`].
//!
//! Nothing here feeds back into inference; these helpers only describe what
//! the engine did and what the crisp parameters mean.

use serde::Serialize;

use crate::engine::InferenceResult;
use crate::metrics::{EnhancementParameters, ImageMetrics};
use crate::rules::Assignment;
use crate::variable::InputVariable;

/// Degree of one antecedent of a fired rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntecedentDegree {
    pub variable: InputVariable,
    pub term: String,
    pub degree: f64,
}

/// Breakdown of one fired rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleActivation {
    pub rule_id: u32,
    pub label: String,
    pub firing_strength: f64,
    pub antecedents: Vec<AntecedentDegree>,
    pub consequents: Vec<Assignment>,
}

/// One [`RuleActivation`] per fired rule, in rule order.
pub fn rule_activations(result: &InferenceResult) -> Vec<RuleActivation> {
    result
        .fired_rules
        .iter()
        .map(|fired| RuleActivation {
            rule_id: fired.rule.id,
            label: fired.rule.label(),
            firing_strength: fired.firing_strength,
            antecedents: fired
                .rule
                .antecedents
                .iter()
                .map(|c| AntecedentDegree {
                    variable: c.variable,
                    term: c.term.clone(),
                    degree: result
                        .fuzzified_inputs
                        .degree(c.variable, &c.term)
                        .unwrap_or(0.0),
                })
                .collect(),
            consequents: fired.rule.consequents.clone(),
        })
        .collect()
}

/// One-sentence description of the metrics, e.g.
/// `Image is normal brightness, medium contrast, sharp, clean.`
pub fn interpret(metrics: &ImageMetrics) -> String {
    let brightness = match metrics.brightness {
        b if b < 60.0 => "dark",
        b if b > 200.0 => "very bright",
        b if b > 160.0 => "bright",
        _ => "normal brightness",
    };
    let contrast = match metrics.contrast {
        c if c < 20.0 => "very low contrast",
        c if c < 40.0 => "low contrast",
        c if c > 85.0 => "very high contrast",
        c if c > 70.0 => "high contrast",
        _ => "medium contrast",
    };
    let sharpness = match metrics.sharpness {
        s if s < 25.0 => "very blurry",
        s if s < 45.0 => "blurry",
        s if s > 85.0 => "very sharp",
        s if s > 65.0 => "sharp",
        _ => "acceptable sharpness",
    };
    let noise = match metrics.noise {
        n if n > 75.0 => "heavy noise",
        n if n > 45.0 => "moderate noise",
        n if n > 20.0 => "slight noise",
        _ => "clean",
    };

    format!("Image is {brightness}, {contrast}, {sharpness}, {noise}.")
}

/// Actions worth taking, or a single "nothing to do" line.
pub fn recommended_actions(params: &EnhancementParameters) -> Vec<String> {
    let mut actions = Vec::new();

    if params.brightness_adj.abs() > 20.0 {
        let verb = if params.brightness_adj > 0.0 { "Increase" } else { "Decrease" };
        actions.push(format!(
            "{verb} brightness by {:.1} units",
            params.brightness_adj.abs()
        ));
    }

    let contrast_delta = params.contrast_adj - 1.0;
    if contrast_delta.abs() > 0.1 {
        let verb = if contrast_delta > 0.0 { "Increase" } else { "Decrease" };
        actions.push(format!(
            "{verb} contrast by {:.0}%",
            contrast_delta.abs() * 100.0
        ));
    }

    if params.sharpen > 10.0 {
        actions.push(format!("Apply {:.0}% sharpening", params.sharpen));
    }

    if params.denoise > 10.0 {
        actions.push(format!("Apply {:.0}% noise reduction", params.denoise));
    }

    if actions.is_empty() {
        actions.push("No enhancement needed - image quality is already good".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::infer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interpret_good_image() {
        assert_eq!(
            interpret(&ImageMetrics::new(127.0, 50.0, 70.0, 10.0)),
            "Image is normal brightness, medium contrast, sharp, clean."
        );
    }

    #[test]
    fn test_interpret_thresholds() {
        assert_eq!(
            interpret(&ImageMetrics::new(30.0, 10.0, 10.0, 90.0)),
            "Image is dark, very low contrast, very blurry, heavy noise."
        );
        assert_eq!(
            interpret(&ImageMetrics::new(180.0, 30.0, 30.0, 50.0)),
            "Image is bright, low contrast, blurry, moderate noise."
        );
        assert_eq!(
            interpret(&ImageMetrics::new(230.0, 95.0, 95.0, 30.0)),
            "Image is very bright, very high contrast, very sharp, slight noise."
        );
        // Boundaries fall to the milder category.
        assert_eq!(
            interpret(&ImageMetrics::new(60.0, 70.0, 65.0, 20.0)),
            "Image is normal brightness, medium contrast, acceptable sharpness, clean."
        );
    }

    #[test]
    fn test_actions_neutral() {
        assert_eq!(
            recommended_actions(&EnhancementParameters::default()),
            vec!["No enhancement needed - image quality is already good".to_string()]
        );
    }

    #[test]
    fn test_actions_all_parameters() {
        let params = EnhancementParameters {
            brightness_adj: -45.3,
            contrast_adj: 1.3,
            sharpen: 62.4,
            denoise: 12.0,
        };
        assert_eq!(
            recommended_actions(&params),
            vec![
                "Decrease brightness by 45.3 units".to_string(),
                "Increase contrast by 30%".to_string(),
                "Apply 62% sharpening".to_string(),
                "Apply 12% noise reduction".to_string(),
            ]
        );
    }

    #[test]
    fn test_actions_small_changes_ignored() {
        let params = EnhancementParameters {
            brightness_adj: 20.0,
            contrast_adj: 0.95,
            sharpen: 10.0,
            denoise: 3.0,
        };
        assert_eq!(recommended_actions(&params).len(), 1);
    }

    #[test]
    fn test_activations_mirror_fired_rules() {
        let result = infer(&ImageMetrics::new(127.0, 50.0, 70.0, 10.0));
        let activations = rule_activations(&result);
        assert_eq!(activations.len(), result.fired_rules.len());

        let first = &activations[0];
        assert_eq!(first.rule_id, 5);
        assert_eq!(first.antecedents.len(), 2);
        assert_eq!(first.antecedents[0].degree, 1.0);
        assert_eq!(first.consequents, result.fired_rules[0].rule.consequents);

        for a in &activations {
            let min = a
                .antecedents
                .iter()
                .map(|d| d.degree)
                .fold(f64::INFINITY, f64::min);
            assert_eq!(min, a.firing_strength);
        }
    }
}
