//! Crisp values entering and leaving the inference pipeline.

use serde::{Deserialize, Serialize};

use crate::variable::{InputVariable, OutputVariable};

/// The four image quality measurements.
///
/// Nominal ranges: brightness `[0, 255]`, the others `[0, 100]`. Values are
/// not validated; anything outside a term's support simply has degree 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageMetrics {
    pub brightness: f64,
    pub contrast: f64,
    pub sharpness: f64,
    pub noise: f64,
}

impl ImageMetrics {
    pub const fn new(brightness: f64, contrast: f64, sharpness: f64, noise: f64) -> Self {
        Self {
            brightness,
            contrast,
            sharpness,
            noise,
        }
    }

    /// Value of the metric feeding `variable`.
    pub fn get(&self, variable: InputVariable) -> f64 {
        match variable {
            InputVariable::Brightness => self.brightness,
            InputVariable::Contrast => self.contrast,
            InputVariable::Sharpness => self.sharpness,
            InputVariable::Noise => self.noise,
        }
    }
}

/// Crisp enhancement parameters.
///
/// Nominal ranges: `brightness_adj` in `[-100, 100]` (additive offset),
/// `contrast_adj` in `[0.5, 2.0]` (multiplier around mid-grey), `sharpen` and
/// `denoise` in `[0, 100]` (percent strength).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementParameters {
    pub brightness_adj: f64,
    pub contrast_adj: f64,
    pub sharpen: f64,
    pub denoise: f64,
}

impl EnhancementParameters {
    pub fn get(&self, variable: OutputVariable) -> f64 {
        match variable {
            OutputVariable::BrightnessAdj => self.brightness_adj,
            OutputVariable::ContrastAdj => self.contrast_adj,
            OutputVariable::Sharpen => self.sharpen,
            OutputVariable::Denoise => self.denoise,
        }
    }

    pub fn set(&mut self, variable: OutputVariable, value: f64) {
        match variable {
            OutputVariable::BrightnessAdj => self.brightness_adj = value,
            OutputVariable::ContrastAdj => self.contrast_adj = value,
            OutputVariable::Sharpen => self.sharpen = value,
            OutputVariable::Denoise => self.denoise = value,
        }
    }

    /// True when applying these parameters would leave an image unchanged.
    pub fn is_neutral(&self) -> bool {
        OutputVariable::ALL
            .iter()
            .all(|&v| self.get(v) == v.default_value())
    }
}

impl Default for EnhancementParameters {
    /// Every field at its variable's neutral value.
    fn default() -> Self {
        Self {
            brightness_adj: OutputVariable::BrightnessAdj.default_value(),
            contrast_adj: OutputVariable::ContrastAdj.default_value(),
            sharpen: OutputVariable::Sharpen.default_value(),
            denoise: OutputVariable::Denoise.default_value(),
        }
    }
}
