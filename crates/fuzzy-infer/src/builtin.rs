//! The built-in knowledge base: eight linguistic variables and 50 rules.
//!
//! Everything here is static data. [`KnowledgeBase::standard`] validates it
//! once and caches the result for the life of the process.
//!
//! [`KnowledgeBase::standard`]: crate::KnowledgeBase::standard

use crate::membership::MembershipFunction::{self, Trapezoidal as Trap, Triangular as Tri};
use crate::rules::{Assignment, Condition, Rule};
use crate::variable::{InputVariable, LinguisticVariable, OutputVariable, Term, Universe};

use InputVariable::{Brightness, Contrast, Noise, Sharpness};
use OutputVariable::{BrightnessAdj, ContrastAdj, Denoise, Sharpen};

/// Number of rules in the built-in rule base.
pub const RULE_COUNT: usize = 50;

fn variable(
    name: &str,
    (min, max): (f64, f64),
    terms: &[(&str, MembershipFunction)],
) -> LinguisticVariable {
    LinguisticVariable::new(
        name,
        Universe::new(min, max),
        terms.iter().map(|&(t, f)| Term::new(t, f)).collect(),
    )
}

/// Input variables in registry order.
pub fn input_variables() -> Vec<LinguisticVariable> {
    vec![
        variable(
            "brightness",
            (0.0, 255.0),
            &[
                ("VeryDark", Trap([0.0, 0.0, 40.0, 80.0])),
                ("Dark", Tri([40.0, 80.0, 120.0])),
                ("Normal", Tri([80.0, 127.0, 175.0])),
                ("Bright", Tri([135.0, 175.0, 215.0])),
                ("VeryBright", Trap([175.0, 215.0, 255.0, 255.0])),
            ],
        ),
        variable(
            "contrast",
            (0.0, 100.0),
            &[
                ("VeryLow", Trap([0.0, 0.0, 15.0, 25.0])),
                ("Low", Tri([15.0, 25.0, 40.0])),
                ("Medium", Tri([30.0, 50.0, 70.0])),
                ("High", Tri([60.0, 75.0, 90.0])),
                ("VeryHigh", Trap([80.0, 90.0, 100.0, 100.0])),
            ],
        ),
        variable(
            "sharpness",
            (0.0, 100.0),
            &[
                ("VeryBlurry", Trap([0.0, 0.0, 15.0, 30.0])),
                ("Blurry", Tri([15.0, 30.0, 50.0])),
                ("Acceptable", Tri([40.0, 55.0, 70.0])),
                ("Sharp", Tri([60.0, 75.0, 90.0])),
                ("VerySharp", Trap([80.0, 90.0, 100.0, 100.0])),
            ],
        ),
        variable(
            "noise",
            (0.0, 100.0),
            &[
                ("Clean", Trap([0.0, 0.0, 10.0, 25.0])),
                ("Slight", Tri([15.0, 30.0, 50.0])),
                ("Moderate", Tri([40.0, 60.0, 80.0])),
                ("Heavy", Trap([70.0, 85.0, 100.0, 100.0])),
            ],
        ),
    ]
}

/// Output variables in registry order.
pub fn output_variables() -> Vec<LinguisticVariable> {
    vec![
        variable(
            "brightnessAdj",
            (-100.0, 100.0),
            &[
                ("LargeDecrease", Trap([-100.0, -100.0, -80.0, -60.0])),
                ("SmallDecrease", Tri([-70.0, -40.0, -15.0])),
                ("NoChange", Tri([-20.0, 0.0, 20.0])),
                ("SmallIncrease", Tri([15.0, 40.0, 70.0])),
                ("LargeIncrease", Trap([60.0, 80.0, 100.0, 100.0])),
            ],
        ),
        variable(
            "contrastAdj",
            (0.5, 2.0),
            &[
                ("LargeDecrease", Trap([0.5, 0.5, 0.6, 0.7])),
                ("SmallDecrease", Tri([0.7, 0.8, 0.9])),
                ("NoChange", Tri([0.9, 1.0, 1.1])),
                ("SmallIncrease", Tri([1.1, 1.3, 1.5])),
                ("LargeIncrease", Trap([1.5, 1.7, 2.0, 2.0])),
            ],
        ),
        variable(
            "sharpen",
            (0.0, 100.0),
            &[
                ("None", Trap([0.0, 0.0, 5.0, 15.0])),
                ("Low", Tri([10.0, 20.0, 35.0])),
                ("Medium", Tri([30.0, 45.0, 65.0])),
                ("High", Tri([60.0, 75.0, 90.0])),
                ("VeryHigh", Trap([85.0, 92.0, 100.0, 100.0])),
            ],
        ),
        variable(
            "denoise",
            (0.0, 100.0),
            &[
                ("None", Trap([0.0, 0.0, 5.0, 15.0])),
                ("Low", Tri([10.0, 25.0, 40.0])),
                ("Medium", Tri([35.0, 50.0, 70.0])),
                ("High", Tri([65.0, 80.0, 95.0])),
                ("VeryHigh", Trap([90.0, 95.0, 100.0, 100.0])),
            ],
        ),
    ]
}

fn rule(
    id: u32,
    when: &[(InputVariable, &str)],
    then: &[(OutputVariable, &str)],
    description: &str,
) -> Rule {
    Rule {
        id,
        antecedents: when
            .iter()
            .map(|&(variable, term)| Condition {
                variable,
                term: term.to_string(),
            })
            .collect(),
        consequents: then
            .iter()
            .map(|&(variable, term)| Assignment {
                variable,
                term: term.to_string(),
            })
            .collect(),
        description: Some(description.to_string()),
    }
}

/// The 50 built-in rules, ordered by id.
pub fn rules() -> Vec<Rule> {
    vec![
        // Brightness
        rule(
            1,
            &[(Brightness, "VeryDark")],
            &[(BrightnessAdj, "LargeIncrease"), (ContrastAdj, "SmallIncrease")],
            "Very dark image: brighten strongly",
        ),
        rule(
            2,
            &[(Brightness, "VeryDark"), (Contrast, "VeryLow")],
            &[(BrightnessAdj, "LargeIncrease"), (ContrastAdj, "LargeIncrease")],
            "Very dark and flat: brighten and boost contrast",
        ),
        rule(
            3,
            &[(Brightness, "Dark")],
            &[(BrightnessAdj, "SmallIncrease")],
            "Dark image: brighten slightly",
        ),
        rule(
            4,
            &[(Brightness, "Dark"), (Contrast, "Low")],
            &[(ContrastAdj, "SmallIncrease")],
            "Dark with low contrast: raise contrast",
        ),
        rule(
            5,
            &[(Brightness, "Normal"), (Contrast, "Medium")],
            &[(BrightnessAdj, "NoChange"), (ContrastAdj, "NoChange")],
            "Balanced exposure: leave tone alone",
        ),
        rule(
            6,
            &[(Brightness, "Bright")],
            &[(BrightnessAdj, "SmallDecrease")],
            "Bright image: darken slightly",
        ),
        rule(
            7,
            &[(Brightness, "Bright"), (Contrast, "High")],
            &[(ContrastAdj, "SmallDecrease")],
            "Bright with high contrast: soften contrast",
        ),
        rule(
            8,
            &[(Brightness, "VeryBright")],
            &[(BrightnessAdj, "LargeDecrease"), (ContrastAdj, "SmallDecrease")],
            "Very bright image: darken strongly",
        ),
        rule(
            9,
            &[(Brightness, "VeryBright"), (Contrast, "VeryHigh")],
            &[(BrightnessAdj, "LargeDecrease"), (ContrastAdj, "LargeDecrease")],
            "Blown out and harsh: darken and flatten",
        ),
        // Contrast
        rule(
            10,
            &[(Contrast, "VeryLow"), (Brightness, "Normal")],
            &[(ContrastAdj, "LargeIncrease")],
            "Flat image at normal exposure: boost contrast",
        ),
        rule(
            11,
            &[(Contrast, "VeryLow"), (Brightness, "Dark")],
            &[(ContrastAdj, "SmallIncrease")],
            "Flat and dark: raise contrast gently",
        ),
        rule(
            12,
            &[(Contrast, "Low")],
            &[(ContrastAdj, "SmallIncrease")],
            "Low contrast: raise contrast",
        ),
        rule(
            13,
            &[(Contrast, "Medium"), (Brightness, "Normal")],
            &[(ContrastAdj, "NoChange")],
            "Medium contrast at normal exposure: keep contrast",
        ),
        rule(
            14,
            &[(Contrast, "High"), (Brightness, "Bright")],
            &[(ContrastAdj, "SmallDecrease")],
            "High contrast on a bright image: soften contrast",
        ),
        rule(
            15,
            &[(Contrast, "High")],
            &[(ContrastAdj, "SmallDecrease")],
            "High contrast: soften contrast",
        ),
        rule(
            16,
            &[(Contrast, "VeryHigh")],
            &[(ContrastAdj, "LargeDecrease")],
            "Very high contrast: flatten strongly",
        ),
        rule(
            17,
            &[(Contrast, "VeryLow"), (Sharpness, "VeryBlurry")],
            &[(ContrastAdj, "LargeIncrease"), (Sharpen, "Medium")],
            "Flat and very blurry: boost contrast and sharpen",
        ),
        rule(
            18,
            &[(Contrast, "Low"), (Sharpness, "Blurry")],
            &[(Sharpen, "Low")],
            "Low contrast and blurry: sharpen lightly",
        ),
        // Sharpness versus noise
        rule(
            19,
            &[(Sharpness, "VeryBlurry"), (Noise, "Clean")],
            &[(Sharpen, "VeryHigh")],
            "Very blurry but clean: sharpen hard",
        ),
        rule(
            20,
            &[(Sharpness, "VeryBlurry"), (Noise, "Slight")],
            &[(Sharpen, "High"), (Denoise, "Low")],
            "Very blurry with slight noise: sharpen, denoise lightly",
        ),
        rule(
            21,
            &[(Sharpness, "VeryBlurry"), (Noise, "Moderate")],
            &[(Sharpen, "Medium"), (Denoise, "Medium")],
            "Very blurry and noisy: balance sharpening and denoising",
        ),
        rule(
            22,
            &[(Sharpness, "Blurry"), (Noise, "Clean")],
            &[(Sharpen, "High")],
            "Blurry but clean: sharpen",
        ),
        rule(
            23,
            &[(Sharpness, "Blurry"), (Noise, "Slight")],
            &[(Sharpen, "Medium"), (Denoise, "Low")],
            "Blurry with slight noise: moderate sharpening",
        ),
        rule(
            24,
            &[(Sharpness, "Blurry"), (Noise, "Moderate")],
            &[(Sharpen, "Low"), (Denoise, "High")],
            "Blurry and noisy: favour denoising",
        ),
        rule(
            25,
            &[(Sharpness, "Acceptable"), (Noise, "Clean")],
            &[(Sharpen, "Low")],
            "Acceptable and clean: light sharpening",
        ),
        rule(
            26,
            &[(Sharpness, "Acceptable"), (Noise, "Slight")],
            &[(Sharpen, "None"), (Denoise, "Low")],
            "Acceptable with slight noise: denoise lightly",
        ),
        rule(
            27,
            &[(Sharpness, "Sharp")],
            &[(Sharpen, "None")],
            "Already sharp: no sharpening",
        ),
        rule(
            28,
            &[(Sharpness, "VerySharp")],
            &[(Sharpen, "None")],
            "Very sharp: no sharpening",
        ),
        rule(
            29,
            &[(Sharpness, "VerySharp"), (Brightness, "VeryDark")],
            &[(BrightnessAdj, "LargeIncrease")],
            "Sharp but very dark: brighten strongly",
        ),
        // Noise
        rule(
            30,
            &[(Noise, "Clean")],
            &[(Denoise, "None")],
            "Clean image: no denoising",
        ),
        rule(
            31,
            &[(Noise, "Slight"), (Sharpness, "Sharp")],
            &[(Denoise, "Low")],
            "Slight noise on a sharp image: denoise lightly",
        ),
        rule(
            32,
            &[(Noise, "Slight"), (Sharpness, "Acceptable")],
            &[(Denoise, "Low")],
            "Slight noise at acceptable sharpness: denoise lightly",
        ),
        rule(
            33,
            &[(Noise, "Slight"), (Sharpness, "Blurry")],
            &[(Denoise, "Medium")],
            "Slight noise on a blurry image: moderate denoising",
        ),
        rule(
            34,
            &[(Noise, "Moderate"), (Sharpness, "VerySharp")],
            &[(Denoise, "Medium"), (Sharpen, "None")],
            "Moderate noise, very sharp: denoise without sharpening",
        ),
        rule(
            35,
            &[(Noise, "Moderate"), (Sharpness, "Sharp")],
            &[(Denoise, "High"), (Sharpen, "None")],
            "Moderate noise, sharp: denoise firmly",
        ),
        rule(
            36,
            &[(Noise, "Moderate")],
            &[(Denoise, "High")],
            "Moderate noise: denoise firmly",
        ),
        rule(
            37,
            &[(Noise, "Heavy"), (Sharpness, "VeryBlurry")],
            &[(Denoise, "VeryHigh"), (Sharpen, "None")],
            "Heavy noise and very blurry: denoise hard, never sharpen",
        ),
        rule(
            38,
            &[(Noise, "Heavy")],
            &[(Denoise, "VeryHigh"), (Sharpen, "None")],
            "Heavy noise: denoise hard, never sharpen",
        ),
        // Combined
        rule(
            39,
            &[
                (Brightness, "Normal"),
                (Contrast, "Medium"),
                (Sharpness, "Sharp"),
                (Noise, "Clean"),
            ],
            &[
                (BrightnessAdj, "NoChange"),
                (ContrastAdj, "NoChange"),
                (Sharpen, "None"),
                (Denoise, "None"),
            ],
            "Good image: leave everything alone",
        ),
        rule(
            40,
            &[
                (Brightness, "VeryDark"),
                (Contrast, "VeryLow"),
                (Sharpness, "VeryBlurry"),
            ],
            &[
                (BrightnessAdj, "LargeIncrease"),
                (ContrastAdj, "LargeIncrease"),
                (Sharpen, "Medium"),
            ],
            "Dark, flat and blurry: full recovery",
        ),
        rule(
            41,
            &[
                (Brightness, "VeryBright"),
                (Contrast, "VeryHigh"),
                (Sharpness, "VerySharp"),
            ],
            &[
                (BrightnessAdj, "LargeDecrease"),
                (ContrastAdj, "LargeDecrease"),
                (Sharpen, "None"),
            ],
            "Overexposed, harsh and crisp: tone everything down",
        ),
        rule(
            42,
            &[
                (Contrast, "VeryLow"),
                (Sharpness, "VeryBlurry"),
                (Noise, "Heavy"),
            ],
            &[
                (ContrastAdj, "SmallIncrease"),
                (Sharpen, "None"),
                (Denoise, "VeryHigh"),
            ],
            "Flat, blurry and noisy: denoise first",
        ),
        rule(
            43,
            &[
                (Brightness, "Dark"),
                (Contrast, "Low"),
                (Noise, "Moderate"),
            ],
            &[
                (BrightnessAdj, "SmallIncrease"),
                (ContrastAdj, "SmallIncrease"),
                (Denoise, "Medium"),
            ],
            "Dark, low contrast and noisy: lift and clean",
        ),
        rule(
            44,
            &[
                (Brightness, "Bright"),
                (Sharpness, "Blurry"),
                (Noise, "Slight"),
            ],
            &[
                (BrightnessAdj, "SmallDecrease"),
                (Sharpen, "Medium"),
                (Denoise, "Low"),
            ],
            "Bright, blurry with slight noise: darken and sharpen",
        ),
        rule(
            45,
            &[
                (Contrast, "High"),
                (Sharpness, "VerySharp"),
                (Noise, "Clean"),
            ],
            &[(ContrastAdj, "SmallDecrease"), (Sharpen, "None")],
            "Crisp and contrasty: soften contrast only",
        ),
        rule(
            46,
            &[(Brightness, "VeryDark"), (Noise, "Heavy")],
            &[
                (BrightnessAdj, "LargeIncrease"),
                (Denoise, "VeryHigh"),
                (Sharpen, "None"),
            ],
            "Very dark and noisy: brighten and denoise hard",
        ),
        rule(
            47,
            &[(Brightness, "VeryBright"), (Contrast, "VeryLow")],
            &[(BrightnessAdj, "LargeDecrease"), (ContrastAdj, "LargeIncrease")],
            "Washed out: darken and boost contrast",
        ),
        rule(
            48,
            &[(Brightness, "VeryDark"), (Contrast, "VeryHigh")],
            &[(BrightnessAdj, "LargeIncrease"), (ContrastAdj, "SmallDecrease")],
            "Very dark and harsh: brighten and soften contrast",
        ),
        rule(
            49,
            &[
                (Sharpness, "VeryBlurry"),
                (Noise, "Heavy"),
                (Contrast, "VeryLow"),
            ],
            &[
                (Denoise, "VeryHigh"),
                (Sharpen, "None"),
                (ContrastAdj, "SmallIncrease"),
            ],
            "Blurry, noisy and flat: denoise hard and lift contrast",
        ),
        rule(
            50,
            &[
                (Brightness, "Normal"),
                (Contrast, "Medium"),
                (Sharpness, "Blurry"),
                (Noise, "Moderate"),
            ],
            &[(Sharpen, "None"), (Denoise, "High")],
            "Well exposed but blurry and noisy: denoise, skip sharpening",
        ),
    ]
}
