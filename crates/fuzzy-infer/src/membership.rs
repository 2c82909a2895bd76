//! Piecewise-linear membership functions.
//!
//! Only two shapes exist, so [`MembershipFunction`] is a closed enum rather
//! than a trait. Both shapes are evaluated by straight formulas with no
//! allocation; the aggregator calls [`MembershipFunction::evaluate`] 101 times
//! per clipped output, so it stays `#[inline]`.
//!
//! # Boundary conventions
//!
//! The support is open: `x <= a` and `x >= c` (triangular) or `x >= d`
//! (trapezoidal) evaluate to exactly 0. The trapezoidal plateau `[b, c]` is
//! closed and is tested *before* the support bounds, which matters only for
//! degenerate "shoulder" edges:
//!
//! ```
//! use fuzzy_infer::MembershipFunction;
//!
//! // Left shoulder: a == b, so the universe's lower bound is fully inside.
//! let very_dark = MembershipFunction::Trapezoidal([0.0, 0.0, 40.0, 80.0]);
//! assert_eq!(very_dark.evaluate(0.0), 1.0);
//! assert_eq!(very_dark.evaluate(80.0), 0.0);
//!
//! // Proper ramp: a < b keeps the left boundary at 0.
//! let ramp = MembershipFunction::Trapezoidal([10.0, 20.0, 30.0, 40.0]);
//! assert_eq!(ramp.evaluate(10.0), 0.0);
//! assert_eq!(ramp.evaluate(20.0), 1.0);
//! ```

use serde::{Deserialize, Serialize};

/// A triangular or trapezoidal membership function.
///
/// Control points are stored in ascending order. Serialized as
/// `{ "type": "triangular", "points": [a, b, c] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "lowercase")]
pub enum MembershipFunction {
    /// `[a, b, c]`: 0 at `a`, 1 at `b`, 0 at `c`.
    Triangular([f64; 3]),
    /// `[a, b, c, d]`: rises on `(a, b)`, 1 on `[b, c]`, falls on `(c, d)`.
    Trapezoidal([f64; 4]),
}

impl MembershipFunction {
    /// Degree of membership of `x`, always in `[0, 1]`.
    ///
    /// NaN input yields 0.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular([a, b, c]) => {
                if x == b {
                    1.0
                } else if x > a && x < b {
                    (x - a) / (b - a)
                } else if x > b && x < c {
                    (c - x) / (c - b)
                } else {
                    0.0
                }
            }
            MembershipFunction::Trapezoidal([a, b, c, d]) => {
                if x >= b && x <= c {
                    1.0
                } else if x > a && x < b {
                    (x - a) / (b - a)
                } else if x > c && x < d {
                    (d - x) / (d - c)
                } else {
                    0.0
                }
            }
        }
    }

    /// Control points in ascending order.
    pub fn points(&self) -> &[f64] {
        match self {
            MembershipFunction::Triangular(points) => points,
            MembershipFunction::Trapezoidal(points) => points,
        }
    }

    /// Open interval outside of which the degree is 0.
    pub fn support(&self) -> (f64, f64) {
        let points = self.points();
        (points[0], points[points.len() - 1])
    }

    /// Closed interval on which the degree is 1.
    pub fn core(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular([_, b, _]) => (b, b),
            MembershipFunction::Trapezoidal([_, b, c, _]) => (b, c),
        }
    }

    /// Lowercase shape name as used in serialized knowledge bases.
    pub fn shape(&self) -> &'static str {
        match self {
            MembershipFunction::Triangular(_) => "triangular",
            MembershipFunction::Trapezoidal(_) => "trapezoidal",
        }
    }

    /// Check that the control points are finite, ascending, and span a
    /// non-empty support.
    ///
    /// Returns a short reason on failure; callers attach variable/term
    /// context.
    pub fn validate(&self) -> Result<(), &'static str> {
        let points = self.points();
        if points.iter().any(|p| !p.is_finite()) {
            return Err("control points must be finite");
        }
        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err("control points must be in ascending order");
        }
        let (low, high) = self.support();
        if low >= high {
            return Err("support must have non-zero width");
        }
        Ok(())
    }
}
