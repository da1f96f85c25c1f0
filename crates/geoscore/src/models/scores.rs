//! GEO score record and the rounding helpers used throughout scoring.

use serde::{Deserialize, Serialize};

/// Round to the nearest integer, halves toward positive infinity.
pub fn round0(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, halves toward positive infinity.
pub fn round1(value: f64) -> f64 {
    round0(value * 10.0) / 10.0
}

/// Round to two decimal places, halves toward positive infinity.
pub fn round2(value: f64) -> f64 {
    round0(value * 100.0) / 100.0
}

/// The four headline scores, each in [0, 10] with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoScores {
    pub overall: f64,
    pub extractability: f64,
    pub readability: f64,
    pub citability: f64,
}

impl GeoScores {
    /// Build a score record from raw sub-scores.
    ///
    /// Sub-scores are rounded first and `overall` is the rounded mean of the
    /// rounded values, so `overall == round1(mean(e, r, c))` always holds for
    /// the stored numbers.
    pub fn new(extractability: f64, readability: f64, citability: f64) -> Self {
        let extractability = round1(extractability);
        let readability = round1(readability);
        let citability = round1(citability);
        Self {
            overall: round1((extractability + readability + citability) / 3.0),
            extractability,
            readability,
            citability,
        }
    }

    /// Replace citability and recompute overall, keeping the other two scores.
    pub fn with_citability(&self, citability: f64) -> Self {
        Self::new(self.extractability, self.readability, citability)
    }
}
