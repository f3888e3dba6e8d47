// Rating scale shared by urgency, importance, mood and energy

use serde::{Deserialize, Serialize};

/// Scale the user rates urgency, importance, mood and energy on
///
/// `Percent` is the 0-100 slider scale, `Decimal` the 10-point scale. All
/// thresholds and breakpoints are derived from the scale maximum so the
/// planner runs one algorithm for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingScale {
    #[default]
    Percent,
    Decimal,
}

impl RatingScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingScale::Percent => "percent",
            RatingScale::Decimal => "decimal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "percent" | "100" => Some(RatingScale::Percent),
            "decimal" | "10" => Some(RatingScale::Decimal),
            _ => None,
        }
    }

    /// Largest valid rating
    pub fn max(&self) -> u32 {
        match self {
            RatingScale::Percent => 100,
            RatingScale::Decimal => 10,
        }
    }

    pub fn midpoint(&self) -> u32 {
        self.max() / 2
    }

    /// Ratings at or above this value count as "high" (inclusive)
    pub fn high_threshold(&self) -> u32 {
        match self {
            RatingScale::Percent => 50,
            RatingScale::Decimal => 7,
        }
    }

    /// Map a rating onto the 0-5 level used by the priority score
    pub fn level(&self, rating: u32) -> f64 {
        rating as f64 / (self.max() as f64 / 5.0)
    }

    /// Re-express a rating recorded on `from` on this scale, rounding to the
    /// nearest step and clamping to `[0, max]`
    pub fn convert(&self, rating: u32, from: RatingScale) -> u32 {
        let (to_max, from_max) = (self.max() as u64, from.max() as u64);
        let converted = (rating as u64 * to_max + from_max / 2) / from_max;
        converted.min(to_max) as u32
    }

    /// Quarter, half and three-quarter marks of the scale
    pub fn breakpoints(&self) -> [f64; 3] {
        let max = self.max() as f64;
        [max * 0.25, max * 0.5, max * 0.75]
    }
}
