use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::task::{validate_rating, ValidationError};
use crate::planner::RatingScale;

/// Mood/energy check-in for one calendar date
/// At most one record exists per date; saving again overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEnergy {
    pub date: NaiveDate,
    pub mood: u32,
    pub energy: u32,
}

impl MoodEnergy {
    pub fn new(date: NaiveDate, mood: u32, energy: u32) -> Self {
        Self { date, mood, energy }
    }

    /// Midpoint record used when nothing was logged for the date
    pub fn neutral(date: NaiveDate, scale: RatingScale) -> Self {
        Self::new(date, scale.midpoint(), scale.midpoint())
    }

    pub fn validate(&self, scale: RatingScale) -> Result<(), ValidationError> {
        validate_rating("mood", self.mood, scale)?;
        validate_rating("energy", self.energy, scale)
    }
}
