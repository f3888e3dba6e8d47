// Priority score for a single task

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Task;
use crate::planner::RatingScale;

/// Components of a task's priority score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Priority rank (1-5) times two
    pub priority_part: f64,
    pub urgency_level: f64,
    pub importance_level: f64,
    pub deadline_factor: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.priority_part + self.urgency_level + self.importance_level + self.deadline_factor as f64
    }
}

/// Whole calendar days from `today` until `due` (negative when overdue)
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Deadline bonus: 3 when due within a day or overdue, 2 within three days,
/// 1 within a week, otherwise 0. A task without a readable due date gets 0.
pub fn deadline_factor(due: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match due.map(|d| days_until(d, today)) {
        Some(days) if days <= 1 => 3,
        Some(days) if days <= 3 => 2,
        Some(days) if days <= 7 => 1,
        _ => 0,
    }
}

pub fn score_breakdown(task: &Task, today: NaiveDate, scale: RatingScale) -> ScoreBreakdown {
    ScoreBreakdown {
        priority_part: (task.priority.rank() * 2) as f64,
        urgency_level: scale.level(task.urgency),
        importance_level: scale.level(task.importance),
        deadline_factor: deadline_factor(task.due_date, today),
    }
}

/// Calculate the priority score for a task
///
/// score = rank x 2 + urgency level + importance level + deadline factor,
/// where the levels map ratings onto 0-5. `today` is passed in so the
/// score only depends on its arguments. Ratings are not range-checked here.
pub fn priority_score(task: &Task, today: NaiveDate, scale: RatingScale) -> f64 {
    score_breakdown(task, today, scale).total()
}
