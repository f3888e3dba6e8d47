// Greedy selection of today's tasks

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::models::{MoodEnergy, Task};
use crate::planner::{bucketize, daily_capacity, priority_score, RatingScale};

/// Minutes a plan may run past capacity by default
pub const DEFAULT_OVERFLOW_MINUTES: u32 = 15;

/// Upper bound accepted for a configured overflow allowance
pub const MAX_OVERFLOW_MINUTES: u32 = 24 * 60;

/// Knobs for the planner that come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSettings {
    pub scale: RatingScale,
    pub overflow_minutes: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            scale: RatingScale::Percent,
            overflow_minutes: DEFAULT_OVERFLOW_MINUTES,
        }
    }
}

/// Pick today's tasks
///
/// Walks the quadrants in order Q1, Q2, Q3, Q4, each sorted by descending
/// priority score (stable, so equal scores keep input order). A task is
/// accepted while `total + minutes <= capacity + overflow`; once the running
/// total reaches capacity the scan stops, later quadrants included.
/// Completed tasks never appear.
pub fn select_today<'a>(
    tasks: &'a [Task],
    capacity: u32,
    today: NaiveDate,
    settings: PlanSettings,
) -> Vec<&'a Task> {
    let buckets = bucketize(tasks, settings.scale);
    let limit = capacity.saturating_add(settings.overflow_minutes);

    let mut selected = Vec::new();
    let mut total_minutes = 0u32;

    for (quadrant, bucket) in buckets.iter() {
        let mut scored: Vec<(f64, &Task)> = bucket
            .iter()
            .map(|task| (priority_score(task, today, settings.scale), *task))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for (score, task) in scored {
            let candidate_total = total_minutes.saturating_add(task.minutes);
            if candidate_total > limit {
                debug!(
                    "Skipping '{}' ({}m, {}): {}m would exceed limit {}m",
                    task.title,
                    task.minutes,
                    quadrant.code(),
                    candidate_total,
                    limit
                );
                continue;
            }
            selected.push(task);
            total_minutes = candidate_total;
            debug!(
                "Selected '{}' ({}m, {}, score {:.2}), total {}m of {}m",
                task.title,
                task.minutes,
                quadrant.code(),
                score,
                total_minutes,
                capacity
            );
            if total_minutes >= capacity {
                return selected;
            }
        }
    }

    selected
}

/// Today's plan as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct DailyPlan<'a> {
    pub date: NaiveDate,
    pub mood: u32,
    pub energy: u32,
    pub capacity_minutes: u32,
    pub scheduled_minutes: u32,
    pub tasks: Vec<&'a Task>,
}

/// Size today's capacity from the mood check-in and fill it
pub fn plan_for_day<'a>(
    tasks: &'a [Task],
    mood_energy: &MoodEnergy,
    today: NaiveDate,
    settings: PlanSettings,
) -> DailyPlan<'a> {
    let capacity = daily_capacity(mood_energy.mood, mood_energy.energy, settings.scale);
    let selected = select_today(tasks, capacity, today, settings);
    let scheduled_minutes = selected
        .iter()
        .fold(0u32, |total, t| total.saturating_add(t.minutes));

    DailyPlan {
        date: today,
        mood: mood_energy.mood,
        energy: mood_energy.energy,
        capacity_minutes: capacity,
        scheduled_minutes,
        tasks: selected,
    }
}
