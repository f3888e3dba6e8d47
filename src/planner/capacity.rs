// Daily capacity from mood and energy

use crate::planner::RatingScale;

/// Minutes planned per day for each quarter of the mood/energy range
const CAPACITY_STEPS: [u32; 4] = [30, 60, 90, 120];

/// Map a mood/energy pair to the minutes of focused work to plan today
///
/// Step function on the mean of the two ratings: up to a quarter of the
/// scale gives 30 minutes, up to half 60, up to three quarters 90, above
/// that 120. Values outside the scale are not clamped.
pub fn daily_capacity(mood: u32, energy: u32, scale: RatingScale) -> u32 {
    let mean = (mood as f64 + energy as f64) / 2.0;
    CAPACITY_STEPS[step_index(mean, scale)]
}

/// Word and emoji describing a mood rating
pub fn mood_label(mood: u32, scale: RatingScale) -> (&'static str, &'static str) {
    match step_index(mood as f64, scale) {
        0 => ("😢", "Rough"),
        1 => ("😐", "Meh"),
        2 => ("🙂", "Okay"),
        _ => ("😄", "Great"),
    }
}

fn step_index(value: f64, scale: RatingScale) -> usize {
    scale
        .breakpoints()
        .iter()
        .position(|&bound| value <= bound)
        .unwrap_or(CAPACITY_STEPS.len() - 1)
}
