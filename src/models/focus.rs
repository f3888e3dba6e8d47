use serde::{Deserialize, Serialize};

/// Focused minutes needed to earn one break coin
pub const MINUTES_PER_BREAK_COIN: u32 = 5;

/// Longest session that can be logged
pub const MAX_FOCUS_MINUTES: u32 = 24 * 60;

/// A completed Pomodoro focus session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Option<i64>,
    pub minutes: u32,
    pub completed_ts: i64,
    pub break_coins: u32,
}

impl FocusSession {
    pub fn new(minutes: u32, completed_ts: i64) -> Self {
        Self {
            id: None,
            minutes,
            completed_ts,
            break_coins: break_coins_for(minutes),
        }
    }
}

/// Coins awarded for a session: one per full five minutes
pub fn break_coins_for(minutes: u32) -> u32 {
    minutes / MINUTES_PER_BREAK_COIN
}
