//! Task prioritization and daily capacity planning
//!
//! Pure functions over already-validated tasks and mood records:
//! - [`priority_score`] ranks a task by priority, ratings and deadline
//! - [`quadrant`] / [`bucketize`] build the Eisenhower matrix
//! - [`daily_capacity`] turns mood and energy into a minute budget
//! - [`select_today`] / [`plan_for_day`] fill that budget greedily
//!
//! The current date is always a parameter; nothing here reads the clock
//! or touches storage.

pub mod scale;
pub mod score;
pub mod quadrant;
pub mod capacity;
pub mod select;

pub use scale::*;
pub use score::*;
pub use quadrant::*;
pub use capacity::*;
pub use select::*;
