// Core data models for StudyPulse
// These structs represent the domain entities

pub mod task;
pub mod mood;
pub mod focus;
pub mod note;

pub use task::*;
pub use mood::*;
pub use focus::*;
pub use note::*;
