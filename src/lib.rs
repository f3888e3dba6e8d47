//! StudyPulse - task prioritization and daily capacity planning for students
//!
//! This library provides the core functionality for StudyPulse, including:
//! - Priority scoring, Eisenhower quadrants and daily task selection
//! - Capacity estimation from mood and energy check-ins
//! - Data models for tasks, check-ins, focus sessions and notes
//! - Database operations, migrations and repositories
//! - Configuration loading
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```no_run
//! use studypulse::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod planner;
pub mod repo;
pub mod cli;
pub mod utils;
