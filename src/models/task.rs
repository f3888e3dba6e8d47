use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planner::RatingScale;

/// Default effort estimate for a new task, in minutes
pub const DEFAULT_TASK_MINUTES: u32 = 60;

/// Largest effort estimate a single task may carry (one full day)
pub const MAX_TASK_MINUTES: u32 = 24 * 60;

/// Ordinal priority label chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::VeryLow,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Integer rank 1-5 (Very Low = 1 ... Critical = 5)
    pub fn rank(&self) -> u32 {
        match self {
            Priority::VeryLow => 1,
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 4,
            Priority::Critical => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::VeryLow => "very-low",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::VeryLow => "Very Low",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Accepts the storage form ("very-low") and the display form ("Very Low"),
    /// case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "very-low" | "verylow" => Some(Priority::VeryLow),
            "low" => Some(Priority::Low),
            "medium" | "med" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

/// Kind of coursework; descriptive only, never used in scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Homework,
    Quiz,
    Test,
    Project,
    Other,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Homework,
        TaskKind::Quiz,
        TaskKind::Test,
        TaskKind::Project,
        TaskKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Homework => "homework",
            TaskKind::Quiz => "quiz",
            TaskKind::Test => "test",
            TaskKind::Project => "project",
            TaskKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "homework" | "hw" => Some(TaskKind::Homework),
            "quiz" => Some(TaskKind::Quiz),
            "test" | "exam" => Some(TaskKind::Test),
            "project" => Some(TaskKind::Project),
            "other" => Some(TaskKind::Other),
            _ => None,
        }
    }
}

/// Task model
///
/// `uuid` is the stable identity; `id` is the local row number the CLI uses
/// to address a task. A `due_date` of `None` means the stored date could not
/// be read, which earns no deadline bonus when scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub uuid: String,
    pub course: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub minutes: u32,
    pub kind: TaskKind,
    pub priority: Priority,
    pub urgency: u32,
    pub importance: u32,
    pub completed: bool,
    pub created_ts: i64,
}

impl Task {
    /// Create a new task with form defaults for everything but the labels,
    /// due date and estimate
    pub fn new(course: String, title: String, due_date: NaiveDate, minutes: u32) -> Self {
        Self {
            id: None,
            uuid: uuid::Uuid::new_v4().to_string(),
            course,
            title,
            due_date: Some(due_date),
            minutes,
            kind: TaskKind::Homework,
            priority: Priority::Medium,
            urgency: 50,
            importance: 50,
            completed: false,
            created_ts: chrono::Utc::now().timestamp(),
        }
    }
}

/// Reasons user input for a task or mood record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{field} must be between 0 and {max} (got {value})")]
    RatingOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("minutes must be greater than 0")]
    NonPositiveMinutes,
    #[error("minutes must be at most {max} (got {value})")]
    MinutesTooLarge { value: u32, max: u32 },
}

/// Unvalidated task fields as collected from the command line
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub course: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub minutes: u32,
    pub kind: TaskKind,
    pub priority: Priority,
    pub urgency: u32,
    pub importance: u32,
}

impl TaskDraft {
    /// A draft carrying the form defaults for the given scale
    pub fn new(course: &str, title: &str, due_date: NaiveDate, scale: RatingScale) -> Self {
        Self {
            course: course.to_string(),
            title: title.to_string(),
            due_date,
            minutes: DEFAULT_TASK_MINUTES,
            kind: TaskKind::Homework,
            priority: Priority::Medium,
            urgency: scale.midpoint(),
            importance: scale.midpoint(),
        }
    }

    pub fn validate(&self, scale: RatingScale) -> Result<(), ValidationError> {
        if self.course.trim().is_empty() {
            return Err(ValidationError::EmptyField("course"));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if self.minutes == 0 {
            return Err(ValidationError::NonPositiveMinutes);
        }
        if self.minutes > MAX_TASK_MINUTES {
            return Err(ValidationError::MinutesTooLarge {
                value: self.minutes,
                max: MAX_TASK_MINUTES,
            });
        }
        validate_rating("urgency", self.urgency, scale)?;
        validate_rating("importance", self.importance, scale)?;
        Ok(())
    }

    /// Validate and turn the draft into a fresh task
    pub fn into_task(self, scale: RatingScale) -> Result<Task, ValidationError> {
        self.validate(scale)?;
        let mut task = Task::new(
            self.course.trim().to_string(),
            self.title.trim().to_string(),
            self.due_date,
            self.minutes,
        );
        task.kind = self.kind;
        task.priority = self.priority;
        task.urgency = self.urgency;
        task.importance = self.importance;
        Ok(task)
    }
}

/// Check a user rating against the active scale
pub fn validate_rating(field: &'static str, value: u32, scale: RatingScale) -> Result<(), ValidationError> {
    if value > scale.max() {
        Err(ValidationError::RatingOutOfRange {
            field,
            value,
            max: scale.max(),
        })
    } else {
        Ok(())
    }
}
