use rusqlite::{Connection, OptionalExtension, Row};
use crate::models::{Priority, Task, TaskKind};
use crate::planner::RatingScale;
use crate::utils::parse_stored_date;
use anyhow::{Context, Result};
use log::{debug, warn};

const TASK_COLUMNS: &str = "id, uuid, course, title, due_date, minutes, kind, priority, \
                            urgency, importance, completed, created_ts, scale";

/// Task repository for database operations
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task and return it with its row id
    ///
    /// Ratings are stored as entered together with the scale they were
    /// entered on; loads convert them to whichever scale is active then.
    pub fn create(conn: &Connection, task: &Task, scale: RatingScale) -> Result<Task> {
        let due_date = task.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| anyhow::anyhow!("Task '{}' has no due date", task.title))?;

        conn.execute(
            "INSERT INTO tasks (uuid, course, title, due_date, minutes, kind, priority,
                    urgency, importance, completed, created_ts, scale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                task.uuid,
                task.course,
                task.title,
                due_date,
                task.minutes,
                task.kind.as_str(),
                task.priority.as_str(),
                task.urgency,
                task.importance,
                task.completed,
                task.created_ts,
                scale.as_str(),
            ],
        )
        .with_context(|| format!("Failed to create task: {}", task.title))?;

        let id = conn.last_insert_rowid();
        debug!("Created task {} ({})", id, task.uuid);

        Ok(Task {
            id: Some(id),
            ..task.clone()
        })
    }

    /// Get task by ID
    pub fn get_by_id(conn: &Connection, id: i64, scale: RatingScale) -> Result<Option<Task>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS))?;
        let task = stmt.query_row([id], |row| Self::from_row(row, scale)).optional()?;
        Ok(task)
    }

    /// List all tasks in creation order
    pub fn list_all(conn: &Connection, scale: RatingScale) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM tasks ORDER BY id", TASK_COLUMNS))?;
        let rows = stmt.query_map([], |row| Self::from_row(row, scale))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    /// Flip the completed flag, returning the updated task
    pub fn toggle_completed(conn: &Connection, id: i64, scale: RatingScale) -> Result<Option<Task>> {
        let updated = conn.execute(
            "UPDATE tasks SET completed = NOT completed WHERE id = ?1",
            [id],
        )
        .with_context(|| format!("Failed to update task {}", id))?;

        if updated == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id, scale)
    }

    /// Permanently delete a task; returns false if it did not exist
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])
            .with_context(|| format!("Failed to delete task {}", id))?;
        Ok(deleted > 0)
    }

    fn from_row(row: &Row, scale: RatingScale) -> rusqlite::Result<Task> {
        let id: i64 = row.get(0)?;
        let uuid: String = row.get(1)?;

        let due_raw: String = row.get(4)?;
        let due_date = parse_stored_date(&due_raw);
        if due_date.is_none() {
            warn!("Task {} has unreadable due date '{}'; no deadline bonus applied", id, due_raw);
        }

        let kind_raw: String = row.get(6)?;
        let kind = TaskKind::from_str(&kind_raw).unwrap_or_else(|| {
            warn!("Task {} has unknown type '{}'", id, kind_raw);
            TaskKind::Other
        });

        let priority_raw: String = row.get(7)?;
        let priority = Priority::from_str(&priority_raw).unwrap_or_else(|| {
            warn!("Task {} has unknown priority '{}'", id, priority_raw);
            Priority::Medium
        });

        let scale_raw: String = row.get(12)?;
        let stored_scale = RatingScale::from_str(&scale_raw).unwrap_or_else(|| {
            warn!("Task {} has unknown rating scale '{}'; assuming {}", id, scale_raw, scale.as_str());
            scale
        });
        let urgency = load_rating(id, "urgency", row.get(8)?, stored_scale, scale);
        let importance = load_rating(id, "importance", row.get(9)?, stored_scale, scale);

        Ok(Task {
            id: Some(id),
            uuid,
            course: row.get(2)?,
            title: row.get(3)?,
            due_date,
            minutes: row.get(5)?,
            kind,
            priority,
            urgency,
            importance,
            completed: row.get(10)?,
            created_ts: row.get(11)?,
        })
    }
}

/// Convert a stored rating to the active scale, clamping values that were
/// out of range for the scale they were stored on
fn load_rating(id: i64, field: &str, value: u32, stored: RatingScale, active: RatingScale) -> u32 {
    if value > stored.max() {
        warn!(
            "Task {} has {} {} above the {} maximum {}; clamping",
            id, field, value, stored.as_str(), stored.max()
        );
    }
    let converted = active.convert(value, stored);
    if stored != active {
        debug!(
            "Task {} {} {} ({}) read as {} ({})",
            id, field, value, stored.as_str(), converted, active.as_str()
        );
    }
    converted
}
