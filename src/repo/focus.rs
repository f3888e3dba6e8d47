use rusqlite::Connection;
use crate::models::FocusSession;
use anyhow::{Context, Result};
use log::debug;

/// Focus session repository
pub struct FocusRepo;

impl FocusRepo {
    /// Record a completed session
    pub fn create(conn: &Connection, session: &FocusSession) -> Result<FocusSession> {
        conn.execute(
            "INSERT INTO focus_sessions (minutes, break_coins, completed_ts) VALUES (?1, ?2, ?3)",
            rusqlite::params![session.minutes, session.break_coins, session.completed_ts],
        )
        .context("Failed to record focus session")?;

        let id = conn.last_insert_rowid();
        debug!("Recorded focus session {}: {}m, {} coins", id, session.minutes, session.break_coins);
        Ok(FocusSession {
            id: Some(id),
            ..session.clone()
        })
    }

    /// All sessions, oldest first
    pub fn list_all(conn: &Connection) -> Result<Vec<FocusSession>> {
        let mut stmt = conn.prepare(
            "SELECT id, minutes, break_coins, completed_ts FROM focus_sessions ORDER BY completed_ts, id"
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FocusSession {
                id: Some(row.get(0)?),
                minutes: row.get(1)?,
                break_coins: row.get(2)?,
                completed_ts: row.get(3)?,
            })
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }

    /// Most recent sessions, newest first
    pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<FocusSession>> {
        let mut sessions = Self::list_all(conn)?;
        sessions.reverse();
        sessions.truncate(limit);
        Ok(sessions)
    }

    /// Break coin balance: the sum over all sessions
    pub fn total_coins(conn: &Connection) -> Result<u32> {
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(break_coins), 0) FROM focus_sessions",
            [],
            |row| row.get(0),
        )?;
        Ok(u32::try_from(total.max(0)).unwrap_or(u32::MAX))
    }
}
