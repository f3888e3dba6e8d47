use rusqlite::{Connection, Result};
use std::collections::HashMap;
use log::info;

/// Current database schema version
const CURRENT_VERSION: u32 = 4;

type Migration = fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>;

/// Migration system for managing database schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the database with the current schema
    /// This creates the schema_version table and applies all migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version = Self::get_version(conn)?;

        for version in (current_version + 1)..=CURRENT_VERSION {
            Self::apply_migration(conn, version)?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        if let Some(migration) = migrations.get(&version) {
            let tx = conn.unchecked_transaction()?;
            migration(&tx)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )?;
            tx.commit()?;
            info!("Applied schema migration v{}", version);
            Ok(())
        } else {
            Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            ))
        }
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, Migration> {
    let mut migrations: HashMap<u32, Migration> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations.insert(2, migration_v2);
    migrations.insert(3, migration_v3);
    migrations.insert(4, migration_v4);
    migrations
}

/// Migration v1: tasks and daily mood/energy check-ins
fn migration_v1(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY,
            uuid TEXT NOT NULL UNIQUE,
            course TEXT NOT NULL,
            title TEXT NOT NULL,
            due_date TEXT NOT NULL,
            minutes INTEGER NOT NULL CHECK(minutes > 0),
            kind TEXT NOT NULL,
            priority TEXT NOT NULL,
            urgency INTEGER NOT NULL,
            importance INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_ts INTEGER NOT NULL
        )",
        [],
    )?;
    // Note: due_date is an ISO calendar date (YYYY-MM-DD), no time of day

    tx.execute(
        "CREATE INDEX idx_tasks_completed ON tasks(completed)",
        [],
    )?;

    // One row per date; saving again overwrites
    tx.execute(
        "CREATE TABLE mood_energy (
            date TEXT PRIMARY KEY,
            mood INTEGER NOT NULL,
            energy INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Migration v2: completed focus sessions
fn migration_v2(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE focus_sessions (
            id INTEGER PRIMARY KEY,
            minutes INTEGER NOT NULL CHECK(minutes > 0),
            break_coins INTEGER NOT NULL,
            completed_ts INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE INDEX idx_focus_sessions_completed_ts ON focus_sessions(completed_ts)",
        [],
    )?;

    Ok(())
}

/// Migration v3: notes and their linked resources
fn migration_v3(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_ts INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE note_resources (
            id INTEGER PRIMARY KEY,
            note_id INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            url TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    tx.execute(
        "CREATE INDEX idx_note_resources_note_id ON note_resources(note_id)",
        [],
    )?;

    Ok(())
}

/// Migration v4: record the rating scale each task and check-in was entered on
fn migration_v4(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    // Rows written before v4 used the default percent scale
    tx.execute(
        "ALTER TABLE tasks ADD COLUMN scale TEXT NOT NULL DEFAULT 'percent'",
        [],
    )?;
    tx.execute(
        "ALTER TABLE mood_energy ADD COLUMN scale TEXT NOT NULL DEFAULT 'percent'",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        MigrationManager::initialize(&conn).unwrap();
        assert_eq!(MigrationManager::get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        MigrationManager::initialize(&conn).unwrap();
        MigrationManager::initialize(&conn).unwrap();

        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, CURRENT_VERSION);
    }

    #[test]
    fn test_v4_backfills_scale_on_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE schema_version (version INTEGER PRIMARY KEY)", []).unwrap();
        for version in 1..=3 {
            MigrationManager::apply_migration(&conn, version).unwrap();
        }
        conn.execute(
            "INSERT INTO mood_energy (date, mood, energy, modified_ts) VALUES ('2026-01-01', 70, 40, 0)",
            [],
        )
        .unwrap();

        MigrationManager::initialize(&conn).unwrap();
        let scale: String = conn
            .query_row("SELECT scale FROM mood_energy WHERE date = '2026-01-01'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(scale, "percent");
    }

    #[test]
    fn test_minutes_must_be_positive() {
        let conn = Connection::open_in_memory().unwrap();
        MigrationManager::initialize(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO tasks (uuid, course, title, due_date, minutes, kind, priority, urgency, importance, created_ts)
             VALUES ('u', 'c', 't', '2026-01-01', 0, 'homework', 'medium', 50, 50, 0)",
            [],
        );
        assert!(result.is_err());
    }
}
