use rusqlite::{Connection, OptionalExtension};
use crate::models::{Note, Resource};
use anyhow::{Context, Result};
use log::debug;

/// Note repository; resources are stored alongside their note
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note together with its resources
    pub fn create(conn: &Connection, note: &Note) -> Result<Note> {
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (title, content, created_ts, modified_ts) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![note.title, note.content, note.created_ts, note.modified_ts],
        )
        .with_context(|| format!("Failed to create note: {}", note.title))?;
        let id = tx.last_insert_rowid();

        let mut resources = Vec::with_capacity(note.resources.len());
        for resource in &note.resources {
            resources.push(Self::insert_resource(&tx, id, &resource.url, &resource.note)?);
        }
        tx.commit()?;

        debug!("Created note {} with {} resources", id, resources.len());
        Ok(Note {
            id: Some(id),
            resources,
            ..note.clone()
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Note>> {
        let note = conn
            .query_row(
                "SELECT id, title, content, created_ts, modified_ts FROM notes WHERE id = ?1",
                [id],
                |row| {
                    Ok(Note {
                        id: Some(row.get(0)?),
                        title: row.get(1)?,
                        content: row.get(2)?,
                        resources: Vec::new(),
                        created_ts: row.get(3)?,
                        modified_ts: row.get(4)?,
                    })
                },
            )
            .optional()?;

        match note {
            Some(mut note) => {
                note.resources = Self::get_resources(conn, id)?;
                Ok(Some(note))
            }
            None => Ok(None),
        }
    }

    /// All notes in creation order, with resources
    pub fn list_all(conn: &Connection) -> Result<Vec<Note>> {
        let mut stmt = conn.prepare("SELECT id FROM notes ORDER BY id")?;
        let ids = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut notes = Vec::new();
        for id in ids {
            if let Some(note) = Self::get_by_id(conn, id?)? {
                notes.push(note);
            }
        }
        Ok(notes)
    }

    /// Change title and/or content, bumping the modified timestamp
    pub fn update(conn: &Connection, id: i64, title: Option<&str>, content: Option<&str>) -> Result<Option<Note>> {
        let Some(existing) = Self::get_by_id(conn, id)? else {
            return Ok(None);
        };
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, modified_ts = ?3 WHERE id = ?4",
            rusqlite::params![
                title.unwrap_or(existing.title.as_str()),
                content.unwrap_or(existing.content.as_str()),
                now,
                id
            ],
        )
        .with_context(|| format!("Failed to update note {}", id))?;
        Self::get_by_id(conn, id)
    }

    /// Attach a resource link to an existing note
    pub fn add_resource(conn: &Connection, note_id: i64, url: &str, note: &str) -> Result<Resource> {
        let tx = conn.unchecked_transaction()?;
        let resource = Self::insert_resource(&tx, note_id, url, note)?;
        tx.execute(
            "UPDATE notes SET modified_ts = ?1 WHERE id = ?2",
            rusqlite::params![chrono::Utc::now().timestamp(), note_id],
        )?;
        tx.commit()?;
        Ok(resource)
    }

    /// Delete a note; its resources go with it
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", [id])
            .with_context(|| format!("Failed to delete note {}", id))?;
        Ok(deleted > 0)
    }

    fn insert_resource(conn: &Connection, note_id: i64, url: &str, note: &str) -> Result<Resource> {
        conn.execute(
            "INSERT INTO note_resources (note_id, url, note) VALUES (?1, ?2, ?3)",
            rusqlite::params![note_id, url, note],
        )
        .with_context(|| format!("Failed to attach resource to note {}", note_id))?;
        Ok(Resource {
            id: Some(conn.last_insert_rowid()),
            url: url.to_string(),
            note: note.to_string(),
        })
    }

    fn get_resources(conn: &Connection, note_id: i64) -> Result<Vec<Resource>> {
        let mut stmt = conn.prepare(
            "SELECT id, url, note FROM note_resources WHERE note_id = ?1 ORDER BY id"
        )?;
        let rows = stmt.query_map([note_id], |row| {
            Ok(Resource {
                id: Some(row.get(0)?),
                url: row.get(1)?,
                note: row.get(2)?,
            })
        })?;

        let mut resources = Vec::new();
        for row in rows {
            resources.push(row?);
        }
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    fn note_with_link() -> Note {
        let mut note = Note::new("Cell biology".to_string(), "Mitosis phases".to_string());
        note.resources.push(Resource {
            id: None,
            url: "https://example.org/mitosis".to_string(),
            note: "diagram".to_string(),
        });
        note
    }

    #[test]
    fn test_create_with_resources() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let created = NoteRepo::create(&conn, &note_with_link()).unwrap();
        let loaded = NoteRepo::get_by_id(&conn, created.id.unwrap()).unwrap().unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.resources.len(), 1);
        assert_eq!(loaded.resources[0].note, "diagram");
    }

    #[test]
    fn test_update_keeps_unchanged_fields() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let id = NoteRepo::create(&conn, &note_with_link()).unwrap().id.unwrap();

        let updated = NoteRepo::update(&conn, id, Some("Genetics"), None).unwrap().unwrap();
        assert_eq!(updated.title, "Genetics");
        assert_eq!(updated.content, "Mitosis phases");
        assert!(NoteRepo::update(&conn, id + 1, Some("x"), None).unwrap().is_none());
    }

    #[test]
    fn test_add_resource() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let id = NoteRepo::create(&conn, &Note::new("Essay".to_string(), String::new())).unwrap().id.unwrap();

        NoteRepo::add_resource(&conn, id, "https://example.org/style", "").unwrap();
        let note = NoteRepo::get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(note.resources.len(), 1);
        assert!(NoteRepo::add_resource(&conn, id + 5, "https://example.org", "").is_err());
    }

    #[test]
    fn test_delete_cascades_resources() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let id = NoteRepo::create(&conn, &note_with_link()).unwrap().id.unwrap();

        assert!(NoteRepo::delete(&conn, id).unwrap());
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM note_resources", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(NoteRepo::list_all(&conn).unwrap().is_empty());
    }
}
