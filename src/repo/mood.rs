use rusqlite::{Connection, OptionalExtension};
use chrono::NaiveDate;
use crate::models::MoodEnergy;
use crate::planner::RatingScale;
use anyhow::{Context, Result};
use log::{debug, warn};

/// Mood/energy repository, keyed by calendar date
pub struct MoodRepo;

impl MoodRepo {
    /// Insert or overwrite the record for its date, remembering the scale it
    /// was entered on
    pub fn save(conn: &Connection, record: &MoodEnergy, scale: RatingScale) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO mood_energy (date, mood, energy, modified_ts, scale) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                mood = excluded.mood,
                energy = excluded.energy,
                modified_ts = excluded.modified_ts,
                scale = excluded.scale",
            rusqlite::params![date_key(record.date), record.mood, record.energy, now, scale.as_str()],
        )
        .with_context(|| format!("Failed to save mood for {}", record.date))?;
        debug!("Saved mood {} / energy {} for {}", record.mood, record.energy, record.date);
        Ok(())
    }

    /// The record for `date` expressed on `scale`
    pub fn get(conn: &Connection, date: NaiveDate, scale: RatingScale) -> Result<Option<MoodEnergy>> {
        let stored = conn
            .query_row(
                "SELECT mood, energy, scale FROM mood_energy WHERE date = ?1",
                [date_key(date)],
                |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?, row.get::<_, String>(2)?)),
            )
            .optional()?;

        Ok(stored.map(|(mood, energy, scale_raw)| {
            let stored_scale = RatingScale::from_str(&scale_raw).unwrap_or_else(|| {
                warn!("Mood for {} has unknown rating scale '{}'; assuming {}", date, scale_raw, scale.as_str());
                scale
            });
            if mood > stored_scale.max() || energy > stored_scale.max() {
                warn!("Mood for {} is outside 0-{}; clamping", date, stored_scale.max());
            }
            MoodEnergy::new(date, scale.convert(mood, stored_scale), scale.convert(energy, stored_scale))
        }))
    }

    /// The record for `date`, or the neutral midpoint when none was saved
    pub fn get_or_neutral(conn: &Connection, date: NaiveDate, scale: RatingScale) -> Result<MoodEnergy> {
        Ok(Self::get(conn, date, scale)?.unwrap_or_else(|| MoodEnergy::neutral(date, scale)))
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
