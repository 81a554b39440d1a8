//! Database module - SQLite storage for workout records and the user profile

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Intensity, WorkoutType};

/// Logged workout record.
///
/// Serde is deliberately lenient: a non-numeric duration or unknown
/// intensity degrades to the field default instead of rejecting the
/// whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type", default)]
    pub workout_type: WorkoutType,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "catalog::lenient_intensity")]
    pub intensity: Intensity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Serde helper: numeric minutes or nothing; strings and other junk
/// count as absent.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(minutes)) => Some(minutes),
        Some(Raw::Float(minutes)) => Some(minutes as i64),
        _ => None,
    })
}

/// Serde helper: a parseable timestamp or nothing
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Date(DateTime<Utc>),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Date(date)) => Some(date),
        _ => None,
    })
}

/// Optional history filters, applied here before anything aggregates
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    pub workout_type: Option<WorkoutType>,
    pub intensity: Option<Intensity>,
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
}

impl WorkoutFilter {
    pub fn matches(&self, workout: &Workout) -> bool {
        if let Some(workout_type) = &self.workout_type
            && workout.workout_type != *workout_type
        {
            return false;
        }

        if let Some(intensity) = self.intensity
            && workout.intensity != intensity
        {
            return false;
        }

        if self.min_duration.is_some() || self.max_duration.is_some() {
            // Records without a duration never match a duration bound
            let Some(duration) = workout.duration else {
                return false;
            };
            if self.min_duration.is_some_and(|min| duration < min) {
                return false;
            }
            if self.max_duration.is_some_and(|max| duration > max) {
                return false;
            }
        }

        true
    }
}

/// User profile, one row per database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub experience: String,
    pub fitness_goal: String,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                type TEXT NOT NULL DEFAULT 'mixed',
                duration INTEGER,
                intensity TEXT NOT NULL DEFAULT 'medium',
                notes TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS profile (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                name TEXT NOT NULL DEFAULT '',
                age TEXT NOT NULL DEFAULT '',
                weight TEXT NOT NULL DEFAULT '',
                height TEXT NOT NULL DEFAULT '',
                experience TEXT NOT NULL DEFAULT '',
                fitness_goal TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        // Migration: add created_at column if missing
        let has_created_at = self
            .conn
            .prepare("SELECT created_at FROM workouts LIMIT 1")
            .is_ok();
        if !has_created_at {
            let _ = self
                .conn
                .execute("ALTER TABLE workouts ADD COLUMN created_at TEXT", []);
        }

        Ok(())
    }

    /// Add new workout record. A record logged without a date gets the
    /// current time, like the old schema default.
    pub fn add_workout(&self, workout: &Workout) -> Result<i64> {
        let date = workout.date.unwrap_or_else(Utc::now);
        self.conn.execute(
            "INSERT INTO workouts (date, type, duration, intensity, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                date.to_rfc3339(),
                workout.workout_type.as_str(),
                workout.duration,
                workout.intensity.as_str(),
                workout.notes,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All workouts in insertion order. The dashboard's "recent" slice
    /// is positional, so this order is what makes it mean "last logged".
    pub fn all_workouts(&self) -> Result<Vec<Workout>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, type, duration, intensity, notes, created_at
             FROM workouts ORDER BY id",
        )?;
        let workouts = stmt
            .query_map([], row_to_workout)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(workouts)
    }

    /// Workouts newest-first with the optional history filters applied
    pub fn list_workouts(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, type, duration, intensity, notes, created_at
             FROM workouts ORDER BY date DESC",
        )?;
        let workouts = stmt
            .query_map([], row_to_workout)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|w| filter.matches(w))
            .collect();
        Ok(workouts)
    }

    /// Stored profile, or the empty defaults if none was saved yet
    pub fn profile(&self) -> Result<Profile> {
        let profile = self
            .conn
            .query_row(
                "SELECT name, age, weight, height, experience, fitness_goal
                 FROM profile WHERE id = 1",
                [],
                |row| {
                    Ok(Profile {
                        name: row.get(0)?,
                        age: row.get(1)?,
                        weight: row.get(2)?,
                        height: row.get(3)?,
                        experience: row.get(4)?,
                        fitness_goal: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(profile.unwrap_or_default())
    }

    /// Save (upsert) the profile row
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO profile (id, name, age, weight, height, experience, fitness_goal)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                weight = excluded.weight,
                height = excluded.height,
                experience = excluded.experience,
                fitness_goal = excluded.fitness_goal",
            params![
                profile.name,
                profile.age,
                profile.weight,
                profile.height,
                profile.experience,
                profile.fitness_goal,
            ],
        )?;
        Ok(())
    }
}

fn row_to_workout(row: &rusqlite::Row<'_>) -> rusqlite::Result<Workout> {
    let date_str: Option<String> = row.get(1)?;
    let type_str: String = row.get(2)?;
    let intensity_str: String = row.get(4)?;
    let created_str: Option<String> = row.get(6)?;

    let parse_date = |raw: Option<String>| {
        raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|d| d.with_timezone(&Utc))
    };

    Ok(Workout {
        id: Some(row.get(0)?),
        date: parse_date(date_str),
        workout_type: WorkoutType::from_key(&type_str),
        duration: row.get(3)?,
        intensity: Intensity::from_key(&intensity_str),
        notes: row.get(5)?,
        created_at: parse_date(created_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db() -> Database {
        Database::open(":memory:").unwrap()
    }

    fn workout(workout_type: &str, duration: i64, intensity: Intensity) -> Workout {
        Workout {
            id: None,
            date: Some(Utc::now()),
            workout_type: WorkoutType::from_key(workout_type),
            duration: Some(duration),
            intensity,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_add_and_list_roundtrip() {
        let db = open_test_db();
        let id = db.add_workout(&workout("cardio", 20, Intensity::Medium)).unwrap();
        assert!(id > 0);

        let all = db.all_workouts().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].workout_type, WorkoutType::Cardio);
        assert_eq!(all[0].duration, Some(20));
        assert!(all[0].date.is_some());
        assert!(all[0].created_at.is_some());
    }

    #[test]
    fn test_all_workouts_keeps_insertion_order() {
        let db = open_test_db();
        let mut early = workout("cardio", 20, Intensity::Low);
        early.date = Some(Utc::now() - chrono::Duration::days(3));
        // Backdated record logged first
        db.add_workout(&early).unwrap();
        db.add_workout(&workout("strength", 30, Intensity::High)).unwrap();

        let all = db.all_workouts().unwrap();
        assert_eq!(all[0].workout_type, WorkoutType::Cardio);
        assert_eq!(all[1].workout_type, WorkoutType::Strength);

        // The history listing re-sorts newest first
        let listed = db.list_workouts(&WorkoutFilter::default()).unwrap();
        assert_eq!(listed[0].workout_type, WorkoutType::Strength);
        assert_eq!(listed[1].workout_type, WorkoutType::Cardio);
    }

    #[test]
    fn test_list_filters() {
        let db = open_test_db();
        db.add_workout(&workout("cardio", 20, Intensity::Low)).unwrap();
        db.add_workout(&workout("cardio", 45, Intensity::High)).unwrap();
        db.add_workout(&workout("strength", 30, Intensity::High)).unwrap();

        let by_type = db
            .list_workouts(&WorkoutFilter {
                workout_type: Some(WorkoutType::Cardio),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_type.len(), 2);

        let by_intensity = db
            .list_workouts(&WorkoutFilter {
                intensity: Some(Intensity::High),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_intensity.len(), 2);

        let by_duration = db
            .list_workouts(&WorkoutFilter {
                min_duration: Some(25),
                max_duration: Some(40),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_duration.len(), 1);
        assert_eq!(by_duration[0].workout_type, WorkoutType::Strength);
    }

    #[test]
    fn test_duration_bounds_exclude_missing_duration() {
        let filter = WorkoutFilter {
            min_duration: Some(10),
            ..Default::default()
        };
        let mut record = workout("cardio", 20, Intensity::Medium);
        record.duration = None;
        assert!(!filter.matches(&record));
        assert!(WorkoutFilter::default().matches(&record));
    }

    #[test]
    fn test_unknown_type_survives_storage() {
        let db = open_test_db();
        db.add_workout(&workout("yoga", 60, Intensity::Low)).unwrap();
        let all = db.all_workouts().unwrap();
        assert_eq!(all[0].workout_type, WorkoutType::Other("yoga".to_string()));
    }

    #[test]
    fn test_workout_deserializes_leniently() {
        let record: Workout = serde_json::from_str(
            r#"{"type":"cardio","duration":"bad","intensity":"extreme","date":"not a date"}"#,
        )
        .unwrap();
        assert_eq!(record.workout_type, WorkoutType::Cardio);
        assert_eq!(record.duration, None);
        assert_eq!(record.intensity, Intensity::Medium);
        assert_eq!(record.date, None);
    }

    #[test]
    fn test_profile_defaults_then_roundtrip() {
        let db = open_test_db();
        assert_eq!(db.profile().unwrap().name, "");

        let profile = Profile {
            name: "Alex".to_string(),
            fitness_goal: "strength".to_string(),
            ..Default::default()
        };
        db.save_profile(&profile).unwrap();
        db.save_profile(&profile).unwrap(); // upsert, not duplicate

        let stored = db.profile().unwrap();
        assert_eq!(stored.name, "Alex");
        assert_eq!(stored.fitness_goal, "strength");
    }
}
