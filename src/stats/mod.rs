//! Stats module - dashboard aggregation over logged workouts
//!
//! Features:
//! - Dashboard summary (counts, minutes, per-type breakdown, recent slice)
//! - Weekly activity histogram for the progress view
//! - Derived metrics (calorie estimates, streak)

pub mod metrics;
pub mod weekly;

use serde::{Serialize, Serializer};

use crate::db::Workout;

/// How many trailing records the dashboard shows
const RECENT_LIMIT: usize = 10;

/// Per-type workout counts, kept in first-seen order so the serialized
/// map reads in the order workouts were traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounts(Vec<(String, u64)>);

impl TypeCounts {
    fn bump(&mut self, key: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.0.push((key.to_string(), 1)),
        }
    }

    pub fn count(&self, key: &str) -> u64 {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }
}

impl Serialize for TypeCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, count)| (key, count)))
    }
}

/// Dashboard summary over one user's workout list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_workouts: usize,
    pub total_duration: i64,
    pub by_type: TypeCounts,
    pub recent: Vec<Workout>,
}

/// Aggregate a workout list into the dashboard summary.
///
/// `recent` is the literal trailing slice of the input in the order
/// given, not a date sort. Callers wanting chronological recency must
/// pass records oldest-first ([`crate::db::Database::all_workouts`]
/// does); records with a missing duration count as zero minutes.
pub fn summarize(records: &[Workout]) -> DashboardSummary {
    let total_duration = records.iter().map(|w| w.duration.unwrap_or(0)).sum();

    let mut by_type = TypeCounts::default();
    for record in records {
        by_type.bump(record.workout_type.as_str());
    }

    let recent = records[records.len().saturating_sub(RECENT_LIMIT)..].to_vec();

    DashboardSummary {
        total_workouts: records.len(),
        total_duration,
        by_type,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Intensity, WorkoutType};

    fn record(workout_type: &str, duration: Option<i64>) -> Workout {
        Workout {
            id: None,
            date: None,
            workout_type: WorkoutType::from_key(workout_type),
            duration,
            intensity: Intensity::Medium,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_workouts, 0);
        assert_eq!(summary.total_duration, 0);
        assert_eq!(summary.by_type.total(), 0);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_malformed_durations_count_as_zero() {
        // A record whose duration arrived as junk deserializes to None
        let bad: Workout =
            serde_json::from_str(r#"{"type":"cardio","duration":"bad"}"#).unwrap();
        let records = vec![record("cardio", Some(20)), bad, record("strength", Some(30))];

        let summary = summarize(&records);
        assert_eq!(summary.total_workouts, 3);
        assert_eq!(summary.total_duration, 50);
        assert_eq!(summary.by_type.count("cardio"), 2);
        assert_eq!(summary.by_type.count("strength"), 1);
    }

    #[test]
    fn test_by_type_sums_to_total() {
        let records = vec![
            record("cardio", Some(10)),
            record("yoga", None),
            record("strength", Some(30)),
            record("cardio", Some(25)),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.by_type.total() as usize, summary.total_workouts);
        assert_eq!(summary.by_type.count("yoga"), 1);
    }

    #[test]
    fn test_by_type_serializes_in_first_seen_order() {
        let records = vec![
            record("cardio", Some(20)),
            record("cardio", Some(15)),
            record("strength", Some(30)),
        ];
        let json = serde_json::to_string(&summarize(&records).by_type).unwrap();
        assert_eq!(json, r#"{"cardio":2,"strength":1}"#);
    }

    #[test]
    fn test_recent_is_trailing_slice_in_given_order() {
        let records: Vec<Workout> = (0..12)
            .map(|i| record("cardio", Some(i)))
            .collect();
        let summary = summarize(&records);

        assert_eq!(summary.recent.len(), 10);
        // Positional slice: entries 2..12, order untouched
        let durations: Vec<i64> = summary.recent.iter().filter_map(|w| w.duration).collect();
        assert_eq!(durations, (2..12).collect::<Vec<i64>>());
    }

    #[test]
    fn test_recent_shorter_than_limit() {
        let records = vec![record("cardio", Some(20)), record("flex", Some(10))];
        let summary = summarize(&records);
        assert_eq!(summary.recent.len(), 2);
    }
}
