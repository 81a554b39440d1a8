//! Weekly activity histogram for the progress view

use chrono::Datelike;

use crate::db::Workout;

/// Minutes credited to a workout logged without a usable duration
const FALLBACK_MINUTES: i64 = 15;

/// Sum workout minutes into seven weekday buckets, Monday first.
///
/// A record's date falls back to its creation timestamp; records with
/// neither are skipped. A zero or missing duration still counts as a
/// minimal [`FALLBACK_MINUTES`] session.
pub fn weekly_minutes(records: &[Workout]) -> [i64; 7] {
    let mut buckets = [0i64; 7];

    for record in records {
        let Some(date) = record.date.or(record.created_at) else {
            continue;
        };

        let bucket = date.weekday().num_days_from_monday() as usize;
        let minutes = record.duration.unwrap_or(0);
        buckets[bucket] += if minutes > 0 { minutes } else { FALLBACK_MINUTES };
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Intensity, WorkoutType};
    use chrono::{DateTime, Utc};

    fn record_on(date: Option<&str>, created: Option<&str>, duration: Option<i64>) -> Workout {
        let parse = |raw: &str| {
            DateTime::parse_from_rfc3339(raw)
                .unwrap()
                .with_timezone(&Utc)
        };
        Workout {
            id: None,
            date: date.map(parse),
            workout_type: WorkoutType::Cardio,
            duration,
            intensity: Intensity::Medium,
            notes: None,
            created_at: created.map(parse),
        }
    }

    #[test]
    fn test_empty_input_has_seven_buckets() {
        assert_eq!(weekly_minutes(&[]), [0; 7]);
    }

    #[test]
    fn test_monday_zero_duration_gets_fallback() {
        // 2024-01-01 is a Monday
        let records = vec![record_on(Some("2024-01-01T10:00:00Z"), None, Some(0))];
        let buckets = weekly_minutes(&records);
        assert_eq!(buckets[0], 15);
        assert_eq!(buckets[1..], [0; 6]);
    }

    #[test]
    fn test_sunday_lands_in_last_bucket() {
        // 2024-01-07 is a Sunday
        let records = vec![record_on(Some("2024-01-07T08:00:00Z"), None, Some(40))];
        let buckets = weekly_minutes(&records);
        assert_eq!(buckets[6], 40);
    }

    #[test]
    fn test_same_weekday_accumulates() {
        let records = vec![
            record_on(Some("2024-01-03T07:00:00Z"), None, Some(30)), // Wednesday
            record_on(Some("2024-01-10T19:00:00Z"), None, Some(25)), // Wednesday
        ];
        assert_eq!(weekly_minutes(&records)[2], 55);
    }

    #[test]
    fn test_created_at_fallback_and_dateless_skip() {
        let records = vec![
            // No date, creation timestamp on a Tuesday
            record_on(None, Some("2024-01-02T09:00:00Z"), Some(20)),
            // No date at all: skipped entirely
            record_on(None, None, Some(90)),
        ];
        let buckets = weekly_minutes(&records);
        assert_eq!(buckets[1], 20);
        assert_eq!(buckets.iter().sum::<i64>(), 20);
    }

    #[test]
    fn test_missing_duration_counts_as_fallback() {
        let records = vec![record_on(Some("2024-01-05T12:00:00Z"), None, None)]; // Friday
        assert_eq!(weekly_minutes(&records)[4], 15);
    }
}
