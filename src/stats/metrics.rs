//! Derived metrics layered on top of the aggregates

use crate::catalog::Intensity;

/// Calorie estimate for the progress header: flat multiplier over the
/// total minutes trained, independent of intensity.
pub fn calories_burned(total_minutes: i64) -> i64 {
    (total_minutes as f64 * 1.2).round() as i64
}

/// Per-workout calorie estimate for the history list, keyed by
/// intensity. Intentionally a different formula from
/// [`calories_burned`]; the two views have always disagreed and are
/// kept that way.
pub fn workout_calories(minutes: i64, intensity: Intensity) -> i64 {
    let factor = match intensity {
        Intensity::Low => 4,
        Intensity::Medium => 6,
        Intensity::High => 8,
    };
    minutes * factor
}

/// Streak shown on the progress view. A placeholder: a flat 3 days
/// whenever anything is logged, not a consecutive-day computation.
pub fn streak_days(total_workouts: usize) -> i64 {
    if total_workouts > 0 { 3 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calories_burned_flat_multiplier() {
        assert_eq!(calories_burned(0), 0);
        assert_eq!(calories_burned(100), 120);
        // Rounds, not truncates
        assert_eq!(calories_burned(33), 40);
    }

    #[test]
    fn test_workout_calories_by_intensity() {
        assert_eq!(workout_calories(30, Intensity::Low), 120);
        assert_eq!(workout_calories(30, Intensity::Medium), 180);
        assert_eq!(workout_calories(30, Intensity::High), 240);
        assert_eq!(workout_calories(0, Intensity::High), 0);
    }

    #[test]
    fn test_two_calorie_formulas_differ() {
        // Same 60 minutes, different views, different numbers
        assert_eq!(calories_burned(60), 72);
        assert_eq!(workout_calories(60, Intensity::Medium), 360);
    }

    #[test]
    fn test_streak_placeholder() {
        assert_eq!(streak_days(0), 0);
        assert_eq!(streak_days(1), 3);
        assert_eq!(streak_days(50), 3);
    }
}
