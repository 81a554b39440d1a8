//! Exercise catalog - static exercise pools keyed by workout type

use serde::{Deserialize, Serialize};

/// Workout type. Known types are a closed set; anything else arriving
/// from outside (API input, old records) is carried as its literal
/// string and gets an empty exercise pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Hiit,
    Flex,
    Mixed,
    #[serde(untagged)]
    Other(String),
}

impl Default for WorkoutType {
    fn default() -> Self {
        WorkoutType::Mixed
    }
}

impl WorkoutType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Cardio => "cardio",
            WorkoutType::Hiit => "hiit",
            WorkoutType::Flex => "flex",
            WorkoutType::Mixed => "mixed",
            WorkoutType::Other(key) => key,
        }
    }

    /// Map a raw key to a workout type. Unknown keys are preserved
    /// as-is rather than rejected.
    pub fn from_key(key: &str) -> Self {
        match key {
            "strength" => WorkoutType::Strength,
            "cardio" => WorkoutType::Cardio,
            "hiit" => WorkoutType::Hiit,
            "flex" => WorkoutType::Flex,
            "mixed" => WorkoutType::Mixed,
            other => WorkoutType::Other(other.to_string()),
        }
    }

    /// Known types with a non-empty exercise pool
    pub fn all() -> &'static [WorkoutType] {
        &[
            WorkoutType::Strength,
            WorkoutType::Cardio,
            WorkoutType::Hiit,
            WorkoutType::Flex,
        ]
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training intensity. Anything outside the three known levels
/// coerces to medium, the schema default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "low" => Intensity::Low,
            "high" => Intensity::High,
            _ => Intensity::Medium,
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde helper: accept whatever sits where an intensity is expected,
/// coercing unknown or malformed input to the default instead of erroring.
pub(crate) fn lenient_intensity<'de, D>(deserializer: D) -> Result<Intensity, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Key(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Key(key) => Intensity::from_key(&key),
        Raw::Other(_) => Intensity::default(),
    })
}

pub const STRENGTH_POOL: &[&str] = &[
    "Squats",
    "Deadlifts",
    "Bench Press",
    "Overhead Press",
    "Rows",
];

pub const CARDIO_POOL: &[&str] = &[
    "Running",
    "Cycling",
    "Rowing Machine",
    "Jump Rope",
    "Elliptical",
];

pub const HIIT_POOL: &[&str] = &[
    "Burpees",
    "Mountain Climbers",
    "Jump Squats",
    "High Knees",
    "Plank Jacks",
];

pub const FLEX_POOL: &[&str] = &[
    "Hamstring Stretch",
    "Hip Flexor Stretch",
    "Cat-Cow",
    "Child's Pose",
    "Shoulder Mobility",
];

/// Ordered exercise pool for a workout type. Mixed and unrecognized
/// types have no pool; callers must tolerate the empty slice.
pub fn exercise_pool(workout_type: &WorkoutType) -> &'static [&'static str] {
    match workout_type {
        WorkoutType::Strength => STRENGTH_POOL,
        WorkoutType::Cardio => CARDIO_POOL,
        WorkoutType::Hiit => HIIT_POOL,
        WorkoutType::Flex => FLEX_POOL,
        WorkoutType::Mixed | WorkoutType::Other(_) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pools_have_five_entries() {
        for workout_type in WorkoutType::all() {
            assert_eq!(exercise_pool(workout_type).len(), 5, "{}", workout_type);
        }
    }

    #[test]
    fn test_unknown_type_has_empty_pool() {
        assert!(exercise_pool(&WorkoutType::Mixed).is_empty());
        assert!(exercise_pool(&WorkoutType::Other("yoga".into())).is_empty());
    }

    #[test]
    fn test_from_key_preserves_unknown_literal() {
        assert_eq!(WorkoutType::from_key("hiit"), WorkoutType::Hiit);
        let unknown = WorkoutType::from_key("yoga");
        assert_eq!(unknown, WorkoutType::Other("yoga".to_string()));
        assert_eq!(unknown.as_str(), "yoga");
    }

    #[test]
    fn test_workout_type_serde_literals() {
        let known: WorkoutType = serde_json::from_str("\"strength\"").unwrap();
        assert_eq!(known, WorkoutType::Strength);
        let unknown: WorkoutType = serde_json::from_str("\"yoga\"").unwrap();
        assert_eq!(unknown, WorkoutType::Other("yoga".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"yoga\"");
    }

    #[test]
    fn test_intensity_coerces_to_medium() {
        assert_eq!(Intensity::from_key("high"), Intensity::High);
        assert_eq!(Intensity::from_key("extreme"), Intensity::Medium);
        assert_eq!(Intensity::default(), Intensity::Medium);
    }
}
