//! Plan generation - turns request parameters into a multi-day schedule
//!
//! Pure and deterministic: the same request always produces the same
//! plan, and malformed inputs fall back to defaults instead of failing.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Intensity, WorkoutType, exercise_pool};

/// Types cycled through when the request doesn't name any
const DEFAULT_TYPES: &[WorkoutType] = &[WorkoutType::Strength, WorkoutType::Cardio];

/// Parameters for plan generation. Every field has a safe default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequest {
    pub goal: String,
    pub days_per_week: i64,
    #[serde(deserialize_with = "catalog::lenient_intensity")]
    pub intensity: Intensity,
    pub duration: i64,
    pub types: Vec<WorkoutType>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            goal: "balanced".to_string(),
            days_per_week: 4,
            intensity: Intensity::Medium,
            duration: 45,
            types: Vec::new(),
        }
    }
}

/// One exercise slot in a day plan. Strength slots carry sets/reps,
/// timed slots carry minutes, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExercise {
    pub name: String,
    pub order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
}

/// One scheduled day of the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: i64,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub goal: String,
    pub intensity: Intensity,
    pub duration: i64,
    pub exercises: Vec<PlanExercise>,
}

/// Generate a schedule with one entry per requested day.
///
/// Day numbers are 1-based but index the allowed-type list with a plain
/// zero-based modulo, so day 1 lands on the second type of a two-type
/// list. The rotation is load-bearing: generated plans have always
/// cycled this way and consumers pin the sequence.
pub fn generate_plan(request: &PlanRequest) -> Vec<PlanDay> {
    let allowed: &[WorkoutType] = if request.types.is_empty() {
        DEFAULT_TYPES
    } else {
        &request.types
    };

    let mut plan = Vec::new();

    for day in 1..=request.days_per_week {
        let workout_type = &allowed[day as usize % allowed.len()];
        let pool = exercise_pool(workout_type);

        let per_exercise_minutes = if pool.is_empty() {
            ((request.duration as f64 / 3.0).round() as i64).max(5)
        } else {
            (request.duration as f64 / pool.len() as f64).round() as i64
        };

        let is_strength = *workout_type == WorkoutType::Strength;
        let is_timed = matches!(
            workout_type,
            WorkoutType::Cardio | WorkoutType::Hiit | WorkoutType::Flex
        );

        let exercises = pool
            .iter()
            .take(3)
            .enumerate()
            .map(|(idx, name)| PlanExercise {
                name: (*name).to_string(),
                order: idx + 1,
                sets: is_strength.then(|| 3 + i64::from(request.goal.contains("strength"))),
                reps: is_strength.then(|| if request.intensity == Intensity::High { 8 } else { 12 }),
                minutes: is_timed.then_some(per_exercise_minutes),
            })
            .collect();

        plan.push(PlanDay {
            day,
            workout_type: workout_type.clone(),
            goal: request.goal.clone(),
            intensity: request.intensity,
            duration: request.duration,
            exercises,
        });
    }

    plan
}
