//! Coach module - keyword-matched fitness Q&A
//!
//! The same canned-answer coach the app has always had: scan the
//! question for topic keywords and return the matching advice. Pure
//! and deterministic; unknown questions get the default reply.

/// Question topics the coach can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Workout,
    Form,
    Nutrition,
    Motivation,
    Rest,
    Hiit,
    Strength,
    Cardio,
    Stretching,
}

impl Topic {
    /// Substrings that select this topic in a lowercased question
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Workout => &["workout", "plan", "exercise"],
            Topic::Form => &["form", "technique"],
            Topic::Nutrition => &["nutrition", "eat", "food", "protein"],
            Topic::Motivation => &["motiv", "tired", "lazy"],
            Topic::Rest => &["rest", "sleep", "recover"],
            Topic::Hiit => &["hiit", "interval"],
            Topic::Strength => &["strength", "weight", "muscle"],
            Topic::Cardio => &["cardio", "running", "cycling"],
            Topic::Stretching => &["stretch", "flexible"],
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Topic::Workout => {
                "Great! What type of workout are you interested in? We have Strength, Cardio, HIIT, and Flexibility options."
            }
            Topic::Form => {
                "Proper form is crucial! Focus on controlled movements, full range of motion, and core engagement."
            }
            Topic::Nutrition => {
                "Aim for protein with each meal (20-30g), stay hydrated, and eat whole foods. Post-workout meals are especially important!"
            }
            Topic::Motivation => {
                "You've got this! Remember, every workout brings you closer to your goals. Progress over perfection! 💪"
            }
            Topic::Rest => {
                "Rest days are important too! Aim for 7-9 hours of sleep and take at least one full rest day per week."
            }
            Topic::Hiit => {
                "HIIT is intense but effective! Do 30-60 seconds of max effort, then 30-60 seconds of recovery. Usually 15-30 minutes total."
            }
            Topic::Strength => {
                "For strength training, focus on progressive overload. Increase weight, reps, or sets every 2-3 weeks to keep challenging your muscles."
            }
            Topic::Cardio => {
                "Cardio improves heart health! Mix steady-state cardio with interval training for best results."
            }
            Topic::Stretching => {
                "Stretching helps mobility and prevents injury. Do dynamic stretches before workouts and static stretches after."
            }
        }
    }
}

/// Scan order matters: earlier topics shadow later ones, so a
/// "strength workout" question is answered as a workout question.
const SCAN_ORDER: &[Topic] = &[
    Topic::Workout,
    Topic::Form,
    Topic::Nutrition,
    Topic::Motivation,
    Topic::Rest,
    Topic::Hiit,
    Topic::Strength,
    Topic::Cardio,
    Topic::Stretching,
];

pub const GREETING: &str = "Hi! 👋 I'm your fitness coach. How can I help you today?";

pub const DEFAULT_REPLY: &str =
    "I can help with workout advice, form tips, nutrition guidance, and motivation! What would you like to know?";

/// Suggested questions surfaced next to the chat input
pub const QUICK_PROMPTS: &[&str] = &[
    "Give me a full-body workout",
    "How much protein should I eat?",
    "Motivation tips, please",
    "Stretching routine before lifting",
];

/// Answer a free-form question
pub fn reply(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    for topic in SCAN_ORDER {
        if topic.keywords().iter().any(|keyword| lower.contains(keyword)) {
            return topic.reply();
        }
    }
    DEFAULT_REPLY
}
