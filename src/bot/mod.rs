//! Telegram bot module - remote logging, plans, and the coach chat

use std::sync::Arc;

use chrono::{Local, Utc};
use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::command::BotCommands,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::catalog::{Intensity, WorkoutType};
use crate::coach;
use crate::db::{Database, Workout};
use crate::plan::{PlanDay, PlanRequest, generate_plan};
use crate::stats::{self, metrics};

type MyDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    /// Waiting for workout length in minutes
    WaitingForDuration { type_key: String },
    /// Waiting for intensity (low / medium / high)
    WaitingForIntensity { type_key: String, duration: i64 },
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Say hello")]
    Start,
    #[command(description = "Show help")]
    Help,
    #[command(description = "Generate a workout plan")]
    Plan,
    #[command(description = "Log a workout")]
    Log,
    #[command(description = "Today's workouts")]
    Today,
    #[command(description = "Your stats")]
    Stats,
}

fn type_emoji(workout_type: &WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Strength => "🏋️",
        WorkoutType::Cardio => "🏃",
        WorkoutType::Hiit => "🔥",
        WorkoutType::Flex => "🧘",
        WorkoutType::Mixed | WorkoutType::Other(_) => "💪",
    }
}

/// Create inline keyboard with the workout types that have a pool
fn make_types_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = WorkoutType::all()
        .chunks(2)
        .map(|chunk| {
            chunk
                .iter()
                .map(|workout_type| {
                    let label = format!("{} {}", type_emoji(workout_type), workout_type);
                    InlineKeyboardButton::callback(label, format!("type:{workout_type}"))
                })
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Render a generated plan as a chat message
fn format_plan(plan: &[PlanDay]) -> String {
    let mut text = String::from("📋 Your plan:\n");
    for day in plan {
        text.push_str(&format!(
            "\nDay {} - {} {}\n",
            day.day,
            type_emoji(&day.workout_type),
            day.workout_type
        ));
        if day.exercises.is_empty() {
            text.push_str("  (free session)\n");
        }
        for exercise in &day.exercises {
            match (exercise.sets, exercise.reps, exercise.minutes) {
                (Some(sets), Some(reps), _) => {
                    text.push_str(&format!("  {}. {} - {}x{}\n", exercise.order, exercise.name, sets, reps));
                }
                (_, _, Some(minutes)) => {
                    text.push_str(&format!("  {}. {} - {} min\n", exercise.order, exercise.name, minutes));
                }
                _ => {
                    text.push_str(&format!("  {}. {}\n", exercise.order, exercise.name));
                }
            }
        }
    }
    text
}

/// Start the Telegram bot
pub async fn run_bot(token: String, db_path: &str) -> anyhow::Result<()> {
    let bot = Bot::new(token);
    let db = Arc::new(Mutex::new(Database::open(db_path)?));

    info!("Bot starting");

    let handler = dptree::entry()
        .enter_dialogue::<Update, InMemStorage<State>, State>()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<State>::new(), db])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    _dialogue: MyDialogue,
    db: Arc<Mutex<Database>>,
) -> HandlerResult {
    match cmd {
        Command::Start => {
            let mut text = format!(
                "{}\n\n/plan - generate a workout plan\n/log - log a workout\n/today - today's workouts\n/stats - your stats\n\nOr just ask me something, e.g.:\n",
                coach::GREETING
            );
            for prompt in coach::QUICK_PROMPTS {
                text.push_str(&format!("• {prompt}\n"));
            }
            bot.send_message(msg.chat.id, text).await?;
        }

        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }

        Command::Plan => {
            let request = {
                let db = db.lock().await;
                let profile = db.profile()?;
                if profile.fitness_goal.is_empty() {
                    PlanRequest::default()
                } else {
                    PlanRequest {
                        goal: profile.fitness_goal,
                        ..PlanRequest::default()
                    }
                }
            };
            let plan = generate_plan(&request);
            bot.send_message(msg.chat.id, format_plan(&plan)).await?;
        }

        Command::Log => {
            let keyboard = make_types_keyboard();
            bot.send_message(msg.chat.id, "What did you train?")
                .reply_markup(keyboard)
                .await?;
        }

        Command::Today => {
            let db = db.lock().await;
            let workouts = db.all_workouts()?;
            let today = Local::now().date_naive();

            let today_workouts: Vec<_> = workouts
                .iter()
                .filter(|w| {
                    w.date
                        .is_some_and(|d| d.with_timezone(&Local).date_naive() == today)
                })
                .collect();

            if today_workouts.is_empty() {
                bot.send_message(msg.chat.id, "Nothing logged today yet. Hit /log!")
                    .await?;
            } else {
                let mut text = String::from("📊 Today:\n\n");
                for w in today_workouts {
                    text.push_str(&format!(
                        "• {} {} - {} min ({})\n",
                        type_emoji(&w.workout_type),
                        w.workout_type,
                        w.duration.unwrap_or(0),
                        w.intensity
                    ));
                }
                bot.send_message(msg.chat.id, text).await?;
            }
        }

        Command::Stats => {
            let db = db.lock().await;
            let workouts = db.all_workouts()?;
            let summary = stats::summarize(&workouts);

            let mut text = format!(
                "📈 Stats\n\nWorkouts: {}\nMinutes trained: {}\nCalories burned: {}\nCurrent streak: {} days\n",
                summary.total_workouts,
                summary.total_duration,
                metrics::calories_burned(summary.total_duration),
                metrics::streak_days(summary.total_workouts),
            );

            if summary.by_type.total() > 0 {
                text.push_str("\nBy type:\n");
                for (key, count) in summary.by_type.iter() {
                    text.push_str(&format!("• {key} - {count}\n"));
                }
            }

            bot.send_message(msg.chat.id, text).await?;
        }
    }

    Ok(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    _db: Arc<Mutex<Database>>,
) -> HandlerResult {
    if let Some(data) = &q.data
        && let Some(type_key) = data.strip_prefix("type:")
    {
        let workout_type = WorkoutType::from_key(type_key);
        dialogue
            .update(State::WaitingForDuration {
                type_key: type_key.to_string(),
            })
            .await?;

        let text = format!(
            "{} {}\n\nHow many minutes?",
            type_emoji(&workout_type),
            workout_type
        );

        if let Some(msg) = q.message {
            bot.edit_message_text(msg.chat().id, msg.id(), text).await?;
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    db: Arc<Mutex<Database>>,
) -> HandlerResult {
    let state = dialogue.get().await?.unwrap_or_default();

    match state {
        State::WaitingForDuration { type_key } => {
            if let Some(text) = msg.text() {
                if let Ok(duration) = text.trim().parse::<i64>() {
                    if !(1..=600).contains(&duration) {
                        bot.send_message(msg.chat.id, "Minutes should be between 1 and 600")
                            .await?;
                        return Ok(());
                    }

                    dialogue
                        .update(State::WaitingForIntensity { type_key, duration })
                        .await?;

                    bot.send_message(msg.chat.id, "Intensity? (low / medium / high)")
                        .await?;
                } else {
                    bot.send_message(msg.chat.id, "Send the length in minutes (a number)")
                        .await?;
                }
            }
        }

        State::WaitingForIntensity { type_key, duration } => {
            if let Some(text) = msg.text() {
                let key = text.trim().to_lowercase();
                if !matches!(key.as_str(), "low" | "medium" | "high") {
                    bot.send_message(msg.chat.id, "Pick one of: low / medium / high")
                        .await?;
                    return Ok(());
                }

                let intensity = Intensity::from_key(&key);
                let workout_type = WorkoutType::from_key(&type_key);
                let workout = Workout {
                    id: None,
                    date: Some(Utc::now()),
                    workout_type: workout_type.clone(),
                    duration: Some(duration),
                    intensity,
                    notes: None,
                    created_at: None,
                };

                let today_count = {
                    let db = db.lock().await;
                    db.add_workout(&workout)?;

                    let today = Local::now().date_naive();
                    db.all_workouts()?
                        .iter()
                        .filter(|w| {
                            w.date
                                .is_some_and(|d| d.with_timezone(&Local).date_naive() == today)
                        })
                        .count()
                };

                let response = format!(
                    "Logged!\n\n{} {} - {} min ({})\n~{} calories\n\nToday: {} workouts\n\n/log - another",
                    type_emoji(&workout_type),
                    workout_type,
                    duration,
                    intensity,
                    metrics::workout_calories(duration, intensity),
                    today_count
                );

                bot.send_message(msg.chat.id, response).await?;
                dialogue.reset().await?;
            }
        }

        State::Start => {
            // Anything outside a logging flow goes to the coach
            if let Some(text) = msg.text() {
                bot.send_message(msg.chat.id, coach::reply(text)).await?;
            }
        }
    }

    Ok(())
}
