//! flexcore - workout tracker: plans, logging, stats

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use flexcore::catalog::{Intensity, WorkoutType};
use flexcore::db::{Database, Profile, Workout, WorkoutFilter};
use flexcore::plan::{PlanRequest, generate_plan};
use flexcore::stats::{self, metrics, weekly};
use flexcore::tui::App;

const DB_PATH: &str = "flexcore.db";

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Parser)]
#[command(name = "flexcore")]
#[command(author, version, about = "Workout tracker - plans, logging, stats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Generate a workout plan
    Plan {
        /// Training goal (e.g., "strength", "weight loss", "balanced")
        #[arg(short, long, default_value = "balanced")]
        goal: String,

        /// Training days per week
        #[arg(short, long, default_value = "4")]
        days: i64,

        /// Intensity: low, medium, high
        #[arg(short, long, default_value = "medium")]
        intensity: String,

        /// Session length in minutes
        #[arg(long, default_value = "45")]
        duration: i64,

        /// Workout types to rotate through (e.g., -t strength -t cardio)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a workout
    Log {
        /// Workout type (strength, cardio, hiit, flex, ...)
        workout_type: String,

        /// Length in minutes
        #[arg(short, long, default_value = "30")]
        duration: i64,

        /// Intensity: low, medium, high
        #[arg(short, long, default_value = "medium")]
        intensity: String,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List workout history, newest first
    History {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Filter by workout type
        #[arg(short = 't', long = "type")]
        workout_type: Option<String>,

        /// Filter by intensity
        #[arg(short, long)]
        intensity: Option<String>,

        /// Minimum duration in minutes
        #[arg(long)]
        min_duration: Option<i64>,

        /// Maximum duration in minutes
        #[arg(long)]
        max_duration: Option<i64>,
    },

    /// Show progress statistics
    Stats,

    /// Show or update the profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        weight: Option<String>,

        #[arg(long)]
        height: Option<String>,

        /// Experience level (beginner, intermediate, advanced)
        #[arg(long)]
        experience: Option<String>,

        /// Fitness goal, also the default goal for generated plans
        #[arg(long)]
        goal: Option<String>,
    },

    /// Start Telegram bot
    Bot {
        /// Telegram bot token (or set TELOXIDE_TOKEN env var)
        #[arg(short, long, env = "TELOXIDE_TOKEN")]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db = Database::open(DB_PATH)?;

    match cli.command {
        Some(Commands::Tui) => {
            let mut app = App::new(db)?;
            app.run()?;
        }

        Some(Commands::Plan { goal, days, intensity, duration, types, json }) => {
            let request = PlanRequest {
                goal,
                days_per_week: days,
                intensity: Intensity::from_key(&intensity),
                duration,
                types: types.iter().map(|t| WorkoutType::from_key(t)).collect(),
            };
            let plan = generate_plan(&request);

            if json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "plan": plan }))?);
            } else {
                for day in &plan {
                    println!("Day {} - {} ({}, {} min)", day.day, day.workout_type, day.intensity, day.duration);
                    for exercise in &day.exercises {
                        match (exercise.sets, exercise.reps, exercise.minutes) {
                            (Some(sets), Some(reps), _) => {
                                println!("  {}. {:20} {}x{}", exercise.order, exercise.name, sets, reps);
                            }
                            (_, _, Some(minutes)) => {
                                println!("  {}. {:20} {} min", exercise.order, exercise.name, minutes);
                            }
                            _ => println!("  {}. {}", exercise.order, exercise.name),
                        }
                    }
                    println!();
                }
            }
        }

        Some(Commands::Log { workout_type, duration, intensity, notes }) => {
            let workout = Workout {
                id: None,
                date: Some(Utc::now()),
                workout_type: WorkoutType::from_key(&workout_type),
                duration: Some(duration),
                intensity: Intensity::from_key(&intensity),
                notes,
                created_at: None,
            };
            let id = db.add_workout(&workout)?;
            println!(
                "Logged: {} - {} min ({}) (id: {})",
                workout.workout_type, duration, workout.intensity, id
            );
        }

        Some(Commands::History { limit, workout_type, intensity, min_duration, max_duration }) => {
            let filter = WorkoutFilter {
                workout_type: workout_type.as_deref().map(WorkoutType::from_key),
                intensity: intensity.as_deref().map(Intensity::from_key),
                min_duration,
                max_duration,
            };
            let workouts = db.list_workouts(&filter)?;

            println!("Workout history:");
            println!("{:-<70}", "");
            for w in workouts.iter().take(limit) {
                let date = w
                    .date
                    .or(w.created_at)
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let minutes = w.duration.unwrap_or(0);
                println!(
                    "{} | {:10} | {:3} min | {:6} | {:4} kcal | {}",
                    date,
                    w.workout_type.as_str(),
                    minutes,
                    w.intensity.as_str(),
                    metrics::workout_calories(minutes, w.intensity),
                    w.notes.as_deref().unwrap_or("-")
                );
            }
        }

        Some(Commands::Stats) => {
            let workouts = db.all_workouts()?;
            let summary = stats::summarize(&workouts);
            let buckets = weekly::weekly_minutes(&workouts);

            println!("Your Progress");
            println!("{:-<40}", "");
            println!("Workouts:  {}", summary.total_workouts);
            println!("Minutes:   {}", summary.total_duration);
            println!("Calories:  {}", metrics::calories_burned(summary.total_duration));
            println!("Streak:    {} days", metrics::streak_days(summary.total_workouts));

            if summary.by_type.total() > 0 {
                println!("\nBy type:");
                for (key, count) in summary.by_type.iter() {
                    println!("  {:10} {}", key, count);
                }
            }

            println!("\nWeekly activity:");
            let max_minutes = buckets.iter().copied().max().unwrap_or(0).max(1);
            for (label, minutes) in WEEKDAY_LABELS.iter().zip(buckets.iter()) {
                let width = (minutes * 30 / max_minutes) as usize;
                println!("  {}  {:<30} {}", label, "█".repeat(width), minutes);
            }
        }

        Some(Commands::Profile { name, age, weight, height, experience, goal }) => {
            let mut profile = db.profile()?;
            let updating = name.is_some()
                || age.is_some()
                || weight.is_some()
                || height.is_some()
                || experience.is_some()
                || goal.is_some();

            if updating {
                if let Some(name) = name {
                    profile.name = name;
                }
                if let Some(age) = age {
                    profile.age = age;
                }
                if let Some(weight) = weight {
                    profile.weight = weight;
                }
                if let Some(height) = height {
                    profile.height = height;
                }
                if let Some(experience) = experience {
                    profile.experience = experience;
                }
                if let Some(goal) = goal {
                    profile.fitness_goal = goal;
                }
                db.save_profile(&profile)?;
                println!("Profile saved");
            } else {
                print_profile(&profile);
            }
        }

        Some(Commands::Bot { token }) => {
            println!("Starting Telegram bot...");
            println!("Database: {}", DB_PATH);
            flexcore::bot::run_bot(token, DB_PATH).await?;
        }

        None => {
            // Default: show TUI
            let mut app = App::new(db)?;
            app.run()?;
        }
    }

    Ok(())
}

fn print_profile(profile: &Profile) {
    let show = |value: &str| if value.is_empty() { "-" } else { value }.to_string();
    println!("Profile");
    println!("{:-<30}", "");
    println!("Name:        {}", show(&profile.name));
    println!("Age:         {}", show(&profile.age));
    println!("Weight:      {}", show(&profile.weight));
    println!("Height:      {}", show(&profile.height));
    println!("Experience:  {}", show(&profile.experience));
    println!("Goal:        {}", show(&profile.fitness_goal));
}
