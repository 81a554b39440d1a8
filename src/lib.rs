//! flexcore - workout tracking core: plan generation, logging, stats
//!
//! Modules:
//! - `catalog`: workout types, intensities, static exercise pools
//! - `plan`: the weekly plan generator
//! - `db`: SQLite storage for workouts and the profile
//! - `stats`: dashboard aggregation, weekly histogram, derived metrics
//! - `coach`: keyword-matched fitness Q&A
//! - `tui`: terminal dashboard
//! - `bot`: Telegram bot surface

pub mod bot;
pub mod catalog;
pub mod coach;
pub mod db;
pub mod plan;
pub mod stats;
pub mod tui;

pub use db::Database;
