//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{Stdout, stdout};

use crate::db::{Database, Workout};
use crate::stats::{self, metrics, weekly};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// App state for TUI
pub struct App {
    db: Database,
    workouts: Vec<Workout>,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self> {
        let workouts = db.all_workouts()?;
        Ok(Self {
            db,
            workouts,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(9),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let summary = stats::summarize(&self.workouts);
        let buckets = weekly::weekly_minutes(&self.workouts);

        // Header
        let header = Paragraph::new("flexcore - Workout Tracker")
            .style(Style::default().fg(Color::Green).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Stat cards
        let cards = format!(
            "Workouts: {}   Minutes: {}   Calories: {}   Streak: {} days",
            summary.total_workouts,
            summary.total_duration,
            metrics::calories_burned(summary.total_duration),
            metrics::streak_days(summary.total_workouts),
        );
        let progress = Paragraph::new(cards)
            .style(Style::default().bold())
            .block(Block::default().borders(Borders::ALL).title("Your Progress"));
        frame.render_widget(progress, chunks[1]);

        // Weekly activity bars
        let max_minutes = buckets.iter().copied().max().unwrap_or(0).max(1);
        let lines: Vec<Line> = WEEKDAY_LABELS
            .iter()
            .zip(buckets.iter())
            .map(|(label, minutes)| {
                let width = (minutes * 30 / max_minutes) as usize;
                let style = if *minutes > 0 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(vec![
                    Span::raw(format!("{label}  ")),
                    Span::styled("█".repeat(width), style),
                    Span::raw(format!(" {minutes}")),
                ])
            })
            .collect();
        let activity = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Weekly Activity"));
        frame.render_widget(activity, chunks[2]);

        // Recent workouts, newest at the top
        let rows: Vec<Row> = summary
            .recent
            .iter()
            .rev()
            .map(|w| {
                let date = w
                    .date
                    .or(w.created_at)
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                Row::new(vec![
                    Cell::from(date),
                    Cell::from(w.workout_type.as_str().to_string()),
                    Cell::from(format!("{} min", w.duration.unwrap_or(0))),
                    Cell::from(w.intensity.as_str()),
                    Cell::from(w.notes.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Min(20),
            ],
        )
        .header(
            Row::new(vec!["Date", "Type", "Duration", "Intensity", "Notes"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Recent Workouts"));

        frame.render_widget(table, chunks[3]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[4]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => {
                    self.workouts = self.db.all_workouts()?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
