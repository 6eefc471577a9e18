//! Turns scheduler snapshots into screens.
//!
//! Rendering runs inside the scheduler's tick, so it only ever formats the
//! values it is handed and writes them out. Write failures are reported to the
//! caller, which degrades to a plain log line.

use colored::Colorize;
use pomodoro::prelude::*;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;
const BAR_WIDTH: usize = 40;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Formats whole seconds as `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A fixed-width bar with one filled cell per 1/width of `percent`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// The full timer screen, without the clear-screen prefix.
pub fn timer_screen(snapshot: &TimerSnapshot) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("{:^width$}", "POMODORO TIMER", width = RULE_WIDTH)
            .bold()
            .to_string(),
        rule.clone(),
        format!(
            "Session: {} (#{})",
            session_label(snapshot.session),
            snapshot.completed_work_sessions
        ),
        format!("Time: {}", format_clock(snapshot.remaining_seconds)),
        format!("Status: {}", snapshot.state.as_str().to_uppercase()),
        rule,
    ];

    if snapshot.remaining_seconds > 0 {
        let progress = snapshot.progress_percent();
        lines.push(format!(
            "Progress: [{}] {:.1}%",
            progress_bar(progress, BAR_WIDTH),
            progress
        ));
    }
    lines.join("\n")
}

/// The notice printed when a session runs out.
pub fn completion_notice(completion: &SessionCompletion) -> String {
    format!(
        "\n{}\nFinished: {}\nNext: {}",
        "Session Complete!".green().bold(),
        session_label(completion.finished),
        session_label(completion.next)
    )
}

fn session_label(session: SessionType) -> String {
    match session {
        SessionType::Work => session.label().red().bold().to_string(),
        SessionType::ShortBreak => session.label().green().to_string(),
        SessionType::LongBreak => session.label().blue().bold().to_string(),
    }
}

/// Clears the terminal and draws the timer screen.
pub fn draw_timer(snapshot: &TimerSnapshot) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}{}", CLEAR_SCREEN, timer_screen(snapshot))?;
    stdout.flush()
}

pub fn draw_completion(completion: &SessionCompletion) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", completion_notice(completion))?;
    stdout.flush()
}
