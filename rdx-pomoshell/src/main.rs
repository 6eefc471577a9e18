mod alert;
mod command;
mod render;

use alert::{AlertTrigger, DesktopNotifier, Notifier, TerminalBell};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use command::{Command, HELP_TEXT, UNKNOWN_COMMAND};
use pomodoro::prelude::*;
use pomodoro::{ENGINE_NAME, VERSION as LIB_VERSION};
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An interactive Pomodoro timer for the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ShellArgs {
    /// TOML file with durations and the long break threshold
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the startup banner (also enabled by QUIET_MODE)
    #[arg(short, long)]
    quiet: bool,

    /// Ring the terminal bell instead of raising desktop notifications
    #[arg(long)]
    no_notify: bool,
}

/// A rustyline helper that colors the command being typed.
#[derive(Completer, Helper, Hinter, Validator)]
struct CommandHighlighter;

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if Command::parse(line).is_known() {
            Cow::Owned(line.green().bold().to_string())
        } else {
            Cow::Owned(line.yellow().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn print_banner() {
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.red());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );
    println!("{}", "-".repeat(60).dimmed());
    println!("{}", version_string);
    println!("{}", "-".repeat(60).dimmed());
}

/// Logs the scheduler's lifecycle broadcast.
fn spawn_event_listeners(scheduler: &SessionScheduler) {
    let mut system_rx = scheduler.subscribe_system_events();
    tokio::spawn(async move {
        loop {
            match system_rx.recv().await {
                Ok(event) => info!("[SYSTEM EVENT] {:?}", event),
                Err(RecvError::Lagged(missed)) => warn!("Missed {} system events.", missed),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Wires the renderer and the alert trigger into the scheduler's observers.
async fn register_observers(scheduler: &SessionScheduler, alert: Arc<AlertTrigger>) {
    scheduler
        .register_tick_callback(|snapshot| {
            if let Err(err) = render::draw_timer(snapshot) {
                warn!(
                    "Could not draw the timer ({err}); {} {} left.",
                    snapshot.session,
                    render::format_clock(snapshot.remaining_seconds)
                );
            }
        })
        .await;

    scheduler
        .register_completion_callback(move |done| {
            if let Err(err) = render::draw_completion(done) {
                warn!("Could not draw the completion ({err}); next up: {}.", done.next);
            }
            // Notifications may block on the desktop bus; keep them off the tick.
            let alert = alert.clone();
            let done = *done;
            tokio::task::spawn_blocking(move || alert.fire(&done));
        })
        .await;
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ShellArgs::parse();
    if !args.quiet && env::var("QUIET_MODE").is_err() {
        print_banner();
    }

    // Logs go to stderr so they do not tear the redrawn timer screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = PomodoroConfig::load(args.config.as_deref())
        .context("could not load the Pomodoro configuration")?;
    let scheduler = SessionScheduler::new(config)?;

    let notifier: Box<dyn Notifier> = if args.no_notify {
        Box::new(TerminalBell)
    } else {
        Box::new(DesktopNotifier)
    };
    register_observers(&scheduler, Arc::new(AlertTrigger::new(notifier))).await;
    spawn_event_listeners(&scheduler);

    let mut rl: Editor<CommandHighlighter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandHighlighter));

    println!("Welcome to the {}!", ENGINE_NAME.cyan());
    println!("Type \"h\" for help or \"s\" to start.");
    if let Err(err) = render::draw_timer(&scheduler.snapshot().await) {
        warn!("Could not draw the timer: {err}");
    }

    loop {
        let prompt = format!("{}", ">> ".cyan().bold());
        match rl.readline(&prompt) {
            Ok(line) => {
                let command = Command::parse(&line);
                if command != Command::Empty {
                    rl.add_history_entry(line.as_str())?;
                }
                match command {
                    Command::Start => scheduler.start().await,
                    Command::Pause => scheduler.pause().await,
                    Command::Stop => scheduler.stop().await,
                    Command::Reset => scheduler.reset().await,
                    Command::Status => println!("{}", render::timer_screen(&scheduler.snapshot().await)),
                    Command::Help => println!("\n{}", HELP_TEXT),
                    Command::Quit => break,
                    Command::Empty => {}
                    Command::Unknown(_) => println!("{}", UNKNOWN_COMMAND),
                }
            }
            Err(_) => break,
        }
    }

    scheduler.stop().await;
    println!("Goodbye!");
    Ok(())
}
