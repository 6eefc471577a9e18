//! Maps a line of user input to exactly one shell command.

/// Everything the prompt understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Stop,
    Reset,
    Status,
    Help,
    Quit,
    /// A blank line.
    Empty,
    /// Anything else, kept for the rejection notice.
    Unknown(String),
}

impl Command {
    /// Parses one line. Surrounding whitespace and case are ignored.
    pub fn parse(line: &str) -> Self {
        let token = line.trim().to_lowercase();
        match token.as_str() {
            "s" | "start" => Command::Start,
            "p" | "pause" => Command::Pause,
            "stop" => Command::Stop,
            "r" | "reset" => Command::Reset,
            "status" => Command::Status,
            "h" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            "" => Command::Empty,
            _ => Command::Unknown(token),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Command::Unknown(_))
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  s, start   - Start or resume the timer
  p, pause   - Pause the timer
  stop       - Stop and reset the timer
  r, reset   - Reset to a fresh work session
  status     - Show the current session
  h, help    - Show this help
  q, quit    - Quit the application";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Type \"h\" for help.";
