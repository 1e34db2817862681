//! Slash commands of the interactive prompt.

/// What an input line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start a new chat (new thread id).
    New,
    /// Print the transcript.
    History,
    Quit,
    /// Blank line; ignored.
    Empty,
    /// Anything else is a query for the graph.
    Query(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Command::Empty,
            "/new" => Command::New,
            "/history" => Command::History,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Query(line.to_string()),
        }
    }
}
