//! Command-line arguments of the `chatgraph` binary.

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "chatgraph")]
#[command(about = "CCC chatbot in the terminal: streams node traces and the final answer")]
pub struct CliArgs {
    /// Send one message and exit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Resume an existing thread instead of starting a new one
    #[arg(long, value_name = "ID")]
    pub thread_id: Option<String>,

    /// Print follow-up suggestions after each answer
    #[arg(long)]
    pub suggest: bool,

    /// Hide the execution trace; print only answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log to stderr (filter from RUST_LOG, default `debug`)
    #[arg(short, long)]
    pub verbose: bool,
}
