//! chatgraph-cli library: terminal chat session over a conversation graph.
//!
//! Streams each turn through the graph, reports node / tool / rewritten-query trace lines as they
//! arrive, and keeps only the final answer in the session transcript.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = ChatSession::new();
//! let answer = run_turn(&graph, &mut session, "who leads CCC?", |ev| println!("{}", ev)).await?;
//! ```

mod args;
mod command;
pub mod logging;
mod run;
mod session;
mod trace;

pub use args::CliArgs;
pub use command::Command;
pub use run::{run_turn, TurnEvent};
pub use session::{ChatSession, Role, Turn};
pub use trace::{trace_lines, TraceLine};

#[cfg(test)]
mod tests;
