//! Terminal chat client: streams each turn through the chat graph and prints the execution trace.
//!
//! One-shot with `-m`, otherwise an interactive prompt (`/new`, `/history`, `/quit`).

use std::io::Write;

use chatgraph::build::{build_chat_graph, build_suggester};
use chatgraph::{ConversationGraph, LlmConfig, SuggestionGenerator};
use chatgraph_cli::{logging, run_turn, ChatSession, CliArgs, Command, Role, TurnEvent};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_event(event: &TurnEvent, quiet: bool) {
    match event {
        TurnEvent::Trace(line) if !quiet => println!("{}", line),
        _ => {}
    }
}

async fn turn(
    graph: &dyn ConversationGraph,
    session: &mut ChatSession,
    suggester: Option<&SuggestionGenerator>,
    input: &str,
    quiet: bool,
) -> Result<(), chatgraph::GraphError> {
    let answer = run_turn(graph, session, input, |ev| print_event(ev, quiet)).await?;
    if !quiet {
        println!("---");
    }
    println!("Assistant: {}", answer);

    if let Some(suggester) = suggester.filter(|_| !answer.is_empty()) {
        match suggester.suggest(&answer).await {
            Ok(suggestions) => {
                for s in suggestions {
                    println!("  ? {}", s);
                }
            }
            Err(e) => eprintln!("suggestions unavailable: {}", e),
        }
    }
    Ok(())
}

fn print_history(session: &ChatSession) {
    println!("thread {}", session.thread_id());
    for t in session.transcript() {
        let who = match t.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        println!("[{}] {}", who, t.content);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chatgraph::load_dotenv();
    let args = CliArgs::parse();
    logging::init_tracing(args.verbose);

    let config = LlmConfig::from_env()?;
    let graph = build_chat_graph(&config)?;
    let suggester = args.suggest.then(|| build_suggester(&config));

    let mut session = match args.thread_id {
        Some(ref id) => ChatSession::with_thread_id(id.clone()),
        None => ChatSession::new(),
    };

    if let Some(ref message) = args.message {
        if let Err(e) = turn(&graph, &mut session, suggester.as_ref(), message, args.quiet).await {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("CCC chatbot (thread {}). /new, /history, /quit", session.thread_id());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::History => print_history(&session),
            Command::New => {
                session.reset();
                println!("new chat (thread {})", session.thread_id());
            }
            Command::Query(input) => {
                if let Err(e) = turn(&graph, &mut session, suggester.as_ref(), &input, args.quiet).await {
                    eprintln!("error: {}", e);
                }
            }
        }
    }
    Ok(())
}
