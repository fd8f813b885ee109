use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use varcalc::prelude::*;

/// varcalc evaluates arithmetic expressions with variables. Statements are separated by
/// `;` and variables stay bound for the rest of the session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate an expression, e.g. "x = 2; x * 3".
    #[arg(short, long, conflicts_with = "command")]
    expression: Option<String>,

    /// Run a command: "echo" or "clean".
    #[arg(short, long)]
    command: Option<String>,

    /// Session whose variables the expression reads and writes.
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    session: String,
}

/// Text for stdout on success, for stderr on failure.
fn render(response: Response) -> Result<String, String> {
    match response {
        Response::Value(value) => Ok(value.to_string()),
        Response::Echo(text) => Ok(text),
        Response::Empty => Ok("Operation successful (no explicit result).".to_string()),
        Response::Error(message) => Err(format!("Error: {}", message)),
    }
}

fn report(response: Response) -> bool {
    match render(response) {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(text) => {
            eprintln!("{}", text);
            false
        }
    }
}

/// Evaluates stdin line by line in one session. Errors are reported and skipped.
fn run_lines(store: &SessionStore, session: &str) -> Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        report(store.handle(Request::Evaluate {
            expression: line,
            session: Some(session.to_string()),
        }));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let store = SessionStore::new();
    let session = Some(args.session.clone());

    let request = match (args.expression, args.command) {
        (Some(expression), _) => Request::Evaluate {
            expression,
            session,
        },
        (None, Some(command)) => Request::Command { command, session },
        (None, None) => {
            return match run_lines(&store, &args.session) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    if report(store.handle(request)) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
