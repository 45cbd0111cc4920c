//! Warden -- a hero arena decision engine implementing the HAP protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr; set `RUST_LOG` to change the level (default `warn`).
//!
//! Usage:
//!   warden [--config FILE]

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use warden::config::PolicyConfig;
use warden::engine::Engine;
use warden::protocol::parser::{parse_command, Command};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Returns the base configuration selected on the command line.
fn load_config() -> Result<PolicyConfig, String> {
    let args: Vec<String> = env::args().collect();
    let mut config = PolicyConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                config = PolicyConfig::load(path).map_err(|e| e.to_string())?;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}

/// Runs the protocol loop until `quit` or end of input.
fn run<R: BufRead, W: Write>(engine: &mut Engine, input: R, out: &mut W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hap => engine.handle_hap(out)?,
            Command::IsReady => engine.handle_isready(out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    tracing::warn!(option = %name, error = %e, "setoption rejected");
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Turn { json } => engine.handle_turn(&json, out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(strategy = %config.strategy, "engine starting");

    let mut engine = Engine::with_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match run(&mut engine, stdin.lock(), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "protocol loop failed");
            ExitCode::FAILURE
        }
    }
}
