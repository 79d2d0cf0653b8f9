mod error;
mod repl;
mod runner;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Evaluate each input and print the resulting value
    Interpreter,
    /// Print the token stream produced by the lexer
    Tokens,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = Mode::Interpreter)]
    mode: Mode,
    /// Program to run. Starts the REPL when omitted.
    path: Option<PathBuf>,
}

/// Logs go to stderr and stay off unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=skibidi_interpreter=debug`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.path {
        None => repl::start(cli.mode),
        Some(path) => runner::execute_file(&path, cli.mode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
