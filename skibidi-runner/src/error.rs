use std::path::PathBuf;

use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write output: {0}")]
    Write(#[from] std::io::Error),
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
    #[error("program has {0} syntax error(s)")]
    Syntax(usize),
    #[error("program stopped with an error")]
    Evaluation,
}
