use std::io::Write;
use std::path::Path;

use skibidi_interpreter::object::Object;

use crate::error::RunnerError;
use crate::repl::evaluator::{Evaluator, InterpreterEvaluator, Output, TokenEvaluator};
use crate::repl::printer::Printer;
use crate::Mode;

pub fn execute_file(path: &Path, mode: Mode) -> Result<(), RunnerError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_owned(),
        source,
    })?;
    execute(&source, mode, std::io::stdout())
}

/// Runs `source` as one program and prints its outcome to `out`.
pub fn execute(source: &str, mode: Mode, out: impl Write) -> Result<(), RunnerError> {
    let output = match mode {
        Mode::Interpreter => InterpreterEvaluator::new().evaluate(source),
        Mode::Tokens => TokenEvaluator.evaluate(source),
    };
    Printer::new(out).print(&output)?;

    match output {
        Output::SyntaxErrors(errors) => Err(RunnerError::Syntax(errors.len())),
        Output::Value(object) if matches!(object.as_ref(), Object::Error(_)) => {
            Err(RunnerError::Evaluation)
        }
        _ => Ok(()),
    }
}
