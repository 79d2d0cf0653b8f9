pub mod evaluator;
pub mod printer;
mod reader;

use rustyline::DefaultEditor;

use crate::error::RunnerError;
use crate::Mode;
use evaluator::{Evaluator, InterpreterEvaluator, TokenEvaluator};
use printer::Printer;
use reader::{ReadOutput, Reader};

struct Repl<E: Evaluator> {
    reader: Reader,
    evaluator: E,
    printer: Printer<std::io::Stdout>,
}

impl<E: Evaluator> Repl<E> {
    fn run(mut self) -> Result<(), RunnerError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => return Ok(()),
                ReadOutput::Clear => continue,
                ReadOutput::Value(line) => {
                    let output = self.evaluator.evaluate(&line);
                    self.printer.print(&output)?;
                }
            }
        }
    }
}

pub fn start(mode: Mode) -> Result<(), RunnerError> {
    let rl = DefaultEditor::new()?;
    let reader = Reader::new(rl);
    let printer = Printer::new(std::io::stdout());

    tracing::debug!(?mode, "starting repl");
    match mode {
        Mode::Interpreter => Repl {
            reader,
            evaluator: InterpreterEvaluator::new(),
            printer,
        }
        .run(),
        Mode::Tokens => Repl {
            reader,
            evaluator: TokenEvaluator,
            printer,
        }
        .run(),
    }
}
