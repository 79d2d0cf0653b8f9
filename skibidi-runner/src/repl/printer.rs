use std::io::Write;

use super::evaluator::Output;

pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, output: &Output) -> std::io::Result<()> {
        match output {
            Output::Value(object) => writeln!(self.out, "{}", object.inspect())?,
            Output::Silent => {}
            Output::SyntaxErrors(errors) => {
                writeln!(self.out, "We ran into an error here!")?;
                writeln!(self.out, "Parser Errors:")?;
                for error in errors {
                    writeln!(self.out, "\t{}", error)?;
                }
            }
            Output::Tokens(tokens) => {
                for token in tokens {
                    writeln!(self.out, "{}", token)?;
                }
            }
        }
        self.out.flush()
    }
}
