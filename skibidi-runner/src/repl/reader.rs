use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(String),
}

pub struct Reader {
    rl: Editor<(), DefaultHistory>,
}

impl Reader {
    pub fn new(rl: Editor<(), DefaultHistory>) -> Self {
        Self { rl }
    }

    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                Ok(ReadOutput::Clear)
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                Ok(ReadOutput::Exit)
            }
            Err(err) => Err(err),
            Ok(line) => {
                if line.trim().is_empty() {
                    return Ok(ReadOutput::Clear);
                }
                self.rl.add_history_entry(line.as_str())?;
                Ok(ReadOutput::Value(line))
            }
        }
    }
}
