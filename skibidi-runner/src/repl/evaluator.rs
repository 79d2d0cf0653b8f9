use std::rc::Rc;

use skibidi_core::ast::Statement;
use skibidi_core::lexer::Lexer;
use skibidi_core::parser::{ParseError, Parser};
use skibidi_core::token::Token;
use skibidi_interpreter::environment::Environment;
use skibidi_interpreter::evaluator;
use skibidi_interpreter::object::Object;

pub enum Output {
    Value(Rc<Object>),
    /// Nothing worth printing, e.g. after a `let`.
    Silent,
    SyntaxErrors(Vec<ParseError>),
    Tokens(Vec<Token>),
}

pub trait Evaluator {
    fn evaluate(&mut self, source: &str) -> Output;
}

/// Parses and evaluates against one environment kept across inputs.
pub struct InterpreterEvaluator {
    environment: Environment,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }
}

impl Evaluator for InterpreterEvaluator {
    fn evaluate(&mut self, source: &str) -> Output {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            return Output::SyntaxErrors(parser.errors().to_vec());
        }

        let object = evaluator::eval(&program, &self.environment);
        match (object.as_ref(), program.statements.last()) {
            (Object::Error(_), _) => Output::Value(object),
            (_, Some(Statement::Let(_))) => Output::Silent,
            _ => Output::Value(object),
        }
    }
}

pub struct TokenEvaluator;

impl Evaluator for TokenEvaluator {
    fn evaluate(&mut self, source: &str) -> Output {
        Output::Tokens(Lexer::new(source).collect())
    }
}
