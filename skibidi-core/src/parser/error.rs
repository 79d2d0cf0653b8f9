use std::rc::Rc;

use thiserror::Error;

use crate::token::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {} instead", .got.kind)]
    UnexpectedToken { expected: TokenKind, got: Token },
    #[error("no prefix parse function for {} found", .0.kind)]
    NoPrefixFunction(Token),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(Rc<str>),
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            got: got.clone(),
        }
    }
}
