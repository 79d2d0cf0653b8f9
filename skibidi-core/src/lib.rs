//! Front end of the skibidi language: tokens, lexer, AST and Pratt parser.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod stack;
pub mod token;
