use crate::ast::{BlockStatement, LetStatement, ReturnStatement, Statement};
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};
use crate::token::TokenKind;

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.cur_token.kind {
        TokenKind::Let => Ok(Statement::Let(parse_let_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Result<LetStatement, ParseError> {
    let identifier = parser.parse_ident()?;
    parser.expect_peek(TokenKind::Assign)?;
    parser.next_token();

    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_optional_semicolon();

    Ok(LetStatement { identifier, value })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.next_token();

    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_optional_semicolon();

    Ok(ReturnStatement { value })
}

fn parse_expression_statement(
    parser: &mut Parser,
) -> Result<crate::ast::Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_optional_semicolon();

    Ok(expression)
}

/// Parses `{ ... }` starting at the opening brace. Stops at the closing brace
/// or at end of input, leaving the cursor on it.
pub fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    parser.next_token();

    while !parser.cur_token_is(TokenKind::RBrace) && !parser.cur_token_is(TokenKind::Eof) {
        statements.push(parse_statement(parser)?);
        parser.next_token();
    }

    Ok(BlockStatement { statements })
}
