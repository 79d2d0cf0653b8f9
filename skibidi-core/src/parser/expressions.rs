use super::error::ParseError;
use super::statements::parse_block_statement;
use crate::ast::{Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::parser::Parser;
use crate::stack::ensure_sufficient_stack;
use crate::token::TokenKind;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token: TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Pratt loop. Expects the cursor on the first token of the expression and
/// leaves it on the last one.
pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    ensure_sufficient_stack(|| parse_expression_inner(parser, precedence))
}

fn parse_expression_inner(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let mut left_expression = prefix_parsing(parser)?;

    while !parser.peek_token_is(TokenKind::SemiColon)
        && precedence < precedence_of(parser.peek_token.kind)
    {
        let Some(infix_parse_function) = infix_parsing_function(parser.peek_token.kind) else {
            break;
        };
        parser.next_token();
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn parse_integer_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let literal = &parser.cur_token.literal;
    literal
        .parse()
        .map(Expression::IntegerLiteral)
        .map_err(|_| ParseError::InvalidInteger(literal.clone()))
}

fn parse_prefix_operation(
    parser: &mut Parser,
    kind: PrefixOperationKind,
) -> Result<Expression, ParseError> {
    parser.next_token();
    let operand = parse_expression(parser, Precedence::Prefix)?;

    Ok(Expression::PrefixOperation(kind, Box::new(operand)))
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    parser.next_token();
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);
    parser.expect_peek(TokenKind::RParen)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = parse_block_statement(parser)?;

    Ok(Expression::FunctionLiteral { parameters, body })
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    let mut identifiers = Vec::new();

    if parser.peek_token_is(TokenKind::RParen) {
        parser.next_token();
        return Ok(identifiers);
    }

    identifiers.push(parser.parse_ident()?);
    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        identifiers.push(parser.parse_ident()?);
    }
    parser.expect_peek(TokenKind::RParen)?;

    Ok(identifiers)
}

fn prefix_parsing(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.cur_token.kind {
        TokenKind::Ident => Ok(Expression::Identifier(Identifier {
            name: parser.cur_token.literal.clone(),
        })),
        TokenKind::Int => parse_integer_literal(parser),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Bang => parse_prefix_operation(parser, PrefixOperationKind::Bang),
        TokenKind::Minus => parse_prefix_operation(parser, PrefixOperationKind::Minus),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::If => parse_if_expression(parser),
        TokenKind::Function => parse_function_literal(parser),
        _ => Err(ParseError::NoPrefixFunction(parser.cur_token.clone())),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(token: TokenKind, kind: InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(token);
            parser.next_token();

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_call_function(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut arguments = Vec::new();

    if parser.peek_token_is(TokenKind::RParen) {
        parser.next_token();
    } else {
        parser.next_token();
        arguments.push(parse_expression(parser, Precedence::Lowest)?);
        while parser.peek_token_is(TokenKind::Comma) {
            parser.next_token();
            parser.next_token();
            arguments.push(parse_expression(parser, Precedence::Lowest)?);
        }
        parser.expect_peek(TokenKind::RParen)?;
    }

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

pub fn infix_parsing_function(token: TokenKind) -> Option<InfixFunction> {
    use InfixOperationKind as InfixKind;

    match token {
        TokenKind::Plus => Some(infix_operation(token, InfixKind::Plus)),
        TokenKind::Minus => Some(infix_operation(token, InfixKind::Minus)),
        TokenKind::LessThan => Some(infix_operation(token, InfixKind::LessThan)),
        TokenKind::GreaterThan => Some(infix_operation(token, InfixKind::GreaterThan)),
        TokenKind::Equal => Some(infix_operation(token, InfixKind::Equal)),
        TokenKind::NotEqual => Some(infix_operation(token, InfixKind::NotEqual)),
        TokenKind::Asterisk => Some(infix_operation(token, InfixKind::Multiply)),
        TokenKind::Slash => Some(infix_operation(token, InfixKind::Divide)),
        TokenKind::LParen => Some(Box::new(parse_call_function)),
        _ => None,
    }
}
