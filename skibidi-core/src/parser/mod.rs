pub mod error;
pub mod expressions;
pub mod statements;

use tracing::{debug, trace};

use crate::ast::{Identifier, Program};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

/// Pratt parser pulling tokens from a [`Lexer`] on demand.
///
/// Syntax errors do not abort parsing: they are collected and available
/// through [`Parser::errors`] once [`Parser::parse_program`] returns.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) cur_token: Token,
    pub(crate) peek_token: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
        trace!(token = %self.cur_token, "advance");
    }

    pub(crate) fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub(crate) fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances only if the upcoming token has the expected kind.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_token_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(kind, &self.peek_token))
        }
    }

    pub(crate) fn parse_ident(&mut self) -> Result<Identifier, ParseError> {
        self.expect_peek(TokenKind::Ident)?;
        Ok(Identifier {
            name: self.cur_token.literal.clone(),
        })
    }

    pub(crate) fn skip_optional_semicolon(&mut self) {
        if self.peek_token_is(TokenKind::SemiColon) {
            self.next_token();
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cur_token_is(TokenKind::Eof) {
            match parse_statement(self) {
                Ok(statement) => {
                    trace!(%statement, "parsed statement");
                    statements.push(statement);
                }
                Err(err) => {
                    debug!(%err, "syntax error");
                    self.errors.push(err);
                    // Resume after the next semicolon. Errors inside a block
                    // resume in the middle of it.
                    while !self.cur_token_is(TokenKind::SemiColon)
                        && !self.cur_token_is(TokenKind::Eof)
                    {
                        self.next_token();
                    }
                }
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Hands back the program only when no syntax error was recorded.
    pub fn into_result(self, program: Program) -> Result<Program, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }
}

/// Lexes and parses `input` in one go.
pub fn parse(input: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    parser.into_result(program)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::ast::{
        BlockStatement, Expression, InfixOperationKind, LetStatement, PrefixOperationKind,
        ReturnStatement, Statement,
    };

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let program = match parse(input) {
                Ok(program) => program,
                Err(errors) => panic!("{input:?} failed to parse: {errors:?}"),
            };

            assert_eq!(program.to_string(), expected)
        }
    }

    fn error_messages(input: &str) -> Vec<String> {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_program();
        parser.errors().iter().map(|err| err.to_string()).collect()
    }

    #[test]
    fn test_let_statements() {
        let program = parse("let x = 5;\nlet y = true;\nlet foobar = y;").unwrap();

        let names = program
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Let(LetStatement { identifier, .. }) => identifier.name.to_string(),
                other => panic!("expected a let statement, got {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "foobar"]);

        test_parsing(vec![
            ("let x = 5;", "let x = 5;\n"),
            ("let y = true", "let y = true;\n"),
            ("let foobar = y;", "let foobar = y;\n"),
        ]);
    }

    #[test]
    fn test_return_statements() {
        let program = parse("return 5; return 10; return add(15);").unwrap();

        assert_eq!(program.statements.len(), 3);
        assert_eq!(
            program.statements[0],
            Statement::Return(ReturnStatement {
                value: Expression::IntegerLiteral(5)
            })
        );
        test_parsing(vec![("return x + y", "return (x + y);\n")]);
    }

    #[test]
    fn test_literals() {
        let program = parse("foobar; 5; true; false;").unwrap();

        assert_eq!(
            program.statements,
            vec![
                Statement::Expression(Expression::Identifier(Identifier::new("foobar"))),
                Statement::Expression(Expression::IntegerLiteral(5)),
                Statement::Expression(Expression::BooleanLiteral(true)),
                Statement::Expression(Expression::BooleanLiteral(false)),
            ]
        );
    }

    #[test]
    fn test_prefix_and_infix_nodes() {
        let program = parse("!5; -15; 5 != 5;").unwrap();

        assert_eq!(
            program.statements,
            vec![
                Statement::Expression(Expression::PrefixOperation(
                    PrefixOperationKind::Bang,
                    Box::new(Expression::IntegerLiteral(5))
                )),
                Statement::Expression(Expression::PrefixOperation(
                    PrefixOperationKind::Minus,
                    Box::new(Expression::IntegerLiteral(15))
                )),
                Statement::Expression(Expression::InfixOperation(
                    InfixOperationKind::NotEqual,
                    Box::new(Expression::IntegerLiteral(5)),
                    Box::new(Expression::IntegerLiteral(5))
                )),
            ]
        );
    }

    #[test]
    fn test_operator_precedence() {
        let tests = vec![
            ("1 + 2 * 3", "(1 + (2 * 3));\n"),
            ("(1 + 2) * 3", "((1 + 2) * 3);\n"),
            ("-a * b", "((-a) * b);\n"),
            ("!-a", "(!(-a));\n"),
            ("a + b + c", "((a + b) + c);\n"),
            ("a + b - c", "((a + b) - c);\n"),
            ("a * b * c", "((a * b) * c);\n"),
            ("a * b / c", "((a * b) / c);\n"),
            ("a + b / c", "(a + (b / c));\n"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f);\n",
            ),
            ("3 + 4; -5 * 5", "(3 + 4);\n((-5) * 5);\n"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4));\n"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4));\n"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));\n",
            ),
            ("true", "true;\n"),
            ("3 > 5 == false", "((3 > 5) == false);\n"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4);\n"),
            ("2 / (5 + 5)", "(2 / (5 + 5));\n"),
            ("-(5 + 5)", "(-(5 + 5));\n"),
            ("!(true == true)", "(!(true == true));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_expression_rendering_without_statement() {
        let program = parse("1 + 2 * 3").unwrap();
        let Statement::Expression(expression) = &program.statements[0] else {
            panic!("expected an expression statement");
        };

        assert_eq!(expression.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn test_call_expression() {
        let tests = vec![
            ("add(1, 2 * 3, 4 + 5);", "add(1, (2 * 3), (4 + 5));\n"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d);\n"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));\n",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g));\n",
            ),
            ("noargs()", "noargs();\n"),
            ("f(x)(y)", "f(x)(y);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditional() {
        let tests = vec![
            ("if (x < y) { x }", "if (x < y) { x; };\n"),
            (
                "if (x < y) { x } else { y }",
                "if (x < y) { x; } else { y; };\n",
            ),
            ("if (x) { }", "if (x) { };\n"),
            ("if (f(x)) { let y = 1; y }", "if (f(x)) { let y = 1; y; };\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditional_node() {
        let program = parse("if (x < y) { x } else { y }").unwrap();

        assert_eq!(
            program.statements,
            vec![Statement::Expression(Expression::IfExpression {
                condition: Box::new(Expression::InfixOperation(
                    InfixOperationKind::LessThan,
                    Box::new(Expression::Identifier(Identifier::new("x"))),
                    Box::new(Expression::Identifier(Identifier::new("y"))),
                )),
                consequence: BlockStatement {
                    statements: vec![Statement::Expression(Expression::Identifier(
                        Identifier::new("x")
                    ))],
                },
                alternative: Some(BlockStatement {
                    statements: vec![Statement::Expression(Expression::Identifier(
                        Identifier::new("y")
                    ))],
                }),
            })]
        );
    }

    #[test]
    fn test_function() {
        let tests = vec![
            ("fn(x, y) { x + y; }", "fn(x, y) { (x + y); };\n"),
            ("fn() {};", "fn() { };\n"),
            ("fn(x) {}", "fn(x) { };\n"),
            (
                "let add = fn(x, y) { return x + y; };",
                "let add = fn(x, y) { return (x + y); };\n",
            ),
            ("fn(x) { x }(5)", "fn(x) { x; }(5);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_missing_let_identifier_is_reported() {
        let errors = error_messages("let = 5; let x = 10; x;");

        assert_eq!(errors, vec!["expected next token to be IDENT, got = instead"]);
    }

    #[test]
    fn test_parsing_continues_after_error() {
        let mut parser = Parser::new(Lexer::new("let = 5; let x = 10; x;"));
        let program = parser.parse_program();

        assert!(!parser.errors().is_empty());
        assert_eq!(program.to_string(), "let x = 10;\nx;\n");
    }

    #[test]
    fn test_error_messages() {
        let tests = vec![
            ("let x 5;", "expected next token to be =, got INT instead"),
            ("let 838383;", "expected next token to be IDENT, got INT instead"),
            ("+ 1;", "no prefix parse function for + found"),
            ("1 +", "no prefix parse function for EOF found"),
            ("if x { 1 }", "expected next token to be (, got IDENT instead"),
            ("(1 + 2", "expected next token to be ), got EOF instead"),
            ("fn(x y) { x }", "expected next token to be ), got IDENT instead"),
            ("fn(1) { }", "expected next token to be IDENT, got INT instead"),
            ("add(1 2)", "expected next token to be ), got INT instead"),
            (
                "99999999999999999999;",
                "could not parse \"99999999999999999999\" as integer",
            ),
        ];

        for (input, expected) in tests {
            assert_eq!(error_messages(input), vec![expected], "input: {input:?}");
        }
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let errors = error_messages("let = 1; let y 2; 3;");

        assert_eq!(
            errors,
            vec![
                "expected next token to be IDENT, got = instead",
                "expected next token to be =, got INT instead",
            ]
        );
    }

    #[test]
    fn test_unterminated_block_ends_at_eof() {
        test_parsing(vec![("if (x) { y", "if (x) { y; };\n")]);
    }

    #[test]
    fn test_error_points_at_token() {
        let mut parser = Parser::new(Lexer::new("let x 5;"));
        parser.parse_program();

        let ParseError::UnexpectedToken { got, .. } = &parser.errors()[0] else {
            panic!("expected an unexpected-token error, got {:?}", parser.errors());
        };
        assert_eq!(got, &Token::new(TokenKind::Int, "5", 6));
    }

    #[test]
    fn test_deeply_nested_groups() {
        let depth = 50_000;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(parse(&input).map(|program| program.to_string()), Ok("1;\n".to_owned()));
    }

    #[test]
    fn test_deeply_nested_operations() {
        let depth = 5000;
        let input = format!("{}x", "-".repeat(depth));
        let program = parse(&input).unwrap();

        let Statement::Expression(expression) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let mut expression = expression;
        let mut operators = 0;
        while let Expression::PrefixOperation(PrefixOperationKind::Minus, operand) = expression {
            operators += 1;
            expression = operand.as_ref();
        }
        assert_eq!(operators, depth);
        assert_eq!(expression, &Expression::Identifier(Identifier::new("x")));
    }

    // -- Rendering is a fixed point of reparsing --

    fn identifier() -> impl Strategy<Value = Identifier> {
        prop::sample::select(vec!["a", "b", "foo", "bar_baz", "_x"]).prop_map(Identifier::new)
    }

    fn prefix_kind() -> impl Strategy<Value = PrefixOperationKind> {
        prop_oneof![
            Just(PrefixOperationKind::Bang),
            Just(PrefixOperationKind::Minus),
        ]
    }

    fn infix_kind() -> impl Strategy<Value = InfixOperationKind> {
        use InfixOperationKind::*;
        prop::sample::select(vec![
            Plus,
            Minus,
            LessThan,
            GreaterThan,
            Equal,
            NotEqual,
            Multiply,
            Divide,
        ])
    }

    fn statement(expression: BoxedStrategy<Expression>) -> BoxedStrategy<Statement> {
        prop_oneof![
            (identifier(), expression.clone()).prop_map(|(identifier, value)| {
                Statement::Let(LetStatement { identifier, value })
            }),
            expression
                .clone()
                .prop_map(|value| Statement::Return(ReturnStatement { value })),
            expression.prop_map(Statement::Expression),
        ]
        .boxed()
    }

    fn expression() -> BoxedStrategy<Expression> {
        let leaf = prop_oneof![
            identifier().prop_map(Expression::Identifier),
            (0..=i64::MAX).prop_map(Expression::IntegerLiteral),
            any::<bool>().prop_map(Expression::BooleanLiteral),
        ];

        leaf.prop_recursive(4, 32, 3, |inner| {
            let block = prop::collection::vec(statement(inner.clone()), 0..3)
                .prop_map(|statements| BlockStatement { statements })
                .boxed();

            prop_oneof![
                (prefix_kind(), inner.clone())
                    .prop_map(|(kind, operand)| Expression::PrefixOperation(
                        kind,
                        Box::new(operand)
                    )),
                (infix_kind(), inner.clone(), inner.clone()).prop_map(|(kind, left, right)| {
                    Expression::InfixOperation(kind, Box::new(left), Box::new(right))
                }),
                (inner.clone(), block.clone(), prop::option::of(block.clone())).prop_map(
                    |(condition, consequence, alternative)| Expression::IfExpression {
                        condition: Box::new(condition),
                        consequence,
                        alternative,
                    }
                ),
                (prop::collection::vec(identifier(), 0..3), block).prop_map(
                    |(parameters, body)| Expression::FunctionLiteral { parameters, body }
                ),
                (inner.clone(), prop::collection::vec(inner, 0..3)).prop_map(
                    |(function, arguments)| Expression::CallExpression {
                        function: Box::new(function),
                        arguments,
                    }
                ),
            ]
        })
        .boxed()
    }

    proptest! {
        #[test]
        fn rendering_reparses_to_same_program(
            statements in prop::collection::vec(statement(expression()), 0..4)
        ) {
            let program = Program { statements };
            let rendered = program.to_string();

            let reparsed = parse(&rendered);
            prop_assert_eq!(reparsed, Ok(program), "rendered: {}", rendered);
        }
    }
}
