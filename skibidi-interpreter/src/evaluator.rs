use std::rc::Rc;

use tracing::debug;

use crate::environment::Environment;
use crate::object::{EvaluationError, Function, Object, QuickReturn};
use skibidi_core::ast;
use skibidi_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};
use skibidi_core::stack::ensure_sufficient_stack;

/// Any AST node the evaluator accepts.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a ast::Program),
    Statement(&'a ast::Statement),
    BlockStatement(&'a ast::BlockStatement),
    Expression(&'a ast::Expression),
}

impl<'a> From<&'a ast::Program> for Node<'a> {
    fn from(program: &'a ast::Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a ast::Statement> for Node<'a> {
    fn from(statement: &'a ast::Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a ast::BlockStatement> for Node<'a> {
    fn from(block: &'a ast::BlockStatement) -> Self {
        Node::BlockStatement(block)
    }
}

impl<'a> From<&'a ast::Expression> for Node<'a> {
    fn from(expression: &'a ast::Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Evaluates `node` and reports early exits as objects: an error becomes
/// [`Object::Error`] and a `return` below the program level becomes
/// [`Object::ReturnValue`].
pub fn eval<'a>(node: impl Into<Node<'a>>, environment: &Environment) -> Rc<Object> {
    let result = match node.into() {
        Node::Program(program) => {
            return eval_program(program, environment).unwrap_or_else(|err| Object::error(&err))
        }
        Node::Statement(statement) => eval_statement(statement, environment),
        Node::BlockStatement(block) => eval_block_statement(block, environment),
        Node::Expression(expression) => eval_expression(expression, environment),
    };

    match result {
        Ok(object) => object,
        Err(QuickReturn::Return(value)) => Object::return_value(value),
        Err(QuickReturn::Error(err)) => Object::error(&err),
    }
}

pub fn eval_program(
    program: &ast::Program,
    environment: &Environment,
) -> Result<Rc<Object>, EvaluationError> {
    let mut output = Object::null();
    for statement in &program.statements {
        let result = eval_statement(statement, environment);

        match result {
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => {
                debug!(%error, "evaluation stopped");
                return Err(error);
            }
            Ok(object) => output = object,
        };
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    Ok(Object::null())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_expression(
    expression: &Expression,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    ensure_sufficient_stack(|| eval_expression_inner(expression, environment))
}

fn eval_expression_inner(
    expression: &Expression,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::Identifier(identifier) => environment.get(&identifier.name).ok_or_else(|| {
            EvaluationError::IdentifierNotFound(identifier.name.clone()).into()
        }),
        Expression::PrefixOperation(kind, operand) => {
            let right = eval_expression(operand, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if is_truthy(&condition) {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, environment)?;
            let Object::Function(function) = callee.as_ref() else {
                return Err(EvaluationError::NotAFunction(callee.object_type()).into());
            };
            let arguments = eval_expressions(arguments, environment)?;
            apply_function(function, arguments)
        }
    }
}

fn eval_expressions(
    arguments: &[Expression],
    environment: &Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(arguments.len());
    for argument in arguments {
        result.push(eval_expression(argument, environment)?);
    }
    Ok(result)
}

#[tracing::instrument(level = "debug", skip_all, fields(arity = function.parameters.len()))]
fn apply_function(
    function: &Function,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, QuickReturn> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::WrongArgumentCount {
            expected: function.parameters.len(),
            actual: arguments.len(),
        }
        .into());
    }

    let new_environment = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        new_environment.set(parameter.name.clone(), argument);
    }

    match ensure_sufficient_stack(|| eval_block_statement(&function.body, &new_environment)) {
        Err(QuickReturn::Return(value)) => Ok(value),
        other => other,
    }
}

/// Only `null` and `false` are falsy.
fn is_truthy(object: &Object) -> bool {
    match object {
        Object::Null => false,
        Object::Boolean(value) => *value,
        _ => true,
    }
}

fn eval_prefix_operation(
    kind: PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (PrefixOperationKind::Bang, _) => Ok(Object::boolean(!is_truthy(&right))),
        (PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperationKind::Minus, _) => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: right.object_type(),
        }
        .into()),
    }
}

fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        _ if kind == InfixOperationKind::Equal => Ok(Object::boolean(Rc::ptr_eq(&left, &right))),
        _ if kind == InfixOperationKind::NotEqual => {
            Ok(Object::boolean(!Rc::ptr_eq(&left, &right)))
        }
        _ if left.object_type() != right.object_type() => Err(EvaluationError::TypeMismatch {
            left: left.object_type(),
            operation: kind,
            right: right.object_type(),
        }
        .into()),
        _ => Err(EvaluationError::UnknownInfixOperator {
            left: left.object_type(),
            operation: kind,
            right: right.object_type(),
        }
        .into()),
    }
}

fn eval_integer_infix_operation(
    kind: InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, QuickReturn> {
    match kind {
        InfixOperationKind::Plus => Ok(Object::integer(left.wrapping_add(right))),
        InfixOperationKind::Minus => Ok(Object::integer(left.wrapping_sub(right))),
        InfixOperationKind::Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        InfixOperationKind::Divide => {
            if right == 0 {
                return Err(EvaluationError::DivisionByZero.into());
            }
            Ok(Object::integer(left.wrapping_div(right)))
        }
        InfixOperationKind::LessThan => Ok(Object::boolean(left < right)),
        InfixOperationKind::GreaterThan => Ok(Object::boolean(left > right)),
        InfixOperationKind::Equal => Ok(Object::boolean(left == right)),
        InfixOperationKind::NotEqual => Ok(Object::boolean(left != right)),
    }
}
