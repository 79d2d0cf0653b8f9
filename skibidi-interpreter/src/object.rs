use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use skibidi_core::ast;

use thiserror::Error;

/// Runtime value.
///
/// The derived `PartialEq` is structural and only meant for tests; the
/// language's own `==` on non-integers compares `Rc` identity, which works
/// because `true`, `false` and `null` are canonical singletons.
#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    ReturnValue(Rc<Object>),
    Error(String),
    Function(Function),
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn return_value(value: Rc<Object>) -> Rc<Object> {
        Rc::new(Object::ReturnValue(value))
    }
    pub fn error(error: &EvaluationError) -> Rc<Object> {
        Rc::new(Object::Error(error.to_string()))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
        }
    }

    /// Printable form shown by the REPL.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(function) => write!(
                f,
                "fn({}) {}",
                function
                    .parameters
                    .iter()
                    .map(|id| id.name.as_ref())
                    .collect::<Box<[&str]>>()
                    .join(", "),
                function.body
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    ReturnValue,
    Error,
    Function,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
        };
        write!(f, "{}", name)
    }
}

/// A closure: parameters and body plus the environment it was defined in.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

// The environment may hold this very function, so it is left out.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish()
    }
}

/// Early exit out of a statement sequence.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: ObjectType,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: ObjectType,
        operation: ast::InfixOperationKind,
        right: ObjectType,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(Rc<str>),
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("wrong number of arguments: want={expected}, got={actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("division by zero")]
    DivisionByZero,
}
