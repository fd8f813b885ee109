use std::fmt;

use thiserror::Error;

/// The four categories of failure an evaluation call can report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Eval,
    InvalidName,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "LexError"),
            ErrorKind::Syntax => write!(f, "SyntaxError"),
            ErrorKind::Eval => write!(f, "EvalError"),
            ErrorKind::InvalidName => write!(f, "InvalidNameError"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum CalcError {
    #[error("Invalid character in expression: {0}")]
    InvalidCharacter(char),

    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    #[error("Invalid expression: not enough operands for '{0}'")]
    NotEnoughOperands(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid target for assignment: {0}")]
    InvalidAssignmentTarget(String),

    #[error("Invalid expression")]
    InvalidExpression,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Empty expression")]
    EmptyExpression,

    #[error("Invalid variable name: {0}")]
    InvalidVariableName(String),
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidCharacter(_) => ErrorKind::Lex,
            CalcError::MismatchedParentheses => ErrorKind::Syntax,
            CalcError::InvalidVariableName(_) => ErrorKind::InvalidName,
            CalcError::NotEnoughOperands(_)
            | CalcError::DivisionByZero
            | CalcError::UnknownVariable(_)
            | CalcError::InvalidAssignmentTarget(_)
            | CalcError::InvalidExpression
            | CalcError::InvalidNumber(_)
            | CalcError::EmptyExpression => ErrorKind::Eval,
        }
    }
}

/// Checks whether an error coming out of the engine is exactly `expected_error`.
pub fn is_specific_calc_error(error: &anyhow::Error, expected_error: &CalcError) -> bool {
    if let Some(actual_error) = error.downcast_ref::<CalcError>() {
        actual_error == expected_error
    } else {
        false
    }
}

/// The kind of an engine error, or `None` if the error did not originate in the engine.
pub fn error_kind(error: &anyhow::Error) -> Option<ErrorKind> {
    error.downcast_ref::<CalcError>().map(CalcError::kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CalcError::InvalidCharacter('#').to_string(),
            "Invalid character in expression: #"
        );
        assert_eq!(
            CalcError::UnknownVariable("z".to_string()).to_string(),
            "Unknown variable: z"
        );
        assert_eq!(
            CalcError::InvalidAssignmentTarget("5".to_string()).to_string(),
            "Invalid target for assignment: 5"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = CalcError::DivisionByZero.into();
        assert!(is_specific_calc_error(&err, &CalcError::DivisionByZero));
        assert!(!is_specific_calc_error(&err, &CalcError::InvalidExpression));
        assert_eq!(error_kind(&err), Some(ErrorKind::Eval));
        assert_eq!(err.to_string(), "Division by zero");

        let other = anyhow::anyhow!("not ours");
        assert_eq!(error_kind(&other), None);
    }
}
