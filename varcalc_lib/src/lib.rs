//! This crate provides the expression engine of varcalc.
//! It tokenizes arithmetic expressions with variables, converts them to postfix order with the shunting-yard algorithm,
//! and evaluates the postfix form against a caller-owned binding table.
//! Session handling lives in the `varcalc` crate.

use anyhow::Result;

pub mod bindings;
pub mod calc_error;
pub mod evaluator;
pub mod operations;
pub mod parser;
pub mod tokens;

pub use bindings::Bindings;
pub use calc_error::{CalcError, ErrorKind};

/// Evaluates a single statement.
pub fn evaluate_statement(statement: &str, bindings: &mut Bindings) -> Result<f64> {
    let tokens = tokens::lexer(statement)?;
    let postfix = parser::to_postfix(tokens)?;
    evaluator::evaluate_postfix(postfix, bindings)
}

/// Whitespace the lexer skips. Anything else, including other Unicode spaces, has to reach
/// the lexer so it is reported as an invalid character.
fn is_expression_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Evaluates a `;`-separated sequence of statements and returns the value of the last one.
///
/// All statements share `bindings`. The first failing statement aborts the call, but
/// assignments made by the statements before it stay in the table.
pub fn evaluate(input: &str, bindings: &mut Bindings) -> Result<f64> {
    let mut result = None;
    for statement in input
        .split(';')
        .map(|s| s.trim_matches(is_expression_whitespace))
        .filter(|s| !s.is_empty()) {
        result = Some(evaluate_statement(statement, bindings)?);
    }
    result.ok_or_else(|| CalcError::EmptyExpression.into())
}
