//! Stack machine over postfix tokens.
//!
//! Variables are pushed as references and only looked up when an operator consumes them.
//! That is what lets `=` treat its left operand as a write target instead of a value.

use std::fmt;

use crate::bindings::Bindings;
use crate::calc_error::CalcError;
use crate::tokens::{Number, Token, VariableName};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A number written in the input, kept with its source text.
    Constant { value: f64, token: Number },
    /// A value computed by an operator.
    Literal(f64),
    Reference(VariableName),
}

impl Operand {
    pub fn resolve(&self, bindings: &Bindings) -> Result<f64> {
        match self {
            Operand::Constant { value, .. } | Operand::Literal(value) => Ok(*value),
            Operand::Reference(name) => bindings.resolve(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant { token, .. } => write!(f, "{}", token),
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Reference(name) => write!(f, "{}", name),
        }
    }
}

/// Pops the two operands of `op`, right operand first.
fn pop_pair(stack: &mut Vec<Operand>, op: &Token) -> Result<(Operand, Operand)> {
    match (stack.pop(), stack.pop()) {
        (Some(right), Some(left)) => Ok((left, right)),
        _ => Err(CalcError::NotEnoughOperands(op.to_string()).into()),
    }
}

pub fn evaluate_postfix(postfix: Vec<Token>, bindings: &mut Bindings) -> Result<f64> {
    let mut stack: Vec<Operand> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(token) => {
                let value = token.to_f64()?;
                stack.push(Operand::Constant { value, token });
            }
            Token::Variable(name) => stack.push(Operand::Reference(name)),
            Token::Operator(op) => {
                let (left, right) = pop_pair(&mut stack, &token)?;
                let right = right.resolve(bindings)?;
                let left = left.resolve(bindings)?;
                stack.push(Operand::Literal(op.apply(left, right)?));
            }
            Token::Assign => {
                let (target, value) = pop_pair(&mut stack, &token)?;
                let value = value.resolve(bindings)?;
                match target {
                    Operand::Reference(name) => bindings.assign(name, value),
                    Operand::Constant { .. } | Operand::Literal(_) => {
                        return Err(CalcError::InvalidAssignmentTarget(target.to_string()).into())
                    }
                }
                stack.push(Operand::Literal(value));
            }
            // only reachable with postfix that was not built by `to_postfix`
            Token::LParen | Token::RParen => return Err(CalcError::InvalidExpression.into()),
        }
    }

    match stack.as_slice() {
        [result] => result.resolve(bindings),
        _ => Err(CalcError::InvalidExpression.into()),
    }
}
