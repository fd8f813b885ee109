//! Converts an infix token stream into postfix (reverse Polish) order with the
//! shunting-yard algorithm. Evaluation order in the output encodes precedence and
//! associativity, so the evaluator never has to look at either.

use crate::calc_error::CalcError;
use crate::operations::Associativity;
use crate::tokens::Token;
use anyhow::Result;

/// Whether the operator on top of the stack has to be emitted before `incoming` is pushed.
fn pops_before(top: &Token, incoming: &Token) -> bool {
    let (Some(top_prec), Some(top_assoc), Some(prec)) =
        (top.precedence(), top.associativity(), incoming.precedence())
    else {
        return false;
    };
    match top_assoc {
        Associativity::Left => top_prec >= prec,
        Associativity::Right => top_prec > prec,
    }
}

pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operator_stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Variable(_) => output.push(token),
            Token::Operator(_) | Token::Assign => {
                while let Some(top) = operator_stack.last() {
                    if !pops_before(top, &token) {
                        break;
                    }
                    output.extend(operator_stack.pop());
                }
                operator_stack.push(token);
            }
            Token::LParen => operator_stack.push(token),
            Token::RParen => loop {
                match operator_stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(CalcError::MismatchedParentheses.into()),
                }
            },
        }
    }

    while let Some(op) = operator_stack.pop() {
        if op == Token::LParen {
            return Err(CalcError::MismatchedParentheses.into());
        }
        output.push(op);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_error::is_specific_calc_error;
    use crate::tokens::{lexer, tokens_to_string};

    fn postfix_str(input: &str) -> Result<String> {
        let postfix = to_postfix(lexer(input)?)?;
        Ok(tokens_to_string(&postfix))
    }

    #[test]
    fn test_precedence() -> Result<()> {
        assert_eq!(postfix_str("2 + 3 * 4")?, "2 3 4 * +");
        assert_eq!(postfix_str("2 * 3 + 4")?, "2 3 * 4 +");
        assert_eq!(postfix_str("10 / 2 - 3")?, "10 2 / 3 -");
        Ok(())
    }

    #[test]
    fn test_left_associativity() -> Result<()> {
        assert_eq!(postfix_str("8 - 4 - 2")?, "8 4 - 2 -");
        assert_eq!(postfix_str("8 / 4 * 2")?, "8 4 / 2 *");
        Ok(())
    }

    #[test]
    fn test_parentheses() -> Result<()> {
        assert_eq!(postfix_str("(2 + 3) * 4")?, "2 3 + 4 *");
        assert_eq!(postfix_str("3 + 4 * 2 / ( 1 - 5 )")?, "3 4 2 * 1 5 - / +");
        assert_eq!(postfix_str("((1))")?, "1");
        Ok(())
    }

    #[test]
    fn test_assignment() -> Result<()> {
        assert_eq!(postfix_str("x = 1 + 2")?, "x 1 2 + =");
        assert_eq!(postfix_str("x = y = 3")?, "x y 3 = =");
        assert_eq!(postfix_str("x = (y = 2) * 3")?, "x y 2 = 3 * =");
        Ok(())
    }

    #[test]
    fn test_mismatched_parentheses() {
        for input in ["(2 + 3", "2 + 3)", ")(", "((1)", "(1))"] {
            let result = postfix_str(input);
            assert!(
                is_specific_calc_error(&result.unwrap_err(), &CalcError::MismatchedParentheses),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_empty() -> Result<()> {
        assert!(to_postfix(vec![])?.is_empty());
        assert_eq!(postfix_str("()")?, "");
        Ok(())
    }
}
