//! Prints the token stream and the postfix form of an expression. Useful when a statement
//! does not evaluate the way you expect.

use anyhow::Result;
use logos::Logos;
use varcalc_lib::parser::to_postfix;
use varcalc_lib::tokens::{lexer, tokens_to_string, Token};

fn main() -> Result<()> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "x = 1 + 2 * (3 - y)".to_string());

    for statement in input.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        println!("statement: {}", statement);
        for (token, span) in Token::lexer(statement).spanned() {
            println!("  {:>3}..{:<3} {:?}", span.start, span.end, token);
        }
        let postfix = to_postfix(lexer(statement)?)?;
        println!("  postfix: {}", tokens_to_string(&postfix));
    }
    Ok(())
}
