use crate::calc_error::CalcError;
use crate::operations::{Associativity, BinaryOp};
use anyhow::Result;
use itertools::Itertools;
pub use logos::Logos;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// A numeric literal as it appeared in the input. The text is only parsed to a float
/// when the evaluator consumes it.
#[derive(PartialEq, Clone)]
pub struct Number {
    pub value: String,
}
impl Number {
    pub fn to_f64(&self) -> Result<f64> {
        self.value
            .parse::<f64>()
            .map_err(|_| CalcError::InvalidNumber(self.value.clone()).into())
    }
}
impl FromStr for Number {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Number {
            value: s.to_string(),
        })
    }
}
impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
impl Debug for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number({})", self.value)
    }
}

/// `[A-Za-z][A-Za-z0-9]*`
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// A variable name that is known to be valid. The only way to build one is through
/// validation, so a binding table can never hold a malformed key.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct VariableName {
    name: String,
}
impl VariableName {
    pub fn as_str(&self) -> &str {
        &self.name
    }
}
impl FromStr for VariableName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if !is_valid_variable_name(s) {
            return Err(CalcError::InvalidVariableName(s.to_string()).into());
        }
        Ok(VariableName {
            name: s.to_string(),
        })
    }
}
impl Display for VariableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexingError {
    #[default]
    InvalidCharacter,
    InvalidVariableName(String),
}

fn variable_name(lex: &mut logos::Lexer<Token>) -> Result<VariableName, LexingError> {
    lex.slice()
        .parse()
        .map_err(|_| LexingError::InvalidVariableName(lex.slice().to_string()))
}

pub fn lexer(input: &str) -> Result<Vec<Token>> {
    let mut lex = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(LexingError::InvalidCharacter) => {
                let c = lex.slice().chars().next().unwrap_or_default();
                return Err(CalcError::InvalidCharacter(c).into());
            }
            Err(LexingError::InvalidVariableName(name)) => {
                return Err(CalcError::InvalidVariableName(name).into())
            }
        }
    }
    Ok(tokens)
}

#[derive(Logos, PartialEq, Clone, Debug)]
#[logos(skip r"[ \t\n\r\f\v]+")]
#[logos(error = LexingError)]
pub enum Token {
    #[token("+", |_| BinaryOp::Add)]
    #[token("-", |_| BinaryOp::Subtract)]
    #[token("*", |_| BinaryOp::Multiply)]
    #[token("/", |_| BinaryOp::Divide)]
    Operator(BinaryOp),

    #[regex(r"[0-9][0-9.]*", |lex| Number { value: lex.slice().to_string() })]
    #[regex(r"\.[0-9][0-9.]*", |lex| Number { value: lex.slice().to_string() })]
    Number(Number),

    // The second pattern catches words such as `1var` so they are reported as bad names.
    #[regex("[a-zA-Z][a-zA-Z0-9]*", variable_name)]
    #[regex("[0-9][0-9.]*[a-zA-Z][a-zA-Z0-9]*", variable_name)]
    Variable(VariableName),

    #[token("=")]
    Assign,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

impl Token {
    /// Binding strength of operator tokens; `None` for everything else.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Self::Operator(op) => Some(op.precedence()),
            Self::Assign => Some(0),
            _ => None,
        }
    }

    pub fn associativity(&self) -> Option<Associativity> {
        match self {
            Self::Operator(op) => Some(op.associativity()),
            Self::Assign => Some(Associativity::Right),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{}", op),
            Self::Number(n) => write!(f, "{}", n),
            Self::Variable(v) => write!(f, "{}", v),
            Self::Assign => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}
