//! Arithmetic expression evaluator
//!
//! Tokenizes a formula once, resolving `$<digit>` slot references against
//! the recorded values, then reduces it with a small recursive-descent
//! parser. Precedence: parentheses, then `*`/`/` left-to-right, then
//! `+`/`-` left-to-right. A `-` where an operand is expected is a unary
//! minus, which is how negative literals are told apart from subtraction.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{FormulaError, Result};

/// Evaluate `formula` against the recorded slot values.
///
/// `values` maps slot index to the canonical decimal string recorded for
/// that slot. Every referenced slot must have an entry; a missing one fails
/// the round with [`FormulaError::UnresolvedPlaceholder`].
///
/// Division by zero is not an error: the result is infinite (or NaN for
/// `0/0`) per IEEE 754.
pub fn evaluate(formula: &str, values: &HashMap<u8, String>) -> Result<f64> {
    let tokens = tokenize(formula, values)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        return Err(FormulaError::malformed(format!(
            "unexpected token after expression: {:?}",
            token
        )));
    }

    let result = eval_expr(&expr);
    debug!("formula '{}' reduced to {}", formula, result);
    Ok(result)
}

/// Lexical token
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Multiply,
    Divide,
    LeftParen,
    RightParen,
}

/// Tokenize the formula, resolving slot references as they are read.
fn tokenize(formula: &str, values: &HashMap<u8, String>) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = formula.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ' ' | '\t' | '\n' => continue,
            '(' => tokens.push(Token::LeftParen),
            ')' => tokens.push(Token::RightParen),
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Multiply),
            '/' => tokens.push(Token::Divide),
            '0'..='9' | '.' => {
                let mut number = String::new();
                number.push(ch);

                while let Some(&next_ch) = chars.peek() {
                    if next_ch.is_ascii_digit() || next_ch == '.' {
                        number.push(next_ch);
                        chars.next();
                    } else {
                        break;
                    }
                }

                let value = number.parse::<f64>().map_err(|_| {
                    FormulaError::malformed(format!("invalid number: {}", number))
                })?;
                tokens.push(Token::Number(value));
            }
            '$' => {
                let slot = match chars.next() {
                    Some(d) if d.is_ascii_digit() => d as u8 - b'0',
                    _ => {
                        return Err(FormulaError::malformed(
                            "expected slot digit after '$'".to_string(),
                        ))
                    }
                };

                let raw = values
                    .get(&slot)
                    .ok_or(FormulaError::UnresolvedPlaceholder(slot))?;
                let value = raw.trim().parse::<f64>().map_err(|_| {
                    FormulaError::malformed(format!(
                        "slot ${} value '{}' is not numeric",
                        slot, raw
                    ))
                })?;

                debug!("slot ${} resolved to {}", slot, value);
                tokens.push(Token::Number(value));
            }
            '%' | '^' => return Err(FormulaError::InvalidOperator(ch)),
            _ => {
                return Err(FormulaError::malformed(format!(
                    "unexpected character: '{}'",
                    ch
                )))
            }
        }
    }

    Ok(tokens)
}

/// Expression tree
#[derive(Debug, Clone)]
enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy)]
enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

fn eval_expr(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Negate(inner) => -eval_expr(inner),
        Expr::Binary { op, left, right } => {
            let a = eval_expr(left);
            let b = eval_expr(right);
            match op {
                BinOp::Add => a + b,
                BinOp::Subtract => a - b,
                BinOp::Multiply => a * b,
                BinOp::Divide => a / b,
            }
        }
    }
}

/// Recursive-descent parser over the token stream
struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_term()
    }

    /// `+` and `-`, left-to-right
    fn parse_term(&mut self) -> Result<Expr> {
        let mut expr = self.parse_factor()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// `*` and `/`, left-to-right
    fn parse_factor(&mut self) -> Result<Expr> {
        let mut expr = self.parse_unary()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Multiply => BinOp::Multiply,
                Token::Divide => BinOp::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Token::Minus) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Negate(Box::new(operand)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::LeftParen) => {
                let expr = self.parse_expression()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    _ => Err(FormulaError::malformed(
                        "expected ')' after expression".to_string(),
                    )),
                }
            }
            Some(token) => Err(FormulaError::malformed(format!(
                "unexpected token: {:?}",
                token
            ))),
            None => Err(FormulaError::malformed(
                "unexpected end of formula".to_string(),
            )),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }
}
