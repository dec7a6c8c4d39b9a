//! Sandboxed numeric expressions for command-line values such as `2**-80`.
//!
//! The language has numeric literals, `+ - * /`, exponentiation (`**` or `^`)
//! and parentheses. Nothing else is recognized, so evaluating user input can
//! never reach names, functions, or the host environment.

pub mod lexer;
pub mod parser;

use lexer::Token;

pub use parser::eval;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number {literal:?} at byte {pos}")]
    InvalidNumber { literal: String, pos: usize },
    #[error("unexpected token {token:?} at token {index}")]
    UnexpectedToken { token: Token, index: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("trailing input starting with {token:?} at token {index}")]
    TrailingInput { token: Token, index: usize },
    #[error("expression nested deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("{base} ** {exponent} is not a real number")]
    NotReal { base: f64, exponent: f64 },
    #[error("expression evaluates to non-finite value {0}")]
    NonFinite(f64),
}

/// Parse `s` as a plain float literal, falling back to expression evaluation.
///
/// Plain literals (`0.001`, `1e-24`, `inf`) take the fast path and are never
/// handed to the evaluator.
pub fn parse_float_or_expr(s: &str) -> Result<f64, ExprError> {
    let s = s.trim();
    if let Ok(value) = s.parse::<f64>() {
        return Ok(value);
    }
    tracing::debug!(input = s, "not a float literal, evaluating as expression");
    eval(s)
}
