use super::lexer::{tokenize, Token};
use super::ExprError;

/// Maximum nesting of parentheses and unary signs.
/// Bounds recursion on attacker-controlled input like "((((...".
pub const MAX_DEPTH: usize = 64;

/// Recursive-descent evaluator over a token stream.
///
/// ```text
/// expr  := term (('+' | '-') term)*
/// term  := unary (('*' | '/') unary)*
/// unary := ('-' | '+') unary | power
/// power := atom (('**' | '^') unary)?
/// atom  := NUMBER | '(' expr ')'
/// ```
///
/// The right operand of `**` is a `unary`, which makes exponentiation
/// right-associative and lets the exponent carry a sign (`2**-80`), while a
/// leading minus still binds looser than the power (`-2**2 == -4`).
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { max: MAX_DEPTH });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<f64, ExprError> {
        let mut acc = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == Token::Plus { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut acc = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = if op == Token::Star {
                acc * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                acc / rhs
            };
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<f64, ExprError> {
        match self.peek() {
            Some(sign @ (Token::Minus | Token::Plus)) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.ascend();
                Ok(if sign == Token::Minus { -value } else { value })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, ExprError> {
        let base = self.atom()?;
        if self.peek() != Some(Token::Pow) {
            return Ok(base);
        }
        self.pos += 1;
        self.descend()?;
        let exponent = self.unary()?;
        self.ascend();

        if base == 0.0 && exponent < 0.0 {
            return Err(ExprError::DivisionByZero);
        }
        let value = base.powf(exponent);
        if value.is_nan() {
            return Err(ExprError::NotReal { base, exponent });
        }
        Ok(value)
    }

    fn atom(&mut self) -> Result<f64, ExprError> {
        let at = self.pos;
        match self.bump() {
            Some(Token::Number(v)) => Ok(v),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                self.ascend();
                match self.bump() {
                    Some(Token::RParen) => Ok(value),
                    Some(tok) => Err(ExprError::UnexpectedToken { token: tok, index: self.pos - 1 }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(tok) => Err(ExprError::UnexpectedToken { token: tok, index: at }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

/// Evaluate a restricted numeric expression.
///
/// Only numeric literals, `+ - * /`, `**` (or `^`) and parentheses are
/// understood; there are no names, calls, or variables.
pub fn eval(input: &str) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser::new(tokens);
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(ExprError::TrailingInput {
            token,
            index: parser.pos,
        });
    }
    if !value.is_finite() {
        return Err(ExprError::NonFinite(value));
    }
    Ok(value)
}
