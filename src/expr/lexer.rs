use super::ExprError;

/// Tokens of the numeric expression language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`
    Pow,
    LParen,
    RParen,
}

/// Split `input` into tokens. Whitespace is ignored; anything that is not a
/// numeric literal, operator, or parenthesis is rejected.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
            }
            b'+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                tokens.push(Token::Pow);
                pos += 2;
            }
            b'*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            b'^' => {
                tokens.push(Token::Pow);
                pos += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            b'0'..=b'9' | b'.' => {
                let (value, next) = lex_number(input, pos)?;
                tokens.push(Token::Number(value));
                pos = next;
            }
            _ => {
                // report the full char, not a UTF-8 fragment
                let ch = input[pos..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar { ch, pos });
            }
        }
    }

    Ok(tokens)
}

/// Lex a decimal literal starting at `start`: `digits [. digits] [e [+-] digits]`.
/// Returns the value and the index just past the literal.
fn lex_number(input: &str, start: usize) -> Result<(f64, usize), ExprError> {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = digits_from(start);
    let mut mantissa_digits = end - start;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return Err(ExprError::InvalidNumber {
            literal: input[start..end].to_string(),
            pos: start,
        });
    }

    // Exponent is only consumed if digits follow, so `2e` fails as a trailing `e`.
    if matches!(bytes.get(end).copied(), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp).copied(), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let literal = &input[start..end];
    let value = literal.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
        literal: literal.to_string(),
        pos: start,
    })?;
    Ok((value, end))
}
