//! CSS Values & Units Level 3: §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::ParseError;
use cssparser::{Parser, Token};

/// A CSS <number>, kept at the precision of its source text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(pub f64);

/// Read an unsigned decimal literal: `4`, `0.25`, `.5`.
///
/// Signs, exponents and a trailing `.` are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let digits_only = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    let well_formed = match text.split_once('.') {
        Some((whole, fraction)) => {
            digits_only(whole) && !fraction.is_empty() && digits_only(fraction)
        }
        None => !text.is_empty() && digits_only(text),
    };
    if !well_formed {
        return None;
    }
    text.parse().ok()
}

/// Parse a CSS <number> (§4.2) written as an unsigned decimal.
///
/// The value is taken from the source text rather than the tokenizer's `f32`, so
/// `0.1` stays `0.1` in later arithmetic.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<number>` and
/// `ParseError::UnsupportedNumber` when it is signed or uses an exponent.
pub fn parse_number(input: &mut Parser) -> Result<Number, ParseError> {
    let start = input.position();
    let is_number = input
        .next()
        .is_ok_and(|token| matches!(token, Token::Number { .. }));
    if !is_number {
        return Err(ParseError::UnexpectedToken);
    }
    parse_decimal(input.slice_from(start).trim())
        .map(Number)
        .ok_or(ParseError::UnsupportedNumber)
}
