//! CSS Values & Units Level 3: §6 Dimensions
//! Spec: <https://www.w3.org/TR/css-values-3/#dimensions>

use crate::ParseError;
use crate::chapter_4_numbers::parse_decimal;
use cssparser::{Parser, Token};

/// A number followed by a unit, e.g. `0.25rem`.
///
/// Units are not interpreted; only lowercase ASCII unit names are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: String,
}

/// Parse a `<dimension>` written as an unsigned decimal and a lowercase unit.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a dimension with a
/// lowercase ASCII unit, and `ParseError::UnsupportedNumber` when its number is signed
/// or uses an exponent.
pub fn parse_dimension(input: &mut Parser) -> Result<Dimension, ParseError> {
    let start = input.position();
    let unit = match input.next() {
        Ok(Token::Dimension { unit, .. })
            if !unit.is_empty() && unit.bytes().all(|byte| byte.is_ascii_lowercase()) =>
        {
            (**unit).to_owned()
        }
        Ok(_) | Err(_) => return Err(ParseError::UnexpectedToken),
    };
    let text = input.slice_from(start).trim();
    let value = text
        .strip_suffix(unit.as_str())
        .and_then(parse_decimal)
        .ok_or(ParseError::UnsupportedNumber)?;
    Ok(Dimension { value, unit })
}
