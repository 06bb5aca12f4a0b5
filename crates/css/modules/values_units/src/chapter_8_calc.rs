//! CSS Values & Units Level 3: §8.1 Mathematical Expressions, restricted to a single product
//! Spec: <https://www.w3.org/TR/css-values-3/#calc-notation>
//!
//! Only `calc(<dimension> * <number>)` is evaluated. Everything else, including other
//! operators and nested expressions, is copied through unchanged.

use crate::ParseError;
use crate::chapter_4_numbers::parse_number;
use crate::chapter_6_dimensions::parse_dimension;
use cssparser::{ParseError as CssParseError, Parser, ParserInput, SourcePosition, Token};
use log::trace;

/// Format a computed number the way script engines print numbers.
///
/// Magnitudes from `1e-6` up to `1e21` are written out in full; others use an exponent
/// with an explicit sign (`1e-7`, `1e+21`).
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let magnitude = value.abs();
    if (magnitude > 0.0 && magnitude < 1e-6) || magnitude >= 1e21 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}

/// Parse the contents of a `calc()` block as `<dimension> * <number>` and format the
/// product.
fn parse_product(input: &mut Parser) -> Result<String, ParseError> {
    let factor = parse_dimension(input)?;
    input
        .expect_delim('*')
        .map_err(|_| ParseError::UnexpectedToken)?;
    let multiplier = parse_number(input)?;
    input
        .expect_exhausted()
        .map_err(|_| ParseError::TrailingInput)?;
    Ok(format!(
        "{}{}",
        format_number(factor.value * multiplier.0),
        factor.unit
    ))
}

/// Walk the tokens of `input`, replacing every evaluable `calc()` found at any depth.
///
/// Source text between replacements is copied verbatim; `copied` marks how far the
/// source has been written to `out`.
fn rewrite_block(input: &mut Parser, out: &mut String, copied: &mut SourcePosition) {
    loop {
        let start = input.position();
        let (is_calc, has_block) = match input.next_including_whitespace_and_comments() {
            Ok(Token::Function(name)) => (&**name == "calc", true),
            Ok(Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock) => {
                (false, true)
            }
            Ok(_) => (false, false),
            Err(_) => break,
        };
        if !has_block {
            continue;
        }
        let nested: Result<Option<String>, CssParseError<'_, ()>> =
            input.parse_nested_block(|block| {
                if is_calc {
                    match block.try_parse(parse_product) {
                        Ok(product) => return Ok(Some(product)),
                        Err(err) => trace!("calc() left as written: {err}"),
                    }
                }
                rewrite_block(block, out, copied);
                Ok(None)
            });
        if let Ok(Some(product)) = nested {
            out.push_str(input.slice(*copied..start));
            out.push_str(&product);
            *copied = input.position();
        }
    }
}

/// Evaluate every `calc(<number><unit> * <number>)` in `value`.
///
/// The product uses `f64` arithmetic and the shortest decimal formatting:
/// `calc(0.25rem * 4)` becomes `1rem`. Values without a matching `calc()` are returned
/// unchanged.
pub fn simplify_arithmetic(value: &str) -> String {
    if !value.contains("calc(") {
        return value.to_owned();
    }
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut out = String::with_capacity(value.len());
    let mut copied = parser.position();
    rewrite_block(&mut parser, &mut out, &mut copied);
    out.push_str(parser.slice_from(copied));
    if out != value {
        trace!("simplified `{value}` -> `{out}`");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_the_product_form() {
        assert_eq!(simplify_arithmetic("calc(0.25rem * 4)"), "1rem");
        assert_eq!(simplify_arithmetic("calc(2px * 3)"), "6px");
        assert_eq!(simplify_arithmetic("calc(0.25rem*0.5)"), "0.125rem");
        assert_eq!(simplify_arithmetic("calc(0.1rem * 3)"), "0.30000000000000004rem");
    }

    #[test]
    fn extreme_products_use_signed_exponents() {
        assert_eq!(simplify_arithmetic("calc(0.0000001rem * 1)"), "1e-7rem");
        assert_eq!(
            simplify_arithmetic("calc(1000000000000000000000px * 1)"),
            "1e+21px"
        );
        assert_eq!(simplify_arithmetic("calc(0.000001rem * 1)"), "0.000001rem");
        assert_eq!(simplify_arithmetic("calc(0px * 5)"), "0px");
    }

    #[test]
    fn values_without_calc_are_unchanged() {
        assert_eq!(simplify_arithmetic("10px"), "10px");
        assert_eq!(simplify_arithmetic(""), "");
    }

    #[test]
    fn other_calc_forms_pass_through() {
        for value in [
            "calc(100% - 1rem)",
            "calc(2px + 3)",
            "calc(4 * 2px)",
            "calc(var(--spacing) * 4)",
            "calc(2PX * 3)",
            "calc(-2px * 3)",
            "calc(2px * 3 * 4)",
        ] {
            assert_eq!(simplify_arithmetic(value), value);
        }
    }

    #[test]
    fn every_occurrence_is_rewritten_in_place() {
        assert_eq!(
            simplify_arithmetic("calc(0.25rem * 2) calc(0.25rem * 4)"),
            "0.5rem 1rem"
        );
        assert_eq!(
            simplify_arithmetic("max(calc(1px * 2), 50%) solid"),
            "max(2px, 50%) solid"
        );
        assert_eq!(
            simplify_arithmetic("calc(calc(1px * 2) + 1px)"),
            "calc(2px + 1px)"
        );
    }
}
