//! CSS Values and Units Module Level 3: numeric literals and the restricted `calc()`
//! product used by utility values.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

use core::error::Error;
use core::fmt;

// Per-chapter modules following the css-values-3 table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;
pub mod chapter_8_calc;

pub use chapter_4_numbers::{Number, parse_decimal, parse_number};
pub use chapter_6_dimensions::{Dimension, parse_dimension};
pub use chapter_8_calc::simplify_arithmetic;

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A numeric token was written in a form other than a plain unsigned decimal.
    UnsupportedNumber,
    /// Tokens remained after the expected grammar was complete.
    TrailingInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken => formatter.write_str("unexpected token"),
            Self::UnsupportedNumber => formatter.write_str("number is not a plain decimal"),
            Self::TrailingInput => formatter.write_str("unexpected trailing input"),
        }
    }
}

impl Error for ParseError {}
