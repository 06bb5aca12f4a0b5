//! Utility class names: variant chains and variant matching.
//! Spec: <https://www.w3.org/TR/selectors-3/#class-html>
//!
//! A utility class name such as `md:hover:bg-[url(a:b)]` is a chain of variant tokens
//! followed by a base utility. This crate provides:
//! - Splitting a class name into its variants and base, honouring `[...]` segments
//! - Recovering a class name from escaped selector text (`.hover\:flex`)
//! - Deciding whether a variant chain is active for a set of requested variants

#![forbid(unsafe_code)]

mod matcher;
mod parser;

pub use matcher::{VariantState, variant_matches};
pub use parser::{
    ClassName, DEFAULT_VARIANT_SEPARATOR, class_name_from_selector, split_variant_chain,
};
