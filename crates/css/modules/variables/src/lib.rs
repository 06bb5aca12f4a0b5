//! CSS Custom Properties for Cascading Variables Module Level 1: resolving `var()` in a
//! style set.
//! Spec: <https://www.w3.org/TR/css-variables-1/>
//!
//! References are resolved against two tiers: the style set under construction, then a
//! [`ThemeStore`]. Registered non-inheriting properties are bookkeeping and are pruned
//! from the result after substitution.

#![forbid(unsafe_code)]

mod namespace;
mod store;
mod substitute;

pub use namespace::{ThemeNamespace, ValueNamespace};
pub use store::{PropertyDescriptor, ThemeRegistry, ThemeStore};
pub use substitute::{
    VarReference, find_var_references, prune_internal_properties, substitute_variables,
};
