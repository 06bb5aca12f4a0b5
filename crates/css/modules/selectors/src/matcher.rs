//! Variant matching against the currently active variant state.

use log::trace;
use std::collections::HashSet;

/// The set of variant tokens considered active (`hover`, a breakpoint name, ...).
/// Order is irrelevant; only membership matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantState {
    active: HashSet<String>,
}

impl VariantState {
    /// An empty state: only unvaried utilities match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `variant` as active.
    pub fn insert(&mut self, variant: impl Into<String>) {
        self.active.insert(variant.into());
    }

    /// Whether `variant` is active.
    pub fn contains(&self, variant: &str) -> bool {
        self.active.contains(variant)
    }

    /// Number of distinct active variants.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for VariantState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decide whether a variant chain is active for `state`.
///
/// Every variant must be present in `state`. In strict mode the chain must also have
/// exactly as many entries as `state`, so no extra active variant is tolerated.
/// Matching is a membership test; the order of `variants` does not matter.
pub fn variant_matches<S: AsRef<str>>(variants: &[S], state: &VariantState, strict: bool) -> bool {
    if strict && variants.len() != state.len() {
        trace!(
            "strict variant mismatch: {} variants, {} active",
            variants.len(),
            state.len()
        );
        return false;
    }
    variants
        .iter()
        .all(|variant| state.contains(variant.as_ref()))
}
