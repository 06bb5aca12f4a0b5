//! Utility class resolution: turns a list of utility classes and the active variants into
//! a flat property map.
//!
//! The resolver only reads its rule source and theme store; every call builds a fresh
//! [`StyleSet`]. Pipeline:
//! 1. Classes whose variant chain is active for the requested state are selected.
//! 2. Matching utility rules are collapsed in stylesheet order, later rules winning.
//! 3. `var()` references are substituted and internal properties pruned.
//! 4. `calc(<number><unit> * <number>)` is evaluated.

#![forbid(unsafe_code)]

mod error;
mod types;

pub use css_cascade::StyleSet;
pub use css_selectors::VariantState;
pub use css_syntax::{RuleNode, RuleSource, Stylesheet, UtilityRule, parse_stylesheet};
pub use css_variables::{PropertyDescriptor, ThemeNamespace, ThemeRegistry, ThemeStore};
pub use error::ResolveError;
pub use types::{ClassList, ResolverOptions};

use css_cascade::collapse_into;
use css_selectors::{ClassName, class_name_from_selector, variant_matches};
use css_values_units::simplify_arithmetic;
use css_variables::{prune_internal_properties, substitute_variables};
use log::{debug, trace};
use std::collections::HashSet;

/// Resolves utility classes against a rule source and a theme store.
pub struct UtilityResolver<R, T> {
    rules: R,
    store: T,
    options: ResolverOptions,
}

impl UtilityResolver<Stylesheet, ThemeRegistry> {
    /// Build a resolver from stylesheet text, using its `:root` theme and `@property`
    /// rules as the store.
    pub fn from_css(css: &str) -> Self {
        let sheet = parse_stylesheet(css);
        let store = ThemeRegistry::from_stylesheet(&sheet);
        Self::new(sheet, store)
    }
}

impl<R: RuleSource, T: ThemeStore> UtilityResolver<R, T> {
    #[inline]
    pub fn new(rules: R, store: T) -> Self {
        Self::with_options(rules, store, ResolverOptions::default())
    }

    #[inline]
    pub const fn with_options(rules: R, store: T, options: ResolverOptions) -> Self {
        Self {
            rules,
            store,
            options,
        }
    }

    #[inline]
    pub const fn options(&self) -> &ResolverOptions {
        &self.options
    }

    #[inline]
    pub const fn store(&self) -> &T {
        &self.store
    }

    /// Resolve `classes` for the active `state`.
    ///
    /// A class is active when every variant in its chain is in `state`; with `strict`
    /// the chain must also name every active variant. Classes with no matching rule are
    /// skipped and unresolved references stay as written.
    pub fn to_object(
        &self,
        classes: impl Into<ClassList>,
        state: &VariantState,
        strict: bool,
    ) -> StyleSet {
        let classes = classes.into();
        let active: HashSet<&str> = classes
            .as_slice()
            .iter()
            .filter(|raw| {
                let class = ClassName::parse_with(raw, self.options.variant_separator);
                variant_matches(&class.variants, state, strict)
            })
            .map(String::as_str)
            .collect();
        debug!("{} of {} classes active", active.len(), classes.len());

        let mut styles = StyleSet::new();
        if active.is_empty() {
            return styles;
        }
        let mut matched = 0usize;
        for rule in self.rules.utility_rules() {
            let name = class_name_from_selector(&rule.selector);
            if active.contains(name.as_str()) {
                trace!("collapsing {}", rule.selector);
                collapse_into(&rule.node, &mut styles);
                matched = matched.saturating_add(1);
            }
        }
        debug!("{matched} utility rules matched");

        substitute_variables(&mut styles, &self.store);
        prune_internal_properties(&mut styles, &self.store);
        if self.options.simplify_arithmetic {
            for index in 0..styles.len() {
                if let Some(slot) = styles.value_at_mut(index) {
                    *slot = simplify_arithmetic(slot);
                }
            }
        }
        styles
    }

    /// Like [`Self::to_object`], serialised as `prop: value; prop: value;` with
    /// hyphenated property names.
    pub fn to_css(
        &self,
        classes: impl Into<ClassList>,
        state: &VariantState,
        strict: bool,
    ) -> String {
        self.to_object(classes, state, strict).to_css_text()
    }

    /// Read-only view of the theme properties under `--<namespace>-`.
    #[inline]
    pub fn theme(&self, namespace: &str) -> ThemeNamespace<'_, T> {
        ThemeNamespace::new(&self.store, namespace)
    }

    /// Raw value of the custom property `name` from the theme store.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidArgument`] when `name` does not start with `--`.
    pub fn variable(&self, name: &str) -> Result<Option<String>, ResolveError> {
        if !name.starts_with("--") {
            return Err(ResolveError::InvalidArgument {
                argument: "name",
                reason: format!("`{name}` is not a custom property name"),
            });
        }
        Ok(self.store.value(name))
    }
}
