//! CSS Cascading and Inheritance Level 4: flattening utility rules into a style set.
//! Spec: <https://www.w3.org/TR/css-cascade-4/>
//!
//! Utilities are merged in stylesheet order with later declarations winning. Grouping
//! conditions are discarded: variant matching has already decided which rules apply.

#![forbid(unsafe_code)]

mod casing;
mod collapse;

pub use casing::{camel_case_property, hyphenate_property, is_custom_property};
pub use collapse::collapse_into;

use core::fmt::Write as _;
use indexmap::IndexMap;
use indexmap::map::Iter;

/// An ordered map from property name to raw value.
///
/// Standard properties are keyed in camel case (`backgroundColor`), custom properties by
/// their exact `--name`. Writing an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSet {
    entries: IndexMap<String, String>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` to `value`, returning the previous value if any.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(property.into(), value.into())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    /// Remove `property`, keeping the order of the remaining entries.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.entries.shift_remove(property)
    }

    /// Keep only the entries for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|property, value| keep(property, value));
    }

    /// Entry at position `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.entries
            .get_index(index)
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    /// Mutable access to the value at position `index`.
    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut String> {
        self.entries.get_index_mut(index).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialise as a declaration list: `margin: 1rem; color: #ef4444;`.
    ///
    /// Property names are written in hyphen-case and every pair ends with `;`.
    /// An empty set serialises to the empty string.
    pub fn to_css_text(&self) -> String {
        let mut out = String::new();
        for (property, value) in &self.entries {
            if !out.is_empty() {
                out.push(' ');
            }
            if write!(out, "{}: {value};", hyphenate_property(property)).is_err() {
                break;
            }
        }
        out
    }

    /// Consume the set, returning the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.entries
    }
}

impl<'set> IntoIterator for &'set StyleSet {
    type Item = (&'set String, &'set String);
    type IntoIter = Iter<'set, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(property, value)| (property.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_position() {
        let mut set = StyleSet::new();
        set.insert("color", "red");
        set.insert("margin", "0");
        assert_eq!(set.insert("color", "blue"), Some("red".to_owned()));
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["color", "margin"]);
        assert_eq!(set.get("color"), Some("blue"));
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut set: StyleSet = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(set.remove("b"), Some("2".to_owned()));
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(set.remove("missing"), None);
    }

    #[test]
    fn css_text_hyphenates_and_terminates_every_pair() {
        let set: StyleSet = [
            ("margin", "1rem"),
            ("backgroundColor", "#fff"),
            ("WebkitBoxOrient", "vertical"),
            ("--tw-ring", "0 0 #0000"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            set.to_css_text(),
            "margin: 1rem; background-color: #fff; -webkit-box-orient: vertical; --tw-ring: 0 0 #0000;"
        );
        assert_eq!(StyleSet::new().to_css_text(), "");
    }

    #[test]
    fn lookup_and_iteration_agree() {
        let set: StyleSet = [("color", "red")].into_iter().collect();
        assert_eq!(set.get("color"), Some("red"));
        assert_eq!(set.get("margin"), None);
        assert_eq!(set.get_index(0), Some(("color", "red")));
        assert_eq!(set.iter().count(), 1);
        assert_eq!((&set).into_iter().count(), 1);
    }
}
