//! Value lookups: the two-tier namespace used during substitution and the read-only
//! theme namespace view.

use crate::store::ThemeStore;
use css_cascade::StyleSet;

/// Two-tier lookup for custom properties: the style set first, then the store.
pub struct ValueNamespace<'scope, T: ThemeStore + ?Sized> {
    styles: &'scope StyleSet,
    store: &'scope T,
}

impl<'scope, T: ThemeStore + ?Sized> ValueNamespace<'scope, T> {
    pub const fn new(styles: &'scope StyleSet, store: &'scope T) -> Self {
        Self { styles, store }
    }

    /// Value of `name` from the style set, else from the store. No default is made up.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.styles
            .get(name)
            .map(ToOwned::to_owned)
            .or_else(|| self.store.value(name))
    }
}

/// A read-only mapping over the theme properties sharing the `--<namespace>-` prefix.
///
/// `ThemeNamespace::new(&store, "color").get("red-500")` reads `--color-red-500`.
pub struct ThemeNamespace<'store, T: ThemeStore + ?Sized> {
    store: &'store T,
    namespace: String,
    prefix: String,
}

impl<'store, T: ThemeStore + ?Sized> ThemeNamespace<'store, T> {
    pub fn new(store: &'store T, namespace: &str) -> Self {
        Self {
            store,
            namespace: namespace.to_owned(),
            prefix: format!("--{namespace}-"),
        }
    }

    /// The namespace name, without dashes.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Value of `--<namespace>-<key>`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.value(&format!("{}{key}", self.prefix))
    }

    /// Keys of the theme properties in this namespace, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.store
            .theme_property_names()
            .iter()
            .filter_map(|name| name.strip_prefix(self.prefix.as_str()))
            .filter(|key| !key.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// `(key, value)` pairs for every known key.
    pub fn entries(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.keys()
            .into_iter()
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ThemeRegistry;

    fn registry() -> ThemeRegistry {
        let mut registry = ThemeRegistry::new();
        registry.set_theme_value("--spacing", "0.25rem");
        registry.set_theme_value("--color-red-500", "#ef4444");
        registry.set_theme_value("--color-blue-500", "#3b82f6");
        registry.set_theme_value("--colorful", "yes");
        registry
    }

    #[test]
    fn style_set_shadows_the_store() {
        let store = registry();
        let styles: StyleSet = [("--spacing", "2px")].into_iter().collect();
        let namespace = ValueNamespace::new(&styles, &store);
        assert_eq!(namespace.lookup("--spacing").as_deref(), Some("2px"));
        assert_eq!(namespace.lookup("--color-red-500").as_deref(), Some("#ef4444"));
        assert_eq!(namespace.lookup("--missing"), None);
    }

    #[test]
    fn theme_namespace_lists_prefixed_keys_only() {
        let store = registry();
        let colors = ThemeNamespace::new(&store, "color");
        assert_eq!(colors.namespace(), "color");
        assert_eq!(colors.keys(), vec!["red-500".to_owned(), "blue-500".to_owned()]);
        assert_eq!(colors.get("red-500").as_deref(), Some("#ef4444"));
        assert!(colors.contains_key("blue-500"));
        assert!(!colors.contains_key("green-500"));
        assert_eq!(colors.len(), 2);
        assert_eq!(
            colors.entries().collect::<Vec<_>>(),
            vec![
                ("red-500".to_owned(), "#ef4444".to_owned()),
                ("blue-500".to_owned(), "#3b82f6".to_owned()),
            ]
        );
    }

    #[test]
    fn unknown_namespace_is_empty() {
        let store = registry();
        let fonts = ThemeNamespace::new(&store, "font");
        assert!(fonts.is_empty());
        assert_eq!(fonts.get("sans"), None);
    }
}
