//! Theme and registered-property store.
//! Spec: <https://www.w3.org/TR/css-properties-values-api-1/#at-property-rule>

use css_syntax::{PropertyRule, Stylesheet};
use indexmap::IndexMap;
use log::debug;

/// What a registration says about a custom property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// The registered name, including `--`.
    pub name: String,
    /// Whether the property inherits. Non-inheriting properties are internal.
    pub inherits: bool,
}

/// Read-only source of theme values and property registrations.
pub trait ThemeStore {
    /// Value for the custom property `name`, if the store knows one.
    fn value(&self, name: &str) -> Option<String>;

    /// Registration details for `name`, if it is a registered property.
    fn describe_property(&self, name: &str) -> Option<PropertyDescriptor>;

    /// Every theme custom-property name, in declaration order.
    fn theme_property_names(&self) -> Vec<String>;
}

impl<T: ThemeStore + ?Sized> ThemeStore for &T {
    fn value(&self, name: &str) -> Option<String> {
        (**self).value(name)
    }

    fn describe_property(&self, name: &str) -> Option<PropertyDescriptor> {
        (**self).describe_property(name)
    }

    fn theme_property_names(&self) -> Vec<String> {
        (**self).theme_property_names()
    }
}

/// A [`ThemeStore`] built from `:root` theme declarations and `@property` rules.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    theme: IndexMap<String, String>,
    properties: IndexMap<String, PropertyRule>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the theme and registrations of `sheet`.
    ///
    /// Only custom properties are taken from theme rules. Later declarations and later
    /// registrations of the same name replace earlier ones.
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        let mut registry = Self::new();
        for decl in sheet.theme_declarations() {
            if decl.name.starts_with("--") {
                registry.set_theme_value(decl.name, decl.value);
            }
        }
        for rule in &sheet.properties {
            registry.register(rule.clone());
        }
        debug!(
            "theme registry: {} theme values, {} registered properties",
            registry.theme.len(),
            registry.properties.len()
        );
        registry
    }

    /// Define or replace a theme value.
    pub fn set_theme_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.theme.insert(name.into(), value.into());
    }

    /// Register a property, replacing any earlier registration of the same name.
    pub fn register(&mut self, rule: PropertyRule) {
        self.properties.insert(rule.name.clone(), rule);
    }
}

impl ThemeStore for ThemeRegistry {
    /// The theme declaration wins; otherwise a non-inheriting registration supplies its
    /// initial value, which is empty when the rule has none.
    fn value(&self, name: &str) -> Option<String> {
        if let Some(value) = self.theme.get(name) {
            return Some(value.clone());
        }
        self.properties
            .get(name)
            .filter(|rule| !rule.inherits)
            .map(|rule| rule.initial_value.clone().unwrap_or_default())
    }

    fn describe_property(&self, name: &str) -> Option<PropertyDescriptor> {
        self.properties.get(name).map(|rule| PropertyDescriptor {
            name: rule.name.clone(),
            inherits: rule.inherits,
        })
    }

    fn theme_property_names(&self) -> Vec<String> {
        self.theme.keys().cloned().collect()
    }
}
