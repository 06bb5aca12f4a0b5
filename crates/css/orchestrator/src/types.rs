use css_selectors::DEFAULT_VARIANT_SEPARATOR;

/// Resolver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Delimiter between variants and the base utility.
    pub variant_separator: char,
    /// Evaluate `calc(<number><unit> * <number>)` in resolved values.
    pub simplify_arithmetic: bool,
}

impl Default for ResolverOptions {
    #[inline]
    fn default() -> Self {
        Self {
            variant_separator: DEFAULT_VARIANT_SEPARATOR,
            simplify_arithmetic: true,
        }
    }
}

/// Normalised list of class names: entries are trimmed and empty ones dropped.
///
/// A single string is split on whitespace, so `"m-4 hover:underline"` and
/// `["m-4", "hover:underline"]` are the same list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    fn from_entries<S: AsRef<str>>(entries: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: entries
                .into_iter()
                .map(|entry| entry.as_ref().trim().to_owned())
                .filter(|entry| !entry.is_empty())
                .collect(),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self::from_entries(classes.split_whitespace())
    }
}

impl From<String> for ClassList {
    fn from(classes: String) -> Self {
        Self::from(classes.as_str())
    }
}

impl From<&[&str]> for ClassList {
    fn from(classes: &[&str]) -> Self {
        Self::from_entries(classes)
    }
}

impl<const N: usize> From<[&str; N]> for ClassList {
    fn from(classes: [&str; N]) -> Self {
        Self::from_entries(classes)
    }
}

impl From<Vec<&str>> for ClassList {
    fn from(classes: Vec<&str>) -> Self {
        Self::from_entries(classes)
    }
}

impl From<Vec<String>> for ClassList {
    fn from(classes: Vec<String>) -> Self {
        Self::from_entries(classes)
    }
}
