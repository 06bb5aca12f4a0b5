//! `var()` substitution over a style set, followed by pruning of internal properties.
//! Spec: <https://www.w3.org/TR/css-variables-1/#substitute-a-var>

use crate::namespace::ValueNamespace;
use crate::store::ThemeStore;
use css_cascade::StyleSet;
use log::{debug, trace};

/// One `var(--name)` or `var(--name,)` occurrence inside a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarReference<'src> {
    /// Byte offset of the `v` in `var(`.
    pub start: usize,
    /// Byte offset just past the closing `)`.
    pub end: usize,
    /// The referenced name, including `--`.
    pub name: &'src str,
}

/// Custom-property name characters after the leading `--`.
/// Spec: <https://www.w3.org/TR/css-syntax-3/#ident-code-point>
fn is_name_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '-' || character == '_' || !character.is_ascii()
}

/// Try to read a reference whose `var(` starts at `start`.
fn reference_at(value: &str, start: usize) -> Option<VarReference<'_>> {
    let args_start = start.checked_add("var(".len())?;
    let args = value.get(args_start..)?;
    if !args.starts_with("--") {
        return None;
    }
    let name_len = args
        .char_indices()
        .skip(2)
        .find(|&(_, character)| !is_name_char(character))
        .map_or(args.len(), |(index, _)| index);
    let name = args.get(..name_len)?;
    if name.len() <= 2 {
        return None;
    }
    let rest = args.get(name_len..)?;
    let after_comma = rest.strip_prefix(',').map_or(rest, str::trim_start);
    let tail = after_comma.strip_prefix(')')?;
    Some(VarReference {
        start,
        end: value.len().saturating_sub(tail.len()),
        name,
    })
}

/// Every `var(--name)` / `var(--name,)` in `value`, left to right.
///
/// Only the bare form and the trailing-comma form are recognised; a reference with a
/// fallback value is not a match and stays in the text as written.
pub fn find_var_references(value: &str) -> Vec<VarReference<'_>> {
    let mut found = Vec::new();
    let mut offset = 0usize;
    while let Some(relative) = value.get(offset..).and_then(|rest| rest.find("var(")) {
        let start = offset.saturating_add(relative);
        let preceded_by_name = value
            .get(..start)
            .and_then(|head| head.chars().next_back())
            .is_some_and(is_name_char);
        if !preceded_by_name && let Some(reference) = reference_at(value, start) {
            offset = reference.end;
            found.push(reference);
        } else {
            offset = start.saturating_add(1);
        }
    }
    found
}

/// Replace each reference in `value` with its looked-up value, trimmed.
///
/// Replacement text is not scanned again, so a reference it contains stays as written.
/// Unresolved references also stay as written. A reference that resolves to nothing is
/// removed with the whitespace after it.
fn expand<T: ThemeStore + ?Sized>(value: &str, namespace: &ValueNamespace<'_, T>) -> String {
    let references = find_var_references(value);
    if references.is_empty() {
        return value.to_owned();
    }
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0usize;
    for reference in references {
        out.push_str(value.get(cursor..reference.start).unwrap_or_default());
        cursor = reference.end;
        let Some(resolved) = namespace.lookup(reference.name) else {
            trace!("unresolved reference to {}", reference.name);
            out.push_str(value.get(reference.start..reference.end).unwrap_or_default());
            continue;
        };
        let replacement = resolved.trim();
        if replacement.is_empty() {
            let rest = value.get(cursor..).unwrap_or_default();
            cursor = value.len().saturating_sub(rest.trim_start().len());
            continue;
        }
        out.push_str(replacement);
    }
    out.push_str(value.get(cursor..).unwrap_or_default());
    out
}

/// Replace `var()` references in every value of `styles`, in insertion order.
///
/// Each value is scanned once and every reference is replaced at most once. A lookup
/// sees values already rewritten earlier in the same call, then falls back to `store`.
/// Results are trimmed.
pub fn substitute_variables<T: ThemeStore + ?Sized>(styles: &mut StyleSet, store: &T) {
    for index in 0..styles.len() {
        let Some((property, value)) = styles.get_index(index) else {
            continue;
        };
        if !value.contains("var(") {
            continue;
        }
        let rewritten = expand(value, &ValueNamespace::new(styles, store))
            .trim()
            .to_owned();
        trace!("{property}: `{value}` -> `{rewritten}`");
        if let Some(slot) = styles.value_at_mut(index) {
            *slot = rewritten;
        }
    }
}

/// Remove every property registered as non-inheriting.
///
/// Such properties carry intermediate values between utilities. Theme properties that
/// are not registered, or registered as inheriting, are kept.
pub fn prune_internal_properties<T: ThemeStore + ?Sized>(styles: &mut StyleSet, store: &T) {
    let before = styles.len();
    styles.retain(|property, _| {
        store
            .describe_property(property)
            .is_none_or(|descriptor| descriptor.inherits)
    });
    debug!(
        "pruned {} internal properties",
        before.saturating_sub(styles.len())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ThemeRegistry;
    use css_syntax::PropertyRule;

    fn store() -> ThemeRegistry {
        let mut registry = ThemeRegistry::new();
        registry.set_theme_value("--spacing", "0.25rem");
        registry.set_theme_value("--color-red-500", "#ef4444");
        registry.set_theme_value("--color-accent", "var(--color-red-500)");
        registry.register(PropertyRule {
            name: "--tw-scale-x".into(),
            syntax: Some("*".into()),
            inherits: false,
            initial_value: Some("1".into()),
        });
        registry.register(PropertyRule {
            name: "--tw-ring-inset".into(),
            syntax: Some("*".into()),
            inherits: false,
            initial_value: None,
        });
        registry
    }

    fn substituted(entries: &[(&str, &str)]) -> StyleSet {
        let mut styles: StyleSet = entries.iter().copied().collect();
        substitute_variables(&mut styles, &store());
        styles
    }

    #[test]
    fn finds_bare_and_trailing_comma_references() {
        let refs = find_var_references("var(--a) var(--b,) var(--c, red) xvar(--d) var(-e)");
        let names: Vec<&str> = refs.iter().map(|reference| reference.name).collect();
        assert_eq!(names, vec!["--a", "--b"]);
        assert_eq!(refs.first().map(|reference| (reference.start, reference.end)), Some((0, 8)));
    }

    #[test]
    fn resolves_from_theme() {
        let styles = substituted(&[("margin", "calc(var(--spacing) * 4)"), ("color", "var(--color-red-500)")]);
        assert_eq!(styles.get("margin"), Some("calc(0.25rem * 4)"));
        assert_eq!(styles.get("color"), Some("#ef4444"));
    }

    #[test]
    fn style_set_wins_over_theme_and_values_chain() {
        let styles = substituted(&[
            ("--tw-scale-x", "150%"),
            ("scale", "var(--tw-scale-x) var(--tw-scale-x,)"),
        ]);
        assert_eq!(styles.get("scale"), Some("150% 150%"));
    }

    #[test]
    fn replaced_values_are_not_scanned_again() {
        let styles = substituted(&[("color", "var(--color-accent)")]);
        assert_eq!(styles.get("color"), Some("var(--color-red-500)"));
    }

    #[test]
    fn earlier_rewrites_are_seen_by_later_values() {
        let styles = substituted(&[
            ("--tw-a", "var(--color-accent)"),
            ("--tw-b", "var(--tw-a) var(--tw-a)"),
            ("outlineColor", "var(--tw-b)"),
        ]);
        assert_eq!(styles.get("--tw-a"), Some("var(--color-red-500)"));
        assert_eq!(
            styles.get("--tw-b"),
            Some("var(--color-red-500) var(--color-red-500)")
        );
        assert_eq!(
            styles.get("outlineColor"),
            Some("var(--color-red-500) var(--color-red-500)")
        );
    }

    #[test]
    fn empty_resolution_removes_reference_and_following_space() {
        let styles = substituted(&[("boxShadow", "var(--tw-ring-inset,) 0 0 0 1px red")]);
        assert_eq!(styles.get("boxShadow"), Some("0 0 0 1px red"));
        let trailing = substituted(&[("boxShadow", "0 0 red var(--tw-ring-inset)")]);
        assert_eq!(trailing.get("boxShadow"), Some("0 0 red"));
    }

    #[test]
    fn unresolved_and_self_references_are_left_alone() {
        let styles = substituted(&[
            ("width", "var(--unknown)"),
            ("--loop", "var(--loop)"),
            ("--ping", "var(--pong)"),
            ("--pong", "var(--ping)"),
        ]);
        assert_eq!(styles.get("width"), Some("var(--unknown)"));
        assert_eq!(styles.get("--loop"), Some("var(--loop)"));
        assert_eq!(styles.get("--ping"), Some("var(--ping)"));
        assert_eq!(styles.get("--pong"), Some("var(--ping)"));
    }

    #[test]
    fn another_pass_advances_a_chain_by_one_step() {
        let mut styles = substituted(&[("color", "var(--color-accent)")]);
        substitute_variables(&mut styles, &store());
        assert_eq!(styles.get("color"), Some("#ef4444"));
    }

    #[test]
    fn settled_values_survive_another_pass() {
        let mut styles = substituted(&[
            ("margin", "var(--spacing)"),
            ("width", "var(--unknown)"),
            ("--ping", "var(--pong)"),
            ("--pong", "var(--ping)"),
        ]);
        let once = styles.clone();
        substitute_variables(&mut styles, &store());
        assert_eq!(styles, once);
    }

    #[test]
    fn pruning_removes_only_non_inheriting_registrations() {
        let mut styles: StyleSet = [
            ("--tw-scale-x", "150%"),
            ("--color-red-500", "#ef4444"),
            ("scale", "150%"),
        ]
        .into_iter()
        .collect();
        prune_internal_properties(&mut styles, &store());
        assert!(!styles.contains_key("--tw-scale-x"));
        assert_eq!(styles.get("--color-red-500"), Some("#ef4444"));
        assert_eq!(styles.get("scale"), Some("150%"));
    }
}
