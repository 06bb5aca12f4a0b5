//! Property-name casing between CSS text (`background-color`) and style set keys
//! (`backgroundColor`).

/// Whether `name` is a custom property (`--*`).
/// Spec: <https://www.w3.org/TR/css-variables-1/#defining-variables>
pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

/// Convert a hyphenated property name to its camel-case key.
///
/// Vendor prefixes keep their capital: `-webkit-box` becomes `WebkitBox`.
/// Custom properties are returned unchanged.
pub fn camel_case_property(name: &str) -> String {
    if is_custom_property(name) {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for character in name.chars() {
        if character == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(character.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(character.to_ascii_lowercase());
        }
    }
    out
}

/// Convert a camel-case key back to a hyphenated property name.
///
/// Inverse of [`camel_case_property`]; custom properties are returned unchanged.
pub fn hyphenate_property(key: &str) -> String {
    if is_custom_property(key) {
        return key.to_owned();
    }
    let mut out = String::with_capacity(key.len().saturating_add(4));
    for character in key.chars() {
        if character.is_ascii_uppercase() {
            out.push('-');
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    out
}
