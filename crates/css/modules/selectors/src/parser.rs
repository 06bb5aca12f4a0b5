//! Class name decomposition and selector unescaping.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#escaping>

use core::fmt;

/// Separator between variants and the base utility (`hover:flex`).
pub const DEFAULT_VARIANT_SEPARATOR: char = ':';

/// A utility class name split into its variant chain and base utility.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassName {
    /// The last segment of the chain, e.g. `text-red-500`.
    pub base: String,
    /// Every segment before the base, left to right, e.g. `["md", "hover"]`.
    pub variants: Vec<String>,
    separator: char,
}

impl ClassName {
    /// Parse `raw` using the default `:` separator.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, DEFAULT_VARIANT_SEPARATOR)
    }

    /// Parse `raw`, splitting on `separator` outside bracketed segments.
    pub fn parse_with(raw: &str, separator: char) -> Self {
        let mut segments = split_variant_chain(raw, separator);
        let base = segments.pop().unwrap_or_default().to_owned();
        Self {
            base,
            variants: segments.into_iter().map(ToOwned::to_owned).collect(),
            separator,
        }
    }

    /// Whether this class carries no variants.
    pub fn is_unvaried(&self) -> bool {
        self.variants.is_empty()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for variant in &self.variants {
            write!(formatter, "{variant}{}", self.separator)?;
        }
        formatter.write_str(&self.base)
    }
}

/// Split a class name on `separator`, ignoring separators inside unescaped `[...]` pairs.
///
/// The result always has at least one segment; the last one is the base utility.
/// Backslash escapes are kept in the segments as written so that joining the segments
/// with `separator` reproduces the input.
pub fn split_variant_chain(raw: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0usize;
    for (index, character) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match character {
            '\\' => escaped = true,
            '[' => depth = depth.saturating_add(1),
            ']' => depth = depth.saturating_sub(1),
            _ if character == separator && depth == 0 => {
                segments.push(raw.get(start..index).unwrap_or_default());
                start = index.saturating_add(character.len_utf8());
            }
            _ => {}
        }
    }
    segments.push(raw.get(start..).unwrap_or_default());
    segments
}

/// Recover the class name a selector was generated from.
///
/// Strips surrounding whitespace and the leading `.`, then resolves CSS escapes:
/// `\:` becomes `:` and hex escapes such as `\32 xl` become `2xl`.
///
/// Spec: <https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point>
pub fn class_name_from_selector(selector: &str) -> String {
    let trimmed = selector.trim();
    let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
    unescape(body)
}

/// Resolve backslash escapes in an identifier.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(character) = chars.next() {
        if character != '\\' {
            out.push(character);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(&digit) if digit.is_ascii_hexdigit() => {
                    hex.push(digit);
                    chars.next();
                }
                _ => break,
            }
        }
        if hex.is_empty() {
            // A trailing lone backslash is dropped.
            if let Some(literal) = chars.next() {
                out.push(literal);
            }
            continue;
        }
        // A single whitespace after a hex escape belongs to the escape.
        if chars.peek().is_some_and(|next| next.is_ascii_whitespace()) {
            chars.next();
        }
        // NUL, surrogates and out-of-range values become U+FFFD.
        let resolved = u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&code_point| code_point != 0)
            .and_then(char::from_u32);
        out.push(resolved.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvaried_class_is_all_base() {
        let class = ClassName::parse("m-4");
        assert_eq!(class.base, "m-4");
        assert!(class.is_unvaried());
    }

    #[test]
    fn variants_are_kept_in_order() {
        let class = ClassName::parse("md:hover:text-red-500");
        assert_eq!(class.variants, vec!["md", "hover"]);
        assert_eq!(class.base, "text-red-500");
    }

    #[test]
    fn separators_inside_brackets_do_not_split() {
        let class = ClassName::parse("hover:[mask-type:luminance]");
        assert_eq!(class.variants, vec!["hover"]);
        assert_eq!(class.base, "[mask-type:luminance]");

        let nested = ClassName::parse("supports-[display:grid]:bg-[url(a:b)]");
        assert_eq!(nested.variants, vec!["supports-[display:grid]"]);
        assert_eq!(nested.base, "bg-[url(a:b)]");
    }

    #[test]
    fn escaped_separator_does_not_split() {
        let class = ClassName::parse(r"content-['a\:b']");
        assert!(class.is_unvaried());
    }

    #[test]
    fn joining_segments_reproduces_the_input() {
        for raw in ["m-4", "sm:flex", "dark:md:hover:bg-[rgb(0,0,0)]", "a::b", ":x"] {
            assert_eq!(ClassName::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn custom_separator_is_respected() {
        let class = ClassName::parse_with("hover_focus_underline", '_');
        assert_eq!(class.variants, vec!["hover", "focus"]);
        assert_eq!(class.base, "underline");
    }

    #[test]
    fn empty_input_has_empty_base() {
        let class = ClassName::parse("");
        assert_eq!(class.base, "");
        assert!(class.variants.is_empty());
    }

    #[test]
    fn selector_text_is_unescaped() {
        assert_eq!(class_name_from_selector(r".hover\:text-red-500"), "hover:text-red-500");
        assert_eq!(class_name_from_selector(r".w-\[calc\(100\%-1rem\)\]"), "w-[calc(100%-1rem)]");
        assert_eq!(class_name_from_selector(r".\32 xl\:flex"), "2xl:flex");
        assert_eq!(class_name_from_selector(r".p-0\.5"), "p-0.5");
        assert_eq!(class_name_from_selector("m-4"), "m-4");
    }
}
