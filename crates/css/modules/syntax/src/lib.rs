//! CSS Syntax Module Level 3: parsing stylesheets into a rule tree.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! The tree keeps only what utility resolution needs: grouping nodes (at-rules and
//! nested style rules, with their condition text) and style nodes (a selector plus a
//! declaration block). `@property` registrations are collected on the side.

#![forbid(unsafe_code)]

mod parser;

pub use parser::parse_stylesheet;

/// A single CSS declaration (`name: value`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name. Lowercased unless it is a custom property.
    pub name: String,
    /// Raw value text, trimmed.
    pub value: String,
}

/// A node in the rule tree.
///
/// Spec: <https://www.w3.org/TR/css-syntax-3/#style-rules>
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleNode {
    /// A rule containing child rules: a block at-rule or a style rule with nested rules.
    /// The condition (at-rule prelude or nesting selector) is kept for diagnostics only.
    Group {
        condition: String,
        children: Vec<RuleNode>,
    },
    /// A leaf style rule with its declaration block serialised as `name: value; ...`.
    Style {
        selector: String,
        declarations: String,
    },
}

impl RuleNode {
    /// Selector text for style nodes, condition text for groups.
    pub fn prelude(&self) -> &str {
        match self {
            Self::Group { condition, .. } => condition,
            Self::Style { selector, .. } => selector,
        }
    }
}

/// A registered custom property from an `@property` rule.
///
/// Spec: <https://www.w3.org/TR/css-properties-values-api-1/#at-property-rule>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRule {
    /// The custom property name, including the leading `--`.
    pub name: String,
    /// Value of the `syntax` descriptor with surrounding quotes removed.
    pub syntax: Option<String>,
    /// Value of the `inherits` descriptor. A rule without it is treated as inheriting.
    pub inherits: bool,
    /// Raw `initial-value` descriptor, if present.
    pub initial_value: Option<String>,
}

/// One utility rule as seen by the resolver: its selector text and the rule tree to collapse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtilityRule {
    /// Raw selector text, e.g. `.hover\:text-red-500`.
    pub selector: String,
    /// The rule itself (a style leaf, or a group when it nests conditions).
    pub node: RuleNode,
}

/// An ordered source of utility rules.
///
/// Iteration order is stylesheet order; later rules override earlier ones when collapsed.
pub trait RuleSource {
    /// Utility rules in stylesheet order.
    fn utility_rules(&self) -> &[UtilityRule];
}

/// A parsed stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<RuleNode>,
    /// `@property` registrations in source order, wherever they appeared.
    pub properties: Vec<PropertyRule>,
    /// Utility rules extracted from `rules`.
    utilities: Vec<UtilityRule>,
}

impl Stylesheet {
    /// Build a stylesheet from already-parsed parts, indexing its utility rules.
    pub fn new(rules: Vec<RuleNode>, properties: Vec<PropertyRule>) -> Self {
        let mut utilities = Vec::new();
        collect_utilities(&rules, &mut utilities);
        Self {
            rules,
            properties,
            utilities,
        }
    }

    /// Declarations of every `:root` / `:host` rule, in source order.
    ///
    /// These form the theme: the custom properties a utility can reference.
    pub fn theme_declarations(&self) -> Vec<Declaration> {
        let mut out = Vec::new();
        collect_theme(&self.rules, &mut out);
        out
    }
}

impl RuleSource for Stylesheet {
    fn utility_rules(&self) -> &[UtilityRule] {
        &self.utilities
    }
}

/// True when `selector` names a single class (`.name`), which is how utilities are emitted.
fn is_utility_selector(selector: &str) -> bool {
    selector.trim_start().starts_with('.')
}

/// Walk top-level rules and block at-rules, keeping class rules in document order.
/// Rules nested inside another style rule are part of that rule, not utilities themselves.
fn collect_utilities(nodes: &[RuleNode], out: &mut Vec<UtilityRule>) {
    for node in nodes {
        let prelude = node.prelude();
        if is_utility_selector(prelude) {
            out.push(UtilityRule {
                selector: prelude.trim().to_owned(),
                node: node.clone(),
            });
            continue;
        }
        if let RuleNode::Group {
            condition,
            children,
        } = node
            && condition.starts_with('@')
        {
            collect_utilities(children, out);
        }
    }
}

/// True if every selector in the list is `:root` or `:host`.
fn is_theme_selector(selector: &str) -> bool {
    let mut parts = selector.split(',').map(str::trim).peekable();
    parts.peek().is_some() && parts.all(|part| part == ":root" || part == ":host")
}

/// Gather declarations from theme rules, descending through at-rule groups.
fn collect_theme(nodes: &[RuleNode], out: &mut Vec<Declaration>) {
    for node in nodes {
        match node {
            RuleNode::Style {
                selector,
                declarations,
            } if is_theme_selector(selector) => {
                out.extend(split_declarations(declarations));
            }
            RuleNode::Group {
                condition,
                children,
            } if condition.starts_with('@') => collect_theme(children, out),
            RuleNode::Group { .. } | RuleNode::Style { .. } => {}
        }
    }
}

/// Split a declaration block (`a: b; c: d`) into declarations.
///
/// Semicolons inside parentheses, brackets or quotes do not end a declaration, so values
/// such as `url(data:image/png;base64,...)` survive intact. Items without a colon or with
/// an empty name are skipped. Property names are trimmed but otherwise left as written.
pub fn split_declarations(block: &str) -> Vec<Declaration> {
    let mut out = Vec::new();
    for item in split_top_level(block, ';') {
        let Some((raw_name, raw_value)) = item.split_once(':') else {
            continue;
        };
        let name = raw_name.trim();
        if name.is_empty() {
            continue;
        }
        out.push(Declaration {
            name: name.to_owned(),
            value: raw_value.trim().to_owned(),
        });
    }
    out
}

/// Split `text` on `separator` where it is not nested in `()`/`[]`/`{}` or a string.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0usize;
    for (index, character) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if character == '\\' {
            escaped = true;
            continue;
        }
        if let Some(open) = quote {
            if character == open {
                quote = None;
            }
            continue;
        }
        match character {
            '"' | '\'' => quote = Some(character),
            '(' | '[' | '{' => depth = depth.saturating_add(1),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if character == separator && depth == 0 => {
                parts.push(text.get(start..index).unwrap_or_default());
                start = index.saturating_add(character.len_utf8());
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    parts
}
