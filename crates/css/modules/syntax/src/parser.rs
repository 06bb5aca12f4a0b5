//! `cssparser` glue producing the rule tree.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#parsing>

use crate::{Declaration, PropertyRule, RuleNode, Stylesheet};
use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};
use log::trace;

/// Selector given to the style leaf that holds declarations written directly in a group.
const NESTED_SELF: &str = "&";

/// Items that can appear inside a rule body or at the top level.
enum BodyItem {
    Declaration(Declaration),
    Rule(RuleNode),
    /// An `@property` rule, already recorded in the sink.
    Registered,
}

/// Prelude of an at-rule: its name plus the raw prelude text.
struct AtPrelude {
    name: String,
    text: String,
}

/// Rule and declaration parser shared by every nesting level.
/// Registered properties are pushed into `properties` as they are found.
struct BodyParser<'sink> {
    properties: &'sink mut Vec<PropertyRule>,
}

/// Consume the remaining tokens of `input` and return their source text, trimmed.
fn consume_raw(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Consume a declaration value, rejecting it when it holds a top-level `{}` block.
///
/// Such an item is a nested rule whose selector starts with an identifier
/// (`div:hover { ... }`); failing here lets the body parser retry it as a rule.
fn consume_value<'i>(input: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let start = input.position();
    while let Ok(token) = input.next_including_whitespace_and_comments() {
        if matches!(token, Token::CurlyBracketBlock) {
            return Err(input.new_custom_error(()));
        }
    }
    Ok(input.slice_from(start).trim().to_owned())
}

/// Parse a block body into its declarations and child rules.
fn parse_body(
    input: &mut Parser<'_, '_>,
    properties: &mut Vec<PropertyRule>,
) -> (Vec<Declaration>, Vec<RuleNode>) {
    let mut body = BodyParser { properties };
    let items: Vec<BodyItem> = RuleBodyParser::new(input, &mut body)
        .filter_map(|item| match item {
            Ok(parsed) => Some(parsed),
            Err((_, slice)) => {
                trace!("skipping invalid rule body item: {slice}");
                None
            }
        })
        .collect();
    let mut declarations = Vec::new();
    let mut children = Vec::new();
    for item in items {
        match item {
            BodyItem::Declaration(decl) => declarations.push(decl),
            BodyItem::Rule(node) => children.push(node),
            BodyItem::Registered => {}
        }
    }
    (declarations, children)
}

/// Serialise declarations back into block text (`name: value; name: value`).
fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|decl| format!("{}: {}", decl.name, decl.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build the node for a block: a style leaf when it only holds declarations,
/// otherwise a group whose first child carries the direct declarations.
fn block_node(prelude: String, declarations: &[Declaration], children: Vec<RuleNode>) -> RuleNode {
    if children.is_empty() && !prelude.starts_with('@') {
        return RuleNode::Style {
            selector: prelude,
            declarations: serialize_declarations(declarations),
        };
    }
    let mut nodes = Vec::with_capacity(children.len().saturating_add(1));
    if !declarations.is_empty() {
        nodes.push(RuleNode::Style {
            selector: NESTED_SELF.to_owned(),
            declarations: serialize_declarations(declarations),
        });
    }
    nodes.extend(children);
    RuleNode::Group {
        condition: prelude,
        children: nodes,
    }
}

/// Strip one pair of matching quotes from a descriptor value.
fn unquote(value: &str) -> String {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_owned();
        }
    }
    trimmed.to_owned()
}

/// Interpret the descriptors of an `@property` rule.
/// Spec: <https://www.w3.org/TR/css-properties-values-api-1/#the-css-property-rule-interface>
fn property_rule(name: String, declarations: Vec<Declaration>) -> PropertyRule {
    let mut rule = PropertyRule {
        name,
        syntax: None,
        inherits: true,
        initial_value: None,
    };
    for decl in declarations {
        match decl.name.as_str() {
            "syntax" => rule.syntax = Some(unquote(&decl.value)),
            "inherits" => rule.inherits = !decl.value.trim().eq_ignore_ascii_case("false"),
            "initial-value" => rule.initial_value = Some(decl.value),
            _ => {}
        }
    }
    rule
}

impl<'i> DeclarationParser<'i> for BodyParser<'_> {
    type Declaration = BodyItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // Custom properties may hold `{}` blocks.
        let (name, value) = if name.starts_with("--") {
            (name.as_ref().to_owned(), consume_raw(input))
        } else {
            (name.to_ascii_lowercase(), consume_value(input)?)
        };
        Ok(BodyItem::Declaration(Declaration { name, value }))
    }
}

impl<'i> AtRuleParser<'i> for BodyParser<'_> {
    type Prelude = AtPrelude;
    type AtRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(AtPrelude {
            name: name.to_ascii_lowercase(),
            text: consume_raw(input),
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        // Statement at-rules (`@layer a, b;`, `@import ...;`) carry no rules.
        trace!("skipping statement at-rule @{} {}", prelude.name, prelude.text);
        Err(())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let (declarations, children) = parse_body(input, self.properties);
        if prelude.name == "property" {
            // Recorded on the spot so registrations stay in document order.
            self.properties.push(property_rule(prelude.text, declarations));
            return Ok(BodyItem::Registered);
        }
        let condition = if prelude.text.is_empty() {
            format!("@{}", prelude.name)
        } else {
            format!("@{} {}", prelude.name, prelude.text)
        };
        Ok(BodyItem::Rule(block_node(condition, &declarations, children)))
    }
}

impl<'i> QualifiedRuleParser<'i> for BodyParser<'_> {
    type Prelude = String;
    type QualifiedRule = BodyItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(consume_raw(input))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let (declarations, children) = parse_body(input, self.properties);
        Ok(BodyItem::Rule(block_node(prelude, &declarations, children)))
    }
}

impl<'i> RuleBodyItemParser<'i, BodyItem, ()> for BodyParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Parse a full stylesheet into a rule tree.
///
/// Invalid rules are dropped; parsing never fails as a whole.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut properties = Vec::new();
    let mut top = BodyParser {
        properties: &mut properties,
    };
    let items: Vec<BodyItem> = StyleSheetParser::new(&mut parser, &mut top)
        .filter_map(Result::ok)
        .collect();
    let rules = items
        .into_iter()
        .filter_map(|item| match item {
            BodyItem::Rule(node) => Some(node),
            BodyItem::Declaration(_) | BodyItem::Registered => None,
        })
        .collect();
    Stylesheet::new(rules, properties)
}
