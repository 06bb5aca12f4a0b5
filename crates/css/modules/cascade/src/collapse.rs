//! Declaration collapsing: nested rule tree to flat style set.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#cascade-order> (source order only)

use crate::StyleSet;
use crate::casing::{camel_case_property, is_custom_property};
use css_syntax::{RuleNode, split_declarations};
use log::trace;

/// Flatten `node` into `target`, overwriting keys already present.
///
/// Group conditions (at-rule preludes, nesting selectors) are ignored and children are
/// visited in document order, so the last declaration of a property wins. Standard
/// property names are stored in camel case; custom property names are kept verbatim.
/// Declarations of standard properties with an empty value are dropped.
pub fn collapse_into(node: &RuleNode, target: &mut StyleSet) {
    match node {
        RuleNode::Group {
            condition,
            children,
        } => {
            trace!("collapsing group `{condition}` ({} children)", children.len());
            for child in children {
                collapse_into(child, target);
            }
        }
        RuleNode::Style {
            selector,
            declarations,
        } => {
            for decl in split_declarations(declarations) {
                if is_custom_property(&decl.name) {
                    target.insert(decl.name, decl.value);
                    continue;
                }
                if decl.value.is_empty() {
                    trace!("dropping empty `{}` in `{selector}`", decl.name);
                    continue;
                }
                target.insert(camel_case_property(&decl.name), decl.value);
            }
        }
    }
}
