//! Classifies call expressions as Playwright test/describe declarations.
//!
//! Given a `call_expression` node, produces the call's kind and the ordered
//! member chain between the base identifier and the invocation, e.g.
//! `test.describe.skip('g', fn)` → kind Describe, members `[skip]`.

use tree_sitter::Node;

use crate::cop::util::{is_identifier, string_value};
use crate::parse::source::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Test,
    Describe,
}

/// One token of the dot-/bracket-chain, in source order.
#[derive(Debug, Clone)]
pub struct ChainMember {
    /// Statically resolved string value; None for computed members.
    pub value: Option<String>,
    /// Byte range of the token itself (quotes included for string forms).
    pub start: usize,
    pub end: usize,
    /// Plain identifier member (`.skip`) vs string/bracket form (`["skip"]`).
    pub identifier: bool,
}

impl ChainMember {
    pub fn is(&self, name: &str) -> bool {
        self.value.as_deref() == Some(name)
    }
}

#[derive(Debug)]
pub struct FnCall {
    pub kind: CallKind,
    pub members: Vec<ChainMember>,
}

/// Classify a call-expression node, or return None for anything that is not
/// a test/describe invocation.
///
/// Only the outermost invocation of a chained call is classified: for
/// `test.skip.each([1, 2])('t', fn)` or `test.skip().only('t', fn)` the
/// inner call node yields None, so each chain is judged exactly once.
pub fn parse_fn_call(source: &SourceFile, node: &Node<'_>) -> Option<FnCall> {
    if node.kind() != "call_expression" {
        return None;
    }
    if let Some(parent) = node.parent() {
        match parent.kind() {
            // The callee of a chained invocation.
            "call_expression"
                if parent
                    .child_by_field_name("function")
                    .is_some_and(|f| f.id() == node.id()) =>
            {
                return None;
            }
            // A link inside a longer member chain.
            "member_expression" | "subscript_expression" => return None,
            _ => {}
        }
    }

    // Unwind the callee chain down to the base identifier, collecting
    // member tokens right-to-left.
    let mut members: Vec<ChainMember> = Vec::new();
    let mut current = node.child_by_field_name("function")?;
    let base = loop {
        match current.kind() {
            "member_expression" => {
                let prop = current.child_by_field_name("property")?;
                members.push(chain_member(source, &prop));
                current = current.child_by_field_name("object")?;
            }
            "subscript_expression" => {
                let index = current.child_by_field_name("index")?;
                members.push(chain_member(source, &index));
                current = current.child_by_field_name("object")?;
            }
            // Chained invocation, e.g. the `each([1, 2])` head of
            // `test.skip.each([1, 2])('t', fn)`.
            "call_expression" => {
                current = current.child_by_field_name("function")?;
            }
            "identifier" => break source.node_text(&current),
            _ => return None,
        }
    };
    members.reverse();

    let kind = match base {
        "describe" => CallKind::Describe,
        "test" | "it" => {
            // `test.describe…` is a group declaration; the `describe`
            // member is part of the head, not an annotation.
            if members.first().is_some_and(|m| m.is("describe")) {
                members.remove(0);
                CallKind::Describe
            } else {
                CallKind::Test
            }
        }
        _ => return None,
    };

    Some(FnCall { kind, members })
}

fn chain_member(source: &SourceFile, node: &Node<'_>) -> ChainMember {
    ChainMember {
        value: string_value(source, node),
        start: node.start_byte(),
        end: node.end_byte(),
        identifier: is_identifier(node),
    }
}
