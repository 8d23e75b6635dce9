//! Shared helpers for inspecting Playwright call syntax.

use tree_sitter::Node;

use crate::parse::source::SourceFile;

/// Resolve a node's statically-known string value.
///
/// Property and plain identifiers resolve to their text; string literals
/// to their content without the quote characters. Anything else (computed
/// members, template strings with substitutions, numbers) is not
/// string-resolvable and yields None.
pub fn string_value(source: &SourceFile, node: &Node<'_>) -> Option<String> {
    match node.kind() {
        "identifier" | "property_identifier" => Some(source.node_text(node).to_string()),
        "string" => {
            let text = source.node_text(node);
            // Range includes the surrounding quotes.
            if text.len() >= 2 {
                Some(text[1..text.len() - 1].to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Whether a member token is a plain identifier (`.skip`) as opposed to a
/// string-literal or bracket form (`["skip"]`).
pub fn is_identifier(node: &Node<'_>) -> bool {
    matches!(node.kind(), "identifier" | "property_identifier")
}

/// The argument nodes of a call expression, with comment extras filtered
/// out so positional indexing matches the source arguments.
pub fn call_arguments<'t>(call: &Node<'t>) -> Vec<Node<'t>> {
    let Some(args) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// Whether a node is a function value (the body argument of a test or
/// describe declaration).
pub fn is_function(node: &Node<'_>) -> bool {
    matches!(
        node.kind(),
        "arrow_function"
            | "function_expression"
            | "function"
            | "generator_function"
            | "generator_function_expression"
    )
}
