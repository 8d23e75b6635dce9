use tree_sitter::Node;

use crate::cop::{Cop, CopConfig};
use crate::diagnostic::Diagnostic;
use crate::fix::Fix;
use crate::parse::source::SourceFile;

/// Runs one cop over every node of a parsed tree, collecting diagnostics
/// and (when enabled) suggested fixes.
pub struct CopWalker<'a> {
    cop: &'a dyn Cop,
    source: &'a SourceFile,
    config: &'a CopConfig,
    collect_fixes: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub fixes: Vec<Fix>,
}

impl<'a> CopWalker<'a> {
    pub fn new(
        cop: &'a dyn Cop,
        source: &'a SourceFile,
        config: &'a CopConfig,
        collect_fixes: bool,
    ) -> Self {
        Self {
            cop,
            source,
            config,
            collect_fixes,
            diagnostics: Vec::new(),
            fixes: Vec::new(),
        }
    }

    pub fn walk(&mut self, node: Node<'_>) {
        if self.collect_fixes {
            self.cop.check_node(
                self.source,
                &node,
                self.config,
                &mut self.diagnostics,
                Some(&mut self.fixes),
            );
        } else {
            self.cop
                .check_node(self.source, &node, self.config, &mut self.diagnostics, None);
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            self.walk(child);
        }
    }
}
