pub mod fn_call;
pub mod playwright;
pub mod registry;
pub mod util;
pub mod walker;

use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::fix::Fix;
use crate::parse::source::SourceFile;

/// Per-cop configuration extracted from .playcop.yml.
#[derive(Debug, Clone)]
pub struct CopConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub options: HashMap<String, serde_yml::Value>,
}

impl Default for CopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            exclude: Vec::new(),
            include: Vec::new(),
            options: HashMap::new(),
        }
    }
}

impl CopConfig {
    /// Read a boolean option, falling back to `default` when absent or
    /// not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.options.get(key) {
            Some(serde_yml::Value::Bool(b)) => *b,
            _ => default,
        }
    }
}

/// A lint rule. Implementations must be Send + Sync so they can be shared
/// across rayon worker threads, and must hold no mutable state; every
/// `check_node` call is independent.
pub trait Cop: Send + Sync {
    /// The fully-qualified cop name, e.g. "Playwright/NoSkippedTest".
    fn name(&self) -> &'static str;

    /// One-line human-readable description for --list-cops and docs.
    fn description(&self) -> &'static str;

    /// Stable documentation link for this cop.
    fn documentation_url(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Path globs this cop applies to by default (empty = all files).
    fn default_include(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether this cop attaches suggested fixes to its offenses.
    fn supports_autocorrect(&self) -> bool {
        false
    }

    /// Human-readable label for the suggested fix, when the cop offers one.
    fn fix_description(&self) -> Option<&'static str> {
        None
    }

    /// Option keys this cop understands. Anything else in its config
    /// section is rejected by schema validation before linting starts.
    fn allowed_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Node-based check, called for every syntax node during traversal.
    /// `fixes` is Some only when the run collects suggested fixes (--fix).
    fn check_node(
        &self,
        source: &SourceFile,
        node: &tree_sitter::Node<'_>,
        config: &CopConfig,
        diagnostics: &mut Vec<Diagnostic>,
        fixes: Option<&mut Vec<Fix>>,
    );

    /// Build a diagnostic attributed to this cop.
    fn diagnostic(
        &self,
        source: &SourceFile,
        line: usize,
        column: usize,
        message: String,
    ) -> Diagnostic {
        Diagnostic {
            path: source.path_str().to_string(),
            location: Location { line, column },
            severity: self.default_severity(),
            cop_name: self.name().to_string(),
            message,
            corrected: false,
        }
    }
}
