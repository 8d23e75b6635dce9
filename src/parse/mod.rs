pub mod source;

use std::path::Path;

use anyhow::{Context, Result};
use tree_sitter::{Language, Parser, Tree};

/// Grammar variant for a source file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Pick the dialect for a path. Unknown extensions fall back to
    /// JavaScript, matching how explicitly-passed files bypass discovery
    /// filtering.
    pub fn from_path(path: &Path) -> Dialect {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts" | "mts" | "cts") => Dialect::TypeScript,
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::JavaScript,
        }
    }

    fn language(&self) -> Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Parse source bytes with the given dialect's grammar.
pub fn parse_source(content: &[u8], dialect: Dialect) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .context("incompatible tree-sitter grammar version")?;
    parser
        .parse(content, None)
        .context("tree-sitter returned no parse tree")
}
