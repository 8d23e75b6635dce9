use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

use crate::config::ResolvedConfig;

const LINTABLE_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx",
];

/// Discover JavaScript/TypeScript files from the given paths, respecting
/// .gitignore and AllCops.Exclude patterns.
pub fn discover_files(paths: &[PathBuf], config: &ResolvedConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            // Direct file paths bypass extension filtering
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(walk_directory(path, config)?);
        } else {
            anyhow::bail!("path does not exist: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_directory(dir: &Path, config: &ResolvedConfig) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(dir);
    builder.hidden(true).git_ignore(true).git_global(true);

    // Apply AllCops.Exclude patterns as overrides
    let global_excludes = config.global_excludes();
    if !global_excludes.is_empty() {
        let mut overrides = OverrideBuilder::new(dir);
        for pattern in global_excludes {
            // ignore crate overrides: prefix with ! to exclude
            overrides
                .add(&format!("!{pattern}"))
                .with_context(|| format!("invalid exclude pattern: {pattern}"))?;
        }
        let overrides = overrides.build().context("failed to build overrides")?;
        builder.overrides(overrides);
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.context("error walking directory")?;
        let path = entry.path();
        if path.is_file() && has_lintable_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn has_lintable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| LINTABLE_EXTENSIONS.contains(&ext))
}
