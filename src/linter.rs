use std::path::PathBuf;

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;

use crate::cli::Args;
use crate::config::ResolvedConfig;
use crate::cop::registry::CopRegistry;
use crate::cop::walker::CopWalker;
use crate::cop::CopConfig;
use crate::diagnostic::Diagnostic;
use crate::fix::{Fix, FixSet};
use crate::parse::source::SourceFile;
use crate::parse::{parse_source, Dialect};

/// Fix application iterates until no cop emits a fix; the cap guards
/// against a cop whose fix keeps re-introducing its own offense.
const MAX_FIX_ITERATIONS: usize = 20;

pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub file_count: usize,
    pub corrected_count: usize,
}

/// Per-cop path filter: explicit Include/Exclude from config, falling back
/// to the cop's default Include globs. Built once per run and shared across
/// rayon workers.
struct CopFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl CopFilter {
    fn matches(&self, path: &std::path::Path) -> bool {
        if let Some(ref exclude) = self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        match self.include {
            Some(ref include) => include.is_match(path),
            None => true,
        }
    }
}

struct LintContext<'a> {
    registry: &'a CopRegistry,
    args: &'a Args,
    cop_configs: Vec<CopConfig>,
    filters: Vec<CopFilter>,
}

impl<'a> LintContext<'a> {
    fn build(config: &ResolvedConfig, registry: &'a CopRegistry, args: &'a Args) -> Self {
        let mut cop_configs = Vec::with_capacity(registry.len());
        let mut filters = Vec::with_capacity(registry.len());

        for cop in registry.cops() {
            let cop_config = config.cop_config(cop.name());

            let include_globs: Vec<String> = if cop_config.include.is_empty() {
                cop.default_include().iter().map(|s| s.to_string()).collect()
            } else {
                cop_config.include.clone()
            };
            let include = build_globset(&include_globs);
            let exclude = build_globset(&cop_config.exclude);

            cop_configs.push(cop_config);
            filters.push(CopFilter { include, exclude });
        }

        Self {
            registry,
            args,
            cop_configs,
            filters,
        }
    }

    fn cop_runs_on(&self, index: usize, name: &str, path: &std::path::Path) -> bool {
        if !self.args.only.is_empty() && !self.args.only.iter().any(|o| o == name) {
            return false;
        }
        if self.args.except.iter().any(|e| e == name) {
            return false;
        }
        if !self.cop_configs[index].enabled {
            return false;
        }
        self.filters[index].matches(path)
    }
}

fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => eprintln!("warning: ignoring invalid glob {pattern:?}: {e}"),
        }
    }
    builder.build().ok()
}

/// Lint the file set in parallel. Under --fix, patched files are written
/// back to disk.
pub fn run_linter(
    files: &[PathBuf],
    config: &ResolvedConfig,
    registry: &CopRegistry,
    args: &Args,
) -> LintResult {
    let ctx = LintContext::build(config, registry, args);

    let per_file: Vec<(Vec<Diagnostic>, usize)> = files
        .par_iter()
        .map(|path| {
            let source = match SourceFile::from_path(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("warning: {e:#}");
                    return (Vec::new(), 0);
                }
            };
            let (diagnostics, fixed_bytes, corrected) = lint_source_inner(&source, &ctx);
            if let Some(bytes) = fixed_bytes {
                if let Err(e) = std::fs::write(path, bytes) {
                    eprintln!("warning: failed to write {}: {e}", path.display());
                }
            }
            (diagnostics, corrected)
        })
        .collect();

    let mut diagnostics = Vec::new();
    let mut corrected_count = 0;
    for (diags, corrected) in per_file {
        diagnostics.extend(diags);
        corrected_count += corrected;
    }
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    LintResult {
        diagnostics,
        file_count: files.len(),
        corrected_count,
    }
}

/// Lint a single in-memory source (--stdin). Never writes to disk; under
/// --fix the patched source is returned for the caller to print.
pub fn lint_source(
    source: &SourceFile,
    config: &ResolvedConfig,
    registry: &CopRegistry,
    args: &Args,
) -> (LintResult, Option<Vec<u8>>) {
    let ctx = LintContext::build(config, registry, args);
    let (diagnostics, fixed_bytes, corrected_count) = lint_source_inner(source, &ctx);
    (
        LintResult {
            diagnostics,
            file_count: 1,
            corrected_count,
        },
        fixed_bytes,
    )
}

/// Returns (diagnostics, fixed_bytes, corrected_count).
fn lint_source_inner(
    source: &SourceFile,
    ctx: &LintContext<'_>,
) -> (Vec<Diagnostic>, Option<Vec<u8>>, usize) {
    if !ctx.args.fix {
        let (diags, _) = lint_source_once(source, ctx, false);
        return (diags, None, 0);
    }

    let original_bytes = source.as_bytes();
    let mut current_bytes = original_bytes.to_vec();
    let path = source.path.clone();
    let mut corrected_diags: Vec<Diagnostic> = Vec::new();

    for _iteration in 0..MAX_FIX_ITERATIONS {
        let iter_source = SourceFile::from_vec(path.clone(), current_bytes.clone());
        let (diags, fixes) = lint_source_once(&iter_source, ctx, true);

        if fixes.is_empty() {
            // Converged. Merge fixed offenses from earlier iterations with
            // whatever remains unfixable in this pass.
            let mut all_diags = corrected_diags;
            all_diags.extend(diags);
            let fixed = validate_fixed_bytes(original_bytes, current_bytes, &path);
            if fixed.is_none() {
                // A discarded batch never reaches the file; the offenses
                // it claimed to correct are still present.
                for d in &mut all_diags {
                    d.corrected = false;
                }
            }
            let total_corrected = all_diags.iter().filter(|d| d.corrected).count();
            return (all_diags, fixed, total_corrected);
        }

        corrected_diags.extend(diags.into_iter().filter(|d| d.corrected));

        let fix_set = FixSet::from_vec(fixes);
        let new_bytes = fix_set.apply(&current_bytes);
        if new_bytes == current_bytes {
            // Source unchanged despite fixes, bail to avoid looping.
            let total_corrected = corrected_diags.len();
            return (corrected_diags, None, total_corrected);
        }
        current_bytes = new_bytes;
    }

    // Hit the cap: one final pass without fixes for clean diagnostics.
    let final_source = SourceFile::from_vec(path.clone(), current_bytes.clone());
    let (diags, _) = lint_source_once(&final_source, ctx, false);
    let mut all_diags = corrected_diags;
    all_diags.extend(diags);
    let fixed = validate_fixed_bytes(original_bytes, current_bytes, &path);
    if fixed.is_none() {
        for d in &mut all_diags {
            d.corrected = false;
        }
    }
    let total_corrected = all_diags.iter().filter(|d| d.corrected).count();
    (all_diags, fixed, total_corrected)
}

/// Run all applicable cops once. Returns (diagnostics, fixes).
fn lint_source_once(
    source: &SourceFile,
    ctx: &LintContext<'_>,
    collect_fixes: bool,
) -> (Vec<Diagnostic>, Vec<Fix>) {
    let dialect = Dialect::from_path(&source.path);
    let tree = match parse_source(source.as_bytes(), dialect) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("warning: {}: {e:#}", source.path_str());
            return (Vec::new(), Vec::new());
        }
    };

    // Skip cops on files with syntax errors; the error-recovered tree is
    // unreliable and produces false positives.
    if tree.root_node().has_error() {
        return (Vec::new(), Vec::new());
    }

    let mut diagnostics = Vec::new();
    let mut fixes: Vec<Fix> = Vec::new();

    for (i, cop) in ctx.registry.cops().iter().enumerate() {
        if !ctx.cop_runs_on(i, cop.name(), &source.path) {
            continue;
        }

        let cop_config = &ctx.cop_configs[i];
        let with_fixes = collect_fixes && cop.supports_autocorrect();
        let mut walker = CopWalker::new(cop.as_ref(), source, cop_config, with_fixes);
        walker.walk(tree.root_node());

        let mut cop_diags = walker.diagnostics;
        if let Some(severity) = cop_config.severity {
            for d in &mut cop_diags {
                d.severity = severity;
            }
        }
        diagnostics.extend(cop_diags);

        for mut fix in walker.fixes {
            fix.cop_index = i;
            fixes.push(fix);
        }
    }

    (diagnostics, fixes)
}

/// Re-parse patched bytes and discard the whole batch if the edits produced
/// invalid syntax. Suggested fixes are advisory; a fix that corrupts the
/// file must never reach disk.
fn validate_fixed_bytes(
    original_bytes: &[u8],
    current_bytes: Vec<u8>,
    path: &std::path::Path,
) -> Option<Vec<u8>> {
    if current_bytes == original_bytes {
        return None;
    }
    let dialect = Dialect::from_path(path);
    let has_errors = match parse_source(&current_bytes, dialect) {
        Ok(tree) => tree.root_node().has_error(),
        Err(_) => true,
    };
    if has_errors {
        eprintln!(
            "warning: fixes produced invalid syntax for {}, skipping",
            path.display()
        );
        return None;
    }
    Some(current_bytes)
}
