use crate::cop::walker::CopWalker;
use crate::cop::{Cop, CopConfig};
use crate::diagnostic::Diagnostic;
use crate::fix::FixSet;
use crate::parse::source::SourceFile;
use crate::parse::{Dialect, parse_source};

/// An expected offense parsed from a fixture annotation.
#[derive(Debug, Clone)]
pub struct ExpectedOffense {
    pub line: usize,
    pub column: usize,
    pub cop_name: String,
    pub message: String,
}

struct RawAnnotation {
    column: usize,
    cop_name: String,
    message: String,
}

/// Try to parse an annotation line.
///
/// Annotation format: optional leading whitespace, then one or more `^` characters,
/// then a space, then `Department/CopName: Message`.
///
/// The column of the offense is the byte position of the first `^` in the line.
///
/// Lines that merely contain `^` in other contexts (JS XOR `x ^ y`, caret in
/// strings) are rejected because:
/// - The `^` must be the first non-whitespace character
/// - Must be followed by ` Department/CopName: message` (with `/` and `: `)
fn try_parse_annotation(line: &str) -> Option<RawAnnotation> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('^') {
        return None;
    }

    let caret_count = trimmed.bytes().take_while(|&b| b == b'^').count();
    let after_carets = &trimmed[caret_count..];
    if !after_carets.starts_with(' ') {
        return None;
    }

    let rest = after_carets[1..].trim_end();
    let colon_space = rest.find(": ")?;
    let cop_name = &rest[..colon_space];
    let message = &rest[colon_space + 2..];

    // Cop names must contain '/' (e.g., Playwright/NoSkippedTest)
    if !cop_name.contains('/') {
        return None;
    }

    // Column = byte position of first '^' in the original line
    let column = line.len() - trimmed.len();

    Some(RawAnnotation {
        column,
        cop_name: cop_name.to_string(),
        message: message.to_string(),
    })
}

/// Parse fixture content into clean source bytes and expected offenses.
///
/// Annotation lines are stripped from the source. Line numbers in expected
/// offenses refer to the clean source (1-indexed).
///
/// # Convention
///
/// Annotations must appear *after* the source line they reference. The annotated
/// line number is the count of source lines seen so far (i.e., the previous
/// non-annotation line).
///
/// # Panics
///
/// Panics if an annotation appears before any source line, which would produce
/// an invalid line number of 0.
pub fn parse_fixture(raw: &[u8]) -> (Vec<u8>, Vec<ExpectedOffense>) {
    let text = std::str::from_utf8(raw).expect("fixture must be valid UTF-8");
    let elements: Vec<&str> = text.split('\n').collect();

    let mut source_lines: Vec<&str> = Vec::new();
    let mut expected: Vec<ExpectedOffense> = Vec::new();

    for (raw_idx, element) in elements.iter().enumerate() {
        if let Some(annotation) = try_parse_annotation(element) {
            assert!(
                !source_lines.is_empty(),
                "Annotation on raw line {} appears before any source line. \
                 Annotations must follow the source line they reference.\n\
                 Line: {:?}",
                raw_idx + 1,
                element,
            );
            // Annotation refers to the last source line added
            let source_line_number = source_lines.len(); // 1-indexed
            expected.push(ExpectedOffense {
                line: source_line_number,
                column: annotation.column,
                cop_name: annotation.cop_name,
                message: annotation.message,
            });
        } else {
            source_lines.push(element);
        }
    }

    let clean = source_lines.join("\n");
    (clean.into_bytes(), expected)
}

fn walk_cop(
    cop: &dyn Cop,
    source_bytes: &[u8],
    config: &CopConfig,
    collect_fixes: bool,
) -> CopWalkOutput {
    let source = SourceFile::from_bytes("test.spec.js", source_bytes.to_vec());
    let tree = parse_source(source.as_bytes(), Dialect::JavaScript)
        .expect("test source must parse");
    assert!(
        !tree.root_node().has_error(),
        "test source has a syntax error:\n{}",
        String::from_utf8_lossy(source_bytes),
    );
    let mut walker = CopWalker::new(cop, &source, config, collect_fixes);
    walker.walk(tree.root_node());
    CopWalkOutput {
        diagnostics: walker.diagnostics,
        fixes: walker.fixes,
    }
}

struct CopWalkOutput {
    diagnostics: Vec<Diagnostic>,
    fixes: Vec<crate::fix::Fix>,
}

/// Run a cop on raw source bytes and return the diagnostics.
///
/// Use this for custom assertions where the standard `assert_cop_offenses`
/// helpers don't fit (e.g., checking severity or partial matching).
pub fn run_cop(cop: &dyn Cop, source_bytes: &[u8]) -> Vec<Diagnostic> {
    run_cop_with_config(cop, source_bytes, CopConfig::default())
}

/// Run a cop on raw source bytes with a specific config and return diagnostics.
pub fn run_cop_with_config(
    cop: &dyn Cop,
    source_bytes: &[u8],
    config: CopConfig,
) -> Vec<Diagnostic> {
    walk_cop(cop, source_bytes, &config, false).diagnostics
}

/// Run a cop with fix collection enabled and return the diagnostics plus the
/// source after a single round of fixes.
pub fn run_cop_with_fixes(cop: &dyn Cop, source_bytes: &[u8]) -> (Vec<Diagnostic>, Vec<u8>) {
    let output = walk_cop(cop, source_bytes, &CopConfig::default(), true);
    let fixed = FixSet::from_vec(output.fixes).apply(source_bytes);
    (output.diagnostics, fixed)
}

/// Run a cop on fixture bytes (with annotations) and assert offenses match.
pub fn assert_cop_offenses(cop: &dyn Cop, fixture_bytes: &[u8]) {
    assert_cop_offenses_with_config(cop, fixture_bytes, CopConfig::default());
}

/// Run a cop on fixture bytes with a specific config and assert offenses match.
///
/// Both expected and actual diagnostics are sorted by (line, column) before
/// comparison, so annotation order in the fixture doesn't need to match the
/// cop's emission order.
pub fn assert_cop_offenses_with_config(cop: &dyn Cop, fixture_bytes: &[u8], config: CopConfig) {
    let (clean_source, mut expected) = parse_fixture(fixture_bytes);
    let mut diagnostics = walk_cop(cop, &clean_source, &config, false).diagnostics;

    // Sort both for order-independent comparison
    expected.sort_by_key(|e| (e.line, e.column));
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    assert_eq!(
        diagnostics.len(),
        expected.len(),
        "Expected {} offense(s) but got {}.\nExpected:\n{}\nActual:\n{}",
        expected.len(),
        diagnostics.len(),
        format_expected(&expected),
        format_diagnostics(&diagnostics),
    );

    for (i, (diag, exp)) in diagnostics.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            diag.location.line, exp.line,
            "Offense #{}: line mismatch (expected {} got {})\n  expected: {}:{} {}: {}\n  actual:   {d}",
            i + 1, exp.line, diag.location.line,
            exp.line, exp.column, exp.cop_name, exp.message,
            d = diag,
        );
        assert_eq!(
            diag.location.column, exp.column,
            "Offense #{}: column mismatch (expected {} got {})\n  expected: {}:{} {}: {}\n  actual:   {d}",
            i + 1, exp.column, diag.location.column,
            exp.line, exp.column, exp.cop_name, exp.message,
            d = diag,
        );
        assert_eq!(
            diag.cop_name, exp.cop_name,
            "Offense #{}: cop name mismatch\n  expected: {}\n  actual:   {}",
            i + 1, exp.cop_name, diag.cop_name,
        );
        assert_eq!(
            diag.message, exp.message,
            "Offense #{}: message mismatch for {}\n  expected: {:?}\n  actual:   {:?}",
            i + 1, exp.cop_name, exp.message, diag.message,
        );
    }
}

/// Assert a cop produces no offenses on the given source bytes.
pub fn assert_cop_no_offenses(cop: &dyn Cop, source_bytes: &[u8]) {
    assert_cop_no_offenses_with_config(cop, source_bytes, CopConfig::default());
}

/// Assert a cop produces no offenses on the given source bytes with a specific config.
pub fn assert_cop_no_offenses_with_config(cop: &dyn Cop, source_bytes: &[u8], config: CopConfig) {
    let diagnostics = run_cop_with_config(cop, source_bytes, config);

    assert!(
        diagnostics.is_empty(),
        "Expected no offenses but got {}:\n{}",
        diagnostics.len(),
        format_diagnostics(&diagnostics),
    );
}

fn format_expected(expected: &[ExpectedOffense]) -> String {
    expected
        .iter()
        .map(|e| format!("  {}:{} {}: {}", e.line, e.column, e.cop_name, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Annotation parser unit tests ----

    #[test]
    fn parse_annotation_with_carets() {
        let ann = try_parse_annotation("     ^^^ Playwright/Foo: some message").unwrap();
        assert_eq!(ann.column, 5);
        assert_eq!(ann.cop_name, "Playwright/Foo");
        assert_eq!(ann.message, "some message");
    }

    #[test]
    fn parse_annotation_at_column_zero() {
        let ann = try_parse_annotation("^^^ Playwright/Bar: msg").unwrap();
        assert_eq!(ann.column, 0);
        assert_eq!(ann.cop_name, "Playwright/Bar");
        assert_eq!(ann.message, "msg");
    }

    #[test]
    fn parse_annotation_single_caret() {
        let ann = try_parse_annotation("^ Playwright/X: m").unwrap();
        assert_eq!(ann.column, 0);
        assert_eq!(ann.cop_name, "Playwright/X");
        assert_eq!(ann.message, "m");
    }

    #[test]
    fn reject_caret_without_cop_name() {
        assert!(try_parse_annotation("a ^ b").is_none());
        assert!(try_parse_annotation("^ NotACopName").is_none());
        assert!(try_parse_annotation("^NoSpace/Cop: msg").is_none());
    }

    #[test]
    fn reject_xor_expression() {
        assert!(try_parse_annotation("const x = a ^ b;").is_none());
    }

    // ---- Fixture parser unit tests ----

    #[test]
    fn fixture_strips_annotation_lines() {
        let (clean, expected) = parse_fixture(
            b"test.skip('a', () => {});\n\
              \x20    ^ Playwright/NoSkippedTest: msg\n\
              test('b', () => {});\n",
        );
        assert_eq!(clean, b"test.skip('a', () => {});\ntest('b', () => {});\n");
        assert_eq!(expected.len(), 1);
        assert_eq!(expected[0].line, 1);
        assert_eq!(expected[0].column, 5);
    }

    #[test]
    fn fixture_without_annotations_is_unchanged() {
        let src = b"test('a', () => {});\n";
        let (clean, expected) = parse_fixture(src);
        assert_eq!(clean, src);
        assert!(expected.is_empty());
    }

    #[test]
    #[should_panic(expected = "before any source line")]
    fn fixture_rejects_leading_annotation() {
        parse_fixture(b"^ Playwright/X: m\ntest('a');\n");
    }
}
