use std::io::Write;

use crate::diagnostic::{Diagnostic, Severity};
use crate::formatter::Formatter;

/// Emits GitHub Actions workflow commands so offenses show up as PR
/// annotations when run in CI.
pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], _file_count: usize, out: &mut dyn Write) {
        for d in diagnostics {
            let level = match d.severity {
                Severity::Error | Severity::Fatal => "error",
                Severity::Convention | Severity::Warning => "warning",
            };
            let _ = writeln!(
                out,
                "::{level} file={},line={},col={}::{}: {}",
                d.path,
                d.location.line,
                d.location.column,
                d.cop_name,
                d.message,
            );
        }
    }
}
