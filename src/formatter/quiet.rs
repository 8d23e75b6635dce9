use std::io::Write;

use crate::diagnostic::Diagnostic;
use crate::formatter::Formatter;

/// Like the text formatter but without the trailing summary line.
pub struct QuietFormatter;

impl Formatter for QuietFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], _file_count: usize, out: &mut dyn Write) {
        for d in diagnostics {
            let _ = writeln!(out, "{d}");
        }
    }
}
