use std::io::Write;

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::formatter::Formatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    files_inspected: usize,
    offense_count: usize,
    offenses: Vec<JsonOffense<'a>>,
}

#[derive(Serialize)]
struct JsonOffense<'a> {
    path: &'a str,
    line: usize,
    column: usize,
    severity: &'a str,
    cop_name: &'a str,
    message: &'a str,
    corrected: bool,
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], file_count: usize, out: &mut dyn Write) {
        let report = JsonReport {
            files_inspected: file_count,
            offense_count: diagnostics.len(),
            offenses: diagnostics
                .iter()
                .map(|d| JsonOffense {
                    path: &d.path,
                    line: d.location.line,
                    column: d.location.column,
                    severity: d.severity.name(),
                    cop_name: &d.cop_name,
                    message: &d.message,
                    corrected: d.corrected,
                })
                .collect(),
        };
        if let Ok(rendered) = serde_json::to_string_pretty(&report) {
            let _ = writeln!(out, "{rendered}");
        }
    }
}
