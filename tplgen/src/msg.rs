use color_print::{cformat, cprintln};

use crate::builder::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
}

impl Severity {
    fn label(self) -> String {
        match self {
            Severity::Error => cformat!("<red,bold>error</>"),
            Severity::Warn => cformat!("<yellow,bold>warn</>"),
        }
    }
}

/// Prints `diag` against its row of `source`, marking the operand.
pub fn print_row(severity: Severity, source: &str, diag: &Diagnostic) {
    let row = diag.row + 1;
    let written = match severity {
        Severity::Error => "",
        Severity::Warn => ", written as 0xFF",
    };
    cprintln!(
        "{}: Unknown operand `{}` in {} argument{}",
        severity.label(),
        diag.token,
        diag.position,
        written
    );
    cprintln!("     <blue>--></> <underline>{}:row {}</>", source, row);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", row, diag.raw);
    match diag.column() {
        Some(col) => cprintln!(
            "      <blue>|</> {}<red,bold>{}</>",
            " ".repeat(col),
            "^".repeat(diag.token.len())
        ),
        None => cprintln!("      <blue>|</>"),
    }
}

/// Reports the operands a run recorded instead of aborting on.
pub fn dump(source: &str, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        print_row(Severity::Warn, source, diag);
    }
    if !diagnostics.is_empty() {
        cprintln!(
            "<green,bold>note</>: {} operand(s) could not be encoded; the template is not usable as-is",
            diagnostics.len()
        );
    }
}
