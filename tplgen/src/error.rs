use color_print::cprintln;
use thiserror::Error;

use crate::builder::Diagnostic;
use crate::msg::{self, Severity};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] arch::error::Error),

    #[error("Unknown operand `{}` in {} argument", .0.token, .0.position)]
    UnknownOperand(Diagnostic),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(String, #[source] serde_yaml::Error),
}

impl Error {
    /// Print error with its source chain, or with the offending row when it
    /// belongs to one.
    pub fn print_diag(&self, source: &str) {
        if let Error::UnknownOperand(diag) = self {
            msg::print_row(Severity::Error, source, diag);
            return;
        }

        cprintln!("<red,bold>error</>: {}", self);
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            cprintln!("     <blue>=</> <bold>caused by</>: {}", err);
            cause = err.source();
        }
    }
}
