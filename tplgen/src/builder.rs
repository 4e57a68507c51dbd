use arch::inst::{ArgumentCombo, Instruction, InstructionBuilder};
use arch::operand::{Operand, UNKNOWN_OPERAND};
use arch::template::Header;
use arch::token::tokenize;
use arch::writer::TemplateWriter;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, OnUnknown};
use crate::error::Error;
use crate::source::{Row, RowSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Arg1,
    Arg2,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Arg1 => write!(f, "first"),
            Position::Arg2 => write!(f, "second"),
        }
    }
}

/// An operand that was written as [`UNKNOWN_OPERAND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Index of the row in the source.
    pub row: usize,
    pub raw: String,
    pub position: Position,
    pub token: String,
}

impl Diagnostic {
    /// Byte offset of the offending token in `raw`.
    pub fn column(&self) -> Option<usize> {
        let lead = self.raw.len() - self.raw.trim_start().len();
        let mut from = lead + self.raw[lead..].find(' ')?;
        if self.position == Position::Arg2 {
            from += self.raw[from..].find(',')? + 1;
        }
        self.raw[from..]
            .find(self.token.as_str())
            .map(|at| from + at)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub instructions: usize,
    pub combos: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Turns rows into instruction records and streams them to a template.
pub struct Generator<'a> {
    config: &'a Config,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Generator { config }
    }

    fn resolve(&self, token: &str) -> Result<Operand, arch::error::Error> {
        if self.config.fold_case {
            Operand::resolve_folded(token)
        } else {
            Operand::resolve(token)
        }
    }

    fn operand(
        &self,
        idx: usize,
        row: &Row,
        position: Position,
        token: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<u8, Error> {
        if let Ok(operand) = self.resolve(token) {
            return Ok(operand.index());
        }

        let diag = Diagnostic {
            row: idx,
            raw: row.mnemonic.clone(),
            position,
            token: token.to_string(),
        };
        match self.config.on_unknown {
            OnUnknown::FailFast => Err(Error::UnknownOperand(diag)),
            OnUnknown::RecordAndContinue => {
                tracing::warn!(row = idx, token, %position, "unknown operand");
                diagnostics.push(diag);
                Ok(UNKNOWN_OPERAND)
            }
        }
    }

    /// Tokenizes and resolves one row.
    pub fn combo(
        &self,
        idx: usize,
        row: &Row,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ArgumentCombo, Error> {
        let tokens = tokenize(&row.mnemonic);
        let arg1 = self.operand(idx, row, Position::Arg1, &tokens.arg1, diagnostics)?;
        let arg2 = self.operand(idx, row, Position::Arg2, &tokens.arg2, diagnostics)?;
        Ok(ArgumentCombo {
            arg1,
            arg2,
            opcode: row.code,
            prefix: row.prefix,
        })
    }

    /// Groups every row of `prefix` into one record, in delivery order or,
    /// with `sort_combos`, stably ordered by (prefix byte, opcode).
    pub fn instruction(
        &self,
        source: &RowSource,
        prefix: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Instruction, Error> {
        let mut rows: Vec<(usize, &Row)> = source.rows_for(prefix).collect();
        if self.config.sort_combos {
            rows.sort_by_key(|(_, row)| (row.prefix, row.code));
        }

        let mut builder = InstructionBuilder::new(prefix);
        for (idx, row) in rows {
            builder.push(self.combo(idx, row, diagnostics)?);
        }
        Ok(builder.finish()?)
    }

    /// Writes the whole template to `sink`, one record at a time.
    pub fn write<W: Write>(&self, source: &RowSource, sink: W) -> Result<Report, Error> {
        let mut prefixes = source.prefixes();
        if self.config.drop_first_prefix && !prefixes.is_empty() {
            let dropped = prefixes.remove(0);
            if dropped.is_empty() {
                tracing::debug!("dropped blank first prefix");
            } else {
                tracing::warn!(prefix = %dropped, "dropped first prefix, which is not blank");
            }
        }

        let header = Header::new(self.config.version, prefixes.len())?;
        let mut writer = TemplateWriter::new(sink);
        writer.write_header(&header)?;

        let mut report = Report::default();
        for prefix in &prefixes {
            let inst = self.instruction(source, prefix, &mut report.diagnostics)?;
            tracing::trace!(
                mnemonic = inst.mnemonic(),
                combos = inst.combos().len(),
                "writing instruction"
            );
            writer.write_record(&inst)?;
            report.instructions += 1;
            report.combos += inst.combos().len();
        }
        writer.close()?;

        tracing::debug!(
            instructions = report.instructions,
            combos = report.combos,
            "template written"
        );
        Ok(report)
    }

    /// Builds `output` through a temporary file that replaces it only when
    /// the whole template was written.
    pub fn build_file(&self, source: &RowSource, output: &Path) -> Result<Report, Error> {
        let tmp = tmp_path(output);
        let name = tmp.display().to_string();
        let file = File::create(&tmp).map_err(|e| Error::FileCreate(name, e))?;

        let report = match self.write(source, BufWriter::new(file)) {
            Ok(report) => report,
            Err(err) => {
                let _ = fs::remove_file(&tmp);
                return Err(err);
            }
        };

        fs::rename(&tmp, output).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::FileWrite(output.display().to_string(), e)
        })?;
        Ok(report)
    }
}

fn tmp_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(raw: &str, position: Position, token: &str) -> Diagnostic {
        Diagnostic {
            row: 0,
            raw: raw.to_string(),
            position,
            token: token.to_string(),
        }
    }

    #[test]
    fn column_of_first_argument() {
        assert_eq!(diag("LD XYZ,N", Position::Arg1, "XYZ").column(), Some(3));
        // `D` also appears in the mnemonic
        assert_eq!(diag("  LD D,N", Position::Arg1, "D").column(), Some(5));
    }

    #[test]
    fn column_of_second_argument() {
        assert_eq!(diag("LD a,(ix+DIS)", Position::Arg2, "(ix+DIS)").column(), Some(5));
        assert_eq!(diag("LD q,q", Position::Arg2, "q").column(), Some(5));
    }

    #[test]
    fn column_missing() {
        assert_eq!(diag("NOP", Position::Arg1, "x").column(), None);
    }
}
