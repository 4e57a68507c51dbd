use serde::Serialize;
use std::{fs::File, io::Read, path::Path};

use crate::error::{Error, Result};
use crate::inst::{ArgumentCombo, Instruction, MIN_MNEMONIC_LEN};
use crate::operand::Operand;
use crate::template::{Header, MAGIC};
use crate::token::tokenize;

/// A decoded template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub header: Header,
    pub instructions: Vec<Instruction>,
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8]> {
        let end = self.pos + len;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::Truncated(what))?;
        self.pos = end;
        Ok(bytes)
    }

    fn byte(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

impl Template {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).map_err(Error::Read)?;
        Self::read_from(file)
    }

    pub fn read_from(mut reader: impl Read) -> Result<Self> {
        let mut buf = vec![];
        reader.read_to_end(&mut buf).map_err(Error::Read)?;
        Self::from_bytes(&buf)
    }

    /// Walks the records sequentially; the format has no index.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let mut cur = Cursor { buf, pos: 0 };

        let magic = cur.take(MAGIC.len(), "magic")?;
        if magic != MAGIC {
            return Err(Error::BadMagic(magic.to_vec()));
        }
        let header = Header {
            version: cur.byte("version")?,
            count: cur.byte("instruction count")?,
        };

        let mut instructions = Vec::with_capacity(header.count as usize);
        for _ in 0..header.count {
            let flags = cur.byte("flags")?;
            let name = cur.take(flags as usize + MIN_MNEMONIC_LEN, "mnemonic")?;
            let mnemonic = String::from_utf8_lossy(name);
            let count = cur.byte("combo count")?;
            let mut combos = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = cur.take(ArgumentCombo::SIZE, "argument combination")?;
                combos.push(ArgumentCombo::from_bytes([
                    bytes[0], bytes[1], bytes[2], bytes[3],
                ]));
            }
            instructions.push(Instruction::new(&mnemonic, combos)?);
        }

        if cur.remaining() > 0 {
            return Err(Error::TrailingBytes(cur.remaining()));
        }
        Ok(Template {
            header,
            instructions,
        })
    }

    pub fn expect_version(&self, expected: u8) -> Result<()> {
        if self.header.version != expected {
            return Err(Error::UnsupportedVersion {
                found: self.header.version,
                expected,
            });
        }
        Ok(())
    }

    pub fn instruction(&self, mnemonic: &str) -> Option<&Instruction> {
        self.instructions
            .iter()
            .find(|inst| inst.mnemonic() == mnemonic)
    }

    /// Finds the encoding of `mnemonic arg1,arg2` the way the assembler scans
    /// the template: first matching mnemonic, first combo with both operand
    /// indices equal. Unknown operand text never matches.
    pub fn lookup(&self, mnemonic: &str, arg1: &str, arg2: &str) -> Option<&ArgumentCombo> {
        let arg1 = Operand::resolve(arg1).ok()?.index();
        let arg2 = Operand::resolve(arg2).ok()?.index();
        self.instructions
            .iter()
            .filter(|inst| inst.mnemonic() == mnemonic)
            .flat_map(|inst| inst.combos())
            .find(|combo| combo.arg1 == arg1 && combo.arg2 == arg2)
    }

    pub fn lookup_line(&self, line: &str) -> Option<&ArgumentCombo> {
        let tokens = tokenize(line);
        self.lookup(&tokens.mnemonic, &tokens.arg1, &tokens.arg2)
    }
}
