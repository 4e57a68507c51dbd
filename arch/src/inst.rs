use color_print::cformat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::operand::{Operand, UNKNOWN_OPERAND};

pub const MIN_MNEMONIC_LEN: usize = 2;
pub const MAX_MNEMONIC_LEN: usize = u8::MAX as usize + MIN_MNEMONIC_LEN;
pub const MAX_COMBOS: usize = u8::MAX as usize;

// ----------------------------------------------------------------------------
// Argument combination

/// One operand form of an instruction: `[arg1, arg2, opcode, prefix]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArgumentCombo {
    pub arg1: u8,
    pub arg2: u8,
    pub opcode: u8,
    pub prefix: u8,
}

impl ArgumentCombo {
    pub const SIZE: usize = 4;

    pub fn new(arg1: Operand, arg2: Operand, opcode: u8, prefix: u8) -> Self {
        ArgumentCombo {
            arg1: arg1.index(),
            arg2: arg2.index(),
            opcode,
            prefix,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [self.arg1, self.arg2, self.opcode, self.prefix]
    }

    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let [arg1, arg2, opcode, prefix] = bytes;
        ArgumentCombo {
            arg1,
            arg2,
            opcode,
            prefix,
        }
    }

    /// Decoded operands; `None` for the unknown-operand sentinel or any other
    /// byte outside the vocabulary.
    pub fn operands(&self) -> (Option<Operand>, Option<Operand>) {
        (
            Operand::try_from(self.arg1).ok(),
            Operand::try_from(self.arg2).ok(),
        )
    }

    pub fn is_flagged(&self) -> bool {
        self.arg1 == UNKNOWN_OPERAND || self.arg2 == UNKNOWN_OPERAND
    }

    pub fn cformat(&self, mnemonic: &str) -> String {
        let arg = |byte: u8| match Operand::try_from(byte) {
            Ok(operand) => cformat!("<blue>{}</>", operand),
            Err(_) => cformat!("<r,s>??({:02X})</>", byte),
        };
        let args = match (self.arg1, self.arg2) {
            (0, 0) => String::new(),
            (a1, 0) => arg(a1),
            (a1, a2) => format!("{},{}", arg(a1), arg(a2)),
        };
        cformat!(
            "<y>{:02X} {:02X}</> | <red>{:<6}</>{}",
            self.prefix,
            self.opcode,
            mnemonic,
            args
        )
    }
}

// ----------------------------------------------------------------------------
// Instruction

/// All argument combinations sharing one mnemonic. Only constructed through
/// [`InstructionBuilder`] or [`Instruction::new`], so the mnemonic and combo
/// count always fit the record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    mnemonic: String,
    combos: Vec<ArgumentCombo>,
}

impl Instruction {
    pub fn new(mnemonic: &str, combos: Vec<ArgumentCombo>) -> Result<Self> {
        let mut builder = InstructionBuilder::new(mnemonic);
        for combo in combos {
            builder.push(combo);
        }
        builder.finish()
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn combos(&self) -> &[ArgumentCombo] {
        &self.combos
    }

    /// `len(mnemonic) - 2`, reserved by the format.
    pub fn flags(&self) -> u8 {
        (self.mnemonic.len() - MIN_MNEMONIC_LEN) as u8
    }

    /// Record bytes: flags, mnemonic, combo count, combos.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(2 + self.mnemonic.len() + self.combos.len() * ArgumentCombo::SIZE);
        bytes.push(self.flags());
        bytes.extend_from_slice(self.mnemonic.as_bytes());
        bytes.push(self.combos.len() as u8);
        for combo in &self.combos {
            bytes.extend_from_slice(&combo.to_bytes());
        }
        bytes
    }
}

// ----------------------------------------------------------------------------
// Builder

#[derive(Debug, Clone)]
pub struct InstructionBuilder {
    mnemonic: String,
    combos: Vec<ArgumentCombo>,
}

impl InstructionBuilder {
    pub fn new(mnemonic: &str) -> Self {
        InstructionBuilder {
            mnemonic: mnemonic.to_string(),
            combos: vec![],
        }
    }

    pub fn push(&mut self, combo: ArgumentCombo) -> &mut Self {
        self.combos.push(combo);
        self
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn finish(self) -> Result<Instruction> {
        if !self.mnemonic.is_ascii() {
            return Err(Error::MnemonicNotAscii(self.mnemonic));
        }
        if !(MIN_MNEMONIC_LEN..=MAX_MNEMONIC_LEN).contains(&self.mnemonic.len()) {
            return Err(Error::MnemonicLength(self.mnemonic));
        }
        if self.combos.len() > MAX_COMBOS {
            return Err(Error::TooManyCombos(self.mnemonic, self.combos.len()));
        }
        Ok(Instruction {
            mnemonic: self.mnemonic,
            combos: self.combos,
        })
    }
}
