// token.rs

use std::fmt::Display;

/// One instruction definition split into its parts, e.g. `LD a,N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub mnemonic: String,
    pub arg1: String,
    pub arg2: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Mnemonic,
    Arg1,
    Arg2,
}

/// Splits `MNEMONIC ARG1,ARG2`. Never fails.
///
/// The first space ends the mnemonic and the first comma after it ends the
/// first argument; neither delimiter is kept. `arg1` is trimmed on both
/// sides, `arg2` only on the left.
pub fn tokenize(raw: &str) -> Tokens {
    let mut tokens = Tokens::default();
    let mut stage = Stage::Mnemonic;

    for c in raw.trim().chars() {
        match stage {
            Stage::Mnemonic => match c {
                ' ' => stage = Stage::Arg1,
                _ => tokens.mnemonic.push(c),
            },
            Stage::Arg1 => match c {
                ',' => stage = Stage::Arg2,
                _ => tokens.arg1.push(c),
            },
            Stage::Arg2 => tokens.arg2.push(c),
        }
    }

    tokens.arg1 = tokens.arg1.trim().to_string();
    tokens.arg2 = tokens.arg2.trim_start().to_string();
    tokens
}

impl Display for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        if !self.arg1.is_empty() || !self.arg2.is_empty() {
            write!(f, " {}", self.arg1)?;
        }
        if !self.arg2.is_empty() {
            write!(f, ",{}", self.arg2)?;
        }
        Ok(())
    }
}
