use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::error::Error;

/// Byte written in place of an operand index that could not be resolved.
/// Never a valid vocabulary index.
pub const UNKNOWN_OPERAND: u8 = 0xFF;

/// Operand vocabulary of template format version 0.
/// The discriminant is the byte written to the template, so variants must
/// never be reordered without bumping the format version.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum Operand {
    #[default]
    Empty,
    Imm8,
    Imm16,
    Addr16,
    Disp,
    Colon,

    B,
    C,
    BC,
    IndBC,
    D,
    E,
    DE,
    IndDE,
    H,
    L,
    HL,
    IndHL,
    A,
    AF,
    AFShadow,
    SP,
    IndSP,
    I,
    R,
    IndC,

    NZ,
    Z,
    NC,
    PO,
    PE,
    P,
    M,

    N0,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N16,
    N24,
    N32,
    N40,
    N48,
    N56,
}

static OPERAND_MAP: Lazy<BiMap<&'static str, Operand>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Operand> = BiMap::new();
    map.insert("", Operand::Empty);
    map.insert("N", Operand::Imm8);
    map.insert("NN", Operand::Imm16);
    map.insert("(NN)", Operand::Addr16);
    map.insert("DIS", Operand::Disp);
    map.insert(":", Operand::Colon);
    map.insert("b", Operand::B);
    map.insert("c", Operand::C);
    map.insert("bc", Operand::BC);
    map.insert("(bc)", Operand::IndBC);
    map.insert("d", Operand::D);
    map.insert("e", Operand::E);
    map.insert("de", Operand::DE);
    map.insert("(de)", Operand::IndDE);
    map.insert("h", Operand::H);
    map.insert("l", Operand::L);
    map.insert("hl", Operand::HL);
    map.insert("(hl)", Operand::IndHL);
    map.insert("a", Operand::A);
    map.insert("af", Operand::AF);
    map.insert("af'", Operand::AFShadow);
    map.insert("sp", Operand::SP);
    map.insert("(sp)", Operand::IndSP);
    map.insert("i", Operand::I);
    map.insert("r", Operand::R);
    map.insert("(c)", Operand::IndC);
    map.insert("nz", Operand::NZ);
    map.insert("z", Operand::Z);
    map.insert("nc", Operand::NC);
    map.insert("po", Operand::PO);
    map.insert("pe", Operand::PE);
    map.insert("p", Operand::P);
    map.insert("m", Operand::M);
    map.insert("0", Operand::N0);
    map.insert("1", Operand::N1);
    map.insert("2", Operand::N2);
    map.insert("3", Operand::N3);
    map.insert("4", Operand::N4);
    map.insert("5", Operand::N5);
    map.insert("6", Operand::N6);
    map.insert("7", Operand::N7);
    map.insert("8", Operand::N8);
    map.insert("16", Operand::N16);
    map.insert("24", Operand::N24);
    map.insert("32", Operand::N32);
    map.insert("40", Operand::N40);
    map.insert("48", Operand::N48);
    map.insert("56", Operand::N56);
    map
});

impl Operand {
    /// Exact, case-sensitive lookup of an operand token.
    pub fn resolve(token: &str) -> Result<Self, Error> {
        match OPERAND_MAP.get_by_left(token) {
            Some(operand) => Ok(*operand),
            None => Err(Error::UnknownOperand(token.to_string())),
        }
    }

    /// Like [`Operand::resolve`], but retries with the token lower-cased so
    /// that `A` or `HL` find the register entries. Placeholders such as `N`
    /// keep matching exactly because the exact lookup runs first.
    pub fn resolve_folded(token: &str) -> Result<Self, Error> {
        Self::resolve(token).or_else(|err| {
            let lower = token.to_ascii_lowercase();
            if lower == token {
                Err(err)
            } else {
                Self::resolve(&lower).map_err(|_| err)
            }
        })
    }

    pub fn token(&self) -> &'static str {
        OPERAND_MAP.get_by_right(self).copied().unwrap_or_default()
    }

    pub fn index(self) -> u8 {
        self.into()
    }

    /// All tokens in index order.
    pub fn vocabulary() -> impl Iterator<Item = &'static str> {
        Operand::iter().map(|operand| operand.token())
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
