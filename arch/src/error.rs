use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown operand: `{0}`")]
    UnknownOperand(String),

    #[error("Mnemonic `{0}` must be 2 to 257 characters long")]
    MnemonicLength(String),

    #[error("Mnemonic `{0}` contains non-ASCII characters")]
    MnemonicNotAscii(String),

    #[error("Too many argument combinations for `{0}`: {1} (max 255)")]
    TooManyCombos(String, usize),

    #[error("Too many instructions: {0} (max 255)")]
    TooManyInstructions(usize),

    #[error("Header declares {declared} instructions but {written} were written")]
    CountMismatch { declared: u8, written: usize },

    #[error("Template header already written")]
    HeaderAlreadyWritten,

    #[error("Template header not written yet")]
    HeaderMissing,

    #[error("Template writer is closed")]
    WriterClosed,

    #[error("Not a template file: magic is {0:?}")]
    BadMagic(Vec<u8>),

    #[error("Template version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("Template truncated while reading {0}")]
    Truncated(&'static str),

    #[error("{0} trailing bytes after the last instruction")]
    TrailingBytes(usize),

    #[error("Failed to write template")]
    Write(#[source] std::io::Error),

    #[error("Failed to read template")]
    Read(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
