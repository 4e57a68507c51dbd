use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MAGIC: &[u8; 5] = b"siasm";
pub const FORMAT_VERSION: u8 = 0;
pub const HEADER_SIZE: usize = MAGIC.len() + 2;
pub const MAX_INSTRUCTIONS: usize = u8::MAX as usize;

/// Fixed 7-byte file header: magic, version, instruction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    pub count: u8,
}

impl Header {
    pub fn new(version: u8, count: usize) -> Result<Self> {
        if count > MAX_INSTRUCTIONS {
            return Err(Error::TooManyInstructions(count));
        }
        Ok(Header {
            version,
            count: count as u8,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..MAGIC.len()].copy_from_slice(MAGIC);
        bytes[MAGIC.len()] = self.version;
        bytes[MAGIC.len() + 1] = self.count;
        bytes
    }
}

#[test]
fn header_bytes() {
    let header = Header::new(FORMAT_VERSION, 3).unwrap();
    assert_eq!(&header.to_bytes(), b"siasm\x00\x03");
    assert!(Header::new(0, 255).is_ok());
    assert!(matches!(
        Header::new(0, 256),
        Err(Error::TooManyInstructions(256))
    ));
}
