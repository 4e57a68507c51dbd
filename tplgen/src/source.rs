use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;

/// One instruction definition, e.g. `LD a,N` encoded as `3E`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub mnemonic: String,
    pub code: u8,
    #[serde(default)]
    pub prefix: u8,
}

impl Row {
    pub fn new(mnemonic: &str, code: u8, prefix: u8) -> Self {
        Row {
            mnemonic: mnemonic.to_string(),
            code,
            prefix,
        }
    }
}

/// Ordered instruction rows plus the mnemonic prefixes that drive grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowSource {
    pub rows: Vec<Row>,
    /// Explicit prefix list. Derived from `rows` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<String>>,
}

impl RowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        RowSource {
            rows,
            prefixes: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::FileOpen(name.clone(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Yaml(name, e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Yaml("<rows>".to_string(), e))
    }

    /// Distinct mnemonic prefixes in first-occurrence order, or the explicit
    /// list when the source carries one.
    pub fn prefixes(&self) -> Vec<String> {
        if let Some(prefixes) = &self.prefixes {
            return prefixes.clone();
        }
        self.rows
            .iter()
            .map(|row| prefix_of(&row.mnemonic))
            .collect::<IndexSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Rows belonging to `prefix` with their source index, in delivery order.
    pub fn rows_for<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (usize, &'a Row)> {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| matches_prefix(&row.mnemonic, prefix))
    }
}

/// Text before the first space, or the whole text when there is none.
pub fn prefix_of(mnemonic: &str) -> &str {
    let mnemonic = mnemonic.trim();
    match mnemonic.split_once(' ') {
        Some((head, _)) => head,
        None => mnemonic,
    }
}

/// `mnemonic` starts with `prefix`, followed by the end or a space.
pub fn matches_prefix(mnemonic: &str, prefix: &str) -> bool {
    match mnemonic.trim().strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_rules() {
        assert_eq!(prefix_of("LD a,N"), "LD");
        assert_eq!(prefix_of("NOP"), "NOP");
        assert_eq!(prefix_of("  RET nz"), "RET");
        assert_eq!(prefix_of(""), "");

        assert!(matches_prefix("LD a,N", "LD"));
        assert!(matches_prefix("LD", "LD"));
        assert!(!matches_prefix("LDIR", "LD"));
        assert!(!matches_prefix("LDD", "LD"));
        assert!(matches_prefix("LDD", "LDD"));
        assert!(!matches_prefix("NOP", "LD"));
    }

    #[test]
    fn derived_prefixes_keep_first_occurrence() {
        let source = RowSource::new(vec![
            Row::new("LD a,N", 0x3E, 0),
            Row::new("NOP", 0x00, 0),
            Row::new("LD b,c", 0x41, 0),
            Row::new("LDIR", 0xB0, 0xED),
        ]);
        assert_eq!(source.prefixes(), vec!["LD", "NOP", "LDIR"]);
        let ld: Vec<usize> = source.rows_for("LD").map(|(idx, _)| idx).collect();
        assert_eq!(ld, vec![0, 2]);
    }

    #[test]
    fn explicit_prefixes_win() {
        let mut source = RowSource::new(vec![Row::new("NOP", 0, 0)]);
        source.prefixes = Some(vec!["".to_string(), "NOP".to_string()]);
        assert_eq!(source.prefixes(), vec!["", "NOP"]);
    }

    #[test]
    fn yaml() {
        let source = RowSource::from_yaml(
            "rows:\n  - { mnemonic: \"LD a,N\", code: 62, prefix: 0 }\n  - { mnemonic: NOP, code: 0 }\n",
        )
        .unwrap();
        assert_eq!(source.rows[0], Row::new("LD a,N", 62, 0));
        assert_eq!(source.rows[1], Row::new("NOP", 0, 0));
        assert!(source.prefixes.is_none());

        assert!(RowSource::from_yaml("rows:\n  - { mnemonic: NOP, code: 256 }\n").is_err());
    }
}
